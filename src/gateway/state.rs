//! Gateway 应用状态

use std::sync::Arc;

use crate::config::ServicesConfig;
use crate::gateway::wallets::{RandomWalletPicker, WalletPicker};
use crate::portfolio::PortfolioStore;
use crate::providers::{
    CompletionProvider, ExchangeProvider, OpenAiProvider, PriceProvider, QuoteApiProvider,
    SolscanProvider, TokenAuditProvider,
};
use crate::utils::get_shared_client;

/// 各外部服务是否已配置（供 /health 展示）
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct ServiceStatus {
    pub completion: bool,
    pub transfers: bool,
    pub prices: bool,
    pub token_audit: bool,
}

/// Gateway 应用状态
///
/// 所有外部依赖都在这里显式持有，handler 不读取任何全局状态。
#[derive(Clone)]
pub struct AppState {
    completion: Arc<dyn CompletionProvider>,
    prices: Arc<dyn PriceProvider>,
    transfers: Arc<SolscanProvider>,
    candles: Arc<ExchangeProvider>,
    audits: Arc<TokenAuditProvider>,
    portfolios: Arc<PortfolioStore>,
    wallet_picker: Arc<dyn WalletPicker>,
    status: ServiceStatus,
}

impl AppState {
    pub fn from_config(config: &ServicesConfig) -> Self {
        let client = get_shared_client().clone();

        let completion = OpenAiProvider::new(client.clone(), config);
        let prices = QuoteApiProvider::new(client.clone(), config);
        let transfers = SolscanProvider::new(client.clone(), config);
        let audits = TokenAuditProvider::new(client.clone(), config);
        let candles = ExchangeProvider::new(client, config);

        let status = ServiceStatus {
            completion: completion.is_configured(),
            transfers: transfers.is_configured(),
            prices: prices.is_configured(),
            token_audit: audits.is_configured(),
        };

        Self {
            completion: Arc::new(completion),
            prices: Arc::new(prices),
            transfers: Arc::new(transfers),
            candles: Arc::new(candles),
            audits: Arc::new(audits),
            portfolios: Arc::new(PortfolioStore::new()),
            wallet_picker: Arc::new(RandomWalletPicker),
            status,
        }
    }

    #[cfg(test)]
    pub fn with_completion(mut self, completion: Arc<dyn CompletionProvider>) -> Self {
        self.completion = completion;
        self.status.completion = true;
        self
    }

    #[cfg(test)]
    pub fn with_prices(mut self, prices: Arc<dyn PriceProvider>) -> Self {
        self.prices = prices;
        self.status.prices = true;
        self
    }

    #[cfg(test)]
    pub fn with_wallet_picker(mut self, picker: Arc<dyn WalletPicker>) -> Self {
        self.wallet_picker = picker;
        self
    }

    pub fn completion(&self) -> &dyn CompletionProvider {
        self.completion.as_ref()
    }

    pub fn prices(&self) -> &dyn PriceProvider {
        self.prices.as_ref()
    }

    pub fn transfers(&self) -> &SolscanProvider {
        &self.transfers
    }

    pub fn candles(&self) -> &ExchangeProvider {
        &self.candles
    }

    pub fn audits(&self) -> &TokenAuditProvider {
        &self.audits
    }

    pub fn portfolios(&self) -> &PortfolioStore {
        &self.portfolios
    }

    pub fn wallet_picker(&self) -> &dyn WalletPicker {
        self.wallet_picker.as_ref()
    }

    pub fn service_status(&self) -> ServiceStatus {
        self.status
    }
}
