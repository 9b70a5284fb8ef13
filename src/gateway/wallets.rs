//! 巨鲸追踪的示例钱包

use rand::seq::IndexedRandom;

/// 未指定地址时的候选钱包（交易所热钱包和大户地址）
pub const EXAMPLE_WALLETS: &[&str] = &[
    "5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1",
    "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM",
    "H8sMJSCQxfKiFTCfDR3DUMLPwcRbM61LGFJ8N4dK3WjS",
    "2ojv9BAiHUrvsm9gxDe7fJSzbNZSJcxZvf8dqmWGHG8S",
    "AC5RDfQFmDS1deWZos921JfqscXdByf8BKHs5ACWjtW2",
];

/// 从候选列表中选一个钱包地址
pub trait WalletPicker: Send + Sync {
    fn pick(&self, candidates: &[&'static str]) -> &'static str;
}

/// 均匀随机选择，不保证可复现
pub struct RandomWalletPicker;

impl WalletPicker for RandomWalletPicker {
    fn pick(&self, candidates: &[&'static str]) -> &'static str {
        candidates
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(EXAMPLE_WALLETS[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_pick_stays_within_candidates() {
        for _ in 0..32 {
            let picked = RandomWalletPicker.pick(EXAMPLE_WALLETS);
            assert!(EXAMPLE_WALLETS.contains(&picked));
        }
    }
}
