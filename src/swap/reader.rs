use alloy::primitives::{Address, B256, U256};

use crate::swap::error::SwapError;

/// On-chain pricing read wholesale from the swap desk. All quantities
/// are decimal strings already converted from 18-decimal base units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketQuote {
    pub buy_price: String,
    pub sell_price: String,
    pub buy_fee: String,
    pub sell_fee: String,
    pub max_daily_swap: String,
    pub min_swap: String,
}

impl Default for MarketQuote {
    fn default() -> Self {
        Self {
            buy_price: "0".into(),
            sell_price: "0".into(),
            buy_fee: "0".into(),
            sell_fee: "0".into(),
            max_daily_swap: "0".into(),
            min_swap: "0".into(),
        }
    }
}

/// Wallet balances of the trading pair, decimal strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub usdt: String,
    pub vst: String,
}

impl Default for BalanceSnapshot {
    fn default() -> Self {
        Self {
            usdt: "0".into(),
            vst: "0".into(),
        }
    }
}

/// The seam between the orchestrator and the chain. Write operations
/// resolve once the transaction is mined; a reverted transaction is an
/// error, not a hash. Nothing here retries or times out.
#[allow(async_fn_in_trait)]
pub trait SwapGateway {
    /// Fetch the whole quote in one concurrent batch; any single failed
    /// call aborts the batch.
    async fn market_quote(&self) -> Result<MarketQuote, SwapError>;

    async fn balances(&self, owner: Address) -> Result<BalanceSnapshot, SwapError>;

    async fn allowance(&self, token: Address, owner: Address) -> Result<U256, SwapError>;

    /// Approve the swap desk to spend `amount` of `token`, waiting for
    /// the approval to mine.
    async fn approve(&self, token: Address, amount: U256) -> Result<B256, SwapError>;

    async fn buy(&self, usdt_units: U256) -> Result<B256, SwapError>;

    async fn sell(&self, token_units: U256) -> Result<B256, SwapError>;
}
