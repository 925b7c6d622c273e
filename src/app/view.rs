use alloy::primitives::Address;

use crate::swap::{BalanceSnapshot, MarketQuote, SwapError, SwapGateway, TradeReport};

/// UI-facing state for the session. Freshness is pull-based: the event
/// loop calls the refresh operations on startup, after a network
/// change, on demand, and `absorb` applies the post-trade re-read.
/// Nothing here watches the chain.
#[derive(Clone, Debug, Default)]
pub struct DashboardView {
    pub wallet_address: Option<Address>,
    pub quote: MarketQuote,
    pub balances: BalanceSnapshot,
    pub busy: bool,
}

impl DashboardView {
    /// Short `0x1234…abcd` form for the wallet panel.
    pub fn address_short(&self) -> String {
        match self.wallet_address {
            Some(addr) => {
                let s = addr.to_string();
                format!("{}…{}", &s[..6], &s[s.len() - 4..])
            }
            None => "not connected".into(),
        }
    }

    /// Re-read the whole quote. On failure the previous quote stays.
    pub async fn refresh_quote<G: SwapGateway>(&mut self, gateway: &G) -> Result<(), SwapError> {
        self.quote = gateway.market_quote().await?;
        Ok(())
    }

    /// Re-read balances for the tracked address; a missing address is a
    /// quiet no-op, matching connect-before-balances ordering.
    pub async fn refresh_balances<G: SwapGateway>(&mut self, gateway: &G) -> Result<(), SwapError> {
        let Some(owner) = self.wallet_address else {
            return Ok(());
        };
        self.balances = gateway.balances(owner).await?;
        Ok(())
    }

    /// Apply whatever state a confirmed trade managed to re-read; a
    /// missing field keeps the previous value.
    pub fn absorb(&mut self, report: &TradeReport) {
        if let Some(quote) = &report.quote {
            self.quote = quote.clone();
        }
        if let Some(balances) = &report.balances {
            self.balances = balances.clone();
        }
    }
}
