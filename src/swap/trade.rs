use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use alloy::primitives::{Address, B256};

use crate::constants::{USDT, VST};
use crate::libs::writing::cc;
use crate::log;
use crate::swap::error::SwapError;
use crate::swap::reader::{BalanceSnapshot, MarketQuote, SwapGateway};
use crate::swap::units::parse_amount;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }

    /// Token the desk must be allowed to spend for this side.
    fn spend_token(self) -> Address {
        match self {
            Side::Buy => USDT,
            Side::Sell => VST,
        }
    }
}

/// Outcome of a confirmed trade. The quote and balances are re-read
/// exactly once after the spend transaction mines, but a failed re-read
/// never turns a mined trade into an error: the field is just `None`
/// and the previous view state stands.
#[derive(Debug)]
pub struct TradeReport {
    pub side: Side,
    pub tx: B256,
    pub quote: Option<MarketQuote>,
    pub balances: Option<BalanceSnapshot>,
}

/// Sequences approve → allowance check → spend for one side of the
/// desk. One trade at a time: the in-flight flag is enforced here, not
/// left to the UI.
#[derive(Clone)]
pub struct TradeDesk<G> {
    gateway: G,
    owner: Address,
    in_flight: Arc<AtomicBool>,
}

impl<G: SwapGateway> TradeDesk<G> {
    pub fn new(gateway: G, owner: Address) -> Self {
        Self {
            gateway,
            owner,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Run a buy or sell for a user-entered decimal amount. Rejects the
    /// input before taking the in-flight slot, so a bad amount never
    /// blocks a concurrent valid trade.
    pub async fn execute(&self, side: Side, amount: &str) -> Result<TradeReport, SwapError> {
        let units = parse_amount(amount)?;
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SwapError::Busy);
        }
        let res = self.run(side, units).await;
        self.in_flight.store(false, Ordering::SeqCst);
        res
    }

    async fn run(&self, side: Side, units: alloy::primitives::U256) -> Result<TradeReport, SwapError> {
        let token = side.spend_token();

        // The spend must not go out before the approval is mined; the
        // desk would see an insufficient allowance.
        self.gateway.approve(token, units).await?;

        // A mined approval can still be ineffective; re-read before
        // spending instead of proceeding blindly.
        let allowance = self.gateway.allowance(token, self.owner).await?;
        if allowance < units {
            return Err(SwapError::StaleAllowance);
        }

        let tx = match side {
            Side::Buy => self.gateway.buy(units).await?,
            Side::Sell => self.gateway.sell(units).await?,
        };
        log!(cc::GREEN, "{} confirmed: {:?}", side.label(), tx);

        // The trade already mined; from here on nothing may fail it.
        let quote = match self.gateway.market_quote().await {
            Ok(q) => Some(q),
            Err(e) => {
                log!(cc::LIGHT_RED, "post-trade quote re-read failed: {}", e);
                None
            }
        };
        let balances = match self.gateway.balances(self.owner).await {
            Ok(b) => Some(b),
            Err(e) => {
                log!(cc::LIGHT_RED, "post-trade balance re-read failed: {}", e);
                None
            }
        };

        Ok(TradeReport {
            side,
            tx,
            quote,
            balances,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct MockGateway {
        approvals: Arc<Mutex<Vec<(Address, U256)>>>,
        granted_allowance: Arc<Mutex<Option<U256>>>,
        buys: Arc<Mutex<Vec<U256>>>,
        sells: Arc<Mutex<Vec<U256>>>,
        quote_fetches: Arc<AtomicUsize>,
        balance_fetches: Arc<AtomicUsize>,
        approve_delay: Option<Duration>,
        fail_reads: bool,
    }

    impl SwapGateway for MockGateway {
        async fn market_quote(&self) -> Result<MarketQuote, SwapError> {
            self.quote_fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads {
                return Err(SwapError::Rpc("node down".into()));
            }
            Ok(MarketQuote::default())
        }

        async fn balances(&self, _owner: Address) -> Result<BalanceSnapshot, SwapError> {
            self.balance_fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads {
                return Err(SwapError::Rpc("node down".into()));
            }
            Ok(BalanceSnapshot::default())
        }

        async fn allowance(&self, _token: Address, _owner: Address) -> Result<U256, SwapError> {
            // Unless scripted otherwise, the approval took effect.
            let granted = self.granted_allowance.lock().unwrap();
            Ok(granted.unwrap_or_else(|| {
                self.approvals
                    .lock()
                    .unwrap()
                    .last()
                    .map(|(_, amt)| *amt)
                    .unwrap_or(U256::ZERO)
            }))
        }

        async fn approve(&self, token: Address, amount: U256) -> Result<B256, SwapError> {
            if let Some(delay) = self.approve_delay {
                tokio::time::sleep(delay).await;
            }
            self.approvals.lock().unwrap().push((token, amount));
            Ok(B256::ZERO)
        }

        async fn buy(&self, usdt_units: U256) -> Result<B256, SwapError> {
            self.buys.lock().unwrap().push(usdt_units);
            Ok(B256::with_last_byte(1))
        }

        async fn sell(&self, token_units: U256) -> Result<B256, SwapError> {
            self.sells.lock().unwrap().push(token_units);
            Ok(B256::with_last_byte(2))
        }
    }

    fn owner() -> Address {
        Address::with_last_byte(7)
    }

    #[tokio::test]
    async fn buy_approves_usdt_then_spends_and_refreshes_once() {
        let desk = TradeDesk::new(MockGateway::default(), owner());
        let report = desk.execute(Side::Buy, "11").await.unwrap();

        assert_eq!(report.side, Side::Buy);
        let gw = &desk.gateway;
        let approvals = gw.approvals.lock().unwrap();
        assert_eq!(approvals.len(), 1);
        assert_eq!(approvals[0].0, USDT);
        assert_eq!(gw.buys.lock().unwrap().len(), 1);
        assert!(gw.sells.lock().unwrap().is_empty());
        assert_eq!(gw.quote_fetches.load(Ordering::SeqCst), 1);
        assert_eq!(gw.balance_fetches.load(Ordering::SeqCst), 1);
        assert!(report.quote.is_some());
        assert!(report.balances.is_some());
    }

    #[tokio::test]
    async fn failed_reread_does_not_fail_a_mined_trade() {
        let gw = MockGateway {
            fail_reads: true,
            ..MockGateway::default()
        };
        let desk = TradeDesk::new(gw, owner());

        let report = desk.execute(Side::Buy, "3").await.unwrap();
        assert_eq!(desk.gateway.buys.lock().unwrap().len(), 1);
        assert!(report.quote.is_none());
        assert!(report.balances.is_none());
    }

    #[tokio::test]
    async fn sell_approves_the_token_side() {
        let desk = TradeDesk::new(MockGateway::default(), owner());
        desk.execute(Side::Sell, "2.5").await.unwrap();

        let gw = &desk.gateway;
        assert_eq!(gw.approvals.lock().unwrap()[0].0, VST);
        assert_eq!(gw.sells.lock().unwrap().len(), 1);
        assert!(gw.buys.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn absent_or_non_positive_amount_is_a_no_op() {
        let desk = TradeDesk::new(MockGateway::default(), owner());
        for bad in ["", "0", "-1", "nope"] {
            let err = desk.execute(Side::Buy, bad).await.unwrap_err();
            assert!(matches!(err, SwapError::BadAmount(_)));
        }
        let gw = &desk.gateway;
        assert!(gw.approvals.lock().unwrap().is_empty());
        assert!(gw.buys.lock().unwrap().is_empty());
        assert_eq!(gw.quote_fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stale_allowance_blocks_the_spend() {
        let gw = MockGateway::default();
        *gw.granted_allowance.lock().unwrap() = Some(U256::ZERO);
        let desk = TradeDesk::new(gw, owner());

        let err = desk.execute(Side::Buy, "5").await.unwrap_err();
        assert!(matches!(err, SwapError::StaleAllowance));

        let gw = &desk.gateway;
        // Approval went out, spend never did, nothing was re-read.
        assert_eq!(gw.approvals.lock().unwrap().len(), 1);
        assert!(gw.buys.lock().unwrap().is_empty());
        assert_eq!(gw.quote_fetches.load(Ordering::SeqCst), 0);
        assert_eq!(gw.balance_fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn second_trade_fails_fast_while_one_is_in_flight() {
        let gw = MockGateway {
            approve_delay: Some(Duration::from_millis(50)),
            ..MockGateway::default()
        };
        let desk = TradeDesk::new(gw, owner());
        let desk2 = desk.clone();

        let (first, second) = tokio::join!(desk.execute(Side::Buy, "1"), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            desk2.execute(Side::Sell, "1").await
        });

        assert!(first.is_ok());
        assert!(matches!(second.unwrap_err(), SwapError::Busy));
        // Only the first trade reached the chain.
        assert_eq!(desk.gateway.approvals.lock().unwrap().len(), 1);
    }
}
