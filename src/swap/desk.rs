use alloy::primitives::{Address, B256, U256};
use alloy::providers::Provider;

use crate::constants::{SWAP_DESK, USDT, VST};
use crate::libs::writing::cc;
use crate::log;
use crate::swap::abi::{IERC20, ISwapDesk};
use crate::swap::error::SwapError;
use crate::swap::reader::{BalanceSnapshot, MarketQuote, SwapGateway};
use crate::swap::units::format_token;

/// Chain-facing half of the core: read calls against the swap desk and
/// the two token contracts, plus the three guarded writes. The provider
/// carries the wallet, so submitted calls are signed with the session
/// key.
#[derive(Clone)]
pub struct SwapDesk<P: Provider + Clone> {
    provider: P,
    pub desk_addr: Address,
    pub usdt_addr: Address,
    pub vst_addr: Address,
}

impl<P: Provider + Clone> SwapDesk<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            desk_addr: SWAP_DESK,
            usdt_addr: USDT,
            vst_addr: VST,
        }
    }

    fn erc20(&self, token: Address) -> IERC20::IERC20Instance<P> {
        IERC20::new(token, self.provider.clone())
    }

    /// Submit a prepared call and block until it is mined. There is no
    /// timeout; a hung provider hangs the operation.
    async fn send_and_confirm<D>(
        &self,
        call: alloy::contract::CallBuilder<&P, D>,
        label: &'static str,
    ) -> Result<B256, SwapError>
    where
        D: alloy::contract::CallDecoder,
    {
        let pending = call.send().await.map_err(SwapError::classify_rpc)?;
        let tx = *pending.tx_hash();
        log!(cc::YELLOW, "{} tx submitted: {:?}", label, tx);
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| SwapError::Rpc(e.to_string()))?;
        if !receipt.status() {
            return Err(SwapError::Reverted(label));
        }
        Ok(tx)
    }
}

impl<P: Provider + Clone> SwapGateway for SwapDesk<P> {
    async fn market_quote(&self) -> Result<MarketQuote, SwapError> {
        let desk = ISwapDesk::new(self.desk_addr, self.provider.clone());
        // The builders borrow `desk`; keep them alive across the join.
        let buy_price_call = desk.buyPrice();
        let sell_price_call = desk.sellPrice();
        let buy_fee_call = desk.buyFee();
        let sell_fee_call = desk.sellFee();
        let max_daily_call = desk.maxDailySwap();
        let min_swap_call = desk.minSwap();
        let (buy_price, sell_price, buy_fee, sell_fee, max_daily, min_swap) = tokio::try_join!(
            buy_price_call.call(),
            sell_price_call.call(),
            buy_fee_call.call(),
            sell_fee_call.call(),
            max_daily_call.call(),
            min_swap_call.call(),
        )
        .map_err(SwapError::classify_rpc)?;

        Ok(MarketQuote {
            buy_price: format_token(buy_price),
            sell_price: format_token(sell_price),
            buy_fee: format_token(buy_fee),
            sell_fee: format_token(sell_fee),
            max_daily_swap: format_token(max_daily),
            min_swap: format_token(min_swap),
        })
    }

    async fn balances(&self, owner: Address) -> Result<BalanceSnapshot, SwapError> {
        let usdt = self.erc20(self.usdt_addr);
        let vst = self.erc20(self.vst_addr);
        let usdt_call = usdt.balanceOf(owner);
        let vst_call = vst.balanceOf(owner);
        let (usdt_units, vst_units) = tokio::try_join!(usdt_call.call(), vst_call.call())
            .map_err(SwapError::classify_rpc)?;

        Ok(BalanceSnapshot {
            usdt: format_token(usdt_units),
            vst: format_token(vst_units),
        })
    }

    async fn allowance(&self, token: Address, owner: Address) -> Result<U256, SwapError> {
        self.erc20(token)
            .allowance(owner, self.desk_addr)
            .call()
            .await
            .map_err(SwapError::classify_rpc)
    }

    async fn approve(&self, token: Address, amount: U256) -> Result<B256, SwapError> {
        let erc20 = self.erc20(token);
        let tx = self
            .send_and_confirm(erc20.approve(self.desk_addr, amount), "approve")
            .await
            .map_err(|e| match e {
                SwapError::Rejected => SwapError::Rejected,
                SwapError::Reverted(_) => SwapError::Approval("transaction reverted".into()),
                SwapError::Rpc(msg) => SwapError::Approval(msg),
                other => other,
            })?;
        log!(
            cc::GREEN,
            "approved desk for {} of {:?}",
            format_token(amount),
            token
        );
        Ok(tx)
    }

    async fn buy(&self, usdt_units: U256) -> Result<B256, SwapError> {
        let desk = ISwapDesk::new(self.desk_addr, self.provider.clone());
        self.send_and_confirm(desk.buy(usdt_units), "buy").await
    }

    async fn sell(&self, token_units: U256) -> Result<B256, SwapError> {
        let desk = ISwapDesk::new(self.desk_addr, self.provider.clone());
        self.send_and_confirm(desk.sell(token_units), "sell").await
    }
}
