alloy::sol! {
    /// The fixed-price swap desk. Prices, fees and limits are owner-set
    /// on chain; this client only reads them and submits buy/sell calls.
    #[sol(rpc)]
    interface ISwapDesk {
        function buyPrice() view returns (uint256);
        function sellPrice() view returns (uint256);
        function buyFee() view returns (uint256);
        function sellFee() view returns (uint256);
        function maxDailySwap() view returns (uint256);
        function minSwap() view returns (uint256);

        function buy(uint256 usdtAmount) external;
        function sell(uint256 tokenAmount) external;

        function balanceOf(address user) view returns (uint256);
    }

    /// Minimal BEP20 surface: balances, allowance checks and approvals.
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address user) view returns (uint256);
        function allowance(address owner, address spender) view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}
