pub mod abi;
pub mod desk;
pub mod error;
pub mod reader;
pub mod trade;
pub mod units;

pub use desk::SwapDesk;
pub use error::SwapError;
pub use reader::{BalanceSnapshot, MarketQuote, SwapGateway};
pub use trade::{Side, TradeDesk, TradeReport};
