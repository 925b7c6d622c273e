use thiserror::Error;

/// Failures of the swap core, one variant per error origin: missing
/// wallet (precondition), user rejection, RPC transport, contract
/// logic, and input conversion.
#[derive(Debug, Error)]
pub enum SwapError {
    #[error("no wallet configured; set PRIVATE_KEY")]
    NoWallet,

    #[error("request rejected in wallet")]
    Rejected,

    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("approval failed: {0}")]
    Approval(String),

    /// The approval transaction mined but the re-read allowance is
    /// still below the requested amount. The spend is never submitted.
    #[error("allowance not updated after approval")]
    StaleAllowance,

    #[error("{0} transaction reverted")]
    Reverted(&'static str),

    #[error("invalid amount `{0}`")]
    BadAmount(String),

    #[error("chain {0} is not recognized by the wallet")]
    UnrecognizedChain(u64),

    #[error("another trade is already in flight")]
    Busy,
}

impl SwapError {
    /// Wrap a transport/contract error, sniffing out user rejections so
    /// the caller can keep them off the toast line.
    pub fn classify_rpc<E: std::fmt::Display>(err: E) -> Self {
        let msg = err.to_string();
        let lower = msg.to_ascii_lowercase();
        if lower.contains("user rejected") || lower.contains("user denied") {
            SwapError::Rejected
        } else {
            SwapError::Rpc(msg)
        }
    }

    /// Intentional user action; logged but never surfaced as a toast.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, SwapError::Rejected)
    }
}
