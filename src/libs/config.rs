use {
    dotenv::dotenv,
    serde::{Deserialize, Serialize},
    std::{fmt::Debug, str::FromStr},
};

pub fn load_env() {
    dotenv().ok();
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Hex encoded 32-byte private key. `None` when no wallet is
    /// configured; every chain operation treats that as a hard
    /// precondition failure rather than panicking at startup.
    pub private_key: Option<String>,
    pub bsc_rpc: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            private_key: std::env::var("PRIVATE_KEY").ok(),
            bsc_rpc: std::env::var("BSC_RPC").ok(),
        }
    }

    /// Parse env var to T; fall back to typed default.
    pub fn get_var_t<T>(key: &str, default: T) -> T
    where
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        std::env::var(key)
            .ok()
            .and_then(|s| s.parse::<T>().ok())
            .unwrap_or(default)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
