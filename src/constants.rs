use alloy::primitives::{address, Address};

#[macro_export]
macro_rules! env_lazy {
    ($( $vis:vis $name:ident : $ty:ty = ($key:literal, $default:expr); )* ) => {
        $(
            $vis static $name: ::std::sync::LazyLock<$ty> = ::std::sync::LazyLock::new(|| {
                $crate::libs::config::load_env();
                $crate::libs::config::Config::get_var_t::<$ty>($key, $default)
            });
        )*
    };
}

env_lazy! {
    pub MIN_TERMINAL_HEIGHT: u16 = ("MIN_TERMINAL_HEIGHT", 24);
    pub TOAST_TTL_SECS: u64      = ("TOAST_TTL_SECS", 4);
}

/// Fixed-price swap desk selling VST against USDT.
pub const SWAP_DESK: Address = address!("0x861CEF74a2409FAb403762a4c2Ae21E0A616B4f1");
pub const USDT: Address = address!("0x55d398326f99059fF775485246999027B3197955");
pub const VST: Address = address!("0x342484BAc755a8149E0a74503f8576C32a7aBC49");

/// Both tokens use the standard 18-decimal fixed point.
pub const TOKEN_DECIMALS: u32 = 18;
