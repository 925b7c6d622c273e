pub mod cc {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
    pub const DARK_GRAY: &str = "\x1b[38;5;238m";
    pub const LIGHT_GRAY: &str = "\x1b[38;5;245m";
    pub const LIGHT_GREEN: &str = "\x1b[92m";
    pub const LIGHT_RED: &str = "\x1b[91m";
    pub const LIGHT_CYAN: &str = "\x1b[96m";
}

#[macro_export]
macro_rules! log {
    // -----------------------------------------------------------------
    // 1) colored, no extra args
    //    log!(cc::RED, "hello");
    // -----------------------------------------------------------------
    ($color:expr, $fmt:literal $(,)?) => {{
        let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
        let mut _stderr = ::std::io::stderr().lock();
        let _ = ::std::io::Write::write_fmt(
            &mut _stderr,
            format_args!(
                concat!("{}{} | {}", "{}", $fmt, "{}", "\n"),
                $crate::libs::writing::cc::LIGHT_GRAY,
                time,
                $crate::libs::writing::cc::RESET,
                $color,
                $crate::libs::writing::cc::RESET,
            ),
        );
    }};

    // -----------------------------------------------------------------
    // 2) colored, with args
    //    log!(cc::GREEN, "buy: {} USDT", amount);
    // -----------------------------------------------------------------
    ($color:expr, $fmt:literal, $($arg:tt)+) => {{
        let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
        let mut _stderr = ::std::io::stderr().lock();
        let _ = ::std::io::Write::write_fmt(
            &mut _stderr,
            format_args!(
                concat!("{}{} | {}", "{}", $fmt, "{}", "\n"),
                $crate::libs::writing::cc::LIGHT_GRAY,
                time,
                $crate::libs::writing::cc::RESET,
                $color,
                $($arg)+,
                $crate::libs::writing::cc::RESET,
            ),
        );
    }};

    // -----------------------------------------------------------------
    // 3) default color, no args
    // -----------------------------------------------------------------
    ($fmt:literal $(,)?) => {{
        $crate::log!($crate::libs::writing::cc::RESET, $fmt);
    }};

    // -----------------------------------------------------------------
    // 4) default color, with args
    // -----------------------------------------------------------------
    ($fmt:literal, $($arg:tt)+) => {{
        $crate::log!($crate::libs::writing::cc::RESET, $fmt, $($arg)+);
    }};
}
