use ratatui::prelude::*;

#[derive(Clone, Debug)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub good: Color,
    pub bad: Color,
    pub usdt: Color,
    pub vst: Color,
}

impl Theme {
    pub fn vst_dark() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::LightCyan,
            muted: Color::DarkGray,
            good: Color::Green,
            bad: Color::Red,
            usdt: Color::LightGreen,
            vst: Color::LightMagenta,
        }
    }
}
