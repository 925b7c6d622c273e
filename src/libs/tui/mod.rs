pub mod r#box;
pub mod input;
pub mod status;
pub mod tabs;
pub mod theme;
pub mod title;

pub use input::draw_input;
pub use r#box::{draw_box, BoxProps};
pub use status::{draw_status, ToastLevel};
pub use tabs::draw_tab_strip;
pub use theme::Theme;
pub use title::draw_title_bar;
