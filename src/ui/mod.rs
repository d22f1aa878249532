pub mod frame;
pub mod render;
pub mod screen;

pub use frame::FrameBuffer;
pub use render::{render_centered_text, render_screen};
pub use screen::{ScreenModel, ToastLength};
