//! UI Module - Frontends for the dashboard view
//!
//! - `draw` - Paints a `DashboardView` into a ratatui frame
//! - `terminal` - Full-screen terminal presenter and quit keys
//! - `headless` - Logs region changes instead of drawing

pub mod draw;
pub mod headless;
pub mod terminal;

pub use headless::HeadlessPresenter;
pub use terminal::{quit_requested, TuiPresenter};
