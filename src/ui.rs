//! Ratatui front-end for the badge kiosk: the participant wizard, the result
//! screen with its badge preview, and the passcode-gated admin dashboard.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
