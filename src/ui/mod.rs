//! GUI panels and application state.

pub mod app;
pub mod components;
pub mod records_panel;
pub mod scanner_panel;
pub mod students_panel;
pub mod sync_panel;

pub use app::App;
