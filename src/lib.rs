pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod scanner;
pub mod seed;
pub mod ui;
pub mod workflow;

pub use error::{AppError, Result};
