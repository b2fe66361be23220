pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod geo;
pub mod location;
pub mod models;
pub mod notification;
pub mod shell;
pub mod table;
pub mod ui;
pub mod validation;

pub use error::{AppError, Result};
