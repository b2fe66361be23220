//! GUI views and application state.

pub mod app;
pub mod components;
pub mod form_view;
pub mod map_view;
pub mod table_view;

pub use app::DirectoryApp;
