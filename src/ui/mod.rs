//! Terminal front end: a ratatui implementation of the map view

pub mod app;
pub mod components;
pub mod events;
pub mod layout;
pub mod map;
pub mod state;

pub use app::{run_app, DashboardApp};
pub use state::TerminalView;
