pub mod api;
pub mod controller;
pub mod error;
pub mod export;
pub mod loader;
pub mod models;
pub mod storm;
pub mod styling;
pub mod ui;
pub mod utils;
pub mod view;
