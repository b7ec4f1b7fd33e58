pub mod assistant;
pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;
