rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod bank;
pub mod config;
pub mod engine;
pub mod event;
pub mod logging;
pub mod session;
pub mod speech;
pub mod store;
pub mod ui;
