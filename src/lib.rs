pub mod channels;
pub mod config;
pub mod i18n;
pub mod orchestrator;
pub mod providers;
pub mod session;
