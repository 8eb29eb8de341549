pub mod schema;
pub mod setup;

pub use schema::{Config, DefaultConfig, ProviderConfig};
pub use setup::{run_setup, save_answers, SetupAnswers};
