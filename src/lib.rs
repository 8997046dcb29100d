pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::GraphqlAdminClient;
pub use app::SettingsService;
pub use config::AdminToml;
pub use core::transform::{CartTransformEngine, NO_CHANGES};
pub use domain::model::{CartTransformInput, CartTransformResult};
pub use utils::error::{EcoFeeError, Result};
