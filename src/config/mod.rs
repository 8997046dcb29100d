#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
#[cfg(feature = "lambda")]
pub use lambda::LambdaConfig;
pub use toml_config::AdminToml;
