// Application layer: collaborators around the fee engine.

pub mod compliance;
pub mod provisioning;
pub mod settings;

pub use settings::SettingsService;
