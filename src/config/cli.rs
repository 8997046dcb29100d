use crate::utils::error::{EcoFeeError, Result};
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "ecocharge")]
#[command(about = "Apply eco fees to a cart transform input")]
pub struct CliConfig {
    /// Cart transform input JSON; reads stdin when omitted
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Where to write the result JSON; writes stdout when omitted
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Pretty-print the result JSON")]
    pub pretty: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(input) = &self.input {
            if !input.is_file() {
                return Err(EcoFeeError::InvalidConfigValueError {
                    field: "input".to_string(),
                    value: input.display().to_string(),
                    reason: "Input file does not exist".to_string(),
                });
            }
        }
        if let (Some(input), Some(output)) = (&self.input, &self.output) {
            if input == output {
                return Err(EcoFeeError::InvalidConfigValueError {
                    field: "output".to_string(),
                    value: output.display().to_string(),
                    reason: "Output would overwrite the input file".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_flags() {
        let config =
            CliConfig::parse_from(["ecocharge", "--input", "cart.json", "--pretty", "--verbose"]);
        assert_eq!(config.input, Some(PathBuf::from("cart.json")));
        assert!(config.output.is_none());
        assert!(config.pretty);
        assert!(config.verbose);
    }

    #[test]
    fn test_missing_input_file_is_rejected() {
        let config = CliConfig::parse_from(["ecocharge", "--input", "/nonexistent/cart.json"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stdin_and_existing_file_are_accepted() {
        assert!(CliConfig::parse_from(["ecocharge"]).validate().is_ok());

        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let config = CliConfig::parse_from(["ecocharge", "-i", path.as_str()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_cannot_overwrite_input() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let config = CliConfig::parse_from(["ecocharge", "-i", path.as_str(), "-o", path.as_str()]);
        assert!(config.validate().is_err());
    }
}
