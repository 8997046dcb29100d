use crate::utils::error::{EcoFeeError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use std::env;

pub const DEFAULT_SHOP_DOMAIN_SUFFIX: &str = ".myshopify.com";

/// Environment-driven settings for the compliance webhook function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaConfig {
    /// Notifications from shops outside this domain are still acknowledged
    /// but logged as unexpected.
    pub shop_domain_suffix: String,
    pub log_payloads: bool,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_payloads = match lookup("LOG_WEBHOOK_PAYLOADS") {
            None => false,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "" | "0" | "false" | "no" => false,
                _ => {
                    return Err(EcoFeeError::InvalidConfigValueError {
                        field: "LOG_WEBHOOK_PAYLOADS".to_string(),
                        value: raw,
                        reason: "Expected true or false".to_string(),
                    })
                }
            },
        };

        Ok(Self {
            shop_domain_suffix: lookup("SHOP_DOMAIN_SUFFIX")
                .unwrap_or_else(|| DEFAULT_SHOP_DOMAIN_SUFFIX.to_string()),
            log_payloads,
        })
    }

    pub fn is_expected_shop(&self, shop_domain: Option<&str>) -> bool {
        shop_domain.is_some_and(|domain| domain.ends_with(&self.shop_domain_suffix))
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("SHOP_DOMAIN_SUFFIX", &self.shop_domain_suffix)
    }
}
