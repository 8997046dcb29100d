use crate::core::AdminConfigProvider;
use crate::utils::error::{EcoFeeError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_substituted, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_FUNCTION_TITLE: &str = "eco-fee-cart-transform";
pub const DEFAULT_FUNCTION_API_TYPE: &str = "cart_transform";
pub const DEFAULT_METAFIELD_NAMESPACE: &str = "synorai_ecocharge";
pub const DEFAULT_METAFIELD_KEY: &str = "jurisdiction";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminToml {
    pub admin: AdminSection,
    #[serde(default)]
    pub function: FunctionSection,
    #[serde(default)]
    pub metafield: MetafieldSection,
    #[serde(default)]
    pub transform: TransformSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSection {
    /// Full GraphQL endpoint, e.g. `https://{shop}/admin/api/2025-10/graphql.json`.
    pub endpoint: String,
    pub access_token: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSection {
    pub title: String,
    pub api_type: String,
}

impl Default for FunctionSection {
    fn default() -> Self {
        Self {
            title: DEFAULT_FUNCTION_TITLE.to_string(),
            api_type: DEFAULT_FUNCTION_API_TYPE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetafieldSection {
    pub namespace: String,
    pub key: String,
}

impl Default for MetafieldSection {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_METAFIELD_NAMESPACE.to_string(),
            key: DEFAULT_METAFIELD_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformSection {
    /// A failing transform must never block checkout unless asked for.
    #[serde(default)]
    pub block_on_failure: bool,
}

impl AdminToml {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EcoFeeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EcoFeeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SHOPIFY_ACCESS_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EcoFeeError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn endpoint(&self) -> &str {
        &self.admin.endpoint
    }

    pub fn access_token(&self) -> &str {
        &self.admin.access_token
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.admin.timeout_seconds.unwrap_or(30)
    }
}

impl AdminConfigProvider for AdminToml {
    fn metafield_namespace(&self) -> &str {
        &self.metafield.namespace
    }

    fn metafield_key(&self) -> &str {
        &self.metafield.key
    }

    fn function_title(&self) -> &str {
        &self.function.title
    }

    fn function_api_type(&self) -> &str {
        &self.function.api_type
    }

    fn block_on_failure(&self) -> bool {
        self.transform.block_on_failure
    }
}

impl Validate for AdminToml {
    fn validate(&self) -> Result<()> {
        validate_url("admin.endpoint", &self.admin.endpoint)?;
        validate_non_empty_string("admin.access_token", &self.admin.access_token)?;
        validate_substituted("admin.access_token", &self.admin.access_token)?;
        if let Some(timeout) = self.admin.timeout_seconds {
            validate_range("admin.timeout_seconds", timeout, 1, 120)?;
        }
        validate_non_empty_string("function.title", &self.function.title)?;
        validate_non_empty_string("function.api_type", &self.function.api_type)?;
        validate_non_empty_string("metafield.namespace", &self.metafield.namespace)?;
        validate_non_empty_string("metafield.key", &self.metafield.key)?;
        Ok(())
    }
}
