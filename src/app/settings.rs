use crate::app::provisioning::{
    ensure_provisioned, CartTransformProvisioner, Provisioned, Provisioner,
};
use crate::core::jurisdiction::JurisdictionCode;
use crate::domain::model::{normalize_gid, MetafieldWrite};
use crate::domain::ports::{AdminApi, AdminConfigProvider};
use crate::utils::error::{EcoFeeError, Result};
use serde::Serialize;

const METAFIELD_TYPE: &str = "single_line_text_field";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformStatus {
    pub function_id: Option<String>,
    pub transform_id: Option<String>,
    pub active: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsSnapshot {
    pub current_jurisdiction: Option<JurisdictionCode>,
    pub transform: TransformStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub country_code: Option<String>,
    pub province_code: Option<String>,
    /// Known code inferred from a Canadian store address.
    pub inferred: Option<JurisdictionCode>,
}

/// Reads and writes the shop-level jurisdiction setting and activates the
/// cart transform. The fee engine only ever reads what this service writes.
pub struct SettingsService<A: AdminApi, C: AdminConfigProvider> {
    api: A,
    config: C,
}

impl<A: AdminApi, C: AdminConfigProvider> SettingsService<A, C> {
    pub fn new(api: A, config: C) -> Self {
        Self { api, config }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Persisted jurisdiction, if it is one of the enabled codes.
    pub async fn current_jurisdiction(&self) -> Result<Option<JurisdictionCode>> {
        let raw = self
            .api
            .shop_metafield_value(self.config.metafield_namespace(), self.config.metafield_key())
            .await?;

        Ok(raw
            .as_deref()
            .and_then(|value| value.parse::<JurisdictionCode>().ok())
            .filter(JurisdictionCode::is_enabled))
    }

    pub async fn transform_status(&self) -> Result<TransformStatus> {
        let Some(function_id) = self.find_function_id().await? else {
            return Ok(TransformStatus {
                function_id: None,
                transform_id: None,
                active: false,
                message: format!(
                    "Cart transform function not found. Ensure the function is deployed and titled '{}'.",
                    self.config.function_title()
                ),
            });
        };

        let transform_id = self
            .provisioner()
            .find_existing(function_id.as_str())
            .await?;

        let active = transform_id.is_some();
        Ok(TransformStatus {
            function_id: Some(function_id),
            transform_id,
            active,
            message: if active {
                "Cart Transform is active on this store.".to_string()
            } else {
                "Cart Transform is not active yet. Activate it to start charging eco fees."
                    .to_string()
            },
        })
    }

    pub async fn snapshot(&self) -> Result<SettingsSnapshot> {
        Ok(SettingsSnapshot {
            current_jurisdiction: self.current_jurisdiction().await?,
            transform: self.transform_status().await?,
        })
    }

    /// Validates and persists the jurisdiction. Only enabled codes are accepted.
    pub async fn save_jurisdiction(&self, raw: &str) -> Result<JurisdictionCode> {
        let trimmed = raw.trim();
        let code = trimmed
            .parse::<JurisdictionCode>()
            .ok()
            .filter(JurisdictionCode::is_enabled)
            .ok_or_else(|| EcoFeeError::InvalidJurisdiction {
                value: trimmed.to_string(),
            })?;

        let owner_id = self.api.shop_id().await?.ok_or(EcoFeeError::MissingShopId)?;

        self.api
            .set_metafield(MetafieldWrite {
                owner_id,
                namespace: self.config.metafield_namespace().to_string(),
                key: self.config.metafield_key().to_string(),
                r#type: METAFIELD_TYPE.to_string(),
                value: code.as_str().to_string(),
            })
            .await?;

        tracing::info!("✅ Jurisdiction saved: {}", code);
        Ok(code)
    }

    /// Idempotent: returns the existing transform when one is already bound
    /// to the function.
    pub async fn activate(&self) -> Result<Provisioned> {
        let function_id =
            self.find_function_id()
                .await?
                .ok_or_else(|| EcoFeeError::FunctionNotFound {
                    title: self.config.function_title().to_string(),
                })?;

        ensure_provisioned(&self.provisioner(), function_id.as_str()).await
    }

    pub async fn bootstrap(&self) -> Result<BootstrapReport> {
        let address = self.api.primary_location_address().await?.unwrap_or_default();

        let inferred = match (&address.country_code, &address.province_code) {
            (Some(country), Some(province)) if country.eq_ignore_ascii_case("CA") => {
                JurisdictionCode::resolve_str(province)
            }
            _ => None,
        };

        Ok(BootstrapReport {
            country_code: address.country_code,
            province_code: address.province_code,
            inferred,
        })
    }

    fn provisioner(&self) -> CartTransformProvisioner<'_, A> {
        CartTransformProvisioner::new(&self.api, self.config.block_on_failure())
    }

    async fn find_function_id(&self) -> Result<Option<String>> {
        let expected_title = self.config.function_title().to_lowercase();
        let expected_api_type = self.config.function_api_type().to_lowercase();

        let functions = self.api.list_functions().await?;
        Ok(functions
            .into_iter()
            .find(|f| {
                f.api_type.as_deref().unwrap_or_default().to_lowercase() == expected_api_type
                    && f.title.as_deref().unwrap_or_default().to_lowercase() == expected_title
            })
            .and_then(|f| normalize_gid(&f.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::{FunctionSection, MetafieldSection};
    use crate::domain::model::{CartTransformNode, FunctionNode, LocationAddress};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct TestConfig {
        function: FunctionSection,
        metafield: MetafieldSection,
    }

    impl AdminConfigProvider for TestConfig {
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
            false
        }
    }

    #[derive(Default)]
    struct MockAdmin {
        metafield: Mutex<Option<String>>,
        shop_id: Option<String>,
        functions: Vec<FunctionNode>,
        transforms: Mutex<Vec<CartTransformNode>>,
        location: Option<LocationAddress>,
        writes: Mutex<Vec<MetafieldWrite>>,
        creates: Mutex<Vec<(String, bool)>>,
    }

    #[async_trait]
    impl AdminApi for MockAdmin {
        async fn shop_metafield_value(&self, _ns: &str, _key: &str) -> Result<Option<String>> {
            Ok(self.metafield.lock().unwrap().clone())
        }

        async fn shop_id(&self) -> Result<Option<String>> {
            Ok(self.shop_id.clone())
        }

        async fn set_metafield(&self, write: MetafieldWrite) -> Result<()> {
            *self.metafield.lock().unwrap() = Some(write.value.clone());
            self.writes.lock().unwrap().push(write);
            Ok(())
        }

        async fn list_functions(&self) -> Result<Vec<FunctionNode>> {
            Ok(self.functions.clone())
        }

        async fn list_cart_transforms(&self) -> Result<Vec<CartTransformNode>> {
            Ok(self.transforms.lock().unwrap().clone())
        }

        async fn create_cart_transform(
            &self,
            function_id: &str,
            block_on_failure: bool,
        ) -> Result<Option<String>> {
            self.creates
                .lock()
                .unwrap()
                .push((function_id.to_string(), block_on_failure));
            let id = format!("gid://shopify/CartTransform/{}", 900 + self.creates.lock().unwrap().len());
            self.transforms.lock().unwrap().push(CartTransformNode {
                id: id.clone(),
                function_id: Some(function_id.to_string()),
                block_on_failure: Some(block_on_failure),
            });
            Ok(Some(id))
        }

        async fn primary_location_address(&self) -> Result<Option<LocationAddress>> {
            Ok(self.location.clone())
        }
    }

    fn eco_function() -> FunctionNode {
        FunctionNode {
            id: "gid://shopify/ShopifyFunction/77".to_string(),
            title: Some("Eco-Fee-Cart-Transform".to_string()),
            api_type: Some("CART_TRANSFORM".to_string()),
        }
    }

    fn service(admin: MockAdmin) -> SettingsService<MockAdmin, TestConfig> {
        SettingsService::new(admin, TestConfig::default())
    }

    #[tokio::test]
    async fn test_save_rejects_codes_outside_enabled_set() {
        let svc = service(MockAdmin {
            shop_id: Some("gid://shopify/Shop/1".to_string()),
            ..Default::default()
        });

        for raw in ["ON", "ZZ", "", "ab"] {
            let err = svc.save_jurisdiction(raw).await.unwrap_err();
            assert!(matches!(err, EcoFeeError::InvalidJurisdiction { .. }), "{raw}");
        }
        assert!(svc.api().writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_writes_single_line_metafield() {
        let svc = service(MockAdmin {
            shop_id: Some("gid://shopify/Shop/1".to_string()),
            ..Default::default()
        });

        let code = svc.save_jurisdiction(" BC ").await.unwrap();
        assert_eq!(code, JurisdictionCode::BC);

        let writes = svc.api().writes.lock().unwrap();
        assert_eq!(
            writes[0],
            MetafieldWrite {
                owner_id: "gid://shopify/Shop/1".to_string(),
                namespace: "synorai_ecocharge".to_string(),
                key: "jurisdiction".to_string(),
                r#type: "single_line_text_field".to_string(),
                value: "BC".to_string(),
            }
        );
        drop(writes);

        assert_eq!(
            svc.current_jurisdiction().await.unwrap(),
            Some(JurisdictionCode::BC)
        );
    }

    #[tokio::test]
    async fn test_save_without_shop_id_fails() {
        let svc = service(MockAdmin::default());
        let err = svc.save_jurisdiction("AB").await.unwrap_err();
        assert!(matches!(err, EcoFeeError::MissingShopId));
    }

    #[tokio::test]
    async fn test_current_jurisdiction_ignores_disabled_or_garbage_values() {
        let svc = service(MockAdmin {
            metafield: Mutex::new(Some("ON".to_string())),
            ..Default::default()
        });
        assert_eq!(svc.current_jurisdiction().await.unwrap(), None);

        *svc.api().metafield.lock().unwrap() = Some("hello".to_string());
        assert_eq!(svc.current_jurisdiction().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_activate_is_idempotent() {
        let svc = service(MockAdmin {
            functions: vec![eco_function()],
            ..Default::default()
        });

        let first = svc.activate().await.unwrap();
        assert!(first.was_created());
        assert_eq!(first.id(), "901");

        let second = svc.activate().await.unwrap();
        assert_eq!(second, Provisioned::Existing("901".to_string()));

        let creates = svc.api().creates.lock().unwrap();
        assert_eq!(creates.as_slice(), &[("77".to_string(), false)]);
    }

    #[tokio::test]
    async fn test_activate_without_function_fails() {
        let svc = service(MockAdmin::default());
        let err = svc.activate().await.unwrap_err();
        assert!(matches!(err, EcoFeeError::FunctionNotFound { .. }));
        assert!(svc.api().creates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_matches_transform_by_normalized_function_id() {
        let svc = service(MockAdmin {
            functions: vec![
                FunctionNode {
                    id: "gid://shopify/ShopifyFunction/5".to_string(),
                    title: Some("eco-fee-cart-transform".to_string()),
                    api_type: Some("discount".to_string()),
                },
                eco_function(),
            ],
            transforms: Mutex::new(vec![CartTransformNode {
                id: "gid://shopify/CartTransform/3".to_string(),
                function_id: Some("77".to_string()),
                block_on_failure: Some(false),
            }]),
            ..Default::default()
        });

        let status = svc.transform_status().await.unwrap();
        assert_eq!(status.function_id.as_deref(), Some("77"));
        assert_eq!(status.transform_id.as_deref(), Some("3"));
        assert!(status.active);
    }

    #[tokio::test]
    async fn test_status_without_function_explains_itself() {
        let svc = service(MockAdmin::default());
        let snapshot = svc.snapshot().await.unwrap();
        assert_eq!(snapshot.current_jurisdiction, None);
        assert!(!snapshot.transform.active);
        assert!(snapshot.transform.message.contains("eco-fee-cart-transform"));
    }

    #[tokio::test]
    async fn test_bootstrap_infers_canadian_province() {
        let svc = service(MockAdmin {
            location: Some(LocationAddress {
                country_code: Some("CA".to_string()),
                province_code: Some("sk".to_string()),
            }),
            ..Default::default()
        });
        let report = svc.bootstrap().await.unwrap();
        assert_eq!(report.inferred, Some(JurisdictionCode::SK));

        let svc = service(MockAdmin {
            location: Some(LocationAddress {
                country_code: Some("US".to_string()),
                province_code: Some("AB".to_string()),
            }),
            ..Default::default()
        });
        assert_eq!(svc.bootstrap().await.unwrap().inferred, None);

        let svc = service(MockAdmin::default());
        let report = svc.bootstrap().await.unwrap();
        assert_eq!(report.country_code, None);
        assert_eq!(report.inferred, None);
    }
}
