use crate::config::AdminToml;
use crate::domain::model::{CartTransformNode, FunctionNode, LocationAddress, MetafieldWrite};
use crate::domain::ports::AdminApi;
use crate::utils::error::{EcoFeeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

const GET_JURISDICTION: &str = r#"
query GetJurisdiction($namespace: String!, $key: String!) {
  shop {
    metafield(namespace: $namespace, key: $key) {
      value
    }
  }
}"#;

const GET_SHOP_ID: &str = r#"
query GetShopId {
  shop {
    id
  }
}"#;

const SET_JURISDICTION: &str = r#"
mutation SetJurisdiction($metafields: [MetafieldsSetInput!]!) {
  metafieldsSet(metafields: $metafields) {
    metafields { namespace key value }
    userErrors { field message }
  }
}"#;

const LIST_FUNCTIONS: &str = r#"
query ListFunctions {
  shopifyFunctions(first: 50) {
    nodes { id title apiType }
  }
}"#;

const LIST_CART_TRANSFORMS: &str = r#"
query ListCartTransforms {
  cartTransforms(first: 50) {
    nodes { id functionId blockOnFailure }
  }
}"#;

const CREATE_CART_TRANSFORM: &str = r#"
mutation CreateCartTransform($functionId: String!, $blockOnFailure: Boolean!) {
  cartTransformCreate(functionId: $functionId, blockOnFailure: $blockOnFailure) {
    cartTransform { id functionId blockOnFailure }
    userErrors { field message }
  }
}"#;

const GET_PRIMARY_LOCATION: &str = r#"
query GetPrimaryLocation {
  locations(first: 1) {
    nodes {
      address { countryCode provinceCode }
    }
  }
}"#;

/// Admin GraphQL client authenticated with an offline access token.
#[derive(Debug, Clone)]
pub struct GraphqlAdminClient {
    client: Client,
    endpoint: String,
    access_token: String,
}

impl GraphqlAdminClient {
    pub fn new(
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            access_token: access_token.into(),
        })
    }

    pub fn from_config(config: &AdminToml) -> Result<Self> {
        Self::new(
            config.endpoint(),
            config.access_token(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    /// Runs one GraphQL document and returns its `data` object.
    async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        tracing::debug!("Admin GraphQL request to: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Admin GraphQL response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EcoFeeError::AdminApi {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }

        let mut payload: Value = response.json().await?;

        if let Some(errors) = payload.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                return Err(EcoFeeError::AdminApi {
                    status: status.as_u16(),
                    message: collect_messages(errors),
                });
            }
        }

        Ok(payload.get_mut("data").map(Value::take).unwrap_or(Value::Null))
    }
}

fn collect_messages(errors: &[Value]) -> String {
    errors
        .iter()
        .filter_map(|e| e.get("message").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fails with `UserErrors` when the mutation payload reports any.
fn check_user_errors(data: &Value, pointer: &str) -> Result<()> {
    match data.pointer(pointer).and_then(Value::as_array) {
        Some(errors) if !errors.is_empty() => Err(EcoFeeError::UserErrors {
            messages: collect_messages(errors),
        }),
        _ => Ok(()),
    }
}

fn nodes_at<T: DeserializeOwned>(data: &Value, pointer: &str) -> Result<Vec<T>> {
    match data.pointer(pointer) {
        Some(nodes) if !nodes.is_null() => Ok(serde_json::from_value(nodes.clone())?),
        _ => Ok(Vec::new()),
    }
}

fn string_at(data: &Value, pointer: &str) -> Option<String> {
    data.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl AdminApi for GraphqlAdminClient {
    async fn shop_metafield_value(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        let data = self
            .execute(
                GET_JURISDICTION,
                json!({ "namespace": namespace, "key": key }),
            )
            .await?;
        Ok(string_at(&data, "/shop/metafield/value"))
    }

    async fn shop_id(&self) -> Result<Option<String>> {
        let data = self.execute(GET_SHOP_ID, json!({})).await?;
        Ok(string_at(&data, "/shop/id"))
    }

    async fn set_metafield(&self, write: MetafieldWrite) -> Result<()> {
        let data = self
            .execute(SET_JURISDICTION, json!({ "metafields": [write] }))
            .await?;
        check_user_errors(&data, "/metafieldsSet/userErrors")
    }

    async fn list_functions(&self) -> Result<Vec<FunctionNode>> {
        let data = self.execute(LIST_FUNCTIONS, json!({})).await?;
        nodes_at(&data, "/shopifyFunctions/nodes")
    }

    async fn list_cart_transforms(&self) -> Result<Vec<CartTransformNode>> {
        let data = self.execute(LIST_CART_TRANSFORMS, json!({})).await?;
        nodes_at(&data, "/cartTransforms/nodes")
    }

    async fn create_cart_transform(
        &self,
        function_id: &str,
        block_on_failure: bool,
    ) -> Result<Option<String>> {
        let data = self
            .execute(
                CREATE_CART_TRANSFORM,
                json!({ "functionId": function_id, "blockOnFailure": block_on_failure }),
            )
            .await?;
        check_user_errors(&data, "/cartTransformCreate/userErrors")?;
        Ok(string_at(&data, "/cartTransformCreate/cartTransform/id"))
    }

    async fn primary_location_address(&self) -> Result<Option<LocationAddress>> {
        let data = self.execute(GET_PRIMARY_LOCATION, json!({})).await?;
        match data.pointer("/locations/nodes/0/address") {
            Some(address) if !address.is_null() => {
                Ok(Some(serde_json::from_value(address.clone())?))
            }
            _ => Ok(None),
        }
    }
}
