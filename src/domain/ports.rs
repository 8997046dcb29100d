use crate::domain::model::{CartTransformNode, FunctionNode, LocationAddress, MetafieldWrite};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Settings the admin collaborator needs, whatever the source (TOML, env).
pub trait AdminConfigProvider: Send + Sync {
    fn metafield_namespace(&self) -> &str;
    fn metafield_key(&self) -> &str;
    fn function_title(&self) -> &str;
    fn function_api_type(&self) -> &str;
    fn block_on_failure(&self) -> bool;
}

/// The slice of the platform admin API used to persist the jurisdiction and
/// provision the cart transform.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn shop_metafield_value(&self, namespace: &str, key: &str) -> Result<Option<String>>;
    async fn shop_id(&self) -> Result<Option<String>>;
    async fn set_metafield(&self, write: MetafieldWrite) -> Result<()>;
    async fn list_functions(&self) -> Result<Vec<FunctionNode>>;
    async fn list_cart_transforms(&self) -> Result<Vec<CartTransformNode>>;
    /// Returns the new transform's id, `None` when the platform returned none.
    async fn create_cart_transform(
        &self,
        function_id: &str,
        block_on_failure: bool,
    ) -> Result<Option<String>>;
    async fn primary_location_address(&self) -> Result<Option<LocationAddress>>;
}
