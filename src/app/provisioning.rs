//! Query-before-create provisioning.
//!
//! Every platform resource this app provisions is looked up by a stable key
//! first and created only when nothing matches, so repeating an activation
//! never produces duplicates.

use crate::domain::model::normalize_gid;
use crate::domain::ports::AdminApi;
use crate::utils::error::{EcoFeeError, Result};
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provisioned {
    Existing(String),
    Created(String),
}

impl Provisioned {
    pub fn id(&self) -> &str {
        match self {
            Provisioned::Existing(id) | Provisioned::Created(id) => id,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Provisioned::Created(_))
    }
}

#[async_trait]
pub trait Provisioner: Send + Sync {
    type Key: Send + Sync + std::fmt::Display + ?Sized;

    async fn find_existing(&self, key: &Self::Key) -> Result<Option<String>>;
    async fn create(&self, key: &Self::Key) -> Result<String>;
}

pub async fn ensure_provisioned<P: Provisioner>(
    provisioner: &P,
    key: &P::Key,
) -> Result<Provisioned> {
    if let Some(id) = provisioner.find_existing(key).await? {
        tracing::info!("Resource for {} already provisioned: {}", key, id);
        return Ok(Provisioned::Existing(id));
    }

    let id = provisioner.create(key).await?;
    tracing::info!("Provisioned resource for {}: {}", key, id);
    Ok(Provisioned::Created(id))
}

/// Cart transforms keyed by their (normalized) function id.
pub struct CartTransformProvisioner<'a, A: AdminApi> {
    api: &'a A,
    block_on_failure: bool,
}

impl<'a, A: AdminApi> CartTransformProvisioner<'a, A> {
    pub fn new(api: &'a A, block_on_failure: bool) -> Self {
        Self {
            api,
            block_on_failure,
        }
    }
}

#[async_trait]
impl<'a, A: AdminApi> Provisioner for CartTransformProvisioner<'a, A> {
    type Key = str;

    async fn find_existing(&self, function_id: &str) -> Result<Option<String>> {
        let transforms = self.api.list_cart_transforms().await?;
        Ok(transforms
            .into_iter()
            .find(|t| {
                t.function_id
                    .as_deref()
                    .and_then(normalize_gid)
                    .is_some_and(|id| id == function_id)
            })
            .and_then(|t| normalize_gid(&t.id)))
    }

    async fn create(&self, function_id: &str) -> Result<String> {
        let created = self
            .api
            .create_cart_transform(function_id, self.block_on_failure)
            .await?;
        created
            .as_deref()
            .and_then(normalize_gid)
            .ok_or_else(|| EcoFeeError::Provisioning {
                message: "Cart Transform creation returned no id.".to_string(),
            })
    }
}
