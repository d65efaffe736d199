use async_trait::async_trait;
use serde_json::Value;
use crate::domain::entities::EntityState;
use crate::application::errors::HostError;

/// HomeHost trait - the smart-home controller's state table and service bus
#[async_trait]
pub trait HomeHost: Send + Sync {
    /// Live snapshot of every entity, in host order
    async fn states(&self) -> Result<Vec<EntityState>, HostError>;

    /// Current state of one entity
    async fn state(&self, entity_id: &str) -> Result<Option<EntityState>, HostError>;

    /// Invoke a service and wait until the host has accepted it
    async fn call_service(&self, domain: &str, service: &str, data: Value) -> Result<(), HostError>;
}
