//! Inbound Ports (Driving Ports)

use async_trait::async_trait;

use crate::domain::{LocatedObject, LocatorTarget};
use crate::error::LocatorError;

/// Finds an object owned by another frame (Driving Port)
///
/// `Ok(None)` means nothing matched; errors are reserved for failures the
/// caller should see.
#[async_trait]
pub trait ObjectLocator: Send + Sync {
    async fn locate(&self, target: &LocatorTarget) -> Result<Option<LocatedObject>, LocatorError>;

    /// Strategy label used in logs and metrics.
    fn strategy(&self) -> &'static str;
}
