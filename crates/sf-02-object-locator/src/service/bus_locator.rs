//! Bus lookup.
//!
//! Instead of reaching into another frame, ask it: publish `OBJECT_LOOKUP`
//! on the owning frame's channel and wait for a snapshot.
//!
//! ```text
//! request:  {"property": "<name>"}
//! reply:    {"found": true, "value": <snapshot>}
//! ```
//!
//! A frame that does not own the property stays silent. If nobody answers,
//! the lookup finds nothing.

use async_trait::async_trait;
use frame_telemetry::LOCATOR_LOOKUPS;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_bus::{handler, Bus, BusOptions, MessageDispatcher, ReplyError, OPAQUE_ORIGIN};
use shared_types::events::OBJECT_LOOKUP;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::domain::{LocatedObject, LocatorTarget};
use crate::error::LocatorError;
use crate::ports::ObjectLocator;

const STRATEGY: &str = "bus";

#[derive(Debug, Serialize, Deserialize)]
struct LookupRequest {
    property: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct LookupReply {
    found: bool,
    #[serde(default)]
    value: Value,
}

/// Locator that asks the owning frame over its channel.
pub struct BusLocator {
    dispatcher: Arc<dyn MessageDispatcher>,
    origin: String,
    timeout: Option<Duration>,
}

impl BusLocator {
    pub fn new(dispatcher: Arc<dyn MessageDispatcher>) -> Self {
        Self {
            dispatcher,
            origin: OPAQUE_ORIGIN.to_string(),
            timeout: None,
        }
    }

    /// Origin stamped on lookup requests.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Give up after `timeout` instead of waiting for every listener.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn lookup(&self, target: &LocatorTarget) -> Result<Option<LocatedObject>, LocatorError> {
        let channel = target
            .channel()
            .ok_or_else(|| LocatorError::NoChannel(target.url().to_string()))?;
        let bus = Bus::new(
            self.dispatcher.clone(),
            BusOptions::new(channel.as_str()).with_origin(self.origin.clone()),
        )?;

        let request = serde_json::to_value(LookupRequest {
            property: target.property().to_string(),
        })
        .map_err(|e| LocatorError::MalformedReply(e.to_string()))?;

        let reply = match bus.request(OBJECT_LOOKUP, request).wait(self.timeout).await {
            Ok(reply) => reply,
            Err(ReplyError::Unanswered) => return Ok(None),
            Err(ReplyError::TimedOut { after }) => return Err(LocatorError::TimedOut { after }),
            Err(ReplyError::Closed) => return Err(LocatorError::Closed),
        };

        let reply: LookupReply = serde_json::from_value(reply)
            .map_err(|e| LocatorError::MalformedReply(e.to_string()))?;
        Ok(reply.found.then_some(LocatedObject::Snapshot(reply.value)))
    }
}

#[async_trait]
impl ObjectLocator for BusLocator {
    async fn locate(&self, target: &LocatorTarget) -> Result<Option<LocatedObject>, LocatorError> {
        let result = self.lookup(target).await;
        let outcome = match &result {
            Ok(Some(_)) => "found",
            Ok(None) => "not_found",
            Err(_) => "failed",
        };
        LOCATOR_LOOKUPS.with_label_values(&[STRATEGY, outcome]).inc();
        debug!(url = target.url(), property = target.property(), outcome, "Bus lookup finished");
        result
    }

    fn strategy(&self) -> &'static str {
        STRATEGY
    }
}

/// Answer `OBJECT_LOOKUP` requests for `property` on `bus` with a fresh
/// `snapshot()` each time.
pub fn answer_lookups<F>(bus: &Bus, property: &str, snapshot: F)
where
    F: Fn() -> Value + Send + Sync + 'static,
{
    let property = property.to_string();
    bus.on(
        OBJECT_LOOKUP,
        handler(move |message| {
            let wanted = serde_json::from_value::<LookupRequest>(message.payload().clone())
                .is_ok_and(|request| request.property == property);
            if !wanted {
                return;
            }
            let reply = LookupReply {
                found: true,
                value: snapshot(),
            };
            if let Ok(reply) = serde_json::to_value(reply) {
                message.reply(reply);
            }
        }),
    );
}
