//! # Hosted Fields
//!
//! Card data is typed into a frame served from the processor's origin. The
//! merchant page only ever learns non-sensitive field state (`isEmpty`,
//! `length`) through `INPUT_EVENT`s.
//!
//! Inside the frame, the raw values live in a `FormState` exposed as the
//! global `hostedFieldsFormState`. Same-origin siblings (the UnionPay proxy)
//! can read it directly; anyone else can ask for a redacted snapshot with
//! `OBJECT_LOOKUP`.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sf_01_frame_lifecycle::{
    CreateFrame, FrameBootstrap, FrameContext, FrameHandle, FrameLifecycleApi,
    FrameLifecycleController, FrameLoader,
};
use sf_02_object_locator::answer_lookups;
use shared_bus::{handler, Bus};
use shared_types::events::INPUT_EVENT;
use shared_types::{ChannelId, Configuration, GatewayClient};
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::debug;

use crate::child::{publish_child, spawn_child, ChildReady};
use crate::error::IntegrationError;
use crate::profiles::HOSTED_FIELDS;

/// Global under which the frame exposes its `FormState`.
pub const FORM_STATE_GLOBAL: &str = "hostedFieldsFormState";

/// Global under which the frame keeps its `HostedFieldsFrame`.
pub const FRAME_GLOBAL: &str = "hostedFieldsFrame";

/// Name of the card number field.
pub const NUMBER_FIELD: &str = "number";

/// Non-sensitive state of one field, as carried by `INPUT_EVENT`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState {
    pub field: String,
    pub is_empty: bool,
    pub length: usize,
}

impl FieldState {
    fn of(field: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            is_empty: value.is_empty(),
            length: value.chars().count(),
        }
    }
}

// =============================================================================
// PARENT
// =============================================================================

/// Merchant-side hosted fields component.
pub struct HostedFields {
    controller: Arc<FrameLifecycleController>,
    handle: FrameHandle,
    fields: Arc<RwLock<BTreeMap<String, FieldState>>>,
}

impl HostedFields {
    /// Create the hosted fields frame and start tracking field state.
    pub fn create(
        controller: Arc<FrameLifecycleController>,
        client: Arc<dyn GatewayClient>,
    ) -> Result<Self, IntegrationError> {
        let fields = Arc::new(RwLock::new(BTreeMap::new()));
        let on_input = {
            let fields = fields.clone();
            handler(move |message| {
                match serde_json::from_value::<FieldState>(message.payload().clone()) {
                    Ok(state) => {
                        fields.write().insert(state.field.clone(), state);
                    }
                    Err(e) => debug!(error = %e, "Ignored malformed input event"),
                }
            })
        };

        let handle = controller.create(
            CreateFrame::new(HOSTED_FIELDS, client).listen(INPUT_EVENT, on_input),
        )?;

        Ok(Self {
            controller,
            handle,
            fields,
        })
    }

    pub fn channel(&self) -> &ChannelId {
        self.handle.channel()
    }

    pub fn handle(&self) -> &FrameHandle {
        &self.handle
    }

    pub async fn wait_ready(&self, timeout: Option<Duration>) -> Result<(), IntegrationError> {
        Ok(self.handle.wait_ready(timeout).await?)
    }

    /// Last reported state of `field`.
    pub fn field_state(&self, field: &str) -> Option<FieldState> {
        self.fields.read().get(field).cloned()
    }

    /// Last reported state of every field that reported one.
    pub fn fields(&self) -> Vec<FieldState> {
        self.fields.read().values().cloned().collect()
    }

    pub fn teardown(&self) {
        self.controller.teardown(&self.handle);
    }
}

// =============================================================================
// FRAME
// =============================================================================

/// Raw field values inside the hosted fields frame.
#[derive(Default)]
pub struct FormState {
    values: RwLock<BTreeMap<String, String>>,
    bus: RwLock<Option<Arc<Bus>>>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record what was typed into `field` and report its state to the parent.
    pub fn set_value(&self, field: &str, value: &str) {
        self.values
            .write()
            .insert(field.to_string(), value.to_string());

        let state = FieldState::of(field, value);
        let bus = self.bus.read().clone();
        if let (Some(bus), Ok(payload)) = (bus, serde_json::to_value(&state)) {
            bus.emit(INPUT_EVENT, payload);
        }
    }

    /// The raw value of `field`.
    pub fn value(&self, field: &str) -> Option<String> {
        self.values.read().get(field).cloned()
    }

    /// The first six digits of the card number, once six were typed.
    pub fn bin(&self) -> Option<String> {
        let values = self.values.read();
        let digits: String = values
            .get(NUMBER_FIELD)?
            .chars()
            .filter(char::is_ascii_digit)
            .take(6)
            .collect();
        (digits.len() == 6).then_some(digits)
    }

    /// Redacted view: `{field: {isEmpty, length}}`.
    pub fn snapshot(&self) -> Value {
        let fields: Map<String, Value> = self
            .values
            .read()
            .iter()
            .map(|(field, value)| {
                let state = FieldState::of(field, value);
                let entry = serde_json::json!({
                    "isEmpty": state.is_empty,
                    "length": state.length,
                });
                (field.clone(), entry)
            })
            .collect();
        Value::Object(fields)
    }

    fn bind(&self, bus: Arc<Bus>) {
        *self.bus.write() = Some(bus);
    }
}

/// A configured hosted fields frame.
pub struct HostedFieldsFrame {
    bus: Arc<Bus>,
    configuration: Option<Configuration>,
    form: Arc<FormState>,
}

impl HostedFieldsFrame {
    pub fn form(&self) -> &Arc<FormState> {
        &self.form
    }

    pub fn bus(&self) -> &Arc<Bus> {
        &self.bus
    }

    pub fn configuration(&self) -> Option<Configuration> {
        self.configuration.clone()
    }
}

/// Loader for `hosted-fields-frame.html`.
///
/// Exposes the form state as soon as the frame loads, then runs the
/// handshake and starts answering lookups.
pub fn hosted_fields_loader(
    bootstrap: Arc<FrameBootstrap>,
    on_ready: Option<ChildReady<HostedFieldsFrame>>,
) -> FrameLoader {
    Arc::new(move |context: FrameContext| {
        let form = Arc::new(FormState::new());
        context.globals.expose(FORM_STATE_GLOBAL, form.clone());

        let on_ready = on_ready.clone();
        spawn_child(bootstrap.clone(), context, HOSTED_FIELDS, move |frame| {
            form.bind(frame.bus().clone());

            let weak: Weak<FormState> = Arc::downgrade(&form);
            answer_lookups(frame.bus(), FORM_STATE_GLOBAL, move || {
                weak.upgrade().map_or(Value::Null, |form| form.snapshot())
            });

            let child = Arc::new(HostedFieldsFrame {
                bus: frame.bus().clone(),
                configuration: frame.configuration(),
                form,
            });
            publish_child(frame, FRAME_GLOBAL, child, on_ready.as_ref());
        });
    })
}
