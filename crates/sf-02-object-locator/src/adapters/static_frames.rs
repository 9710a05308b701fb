//! Fixed sibling frames.
//!
//! Describes a set of siblings up front, including ones that deny access.
//! Useful wherever the real frame tree is not available.

use sf_01_frame_lifecycle::LiveObject;
use std::collections::HashMap;

use crate::error::FrameAccessError;
use crate::ports::{SiblingFrame, SiblingFrames};

#[derive(Clone)]
enum Access {
    Open,
    CrossOrigin,
    Detached,
}

/// One described sibling.
#[derive(Clone)]
pub struct StaticFrame {
    label: String,
    location: String,
    location_access: Access,
    property_access: Access,
    properties: HashMap<String, LiveObject>,
}

impl StaticFrame {
    /// A same-origin frame at `location`.
    pub fn new(label: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            location: location.into(),
            location_access: Access::Open,
            property_access: Access::Open,
            properties: HashMap::new(),
        }
    }

    /// A frame of another origin: every read is denied.
    pub fn cross_origin(label: impl Into<String>) -> Self {
        Self {
            location_access: Access::CrossOrigin,
            property_access: Access::CrossOrigin,
            ..Self::new(label, "")
        }
    }

    /// A frame that disappeared: every read fails.
    pub fn detached(label: impl Into<String>) -> Self {
        Self {
            location_access: Access::Detached,
            property_access: Access::Detached,
            ..Self::new(label, "")
        }
    }

    /// Expose `value` as global `name`.
    pub fn with_property(mut self, name: impl Into<String>, value: LiveObject) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Location readable, globals denied.
    pub fn with_cross_origin_properties(mut self) -> Self {
        self.property_access = Access::CrossOrigin;
        self
    }

    fn check(&self, access: &Access) -> Result<(), FrameAccessError> {
        match access {
            Access::Open => Ok(()),
            Access::CrossOrigin => Err(FrameAccessError::CrossOriginAccess {
                frame: self.label.clone(),
            }),
            Access::Detached => Err(FrameAccessError::Detached {
                frame: self.label.clone(),
            }),
        }
    }
}

impl SiblingFrame for StaticFrame {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn location(&self) -> Result<String, FrameAccessError> {
        self.check(&self.location_access)?;
        Ok(self.location.clone())
    }

    fn property(&self, name: &str) -> Result<Option<LiveObject>, FrameAccessError> {
        self.check(&self.property_access)?;
        Ok(self.properties.get(name).cloned())
    }
}

/// A fixed list of siblings, in document order.
#[derive(Clone, Default)]
pub struct StaticFrames {
    frames: Vec<StaticFrame>,
}

impl StaticFrames {
    pub fn new(frames: Vec<StaticFrame>) -> Self {
        Self { frames }
    }

    pub fn push(&mut self, frame: StaticFrame) {
        self.frames.push(frame);
    }
}

impl SiblingFrames for StaticFrames {
    fn siblings(&self) -> Vec<Box<dyn SiblingFrame>> {
        self.frames
            .iter()
            .cloned()
            .map(|frame| Box::new(frame) as Box<dyn SiblingFrame>)
            .collect()
    }
}
