//! Frame profiles of the supported integrations.

use sf_01_frame_lifecycle::{FrameProfile, NameSuffix};
use shared_types::events::{DISPATCH_FRAME_READY, FRAME_READY};

/// The sensitive-data frame behind hosted card fields.
pub const HOSTED_FIELDS: FrameProfile = FrameProfile {
    integration: "hosted-fields",
    name_prefix: Some("braintree-hosted-field"),
    document: "hosted-fields-frame.html",
    ready_event: FRAME_READY,
    name_suffix: NameSuffix::None,
};

/// The 3-D Secure bank redirect landing frame.
pub const THREE_D_SECURE: FrameProfile = FrameProfile {
    integration: "three-d-secure",
    name_prefix: None,
    document: "three-d-secure-bank-frame.html",
    ready_event: DISPATCH_FRAME_READY,
    name_suffix: NameSuffix::None,
};

/// The iDEAL issuer selection frame.
pub const IDEAL: FrameProfile = FrameProfile {
    integration: "ideal",
    name_prefix: Some("braintree-ideal"),
    document: "ideal-issuer-frame.html",
    ready_event: FRAME_READY,
    name_suffix: NameSuffix::None,
};

/// The UnionPay proxy frame.
pub const UNION_PAY: FrameProfile = FrameProfile {
    integration: "union-pay",
    name_prefix: Some("braintree-union-pay"),
    document: "union-pay-proxy-frame.html",
    ready_event: FRAME_READY,
    name_suffix: NameSuffix::SdkVersion,
};

/// Every profile, for hosts that register all loaders at once.
pub const ALL: [FrameProfile; 4] = [HOSTED_FIELDS, THREE_D_SECURE, IDEAL, UNION_PAY];
