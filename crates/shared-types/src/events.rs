//! # Well-Known Events
//!
//! Event names shared between parent components and their frames. Names are
//! plain strings on the wire; the bus prefixes them with the realm and the
//! channel before they reach the dispatcher.

/// Realm prefix of every bus key.
pub const REALM: &str = "braintree";

/// Child asks its parent for configuration. Carries a reply slot.
pub const CONFIGURATION_REQUEST: &str = "CONFIGURATION_REQUEST";

/// Child has stored its configuration and is ready.
pub const FRAME_READY: &str = "FRAME_READY";

/// Readiness event of dispatch-style frames (3-D Secure bank frame).
pub const DISPATCH_FRAME_READY: &str = "DISPATCH_FRAME_READY";

/// Bank frame finished authentication and posts the redirect parameters.
pub const AUTHENTICATION_COMPLETE: &str = "AUTHENTICATION_COMPLETE";

/// An iDEAL issuer was chosen in the issuer-selection frame.
pub const BANK_SELECTED: &str = "BANK_SELECTED";

/// Non-sensitive field state changed inside the hosted fields frame.
pub const INPUT_EVENT: &str = "INPUT_EVENT";

/// Ask a frame for a snapshot of one of its exposed objects. Carries a reply slot.
pub const OBJECT_LOOKUP: &str = "OBJECT_LOOKUP";

/// Ask the UnionPay proxy for card capabilities. Carries a reply slot.
pub const UNION_PAY_FETCH_CAPABILITIES: &str = "UNION_PAY_FETCH_CAPABILITIES";
