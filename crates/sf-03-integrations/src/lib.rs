//! # SF-03 Integrations
//!
//! The payment-method components built on the frame lifecycle. Each one has
//! a parent side, owned by the merchant page, and a loader that runs inside
//! the frame once it is attached.
//!
//! | Integration | Parent | Frame |
//! |-------------|--------|-------|
//! | Hosted fields | `HostedFields` | `hosted_fields_loader` |
//! | 3-D Secure | `BankFrame` | `three_d_secure_loader` |
//! | iDEAL | `IssuerSelection` | `ideal_loader` |
//! | UnionPay | `UnionPay` | `union_pay_loader` |
//!
//! ## Cross-frame reads
//!
//! ```text
//! merchant page
//!   ├── hosted fields frame   (exposes hostedFieldsFormState)
//!   └── union pay proxy frame ── scans siblings ──► hosted fields frame
//! ```
//!
//! The proxy and the hosted fields frame share an origin, so the proxy may
//! read the live form state. The merchant page may not.

pub mod child;
pub mod error;
pub mod hosted_fields;
pub mod ideal;
pub mod page_frames;
pub mod profiles;
pub mod three_d_secure;
pub mod union_pay;

pub use child::ChildReady;
pub use error::IntegrationError;
pub use hosted_fields::{
    hosted_fields_loader, FieldState, FormState, HostedFields, HostedFieldsFrame,
    FORM_STATE_GLOBAL,
};
pub use ideal::{ideal_loader, IssuerFrameChild, IssuerSelection};
pub use page_frames::{page_siblings, PageSiblings, SiblingsFactory};
pub use three_d_secure::{three_d_secure_loader, AuthenticationParams, BankFrame, BankFrameChild};
pub use union_pay::{union_pay_loader, Capabilities, UnionPay, UnionPayProxy};
