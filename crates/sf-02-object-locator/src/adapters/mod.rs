//! Adapters Layer
//!
//! - `StaticFrames`: a fixed list of sibling frames

pub mod static_frames;

pub use static_frames::{StaticFrame, StaticFrames};
