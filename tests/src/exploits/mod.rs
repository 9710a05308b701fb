//! # Exploit Simulations
//!
//! A hostile sender on the same page trying to talk to, listen to, or read
//! from a payment frame.

pub mod frame_snooping;
pub mod origin_spoofing;
