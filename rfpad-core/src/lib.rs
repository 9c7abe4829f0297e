//! # rfpad-core
//!
//! Core protocol implementation for USB proximity-pad RFID readers.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame structure and encoding/decoding
//! - CRC16 calculation
//! - Inventory command and response parsing
//! - Scan status and protocol error taxonomy
//! - Session tag tracking (de-duplication)

pub mod constants;
pub mod crc;
pub mod error;
pub mod frame;
pub mod inventory;
pub mod tracker;

pub use error::{Error, Result, ScanStatus};
pub use frame::{Frame, Response};
pub use tracker::{SharedTagTracker, TagTracker};

/// Protocol version information
pub const PROTOCOL_VERSION: &str = "1.0";
