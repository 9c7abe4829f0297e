//! # rfpad
//!
//! Rust implementation of the USB proximity-pad RFID reader protocol.
//!
//! ## Features
//!
//! - Type-safe frame codec with CRC16 validation
//! - Async/await API using Tokio, with every transfer bounded by a timeout
//! - Inventory polling across any number of readers with exactly-once
//!   reporting of newly-seen transponders
//!
//! ## Quick Start
//!
//! ```no_run
//! use rfpad::Reader;
//!
//! #[tokio::main]
//! async fn main() -> rfpad::Result<()> {
//!     // Open the reader
//!     let mut reader = Reader::new("0ab1:0002".parse()?);
//!     reader.open().await?;
//!
//!     // One inventory cycle: every tag currently in range
//!     for tag in reader.inventory().await? {
//!         println!("{}", tag);
//!     }
//!
//!     // Release the device
//!     reader.close().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod poller;
pub mod reader;

#[cfg(test)]
mod test_support;

// Re-exports
pub use error::{Error, Result};
pub use poller::{DedupScope, Poller, TagSink};
pub use reader::Reader;

// Re-export types
pub use rfpad_core::{Frame, Response, ScanStatus, TagTracker};
pub use rfpad_types::{DeviceSelector, Tag, TagId};
