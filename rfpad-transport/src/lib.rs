//! Transport layer for proximity-pad readers
//!
//! Provides USB bulk communication with reader devices.

pub mod error;
pub mod usb;

pub use error::{Error, Result};
pub use usb::UsbTransport;

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;

/// Transport trait for different communication methods
///
/// Every transfer is bounded by an explicit timeout so a non-responding
/// device cannot stall its caller forever; a timeout surfaces as a
/// transport error, never as a hang.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the device and claim its interface
    async fn open(&mut self) -> Result<()>;

    /// Release the device; safe to call more than once
    async fn close(&mut self) -> Result<()>;

    /// Check if open
    fn is_open(&self) -> bool;

    /// Send raw bytes, returning how many the device accepted
    async fn send(&mut self, data: &[u8], timeout: Duration) -> Result<usize>;

    /// Receive up to `max_len` raw bytes
    async fn receive(&mut self, max_len: usize, timeout: Duration) -> Result<BytesMut>;

    /// Human-readable device identification
    fn descriptor(&self) -> String;
}
