//! Per-device reader session

use std::time::Duration;

use tracing::{debug, info, trace};

use rfpad_core::{constants, inventory, Frame};
use rfpad_transport::{Transport, UsbTransport};
use rfpad_types::{DeviceSelector, Tag};

use crate::error::{Error, Result};

/// One reader session: a transport bound to a device selector
///
/// # Examples
///
/// ```no_run
/// use rfpad::Reader;
///
/// #[tokio::main]
/// async fn main() -> rfpad::Result<()> {
///     let mut reader = Reader::new("0ab1:0002".parse()?);
///
///     reader.open().await?;
///     for tag in reader.inventory().await? {
///         println!("{}", tag);
///     }
///     reader.close().await?;
///
///     Ok(())
/// }
/// ```
pub struct Reader {
    transport: Box<dyn Transport>,
    selector: DeviceSelector,
    timeout: Duration,
}

impl Reader {
    /// Create a reader over the USB bulk transport
    pub fn new(selector: DeviceSelector) -> Self {
        Self::with_transport(selector, Box::new(UsbTransport::new(selector)))
    }

    /// Create a reader over a caller-supplied transport
    pub fn with_transport(selector: DeviceSelector, transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            selector,
            timeout: constants::DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-transfer timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The selector this session binds to
    pub fn selector(&self) -> DeviceSelector {
        self.selector
    }

    /// Check if the device is open
    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    /// Open the device and claim its interface
    pub async fn open(&mut self) -> Result<()> {
        info!("Opening reader {}...", self.transport.descriptor());

        self.transport.open().await?;

        Ok(())
    }

    /// Release the device; safe to call more than once
    pub async fn close(&mut self) -> Result<()> {
        if !self.is_open() {
            return Ok(());
        }

        info!("Closing reader {}...", self.transport.descriptor());

        self.transport.close().await?;

        Ok(())
    }

    /// Run one inventory cycle, returning every tag currently in range
    ///
    /// Records come back in response order and are not de-duplicated
    /// across cycles; feed them through a [`rfpad_core::TagTracker`] for
    /// that.
    ///
    /// # Errors
    ///
    /// Propagates frame codec errors ([`rfpad_core::Error`]), transport
    /// failures, and device-reported scan statuses. A write the device
    /// accepts only partially is a [`rfpad_core::Error::ShortWrite`].
    pub async fn inventory(&mut self) -> Result<Vec<Tag>> {
        self.ensure_open()?;

        let request = inventory::request().encode()?;

        trace!("Request: {:02X?}", request.as_ref());

        let written = self.transport.send(&request, self.timeout).await?;
        if written != request.len() {
            return Err(rfpad_core::Error::ShortWrite {
                expected: request.len(),
                written,
            }
            .into());
        }

        let raw = self
            .transport
            .receive(constants::MAX_RESPONSE_SIZE, self.timeout)
            .await?;

        let response = Frame::decode(&raw)?;
        let tags = inventory::parse_tags(response.payload())?;

        debug!(
            device = %self.transport.descriptor(),
            tags = tags.len(),
            "Inventory cycle complete"
        );

        Ok(tags)
    }

    fn ensure_open(&self) -> Result<()> {
        if !self.is_open() {
            return Err(Error::NotOpen);
        }
        Ok(())
    }
}
