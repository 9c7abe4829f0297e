//! USB bulk transport

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use nusb::transfer::RequestBuffer;
use nusb::{Device, Interface};
use tokio::time::timeout;
use tracing::{debug, trace, warn};

use rfpad_types::DeviceSelector;

use crate::{error::*, Transport};

/// Reader interface number
pub const INTERFACE: u8 = 0;

/// Bulk OUT endpoint carrying request frames
pub const ENDPOINT_OUT: u8 = 0x02;

/// Bulk IN endpoint carrying response frames
pub const ENDPOINT_IN: u8 = 0x81;

/// USB bulk transport for proximity-pad readers
pub struct UsbTransport {
    selector: DeviceSelector,
    device: Option<Device>,
    interface: Option<Interface>,
}

impl UsbTransport {
    /// Create a new transport for a device selector
    pub fn new(selector: DeviceSelector) -> Self {
        Self {
            selector,
            device: None,
            interface: None,
        }
    }

    /// The selector this transport binds to
    pub fn selector(&self) -> DeviceSelector {
        self.selector
    }
}

#[async_trait]
impl Transport for UsbTransport {
    async fn open(&mut self) -> Result<()> {
        if self.is_open() {
            return Err(Error::AlreadyOpen);
        }

        debug!("Opening {}...", self.selector);

        let info = nusb::list_devices()?
            .find(|d| {
                d.vendor_id() == self.selector.vendor_id
                    && d.product_id() == self.selector.product_id
            })
            .ok_or(Error::DeviceNotFound(self.selector))?;

        let device = info.open()?;

        // The kernel HID driver may hold the interface
        let interface = device.detach_and_claim_interface(INTERFACE)?;

        debug!("Opened {}", self.selector);

        self.device = Some(device);
        self.interface = Some(interface);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if self.interface.take().is_some() {
            debug!("Releasing {}...", self.selector);
        }
        self.device = None;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.interface.is_some()
    }

    async fn send(&mut self, data: &[u8], deadline: Duration) -> Result<usize> {
        let interface = self.interface.as_ref().ok_or(Error::NotOpen)?;

        trace!(
            "Sending {} bytes: {:02X?}",
            data.len(),
            &data[..data.len().min(16)]
        );

        let completion = timeout(deadline, interface.bulk_out(ENDPOINT_OUT, data.to_vec()))
            .await
            .map_err(|_| Error::WriteTimeout)?;
        completion.status?;

        Ok(completion.data.actual_length())
    }

    async fn receive(&mut self, max_len: usize, deadline: Duration) -> Result<BytesMut> {
        let interface = self.interface.as_ref().ok_or(Error::NotOpen)?;

        let completion = timeout(
            deadline,
            interface.bulk_in(ENDPOINT_IN, RequestBuffer::new(max_len)),
        )
        .await
        .map_err(|_| Error::ReadTimeout)?;

        let data = completion.into_result()?;

        trace!(
            "Received {} bytes: {:02X?}",
            data.len(),
            &data[..data.len().min(16)]
        );

        Ok(BytesMut::from(&data[..]))
    }

    fn descriptor(&self) -> String {
        self.selector.to_string()
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        if self.is_open() {
            warn!("USB transport dropped while still open");
        }
    }
}
