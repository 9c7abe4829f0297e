//! Reader frame encoding and decoding

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use crate::{
    constants::{DEFAULT_ADDRESS, MIN_RESPONSE_SIZE, STX},
    crc,
    error::{Error, Result, ScanStatus},
};

/// Request frame
///
/// # Frame Structure
///
/// ```text
/// ┌─────────┬─────────┬─────────┬─────────┬─────────────┬─────────┬─────────┐
/// │   STX   │ len hi  │ len lo  │ address │   payload   │ crc lo  │ crc hi  │
/// │  1 byte │  1 byte │  1 byte │  1 byte │   N bytes   │  1 byte │  1 byte │
/// └─────────┴─────────┴─────────┴─────────┴─────────────┴─────────┴─────────┘
/// ```
///
/// The length field holds the total frame size, header and CRC included,
/// high byte first. The CRC is computed over every byte except the
/// trailing two, which carry it low byte first.
///
/// # Examples
///
/// ```
/// use rfpad_core::Frame;
///
/// let frame = Frame::new(vec![0xB0, 0x01, 0x00]);
/// let encoded = frame.encode().unwrap();
/// assert_eq!(encoded.len(), 9);
/// assert_eq!(encoded[0], 0x02); // STX
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Device address (COM-ADR), 0xFF for broadcast
    pub address: u8,

    /// Frame payload: control byte plus command-specific data
    pub payload: Bytes,
}

impl Frame {
    /// Framing bytes around the payload: STX, length, address, CRC
    pub const OVERHEAD: usize = 6;

    /// Largest total frame size the length field can express
    pub const MAX_SIZE: usize = 0xFFFF;

    /// Maximum payload size
    pub const MAX_PAYLOAD_SIZE: usize = Self::MAX_SIZE - Self::OVERHEAD;

    /// Create a frame addressed to the broadcast/default address
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self::with_address(DEFAULT_ADDRESS, payload)
    }

    /// Create a frame for a specific device address
    pub fn with_address(address: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            address,
            payload: payload.into(),
        }
    }

    /// Total encoded frame size
    pub fn size(&self) -> usize {
        Self::OVERHEAD + self.payload.len()
    }

    /// Encode the frame to wire bytes
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameTooLarge`] if the total size does not fit the
    /// 16-bit length field.
    pub fn encode(&self) -> Result<BytesMut> {
        let total = self.size();
        if total > Self::MAX_SIZE {
            return Err(Error::FrameTooLarge {
                size: total,
                max: Self::MAX_SIZE,
            });
        }

        let mut buf = BytesMut::with_capacity(total);

        buf.put_u8(STX);
        buf.put_u16(total as u16); // big-endian: high byte then low
        buf.put_u8(self.address);
        buf.put_slice(&self.payload);

        // CRC over everything written so far, appended low byte first
        let crc = crc::crc16(&buf);
        buf.put_u8((crc & 0xFF) as u8);
        buf.put_u8((crc >> 8) as u8);

        Ok(buf)
    }

    /// Decode and validate a raw response frame
    ///
    /// Validation order: minimum size, checksum, declared length, then the
    /// device status byte.
    ///
    /// # Errors
    ///
    /// - [`Error::FrameTooShort`] if fewer than 8 bytes were received
    /// - [`Error::ChecksumMismatch`] if the recomputed CRC disagrees with
    ///   the trailing two bytes
    /// - [`Error::LengthMismatch`] if the length field disagrees with the
    ///   received byte count
    /// - [`Error::Scan`] if the status byte is non-zero
    pub fn decode(raw: &[u8]) -> Result<Response> {
        if raw.len() < MIN_RESPONSE_SIZE {
            return Err(Error::FrameTooShort {
                expected: MIN_RESPONSE_SIZE,
                actual: raw.len(),
            });
        }

        let (body, trailer) = raw.split_at(raw.len() - 2);
        let received = u16::from_le_bytes([trailer[0], trailer[1]]);
        let calculated = crc::crc16(body);
        if calculated != received {
            return Err(Error::ChecksumMismatch {
                expected: calculated,
                received,
            });
        }

        let declared = u16::from_be_bytes([raw[1], raw[2]]) as usize;
        if declared != raw.len() {
            return Err(Error::LengthMismatch {
                declared,
                actual: raw.len(),
            });
        }

        let status = raw[5];
        if status != 0 {
            return Err(Error::Scan(ScanStatus::from_code(status)));
        }

        Ok(Response {
            address: raw[3],
            payload: Bytes::copy_from_slice(&raw[4..raw.len() - 2]),
        })
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("address", &format!("0x{:02X}", self.address))
            .field("payload", &hex::encode(&self.payload))
            .finish()
    }
}

/// Validated response payload
///
/// Holds the payload region of a decoded frame: the control byte, the
/// (zero) status byte, and the command data. Owns its bytes, so it may
/// outlive the receive buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Response {
    /// Responding device address
    pub address: u8,

    payload: Bytes,
}

impl Response {
    /// Full payload: control byte through command data
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Control byte echoed by the device
    pub fn control(&self) -> u8 {
        self.payload[0]
    }

    /// Device status byte (always zero for a successfully decoded frame)
    pub fn status(&self) -> u8 {
        self.payload[1]
    }

    /// Command data following the status byte
    pub fn data(&self) -> &[u8] {
        &self.payload[2..]
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("address", &format!("0x{:02X}", self.address))
            .field("control", &format!("0x{:02X}", self.control()))
            .field("data_len", &self.data().len())
            .finish()
    }
}
