//! Protocol constants

use std::time::Duration;

/// Start-of-frame marker
pub const STX: u8 = 0x02;

/// Broadcast/default device address (COM-ADR)
pub const DEFAULT_ADDRESS: u8 = 0xFF;

/// Control byte selecting the inventory command
pub const CONTROL_INVENTORY: u8 = 0xB0;

/// Smallest decodable response frame: header, control byte, status, CRC
pub const MIN_RESPONSE_SIZE: usize = 8;

/// Receive buffer bound for the largest possible reply (64KB)
pub const MAX_RESPONSE_SIZE: usize = 0xFFFF;

/// Default bulk transfer timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Default delay between successive polls of one session
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Device-reported scan status codes (byte 5 of a response frame)
pub mod status {
    /// Scan succeeded, inventory data follows
    pub const OK: u8 = 0x00;

    /// No transponder within the reader's detection range
    pub const NO_TRANSPONDER: u8 = 0x01;

    /// CRC16 error in the data the reader received
    pub const CRC_ERROR: u8 = 0x02;

    /// Write attempted on a read-only storing area
    pub const WRITE_PROTECTED: u8 = 0x03;

    /// Address beyond the transponder's address space
    pub const ADDRESS_OUT_OF_RANGE: u8 = 0x04;

    /// Command not applicable to the transponder type
    pub const NOT_APPLICABLE: u8 = 0x05;

    /// Protocol too short or too long for the command
    pub const LENGTH_VIOLATION: u8 = 0x81;
}
