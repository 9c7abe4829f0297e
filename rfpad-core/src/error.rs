//! Error types for rfpad-core

use std::fmt;

use crate::constants::status;

/// Result type alias for protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Device-reported scan status (the status byte of a response frame)
///
/// Any non-zero status the protocol tables do not name decodes to
/// [`ScanStatus::Unspecified`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanStatus {
    /// No transponder within the reader's detection range
    NoTransponder,

    /// CRC16 data error at received data
    CrcError,

    /// Attempt to write on a read-only storing area
    WriteProtected,

    /// Address beyond the transponder's address space
    AddressOutOfRange,

    /// A special command not applicable to the transponder
    NotApplicable,

    /// Protocol too short or too long
    LengthViolation,

    /// Any other non-zero status byte
    Unspecified(u8),
}

impl ScanStatus {
    /// Classify a non-zero status byte
    pub fn from_code(code: u8) -> Self {
        match code {
            status::NO_TRANSPONDER => Self::NoTransponder,
            status::CRC_ERROR => Self::CrcError,
            status::WRITE_PROTECTED => Self::WriteProtected,
            status::ADDRESS_OUT_OF_RANGE => Self::AddressOutOfRange,
            status::NOT_APPLICABLE => Self::NotApplicable,
            status::LENGTH_VIOLATION => Self::LengthViolation,
            other => Self::Unspecified(other),
        }
    }

    /// The raw status byte this classification came from
    pub fn code(self) -> u8 {
        match self {
            Self::NoTransponder => status::NO_TRANSPONDER,
            Self::CrcError => status::CRC_ERROR,
            Self::WriteProtected => status::WRITE_PROTECTED,
            Self::AddressOutOfRange => status::ADDRESS_OUT_OF_RANGE,
            Self::NotApplicable => status::NOT_APPLICABLE,
            Self::LengthViolation => status::LENGTH_VIOLATION,
            Self::Unspecified(code) => code,
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTransponder => {
                write!(f, "no transponder is located within the detection range of the reader")
            }
            Self::CrcError => write!(f, "CRC16 data error at received data"),
            Self::WriteProtected => write!(f, "attempt to write on a read-only storing area"),
            Self::AddressOutOfRange => {
                write!(f, "the address is beyond the max address space of the transponder")
            }
            Self::NotApplicable => {
                write!(f, "a special command is not applicable to the transponder")
            }
            Self::LengthViolation => write!(f, "protocol is too short or too long"),
            Self::Unspecified(code) => write!(f, "unspecified scan error (code 0x{:02X})", code),
        }
    }
}

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Frame is too short to be valid
    #[error("Frame too short: expected at least {expected} bytes, got {actual} bytes")]
    FrameTooShort {
        expected: usize,
        actual: usize,
    },

    /// Frame size exceeds what the length field can express
    #[error("Frame too large: {size} bytes (max: {max} bytes)")]
    FrameTooLarge {
        size: usize,
        max: usize,
    },

    /// Checksum verification failed
    #[error("Checksum mismatch: expected 0x{expected:04X}, received 0x{received:04X}")]
    ChecksumMismatch {
        expected: u16,
        received: u16,
    },

    /// Length field disagrees with the received byte count
    #[error("Length mismatch: frame declares {declared} bytes, received {actual}")]
    LengthMismatch {
        declared: usize,
        actual: usize,
    },

    /// Response carries an unexpected control byte
    #[error("Unexpected control byte: expected 0x{expected:02X}, got 0x{actual:02X}")]
    InvalidControlByte {
        expected: u8,
        actual: u8,
    },

    /// Inventory data region shorter than the tag count requires
    #[error("Inventory data truncated: {count} tags need {needed} bytes, got {actual}")]
    TruncatedInventory {
        count: u8,
        needed: usize,
        actual: usize,
    },

    /// Transport accepted fewer bytes than the encoded frame
    #[error("Short write: {written} of {expected} bytes sent")]
    ShortWrite {
        expected: usize,
        written: usize,
    },

    /// Device reported a scan error in the status byte
    #[error("Scan failed: {0}")]
    Scan(ScanStatus),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a device-reported scan error
    pub fn is_scan(&self) -> bool {
        matches!(self, Self::Scan(_))
    }

    /// The scan status, if this is a device-reported scan error
    pub fn scan_status(&self) -> Option<ScanStatus> {
        match self {
            Self::Scan(status) => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scan_status_round_trip() {
        for code in [0x01, 0x02, 0x03, 0x04, 0x05, 0x81, 0x42, 0xFF] {
            assert_eq!(ScanStatus::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_scan_status_known_codes() {
        assert_eq!(ScanStatus::from_code(0x01), ScanStatus::NoTransponder);
        assert_eq!(ScanStatus::from_code(0x81), ScanStatus::LengthViolation);
    }

    #[test]
    fn test_scan_status_unknown_code_describes() {
        // describe() must never fail, whatever the device sends
        let status = ScanStatus::from_code(0x7E);
        assert_eq!(status, ScanStatus::Unspecified(0x7E));
        assert_eq!(status.to_string(), "unspecified scan error (code 0x7E)");
    }

    #[test]
    fn test_scan_error_accessors() {
        let err = Error::Scan(ScanStatus::NoTransponder);
        assert!(err.is_scan());
        assert_eq!(err.scan_status(), Some(ScanStatus::NoTransponder));

        let err = Error::ShortWrite {
            expected: 9,
            written: 4,
        };
        assert!(!err.is_scan());
        assert_eq!(err.scan_status(), None);
    }
}
