//! Inventory command and response parsing
//!
//! The inventory command enumerates every transponder currently within the
//! reader's detection range. This module is stateless: it builds the fixed
//! request and turns a decoded response payload into tag records, leaving
//! de-duplication to [`crate::tracker`].

use bytes::Bytes;
use tracing::trace;

use rfpad_types::{Tag, TagId};

use crate::{
    constants::CONTROL_INVENTORY,
    error::{Error, Result},
    frame::Frame,
};

/// Fixed inventory request payload: control byte, mode, reserved
pub const REQUEST_PAYLOAD: [u8; 3] = [CONTROL_INVENTORY, 0x01, 0x00];

/// Offset of the first tag record within a response payload
const RECORDS_OFFSET: usize = 3;

/// Build the inventory request frame
pub fn request() -> Frame {
    Frame::new(Bytes::from_static(&REQUEST_PAYLOAD))
}

/// Parse a decoded response payload into tag records
///
/// Payload layout:
///
/// ```text
/// 1:       CONTROL-BYTE (0xB0)
/// 2:       STATUS
/// 3:       TAG COUNT
/// 4..n:    { TAG TYPE (2) | TAG ID (8) } x TAG COUNT
/// ```
///
/// Records are returned in response order; a count of zero is a valid
/// empty inventory, not an error.
///
/// # Errors
///
/// - [`Error::InvalidControlByte`] if the response does not echo 0xB0
/// - [`Error::TruncatedInventory`] if the data region is shorter than the
///   tag count requires
pub fn parse_tags(payload: &[u8]) -> Result<Vec<Tag>> {
    // Control, status, and count must be present even when empty
    if payload.len() < RECORDS_OFFSET {
        return Err(Error::FrameTooShort {
            expected: RECORDS_OFFSET,
            actual: payload.len(),
        });
    }

    let control = payload[0];
    if control != CONTROL_INVENTORY {
        return Err(Error::InvalidControlByte {
            expected: CONTROL_INVENTORY,
            actual: control,
        });
    }

    let count = payload[2];
    let needed = RECORDS_OFFSET + count as usize * Tag::RECORD_SIZE;
    if payload.len() < needed {
        return Err(Error::TruncatedInventory {
            count,
            needed,
            actual: payload.len(),
        });
    }

    let mut tags = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let start = RECORDS_OFFSET + i * Tag::RECORD_SIZE;
        let record = &payload[start..start + Tag::RECORD_SIZE];

        let tag_type = [record[0], record[1]];
        let mut id = [0u8; TagId::SIZE];
        id.copy_from_slice(&record[2..]);

        tags.push(Tag::new(tag_type, id));
    }

    trace!(count = tags.len(), "Parsed inventory response");

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_frame_bytes() {
        let encoded = request().encode().unwrap();
        assert_eq!(
            encoded.as_ref(),
            &[0x02, 0x00, 0x09, 0xFF, 0xB0, 0x01, 0x00, 0x18, 0x43]
        );
    }

    #[test]
    fn test_parse_two_tags_in_response_order() {
        let mut payload = vec![0xB0, 0x00, 0x02];
        payload.extend_from_slice(&[0x00, 0x03]); // T1
        payload.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]); // ID1
        payload.extend_from_slice(&[0x00, 0x04]); // T2
        payload.extend_from_slice(&[0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18]); // ID2

        let tags = parse_tags(&payload).unwrap();

        assert_eq!(
            tags,
            vec![
                Tag::new([0x00, 0x03], [1, 2, 3, 4, 5, 6, 7, 8]),
                Tag::new([0x00, 0x04], [0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18]),
            ]
        );
    }

    #[test]
    fn test_parse_empty_inventory() {
        let tags = parse_tags(&[0xB0, 0x00, 0x00]).unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn test_parse_rejects_wrong_control_byte() {
        let payload = [0xB1, 0x00, 0x00];

        assert!(matches!(
            parse_tags(&payload),
            Err(Error::InvalidControlByte {
                expected: 0xB0,
                actual: 0xB1,
            })
        ));
    }

    #[test]
    fn test_parse_rejects_truncated_records() {
        // Claims two tags but carries only one record
        let mut payload = vec![0xB0, 0x00, 0x02];
        payload.extend_from_slice(&[0x00, 0x03, 1, 2, 3, 4, 5, 6, 7, 8]);

        assert!(matches!(
            parse_tags(&payload),
            Err(Error::TruncatedInventory {
                count: 2,
                needed: 23,
                actual: 13,
            })
        ));
    }

    #[test]
    fn test_parse_rejects_missing_count_byte() {
        assert!(matches!(
            parse_tags(&[0xB0, 0x00]),
            Err(Error::FrameTooShort { .. })
        ));
    }
}
