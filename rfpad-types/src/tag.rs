//! Transponder tag records

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique 8-byte transponder identifier
///
/// Identity is exact byte-for-byte equality over all 8 bytes. Two reads of
/// the same physical tag always carry the same id, even when the reported
/// type framing differs across firmware revisions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagId(pub [u8; 8]);

impl TagId {
    /// Identifier size in bytes
    pub const SIZE: usize = 8;

    /// View the identifier as raw bytes
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl From<[u8; 8]> for TagId {
    fn from(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TagId({})", hex::encode(self.0))
    }
}

/// One transponder discovered by an inventory scan
///
/// Owns its bytes; records outlive the receive buffer they were parsed
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Opaque 2-byte tag-class identifier
    pub tag_type: [u8; 2],

    /// Unique transponder identifier
    pub id: TagId,
}

impl Tag {
    /// Wire size of one inventory record (type + id)
    pub const RECORD_SIZE: usize = 2 + TagId::SIZE;

    pub fn new(tag_type: [u8; 2], id: impl Into<TagId>) -> Self {
        Self {
            tag_type,
            id: id.into(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} type={}", self.id, hex::encode(self.tag_type))
    }
}
