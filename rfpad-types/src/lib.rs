//! Type definitions for rfpad

pub mod error;
pub mod selector;
pub mod tag;

pub use error::{Error, Result};
pub use selector::DeviceSelector;
pub use tag::{Tag, TagId};
