//! Transport errors

use std::io;

use rfpad_types::DeviceSelector;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Device not open")]
    NotOpen,

    #[error("Device already open")]
    AlreadyOpen,

    #[error("No USB device matches {0}")]
    DeviceNotFound(DeviceSelector),

    #[error("Write timeout")]
    WriteTimeout,

    #[error("Read timeout")]
    ReadTimeout,

    #[error("USB transfer failed: {0}")]
    Transfer(#[from] nusb::transfer::TransferError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
