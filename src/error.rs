//! Unified error type for the knob firmware.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

use defmt::Format;
use embassy_usb::driver::EndpointError;
use embassy_usb::RemoteWakeupError;

#[derive(Debug, Clone, Copy, Format)]
pub enum Error {
    /// Writing a report to the HID IN endpoint failed
    /// (endpoint disabled or buffer overflow).
    HidWrite,

    /// The stack refused to signal remote wakeup (not suspended, or the
    /// host has not enabled the feature).
    RemoteWakeup,
}

impl From<EndpointError> for Error {
    fn from(_: EndpointError) -> Self {
        Error::HidWrite
    }
}

impl From<RemoteWakeupError> for Error {
    fn from(_: RemoteWakeupError) -> Self {
        Error::RemoteWakeup
    }
}
