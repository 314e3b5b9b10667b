//! Host-testable core of the knob firmware.
//!
//! Everything here is plain logic over `embedded-hal` traits: encoder
//! decoding, the keystroke state machine, HID report encoding, USB
//! connection status and the status LED cadence.  The embedded binary
//! (`main.rs`, `embedded` feature) wires these to embassy-nrf and
//! embassy-usb.
//!
//! Usage: `cargo test` runs all unit and integration tests on the host.

#![cfg_attr(not(test), no_std)]

pub mod blink;
pub mod config;
pub mod encoder;
pub mod hid;
pub mod schedule;
pub mod status;

pub use encoder::poller::EncoderPoller;
pub use encoder::{EncoderPins, GrayCode};
pub use hid::keyboard::KeyboardReport;
pub use hid::HidReport;
pub use status::{ConnectionState, DeviceStatus, UsbEvents};
