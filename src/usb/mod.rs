//! USB Device subsystem - presents the encoder as a HID keyboard.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  A single HID interface carries the keyboard (report
//! ID 1) and a declared-but-unused mouse (report ID 2).
//!
//! Bus lifecycle events and HID control requests are forwarded to the
//! library's [`knob::UsbEvents`] implementation.

pub mod hid_device;
