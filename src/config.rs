//! Application-wide constants and compile-time configuration.
//!
//! All pin assignments, timing parameters, key choices and USB identity
//! strings live here so they can be tuned in one place.

use crate::hid::keyboard::{KEY_BACKSLASH, KEY_BRACKET_RIGHT};

// Encoder

/// Encoder sampling period (ms). One report transition per period at most.
pub const POLL_INTERVAL_MS: u32 = 10;

/// Key sent for a clockwise detent.
pub const CW_KEYCODE: u8 = KEY_BACKSLASH;

/// Key sent for a counter-clockwise detent.
pub const CCW_KEYCODE: u8 = KEY_BRACKET_RIGHT;

// Status LED blink cadence

/// Blink half-period while the host has not configured the device.
pub const BLINK_NOT_MOUNTED_MS: u32 = 250;

/// Blink half-period while configured and the bus is running.
pub const BLINK_MOUNTED_MS: u32 = 1000;

/// Blink half-period while the bus is suspended.
pub const BLINK_SUSPENDED_MS: u32 = 2500;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "knob";
pub const USB_PRODUCT: &str = "Rotary Encoder Keyboard";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// Interrupt IN endpoint polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 5;

/// Maximum bus current requested in the configuration descriptor (mA).
pub const USB_MAX_POWER_MA: u16 = 100;

// GPIO pin assignments (nRF52840)
//
// These are logical names; the concrete `embassy_nrf::peripherals::*`
// are picked in `main.rs`.  All encoder inputs use internal pull-ups.
//
//   ENC1        → P0.05   (raw bit 0)
//   ENC2        → P0.02   (raw bit 1)
//   ENC3        → P0.04   (raw bit 2)
//   ENC4        → P0.03   (raw bit 3)
//   Status LED  → P0.06
