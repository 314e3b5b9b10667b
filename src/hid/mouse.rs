//! USB HID mouse report.
//!
//! The mouse collection is declared in the report descriptor so hosts
//! see a keyboard+mouse composite, but the firmware never emits it.
//!
//! Payload layout (4 bytes, sent after the report ID byte):
//! ```text
//! Byte 0: Button bitfield
//!         Bit 0 = Left, Bit 1 = Right, Bit 2 = Middle
//! Byte 1: X displacement (signed, -127..127)
//! Byte 2: Y displacement (signed, -127..127)
//! Byte 3: Scroll wheel  (signed, -127..127)
//! ```

/// Mouse report payload size in bytes.
pub const MOUSE_REPORT_SIZE: usize = 4;

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Button bitfield (bit 0 = left, bit 1 = right, bit 2 = middle).
    pub buttons: u8,
    /// Relative X movement.
    pub x: i8,
    /// Relative Y movement.
    pub y: i8,
    /// Scroll wheel delta.
    pub wheel: i8,
}

impl MouseReport {
    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (4, or 0 if `buf` is too small).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.buttons;
        buf[1] = self.x as u8;
        buf[2] = self.y as u8;
        buf[3] = self.wheel as u8;
        MOUSE_REPORT_SIZE
    }

    pub fn is_idle(&self) -> bool {
        self.buttons == 0 && self.x == 0 && self.y == 0 && self.wheel == 0
    }
}
