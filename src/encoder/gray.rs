//! Signed step between two wheel positions.

use super::GrayCode;

/// Signed rotation from `prev` to `curr`: positive is clockwise.
///
/// The difference is wrapped into `-7..=7` around the 16-step wheel.
/// A jump of exactly half a turn (±8) has no defined direction and
/// reads as 0, the same as no movement.
pub fn diff(prev: GrayCode, curr: GrayCode) -> i8 {
    let raw = curr.value() as i8 - prev.value() as i8;

    if raw == 0 || raw == 8 || raw == -8 {
        return 0;
    }

    if raw > 8 {
        return raw - 16;
    }

    if raw < -8 {
        return raw + 16;
    }

    raw
}
