//! Encoder-to-keystroke state machine.
//!
//! Every poll tick produces at most one keyboard report.  A detent
//! sends a single-key press; the next ready tick always sends the
//! release and does not sample the encoder, so key events never
//! overlap.  A detent that lands on a release tick is only seen if the
//! contacts still show it on the following tick.

use core::convert::Infallible;

use embedded_hal::digital::InputPin;

use super::{gray, EncoderPins, GrayCode};
use crate::config::{CCW_KEYCODE, CW_KEYCODE};
use crate::hid::keyboard::KeyboardReport;

/// Whether the last report sent still holds a key down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    /// Nothing held; the next tick decodes the encoder.
    Idle,
    /// A press went out; the next tick sends the release.
    KeyDown,
}

/// Everything the poller remembers between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderState {
    pub previous: GrayCode,
    pub key: KeyState,
}

pub struct EncoderPoller {
    state: EncoderState,
}

impl EncoderPoller {
    /// Start from a known wheel position with no key held.
    pub const fn new(initial: GrayCode) -> Self {
        Self {
            state: EncoderState {
                previous: initial,
                key: KeyState::Idle,
            },
        }
    }

    /// Start from the position the encoder is resting in right now.
    pub fn from_pins<P>(pins: &mut EncoderPins<P>) -> Self
    where
        P: InputPin<Error = Infallible>,
    {
        Self::new(pins.read())
    }

    pub fn state(&self) -> EncoderState {
        self.state
    }

    /// Run one poll tick.
    ///
    /// `hid_ready` is the host-side "can send a report" predicate; when it
    /// is false nothing is sampled and nothing changes.  Returns the
    /// report to send, if any.
    pub fn tick<P>(&mut self, hid_ready: bool, pins: &mut EncoderPins<P>) -> Option<KeyboardReport>
    where
        P: InputPin<Error = Infallible>,
    {
        if !hid_ready {
            return None;
        }

        if self.state.key == KeyState::KeyDown {
            self.state.key = KeyState::Idle;
            return Some(KeyboardReport::release());
        }

        let current = pins.read();
        let report = self.decode(current);
        self.state.previous = current;
        report
    }

    /// True if the encoder has moved away from the last decoded position.
    ///
    /// Samples the pins without touching the poller state.
    pub fn motion_pending<P>(&self, pins: &mut EncoderPins<P>) -> bool
    where
        P: InputPin<Error = Infallible>,
    {
        pins.read() != self.state.previous
    }

    fn decode(&mut self, current: GrayCode) -> Option<KeyboardReport> {
        let delta = gray::diff(self.state.previous, current);

        let keycode = if delta > 0 {
            CW_KEYCODE
        } else if delta < 0 {
            CCW_KEYCODE
        } else {
            return None;
        };

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Encoder: {} -> {} (delta {}), key {=u8:#x}",
            self.state.previous.value(),
            current.value(),
            delta,
            keycode
        );

        self.state.key = KeyState::KeyDown;
        Some(KeyboardReport::press(keycode))
    }
}
