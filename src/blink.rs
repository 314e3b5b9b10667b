//! Status LED blinking at a cadence chosen by the connection state.

use core::convert::Infallible;

use embedded_hal::digital::{OutputPin, PinState};

use crate::schedule::IntervalGate;
use crate::status::ConnectionState;

pub struct StatusLed<P> {
    pin: P,
    lit: bool,
    gate: IntervalGate,
}

impl<P> StatusLed<P>
where
    P: OutputPin<Error = Infallible>,
{
    /// Wrap an LED pin, starting dark, with the blink clock at `now_ms`.
    pub fn new(mut pin: P, now_ms: u32) -> Self {
        set(&mut pin, false);
        Self {
            pin,
            lit: false,
            gate: IntervalGate::new(now_ms),
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Toggle the LED if the interval for `state` has elapsed.
    ///
    /// Returns the milliseconds until the next toggle is due.
    pub fn update(&mut self, now_ms: u32, state: ConnectionState) -> u32 {
        let interval = state.blink_interval_ms();
        if self.gate.try_fire(now_ms, interval) {
            self.lit = !self.lit;
            set(&mut self.pin, self.lit);
        }
        self.gate.remaining(now_ms, interval)
    }
}

fn set<P>(pin: &mut P, lit: bool)
where
    P: OutputPin<Error = Infallible>,
{
    match pin.set_state(PinState::from(lit)) {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct FakeLed {
        high: bool,
        writes: usize,
    }

    impl ErrorType for FakeLed {
        type Error = Infallible;
    }

    impl OutputPin for FakeLed {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn starts_dark() {
        let led = StatusLed::new(FakeLed::default(), 0);
        assert!(!led.is_lit());
        assert!(!led.pin.high);
        assert_eq!(led.pin.writes, 1);
    }

    #[test]
    fn toggles_every_interval_while_unmounted() {
        let mut led = StatusLed::new(FakeLed::default(), 0);

        assert_eq!(led.update(100, ConnectionState::NotMounted), 150);
        assert!(!led.is_lit());

        assert_eq!(led.update(250, ConnectionState::NotMounted), 250);
        assert!(led.is_lit());
        assert!(led.pin.high);

        led.update(500, ConnectionState::NotMounted);
        assert!(!led.is_lit());
        assert!(!led.pin.high);
    }

    #[test]
    fn slower_cadence_once_mounted() {
        let mut led = StatusLed::new(FakeLed::default(), 0);

        led.update(999, ConnectionState::Mounted);
        assert!(!led.is_lit());
        led.update(1000, ConnectionState::Mounted);
        assert!(led.is_lit());

        assert_eq!(led.update(1000, ConnectionState::Suspended), 2500);
        led.update(3499, ConnectionState::Suspended);
        assert!(led.is_lit());
        led.update(3500, ConnectionState::Suspended);
        assert!(!led.is_lit());
    }
}
