//! Integration tests for the host-testable knob logic.
//!
//! Drives the same sequence the firmware runs each tick - gate, status
//! check, poller, report encoding - against simulated pins.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin};
use knob::config::{CCW_KEYCODE, CW_KEYCODE, POLL_INTERVAL_MS};
use knob::hid::MAX_REPORT_SIZE;
use knob::schedule::IntervalGate;
use knob::{ConnectionState, DeviceStatus, EncoderPins, EncoderPoller, HidReport, UsbEvents};

struct SimPin(Rc<Cell<bool>>);

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

/// A simulated device: pins, poller, USB status and the host's view of
/// the reports it received.
struct Device {
    levels: [Rc<Cell<bool>>; 4],
    pins: EncoderPins<SimPin>,
    poller: EncoderPoller,
    status: DeviceStatus,
    gate: IntervalGate,
    sent: Vec<[u8; MAX_REPORT_SIZE]>,
    wakeups: usize,
}

impl Device {
    fn boot() -> Self {
        let levels: [Rc<Cell<bool>>; 4] = core::array::from_fn(|_| Rc::new(Cell::new(true)));
        let mut pins = EncoderPins::new(core::array::from_fn(|i| SimPin(levels[i].clone())));
        let poller = EncoderPoller::from_pins(&mut pins);
        Self {
            levels,
            pins,
            poller,
            status: DeviceStatus::new(),
            gate: IntervalGate::new(0),
            sent: Vec::new(),
            wakeups: 0,
        }
    }

    fn set_raw(&self, raw: u8) {
        for (bit, level) in self.levels.iter().enumerate() {
            level.set(raw & (1 << bit) != 0);
        }
    }

    /// One pass of the main loop at time `now_ms`.
    fn run(&mut self, now_ms: u32) {
        if !self.gate.try_fire(now_ms, POLL_INTERVAL_MS) {
            return;
        }
        if self.status.is_suspended() {
            let moved = self.poller.motion_pending(&mut self.pins);
            if self.status.take_wakeup_request(moved) {
                self.wakeups += 1;
            }
        }
        if let Some(report) = self.poller.tick(self.status.hid_ready(), &mut self.pins) {
            let mut buf = [0u8; MAX_REPORT_SIZE];
            assert_eq!(HidReport::Keyboard(report).serialize(&mut buf), MAX_REPORT_SIZE);
            self.sent.push(buf);
        }
    }

    fn keys(&self) -> Vec<u8> {
        self.sent.iter().map(|r| r[3]).collect()
    }
}

#[test]
fn nothing_is_sent_until_mounted() {
    let mut dev = Device::boot();
    dev.set_raw(14);
    dev.run(10);
    assert!(dev.sent.is_empty());

    dev.status.mounted();
    dev.run(20);
    dev.run(30);
    assert_eq!(dev.keys(), [CW_KEYCODE, 0]);
}

#[test]
fn report_bytes_on_the_wire() {
    let mut dev = Device::boot();
    dev.status.mounted();

    dev.set_raw(14);
    dev.run(10);
    dev.run(20);

    assert_eq!(dev.sent[0], [1, 0, 0, CW_KEYCODE, 0, 0, 0, 0, 0]);
    assert_eq!(dev.sent[1], [1, 0, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn gate_limits_to_one_report_per_interval() {
    let mut dev = Device::boot();
    dev.status.mounted();
    dev.set_raw(14);

    // Spinning faster than the poll interval changes nothing.
    for now in 0..10 {
        dev.run(now);
    }
    assert!(dev.sent.is_empty());

    for now in 10..20 {
        dev.run(now);
    }
    assert_eq!(dev.keys(), [CW_KEYCODE]);
}

#[test]
fn turning_both_ways_alternates_press_and_release() {
    let mut dev = Device::boot();
    dev.status.mounted();
    let mut now = 0;
    let mut step = |dev: &mut Device, raw: u8| {
        dev.set_raw(raw);
        now += POLL_INTERVAL_MS;
        dev.run(now);
        now += POLL_INTERVAL_MS;
        dev.run(now);
    };

    step(&mut dev, 14); // position 1
    step(&mut dev, 12); // position 2
    step(&mut dev, 14); // back to 1
    step(&mut dev, 15); // back to 0
    step(&mut dev, 7); // position 15

    assert_eq!(
        dev.keys(),
        [CW_KEYCODE, 0, CW_KEYCODE, 0, CCW_KEYCODE, 0, CCW_KEYCODE, 0, CCW_KEYCODE, 0]
    );
}

#[test]
fn suspend_wakes_host_once_when_knob_turns() {
    let mut dev = Device::boot();
    dev.status.mounted();
    dev.status.suspended(true);
    assert_eq!(dev.status.connection(), ConnectionState::Suspended);

    dev.run(10);
    assert_eq!(dev.wakeups, 0);

    dev.set_raw(14);
    dev.run(20);
    dev.run(30);
    assert_eq!(dev.wakeups, 1);
    assert!(dev.sent.is_empty());

    // The host resumes the bus; the turn made while asleep is typed.
    dev.status.resumed();
    dev.run(40);
    dev.run(50);
    assert_eq!(dev.keys(), [CW_KEYCODE, 0]);
}

#[test]
fn unplug_while_key_down_releases_after_remount() {
    let mut dev = Device::boot();
    dev.status.mounted();
    dev.set_raw(14);
    dev.run(10);
    assert_eq!(dev.keys(), [CW_KEYCODE]);

    dev.status.unmounted();
    dev.run(20);
    assert_eq!(dev.keys(), [CW_KEYCODE]);

    dev.status.mounted();
    dev.run(30);
    assert_eq!(dev.keys(), [CW_KEYCODE, 0]);
}
