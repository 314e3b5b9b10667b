//! Encoder polling task - samples the knob every poll interval and
//! forwards keystrokes to the HID endpoint.

use crate::now_ms;
use crate::usb::hid_device::{self, KeyboardWriter, SharedStatus, WakeupSignal};
use defmt::{info, warn};
use embassy_nrf::gpio::Input;
use embassy_time::Timer;
use knob::config::POLL_INTERVAL_MS;
use knob::schedule::IntervalGate;
use knob::{EncoderPins, EncoderPoller};

pub async fn encoder_task(
    mut pins: EncoderPins<Input<'static>>,
    mut writer: KeyboardWriter,
    status: &SharedStatus,
    wakeup: &WakeupSignal,
) -> ! {
    let mut poller = EncoderPoller::from_pins(&mut pins);
    info!(
        "Encoder task started at position {}",
        poller.state().previous.value()
    );

    let mut gate = IntervalGate::new(now_ms());

    loop {
        let now = now_ms();
        if !gate.try_fire(now, POLL_INTERVAL_MS) {
            Timer::after_millis(gate.remaining(now, POLL_INTERVAL_MS).into()).await;
            continue;
        }

        let suspended = status.lock(|s| s.borrow().is_suspended());
        if suspended {
            let moved = poller.motion_pending(&mut pins);
            if status.lock(|s| s.borrow_mut().take_wakeup_request(moved)) {
                wakeup.signal(());
            }
        }

        let ready = status.lock(|s| s.borrow().hid_ready());
        if let Some(report) = poller.tick(ready, &mut pins) {
            if let Err(e) = hid_device::send_keyboard(&mut writer, report).await {
                warn!("Keyboard report dropped: {}", e);
            }
        }
    }
}
