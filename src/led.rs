//! Status LED task.
//!
//! Blink pattern:
//!   - 250 ms  : not mounted
//!   - 1000 ms : mounted
//!   - 2500 ms : suspended

use crate::now_ms;
use crate::usb::hid_device::SharedStatus;
use embassy_nrf::gpio::Output;
use embassy_time::Timer;
use knob::blink::StatusLed;

pub async fn blink_task(pin: Output<'static>, status: &SharedStatus) -> ! {
    let mut led = StatusLed::new(pin, now_ms());

    loop {
        let state = status.lock(|s| s.borrow().connection());
        let wait_ms = led.update(now_ms(), state);
        Timer::after_millis(wait_ms.into()).await;
    }
}
