//! knob - rotary encoder to USB HID keyboard (nRF52840).
//!
//! Each detent of the encoder types one key: `\` clockwise, `]`
//! counter-clockwise.  The status LED blinks faster while unplugged and
//! slower while suspended.
//!
//! Everything runs on one thread-mode executor as three joined futures:
//! the USB device stack, the encoder poller and the LED blinker.

#![no_std]
#![no_main]

mod encoder_task;
mod error;
mod led;
mod usb;

use defmt::info;
use embassy_executor::Spawner;
use embassy_futures::join::join3;
use embassy_nrf::config::HfclkSource;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_time::Instant;
use knob::EncoderPins;
use usb::hid_device::{self, UsbHidDevice, WakeupSignal};
use {defmt_rtt as _, panic_probe as _};

/// Low 32 bits of the uptime in milliseconds; wraps after ~49 days.
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    // The USB peripheral needs the external 32 MHz crystal.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(nrf_config);

    info!("knob starting");

    let UsbHidDevice {
        device,
        keyboard_writer,
        status,
    } = hid_device::init(p.USBD);

    // ENC1..ENC4, raw bits 0..3.
    let pins = EncoderPins::new([
        Input::new(p.P0_05, Pull::Up),
        Input::new(p.P0_02, Pull::Up),
        Input::new(p.P0_04, Pull::Up),
        Input::new(p.P0_03, Pull::Up),
    ]);
    let led = Output::new(p.P0_06, Level::Low, OutputDrive::Standard);

    let wakeup = WakeupSignal::new();

    join3(
        hid_device::run_usb_device(device, &wakeup),
        encoder_task::encoder_task(pins, keyboard_writer, status, &wakeup),
        led::blink_task(led, status),
    )
    .await;
}
