//! USB HID keyboard device.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral, exposes one HID IN endpoint and adapts the stack's
//! callbacks to [`UsbEvents`].

use core::cell::RefCell;

use crate::error::Error;
use defmt::{debug, info, warn};
use embassy_futures::select::{select, Either};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, ReportId, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::{Builder, Config, UsbDevice};
use knob::config;
use knob::hid::{HidReport, ReportType, MAX_REPORT_SIZE, REPORT_DESCRIPTOR};
use knob::{DeviceStatus, KeyboardReport, UsbEvents};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// HID IN endpoint writer sized for the largest report (ID + keyboard).
pub type KeyboardWriter = HidWriter<'static, UsbDriver, MAX_REPORT_SIZE>;

/// Connection status shared between the USB callbacks and the tasks.
pub type SharedStatus = Mutex<CriticalSectionRawMutex, RefCell<DeviceStatus>>;

/// Raised by the encoder task to ask the USB task for a remote wakeup.
pub type WakeupSignal = Signal<CriticalSectionRawMutex, ()>;

static HID_STATE: StaticCell<State> = StaticCell::new();
static STATUS: StaticCell<SharedStatus> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static USB_EVENT_HANDLER: StaticCell<UsbEventHandler> = StaticCell::new();
static HID_REQUEST_HANDLER: StaticCell<HidRequestHandler> = StaticCell::new();

/// Device-level bus events → [`UsbEvents`].
struct UsbEventHandler {
    status: &'static SharedStatus,
    remote_wakeup: bool,
}

impl UsbEventHandler {
    fn with_status(&self, f: impl FnOnce(&mut DeviceStatus)) {
        self.status.lock(|s| f(&mut s.borrow_mut()));
    }
}

impl embassy_usb::Handler for UsbEventHandler {
    fn enabled(&mut self, enabled: bool) {
        if !enabled {
            self.with_status(|s| s.unmounted());
        }
    }

    fn reset(&mut self) {
        self.remote_wakeup = false;
        self.with_status(|s| s.unmounted());
    }

    fn configured(&mut self, configured: bool) {
        if configured {
            self.with_status(|s| s.mounted());
        } else {
            self.with_status(|s| s.unmounted());
        }
    }

    fn suspended(&mut self, suspended: bool) {
        let remote_wakeup = self.remote_wakeup;
        if suspended {
            self.with_status(|s| s.suspended(remote_wakeup));
        } else {
            self.with_status(|s| s.resumed());
        }
    }

    fn remote_wakeup_enabled(&mut self, enabled: bool) {
        self.remote_wakeup = enabled;
        self.with_status(|s| s.remote_wakeup_enabled(enabled));
    }
}

/// HID class control requests → [`UsbEvents`].
struct HidRequestHandler {
    status: &'static SharedStatus,
}

fn split_report_id(id: ReportId) -> (u8, ReportType) {
    match id {
        ReportId::In(n) => (n, ReportType::Input),
        ReportId::Out(n) => (n, ReportType::Output),
        ReportId::Feature(n) => (n, ReportType::Feature),
    }
}

impl RequestHandler for HidRequestHandler {
    fn get_report(&mut self, id: ReportId, buf: &mut [u8]) -> Option<usize> {
        let (report_id, report_type) = split_report_id(id);
        let n = self
            .status
            .lock(|s| s.borrow_mut().get_report(report_id, report_type, buf));
        if n == 0 {
            debug!("GET_REPORT id={} {}: stalled", report_id, report_type);
            return None;
        }
        Some(n)
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        let (report_id, report_type) = split_report_id(id);
        self.status
            .lock(|s| s.borrow_mut().set_report(report_id, report_type, data));
        OutResponse::Accepted
    }
}

/// Build result containing the USB device runner, the HID writer and
/// the status the callbacks update.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard_writer: KeyboardWriter,
    pub status: &'static SharedStatus,
}

/// Initialise the USB stack and create the HID keyboard device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbHidDevice {
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = config::USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = 64;
    usb_config.supports_remote_wakeup = true;

    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let status: &'static SharedStatus =
        STATUS.init(Mutex::new(RefCell::new(DeviceStatus::new())));

    builder.handler(USB_EVENT_HANDLER.init(UsbEventHandler {
        status,
        remote_wakeup: false,
    }));

    let hid_state = HID_STATE.init(State::new());
    let hid_config = HidConfig {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: Some(HID_REQUEST_HANDLER.init(HidRequestHandler { status })),
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 16,
    };
    let keyboard_writer = HidWriter::new(&mut builder, hid_state, hid_config);

    let device = builder.build();

    info!("USB HID keyboard initialised");

    UsbHidDevice {
        device,
        keyboard_writer,
        status,
    }
}

/// Send one keyboard report, prefixed with its report ID.
pub async fn send_keyboard(writer: &mut KeyboardWriter, report: KeyboardReport) -> Result<(), Error> {
    let mut buf = [0u8; MAX_REPORT_SIZE];
    let n = HidReport::Keyboard(report).serialize(&mut buf);
    writer.write(&buf[..n]).await?;
    Ok(())
}

/// Run the USB device stack.
///
/// Handles enumeration and endpoint servicing.  While the bus is
/// suspended it waits for either the host to resume it or a wakeup
/// request from `wakeup`, in which case it signals remote wakeup.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>, wakeup: &WakeupSignal) -> ! {
    info!("USB device task started");

    loop {
        device.run_until_suspend().await;
        // Requests raised during an earlier suspend are stale.
        wakeup.reset();

        match select(device.wait_resume(), wakeup.wait()).await {
            Either::First(()) => {}
            Either::Second(()) => {
                info!("Requesting remote wakeup");
                if let Err(e) = device.remote_wakeup().await.map_err(Error::from) {
                    warn!("Remote wakeup failed: {}", e);
                }
            }
        }
    }
}
