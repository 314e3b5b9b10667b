//! USB connection status - what the host has done to us lately.
//!
//! The USB stack reports lifecycle events through [`UsbEvents`];
//! [`DeviceStatus`] turns them into the [`ConnectionState`] that drives
//! the status LED, the "ready to send" predicate used by the encoder
//! poller, and the once-per-suspend remote wakeup decision.

use crate::config::{BLINK_MOUNTED_MS, BLINK_NOT_MOUNTED_MS, BLINK_SUSPENDED_MS};
use crate::hid::ReportType;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    /// Not configured by a host (cable out, or still enumerating).
    #[default]
    NotMounted,
    /// Configured and the bus is running.
    Mounted,
    /// The host has suspended the bus.
    Suspended,
}

impl ConnectionState {
    /// Status LED toggle period for this state.
    pub const fn blink_interval_ms(self) -> u32 {
        match self {
            ConnectionState::NotMounted => BLINK_NOT_MOUNTED_MS,
            ConnectionState::Mounted => BLINK_MOUNTED_MS,
            ConnectionState::Suspended => BLINK_SUSPENDED_MS,
        }
    }
}

/// Callbacks the USB stack invokes on the application.
///
/// All of them run on the executor thread, inside the USB device future.
pub trait UsbEvents {
    /// The host selected a configuration.
    fn mounted(&mut self);

    /// Configuration dropped or the bus went away.
    fn unmounted(&mut self);

    /// Bus suspended.  `remote_wakeup_enabled` is the host's current
    /// permission for us to wake it.
    fn suspended(&mut self, remote_wakeup_enabled: bool);

    /// Bus resumed after a suspend.
    fn resumed(&mut self);

    /// The host changed the remote wakeup permission (SET/CLEAR_FEATURE).
    fn remote_wakeup_enabled(&mut self, enabled: bool);

    /// GET_REPORT control request.  Fill `buf` and return its length;
    /// 0 makes the stack STALL the request.
    fn get_report(&mut self, report_id: u8, report_type: ReportType, buf: &mut [u8]) -> usize;

    /// SET_REPORT control request (or an OUT report).
    fn set_report(&mut self, report_id: u8, report_type: ReportType, data: &[u8]);
}

#[derive(Debug, Default)]
pub struct DeviceStatus {
    connection: ConnectionState,
    configured: bool,
    remote_wakeup_allowed: bool,
    wakeup_sent: bool,
}

impl DeviceStatus {
    pub const fn new() -> Self {
        Self {
            connection: ConnectionState::NotMounted,
            configured: false,
            remote_wakeup_allowed: false,
            wakeup_sent: false,
        }
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn is_suspended(&self) -> bool {
        self.connection == ConnectionState::Suspended
    }

    /// Whether a keyboard report can be sent right now.
    pub fn hid_ready(&self) -> bool {
        self.connection == ConnectionState::Mounted
    }

    /// Decide whether to wake the host.
    ///
    /// True at most once per suspend episode, and only while suspended
    /// with the host's permission and `activity` set.
    pub fn take_wakeup_request(&mut self, activity: bool) -> bool {
        if !self.is_suspended() || !self.remote_wakeup_allowed || self.wakeup_sent || !activity {
            return false;
        }
        self.wakeup_sent = true;
        true
    }

    fn set_connection(&mut self, next: ConnectionState) {
        if self.connection != next {
            #[cfg(feature = "defmt")]
            defmt::info!("USB: {} -> {}", self.connection, next);
            self.connection = next;
        }
    }
}

impl UsbEvents for DeviceStatus {
    fn mounted(&mut self) {
        self.configured = true;
        self.set_connection(ConnectionState::Mounted);
    }

    fn unmounted(&mut self) {
        self.configured = false;
        self.set_connection(ConnectionState::NotMounted);
    }

    fn suspended(&mut self, remote_wakeup_enabled: bool) {
        self.remote_wakeup_allowed = remote_wakeup_enabled;
        self.wakeup_sent = false;
        self.set_connection(ConnectionState::Suspended);
    }

    fn resumed(&mut self) {
        // The bus can be suspended before the host ever configures us.
        let next = if self.configured {
            ConnectionState::Mounted
        } else {
            ConnectionState::NotMounted
        };
        self.set_connection(next);
    }

    fn remote_wakeup_enabled(&mut self, enabled: bool) {
        self.remote_wakeup_allowed = enabled;
    }

    fn get_report(&mut self, _report_id: u8, _report_type: ReportType, _buf: &mut [u8]) -> usize {
        0
    }

    fn set_report(&mut self, _report_id: u8, _report_type: ReportType, _data: &[u8]) {
        // Keyboard LED state (Caps/Num Lock) is not shown anywhere.
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "SET_REPORT id={} type={} len={} ignored",
            _report_id,
            _report_type,
            _data.len()
        );
    }
}
