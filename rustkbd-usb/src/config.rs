/// String descriptor index conventionally reserved for the synthesized serial number.
pub const DEFAULT_SERIAL_INDEX: u8 = 0xdc;

/// Feature subset of the standard request handler, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Report the self-powered bit in GET_STATUS(device).
    pub self_power_reporting: bool,
    /// Report and accept the DEVICE_REMOTE_WAKEUP feature.
    pub remote_wakeup: bool,
    /// Only the control endpoint exists; endpoint-recipient requests are rejected.
    pub control_only: bool,
    /// Number of configurations known at build time. When `None` the device descriptor
    /// is consulted on every SET_CONFIGURATION.
    pub fixed_configurations: Option<u8>,
    /// String index answered with the serial number built from the unique ID.
    pub internal_serial: Option<u8>,
}

impl Config {
    pub const fn new() -> Self {
        Config {
            self_power_reporting: true,
            remote_wakeup: true,
            control_only: false,
            fixed_configurations: None,
            internal_serial: None,
        }
    }

    pub const fn self_power_reporting(mut self, enabled: bool) -> Self {
        self.self_power_reporting = enabled;
        self
    }

    pub const fn remote_wakeup(mut self, enabled: bool) -> Self {
        self.remote_wakeup = enabled;
        self
    }

    pub const fn control_only(mut self, enabled: bool) -> Self {
        self.control_only = enabled;
        self
    }

    pub const fn fixed_configurations(mut self, count: u8) -> Self {
        self.fixed_configurations = Some(count);
        self
    }

    pub const fn internal_serial(mut self, index: u8) -> Self {
        self.internal_serial = Some(index);
        self
    }

    /// GET_STATUS(device) has nothing to report when both power features are compiled out.
    pub(crate) fn reports_device_status(&self) -> bool {
        self.self_power_reporting || self.remote_wakeup
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
