use crate::{DeviceState, DeviceStatus};

/// Everything the standard requests read or mutate about the device.
#[derive(Debug)]
pub struct DeviceContext<'a> {
    status: &'a DeviceStatus,
    address: u8,
    configuration: u8,
    self_powered: bool,
    remote_wakeup_enabled: bool,
}

impl<'a> DeviceContext<'a> {
    pub fn new(status: &'a DeviceStatus) -> Self {
        DeviceContext {
            status,
            address: 0,
            configuration: 0,
            self_powered: false,
            remote_wakeup_enabled: false,
        }
    }

    pub fn state(&self) -> DeviceState {
        self.status.get()
    }

    pub(crate) fn set_state(&self, state: DeviceState) {
        self.status.set(state);
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub(crate) fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    pub fn configuration(&self) -> u8 {
        self.configuration
    }

    pub(crate) fn set_configuration(&mut self, configuration: u8) {
        self.configuration = configuration;
    }

    pub fn self_powered(&self) -> bool {
        self.self_powered
    }

    /// The host cannot change this; only the application knows its power source.
    pub fn set_self_powered(&mut self, self_powered: bool) {
        self.self_powered = self_powered;
    }

    pub fn remote_wakeup_enabled(&self) -> bool {
        self.remote_wakeup_enabled
    }

    pub(crate) fn set_remote_wakeup_enabled(&mut self, enabled: bool) {
        self.remote_wakeup_enabled = enabled;
    }

    /// State after a bus reset. The self-powered flag reflects hardware and is kept.
    pub fn reset(&mut self) {
        self.address = 0;
        self.configuration = 0;
        self.remote_wakeup_enabled = false;
        self.status.attach();
    }
}
