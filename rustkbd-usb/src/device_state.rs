use core::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DeviceState {
    Unattached = 0u8,
    Default,
    Addressed,
    Configured,
}

impl DeviceState {
    fn from_bits(bits: u8) -> Self {
        match bits {
            1 => DeviceState::Default,
            2 => DeviceState::Addressed,
            3 => DeviceState::Configured,
            _ => DeviceState::Unattached,
        }
    }
}

/// Lifecycle state shared between the control-request handler and the bus interrupt.
///
/// Bus-level events (VBUS loss, end of reset) may arrive from interrupt context while a
/// request is being serviced, so the state lives in an atomic that can be placed in a `static`.
#[derive(Debug)]
pub struct DeviceStatus(AtomicU8);

impl DeviceStatus {
    pub const fn new() -> Self {
        DeviceStatus(AtomicU8::new(DeviceState::Unattached as u8))
    }

    pub fn get(&self) -> DeviceState {
        DeviceState::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, state: DeviceState) {
        self.0.store(state as u8, Ordering::Relaxed);
    }

    /// Bus reset observed while attached: the device answers on address 0 again.
    pub fn attach(&self) {
        self.set(DeviceState::Default);
    }

    /// VBUS went away. Any in-flight wait must give up.
    pub fn detach(&self) {
        self.set(DeviceState::Unattached);
    }

    pub fn is_attached(&self) -> bool {
        self.get() != DeviceState::Unattached
    }
}

impl Default for DeviceStatus {
    fn default() -> Self {
        Self::new()
    }
}
