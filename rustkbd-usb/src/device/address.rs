use super::UsbDevice;
use crate::{
    DescriptorProvider, DeviceEvents, DeviceState, EndpointBus, Reject, SetupPacket, UniqueId,
};

impl<'a, B, D, E, U> UsbDevice<'a, B, D, E, U>
where
    B: EndpointBus,
    D: DescriptorProvider,
    E: DeviceEvents<B>,
    U: UniqueId,
{
    /// The new address must only take effect after the status stage has completed.
    pub(super) fn set_address(&mut self, setup: &SetupPacket) -> Result<(), Reject> {
        let address = (setup.wValue & 0x7f) as u8;

        self.bus.ack_setup();
        self.bus.ack_status_stage();

        while !self.bus.is_in_ready() {
            if self.context.state() == DeviceState::Unattached {
                warn!("Detached while waiting to apply address {}", address);
                return Err(Reject::Detached);
            }
            core::hint::spin_loop();
        }

        self.context.set_state(if address != 0 {
            DeviceState::Addressed
        } else {
            DeviceState::Default
        });
        // neither Addressed nor Default has a configuration
        self.context.set_configuration(0);
        self.context.set_address(address);
        self.bus.set_address(address);
        info!("USB address set to {}", address);
        Ok(())
    }
}
