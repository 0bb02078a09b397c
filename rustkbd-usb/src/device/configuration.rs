use usb_device::descriptor::descriptor_type;

use super::UsbDevice;
use crate::{
    DescriptorProvider, DeviceEvents, DeviceState, EndpointBus, Reject, SetupPacket, UniqueId,
};

/// Offset of `bNumConfigurations` in the device descriptor.
const NUM_CONFIGURATIONS_OFFSET: usize = 17;

impl<'a, B, D, E, U> UsbDevice<'a, B, D, E, U>
where
    B: EndpointBus,
    D: DescriptorProvider,
    E: DeviceEvents<B>,
    U: UniqueId,
{
    pub(super) fn set_configuration(&mut self, setup: &SetupPacket) -> Result<(), Reject> {
        let requested = (setup.wValue & 0xff) as u8;
        let available = self.num_configurations()?;
        if requested > available {
            return Err(Reject::ConfigurationOutOfRange {
                requested,
                available,
            });
        }

        self.bus.ack_setup();
        self.context.set_configuration(requested);
        self.bus.ack_status_stage();
        self.context.set_state(if requested != 0 {
            DeviceState::Configured
        } else {
            DeviceState::Addressed
        });
        info!("USB configuration set to {}", requested);

        self.events.configuration_changed(&mut self.bus, requested);
        Ok(())
    }

    fn num_configurations(&self) -> Result<u8, Reject> {
        if let Some(count) = self.config.fixed_configurations {
            return Ok(count);
        }
        let device = self
            .descriptors
            .get_descriptor(u16::from(descriptor_type::DEVICE) << 8, 0)
            .ok_or(Reject::DeviceDescriptorMissing)?;
        device
            .byte_at(&self.descriptors, NUM_CONFIGURATIONS_OFFSET)
            .ok_or(Reject::DeviceDescriptorMissing)
    }
}
