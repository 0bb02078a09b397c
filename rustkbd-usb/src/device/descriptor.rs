use usb_device::descriptor::descriptor_type;

use super::UsbDevice;
use crate::{
    serial_number::serial_number_descriptor, DescriptorProvider, DeviceEvents, EndpointBus, Reject,
    SetupPacket, UniqueId,
};

impl<'a, B, D, E, U> UsbDevice<'a, B, D, E, U>
where
    B: EndpointBus,
    D: DescriptorProvider,
    E: DeviceEvents<B>,
    U: UniqueId,
{
    pub(super) fn get_descriptor(&mut self, setup: &SetupPacket) -> Result<(), Reject> {
        if let Some(index) = self.config.internal_serial {
            if setup.descriptor_type() == descriptor_type::STRING
                && setup.descriptor_index() == index
            {
                self.get_internal_serial_descriptor(setup);
                return Ok(());
            }
        }

        let descriptor = self
            .descriptors
            .get_descriptor(setup.wValue, setup.wIndex)
            .ok_or(Reject::DescriptorNotFound {
                value: setup.wValue,
                index: setup.wIndex,
            })?;

        self.bus.ack_setup();
        self.bus
            .write_control_stream(descriptor.bytes(&self.descriptors), setup.wLength);
        self.bus.ack_out();
        Ok(())
    }

    fn get_internal_serial_descriptor(&mut self, setup: &SetupPacket) {
        let descr = serial_number_descriptor(&self.unique_id);

        self.bus.ack_setup();
        self.bus
            .write_control_stream(descr.iter().copied(), setup.wLength);
        self.bus.ack_out();
    }
}
