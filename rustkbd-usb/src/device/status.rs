use super::UsbDevice;
use crate::{
    request_type::Recipient, DescriptorProvider, DeviceEvents, EndpointBus, Reject, SetupPacket,
    UniqueId, CONTROL_ENDPOINT,
};

const SELF_POWERED: u16 = 1 << 0;
const REMOTE_WAKEUP_ENABLED: u16 = 1 << 1;
const ENDPOINT_HALTED: u16 = 1 << 0;

impl<'a, B, D, E, U> UsbDevice<'a, B, D, E, U>
where
    B: EndpointBus,
    D: DescriptorProvider,
    E: DeviceEvents<B>,
    U: UniqueId,
{
    pub(super) fn get_status(&mut self, setup: &SetupPacket) -> Result<(), Reject> {
        let status = match setup.bmRequestType.recipient() {
            Recipient::Device if self.config.reports_device_status() => {
                let mut status = 0;
                if self.config.self_power_reporting && self.context.self_powered() {
                    status |= SELF_POWERED;
                }
                if self.config.remote_wakeup && self.context.remote_wakeup_enabled() {
                    status |= REMOTE_WAKEUP_ENABLED;
                }
                status
            }
            Recipient::Endpoint if !self.config.control_only => {
                self.bus.select_endpoint(super::endpoint_number(setup.wIndex));
                let halted = self.bus.is_stalled();
                self.bus.select_endpoint(CONTROL_ENDPOINT);
                if halted { ENDPOINT_HALTED } else { 0 }
            }
            _ => return Err(Reject::UnsupportedRecipient),
        };

        self.bus.ack_setup();
        self.bus.write_word_le(status);
        self.bus.ack_in();
        self.bus.ack_status_stage();
        Ok(())
    }

    pub(super) fn get_configuration(&mut self) {
        self.bus.ack_setup();
        self.bus.write_byte(self.context.configuration());
        self.bus.ack_in();
        self.bus.ack_status_stage();
    }
}
