use usb_device::control::Request;

use super::UsbDevice;
use crate::{
    request_type::Recipient, DescriptorProvider, DeviceEvents, EndpointBus, Reject, SetupPacket,
    UniqueId, CONTROL_ENDPOINT,
};

impl<'a, B, D, E, U> UsbDevice<'a, B, D, E, U>
where
    B: EndpointBus,
    D: DescriptorProvider,
    E: DeviceEvents<B>,
    U: UniqueId,
{
    /// CLEAR_FEATURE and SET_FEATURE. `bRequest` tells which of the two it is.
    pub(super) fn clear_set_feature(&mut self, setup: &SetupPacket) -> Result<(), Reject> {
        let set = setup.bRequest == Request::SET_FEATURE;
        let feature = setup.wValue & 0xff;

        match setup.bmRequestType.recipient() {
            Recipient::Device if self.config.remote_wakeup => {
                if feature != Request::FEATURE_DEVICE_REMOTE_WAKEUP {
                    return Err(Reject::UnsupportedFeature { feature });
                }
                self.context.set_remote_wakeup_enabled(set);
            }
            Recipient::Endpoint if !self.config.control_only => {
                if feature != Request::FEATURE_ENDPOINT_HALT {
                    return Err(Reject::UnsupportedFeature { feature });
                }
                let endpoint = super::endpoint_number(setup.wIndex);
                if endpoint == CONTROL_ENDPOINT {
                    return Err(Reject::ControlEndpoint);
                }
                self.halt_endpoint(endpoint, set)?;
            }
            _ => return Err(Reject::UnsupportedRecipient),
        }

        self.bus.select_endpoint(CONTROL_ENDPOINT);
        self.bus.ack_setup();
        self.bus.ack_status_stage();
        Ok(())
    }

    fn halt_endpoint(&mut self, endpoint: u8, halt: bool) -> Result<(), Reject> {
        self.bus.select_endpoint(endpoint);
        if !self.bus.is_enabled() {
            self.bus.select_endpoint(CONTROL_ENDPOINT);
            return Err(Reject::EndpointDisabled { endpoint });
        }

        if halt {
            self.bus.stall();
        } else {
            // back to the state right after configuration
            self.bus.clear_stall();
            self.bus.reset_fifo(endpoint);
            self.bus.reset_data_toggle();
        }
        Ok(())
    }
}
