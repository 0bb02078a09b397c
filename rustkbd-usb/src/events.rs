use crate::{EndpointBus, SetupPacket};

/// Hooks through which the standard request handler notifies application code.
pub trait DeviceEvents<B: EndpointBus> {
    /// A control request that is not one of the supported standard requests arrived.
    ///
    /// Class or vendor requests may be serviced here. If the SETUP packet is left
    /// unacknowledged the transfer is stalled afterwards.
    fn unhandled_control_request(&mut self, bus: &mut B, setup: &SetupPacket) {
        let _ = (bus, setup);
    }

    /// SET_CONFIGURATION was accepted. Endpoints of the new configuration can be set up here.
    fn configuration_changed(&mut self, bus: &mut B, configuration: u8) {
        let _ = (bus, configuration);
    }
}

impl<B: EndpointBus> DeviceEvents<B> for () {}
