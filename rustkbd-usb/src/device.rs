use usb_device::control::Request;

use crate::{
    request_type::{BmRequestType, Direction, Recipient, Type},
    Config, DescriptorProvider, DeviceContext, DeviceEvents, DeviceState, DeviceStatus,
    EndpointBus, Error, Reject, SetupPacket, UniqueId, CONTROL_ENDPOINT,
};

mod address;
mod configuration;
mod descriptor;
mod feature;
mod status;

const fn standard(direction: Direction, recipient: Recipient) -> u8 {
    BmRequestType::new(direction, Type::Standard, recipient).bits()
}

const IN_DEVICE: u8 = standard(Direction::DeviceToHost, Recipient::Device);
const IN_INTERFACE: u8 = standard(Direction::DeviceToHost, Recipient::Interface);
const IN_ENDPOINT: u8 = standard(Direction::DeviceToHost, Recipient::Endpoint);
const OUT_DEVICE: u8 = standard(Direction::HostToDevice, Recipient::Device);
const OUT_ENDPOINT: u8 = standard(Direction::HostToDevice, Recipient::Endpoint);

/// Endpoint number addressed by the `wIndex` of an endpoint-recipient request.
fn endpoint_number(index: u16) -> u8 {
    (index & 0x0f) as u8
}

/// Terminal state a control transfer was left in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Completion {
    Completed,
    Stalled,
}

/// The standard requests this handler services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StandardRequest {
    GetStatus,
    ClearFeature,
    SetFeature,
    SetAddress,
    GetDescriptor,
    GetConfiguration,
    SetConfiguration,
}

impl StandardRequest {
    /// Matches both the request code and the exact `bmRequestType` it is valid with.
    pub fn classify(setup: &SetupPacket) -> Option<Self> {
        let ty = setup.bmRequestType.bits();
        match setup.bRequest {
            Request::GET_STATUS if ty == IN_DEVICE || ty == IN_ENDPOINT => {
                Some(StandardRequest::GetStatus)
            }
            Request::CLEAR_FEATURE if ty == OUT_DEVICE || ty == OUT_ENDPOINT => {
                Some(StandardRequest::ClearFeature)
            }
            Request::SET_FEATURE if ty == OUT_DEVICE || ty == OUT_ENDPOINT => {
                Some(StandardRequest::SetFeature)
            }
            Request::SET_ADDRESS if ty == OUT_DEVICE => Some(StandardRequest::SetAddress),
            Request::GET_DESCRIPTOR if ty == IN_DEVICE || ty == IN_INTERFACE => {
                Some(StandardRequest::GetDescriptor)
            }
            Request::GET_CONFIGURATION if ty == IN_DEVICE => {
                Some(StandardRequest::GetConfiguration)
            }
            Request::SET_CONFIGURATION if ty == OUT_DEVICE => {
                Some(StandardRequest::SetConfiguration)
            }
            _ => None,
        }
    }
}

/// Standard control request handler for a device on an [`EndpointBus`].
pub struct UsbDevice<'a, B, D, E, U>
where
    B: EndpointBus,
    D: DescriptorProvider,
    E: DeviceEvents<B>,
    U: UniqueId,
{
    bus: B,
    descriptors: D,
    events: E,
    unique_id: U,
    config: Config,
    context: DeviceContext<'a>,
}

impl<'a, B, D, E, U> UsbDevice<'a, B, D, E, U>
where
    B: EndpointBus,
    D: DescriptorProvider,
    E: DeviceEvents<B>,
    U: UniqueId,
{
    pub fn new(
        bus: B,
        descriptors: D,
        events: E,
        unique_id: U,
        config: Config,
        status: &'a DeviceStatus,
    ) -> Self {
        UsbDevice {
            bus,
            descriptors,
            events,
            unique_id,
            config,
            context: DeviceContext::new(status),
        }
    }

    pub fn state(&self) -> DeviceState {
        self.context.state()
    }

    pub fn address(&self) -> u8 {
        self.context.address()
    }

    pub fn configuration(&self) -> u8 {
        self.context.configuration()
    }

    pub fn remote_wakeup_enabled(&self) -> bool {
        self.context.remote_wakeup_enabled()
    }

    pub fn self_powered(&self) -> bool {
        self.context.self_powered()
    }

    pub fn set_self_powered(&mut self, self_powered: bool) {
        self.context.set_self_powered(self_powered);
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn descriptors(&self) -> &D {
        &self.descriptors
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    /// To be called on the end-of-reset bus event.
    pub fn bus_reset(&mut self) {
        self.context.reset();
        info!("USB bus reset");
    }

    /// Services a pending SETUP packet, if any.
    pub fn poll(&mut self) -> Option<Result<Completion, Error<B::Error>>> {
        if self.state() == DeviceState::Unattached {
            return None;
        }
        self.bus.select_endpoint(CONTROL_ENDPOINT);
        if !self.bus.is_setup_pending() {
            return None;
        }
        Some(self.process_control_request())
    }

    /// Reads the SETUP header from the control endpoint and runs the matching standard
    /// request. A transfer left with its SETUP pending is stalled.
    pub fn process_control_request(&mut self) -> Result<Completion, Error<B::Error>> {
        let setup = match SetupPacket::read(&mut self.bus) {
            Ok(setup) => setup,
            Err(source) => {
                warn!("Failed to read SETUP packet");
                self.stall_if_pending();
                return Err(Error::SetupRead { source });
            }
        };

        match StandardRequest::classify(&setup) {
            Some(request) => {
                debug!("{}: {}", request, setup);
                if let Err(reason) = self.handle(request, &setup) {
                    debug!("{} rejected: {}", request, reason);
                }
            }
            None => {
                trace!("Unhandled control request: {}", setup);
                self.events.unhandled_control_request(&mut self.bus, &setup);
            }
        }

        Ok(self.stall_if_pending())
    }

    fn handle(&mut self, request: StandardRequest, setup: &SetupPacket) -> Result<(), Reject> {
        match request {
            StandardRequest::GetStatus => self.get_status(setup),
            StandardRequest::ClearFeature | StandardRequest::SetFeature => {
                self.clear_set_feature(setup)
            }
            StandardRequest::SetAddress => self.set_address(setup),
            StandardRequest::GetDescriptor => self.get_descriptor(setup),
            StandardRequest::GetConfiguration => {
                self.get_configuration();
                Ok(())
            }
            StandardRequest::SetConfiguration => self.set_configuration(setup),
        }
    }

    fn stall_if_pending(&mut self) -> Completion {
        if self.bus.is_setup_pending() {
            debug!("Stalling control transfer");
            self.bus.stall();
            self.bus.ack_setup();
            Completion::Stalled
        } else {
            Completion::Completed
        }
    }
}
