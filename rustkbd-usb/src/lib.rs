//! Device-side handling of the USB standard (chapter 9) control requests.
//!
//! [`UsbDevice`] reads the SETUP header from an [`EndpointBus`], runs the matching
//! standard request and stalls every transfer that was left unfinished.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

mod config;
mod descriptor;
mod device;
mod device_context;
mod device_state;
mod endpoint_bus;
mod error;
mod events;
mod request_type;
mod serial_number;
mod setup_packet;

use device_context::DeviceContext;

pub use config::{Config, DEFAULT_SERIAL_INDEX};
pub use descriptor::{
    string_descriptor, AddressSpace, Descriptor, DescriptorBytes, DescriptorProvider,
};
pub use device::{Completion, StandardRequest, UsbDevice};
pub use device_state::{DeviceState, DeviceStatus};
pub use endpoint_bus::{EndpointBus, CONTROL_ENDPOINT};
pub use error::{Error, Reject};
pub use events::DeviceEvents;
pub use request_type::{BmRequestType, Direction, Recipient, Type};
pub use serial_number::{serial_number, UniqueId, SERIAL_NUMBER_CHARS};
pub use setup_packet::SetupPacket;
