#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;

use rustkbd_usb::{
    AddressSpace, Completion, Config, Descriptor, DescriptorProvider, DeviceEvents, DeviceStatus,
    EndpointBus, SetupPacket, UsbDevice, CONTROL_ENDPOINT,
};

pub const NUM_ENDPOINTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    AckSetup,
    AckStatusStage,
    AckIn,
    AckOut,
    Select(u8),
    Stall(u8),
    ClearStall(u8),
    ResetFifo(u8),
    ResetDataToggle(u8),
    SetAddress(u8),
    Stream { requested: u16, sent: usize },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointState {
    pub enabled: bool,
    pub stalled: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MockError {
    NoSetupData,
}

/// Endpoint controller that records every primitive the handler drives.
pub struct MockBus<'s> {
    status: &'s DeviceStatus,
    setup: VecDeque<u8>,
    setup_pending: bool,
    would_block: bool,
    selected: u8,
    pub endpoints: [EndpointState; NUM_ENDPOINTS],
    pub in_data: Vec<u8>,
    pub calls: Vec<Call>,
    polls: Cell<usize>,
    ready_after_polls: usize,
    detach_after_polls: Option<usize>,
}

impl<'s> MockBus<'s> {
    pub fn new(status: &'s DeviceStatus) -> Self {
        let mut endpoints = [EndpointState::default(); NUM_ENDPOINTS];
        endpoints[0].enabled = true;
        MockBus {
            status,
            setup: VecDeque::new(),
            setup_pending: false,
            would_block: false,
            selected: CONTROL_ENDPOINT,
            endpoints,
            in_data: Vec::new(),
            calls: Vec::new(),
            polls: Cell::new(0),
            ready_after_polls: 0,
            detach_after_polls: None,
        }
    }

    /// Puts a fresh SETUP packet into the control endpoint and forgets earlier traffic.
    pub fn load_setup(&mut self, setup: [u8; 8]) {
        self.setup = setup.iter().copied().collect();
        self.setup_pending = true;
        self.in_data.clear();
        self.calls.clear();
        self.polls.set(0);
    }

    /// Makes the next `read_setup_byte` return `WouldBlock` once.
    pub fn interleave_would_block(&mut self) {
        self.would_block = true;
    }

    /// Truncates the SETUP packet so that reading it fails.
    pub fn cut_setup(&mut self, len: usize) {
        self.setup.truncate(len);
    }

    pub fn ready_after(&mut self, polls: usize) {
        self.ready_after_polls = polls;
    }

    pub fn detach_after(&mut self, polls: usize) {
        self.detach_after_polls = Some(polls);
    }

    pub fn in_ready_polls(&self) -> usize {
        self.polls.get()
    }

    pub fn selected(&self) -> u8 {
        self.selected
    }

    pub fn setup_pending(&self) -> bool {
        self.setup_pending
    }

    pub fn enable(&mut self, endpoint: u8) {
        self.endpoints[endpoint as usize].enabled = true;
    }

    pub fn set_stalled(&mut self, endpoint: u8, stalled: bool) {
        self.endpoints[endpoint as usize].stalled = stalled;
    }

    pub fn control_stalled(&self) -> bool {
        self.endpoints[CONTROL_ENDPOINT as usize].stalled
    }

    pub fn has_call(&self, call: Call) -> bool {
        self.calls.contains(&call)
    }

    pub fn position(&self, call: Call) -> Option<usize> {
        self.calls.iter().position(|c| *c == call)
    }

    fn current(&mut self) -> &mut EndpointState {
        &mut self.endpoints[self.selected as usize]
    }
}

impl<'s> EndpointBus for MockBus<'s> {
    type Error = MockError;

    fn read_setup_byte(&mut self) -> nb::Result<u8, MockError> {
        if self.would_block {
            self.would_block = false;
            return Err(nb::Error::WouldBlock);
        }
        match self.setup.pop_front() {
            Some(byte) => Ok(byte),
            None => Err(nb::Error::Other(MockError::NoSetupData)),
        }
    }

    fn write_byte(&mut self, byte: u8) {
        self.in_data.push(byte);
    }

    fn write_control_stream<I: Iterator<Item = u8>>(&mut self, bytes: I, requested_len: u16) {
        let before = self.in_data.len();
        self.in_data.extend(bytes.take(requested_len as usize));
        self.calls.push(Call::Stream {
            requested: requested_len,
            sent: self.in_data.len() - before,
        });
    }

    fn ack_setup(&mut self) {
        self.setup_pending = false;
        self.calls.push(Call::AckSetup);
    }

    fn ack_status_stage(&mut self) {
        self.calls.push(Call::AckStatusStage);
    }

    fn ack_in(&mut self) {
        self.calls.push(Call::AckIn);
    }

    fn ack_out(&mut self) {
        self.calls.push(Call::AckOut);
    }

    fn is_in_ready(&self) -> bool {
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        if self.detach_after_polls == Some(polls) {
            self.status.detach();
        }
        polls > self.ready_after_polls
    }

    fn is_setup_pending(&self) -> bool {
        self.selected == CONTROL_ENDPOINT && self.setup_pending
    }

    fn is_stalled(&self) -> bool {
        self.endpoints[self.selected as usize].stalled
    }

    fn is_enabled(&self) -> bool {
        self.endpoints[self.selected as usize].enabled
    }

    fn select_endpoint(&mut self, endpoint: u8) {
        self.selected = endpoint;
        self.calls.push(Call::Select(endpoint));
    }

    fn stall(&mut self) {
        self.current().stalled = true;
        self.calls.push(Call::Stall(self.selected));
    }

    fn clear_stall(&mut self) {
        self.current().stalled = false;
        self.calls.push(Call::ClearStall(self.selected));
    }

    fn reset_fifo(&mut self, endpoint: u8) {
        self.calls.push(Call::ResetFifo(endpoint));
    }

    fn reset_data_toggle(&mut self) {
        self.calls.push(Call::ResetDataToggle(self.selected));
    }

    fn set_address(&mut self, address: u8) {
        self.calls.push(Call::SetAddress(address));
    }
}

#[derive(Debug, Default)]
pub struct RecordingEvents {
    pub unhandled: Vec<SetupPacket>,
    pub configurations: Vec<u8>,
    /// Acknowledge unhandled requests as a class driver servicing them would.
    pub service_unhandled: bool,
}

impl<B: EndpointBus> DeviceEvents<B> for RecordingEvents {
    fn unhandled_control_request(&mut self, bus: &mut B, setup: &SetupPacket) {
        self.unhandled.push(*setup);
        if self.service_unhandled {
            bus.ack_setup();
            bus.ack_status_stage();
        }
    }

    fn configuration_changed(&mut self, _bus: &mut B, configuration: u8) {
        self.configurations.push(configuration);
    }
}

pub enum Stored {
    Linear(Vec<u8>),
    Program(u16, u16),
    Persistent(u16, u16),
}

/// Descriptor table spread over RAM, program memory and EEPROM images.
pub struct TestDescriptors {
    pub table: Vec<(u16, u16, Stored)>,
    pub program: Vec<u8>,
    pub persistent: Vec<u8>,
    pub program_reads: Cell<usize>,
    pub persistent_reads: Cell<usize>,
}

pub const DEVICE_DESCRIPTOR: [u8; 18] = [
    18, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 64, 0xed, 0xfe, 0x2f, 0x80, 0x00, 0x01, 1, 2, 3, 2,
];

pub const CONFIG_DESCRIPTOR: [u8; 9] = [9, 0x02, 9, 0, 0, 1, 0, 0xc0, 0x32];

pub const LANGUAGE_DESCRIPTOR: [u8; 4] = [4, 0x03, 0x09, 0x04];

pub const HID_REPORT_DESCRIPTOR: [u8; 6] = [0x05, 0x01, 0x09, 0x06, 0xa1, 0x01];

impl TestDescriptors {
    pub fn empty() -> Self {
        TestDescriptors {
            table: Vec::new(),
            program: Vec::new(),
            persistent: Vec::new(),
            program_reads: Cell::new(0),
            persistent_reads: Cell::new(0),
        }
    }

    /// Device descriptor (two configurations) and configuration descriptor stored in `space`,
    /// the language table and an interface-addressed HID report descriptor in RAM.
    pub fn standard(space: AddressSpace) -> Self {
        let mut descriptors = Self::empty();
        descriptors.insert(0x0100, 0, space, &DEVICE_DESCRIPTOR);
        descriptors.insert(0x0200, 0, space, &CONFIG_DESCRIPTOR);
        descriptors.insert(0x0300, 0, AddressSpace::Linear, &LANGUAGE_DESCRIPTOR);
        descriptors.insert(0x2200, 0, AddressSpace::Linear, &HID_REPORT_DESCRIPTOR);
        descriptors
    }

    pub fn insert(&mut self, value: u16, index: u16, space: AddressSpace, bytes: &[u8]) {
        let stored = match space {
            AddressSpace::Linear => Stored::Linear(bytes.to_vec()),
            AddressSpace::Program => {
                let address = self.program.len() as u16;
                self.program.extend_from_slice(bytes);
                Stored::Program(address, bytes.len() as u16)
            }
            AddressSpace::Persistent => {
                let address = self.persistent.len() as u16;
                self.persistent.extend_from_slice(bytes);
                Stored::Persistent(address, bytes.len() as u16)
            }
        };
        self.table.push((value, index, stored));
    }
}

impl DescriptorProvider for TestDescriptors {
    fn get_descriptor(&self, value: u16, index: u16) -> Option<Descriptor<'_>> {
        self.table
            .iter()
            .find(|(v, i, _)| *v == value && *i == index)
            .map(|(_, _, stored)| match stored {
                Stored::Linear(bytes) => Descriptor::Linear(bytes),
                Stored::Program(address, len) => Descriptor::Program {
                    address: *address,
                    len: *len,
                },
                Stored::Persistent(address, len) => Descriptor::Persistent {
                    address: *address,
                    len: *len,
                },
            })
    }

    fn read_byte(&self, space: AddressSpace, address: u16) -> u8 {
        match space {
            AddressSpace::Program => {
                self.program_reads.set(self.program_reads.get() + 1);
                self.program[address as usize]
            }
            AddressSpace::Persistent => {
                self.persistent_reads.set(self.persistent_reads.get() + 1);
                self.persistent[address as usize]
            }
            AddressSpace::Linear => panic!("linear descriptors are read directly"),
        }
    }
}

pub const UNIQUE_ID: [u8; 10] = [0x12, 0xab, 0x00, 0xff, 0x5c, 0x01, 0x90, 0xe7, 0x3d, 0x48];

pub type TestDevice<'s> = UsbDevice<'s, MockBus<'s>, TestDescriptors, RecordingEvents, [u8; 10]>;

pub fn device_with(
    status: &DeviceStatus,
    descriptors: TestDescriptors,
    config: Config,
) -> TestDevice<'_> {
    status.attach();
    UsbDevice::new(
        MockBus::new(status),
        descriptors,
        RecordingEvents::default(),
        UNIQUE_ID,
        config,
        status,
    )
}

pub fn device(status: &DeviceStatus) -> TestDevice<'_> {
    device_with(
        status,
        TestDescriptors::standard(AddressSpace::Linear),
        Config::new(),
    )
}

pub fn setup(request_type: u8, request: u8, value: u16, index: u16, length: u16) -> [u8; 8] {
    let [v0, v1] = value.to_le_bytes();
    let [i0, i1] = index.to_le_bytes();
    let [l0, l1] = length.to_le_bytes();
    [request_type, request, v0, v1, i0, i1, l0, l1]
}

/// Runs one control transfer through the dispatcher.
pub fn request(device: &mut TestDevice<'_>, setup: [u8; 8]) -> Completion {
    device.bus_mut().load_setup(setup);
    device
        .process_control_request()
        .expect("SETUP packet should be readable")
}

pub fn set_address(device: &mut TestDevice<'_>, address: u8) -> Completion {
    request(device, setup(0x00, 5, address as u16, 0, 0))
}

pub fn set_configuration(device: &mut TestDevice<'_>, configuration: u8) -> Completion {
    request(device, setup(0x00, 9, configuration as u16, 0, 0))
}
