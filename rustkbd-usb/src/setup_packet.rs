use crate::{request_type::BmRequestType, EndpointBus};

/// Header of a control transfer, decoded from the 8 bytes of the SETUP stage.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetupPacket {
    pub bmRequestType: BmRequestType,
    pub bRequest: u8,
    pub wValue: u16,
    pub wIndex: u16,
    pub wLength: u16,
}

impl SetupPacket {
    pub const SIZE: usize = 8;

    /// Reads the header one byte at a time from the control endpoint.
    ///
    /// The SETUP condition is left pending; acknowledging it is up to whoever
    /// services the request.
    pub fn read<B: EndpointBus>(bus: &mut B) -> Result<Self, B::Error> {
        let mut buf = [0u8; Self::SIZE];
        for b in buf.iter_mut() {
            *b = nb::block!(bus.read_setup_byte())?;
        }
        Ok(Self::from_bytes(buf))
    }

    pub fn from_bytes(buf: [u8; Self::SIZE]) -> Self {
        SetupPacket {
            bmRequestType: BmRequestType::from_bits(buf[0]),
            bRequest: buf[1],
            wValue: u16::from_le_bytes([buf[2], buf[3]]),
            wIndex: u16::from_le_bytes([buf[4], buf[5]]),
            wLength: u16::from_le_bytes([buf[6], buf[7]]),
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let [v0, v1] = self.wValue.to_le_bytes();
        let [i0, i1] = self.wIndex.to_le_bytes();
        let [l0, l1] = self.wLength.to_le_bytes();
        let ty = self.bmRequestType.bits();
        [ty, self.bRequest, v0, v1, i0, i1, l0, l1]
    }

    /// Descriptor type carried in the high byte of `wValue`.
    #[inline]
    pub fn descriptor_type(&self) -> u8 {
        (self.wValue >> 8) as u8
    }

    /// Descriptor index carried in the low byte of `wValue`.
    #[inline]
    pub fn descriptor_index(&self) -> u8 {
        (self.wValue & 0xff) as u8
    }
}
