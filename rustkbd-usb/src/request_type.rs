/// The `bmRequestType` byte of a SETUP packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BmRequestType(u8);

impl BmRequestType {
    const DIRECTION_MASK: u8 = 0x80;
    const TYPE_MASK: u8 = 0x60;
    const RECIPIENT_MASK: u8 = 0x1f;

    #[inline]
    pub const fn new(direction: Direction, request_type: Type, recipient: Recipient) -> Self {
        BmRequestType(direction as u8 | ((request_type as u8) << 5) | recipient as u8)
    }

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        BmRequestType(bits)
    }

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        if self.bits() & Self::DIRECTION_MASK == 0 {
            Direction::HostToDevice
        } else {
            Direction::DeviceToHost
        }
    }

    #[inline]
    pub fn request_type(&self) -> Type {
        match (self.bits() & Self::TYPE_MASK) >> 5 {
            0 => Type::Standard,
            1 => Type::Class,
            2 => Type::Vendor,
            _ => Type::Reserved,
        }
    }

    #[inline]
    pub fn recipient(&self) -> Recipient {
        match self.bits() & Self::RECIPIENT_MASK {
            0 => Recipient::Device,
            1 => Recipient::Interface,
            2 => Recipient::Endpoint,
            3 => Recipient::Other,
            _ => Recipient::Reserved,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Direction {
    HostToDevice = 0x00,
    DeviceToHost = 0x80,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Type {
    Standard = 0,
    Class = 1,
    Vendor = 2,
    Reserved = 3,
}

/// Recipient field. `Reserved` covers every value above 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Recipient {
    Device = 0,
    Interface = 1,
    Endpoint = 2,
    Other = 3,
    Reserved = 4,
}
