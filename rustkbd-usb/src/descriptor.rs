use heapless::Vec;
use usb_device::descriptor::descriptor_type;

/// Memory a descriptor physically lives in. Each needs its own read primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressSpace {
    /// Directly addressable memory (RAM, or flash on unified-address targets).
    Linear,
    /// Program memory behind a dedicated load instruction.
    Program,
    /// Byte-wide persistent memory such as EEPROM.
    Persistent,
}

/// A located descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Descriptor<'a> {
    Linear(&'a [u8]),
    Program { address: u16, len: u16 },
    Persistent { address: u16, len: u16 },
}

impl<'a> Descriptor<'a> {
    pub fn address_space(&self) -> AddressSpace {
        match self {
            Descriptor::Linear(_) => AddressSpace::Linear,
            Descriptor::Program { .. } => AddressSpace::Program,
            Descriptor::Persistent { .. } => AddressSpace::Persistent,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Descriptor::Linear(bytes) => bytes.len(),
            Descriptor::Program { len, .. } | Descriptor::Persistent { len, .. } => *len as usize,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the byte at `offset` with the primitive matching the address space.
    pub fn byte_at<P>(&self, provider: &P, offset: usize) -> Option<u8>
    where
        P: DescriptorProvider + ?Sized,
    {
        if offset >= self.len() {
            return None;
        }
        let (space, address) = match *self {
            Descriptor::Linear(bytes) => return Some(bytes[offset]),
            Descriptor::Program { address, .. } => (AddressSpace::Program, address),
            Descriptor::Persistent { address, .. } => (AddressSpace::Persistent, address),
        };
        Some(provider.read_byte(space, address.wrapping_add(offset as u16)))
    }

    pub fn bytes<'p, P: DescriptorProvider + ?Sized>(
        &self,
        provider: &'p P,
    ) -> DescriptorBytes<'a, 'p, P> {
        DescriptorBytes {
            descriptor: *self,
            provider,
            offset: 0,
        }
    }
}

/// Iterator over the bytes of a [`Descriptor`], wherever they are stored.
pub struct DescriptorBytes<'a, 'p, P: ?Sized> {
    descriptor: Descriptor<'a>,
    provider: &'p P,
    offset: usize,
}

impl<'a, 'p, P: DescriptorProvider + ?Sized> Iterator for DescriptorBytes<'a, 'p, P> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let byte = self.descriptor.byte_at(self.provider, self.offset)?;
        self.offset += 1;
        Some(byte)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.descriptor.len().saturating_sub(self.offset);
        (remaining, Some(remaining))
    }
}

impl<'a, 'p, P: DescriptorProvider + ?Sized> ExactSizeIterator for DescriptorBytes<'a, 'p, P> {}

/// Descriptor storage supplied by the application.
pub trait DescriptorProvider {
    /// Looks up the descriptor selected by `value` (type in the high byte, index in the
    /// low byte) and `index` (language ID or interface number).
    fn get_descriptor(&self, value: u16, index: u16) -> Option<Descriptor<'_>>;

    /// Reads a single byte out of a non-linear address space.
    fn read_byte(&self, space: AddressSpace, address: u16) -> u8;
}

/// Builds a string descriptor holding `text` as UTF-16LE.
///
/// Returns `None` if the encoded descriptor does not fit in `N` bytes or exceeds the
/// 255 bytes a descriptor header can describe.
pub fn string_descriptor<const N: usize>(text: &str) -> Option<Vec<u8, N>> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&[0, descriptor_type::STRING]).ok()?;
    for unit in text.encode_utf16() {
        buf.extend_from_slice(&unit.to_le_bytes()).ok()?;
    }
    buf[0] = u8::try_from(buf.len()).ok()?;
    Some(buf)
}
