use usb_device::descriptor::descriptor_type;

/// Number of hex characters in the synthesized serial number.
pub const SERIAL_NUMBER_CHARS: usize = 20;

const SERIAL_DESCRIPTOR_LEN: usize = 2 + SERIAL_NUMBER_CHARS * 2;

/// Factory-programmed identifier of the chip, one byte per offset.
pub trait UniqueId {
    fn read_byte(&self, offset: u8) -> u8;
}

impl UniqueId for [u8; SERIAL_NUMBER_CHARS / 2] {
    fn read_byte(&self, offset: u8) -> u8 {
        self[offset as usize]
    }
}

fn nibble_to_ascii(nibble: u8) -> u8 {
    match nibble & 0x0f {
        n @ 0..=9 => b'0' + n,
        n => b'A' + (n - 10),
    }
}

/// Expands the first 10 bytes of the unique ID into 20 upper-case hex characters,
/// low nibble of each byte first.
///
/// Both nibbles of a byte come from the same read address, so the whole sequence runs
/// inside a critical section.
pub fn serial_number<U: UniqueId + ?Sized>(unique_id: &U) -> [u8; SERIAL_NUMBER_CHARS] {
    let mut chars = [0u8; SERIAL_NUMBER_CHARS];
    critical_section::with(|_| {
        let mut offset = 0u8;
        for (i, c) in chars.iter_mut().enumerate() {
            let mut byte = unique_id.read_byte(offset);
            if i & 0x01 != 0 {
                byte >>= 4;
                offset += 1;
            }
            *c = nibble_to_ascii(byte);
        }
    });
    chars
}

/// String descriptor carrying [`serial_number`] as UTF-16LE.
pub(crate) fn serial_number_descriptor<U: UniqueId + ?Sized>(
    unique_id: &U,
) -> [u8; SERIAL_DESCRIPTOR_LEN] {
    let mut descr = [0u8; SERIAL_DESCRIPTOR_LEN];
    descr[0] = SERIAL_DESCRIPTOR_LEN as u8;
    descr[1] = descriptor_type::STRING;
    let chars = serial_number(unique_id);
    for (dst, c) in descr[2..].chunks_exact_mut(2).zip(chars) {
        dst.copy_from_slice(&(c as u16).to_le_bytes());
    }
    descr
}
