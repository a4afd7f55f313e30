use core::fmt::{Display, Formatter};

/// EISA-style compressed PnP identifier, e.g. `PNP0A03`.
///
/// Stored in the byte order it is read from a card's serial identifier: three 5-bit letters
/// packed into the first two bytes (bit 7 of byte 0 reserved), then four hex digits of product
/// id and revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PnpId([u8; 4]);

impl PnpId {
    pub const fn from_bytes(bytes: [u8; 4]) -> PnpId {
        PnpId(bytes)
    }

    /// Little-endian 32-bit form, as found in resource data and ACPI tables.
    pub const fn from_compressed(value: u32) -> PnpId {
        PnpId(value.to_le_bytes())
    }

    pub const fn compressed(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    /// Parse the 7-character textual form (`AAA####`).
    pub fn parse(text: &str) -> Option<PnpId> {
        let bytes = text.as_bytes();
        if bytes.len() != 7 {
            return None;
        }
        let mut letters = [0u8; 3];
        for (slot, ch) in letters.iter_mut().zip(&bytes[..3]) {
            if !ch.is_ascii_uppercase() {
                return None;
            }
            *slot = ch - b'@';
        }
        if !bytes[3..].iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        let product = u16::from_str_radix(text.get(3..)?, 16).ok()?;
        let [hi, lo] = product.to_be_bytes();
        Some(PnpId([
            (letters[0] << 2) | (letters[1] >> 3),
            ((letters[1] & 0x07) << 5) | letters[2],
            hi,
            lo,
        ]))
    }

    fn letters(&self) -> [char; 3] {
        let [b0, b1, _, _] = self.0;
        let codes = [
            (b0 >> 2) & 0x1f,
            ((b0 & 0x03) << 3) | (b1 >> 5),
            b1 & 0x1f,
        ];
        codes.map(|code| char::from(b'@' + code))
    }
}

impl Display for PnpId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let [a, b, c] = self.letters();
        write!(f, "{}{}{}{:02X}{:02X}", a, b, c, self.0[2], self.0[3])
    }
}

/// Identity of one logical device: the card it sits on (vendor id + serial) and its function
/// number on that card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogicalDeviceId {
    pub vendor: PnpId,
    pub serial: u32,
    pub function: u8,
}

#[cfg(test)]
mod tests {
    use super::PnpId;
    use alloc::string::ToString;

    #[test]
    fn test_known_compressed_id() {
        let id = PnpId::from_compressed(0x030A_D041);
        assert_eq!(id.to_string(), "PNP0A03");
        assert_eq!(PnpId::parse("PNP0A03"), Some(id));
        assert_eq!(id.compressed(), 0x030A_D041);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(PnpId::parse("PNP0A0"), None);
        assert_eq!(PnpId::parse("pnp0A03"), None);
        assert_eq!(PnpId::parse("PNP0G03"), None);
        assert_eq!(PnpId::parse("PN10A03"), None);
        assert_eq!(PnpId::parse("PNP+A03"), None);
        assert_eq!(PnpId::parse("PNP 0A0"), None);
    }

    #[test]
    fn test_display_parse_agree() {
        for text in ["CTL0031", "ABC1234", "ZZZFFFF", "AAA0000"] {
            assert_eq!(PnpId::parse(text).map(|id| id.to_string()).as_deref(), Some(text));
        }
    }
}
