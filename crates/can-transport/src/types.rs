use core::fmt;
use time::OffsetDateTime;

/// 11-bit or 29-bit CAN identifier
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CanId {
    raw: u32,
    extended: bool,
}

impl CanId {
    pub const fn standard(id11: u16) -> Option<Self> {
        if id11 <= 0x7FF {
            Some(Self {
                raw: id11 as u32,
                extended: false,
            })
        } else {
            None
        }
    }

    pub const fn extended(id29: u32) -> Option<Self> {
        if id29 <= 0x1FFF_FFFF {
            Some(Self {
                raw: id29,
                extended: true,
            })
        } else {
            None
        }
    }

    pub fn raw(&self) -> u32 {
        self.raw
    }
    pub fn is_extended(&self) -> bool {
        self.extended
    }
}

impl fmt::Display for CanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extended {
            write!(f, "0x{raw:08X}", raw = self.raw)
        } else {
            write!(f, "0x{raw:03X}", raw = self.raw)
        }
    }
}

/// Bare hex of the raw identifier, honouring width/fill flags (`{:02x}`).
impl fmt::LowerHex for CanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.raw, f)
    }
}

/// A classic CAN data frame (up to 8 payload bytes)
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CanFrame {
    pub id: CanId,
    pub len: u8,
    pub data: [u8; 8],
    pub rtr: bool,
    pub timestamp: Option<Timestamp>,
}

impl CanFrame {
    pub fn new(id: CanId, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None;
        }
        let mut buf = [0u8; 8];
        buf[..data.len()].copy_from_slice(data);
        Some(Self {
            id,
            len: data.len() as u8,
            data: buf,
            rtr: false,
            timestamp: None,
        })
    }

    /// The received bytes, exactly `len` of them.
    pub fn payload(&self) -> &[u8] {
        let len = usize::from(self.len).min(self.data.len());
        &self.data[..len]
    }

    pub fn stamped_now(mut self) -> Self {
        self.timestamp = Some(Timestamp(OffsetDateTime::now_utc()));
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Timestamp(pub OffsetDateTime);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_id_range() {
        assert!(CanId::standard(0x7FF).is_some());
        assert!(CanId::standard(0x800).is_none());
        assert!(CanId::extended(0x1FFF_FFFF).is_some());
        assert!(CanId::extended(0x2000_0000).is_none());
    }

    #[test]
    fn extended_flag_is_part_of_identity() {
        let std_id = CanId::standard(0x0b0).unwrap();
        let ext_id = CanId::extended(0x0b0).unwrap();
        assert_eq!(std_id.raw(), ext_id.raw());
        assert_ne!(std_id, ext_id);
    }

    #[test]
    fn display_and_hex() {
        let id = CanId::standard(0x2c4).unwrap();
        assert_eq!(id.to_string(), "0x2C4");
        assert_eq!(format!("{id:02x}"), "2c4");
        let small = CanId::standard(0x5).unwrap();
        assert_eq!(format!("{small:02x}"), "05");
        let ext = CanId::extended(0x18FEF100).unwrap();
        assert_eq!(ext.to_string(), "0x18FEF100");
    }

    #[test]
    fn frame_payload_respects_len() {
        let id = CanId::standard(0x398).unwrap();
        let f = CanFrame::new(id, &[0x00, 0x0A]).unwrap();
        assert_eq!(f.len, 2);
        assert_eq!(f.payload(), &[0x00, 0x0A]);
        assert!(CanFrame::new(id, &[0u8; 9]).is_none());
        assert!(CanFrame::new(id, &[]).unwrap().payload().is_empty());
    }
}
