use crate::payload::Payload;
use crate::{DecodedRecord, Result, Slot, WheelChannel};
use can_transport::CanId;

/// Decode rule shared by one or more identifiers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Family {
    WheelSpeed(WheelChannel),
    Secondary,
    Brake,
    Throttle,
    Engine,
    FuelUsage,
}

/// Static association of one identifier to its layout and display slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LayoutEntry {
    pub id: CanId,
    pub family: Family,
    pub slot: Slot,
    /// Full layout size in bytes, reserved bytes included.
    pub len: usize,
}

const fn std_id(raw: u16) -> CanId {
    match CanId::standard(raw) {
        Some(id) => id,
        None => unreachable!(),
    }
}

const fn entry(raw: u16, family: Family, slot: Slot, len: usize) -> LayoutEntry {
    LayoutEntry {
        id: std_id(raw),
        family,
        slot,
        len,
    }
}

/// Every identifier with a known layout.
pub static LAYOUTS: [LayoutEntry; 7] = [
    entry(0x0b0, Family::WheelSpeed(WheelChannel::A), Slot::WheelA, 6),
    entry(0x0b2, Family::WheelSpeed(WheelChannel::B), Slot::WheelB, 6),
    entry(0x0b4, Family::Secondary, Slot::Secondary, 8),
    entry(0x224, Family::Brake, Slot::Brake, 8),
    entry(0x2c1, Family::Throttle, Slot::Throttle, 8),
    entry(0x2c4, Family::Engine, Slot::Engine, 8),
    entry(0x398, Family::FuelUsage, Slot::Fuel, 2),
];

/// Layout for `id`, if it is one of the known identifiers.
pub fn lookup(id: CanId) -> Option<&'static LayoutEntry> {
    LAYOUTS.iter().find(|e| e.id == id)
}

impl LayoutEntry {
    /// Decode `data` with this entry's layout. Fails without reading anything when
    /// `data` is shorter than the layout.
    pub fn decode(&self, data: &[u8]) -> Result<DecodedRecord> {
        let p = Payload::checked(self.id, data, self.len)?;
        let record = match self.family {
            Family::WheelSpeed(channel) => DecodedRecord::WheelSpeed {
                channel,
                a: p.u16_be(0)?,
                b: p.u16_be(2)?,
                flags: p.u8(4)?,
                seq: p.u8(5)?,
            },
            // bytes 0..4 are padding
            Family::Secondary => DecodedRecord::Secondary {
                distance_a: p.u8(4)?,
                speed: p.u16_be(5)?,
                distance_b: p.u8(7)?,
            },
            Family::Brake => DecodedRecord::Brake { flags: p.u8(0)? },
            Family::Throttle => DecodedRecord::Throttle {
                flags0: p.u8(0)?,
                unk0: p.i16_be(1)?,
                unk1: p.i16_be(3)?,
                unk2: p.u8(5)?,
                throttle: p.i16_be(6)?,
            },
            // bytes 2, 4 and 5 are padding
            Family::Engine => DecodedRecord::Engine {
                rpm: p.u16_be(0)?,
                unk0: p.u8(3)?,
                unk1: p.u8(6)?,
                unk2: p.i8(7)?,
            },
            Family::FuelUsage => DecodedRecord::FuelUsage {
                fuel_usage: p.i16_be(0)?,
            },
        };
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeError;
    use std::collections::HashSet;

    fn id(raw: u16) -> CanId {
        CanId::standard(raw).unwrap()
    }

    fn decode(raw: u16, data: &[u8]) -> Result<DecodedRecord> {
        lookup(id(raw)).expect("known id").decode(data)
    }

    #[test]
    fn identifiers_are_unique() {
        let ids: HashSet<CanId> = LAYOUTS.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), LAYOUTS.len());
        let slots: HashSet<Slot> = LAYOUTS.iter().map(|e| e.slot).collect();
        assert_eq!(slots.len(), LAYOUTS.len());
        assert!(!slots.contains(&Slot::Unknown));
    }

    #[test]
    fn unknown_and_extended_ids_miss() {
        assert!(lookup(id(0x100)).is_none());
        assert!(lookup(CanId::extended(0x999).unwrap()).is_none());
        assert!(lookup(id(0x0b1)).is_none());
        assert!(lookup(CanId::extended(0x0b0).unwrap()).is_none());
    }

    #[test]
    fn wheel_channels_share_rule_but_not_slot() {
        let a = lookup(id(0x0b0)).unwrap();
        let b = lookup(id(0x0b2)).unwrap();
        assert_ne!(a.slot, b.slot);
        let data = [0x00, 0x64, 0x00, 0x5a, 0x12, 0x34];
        let ra = a.decode(&data).unwrap();
        let rb = b.decode(&data).unwrap();
        assert_eq!(
            ra,
            DecodedRecord::WheelSpeed {
                channel: WheelChannel::A,
                a: 100,
                b: 90,
                flags: 0x12,
                seq: 0x34
            }
        );
        assert_eq!(ra.to_string(), rb.to_string());
    }

    #[test]
    fn secondary_skips_padding() {
        let rec = decode(0x0b4, &[0xde, 0xad, 0xbe, 0xef, 3, 0x01, 0x02, 9]).unwrap();
        assert_eq!(
            rec,
            DecodedRecord::Secondary {
                distance_a: 3,
                speed: 0x0102,
                distance_b: 9
            }
        );
    }

    #[test]
    fn throttle_fields() {
        let rec = decode(0x2c1, &[0x08, 0xff, 0xfd, 0x00, 0xfa, 0xc8, 0x01, 0x2c]).unwrap();
        assert_eq!(
            rec,
            DecodedRecord::Throttle {
                flags0: 0x08,
                unk0: -3,
                unk1: 250,
                unk2: 0xc8,
                throttle: 300
            }
        );
    }

    #[test]
    fn engine_fields() {
        let rec = decode(0x2c4, &[0x09, 0xc4, 0xaa, 60, 0xbb, 0xcc, 65, 0xfe]).unwrap();
        assert_eq!(
            rec,
            DecodedRecord::Engine {
                rpm: 2500,
                unk0: 60,
                unk1: 65,
                unk2: -2
            }
        );
    }

    #[test]
    fn fuel_and_brake() {
        assert_eq!(
            decode(0x398, &[0x00, 0x0A]).unwrap(),
            DecodedRecord::FuelUsage { fuel_usage: 10 }
        );
        assert_eq!(
            decode(0x224, &[0x01, 0, 0, 0, 0, 0, 0, 0]).unwrap(),
            DecodedRecord::Brake { flags: 1 }
        );
    }

    #[test]
    fn longer_payloads_ignore_trailing_bytes() {
        assert_eq!(
            decode(0x398, &[0x00, 0x0A, 0xff, 0xff]).unwrap(),
            DecodedRecord::FuelUsage { fuel_usage: 10 }
        );
    }

    #[test]
    fn every_layout_rejects_every_short_length() {
        for e in &LAYOUTS {
            let full = [0x5a_u8; 8];
            for got in 0..e.len {
                let err = e.decode(&full[..got]).unwrap_err();
                assert_eq!(
                    err,
                    DecodeError::TruncatedPayload {
                        id: e.id,
                        needed: e.len,
                        got
                    }
                );
            }
            assert!(e.decode(&full[..e.len]).is_ok());
        }
    }

    #[test]
    fn decoding_is_deterministic() {
        let mut data = [0u8; 8];
        for seed in 0u8..=255 {
            for (i, b) in data.iter_mut().enumerate() {
                *b = seed.wrapping_mul(31).wrapping_add(i as u8 * 17);
            }
            for e in &LAYOUTS {
                assert_eq!(e.decode(&data), e.decode(&data));
            }
        }
    }
}
