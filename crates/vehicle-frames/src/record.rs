use core::fmt;

/// Which of the two wheel-speed messages a record came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum WheelChannel {
    A,
    B,
}

/// One decoded payload, byte order already corrected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodedRecord {
    WheelSpeed {
        channel: WheelChannel,
        a: u16,
        b: u16,
        flags: u8,
        seq: u8,
    },
    /// Odometer-like reading on 0x0b4; field meanings are not fully known.
    Secondary {
        distance_a: u8,
        speed: u16,
        distance_b: u8,
    },
    Brake {
        flags: u8,
    },
    Throttle {
        /// bit 3 looks like engine braking
        flags0: u8,
        unk0: i16,
        unk1: i16,
        unk2: u8,
        throttle: i16,
    },
    Engine {
        rpm: u16,
        unk0: u8,
        unk1: u8,
        unk2: i8,
    },
    FuelUsage {
        fuel_usage: i16,
    },
}

impl DecodedRecord {
    /// Signed `a - b` for wheel-speed records, computed from this record alone.
    pub fn wheel_delta(&self) -> Option<i32> {
        match *self {
            DecodedRecord::WheelSpeed { a, b, .. } => Some(i32::from(a) - i32::from(b)),
            _ => None,
        }
    }

    pub fn brake_active(&self) -> Option<bool> {
        match *self {
            DecodedRecord::Brake { flags } => Some(flags != 0),
            _ => None,
        }
    }
}

// Column widths and the signed/unsigned presentation of a few fields follow the
// established dashboard layout, so lines keep their shape as values change.
impl fmt::Display for DecodedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DecodedRecord::WheelSpeed {
                a, b, flags, seq, ..
            } => {
                let delta = i32::from(a) - i32::from(b);
                write!(
                    f,
                    "wheel: a={a:5} b={b:5} (delta={delta:5}) flags={flags:02x} seq={seq:02x}"
                )
            }
            DecodedRecord::Secondary {
                distance_a,
                speed,
                distance_b,
            } => write!(
                f,
                "unk_b4: distance_a={distance_a:3} speed={speed:5} distance_b={distance_b:3}"
            ),
            DecodedRecord::Brake { flags } => {
                let marker = if flags != 0 { "ON" } else { "  " };
                write!(f, "brake: flags={flags:02x} [{marker}]")
            }
            DecodedRecord::Throttle {
                flags0,
                unk0,
                unk1,
                unk2,
                throttle,
            } => write!(
                f,
                "throttle: flags0={flags0:02x} unk0={unk0:5} unk1={unk1:5}, unk2={:03} throttle={:4}",
                unk2 as i8, throttle as u16
            ),
            DecodedRecord::Engine {
                rpm,
                unk0,
                unk1,
                unk2,
            } => write!(
                f,
                "engine: rpm={:5} unk0={unk0:3} unk1={unk1:3}, unk2={unk2:3}",
                rpm as i16
            ),
            DecodedRecord::FuelUsage { fuel_usage } => write!(f, "fuel_usage: {fuel_usage:5}"),
        }
    }
}
