use crate::{DecodeError, Result};
use can_transport::CanId;

/// Length-checked view of a frame payload with big-endian field readers.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Payload<'a> {
    id: CanId,
    bytes: &'a [u8],
}

impl<'a> Payload<'a> {
    /// Accept `bytes` only if it covers a layout of `needed` bytes.
    pub(crate) fn checked(id: CanId, bytes: &'a [u8], needed: usize) -> Result<Self> {
        if bytes.len() < needed {
            return Err(DecodeError::TruncatedPayload {
                id,
                needed,
                got: bytes.len(),
            });
        }
        Ok(Self { id, bytes })
    }

    fn array<const N: usize>(&self, at: usize) -> Result<[u8; N]> {
        at.checked_add(N)
            .and_then(|end| self.bytes.get(at..end))
            .and_then(|s| <[u8; N]>::try_from(s).ok())
            .ok_or(DecodeError::TruncatedPayload {
                id: self.id,
                needed: at.saturating_add(N),
                got: self.bytes.len(),
            })
    }

    pub(crate) fn u8(&self, at: usize) -> Result<u8> {
        self.array::<1>(at).map(|[b]| b)
    }

    pub(crate) fn i8(&self, at: usize) -> Result<i8> {
        self.array::<1>(at).map(i8::from_be_bytes)
    }

    pub(crate) fn u16_be(&self, at: usize) -> Result<u16> {
        self.array::<2>(at).map(u16::from_be_bytes)
    }

    pub(crate) fn i16_be(&self, at: usize) -> Result<i16> {
        self.array::<2>(at).map(i16::from_be_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> CanId {
        CanId::standard(0x123).unwrap()
    }

    #[test]
    fn multi_byte_fields_are_big_endian() {
        let p = Payload::checked(id(), &[0x01, 0x02], 2).unwrap();
        assert_eq!(p.u16_be(0).unwrap(), 0x0102);
        assert_eq!(p.i16_be(0).unwrap(), 0x0102);
    }

    #[test]
    fn signed_fields_keep_sign() {
        let p = Payload::checked(id(), &[0xFF, 0xFE, 0x80], 3).unwrap();
        assert_eq!(p.i16_be(0).unwrap(), -2);
        assert_eq!(p.u16_be(0).unwrap(), 0xFFFE);
        assert_eq!(p.i8(2).unwrap(), -128);
        assert_eq!(p.u8(2).unwrap(), 0x80);
    }

    #[test]
    fn short_payload_is_rejected_up_front() {
        let err = Payload::checked(id(), &[0x01], 2).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedPayload {
                id: id(),
                needed: 2,
                got: 1
            }
        );
    }

    #[test]
    fn reads_past_the_end_fail_instead_of_panicking() {
        let p = Payload::checked(id(), &[0x01, 0x02], 0).unwrap();
        assert!(p.u16_be(1).is_err());
        assert!(p.u8(2).is_err());
        assert!(p.u8(usize::MAX).is_err());
    }
}
