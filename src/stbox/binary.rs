//! Fixed-size binary record of a box.
//!
//! Layout (little-endian):
//!
//! | offset | size | field                                  |
//! |--------|------|----------------------------------------|
//! | 0      | 48   | xmin, xmax, ymin, ymax, zmin, zmax f64 |
//! | 48     | 16   | tmin, tmax i64 (microseconds)          |
//! | 64     | 4    | srid i32                               |
//! | 68     | 1    | flags                                  |
//! | 69     | 3    | zero padding                           |

use super::STBox;
use crate::error::{Result, StboxError};
use crate::flags::Dimensions;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use stbox_types::temporal::Timestamp;

/// Length in bytes of an encoded box.
pub const ENCODED_LEN: usize = 72;

const PADDING_LEN: usize = 3;

impl STBox {
    /// Encode into the fixed 72-byte record.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(ENCODED_LEN);
        for v in [self.xmin, self.xmax, self.ymin, self.ymax, self.zmin, self.zmax] {
            buf.put_f64_le(v);
        }
        buf.put_i64_le(self.tmin.as_micros());
        buf.put_i64_le(self.tmax.as_micros());
        buf.put_i32_le(self.srid);
        buf.put_u8(self.dims.to_bits());
        buf.put_bytes(0, PADDING_LEN);
        buf.freeze()
    }

    /// Decode a record produced by [`STBox::to_bytes`].
    ///
    /// Records with an impossible flag combination or inverted bounds are
    /// rejected rather than normalized.
    pub fn from_bytes(data: &[u8]) -> Result<STBox> {
        if data.len() != ENCODED_LEN {
            return Err(StboxError::MalformedInput(format!(
                "Encoded box must be {} bytes, got {}",
                ENCODED_LEN,
                data.len()
            )));
        }
        let mut buf = data;
        let xmin = buf.get_f64_le();
        let xmax = buf.get_f64_le();
        let ymin = buf.get_f64_le();
        let ymax = buf.get_f64_le();
        let zmin = buf.get_f64_le();
        let zmax = buf.get_f64_le();
        let tmin = Timestamp::from_micros(buf.get_i64_le());
        let tmax = Timestamp::from_micros(buf.get_i64_le());
        let srid = buf.get_i32_le();
        let bits = buf.get_u8();
        let dims = Dimensions::from_bits(bits).ok_or_else(|| {
            StboxError::MalformedInput(format!("Unknown flag bits in encoded box: {:#04x}", bits))
        })?;
        STBox {
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
            tmin,
            tmax,
            srid,
            dims,
        }
        .checked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let b = STBox::xyzt(
            1.0,
            2.0,
            3.0,
            Timestamp::from_micros(10),
            4.0,
            5.0,
            6.0,
            Timestamp::from_micros(20),
        )
        .with_srid(3857);
        let bytes = b.to_bytes();
        assert_eq!(bytes.len(), ENCODED_LEN);
        assert_eq!(&bytes[0..8], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[8..16], &4.0f64.to_le_bytes());
        assert_eq!(&bytes[48..56], &10i64.to_le_bytes());
        assert_eq!(&bytes[64..68], &3857i32.to_le_bytes());
        assert_eq!(bytes[68], 0x07);
        assert_eq!(&bytes[69..], &[0, 0, 0]);
        assert_eq!(STBox::from_bytes(&bytes).unwrap(), b);
    }

    #[test]
    fn test_geodetic_flags_survive() {
        let b = STBox::geodetic(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let decoded = STBox::from_bytes(&b.to_bytes()).unwrap();
        assert!(decoded.is_geodetic() && !decoded.has_z());
        assert_eq!(decoded.srid(), 4326);
    }

    #[test]
    fn test_rejects_bad_records() {
        let bytes = STBox::xy(0.0, 0.0, 1.0, 1.0).to_bytes();
        assert!(matches!(
            STBox::from_bytes(&bytes[..71]),
            Err(StboxError::MalformedInput(_))
        ));

        let mut corrupt = bytes.to_vec();
        corrupt[68] = 0x30;
        assert!(matches!(
            STBox::from_bytes(&corrupt),
            Err(StboxError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_rejects_impossible_flag_combinations() {
        let bytes = STBox::xy(0.0, 0.0, 1.0, 1.0).to_bytes();
        // Z alone, nothing at all, geodetic alone, geodetic time without X
        for flags in [0x02, 0x00, 0x08, 0x0c] {
            let mut corrupt = bytes.to_vec();
            corrupt[68] = flags;
            assert!(
                matches!(STBox::from_bytes(&corrupt), Err(StboxError::MalformedInput(_))),
                "flags {:#04x}",
                flags
            );
        }
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let bytes = STBox::xy(0.0, 0.0, 1.0, 1.0).to_bytes();
        let mut corrupt = bytes.to_vec();
        corrupt[0..8].copy_from_slice(&5.0f64.to_le_bytes());
        assert_eq!(
            STBox::from_bytes(&corrupt),
            Err(StboxError::MalformedInput("Box has xmin greater than xmax".to_string()))
        );

        let t = STBox::t(Timestamp::from_micros(10), Timestamp::from_micros(20)).to_bytes();
        let mut corrupt = t.to_vec();
        corrupt[48..56].copy_from_slice(&30i64.to_le_bytes());
        assert!(STBox::from_bytes(&corrupt).is_err());
    }

    #[test]
    fn test_absent_axes_are_zeroed() {
        let mut bytes = STBox::t(Timestamp::from_micros(10), Timestamp::from_micros(20))
            .to_bytes()
            .to_vec();
        bytes[0..8].copy_from_slice(&7.0f64.to_le_bytes());
        bytes[64..68].copy_from_slice(&3857i32.to_le_bytes());
        let decoded = STBox::from_bytes(&bytes).unwrap();
        assert_eq!(
            decoded,
            STBox::t(Timestamp::from_micros(10), Timestamp::from_micros(20))
        );
        assert_eq!(decoded.srid(), 0);
    }
}
