//! Which dimensions a box carries.
//!
//! A box may have a spatial extent (X and Y, always together), a Z extent, a
//! time extent, and may be geodetic. Two-box operations only look at the
//! dimensions both boxes carry, see [`Dimensions::common`].

use serde::{Deserialize, Serialize};

const FLAG_X: u8 = 0x01;
const FLAG_Z: u8 = 0x02;
const FLAG_T: u8 = 0x04;
const FLAG_GEODETIC: u8 = 0x08;

/// The dimension flags of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    x: bool,
    z: bool,
    t: bool,
    geodetic: bool,
}

impl Dimensions {
    pub const fn new(x: bool, z: bool, t: bool, geodetic: bool) -> Self {
        Self { x, z, t, geodetic }
    }

    pub const fn has_x(&self) -> bool {
        self.x
    }

    pub const fn has_z(&self) -> bool {
        self.z
    }

    pub const fn has_t(&self) -> bool {
        self.t
    }

    pub const fn is_geodetic(&self) -> bool {
        self.geodetic
    }

    pub fn set_x(&mut self, x: bool) {
        self.x = x;
    }

    pub fn set_z(&mut self, z: bool) {
        self.z = z;
    }

    pub fn set_t(&mut self, t: bool) {
        self.t = t;
    }

    pub fn set_geodetic(&mut self, geodetic: bool) {
        self.geodetic = geodetic;
    }

    /// Whether the Z bounds are meaningful. Geodetic boxes always carry a Z
    /// extent, even without the Z flag.
    pub const fn has_z_extent(&self) -> bool {
        self.z || self.geodetic
    }

    /// At least one of X or T is present.
    pub const fn has_any(&self) -> bool {
        self.x || self.t
    }

    /// Per-flag logical AND: the dimensions both boxes can be compared on.
    pub const fn common(self, other: Dimensions) -> Dimensions {
        Dimensions {
            x: self.x && other.x,
            z: self.z && other.z,
            t: self.t && other.t,
            geodetic: self.geodetic && other.geodetic,
        }
    }

    /// Same X, Z and T flags. Geodetic-ness is checked separately.
    pub const fn same_dimensionality(self, other: Dimensions) -> bool {
        self.x == other.x && self.z == other.z && self.t == other.t
    }

    /// Packed form used by the binary layout and the ordering comparator.
    pub const fn to_bits(self) -> u8 {
        let mut bits = 0;
        if self.x {
            bits |= FLAG_X;
        }
        if self.z {
            bits |= FLAG_Z;
        }
        if self.t {
            bits |= FLAG_T;
        }
        if self.geodetic {
            bits |= FLAG_GEODETIC;
        }
        bits
    }

    /// Inverse of [`Dimensions::to_bits`]; `None` when unknown bits are set.
    pub const fn from_bits(bits: u8) -> Option<Dimensions> {
        if bits & !(FLAG_X | FLAG_Z | FLAG_T | FLAG_GEODETIC) != 0 {
            return None;
        }
        Some(Dimensions {
            x: bits & FLAG_X != 0,
            z: bits & FLAG_Z != 0,
            t: bits & FLAG_T != 0,
            geodetic: bits & FLAG_GEODETIC != 0,
        })
    }
}
