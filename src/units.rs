use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

/// A length on a raster page, in pixels. Page coordinates have their origin at the
/// top-left corner of the page and `y` grows downward.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Display,
    From,
    Into,
)]
#[display("{_0}px")]
pub struct Px(pub f32);

impl Px {
    /// The larger of two lengths
    pub fn max(self, other: Px) -> Px {
        Px(self.0.max(other.0))
    }

    /// The smaller of two lengths
    pub fn min(self, other: Px) -> Px {
        Px(self.0.min(other.0))
    }

    /// Round down to a whole pixel
    pub fn floor(self) -> Px {
        Px(self.0.floor())
    }
}

impl Mul<f32> for Px {
    type Output = Px;

    fn mul(self, rhs: f32) -> Px {
        Px(self.0 * rhs)
    }
}

impl Div<f32> for Px {
    type Output = Px;

    fn div(self, rhs: f32) -> Px {
        Px(self.0 / rhs)
    }
}

impl Div<Px> for Px {
    type Output = f32;

    fn div(self, rhs: Px) -> f32 {
        self.0 / rhs.0
    }
}

impl Neg for Px {
    type Output = Px;

    fn neg(self) -> Px {
        Px(-self.0)
    }
}

impl From<u32> for Px {
    fn from(value: u32) -> Self {
        Px(value as f32)
    }
}

/// A length in PDF points (1/72 inch), used only when placing finished pages into a PDF
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Display, From, Into)]
#[display("{_0}pt")]
pub struct Pt(pub f32);
