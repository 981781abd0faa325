//! Angle newtypes, so degree and radian values don't get mixed up across module boundaries.
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A number of degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(f64);

/// A number of radians.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Radians(f64);

impl Degrees {
    pub const ZERO: Self = Self(0.0);
    pub const HALF_TURN: Self = Self(180.0);
    pub const FULL_TURN: Self = Self(360.0);

    #[inline]
    pub const fn new(degrees: f64) -> Self {
        Self(degrees)
    }

    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    #[inline]
    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }

    #[inline]
    pub fn max(self, other: Self) -> Self {
        std::cmp::max_by(self, other, |a, b| a.0.total_cmp(&b.0))
    }

    #[inline]
    pub fn min(self, other: Self) -> Self {
        std::cmp::min_by(self, other, |a, b| a.0.total_cmp(&b.0))
    }
}

impl Radians {
    #[inline]
    pub const fn new(radians: f64) -> Self {
        Self(radians)
    }

    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn sin_cos(self) -> (f64, f64) {
        self.0.sin_cos()
    }

    #[inline]
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0.to_degrees())
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // unicode character is the degrees symbol
        write!(f, "{}\u{00B0}", self.0)
    }
}

impl From<f64> for Degrees {
    #[inline]
    fn from(degrees: f64) -> Self {
        Self(degrees)
    }
}

impl Add for Degrees {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Degrees {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Degrees {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Degrees {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Degrees {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<f64> for Degrees {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Div<f64> for Degrees {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}

#[test]
fn test_degree_conversions() {
    let quarter = Degrees::new(90.0);
    assert!((quarter.to_radians().get() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert!((quarter.to_radians().to_degrees().get() - 90.0).abs() < 1e-12);

    assert_eq!(Degrees::new(-3.0).abs(), Degrees::new(3.0));
    assert_eq!(Degrees::new(1.0).max(Degrees::new(2.0)), Degrees::new(2.0));
    assert_eq!(Degrees::HALF_TURN * 2.0, Degrees::FULL_TURN);
    assert_eq!(format!("{}", Degrees::new(12.5)), "12.5\u{00B0}");
}
