//! 2D vector value type
//!
//! Thin wrapper over `glam::DVec2` whose degenerate cases are total:
//! dividing by zero or normalizing a zero vector yields the zero vector.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.as_dvec2().length()
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.as_dvec2().length_squared()
    }

    /// Unit vector in the same direction, or zero for a zero vector
    pub fn normalized(self) -> Self {
        self.as_dvec2().normalize_or_zero().into()
    }

    #[inline]
    pub fn distance_to(self, other: Self) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }
}

impl From<DVec2> for Vector2D {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D> for DVec2 {
    fn from(v: Vector2D) -> Self {
        v.as_dvec2()
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        (self.as_dvec2() + rhs.as_dvec2()).into()
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        (self.as_dvec2() - rhs.as_dvec2()).into()
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        (self.as_dvec2() * scalar).into()
    }
}

impl Div<f64> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        if scalar == 0.0 {
            return Self::ZERO;
        }
        (self.as_dvec2() / scalar).into()
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
