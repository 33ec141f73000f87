//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Stable unit identifier assigned by the host for the duration of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub i64);

/// 2D map position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or zero when the length is
    /// too small to divide by.
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > 1e-9 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::default()
        }
    }

    /// Absolute angle of the segment from this point to `other`
    pub fn angle_of_segment_to(&self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl std::ops::Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// Fold an angle into [-PI, PI]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut folded = angle % (2.0 * PI);
    if folded > PI {
        folded -= 2.0 * PI;
    } else if folded < -PI {
        folded += 2.0 * PI;
    }
    folded
}

/// Bearing of `target` relative to a unit at `position` facing `facing`.
///
/// Zero means dead ahead, positive is counter-clockwise, always in [-PI, PI].
pub fn relative_bearing(position: Point, facing: f64, target: Point) -> f64 {
    normalize_angle(position.angle_of_segment_to(target) - facing)
}
