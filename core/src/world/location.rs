//! World positions
//!
//! Spawner anchors persist as an opaque `world,x,y,z` string, so `Location`
//! implements `Display` and `FromStr` over exactly that shape.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::LocationParseError;

/// A point in a named world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }

    /// Euclidean distance, or `None` when the two points are in different worlds
    pub fn distance(&self, other: &Location) -> Option<f64> {
        if self.world != other.world {
            return None;
        }
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        Some((dx * dx + dy * dy + dz * dz).sqrt())
    }

    /// Copy of this location shifted by the given offsets
    pub fn offset(&self, dx: f64, dy: f64, dz: f64) -> Location {
        Location {
            world: self.world.clone(),
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.world, self.x, self.y, self.z)
    }
}

impl FromStr for Location {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(LocationParseError::WrongArity { found: parts.len() });
        }
        if parts[0].is_empty() {
            return Err(LocationParseError::MissingWorld);
        }

        let coord = |field: &'static str, value: &str| {
            value
                .parse::<f64>()
                .map_err(|_| LocationParseError::InvalidNumber {
                    field,
                    value: value.to_string(),
                })
        };

        Ok(Location {
            world: parts[0].to_string(),
            x: coord("x", parts[1])?,
            y: coord("y", parts[2])?,
            z: coord("z", parts[3])?,
        })
    }
}
