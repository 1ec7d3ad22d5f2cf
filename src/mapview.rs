//! Initial view helpers for interactive maps.
//!
//! Interactive maps open centred on the data with a zoom level that roughly
//! fits its bounds. Bounds are expected in geographic coordinates (EPSG:4326).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Result, ResplotError};

/// A bounding box in longitude/latitude degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// The whole globe, used when only a CRS is known
    pub const WORLD: Bounds = Bounds {
        min_x: -180.0,
        min_y: -90.0,
        max_x: 180.0,
        max_y: 90.0,
    };

    /// Create bounds, rejecting empty or non-finite boxes
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        if [min_x, min_y, max_x, max_y].iter().any(|v| !v.is_finite()) {
            return Err(ResplotError::InvalidParameter {
                param: "bounds".to_string(),
                message: "Bounds must be finite numbers".to_string(),
            });
        }

        if min_x >= max_x || min_y >= max_y {
            return Err(ResplotError::InvalidParameter {
                param: "bounds".to_string(),
                message: format!(
                    "Minimum must be below maximum: ({}, {}) vs ({}, {})",
                    min_x, min_y, max_x, max_y
                ),
            });
        }

        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Parse a bounding box string "min_x,min_y,max_x,max_y"
    pub fn parse(bounds: &str) -> Result<Self> {
        let parts: Vec<&str> = bounds.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ResplotError::InvalidParameter {
                param: "bounds".to_string(),
                message: "Bounds must be in format 'min_x,min_y,max_x,max_y'".to_string(),
            });
        }

        let mut values = [0.0f64; 4];
        for ((value, part), name) in values
            .iter_mut()
            .zip(&parts)
            .zip(["min_x", "min_y", "max_x", "max_y"])
        {
            *value = part
                .parse::<f64>()
                .map_err(|_| ResplotError::InvalidParameter {
                    param: "bounds".to_string(),
                    message: format!("Invalid {}: {}", name, part),
                })?;
        }

        Self::new(values[0], values[1], values[2], values[3])
    }

    /// Centre of the box as (latitude, longitude)
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_y + self.max_y) / 2.0,
            (self.min_x + self.max_x) / 2.0,
        )
    }

    /// Approximate web-map zoom level that fits the box
    pub fn zoom(&self) -> i32 {
        let span = (self.max_x - self.min_x).max(self.max_y - self.min_y);
        (360.0 / span).log2() as i32 + 1
    }
}

impl FromStr for Bounds {
    type Err = ResplotError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Bounds::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounds() {
        let bounds = Bounds::parse("3.2, 50.7, 7.3, 53.6").unwrap();
        assert_eq!(bounds.min_x, 3.2);
        assert_eq!(bounds.max_y, 53.6);
        assert!("1,2,3".parse::<Bounds>().is_err());
        assert!(Bounds::parse("a,2,3,4").is_err());
        assert!(Bounds::parse("5,2,3,4").is_err());
    }

    #[test]
    fn test_center() {
        let bounds = Bounds::new(4.0, 52.0, 6.0, 54.0).unwrap();
        assert_eq!(bounds.center(), (53.0, 5.0));
    }

    #[test]
    fn test_zoom() {
        assert_eq!(Bounds::WORLD.zoom(), 1);
        // 360 / 4 = 90 -> log2 = 6.49 -> 6 + 1
        assert_eq!(Bounds::new(3.0, 51.0, 7.0, 53.0).unwrap().zoom(), 7);
        assert_eq!(Bounds::new(0.0, 0.0, 1.0, 1.0).unwrap().zoom(), 9);
    }
}
