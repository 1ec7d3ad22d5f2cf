//! Unit rescaling for plot coordinates.
//!
//! Coordinates are plotted in a "rescale unit" (kilometres by default for
//! projected CRSs, degrees for geographic ones). This module maps CRS unit
//! names to abbreviations and computes the factor that converts coordinates
//! from the CRS unit into the rescale unit.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{Result, ResplotError};

/// Full unit names (as reported by CRS axis info) and their abbreviations
const UNIT_ABBREVIATIONS: &[(&str, &str)] = &[
    ("millimetre", "mm"),
    ("centimetre", "cm"),
    ("decimetre", "dm"),
    ("metre", "m"),
    ("meter", "m"),
    ("decametre", "dam"),
    ("hectometre", "hm"),
    ("kilometre", "km"),
    ("foot", "ft"),
    ("feet", "ft"),
    ("inch", "in"),
    ("yard", "yd"),
    ("mile", "mi"),
    ("nautical_mile", "nmi"),
    ("degree", "deg"),
    ("arcsecond", "arcsec"),
    ("arcminute", "arcmin"),
    ("radian", "rad"),
];

/// Units per metre
const LENGTH_SCALES: &[(&str, f64)] = &[
    ("mm", 1000.0),
    ("cm", 100.0),
    ("dm", 10.0),
    ("m", 1.0),
    ("dam", 0.1),
    ("hm", 0.01),
    ("km", 0.001),
    ("ft", 3.28084),
    ("in", 39.3701),
    ("yd", 1.09361),
    ("mi", 0.000621371),
    ("nmi", 0.000539957),
];

/// Units per degree
const ANGLE_SCALES: &[(&str, f64)] = &[
    ("deg", 1.0),
    ("arcsec", 3600.0),
    ("arcmin", 60.0),
    ("rad", PI / 180.0),
];

/// Kind of quantity a unit measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFamily {
    Length,
    Angle,
}

impl UnitFamily {
    /// Rescale unit used when none is requested
    pub fn default_unit(self) -> &'static str {
        match self {
            UnitFamily::Length => "km",
            UnitFamily::Angle => "deg",
        }
    }
}

/// The parts of a coordinate reference system needed for rescaling and labels.
///
/// Resolving a CRS into this description is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrsDescription {
    /// CRS name, e.g. "Amersfoort / RD New"
    pub name: String,
    /// Unit name of the first axis, e.g. "metre"
    pub unit_name: String,
    /// Names of the x and y axes, e.g. ["Easting", "Northing"]
    pub axis_names: [String; 2],
}

/// Resolved rescale unit and scale factor
#[derive(Debug, Clone, PartialEq)]
pub struct RescaleParameters {
    /// Abbreviated target unit, `None` when no CRS is known
    pub unit: Option<String>,
    /// Multiply CRS coordinates by this to obtain target-unit coordinates
    pub factor: f64,
}

impl RescaleParameters {
    /// Parameters that leave coordinates untouched
    pub fn identity() -> Self {
        Self {
            unit: None,
            factor: 1.0,
        }
    }

    /// Rescale a single coordinate value
    pub fn apply(&self, value: f64) -> f64 {
        value * self.factor
    }

    /// Rescale axis limits such as `xlim`/`ylim`
    pub fn apply_limits(&self, limits: (f64, f64)) -> (f64, f64) {
        (self.apply(limits.0), self.apply(limits.1))
    }
}

/// Canonical abbreviation for a unit given by full name or abbreviation
pub fn unit_abbreviation(unit: &str) -> Result<&'static str> {
    let unit = unit.trim().to_lowercase();

    if let Some((_, abbreviation)) = UNIT_ABBREVIATIONS.iter().find(|(name, _)| *name == unit) {
        return Ok(*abbreviation);
    }

    LENGTH_SCALES
        .iter()
        .chain(ANGLE_SCALES.iter())
        .map(|(abbreviation, _)| *abbreviation)
        .find(|abbreviation| *abbreviation == unit)
        .ok_or_else(|| ResplotError::Rescale {
            message: format!("CRS unit '{}' not recognised for rescaling", unit),
        })
}

/// Family and per-base-unit scale of an abbreviated unit
pub fn unit_scale(abbreviation: &str) -> Option<(UnitFamily, f64)> {
    LENGTH_SCALES
        .iter()
        .find(|(unit, _)| *unit == abbreviation)
        .map(|(_, scale)| (UnitFamily::Length, *scale))
        .or_else(|| {
            ANGLE_SCALES
                .iter()
                .find(|(unit, _)| *unit == abbreviation)
                .map(|(_, scale)| (UnitFamily::Angle, *scale))
        })
}

/// Compute the rescale unit and factor for coordinates in `crs_unit`.
///
/// Without a CRS unit, coordinates are left as they are. Without a requested
/// unit, projected coordinates go to kilometres and geographic ones to degrees.
pub fn rescale_parameters(
    crs_unit: Option<&str>,
    rescale_unit: Option<&str>,
) -> Result<RescaleParameters> {
    let Some(crs_unit) = crs_unit else {
        return Ok(RescaleParameters::identity());
    };

    let source = unit_abbreviation(crs_unit)?;
    let (source_family, source_scale) = unit_scale(source).ok_or_else(|| ResplotError::Rescale {
        message: format!("CRS unit '{}' not recognised for rescaling", source),
    })?;

    let target = match rescale_unit {
        Some(unit) => unit_abbreviation(unit)?,
        None => source_family.default_unit(),
    };

    match unit_scale(target) {
        Some((family, target_scale)) if family == source_family => Ok(RescaleParameters {
            unit: Some(target.to_string()),
            factor: target_scale / source_scale,
        }),
        _ => Err(ResplotError::Rescale {
            message: format!("Cannot rescale from '{}' to '{}'", source, target),
        }),
    }
}

/// Rescale parameters for an optional CRS
pub fn rescale_parameters_for(
    crs: Option<&CrsDescription>,
    rescale_unit: Option<&str>,
) -> Result<RescaleParameters> {
    rescale_parameters(crs.map(|crs| crs.unit_name.as_str()), rescale_unit)
}

/// X and Y axis labels, e.g. "Easting Amersfoort / RD New [km]"
pub fn axis_labels(crs: Option<&CrsDescription>, rescale_unit: Option<&str>) -> (String, String) {
    let unit = rescale_unit.unwrap_or("-");

    match crs {
        Some(crs) => (
            format!("{} {} [{}]", crs.axis_names[0], crs.name, unit),
            format!("{} {} [{}]", crs.axis_names[1], crs.name, unit),
        ),
        None => (format!("x [{}]", unit), format!("y [{}]", unit)),
    }
}
