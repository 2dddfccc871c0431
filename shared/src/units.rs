//! Display units for snapshot values
//!
//! Snapshots store distance in meters and energy in kilocalories, the units
//! the sensor platform reports. Conversion only happens for display.

use serde::{Deserialize, Serialize};
use std::fmt;

const METERS_PER_MILE: f64 = 1609.344;
const KJ_PER_KCAL: f64 = 4.184;

// ============================================================================
// Distance Units
// ============================================================================

/// Distance unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Miles,
    Meters,
}

impl DistanceUnit {
    /// Convert from meters to this unit
    pub fn from_meters(&self, meters: f64) -> f64 {
        match self {
            DistanceUnit::Meters => meters,
            DistanceUnit::Km => meters / 1000.0,
            DistanceUnit::Miles => meters / METERS_PER_MILE,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Miles => "mi",
            DistanceUnit::Meters => "m",
        }
    }

    /// Format a distance stored in meters, e.g. "3.80 km"
    pub fn format(&self, meters: f64) -> String {
        match self {
            DistanceUnit::Meters => format!("{:.0} {}", meters, self.abbreviation()),
            _ => format!("{:.2} {}", self.from_meters(meters), self.abbreviation()),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" => Ok(DistanceUnit::Km),
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Miles),
            "m" | "meter" | "meters" => Ok(DistanceUnit::Meters),
            _ => Err(format!("Unknown distance unit: {}", s)),
        }
    }
}

// ============================================================================
// Energy Units
// ============================================================================

/// Energy unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnergyUnit {
    #[default]
    Kcal,
    Kj,
}

impl EnergyUnit {
    /// Convert from kcal to this unit
    pub fn from_kcal(&self, kcal: f64) -> f64 {
        match self {
            EnergyUnit::Kcal => kcal,
            EnergyUnit::Kj => kcal * KJ_PER_KCAL,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            EnergyUnit::Kcal => "kcal",
            EnergyUnit::Kj => "kJ",
        }
    }

    /// Format an energy value stored in kcal, rounded to whole units
    pub fn format(&self, kcal: f64) -> String {
        format!("{:.0} {}", self.from_kcal(kcal), self.abbreviation())
    }
}

impl fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for EnergyUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kcal" | "cal" | "calories" => Ok(EnergyUnit::Kcal),
            "kj" | "kilojoule" | "kilojoules" => Ok(EnergyUnit::Kj),
            _ => Err(format!("Unknown energy unit: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_distance_conversions() {
        assert!((DistanceUnit::Km.from_meters(3800.0) - 3.8).abs() < 1e-9);
        assert!((DistanceUnit::Miles.from_meters(1609.344) - 1.0).abs() < 1e-9);
        assert_eq!(DistanceUnit::Meters.from_meters(42.0), 42.0);
    }

    #[test]
    fn test_distance_format() {
        assert_eq!(DistanceUnit::Km.format(3800.0), "3.80 km");
        assert_eq!(DistanceUnit::Meters.format(3800.4), "3800 m");
        assert_eq!(DistanceUnit::Miles.format(0.0), "0.00 mi");
    }

    #[test]
    fn test_energy_format() {
        assert_eq!(EnergyUnit::Kcal.format(230.4), "230 kcal");
        assert_eq!(EnergyUnit::Kj.format(100.0), "418 kJ");
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("KM".parse::<DistanceUnit>().unwrap(), DistanceUnit::Km);
        assert_eq!("miles".parse::<DistanceUnit>().unwrap(), DistanceUnit::Miles);
        assert!("furlong".parse::<DistanceUnit>().is_err());
        assert_eq!("kJ".parse::<EnergyUnit>().unwrap(), EnergyUnit::Kj);
        assert!("btu".parse::<EnergyUnit>().is_err());
    }
}
