//! Geographic bounding box in the `minLon,minLat,maxLon,maxLat` form the
//! OSM `map` endpoint expects.

use crate::error::model_error::ModelError;
use crate::ErrorLocation;

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    #[track_caller]
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self, ModelError> {
        let bbox = Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    /// Area in square degrees, the unit the OSM API uses for its size limit.
    pub fn area(&self) -> f64 {
        (self.max_lon - self.min_lon) * (self.max_lat - self.min_lat)
    }

    #[track_caller]
    fn validate(&self) -> Result<(), ModelError> {
        let values = [self.min_lon, self.min_lat, self.max_lon, self.max_lat];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::Validation {
                message: String::from("Bounding box values must be finite numbers"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        for lon in [self.min_lon, self.max_lon] {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(ModelError::Validation {
                    message: format!("Longitude out of range: {lon}"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        for lat in [self.min_lat, self.max_lat] {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(ModelError::Validation {
                    message: format!("Latitude out of range: {lat}"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        if self.min_lon > self.max_lon || self.min_lat > self.max_lat {
            return Err(ModelError::Validation {
                message: format!("Bounding box minimum exceeds maximum: {self}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}

impl Display for BoundingBox {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(
            formatter,
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

impl FromStr for BoundingBox {
    type Err = ModelError;

    #[track_caller]
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();

        if parts.len() != 4 {
            return Err(ModelError::Parse {
                input: value.to_string(),
                message: format!("expected 4 comma-separated values, got {}", parts.len()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut numbers = [0.0_f64; 4];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part.parse::<f64>().map_err(|e| ModelError::Parse {
                input: value.to_string(),
                message: format!("{part:?} is not a number: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        let [min_lon, min_lat, max_lon, max_lat] = numbers;
        BoundingBox::new(min_lon, min_lat, max_lon, max_lat)
    }
}
