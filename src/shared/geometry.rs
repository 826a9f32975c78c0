//! GeoJSON geometry values stored on locations, reports and infrastructure.
//!
//! Coordinates follow GeoJSON order: `[longitude, latitude]`.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::ValidationError;

/// Tagged GeoJSON geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        #[schema(value_type = Vec<f64>)]
        coordinates: [f64; 2],
    },
    LineString {
        #[schema(value_type = Vec<Vec<f64>>)]
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        #[schema(value_type = Vec<Vec<Vec<f64>>>)]
        coordinates: Vec<Vec<[f64; 2]>>,
    },
}

impl Geometry {
    pub fn point(lon: f64, lat: f64) -> Self {
        Geometry::Point {
            coordinates: [lon, lat],
        }
    }

    /// `(lon, lat)` when this geometry is a point
    pub fn as_point(&self) -> Option<(f64, f64)> {
        match self {
            Geometry::Point { coordinates } => Some((coordinates[0], coordinates[1])),
            _ => None,
        }
    }

    /// Structural and range checks for every position in the geometry
    pub fn check(&self) -> Result<(), String> {
        match self {
            Geometry::Point { coordinates } => check_position(coordinates),
            Geometry::LineString { coordinates } => {
                if coordinates.len() < 2 {
                    return Err("LineString needs at least 2 positions".to_string());
                }
                coordinates.iter().try_for_each(check_position)
            }
            Geometry::Polygon { coordinates } => {
                if coordinates.is_empty() {
                    return Err("Polygon needs at least one ring".to_string());
                }
                for ring in coordinates {
                    if ring.len() < 4 {
                        return Err("Polygon ring needs at least 4 positions".to_string());
                    }
                    if ring.first() != ring.last() {
                        return Err("Polygon ring must be closed".to_string());
                    }
                    ring.iter().try_for_each(check_position)?;
                }
                Ok(())
            }
        }
    }
}

fn check_position(position: &[f64; 2]) -> Result<(), String> {
    let [lon, lat] = *position;
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(format!("Longitude {} is out of range [-180, 180]", lon));
    }
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(format!("Latitude {} is out of range [-90, 90]", lat));
    }
    Ok(())
}

/// Adapter for `#[validate(custom(function = ...))]` on request DTOs
pub fn validate_geometry(geometry: &Geometry) -> Result<(), ValidationError> {
    geometry.check().map_err(|msg| {
        let mut err = ValidationError::new("invalid_geometry");
        err.message = Some(Cow::Owned(msg));
        err
    })
}

/// Map viewport rectangle in degrees
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Bounds {
    /// Northern latitude edge
    pub north: f64,
    /// Southern latitude edge
    pub south: f64,
    /// Eastern longitude edge
    pub east: f64,
    /// Western longitude edge
    pub west: f64,
}

impl Bounds {
    pub fn check(&self) -> Result<(), String> {
        check_position(&[self.west, self.south])?;
        check_position(&[self.east, self.north])?;
        if self.south > self.north {
            return Err("south must not be greater than north".to_string());
        }
        if self.west > self.east {
            return Err("west must not be greater than east".to_string());
        }
        Ok(())
    }

    /// Edges are inclusive: a point exactly on the boundary is inside.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lat >= self.south && lat <= self.north && lon >= self.west && lon <= self.east
    }
}
