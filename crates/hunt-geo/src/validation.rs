use hunt_core::models::Coordinates;

/// Centre used for map snapshots when a location carries no usable
/// coordinates (Toronto City Hall)
pub const FALLBACK_CENTER: Coordinates = Coordinates {
    latitude: 43.6532,
    longitude: -79.3832,
};

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, reason: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(reason.into());
    }
}

/// Validate a coordinate pair for use as a hunt location
///
/// A zero latitude or longitude is rejected: geocoder rows with a zeroed
/// axis are placeholders, not places on the equator or prime meridian.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if !latitude.is_finite() || !longitude.is_finite() {
        result.add_error("Coordinates must be finite");
        return result;
    }

    if !(-90.0..=90.0).contains(&latitude) {
        result.add_error(format!("Latitude {} out of range [-90, 90]", latitude));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        result.add_error(format!("Longitude {} out of range [-180, 180]", longitude));
    }

    if latitude == 0.0 {
        result.add_error("Latitude is zero");
    }

    if longitude == 0.0 {
        result.add_error("Longitude is zero");
    }

    result
}

/// Whether a geocoder result may enter the location list
pub fn is_searchable(latitude: f64, longitude: f64) -> bool {
    validate_coordinates(latitude, longitude).is_valid
}

/// Centre to render a map snapshot around
pub fn snapshot_center(coordinates: Coordinates) -> Coordinates {
    let degenerate = coordinates.is_origin()
        || !coordinates.latitude.is_finite()
        || !coordinates.longitude.is_finite();
    if degenerate {
        tracing::debug!(
            "Degenerate coordinates {}, using fallback centre",
            coordinates
        );
        FALLBACK_CENTER
    } else {
        coordinates
    }
}
