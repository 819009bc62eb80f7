use geo::{Destination, Haversine, Point};
use hunt_core::models::Coordinates;

/// A square region of the earth's surface centred on a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub center: Coordinates,
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Region {
    /// Region spanning `span_meters` north-south and east-west around `center`
    pub fn around(center: Coordinates, span_meters: f64) -> Self {
        let origin = Point::new(center.longitude, center.latitude);
        let half = span_meters / 2.0;

        let north = Haversine.destination(origin, 0.0, half);
        let east = Haversine.destination(origin, 90.0, half);
        let south = Haversine.destination(origin, 180.0, half);
        let west = Haversine.destination(origin, 270.0, half);

        Self {
            center,
            north: north.y().min(85.0511),
            south: south.y().max(-85.0511),
            east: east.x(),
            west: west.x(),
        }
    }

    pub fn north_west(&self) -> Coordinates {
        Coordinates::new(self.north, self.west)
    }

    pub fn south_east(&self) -> Coordinates {
        Coordinates::new(self.south, self.east)
    }
}
