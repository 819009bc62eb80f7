pub mod location;
pub mod photo;
pub mod progress;

pub use location::{Coordinates, HuntLocation, LocationId};
pub use photo::{CameraFacing, Orientation, PhotoInfo, PhotoSource};
pub use progress::{found_message, HuntProgress};
