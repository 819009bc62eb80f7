//! Hunt Session - Use-case orchestration
//!
//! Ties the geocoder, the photo resolver, the local stores and the report
//! generator together. Adapter failures degrade here: searches come back
//! empty and missing maps become placeholders.

pub mod generation;
pub mod resolver;
pub mod session;

pub use generation::{SearchGenerations, SearchTicket};
pub use resolver::{CapturedPhoto, PhotoRequest, Resolution, ResolvedPhoto};
pub use session::{HuntSession, PreloadSummary, SearchResults};
