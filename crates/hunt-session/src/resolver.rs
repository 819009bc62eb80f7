//! Photo source resolution
//!
//! Decides which single image, if any, should be stored for a location. A
//! photo supplied by the user always wins; the stock service is consulted
//! only when nothing is stored yet.

use hunt_core::error::Result;
use hunt_core::imaging;
use hunt_core::models::{CameraFacing, Orientation, PhotoSource};
use hunt_core::ports::StockPhotoSource;
use image::DynamicImage;

/// A camera capture as delivered by the device
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    pub bytes: Vec<u8>,

    /// Orientation reported by the camera; read from EXIF when absent
    pub orientation: Option<Orientation>,

    pub facing: CameraFacing,
}

/// What the user did, if anything
#[derive(Debug, Clone)]
pub enum PhotoRequest {
    Capture(CapturedPhoto),
    Pick(Vec<u8>),
    /// The picker was dismissed without a photo
    Cancelled,
    /// No user action; fall back to a stock photo when nothing is stored
    Automatic,
}

/// An image ready to be stored, tagged with how it was obtained
#[derive(Debug, Clone)]
pub struct ResolvedPhoto {
    pub image: DynamicImage,
    pub source: PhotoSource,
}

#[derive(Debug, Clone)]
pub enum Resolution {
    Resolved(ResolvedPhoto),
    /// A photo is already stored and no user action replaces it
    Unchanged,
    Cancelled,
    /// The stock service had nothing or was unavailable
    NotFound,
}

impl Resolution {
    pub fn source(&self) -> Option<PhotoSource> {
        match self {
            Resolution::Resolved(photo) => Some(photo.source),
            _ => None,
        }
    }
}

/// Resolve a request for one location
///
/// Errors only come from decoding a photo the user supplied. Stock service
/// failures are logged and reported as [`Resolution::NotFound`].
pub async fn resolve<P>(
    request: PhotoRequest,
    has_stored_photo: bool,
    keyword: &str,
    stock: &P,
) -> Result<Resolution>
where
    P: StockPhotoSource + ?Sized,
{
    match request {
        PhotoRequest::Capture(capture) => Ok(Resolution::Resolved(ResolvedPhoto {
            image: upright_capture(&capture)?,
            source: PhotoSource::Camera,
        })),
        PhotoRequest::Pick(bytes) => Ok(Resolution::Resolved(ResolvedPhoto {
            image: upright(&bytes, None)?,
            source: PhotoSource::Library,
        })),
        PhotoRequest::Cancelled => Ok(Resolution::Cancelled),
        PhotoRequest::Automatic if has_stored_photo => Ok(Resolution::Unchanged),
        PhotoRequest::Automatic => Ok(fetch_stock(keyword, stock).await),
    }
}

/// Decode a capture, rotate it upright and undo the front camera's mirror
pub fn upright_capture(capture: &CapturedPhoto) -> Result<DynamicImage> {
    let image = upright(&capture.bytes, capture.orientation)?;
    Ok(match capture.facing {
        CameraFacing::Front => imaging::mirror_horizontally(image),
        CameraFacing::Rear => image,
    })
}

fn upright(bytes: &[u8], orientation: Option<Orientation>) -> Result<DynamicImage> {
    let image = imaging::decode(bytes)?;
    let orientation = orientation.or_else(|| imaging::read_exif_orientation(bytes));
    Ok(imaging::apply_orientation(image, orientation.unwrap_or_default()))
}

async fn fetch_stock<P>(keyword: &str, stock: &P) -> Resolution
where
    P: StockPhotoSource + ?Sized,
{
    let bytes = match stock.fetch_photo(keyword).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            tracing::info!("No stock photo for '{}'", keyword);
            return Resolution::NotFound;
        }
        Err(e) => {
            tracing::warn!("Stock photo lookup for '{}' failed: {}", keyword, e);
            return Resolution::NotFound;
        }
    };

    match imaging::decode(&bytes) {
        Ok(image) => Resolution::Resolved(ResolvedPhoto {
            image,
            source: PhotoSource::StockFallback,
        }),
        Err(e) => {
            tracing::warn!(
                "Discarding undecodable stock photo for '{}': {}",
                keyword,
                e
            );
            Resolution::NotFound
        }
    }
}
