use chrono::{DateTime, Local};
use hunt_core::error::{HuntError, Result};
use hunt_core::imaging::fit_within;
use hunt_core::layout::StorageLayout;
use hunt_core::models::{HuntLocation, HuntProgress, LocationId, PhotoInfo};
use hunt_store::atomic::write_atomic;
use hunt_store::{PhotoStore, StoredPhoto};
use lopdf::{dictionary, Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::canvas::{embed_jpeg, Font, Fonts, PageCanvas, PAGE_HEIGHT, PAGE_WIDTH};
use crate::text::wrap;

pub const REPORT_TITLE: &str = "City Chamber Hunt Report";

const MARGIN: f64 = 30.0;
const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;
const PHOTO_MAX_HEIGHT: f64 = 220.0;
const MAP_FRAME_WIDTH: f64 = 260.0;
const MAP_FRAME_HEIGHT: f64 = 160.0;
const SECTION_GAP: f64 = 16.0;
const MAP_ATTRIBUTION: &str = "Map data \u{a9} OpenStreetMap contributors";
const MAP_UNAVAILABLE: &str = "Map unavailable";

/// A generated report
#[derive(Debug, Clone)]
pub struct Report {
    /// Where the PDF was written
    pub path: PathBuf,

    /// The PDF document
    pub bytes: Vec<u8>,

    /// Total pages, cover included
    pub page_count: usize,

    /// Progress shown on the cover
    pub progress: HuntProgress,
}

/// Builds the hunt report from the current locations and local state
pub struct ReportGenerator {
    layout: StorageLayout,
}

impl ReportGenerator {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }

    /// Render the report and write it to the documents directory
    ///
    /// Missing or undecodable images degrade to skipped content. Only PDF
    /// serialisation or the final write can fail.
    pub fn generate(
        &self,
        locations: &[HuntLocation],
        photos: &PhotoStore,
        snapshots: &BTreeMap<LocationId, Vec<u8>>,
        generated_at: DateTime<Local>,
    ) -> Result<Report> {
        let progress = progress_of(locations, photos);
        let (bytes, page_count) = self.render(locations, photos, snapshots, generated_at)?;

        let path = self.layout.report_path(generated_at.date_naive());
        fs::create_dir_all(self.layout.documents_dir())?;
        write_atomic(&path, &bytes)?;

        tracing::info!("Wrote {} page report to {}", page_count, path.display());
        Ok(Report {
            path,
            bytes,
            page_count,
            progress,
        })
    }

    /// Render the PDF in memory; returns the bytes and the page count
    pub fn render(
        &self,
        locations: &[HuntLocation],
        photos: &PhotoStore,
        snapshots: &BTreeMap<LocationId, Vec<u8>>,
        generated_at: DateTime<Local>,
    ) -> Result<(Vec<u8>, usize)> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let fonts = Fonts::register(&mut doc);

        let progress = progress_of(locations, photos);
        let mut kids = vec![cover_page(&mut doc, pages_id, &fonts, progress, generated_at)?];

        for location in locations {
            let photo = photos.get(&location.id);
            let snapshot = snapshots.get(&location.id).map(Vec::as_slice);
            if photo.is_none() && snapshot.is_none() {
                tracing::debug!("Skipping {} in report: no photo or map", location.name);
                continue;
            }
            kids.push(location_page(&mut doc, pages_id, &fonts, location, photo, snapshot)?);
        }

        let page_count = kids.len();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids.into_iter().map(Object::Reference).collect::<Vec<_>>(),
                "Count" => page_count as i64,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(PAGE_WIDTH as i64),
                    Object::Integer(PAGE_HEIGHT as i64),
                ],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(REPORT_TITLE),
            "Producer" => Object::string_literal(concat!("hunt ", env!("CARGO_PKG_VERSION"))),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| HuntError::Report(format!("Failed to serialise PDF: {}", e)))?;
        Ok((bytes, page_count))
    }
}

/// How many of the listed locations have a stored photo
pub fn progress_of(locations: &[HuntLocation], photos: &PhotoStore) -> HuntProgress {
    let found = locations.iter().filter(|l| photos.contains(&l.id)).count();
    HuntProgress::new(found, locations.len())
}

fn cover_page(
    doc: &mut Document,
    parent: ObjectId,
    fonts: &Fonts,
    progress: HuntProgress,
    generated_at: DateTime<Local>,
) -> Result<ObjectId> {
    let center = PAGE_WIDTH / 2.0;
    let mut canvas = PageCanvas::new();
    canvas.centered_text(Font::Bold, 24, center, PAGE_HEIGHT - 140.0, REPORT_TITLE);
    canvas.centered_text(
        Font::Regular,
        12,
        center,
        PAGE_HEIGHT - 175.0,
        &format!("Generated {}", generated_at.format("%Y-%m-%d %H:%M")),
    );
    canvas.centered_text(
        Font::Regular,
        14,
        center,
        PAGE_HEIGHT - 215.0,
        &progress.to_string(),
    );
    canvas.centered_text(
        Font::Bold,
        14,
        center,
        PAGE_HEIGHT - 240.0,
        &progress.message(),
    );
    canvas.finish(doc, parent, fonts)
}

fn location_page(
    doc: &mut Document,
    parent: ObjectId,
    fonts: &Fonts,
    location: &HuntLocation,
    photo: Option<&StoredPhoto>,
    snapshot: Option<&[u8]>,
) -> Result<ObjectId> {
    let mut canvas = PageCanvas::new();
    let mut y = PAGE_HEIGHT - MARGIN - 18.0;
    canvas.text(Font::Bold, 18, MARGIN, y, &location.name);
    y -= 4.0;
    for line in wrap(&location.address, 12.0, CONTENT_WIDTH) {
        y -= 15.0;
        canvas.text(Font::Regular, 12, MARGIN, y, &line);
    }

    if let Some(photo) = photo {
        y -= 6.0;
        for entry in metadata_lines(&photo.info) {
            for line in wrap(&entry, 10.0, CONTENT_WIDTH) {
                y -= 13.0;
                canvas.text(Font::Regular, 10, MARGIN, y, &line);
            }
        }
    }
    y -= SECTION_GAP;

    if let Some(photo) = photo {
        match embed_jpeg(doc, &photo.bytes) {
            Ok(image) => {
                let (width, height) = fit_within(
                    f64::from(image.width),
                    f64::from(image.height),
                    CONTENT_WIDTH,
                    PHOTO_MAX_HEIGHT,
                );
                y -= height;
                canvas.image(&image, (PAGE_WIDTH - width) / 2.0, y, width, height);
                y -= SECTION_GAP;
            }
            Err(e) => tracing::warn!("Skipping photo of {} in report: {}", location.name, e),
        }
    }

    let frame_x = (PAGE_WIDTH - MAP_FRAME_WIDTH) / 2.0;
    let frame_y = y - MAP_FRAME_HEIGHT;
    let map = snapshot.and_then(|bytes| match embed_jpeg(doc, bytes) {
        Ok(image) => Some(image),
        Err(e) => {
            tracing::warn!("Skipping map of {} in report: {}", location.name, e);
            None
        }
    });
    match map {
        Some(image) => {
            let (width, height) = fit_within(
                f64::from(image.width),
                f64::from(image.height),
                MAP_FRAME_WIDTH,
                MAP_FRAME_HEIGHT,
            );
            let x = frame_x + (MAP_FRAME_WIDTH - width) / 2.0;
            let image_y = frame_y + (MAP_FRAME_HEIGHT - height) / 2.0;
            canvas.image(&image, x, image_y, width, height);
            let caption_y = frame_y - 11.0;
            canvas.centered_text(
                Font::Regular,
                8,
                PAGE_WIDTH / 2.0,
                caption_y,
                MAP_ATTRIBUTION,
            );
        }
        None => {
            canvas.stroke_rect(frame_x, frame_y, MAP_FRAME_WIDTH, MAP_FRAME_HEIGHT);
            canvas.centered_text(
                Font::Regular,
                12,
                PAGE_WIDTH / 2.0,
                frame_y + MAP_FRAME_HEIGHT / 2.0 - 4.0,
                MAP_UNAVAILABLE,
            );
        }
    }

    canvas.finish(doc, parent, fonts)
}

/// Human readable lines describing a stored photo
pub fn metadata_lines(info: &PhotoInfo) -> Vec<String> {
    let added = info.date_added.with_timezone(&Local);
    let mut lines = vec![
        format!("Added: {}", added.format("%Y-%m-%d %H:%M")),
        format!("Source: {}", info.source),
    ];
    if let Some(address) = &info.address {
        lines.push(format!("Address: {}", address));
    }
    if let Some(coordinates) = &info.coordinates {
        lines.push(format!("Coordinates: {}", coordinates));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hunt_core::models::{Coordinates, PhotoSource};

    #[test]
    fn test_metadata_lines_full() {
        let info = PhotoInfo {
            filename: "x.jpg".to_string(),
            date_added: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            source: PhotoSource::Camera,
            address: Some("1 King St".to_string()),
            coordinates: Some(Coordinates::new(43.65321, -79.38318)),
        };
        let lines = metadata_lines(&info);

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Added: 2024-05-0"));
        assert_eq!(lines[1], "Source: Camera");
        assert_eq!(lines[2], "Address: 1 King St");
        assert_eq!(lines[3], "Coordinates: 43.6532, -79.3832");
    }

    #[test]
    fn test_metadata_lines_minimal() {
        let info = PhotoInfo {
            filename: "x.jpg".to_string(),
            date_added: Utc::now(),
            source: PhotoSource::StockFallback,
            address: None,
            coordinates: None,
        };
        let lines = metadata_lines(&info);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Source: Stock photo");
    }
}
