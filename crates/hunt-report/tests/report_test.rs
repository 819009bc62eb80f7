use chrono::{Local, TimeZone};
use hunt_core::imaging::{encode_jpeg, JPEG_QUALITY};
use hunt_core::layout::StorageLayout;
use hunt_core::models::{HuntLocation, PhotoSource};
use hunt_report::ReportGenerator;
use hunt_store::PhotoStore;
use image::{DynamicImage, Rgb, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::Document;
use std::collections::BTreeMap;
use tempfile::TempDir;

fn image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([180, 60, 20])))
}

fn page_count(bytes: &[u8]) -> usize {
    let document = Document::load_mem(bytes).unwrap();
    document.get_pages().len()
}

/// Decoded content stream operations of every page, in page order
fn page_operations(bytes: &[u8]) -> Vec<Vec<Operation>> {
    let document = Document::load_mem(bytes).unwrap();
    document
        .get_pages()
        .into_values()
        .map(|page_id| {
            let content = document.get_page_content(page_id).unwrap();
            Content::decode(&content).unwrap().operations
        })
        .collect()
}

/// Strings shown with `Tj` on a page
fn shown_text(operations: &[Operation]) -> Vec<String> {
    operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_str().ok())
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .collect()
}

/// Width and height of every image placed with `cm` on a page
fn placed_images(operations: &[Operation]) -> Vec<(i64, i64)> {
    operations
        .iter()
        .filter(|op| op.operator == "cm")
        .map(|op| {
            let width = op.operands[0].as_i64().unwrap();
            let height = op.operands[3].as_i64().unwrap();
            (width, height)
        })
        .collect()
}

fn location(name: &str, address: &str) -> HuntLocation {
    HuntLocation::new(name, address, 43.65, -79.38)
}

#[test]
fn test_zero_locations_gives_cover_only() {
    let dir = TempDir::new().unwrap();
    let layout = StorageLayout::new(dir.path());
    let photos = PhotoStore::open(layout.clone()).unwrap();
    let generated_at = Local.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();

    let report = ReportGenerator::new(layout.clone())
        .generate(&[], &photos, &BTreeMap::new(), generated_at)
        .unwrap();

    assert_eq!(report.page_count, 1);
    assert_eq!(page_count(&report.bytes), 1);
    assert_eq!(report.progress.total, 0);
    let expected = "documents/CityHunt_Report_2026-10-16.pdf";
    assert!(report.path.ends_with(expected));
    assert_eq!(std::fs::read(&report.path).unwrap(), report.bytes);

    let cover = shown_text(&page_operations(&report.bytes)[0]);
    assert!(cover.contains(&"City Chamber Hunt Report".to_string()));
    assert!(cover.contains(&"Start your hunt!".to_string()));
}

#[test]
fn test_locations_without_content_are_skipped() {
    let dir = TempDir::new().unwrap();
    let layout = StorageLayout::new(dir.path());
    let mut photos = PhotoStore::open(layout.clone()).unwrap();

    let with_photo = location("Bakery", "1 King St W, Toronto");
    let with_map = location("Museum", "100 Queens Park, Toronto");
    let with_both = location("City Hall", "100 Queen St W, Toronto");
    let with_nothing = location("Library", "789 Yonge St, Toronto");

    photos
        .save(
            with_photo.id,
            &image(640, 480),
            PhotoSource::Camera,
            None,
            None,
        )
        .unwrap();
    photos
        .save(
            with_both.id,
            &image(300, 900),
            PhotoSource::StockFallback,
            Some(with_both.address.clone()),
            Some(with_both.coordinates()),
        )
        .unwrap();

    let map = encode_jpeg(&image(520, 320), JPEG_QUALITY).unwrap();
    let mut snapshots = BTreeMap::new();
    snapshots.insert(with_map.id, map.clone());
    snapshots.insert(with_both.id, map);

    let locations = vec![with_photo, with_map, with_both, with_nothing];
    let report = ReportGenerator::new(layout)
        .generate(&locations, &photos, &snapshots, Local::now())
        .unwrap();

    assert_eq!(report.page_count, 4);
    assert_eq!(page_count(&report.bytes), 4);
    assert_eq!(report.progress.found, 2);
    assert_eq!(report.progress.total, 4);

    let pages = page_operations(&report.bytes);
    let titles: Vec<String> = pages[1..]
        .iter()
        .map(|page| shown_text(page)[0].clone())
        .collect();
    assert_eq!(titles, vec!["Bakery", "Museum", "City Hall"]);
}

#[test]
fn test_photo_page_layout() {
    let dir = TempDir::new().unwrap();
    let layout = StorageLayout::new(dir.path());
    let mut photos = PhotoStore::open(layout.clone()).unwrap();

    let tall = location("Clock Tower", "1 Front St E, Toronto");
    let small = location("Kiosk", "2 Front St E, Toronto");
    photos
        .save(
            tall.id,
            &image(300, 900),
            PhotoSource::Camera,
            Some(tall.address.clone()),
            Some(tall.coordinates()),
        )
        .unwrap();
    photos
        .save(small.id, &image(100, 80), PhotoSource::Library, None, None)
        .unwrap();

    let map = encode_jpeg(&image(520, 320), JPEG_QUALITY).unwrap();
    let mut snapshots = BTreeMap::new();
    snapshots.insert(tall.id, map);

    let report = ReportGenerator::new(layout)
        .generate(&[tall, small], &photos, &snapshots, Local::now())
        .unwrap();
    let pages = page_operations(&report.bytes);
    assert_eq!(pages.len(), 3);

    // Tall photo shrinks into 552x220, the map fills its 260x160 frame
    assert_eq!(placed_images(&pages[1]), vec![(73, 220), (260, 160)]);
    let text = shown_text(&pages[1]);
    assert!(text.contains(&"Source: Camera".to_string()));
    assert!(text.contains(&"Address: 1 Front St E, Toronto".to_string()));
    assert!(text.contains(&"Coordinates: 43.6500, -79.3800".to_string()));
    let attribution = text
        .iter()
        .any(|line| line.ends_with("OpenStreetMap contributors"));
    assert!(attribution);
    assert!(!text.contains(&"Map unavailable".to_string()));

    // Small photo keeps its size, the missing map gets a placeholder
    assert_eq!(placed_images(&pages[2]), vec![(100, 80)]);
    let text = shown_text(&pages[2]);
    assert!(text.contains(&"Source: Library".to_string()));
    assert!(text.contains(&"Map unavailable".to_string()));
}

#[test]
fn test_undecodable_snapshot_draws_placeholder() {
    let dir = TempDir::new().unwrap();
    let layout = StorageLayout::new(dir.path());
    let photos = PhotoStore::open(layout.clone()).unwrap();

    let broken = location("Café Ünïcode “Quotes”", "2 Rue Saint-Denis, Montréal");
    let mut snapshots = BTreeMap::new();
    snapshots.insert(broken.id, b"definitely not a jpeg".to_vec());

    let report = ReportGenerator::new(layout)
        .generate(&[broken], &photos, &snapshots, Local::now())
        .unwrap();

    let pages = page_operations(&report.bytes);
    assert_eq!(pages.len(), 2);
    assert!(placed_images(&pages[1]).is_empty());
    assert!(shown_text(&pages[1]).contains(&"Map unavailable".to_string()));
}

#[test]
fn test_same_day_export_overwrites() {
    let dir = TempDir::new().unwrap();
    let layout = StorageLayout::new(dir.path());
    let mut photos = PhotoStore::open(layout.clone()).unwrap();
    let generated_at = Local.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
    let generator = ReportGenerator::new(layout.clone());

    let first = generator
        .generate(&[], &photos, &BTreeMap::new(), generated_at)
        .unwrap();

    let spot = location("Harbourfront", "235 Queens Quay W, Toronto");
    photos
        .save(spot.id, &image(100, 100), PhotoSource::Library, None, None)
        .unwrap();
    let second = generator
        .generate(&[spot], &photos, &BTreeMap::new(), generated_at)
        .unwrap();

    assert_eq!(first.path, second.path);
    assert_eq!(page_count(&std::fs::read(&second.path).unwrap()), 2);
}
