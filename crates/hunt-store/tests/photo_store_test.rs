use hunt_core::layout::StorageLayout;
use hunt_core::models::{Coordinates, LocationId, PhotoSource};
use hunt_store::PhotoStore;
use image::{DynamicImage, Rgb, RgbImage};
use tempfile::TempDir;

fn sample_image(shade: u8) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 24, Rgb([shade, 120, 40])))
}

fn open(dir: &TempDir) -> PhotoStore {
    PhotoStore::open(StorageLayout::new(dir.path())).unwrap()
}

/// Save a plain photo and return the stored JPEG bytes
fn save(store: &mut PhotoStore, id: LocationId, shade: u8, source: PhotoSource) -> Vec<u8> {
    let image = sample_image(shade);
    let stored = store.save(id, &image, source, None, None).unwrap();
    stored.bytes.clone()
}

#[test]
fn test_saved_photo_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let id = LocationId::derive("Union Station", "65 Front St W, Toronto");
    let coords = Coordinates::new(43.6453, -79.3806);

    let saved_bytes = {
        let mut store = open(&dir);
        let stored = store
            .save(
                id,
                &sample_image(200),
                PhotoSource::Camera,
                Some("65 Front St W, Toronto".to_string()),
                Some(coords),
            )
            .unwrap();
        assert_eq!(stored.info.source, PhotoSource::Camera);
        stored.bytes.clone()
    };

    let store = open(&dir);
    let photo = store.get(&id).expect("photo reloaded");
    assert_eq!(photo.bytes, saved_bytes);
    assert_eq!(photo.info.filename, StorageLayout::photo_filename(&id));
    let address = photo.info.address.as_deref();
    assert_eq!(address, Some("65 Front St W, Toronto"));
    assert_eq!(photo.info.coordinates, Some(coords));

    let layout = StorageLayout::new(dir.path());
    let on_disk = std::fs::read(layout.photo_path(&photo.info.filename)).unwrap();
    assert_eq!(on_disk, saved_bytes);
}

#[test]
fn test_save_overwrites_previous_photo() {
    let dir = TempDir::new().unwrap();
    let id = LocationId::derive("Bakery", "1 King St");
    let mut store = open(&dir);

    save(&mut store, id, 10, PhotoSource::StockFallback);
    let second_bytes = save(&mut store, id, 250, PhotoSource::Library);

    assert_eq!(store.len(), 1);
    let reopened = open(&dir);
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.get(&id).unwrap().info.source, PhotoSource::Library);
    assert_eq!(reopened.get(&id).unwrap().bytes, second_bytes);
}

#[test]
fn test_same_name_different_address_kept_apart() {
    let dir = TempDir::new().unwrap();
    let first = LocationId::derive("Tim Hortons", "10 Queen St, Toronto");
    let second = LocationId::derive("Tim Hortons", "99 Bank St, Ottawa");
    let mut store = open(&dir);

    save(&mut store, first, 30, PhotoSource::Library);
    save(&mut store, second, 90, PhotoSource::Library);

    let reopened = open(&dir);
    assert_eq!(reopened.len(), 2);
    let first_bytes = &reopened.get(&first).unwrap().bytes;
    assert_ne!(first_bytes, &reopened.get(&second).unwrap().bytes);
}

#[test]
fn test_missing_image_file_is_dropped() {
    let dir = TempDir::new().unwrap();
    let kept = LocationId::derive("Kept", "1 A St");
    let lost = LocationId::derive("Lost", "2 B St");
    {
        let mut store = open(&dir);
        save(&mut store, kept, 1, PhotoSource::Library);
        save(&mut store, lost, 2, PhotoSource::Library);
    }

    let layout = StorageLayout::new(dir.path());
    std::fs::remove_file(layout.photo_path(&StorageLayout::photo_filename(&lost))).unwrap();

    let store = open(&dir);
    assert_eq!(store.len(), 1);
    assert!(store.contains(&kept));
    assert!(!store.contains(&lost));
}

#[test]
fn test_corrupt_metadata_gives_empty_store() {
    let dir = TempDir::new().unwrap();
    let id = LocationId::derive("Museum", "100 Queens Park");
    {
        let mut store = open(&dir);
        save(&mut store, id, 5, PhotoSource::Library);
    }

    let layout = StorageLayout::new(dir.path());
    std::fs::write(layout.preferences_dir().join("photo_info.json"), b"[[[").unwrap();

    let store = open(&dir);
    assert!(store.is_empty());
}

#[test]
fn test_legacy_metadata_without_source_loads() {
    let dir = TempDir::new().unwrap();
    let layout = StorageLayout::new(dir.path());
    layout.ensure().unwrap();

    let id = LocationId::derive("Old Entry", "5 Old Rd");
    let filename = StorageLayout::photo_filename(&id);
    std::fs::write(layout.photo_path(&filename), b"jpeg bytes").unwrap();
    let legacy = format!(
        r#"{{"{}": {{"filename": "{}", "date": "2024-05-01T12:00:00Z"}}}}"#,
        id, filename
    );
    std::fs::write(layout.preferences_dir().join("photo_info.json"), legacy).unwrap();

    let store = PhotoStore::open(layout).unwrap();
    let photo = store.get(&id).unwrap();
    assert_eq!(photo.bytes, b"jpeg bytes");
    assert_eq!(photo.info.source, PhotoSource::Library);
}

#[test]
fn test_forget_removes_record_and_file() {
    let dir = TempDir::new().unwrap();
    let id = LocationId::derive("Gone", "3 C St");
    let mut store = open(&dir);
    save(&mut store, id, 7, PhotoSource::Camera);

    assert!(store.forget(&id).unwrap());
    assert!(!store.forget(&id).unwrap());
    assert!(!store.contains(&id));

    let layout = StorageLayout::new(dir.path());
    let path = layout.photo_path(&StorageLayout::photo_filename(&id));
    assert!(!path.exists());
    assert!(open(&dir).is_empty());
}
