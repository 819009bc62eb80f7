use chrono::{DateTime, Local};
use hunt_core::error::Result;
use hunt_core::models::{HuntLocation, HuntProgress, LocationId};
use hunt_core::ports::{Geocoder, StockPhotoSource};
use hunt_report::generator::progress_of;
use hunt_report::{Report, ReportGenerator};
use hunt_store::{PhotoStore, SnapshotCache};
use std::time::Duration;

use crate::generation::{SearchGenerations, SearchTicket};
use crate::resolver::{self, PhotoRequest, Resolution};

/// Results of one search, tagged with the ticket it was issued under
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub ticket: SearchTicket,
    pub locations: Vec<HuntLocation>,
}

/// Outcome counts of a snapshot preload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadSummary {
    pub cached: usize,
    pub rendered: usize,
    pub failed: usize,
}

/// One user's hunt: the current search results plus local state
pub struct HuntSession<G, S>
where
    G: Geocoder,
    S: StockPhotoSource,
{
    geocoder: G,
    stock: S,
    photos: PhotoStore,
    snapshots: SnapshotCache,
    reports: ReportGenerator,
    generations: SearchGenerations,
    locations: Vec<HuntLocation>,
    preload_pause: Duration,
}

impl<G, S> HuntSession<G, S>
where
    G: Geocoder,
    S: StockPhotoSource,
{
    pub fn new(geocoder: G, stock: S, photos: PhotoStore, snapshots: SnapshotCache) -> Self {
        let reports = ReportGenerator::new(photos.layout().clone());
        Self {
            geocoder,
            stock,
            photos,
            snapshots,
            reports,
            generations: SearchGenerations::new(),
            locations: Vec::new(),
            preload_pause: Duration::ZERO,
        }
    }

    /// Pause between consecutive map renders during preload
    pub fn with_preload_pause(mut self, pause: Duration) -> Self {
        self.preload_pause = pause;
        self
    }

    /// Start a search, superseding any earlier one
    pub fn begin_search(&self) -> SearchTicket {
        self.generations.begin()
    }

    /// Run the geocoder for a ticket; failures come back as no results
    pub async fn fetch(&self, ticket: SearchTicket, query: &str) -> SearchResults {
        let locations = match self.geocoder.search(query).await {
            Ok(locations) => locations,
            Err(e) => {
                let service = self.geocoder.service_name();
                tracing::error!("{} search for '{}' failed: {}", service, query, e);
                Vec::new()
            }
        };
        SearchResults { ticket, locations }
    }

    /// Replace the location list if the results are still current
    pub fn apply(&mut self, results: SearchResults) -> bool {
        if !self.generations.is_current(results.ticket) {
            tracing::debug!(
                "Discarding {} stale results from {:?}",
                results.locations.len(),
                results.ticket
            );
            return false;
        }
        self.locations = results.locations;
        true
    }

    /// Search and apply in one step
    pub async fn search(&mut self, query: &str) -> &[HuntLocation] {
        let ticket = self.begin_search();
        let results = self.fetch(ticket, query).await;
        self.apply(results);
        &self.locations
    }

    pub fn locations(&self) -> &[HuntLocation] {
        &self.locations
    }

    /// Resolve and store a photo for a location
    ///
    /// Only [`Resolution::Resolved`] touches the photo store.
    pub async fn resolve_photo(
        &mut self,
        location: &HuntLocation,
        request: PhotoRequest,
    ) -> Result<Resolution> {
        let has_stored = self.photos.contains(&location.id);
        let resolution = resolver::resolve(request, has_stored, &location.name, &self.stock).await?;

        if let Resolution::Resolved(photo) = &resolution {
            self.photos.save(
                location.id,
                &photo.image,
                photo.source,
                Some(location.address.clone()),
                Some(location.coordinates()),
            )?;
        }
        Ok(resolution)
    }

    /// Make sure every current location has a map snapshot
    ///
    /// Locations are handled one at a time. `on_location` is called before
    /// each one with its position in the list.
    pub async fn preload_maps<F>(&mut self, mut on_location: F) -> PreloadSummary
    where
        F: FnMut(usize, &HuntLocation),
    {
        let mut summary = PreloadSummary::default();
        let mut rendered_before = false;

        for (index, location) in self.locations.iter().enumerate() {
            on_location(index, location);
            if self.snapshots.cached(&location.id).is_some() {
                summary.cached += 1;
                continue;
            }

            if rendered_before && !self.preload_pause.is_zero() {
                tokio::time::sleep(self.preload_pause).await;
            }
            rendered_before = true;

            let coordinates = location.coordinates();
            match self.snapshots.get(location.id, coordinates).await {
                Some(_) => summary.rendered += 1,
                None => summary.failed += 1,
            }
        }

        tracing::info!(
            "Map preload: {} cached, {} rendered, {} failed",
            summary.cached,
            summary.rendered,
            summary.failed
        );
        summary
    }

    /// Preload maps and write the PDF report for the current locations
    pub async fn export(&mut self, generated_at: DateTime<Local>) -> Result<Report> {
        self.preload_maps(|_, _| {}).await;
        self.write_report(generated_at)
    }

    /// Write the PDF report from the snapshots already in the cache
    ///
    /// Nothing is rendered here; callers that drive their own preload use
    /// this instead of [`HuntSession::export`].
    pub fn write_report(&self, generated_at: DateTime<Local>) -> Result<Report> {
        self.reports.generate(
            &self.locations,
            &self.photos,
            self.snapshots.entries(),
            generated_at,
        )
    }

    pub fn forget_photo(&mut self, id: &LocationId) -> Result<bool> {
        self.photos.forget(id)
    }

    pub fn photos(&self) -> &PhotoStore {
        &self.photos
    }

    pub fn snapshots(&self) -> &SnapshotCache {
        &self.snapshots
    }

    /// Progress over the current location list
    pub fn progress(&self) -> HuntProgress {
        progress_of(&self.locations, &self.photos)
    }
}
