//! Venue and event catalogs.
//!
//! The built-in catalog is compiled into the binary. A replacement can be read
//! from a directory holding `venues.json` and `events.json` in the same shape.
//! Either way the records are validated once and never mutated afterwards.

use std::{collections::HashSet, fs, path::Path};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::{
    calendar::parse_iso_date,
    error::CatalogError,
    format::is_valid_clock_time,
    models::{Event, Venue},
};

const BUILTIN_VENUES: &str = include_str!("../data/venues.json");
const BUILTIN_EVENTS: &str = include_str!("../data/events.json");

/// File name of the venue list inside a catalog directory.
pub const VENUES_FILE: &str = "venues.json";
/// File name of the event list inside a catalog directory.
pub const EVENTS_FILE: &str = "events.json";

/// Immutable pair of venue and event lists.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    venues: Vec<Venue>,
    events: Vec<Event>,
}

impl Catalog {
    /// Build a catalog from already-parsed records, checking every invariant.
    pub fn new(venues: Vec<Venue>, events: Vec<Event>) -> Result<Self, CatalogError> {
        validate_venues(&venues)?;
        validate_events(&events)?;
        Ok(Self { venues, events })
    }

    /// The catalog bundled with the application.
    pub fn builtin() -> Result<Self> {
        let venues: Vec<Venue> =
            serde_json::from_str(BUILTIN_VENUES).context("failed to parse built-in venues")?;
        let events: Vec<Event> =
            serde_json::from_str(BUILTIN_EVENTS).context("failed to parse built-in events")?;
        let catalog = Self::new(venues, events).context("built-in catalog is invalid")?;
        debug!(
            venues = catalog.venues.len(),
            events = catalog.events.len(),
            "Loaded built-in catalog"
        );
        Ok(catalog)
    }

    /// Read a replacement catalog from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let venues: Vec<Venue> = read_json(&dir.join(VENUES_FILE))?;
        let events: Vec<Event> = read_json(&dir.join(EVENTS_FILE))?;
        let catalog = Self::new(venues, events)
            .with_context(|| format!("invalid catalog in {}", dir.display()))?;
        info!(
            path = %dir.display(),
            venues = catalog.venues.len(),
            events = catalog.events.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Load from `dir` when given, otherwise fall back to the built-in data.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::load_dir(dir),
            None => Self::builtin(),
        }
    }

    /// All venues in catalog order.
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// All events in catalog order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Look up a venue by id.
    pub fn venue(&self, id: u32) -> Option<&Venue> {
        self.venues.iter().find(|venue| venue.id == id)
    }

    /// Look up an event by id.
    pub fn event(&self, id: u32) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Distinct event locations, sorted.
    pub fn event_locations(&self) -> Vec<String> {
        let mut locations: Vec<String> = self
            .events
            .iter()
            .map(|event| event.location.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        locations.sort();
        locations
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

fn validate_venues(venues: &[Venue]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(venues.len());
    for venue in venues {
        if !seen.insert(venue.id) {
            return Err(CatalogError::DuplicateVenueId(venue.id));
        }
        if !venue.rating.is_finite() || !(0.0..=5.0).contains(&venue.rating) {
            return Err(CatalogError::RatingOutOfRange {
                id: venue.id,
                rating: venue.rating,
            });
        }
    }
    Ok(())
}

fn validate_events(events: &[Event]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(events.len());
    for event in events {
        if !seen.insert(event.id) {
            return Err(CatalogError::DuplicateEventId(event.id));
        }
        if parse_iso_date(&event.date).is_none() {
            return Err(CatalogError::InvalidDate {
                id: event.id,
                value: event.date.clone(),
            });
        }
        if !is_valid_clock_time(&event.time) {
            return Err(CatalogError::InvalidTime {
                id: event.id,
                value: event.time.clone(),
            });
        }
        if event.capacity == 0 {
            return Err(CatalogError::ZeroCapacity(event.id));
        }
    }
    Ok(())
}
