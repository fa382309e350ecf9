//! Search and attribute filtering over the catalogs.
//!
//! Every criterion is optional and all active criteria are combined with AND.
//! Filtering is stable: the result keeps the catalog's order.

use std::fmt;

use crate::models::{Event, Genre, Venue};

/// Locations offered by the filter panel.
pub const LOCATIONS: [&str; 6] = [
    "New York",
    "Los Angeles",
    "Chicago",
    "Miami",
    "Las Vegas",
    "San Francisco",
];

/// Minimum-rating choices offered by the filter panel.
pub const RATING_THRESHOLDS: [&str; 3] = ["4.0", "4.5", "4.8"];

/// Venue types offered by the filter panel.
pub const VENUE_TYPES: [&str; 4] = ["Restaurant", "Cafe", "Bar & Grill", "Fine Dining"];

/// Genre labels offered by the filter panel.
pub fn genre_options() -> Vec<&'static str> {
    Genre::KNOWN.iter().map(|genre| genre.label()).collect()
}

/// An exact-match selector with an explicit "any" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    /// No constraint.
    #[default]
    Any,
    /// Field must equal this value.
    Exact(String),
}

impl Selector {
    /// Whether `value` passes the selector.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Selector::Any => true,
            Selector::Exact(expected) => expected == value,
        }
    }

    /// Whether the selector constrains anything.
    pub fn is_active(&self) -> bool {
        matches!(self, Selector::Exact(_))
    }

    /// Selected value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Selector::Any => None,
            Selector::Exact(value) => Some(value.as_str()),
        }
    }

    /// Step through `options`, with [`Selector::Any`] sitting before the first.
    ///
    /// A value not present in `options` restarts the cycle from `Any`.
    pub fn cycle(&self, options: &[&str], delta: isize) -> Selector {
        let slots = options.len() as isize + 1;
        let current = match self {
            Selector::Any => 0,
            Selector::Exact(value) => options
                .iter()
                .position(|option| *option == value.as_str())
                .map(|idx| idx as isize + 1)
                .unwrap_or(0),
        };
        match (current + delta).rem_euclid(slots) {
            0 => Selector::Any,
            idx => Selector::from(options[(idx - 1) as usize]),
        }
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Selector::Any
        } else {
            Selector::Exact(value.to_string())
        }
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Selector::Any
        } else {
            Selector::Exact(value)
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Any => f.write_str("Any"),
            Selector::Exact(value) => f.write_str(value),
        }
    }
}

/// Parse a rating threshold; blank, malformed or non-finite input means no constraint.
pub fn parse_rating_threshold(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|threshold| threshold.is_finite())
}

fn contains_term(term: &str, fields: &[&str]) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Criteria for the venue list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueFilter {
    /// Case-insensitive text matched against name, cuisine and location.
    pub search: String,
    /// City the venue must be in.
    pub location: Selector,
    /// Raw minimum rating as chosen in the panel.
    pub min_rating: String,
    /// Venue category such as `Restaurant` or `Cafe`.
    pub venue_type: Selector,
}

impl VenueFilter {
    /// Whether `venue` satisfies every active criterion.
    pub fn matches(&self, venue: &Venue) -> bool {
        contains_term(
            &self.search,
            &[
                venue.name.as_str(),
                venue.cuisine.as_str(),
                venue.location.as_str(),
            ],
        ) && self.location.accepts(&venue.location)
            && parse_rating_threshold(&self.min_rating)
                .map(|threshold| venue.rating >= threshold)
                .unwrap_or(true)
            && self.venue_type.accepts(&venue.venue_type)
    }

    /// Matching venues in catalog order.
    pub fn apply<'a>(&self, venues: &'a [Venue]) -> Vec<&'a Venue> {
        venues.iter().filter(|venue| self.matches(venue)).collect()
    }

    /// Reset every selector, keeping the search text.
    pub fn cleared(self) -> Self {
        Self {
            search: self.search,
            ..Self::default()
        }
    }
}

/// Criteria for the event list and calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Case-insensitive text matched against name, venue, location and artist.
    pub search: String,
    /// City the event must be in.
    pub location: Selector,
    /// Raw genre string, compared exactly.
    pub genre: Selector,
    /// Exact `YYYY-MM-DD` date.
    pub date: Selector,
}

impl EventFilter {
    /// Whether `event` satisfies every active criterion.
    pub fn matches(&self, event: &Event) -> bool {
        contains_term(
            &self.search,
            &[
                event.name.as_str(),
                event.venue.as_str(),
                event.location.as_str(),
                event.artist.as_str(),
            ],
        ) && self.location.accepts(&event.location)
            && self.genre.accepts(&event.genre)
            && self.date.accepts(&event.date)
    }

    /// Matching events in catalog order.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|event| self.matches(event)).collect()
    }

    /// Matching events cloned into an owned list, for calendar bucketing.
    pub fn apply_owned(&self, events: &[Event]) -> Vec<Event> {
        events
            .iter()
            .filter(|event| self.matches(event))
            .cloned()
            .collect()
    }

    /// Reset every selector, keeping the search text.
    pub fn cleared(self) -> Self {
        Self {
            search: self.search,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{event, venue};

    fn venues() -> Vec<Venue> {
        let mut rosewood = venue(1, "Rosewood Cafe", "Chicago", 4.5);
        rosewood.cuisine = "Brunch".to_string();
        let mut steak = venue(2, "Iron & Ember", "New York", 4.49);
        steak.venue_type = "Bar & Grill".to_string();
        steak.cuisine = "Steakhouse".to_string();
        let mut sushi = venue(3, "Kaito", "Los Angeles", 4.8);
        sushi.venue_type = "Fine Dining".to_string();
        sushi.cuisine = "Japanese".to_string();
        vec![rosewood, steak, sushi]
    }

    fn events() -> Vec<Event> {
        let mut neon = event(10, "Neon Pulse", "2024-01-10", "22:00");
        neon.genre = "Electronic".to_string();
        neon.location = "Miami".to_string();
        neon.artist = "DJ Solace".to_string();
        let mut blue = event(11, "Blue Room Sessions", "2024-01-11", "20:00");
        blue.venue = "The Blue Room".to_string();
        let mut riot = event(12, "Riot Hour", "2024-01-10", "21:30");
        riot.genre = "Rock".to_string();
        riot.location = "Miami".to_string();
        vec![neon, blue, riot]
    }

    fn ids<T>(items: &[&T], id: impl Fn(&T) -> u32) -> Vec<u32> {
        items.iter().map(|item| id(*item)).collect()
    }

    #[test]
    fn empty_criteria_return_everything() {
        let catalog = venues();
        let all = VenueFilter::default().apply(&catalog);
        assert_eq!(ids(&all, |v| v.id), vec![1, 2, 3]);

        let events = events();
        let all = EventFilter::default().apply(&events);
        assert_eq!(ids(&all, |e| e.id), vec![10, 11, 12]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = venues();
        let filter = VenueFilter {
            search: "ROSE".to_string(),
            ..VenueFilter::default()
        };
        assert_eq!(ids(&filter.apply(&catalog), |v| v.id), vec![1]);

        let by_cuisine = VenueFilter {
            search: "japan".to_string(),
            ..VenueFilter::default()
        };
        assert_eq!(ids(&by_cuisine.apply(&catalog), |v| v.id), vec![3]);
    }

    #[test]
    fn event_search_covers_artist_and_venue() {
        let events = events();
        let by_artist = EventFilter {
            search: "solace".to_string(),
            ..EventFilter::default()
        };
        assert_eq!(ids(&by_artist.apply(&events), |e| e.id), vec![10]);

        let by_venue = EventFilter {
            search: "blue room".to_string(),
            ..EventFilter::default()
        };
        assert_eq!(ids(&by_venue.apply(&events), |e| e.id), vec![11]);
    }

    #[test]
    fn rating_threshold_is_inclusive() {
        let catalog = venues();
        let filter = VenueFilter {
            min_rating: "4.5".to_string(),
            ..VenueFilter::default()
        };
        assert_eq!(ids(&filter.apply(&catalog), |v| v.id), vec![1, 3]);
    }

    #[test]
    fn malformed_threshold_is_ignored() {
        let catalog = venues();
        for raw in ["abc", "", "  ", "NaN", "inf"] {
            let filter = VenueFilter {
                min_rating: raw.to_string(),
                ..VenueFilter::default()
            };
            assert_eq!(filter.apply(&catalog).len(), 3, "threshold {raw:?}");
        }
    }

    #[test]
    fn criteria_are_combined_with_and() {
        let events = events();
        let filter = EventFilter {
            location: Selector::from("Miami"),
            date: Selector::from("2024-01-10"),
            genre: Selector::from("Rock"),
            ..EventFilter::default()
        };
        assert_eq!(ids(&filter.apply(&events), |e| e.id), vec![12]);

        let none = EventFilter {
            genre: Selector::from("Jazz"),
            location: Selector::from("Miami"),
            ..EventFilter::default()
        };
        assert!(none.apply(&events).is_empty());

        let catalog = venues();
        let venue_filter = VenueFilter {
            location: Selector::from("New York"),
            venue_type: Selector::from("Bar & Grill"),
            ..VenueFilter::default()
        };
        assert_eq!(ids(&venue_filter.apply(&catalog), |v| v.id), vec![2]);
    }

    #[test]
    fn location_selector_is_exact() {
        let catalog = venues();
        let filter = VenueFilter {
            location: Selector::from("York"),
            ..VenueFilter::default()
        };
        assert!(filter.apply(&catalog).is_empty());
    }

    #[test]
    fn filtering_preserves_order() {
        let events = events();
        let filter = EventFilter {
            location: Selector::from("Miami"),
            ..EventFilter::default()
        };
        assert_eq!(ids(&filter.apply(&events), |e| e.id), vec![10, 12]);
        let owned = filter.apply_owned(&events);
        assert_eq!(owned.iter().map(|e| e.id).collect::<Vec<_>>(), vec![10, 12]);
    }

    #[test]
    fn clearing_keeps_search_text() {
        let filter = EventFilter {
            search: "neon".to_string(),
            location: Selector::from("Miami"),
            genre: Selector::from("Pop"),
            date: Selector::from("2024-01-10"),
        }
        .cleared();
        assert_eq!(filter.search, "neon");
        assert!(!filter.location.is_active());
        assert!(!filter.genre.is_active());
        assert!(!filter.date.is_active());
    }

    #[test]
    fn selector_cycles_through_any() {
        let options = ["Chicago", "Miami"];
        let any = Selector::Any;
        let first = any.cycle(&options, 1);
        assert_eq!(first, Selector::from("Chicago"));
        let second = first.cycle(&options, 1);
        assert_eq!(second.value(), Some("Miami"));
        assert_eq!(second.cycle(&options, 1), Selector::Any);
        assert_eq!(any.cycle(&options, -1), Selector::from("Miami"));
        assert_eq!(
            Selector::from("Atlantis").cycle(&options, 1),
            Selector::from("Chicago")
        );
    }

    #[test]
    fn empty_string_is_the_any_sentinel() {
        assert_eq!(Selector::from(""), Selector::Any);
        assert_eq!(Selector::from(String::new()), Selector::Any);
        assert!(Selector::Any.accepts("anything"));
        assert_eq!(Selector::Any.to_string(), "Any");
        assert_eq!(genre_options().len(), 6);
    }
}
