//! Shared domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A daytime venue such as a restaurant or cafe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    /// Stable identity key, unique within the venue catalog.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Venue type (e.g. `Cafe`, `Fine Dining`).
    #[serde(rename = "type")]
    pub venue_type: String,
    /// Cuisine served.
    pub cuisine: String,
    /// City the venue is in.
    pub location: String,
    /// Average rating between 0.0 and 5.0 inclusive.
    pub rating: f64,
    /// Display-only price bracket such as `$$$`.
    pub price_range: String,
    /// Free-text opening hours.
    pub hours: String,
    /// Contact phone number, if the venue publishes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Website URL, if the venue has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Image URI.
    pub image: String,
    /// Free-text description.
    pub description: String,
}

impl Venue {
    /// Number of filled stars shown for this venue's rating.
    pub fn filled_stars(&self) -> usize {
        if !self.rating.is_finite() {
            return 0;
        }
        self.rating.clamp(0.0, 5.0).floor() as usize
    }

    /// Actions a user can take to get in touch with the venue.
    ///
    /// A venue that publishes neither a phone number nor a website falls back
    /// to a generic reservation prompt.
    pub fn contact_actions(&self) -> Vec<ContactAction> {
        let mut actions = Vec::new();
        if let Some(phone) = self.phone.as_deref() {
            actions.push(ContactAction::Call(phone.to_string()));
        }
        if let Some(website) = self.website.as_deref() {
            actions.push(ContactAction::Website(website.to_string()));
        }
        if actions.is_empty() {
            actions.push(ContactAction::Reserve);
        }
        actions
    }
}

/// Call-to-action offered on a venue's detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactAction {
    /// Dial the venue's phone number.
    Call(String),
    /// Open the venue's website.
    Website(String),
    /// Generic reservation prompt for venues without contact details.
    Reserve,
}

impl ContactAction {
    /// Button label for the action.
    pub fn label(&self) -> &'static str {
        match self {
            ContactAction::Call(_) => "Call Now",
            ContactAction::Website(_) => "Visit Website",
            ContactAction::Reserve => "Make Reservation",
        }
    }
}

/// A nighttime event such as a concert or club night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Stable identity key, unique within the event catalog.
    pub id: u32,
    /// Event title.
    pub name: String,
    /// Headlining artist.
    pub artist: String,
    /// Name of the hosting venue.
    pub venue: String,
    /// City the event takes place in.
    pub location: String,
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
    /// Start time in 24-hour `HH:MM` form.
    pub time: String,
    /// Music genre as written in the catalog.
    pub genre: String,
    /// Display-only ticket price.
    pub price: String,
    /// Maximum attendance.
    pub capacity: u32,
    /// Image URI.
    pub image: String,
    /// Free-text description.
    pub description: String,
}

impl Event {
    /// Classify the raw genre string.
    pub fn genre_kind(&self) -> Genre {
        Genre::from_label(&self.genre)
    }
}

/// Closed set of genres the night view knows how to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    /// `Electronic`
    Electronic,
    /// `Hip Hop`
    HipHop,
    /// `Rock`
    Rock,
    /// `Jazz`
    Jazz,
    /// `Latin`
    Latin,
    /// `Pop`
    Pop,
    /// Any genre outside the known set.
    Other,
}

impl Genre {
    /// Genres offered by the filter panel, in display order.
    pub const KNOWN: [Genre; 6] = [
        Genre::Electronic,
        Genre::HipHop,
        Genre::Rock,
        Genre::Jazz,
        Genre::Latin,
        Genre::Pop,
    ];

    /// Map a catalog genre string onto the enumeration.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Electronic" => Genre::Electronic,
            "Hip Hop" => Genre::HipHop,
            "Rock" => Genre::Rock,
            "Jazz" => Genre::Jazz,
            "Latin" => Genre::Latin,
            "Pop" => Genre::Pop,
            _ => Genre::Other,
        }
    }

    /// Catalog spelling of the genre.
    pub fn label(self) -> &'static str {
        match self {
            Genre::Electronic => "Electronic",
            Genre::HipHop => "Hip Hop",
            Genre::Rock => "Rock",
            Genre::Jazz => "Jazz",
            Genre::Latin => "Latin",
            Genre::Pop => "Pop",
            Genre::Other => "Other",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{event, venue};
    use super::*;

    #[test]
    fn stars_floor_the_rating() {
        assert_eq!(venue(1, "A", "Miami", 4.9).filled_stars(), 4);
        assert_eq!(venue(1, "A", "Miami", 5.0).filled_stars(), 5);
        assert_eq!(venue(1, "A", "Miami", 0.4).filled_stars(), 0);
        assert_eq!(venue(1, "A", "Miami", f64::NAN).filled_stars(), 0);
    }

    #[test]
    fn contact_actions_fall_back_to_reservation() {
        let mut subject = venue(1, "A", "Miami", 4.0);
        assert_eq!(subject.contact_actions(), vec![ContactAction::Reserve]);

        subject.phone = Some("(305) 555-0100".to_string());
        assert_eq!(
            subject.contact_actions(),
            vec![ContactAction::Call("(305) 555-0100".to_string())]
        );

        subject.website = Some("https://example.com".to_string());
        let labels: Vec<_> = subject
            .contact_actions()
            .iter()
            .map(ContactAction::label)
            .collect();
        assert_eq!(labels, vec!["Call Now", "Visit Website"]);
    }

    #[test]
    fn unknown_genres_map_to_other() {
        let mut subject = event(1, "Night", "2024-01-10", "21:00");
        assert_eq!(subject.genre_kind(), Genre::Jazz);
        subject.genre = "Hip Hop".to_string();
        assert_eq!(subject.genre_kind(), Genre::HipHop);
        subject.genre = "Polka".to_string();
        assert_eq!(subject.genre_kind(), Genre::Other);
    }

    #[test]
    fn venue_json_uses_catalog_field_names() -> anyhow::Result<()> {
        let raw = r#"{
            "id": 7,
            "name": "Rosewood Cafe",
            "type": "Cafe",
            "cuisine": "Brunch",
            "location": "Chicago",
            "rating": 4.6,
            "priceRange": "$$",
            "hours": "8:00 AM - 4:00 PM",
            "website": "https://rosewood.example.com",
            "image": "https://images.example.com/rosewood.jpg",
            "description": "Sunny corner cafe."
        }"#;
        let parsed: Venue = serde_json::from_str(raw)?;
        assert_eq!(parsed.venue_type, "Cafe");
        assert_eq!(parsed.price_range, "$$");
        assert!(parsed.phone.is_none());
        assert_eq!(parsed.website.as_deref(), Some("https://rosewood.example.com"));
        Ok(())
    }
}
