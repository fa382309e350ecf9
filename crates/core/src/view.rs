//! Per-section view state and the reducers that update it.
//!
//! Each section owns one immutable struct. Front ends never mutate fields
//! directly; they dispatch an action and replace their copy with the result.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    calendar::{CalendarAction, CalendarMode, CalendarState},
    filter::{EventFilter, Selector, VenueFilter},
    models::{Event, Venue},
};

/// Top-level section of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Restaurants, cafes and other daytime venues.
    #[default]
    Day,
    /// Concerts, club nights and other events.
    Night,
}

impl Section {
    /// The other section.
    pub fn toggled(self) -> Self {
        match self {
            Section::Day => Section::Night,
            Section::Night => Section::Day,
        }
    }

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Section::Day => "Day",
            Section::Night => "Night",
        }
    }
}

/// Detail modal visibility together with the entity it shows.
///
/// Opening and closing always change both at once, so a closed modal never
/// holds a stale selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    /// Nothing on display.
    #[default]
    Closed,
    /// Showing the venue or event with this id.
    Open(u32),
}

impl Modal {
    /// Id of the entity on display.
    pub fn selected(&self) -> Option<u32> {
        match self {
            Modal::Closed => None,
            Modal::Open(id) => Some(*id),
        }
    }

    /// Whether the modal is visible.
    pub fn is_open(&self) -> bool {
        matches!(self, Modal::Open(_))
    }
}

/// Application-wide view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppView {
    /// Section currently on screen.
    pub section: Section,
}

/// Input accepted by [`AppView::reduce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Switch to the given section.
    Show(Section),
    /// Switch to the other section.
    ToggleSection,
}

impl AppView {
    /// Start on `section`.
    pub fn new(section: Section) -> Self {
        Self { section }
    }

    /// Apply an action and return the resulting state.
    pub fn reduce(self, action: AppAction) -> Self {
        match action {
            AppAction::Show(section) => Self { section },
            AppAction::ToggleSection => Self {
                section: self.section.toggled(),
            },
        }
    }
}

/// State of the venue browser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayView {
    /// Search text and selectors.
    pub filter: VenueFilter,
    /// Whether the filter panel is expanded.
    pub show_filters: bool,
    /// Venue detail modal.
    pub modal: Modal,
}

/// Input accepted by [`DayView::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum DayAction {
    /// Replace the search text.
    SetSearch(String),
    /// Choose a city.
    SetLocation(Selector),
    /// Choose a minimum rating; empty means any.
    SetMinRating(String),
    /// Choose a venue type.
    SetVenueType(Selector),
    /// Expand or collapse the filter panel.
    ToggleFilters,
    /// Reset selectors, keeping the search text.
    ClearFilters,
    /// Show details for the venue with this id.
    OpenDetails(u32),
    /// Hide the detail modal.
    CloseDetails,
}

impl DayView {
    /// Apply an action and return the resulting state.
    pub fn reduce(self, action: DayAction) -> Self {
        match action {
            DayAction::SetSearch(search) => Self {
                filter: VenueFilter {
                    search,
                    ..self.filter
                },
                ..self
            },
            DayAction::SetLocation(location) => Self {
                filter: VenueFilter {
                    location,
                    ..self.filter
                },
                ..self
            },
            DayAction::SetMinRating(min_rating) => Self {
                filter: VenueFilter {
                    min_rating,
                    ..self.filter
                },
                ..self
            },
            DayAction::SetVenueType(venue_type) => Self {
                filter: VenueFilter {
                    venue_type,
                    ..self.filter
                },
                ..self
            },
            DayAction::ToggleFilters => Self {
                show_filters: !self.show_filters,
                ..self
            },
            DayAction::ClearFilters => Self {
                filter: self.filter.cleared(),
                ..self
            },
            DayAction::OpenDetails(id) => Self {
                modal: Modal::Open(id),
                ..self
            },
            DayAction::CloseDetails => Self {
                modal: Modal::Closed,
                ..self
            },
        }
    }

    /// Venues passing the current filter.
    pub fn visible<'a>(&self, venues: &'a [Venue]) -> Vec<&'a Venue> {
        self.filter.apply(venues)
    }
}

/// How the night section lays out its events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NightContent {
    /// Week or month grid with a day agenda.
    #[default]
    Calendar,
    /// Flat list of matching events.
    List,
}

/// State of the event browser.
#[derive(Debug, Clone, PartialEq)]
pub struct NightView {
    /// Search text and selectors.
    pub filter: EventFilter,
    /// Whether the filter panel is expanded.
    pub show_filters: bool,
    /// Calendar or list layout.
    pub content: NightContent,
    /// Anchor, mode and selection of the calendar.
    pub calendar: CalendarState,
    /// Event detail modal.
    pub modal: Modal,
}

/// Input accepted by [`NightView::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum NightAction {
    /// Replace the search text.
    SetSearch(String),
    /// Choose a city.
    SetLocation(Selector),
    /// Choose a genre.
    SetGenre(Selector),
    /// Choose a `YYYY-MM-DD` date.
    SetDate(Selector),
    /// Expand or collapse the filter panel.
    ToggleFilters,
    /// Reset selectors, keeping the search text.
    ClearFilters,
    /// Switch between calendar and list.
    ShowContent(NightContent),
    /// Show details for the event with this id.
    OpenDetails(u32),
    /// Hide the detail modal.
    CloseDetails,
    /// Forward to the calendar reducer.
    Calendar(CalendarAction),
}

impl NightView {
    /// Fresh state with the calendar showing `today`.
    pub fn new(today: NaiveDate, mode: CalendarMode) -> Self {
        Self {
            filter: EventFilter::default(),
            show_filters: false,
            content: NightContent::default(),
            calendar: CalendarState::with_mode(today, mode),
            modal: Modal::Closed,
        }
    }

    /// Apply an action and return the resulting state.
    pub fn reduce(self, action: NightAction) -> Self {
        match action {
            NightAction::SetSearch(search) => Self {
                filter: EventFilter {
                    search,
                    ..self.filter
                },
                ..self
            },
            NightAction::SetLocation(location) => Self {
                filter: EventFilter {
                    location,
                    ..self.filter
                },
                ..self
            },
            NightAction::SetGenre(genre) => Self {
                filter: EventFilter {
                    genre,
                    ..self.filter
                },
                ..self
            },
            NightAction::SetDate(date) => Self {
                filter: EventFilter {
                    date,
                    ..self.filter
                },
                ..self
            },
            NightAction::ToggleFilters => Self {
                show_filters: !self.show_filters,
                ..self
            },
            NightAction::ClearFilters => Self {
                filter: self.filter.cleared(),
                ..self
            },
            NightAction::ShowContent(content) => Self { content, ..self },
            NightAction::OpenDetails(id) => Self {
                modal: Modal::Open(id),
                ..self
            },
            NightAction::CloseDetails => Self {
                modal: Modal::Closed,
                ..self
            },
            NightAction::Calendar(action) => Self {
                calendar: self.calendar.reduce(action),
                ..self
            },
        }
    }

    /// Events passing the current filter, in catalog order.
    pub fn visible<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        self.filter.apply(events)
    }
}
