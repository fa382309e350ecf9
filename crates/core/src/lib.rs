#![warn(clippy::all, missing_docs)]

//! Core domain logic for WhereTo?.
//!
//! This crate hosts the venue and event catalogs, the filter engine, the
//! calendar grid builder, view-state reducers and configuration handling
//! used by the terminal UI and any future frontends.

pub mod calendar;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod models;
pub mod view;

pub use calendar::{CalendarAction, CalendarGrid, CalendarMode, CalendarState, DayAgenda};
pub use catalog::Catalog;
pub use config::AppConfig;
pub use error::CatalogError;
pub use filter::{EventFilter, Selector, VenueFilter};
pub use models::{ContactAction, Event, Genre, Venue};
pub use view::{AppView, DayView, Modal, NightContent, NightView, Section};
