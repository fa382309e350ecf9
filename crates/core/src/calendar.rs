//! Calendar grid construction and navigation state.
//!
//! Grids are Monday-aligned. A week grid holds the seven days of the anchor's
//! week; a month grid always holds 42 days (six full weeks) starting on the
//! Monday on or before the first of the anchor's month. Events are bucketed
//! into cells by exact `YYYY-MM-DD` string equality, with no timezone maths.

use chrono::{Datelike, Days, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::models::Event;

/// Days in a week grid.
pub const WEEK_CELLS: usize = 7;
/// Days in a month grid.
pub const MONTH_CELLS: usize = 42;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// Calendar-date string conversion.
pub trait IsoDate {
    /// Render as `YYYY-MM-DD`.
    fn to_iso_date_string(&self) -> String;
}

impl IsoDate for NaiveDate {
    fn to_iso_date_string(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

/// Parse a strict `YYYY-MM-DD` string into a calendar date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !ISO_DATE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date - Days::new(offset)
}

/// Whether the grid shows one week or a whole month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarMode {
    /// Seven days, Monday to Sunday.
    #[default]
    Week,
    /// Six weeks covering the anchor's month.
    Month,
}

impl CalendarMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            CalendarMode::Week => CalendarMode::Month,
            CalendarMode::Month => CalendarMode::Week,
        }
    }

    /// Short label for headers and status lines.
    pub fn label(self) -> &'static str {
        match self {
            CalendarMode::Week => "Week",
            CalendarMode::Month => "Month",
        }
    }
}

/// Dates shown by a grid in `mode` for the given anchor.
pub fn grid_dates(mode: CalendarMode, anchor: NaiveDate) -> Vec<NaiveDate> {
    let (start, len) = match mode {
        CalendarMode::Week => (week_start(anchor), WEEK_CELLS),
        CalendarMode::Month => (week_start(first_of_month(anchor)), MONTH_CELLS),
    };
    start.iter_days().take(len).collect()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Anchor that puts `date` on screen: its Monday in week mode, the date
/// itself in month mode so the header names the month `date` falls in.
fn anchor_for(mode: CalendarMode, date: NaiveDate) -> NaiveDate {
    match mode {
        CalendarMode::Week => week_start(date),
        CalendarMode::Month => date,
    }
}

/// One day of a rendered grid together with its events.
#[derive(Debug, Clone)]
pub struct GridCell<'a> {
    /// Calendar date of the cell.
    pub date: NaiveDate,
    /// `YYYY-MM-DD` form of [`GridCell::date`].
    pub key: String,
    /// Leading or trailing day borrowed from an adjacent month (month mode only).
    pub outside_month: bool,
    /// The cell is today's date.
    pub is_today: bool,
    /// The cell is the selected date.
    pub is_selected: bool,
    /// Events on this date, in input order.
    pub events: Vec<&'a Event>,
}

/// A fully bucketed calendar grid.
#[derive(Debug, Clone)]
pub struct CalendarGrid<'a> {
    /// Mode the grid was built for.
    pub mode: CalendarMode,
    /// Cells in date order: 7 for a week, 42 for a month.
    pub cells: Vec<GridCell<'a>>,
}

impl<'a> CalendarGrid<'a> {
    /// Bucket `events` into the grid described by `state`.
    ///
    /// `today` is supplied by the caller on every render so that a session
    /// crossing midnight moves the highlight.
    pub fn build(state: &CalendarState, events: &'a [Event], today: NaiveDate) -> Self {
        let today_key = today.to_iso_date_string();
        let selected_key = state.selected.map(|date| date.to_iso_date_string());
        let anchor_month = (state.anchor.year(), state.anchor.month());

        let cells = grid_dates(state.mode, state.anchor)
            .into_iter()
            .map(|date| {
                let key = date.to_iso_date_string();
                let outside_month = state.mode == CalendarMode::Month
                    && (date.year(), date.month()) != anchor_month;
                GridCell {
                    date,
                    outside_month,
                    is_today: key == today_key,
                    is_selected: selected_key.as_deref() == Some(key.as_str()),
                    events: events_on(events, &key),
                    key,
                }
            })
            .collect();

        Self {
            mode: state.mode,
            cells,
        }
    }

    /// Grid rows of seven cells each.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell<'a>]> {
        self.cells.chunks(WEEK_CELLS)
    }
}

/// Events whose `date` string equals `key`.
pub fn events_on<'a>(events: &'a [Event], key: &str) -> Vec<&'a Event> {
    events.iter().filter(|event| event.date == key).collect()
}

/// What to show for the selected date.
#[derive(Debug, Clone, PartialEq)]
pub enum DayAgenda<'a> {
    /// Nothing selected.
    NoSelection,
    /// A date is selected but has no events.
    Empty(NaiveDate),
    /// Events on the selected date.
    Events(NaiveDate, Vec<&'a Event>),
}

/// Navigation state of the calendar: anchor, mode and selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    /// Week mode shows the anchor's week; month mode shows its month.
    pub anchor: NaiveDate,
    /// Week or month grid.
    pub mode: CalendarMode,
    /// Date whose agenda is shown, if any.
    pub selected: Option<NaiveDate>,
}

/// Input accepted by [`CalendarState::reduce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarAction {
    /// Move back one week or one month.
    Previous,
    /// Move forward one week or one month.
    Next,
    /// Switch between week and month grids.
    ToggleMode,
    /// Toggle selection of a date.
    Select(NaiveDate),
    /// Return to the week or month containing the given date.
    JumpTo(NaiveDate),
}

impl CalendarState {
    /// Initial state: the Monday of `today`'s week, week mode, nothing selected.
    pub fn new(today: NaiveDate) -> Self {
        Self::with_mode(today, CalendarMode::Week)
    }

    /// Initial state in a chosen mode.
    pub fn with_mode(today: NaiveDate, mode: CalendarMode) -> Self {
        Self {
            anchor: anchor_for(mode, today),
            mode,
            selected: None,
        }
    }

    /// Apply an action and return the resulting state.
    pub fn reduce(self, action: CalendarAction) -> Self {
        match action {
            CalendarAction::Previous => Self {
                anchor: self.shifted(false),
                ..self
            },
            CalendarAction::Next => Self {
                anchor: self.shifted(true),
                ..self
            },
            CalendarAction::ToggleMode => Self {
                mode: self.mode.toggled(),
                selected: None,
                ..self
            },
            CalendarAction::Select(date) => Self {
                selected: if self.selected == Some(date) {
                    None
                } else {
                    Some(date)
                },
                ..self
            },
            CalendarAction::JumpTo(date) => Self {
                anchor: anchor_for(self.mode, date),
                selected: None,
                ..self
            },
        }
    }

    fn shifted(&self, forward: bool) -> NaiveDate {
        let shifted = match (self.mode, forward) {
            (CalendarMode::Week, true) => self.anchor.checked_add_days(Days::new(7)),
            (CalendarMode::Week, false) => self.anchor.checked_sub_days(Days::new(7)),
            (CalendarMode::Month, true) => self.anchor.checked_add_months(Months::new(1)),
            (CalendarMode::Month, false) => self.anchor.checked_sub_months(Months::new(1)),
        };
        // Only fails at chrono's representable limits.
        shifted.unwrap_or(self.anchor)
    }

    /// Dates visible in the current grid.
    pub fn visible_dates(&self) -> Vec<NaiveDate> {
        grid_dates(self.mode, self.anchor)
    }

    /// Agenda for the current selection drawn from `events`.
    pub fn agenda<'a>(&self, events: &'a [Event]) -> DayAgenda<'a> {
        match self.selected {
            None => DayAgenda::NoSelection,
            Some(date) => {
                let matches = events_on(events, &date.to_iso_date_string());
                if matches.is_empty() {
                    DayAgenda::Empty(date)
                } else {
                    DayAgenda::Events(date, matches)
                }
            }
        }
    }

    /// Header label for the visible range.
    pub fn range_label(&self) -> String {
        match self.mode {
            CalendarMode::Week => {
                let start = week_start(self.anchor);
                let end = start + Days::new(6);
                format!(
                    "{} - {}",
                    start.format("%B %-d"),
                    end.format("%B %-d, %Y")
                )
            }
            CalendarMode::Month => self.anchor.format("%B %Y").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::event;

    fn date(value: &str) -> NaiveDate {
        parse_iso_date(value).expect("test date")
    }

    fn state(anchor: &str, mode: CalendarMode) -> CalendarState {
        CalendarState {
            anchor: date(anchor),
            mode,
            selected: None,
        }
    }

    #[test]
    fn week_start_is_monday() {
        assert_eq!(week_start(date("2024-01-10")), date("2024-01-08"));
        assert_eq!(week_start(date("2024-01-08")), date("2024-01-08"));
        // Sunday backs up six days.
        assert_eq!(week_start(date("2024-01-14")), date("2024-01-08"));
    }

    #[test]
    fn week_grid_spans_monday_to_sunday() {
        let dates = grid_dates(CalendarMode::Week, date("2024-01-10"));
        assert_eq!(dates.len(), WEEK_CELLS);
        assert_eq!(dates[0], date("2024-01-08"));
        assert_eq!(dates[6], date("2024-01-14"));
    }

    #[test]
    fn month_grid_always_has_six_weeks() {
        let january = grid_dates(CalendarMode::Month, date("2024-01-17"));
        assert_eq!(january.len(), MONTH_CELLS);
        assert_eq!(january[0], date("2024-01-01"));

        let february = grid_dates(CalendarMode::Month, date("2024-02-01"));
        assert_eq!(february.len(), MONTH_CELLS);
        assert_eq!(february[0], date("2024-01-29"));
        assert_eq!(february[41], date("2024-03-10"));
    }

    #[test]
    fn month_grid_flags_adjacent_month_days() {
        let events = vec![
            event(1, "January Close", "2024-01-30", "21:00"),
            event(2, "Leap Night", "2024-02-29", "22:00"),
            event(3, "Early March", "2024-03-08", "20:00"),
        ];
        let calendar = state("2024-02-01", CalendarMode::Month);
        let grid = CalendarGrid::build(&calendar, &events, date("2024-02-14"));
        assert!(grid.cells[0].outside_month);
        assert!(!grid.cells[3].outside_month);
        assert_eq!(grid.cells[3].key, "2024-02-01");
        assert!(grid.cells.last().map(|c| c.outside_month).unwrap_or(false));
        assert_eq!(grid.weeks().count(), 6);

        // Dimmed days still carry their events.
        assert_eq!(grid.cells[1].key, "2024-01-30");
        assert!(grid.cells[1].outside_month);
        let ids: Vec<u32> = grid.cells[1].events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(grid.cells[31].key, "2024-02-29");
        assert_eq!(grid.cells[31].events.len(), 1);
        assert_eq!(grid.cells[39].key, "2024-03-08");
        assert!(grid.cells[39].outside_month);
        assert_eq!(grid.cells[39].events.len(), 1);

        let picked = calendar.reduce(CalendarAction::Select(date("2024-01-30")));
        let grid = CalendarGrid::build(&picked, &events, date("2024-02-14"));
        assert!(grid.cells[1].is_selected);
        match picked.agenda(&events) {
            DayAgenda::Events(day, list) => {
                assert_eq!(day, date("2024-01-30"));
                assert_eq!(list.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);
            }
            other => panic!("expected events, got {other:?}"),
        }
        assert_eq!(picked.anchor, calendar.anchor);

        let week = CalendarGrid::build(
            &state("2024-01-29", CalendarMode::Week),
            &events,
            date("2024-02-14"),
        );
        assert!(week.cells.iter().all(|cell| !cell.outside_month));
    }

    #[test]
    fn events_land_only_in_their_own_cell() {
        let events = vec![
            event(1, "Midnight Set", "2024-01-10", "00:00"),
            event(2, "Late Set", "2024-01-10", "23:59"),
            event(3, "Other Night", "2024-01-11", "21:00"),
        ];
        let grid = CalendarGrid::build(
            &state("2024-01-08", CalendarMode::Week),
            &events,
            date("2024-01-01"),
        );
        for cell in &grid.cells {
            let ids: Vec<u32> = cell.events.iter().map(|event| event.id).collect();
            match cell.key.as_str() {
                "2024-01-10" => assert_eq!(ids, vec![1, 2]),
                "2024-01-11" => assert_eq!(ids, vec![3]),
                _ => assert!(ids.is_empty(), "unexpected events on {}", cell.key),
            }
        }
    }

    #[test]
    fn today_and_selection_are_highlighted() {
        let events = Vec::new();
        let mut calendar = state("2024-01-08", CalendarMode::Week);
        calendar = calendar.reduce(CalendarAction::Select(date("2024-01-12")));
        let grid = CalendarGrid::build(&calendar, &events, date("2024-01-09"));
        let today: Vec<_> = grid.cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].key, "2024-01-09");
        let selected: Vec<_> = grid.cells.iter().filter(|c| c.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].key, "2024-01-12");
    }

    #[test]
    fn selecting_twice_clears_selection() {
        let initial = CalendarState::new(date("2024-01-10"));
        assert_eq!(initial.selected, None);
        let picked = initial.reduce(CalendarAction::Select(date("2024-01-11")));
        assert_eq!(picked.selected, Some(date("2024-01-11")));
        let other = picked.reduce(CalendarAction::Select(date("2024-01-12")));
        assert_eq!(other.selected, Some(date("2024-01-12")));
        let cleared = other.reduce(CalendarAction::Select(date("2024-01-12")));
        assert_eq!(cleared.selected, None);
    }

    #[test]
    fn toggling_mode_clears_selection() {
        let picked = CalendarState::new(date("2024-01-10"))
            .reduce(CalendarAction::Select(date("2024-01-11")));
        let month = picked.reduce(CalendarAction::ToggleMode);
        assert_eq!(month.mode, CalendarMode::Month);
        assert_eq!(month.selected, None);
        assert_eq!(month.anchor, picked.anchor);

        let back = month
            .reduce(CalendarAction::Select(date("2024-01-20")))
            .reduce(CalendarAction::ToggleMode);
        assert_eq!(back.mode, CalendarMode::Week);
        assert_eq!(back.selected, None);
    }

    #[test]
    fn initial_state_anchors_on_current_monday() {
        let calendar = CalendarState::new(date("2024-01-14"));
        assert_eq!(calendar.anchor, date("2024-01-08"));
        assert_eq!(calendar.mode, CalendarMode::Week);
    }

    #[test]
    fn week_navigation_moves_seven_days() {
        let calendar = state("2024-01-08", CalendarMode::Week);
        assert_eq!(
            calendar.reduce(CalendarAction::Next).anchor,
            date("2024-01-15")
        );
        assert_eq!(
            calendar.reduce(CalendarAction::Previous).anchor,
            date("2024-01-01")
        );
    }

    #[test]
    fn month_navigation_clamps_day_of_month() {
        let calendar = state("2024-01-31", CalendarMode::Month);
        let next = calendar.reduce(CalendarAction::Next);
        assert_eq!(next.anchor, date("2024-02-29"));
        assert_eq!(
            state("2024-03-31", CalendarMode::Month)
                .reduce(CalendarAction::Previous)
                .anchor,
            date("2024-02-29")
        );
        assert_eq!(
            state("2024-12-15", CalendarMode::Month)
                .reduce(CalendarAction::Next)
                .anchor,
            date("2025-01-15")
        );
    }

    #[test]
    fn navigation_keeps_selection() {
        let calendar = state("2024-01-08", CalendarMode::Week)
            .reduce(CalendarAction::Select(date("2024-01-09")))
            .reduce(CalendarAction::Next);
        assert_eq!(calendar.selected, Some(date("2024-01-09")));
    }

    #[test]
    fn jump_to_today_resets_anchor_and_selection() {
        let calendar = state("2023-06-05", CalendarMode::Month)
            .reduce(CalendarAction::Select(date("2023-06-07")))
            .reduce(CalendarAction::JumpTo(date("2024-01-10")));
        assert_eq!(calendar.anchor, date("2024-01-10"));
        assert_eq!(calendar.selected, None);
        assert_eq!(calendar.mode, CalendarMode::Month);

        let week = state("2023-06-05", CalendarMode::Week)
            .reduce(CalendarAction::JumpTo(date("2024-01-10")));
        assert_eq!(week.anchor, date("2024-01-08"));
    }

    #[test]
    fn month_mode_opens_on_the_month_of_today() {
        // The week of 2026-10-01 starts on Monday 2026-09-28.
        let calendar = CalendarState::with_mode(date("2026-10-01"), CalendarMode::Month);
        assert_eq!(calendar.range_label(), "October 2026");
        let grid = CalendarGrid::build(&calendar, &[], date("2026-10-01"));
        let today = grid.cells.iter().find(|cell| cell.is_today);
        assert!(today.map(|cell| !cell.outside_month).unwrap_or(false));

        let back = state("2026-08-03", CalendarMode::Month)
            .reduce(CalendarAction::JumpTo(date("2026-10-01")));
        assert_eq!(back.range_label(), "October 2026");

        let week = calendar.reduce(CalendarAction::ToggleMode);
        assert_eq!(week.range_label(), "September 28 - October 4, 2026");
    }

    #[test]
    fn agenda_distinguishes_empty_days() {
        let events = vec![event(1, "Jazz Night", "2024-01-10", "20:00")];
        let calendar = state("2024-01-08", CalendarMode::Week);
        assert_eq!(calendar.agenda(&events), DayAgenda::NoSelection);

        let quiet = calendar.reduce(CalendarAction::Select(date("2024-01-11")));
        assert_eq!(quiet.agenda(&events), DayAgenda::Empty(date("2024-01-11")));

        let busy = calendar.reduce(CalendarAction::Select(date("2024-01-10")));
        match busy.agenda(&events) {
            DayAgenda::Events(day, list) => {
                assert_eq!(day, date("2024-01-10"));
                assert_eq!(list.len(), 1);
            }
            other => panic!("expected events, got {other:?}"),
        }
    }

    #[test]
    fn range_labels_follow_mode() {
        assert_eq!(
            state("2024-01-10", CalendarMode::Week).range_label(),
            "January 8 - January 14, 2024"
        );
        assert_eq!(
            state("2024-02-29", CalendarMode::Month).range_label(),
            "February 2024"
        );
    }

    #[test]
    fn strict_iso_parsing() {
        assert_eq!(date("2024-01-10").to_iso_date_string(), "2024-01-10");
        assert!(parse_iso_date("2024-1-10").is_none());
        assert!(parse_iso_date("2024-02-30").is_none());
        assert!(parse_iso_date("").is_none());
    }
}
