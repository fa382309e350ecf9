use std::{io, sync::Arc, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate};
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info};
use whereto_core::{
    calendar::{parse_iso_date, CalendarAction, DayAgenda, IsoDate},
    filter::{genre_options, Selector, LOCATIONS, RATING_THRESHOLDS, VENUE_TYPES},
    view::{AppAction, DayAction, NightAction},
    AppConfig, AppView, Catalog, ContactAction, DayView, Event, Modal, NightContent, NightView,
    Section, Venue,
};

mod render;

const TICK_RATE: Duration = Duration::from_millis(250);

enum AppEvent {
    Input(TermEvent),
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
    Filters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterField {
    Location,
    MinRating,
    VenueType,
    Genre,
    Date,
}

impl FilterField {
    fn for_section(section: Section) -> &'static [FilterField] {
        match section {
            Section::Day => &[
                FilterField::Location,
                FilterField::MinRating,
                FilterField::VenueType,
            ],
            Section::Night => &[FilterField::Location, FilterField::Genre, FilterField::Date],
        }
    }

    fn label(self) -> &'static str {
        match self {
            FilterField::Location => "Location",
            FilterField::MinRating => "Minimum Rating",
            FilterField::VenueType => "Venue Type",
            FilterField::Genre => "Music Genre",
            FilterField::Date => "Event Date",
        }
    }
}

/// Terminal front end for browsing venues and events.
pub struct WhereToApp {
    catalog: Arc<Catalog>,
    view: AppView,
    day: DayView,
    night: NightView,
    state: UiState,
    today: NaiveDate,
}

impl WhereToApp {
    pub fn new(catalog: Arc<Catalog>, config: &AppConfig) -> Self {
        Self::with_today(catalog, config, Local::now().date_naive())
    }

    fn with_today(catalog: Arc<Catalog>, config: &AppConfig, today: NaiveDate) -> Self {
        let mut app = Self {
            catalog,
            view: AppView::new(config.start_section),
            day: DayView::default(),
            night: NightView::new(today, config.calendar_mode),
            state: UiState::default(),
            today,
        };
        app.place_cell_cursor(today);
        app
    }

    pub async fn run(&mut self) -> Result<()> {
        self.state.set_status(format!(
            "Loaded {} venues and {} events",
            self.catalog.venues().len(),
            self.catalog.events().len()
        ));

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }
            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) || self.state.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        info!("Session ended");
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Err(err) = self.handle_input(event) {
                    self.state.set_status(format!("Error: {err}"));
                }
                true
            }
            Some(AppEvent::Tick) => {
                self.handle_tick();
                true
            }
            None => false,
        }
    }

    fn handle_tick(&mut self) {
        let today = Local::now().date_naive();
        if today != self.today {
            debug!(%today, "Local date changed");
            self.today = today;
        }
    }

    fn handle_input(&mut self, event: TermEvent) -> Result<()> {
        match event {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            _ => Ok(()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.active_modal().is_open() {
            return self.handle_modal_key(key);
        }
        match self.state.mode {
            Mode::Search => self.handle_search_key(key),
            Mode::Filters => self.handle_filters_key(key),
            Mode::Browse => self.handle_browse_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.state.mode = Mode::Browse;
                self.state
                    .set_status(format!("Search: {}", self.search_text()));
            }
            KeyCode::Backspace => {
                let mut text = self.search_text().to_string();
                text.pop();
                self.set_search(text);
            }
            KeyCode::Char(c) => {
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                    let mut text = self.search_text().to_string();
                    text.push(c);
                    self.set_search(text);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_filters_key(&mut self, key: KeyEvent) -> Result<()> {
        let fields = FilterField::for_section(self.view.section).len();
        let field = self.focused_filter();
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.state.mode = Mode::Browse;
                self.state.set_status("Filters applied".to_string());
            }
            KeyCode::Char('f') => self.toggle_filters(),
            KeyCode::Char('x') => self.clear_filters(),
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => {
                self.state.filter_field = (self.state.filter_field + fields - 1) % fields;
            }
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => {
                self.state.filter_field = (self.state.filter_field + 1) % fields;
            }
            KeyCode::Left | KeyCode::Char('h') => self.cycle_filter(field, -1),
            KeyCode::Right | KeyCode::Char('l') => self.cycle_filter(field, 1),
            KeyCode::Backspace if field == FilterField::Date => {
                let mut input = self.state.date_input.clone();
                input.pop();
                self.edit_date_input(input);
            }
            KeyCode::Char(c) if field == FilterField::Date && is_date_char(c) => {
                if self.state.date_input.len() < 10 {
                    let mut input = self.state.date_input.clone();
                    input.push(c);
                    self.edit_date_input(input);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn focused_filter(&self) -> FilterField {
        let fields = FilterField::for_section(self.view.section);
        fields[self.state.filter_field.min(fields.len() - 1)]
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => self.state.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.should_quit = true
            }
            KeyCode::Tab => self.dispatch_app(AppAction::ToggleSection),
            KeyCode::Char('1') => self.dispatch_app(AppAction::Show(Section::Day)),
            KeyCode::Char('2') => self.dispatch_app(AppAction::Show(Section::Night)),
            KeyCode::Char('/') => {
                self.state.mode = Mode::Search;
                self.state.set_status("Type to search".to_string());
            }
            KeyCode::Char('f') => self.toggle_filters(),
            KeyCode::Char('x') => self.clear_filters(),
            KeyCode::Char('b') if key.modifiers.is_empty() => {
                self.state.show_banner = !self.state.show_banner;
                let message = if self.state.show_banner {
                    "Banner enabled"
                } else {
                    "Banner hidden"
                };
                self.state.set_status(message.to_string());
            }
            _ => match self.view.section {
                Section::Day => self.handle_day_key(key),
                Section::Night => self.handle_night_key(key),
            },
        }
        Ok(())
    }

    fn handle_day_key(&mut self, key: KeyEvent) {
        let len = self.visible_venues().len();
        if self.state.venue_list.handle_key(key, len) {
            return;
        }
        if key.code == KeyCode::Enter {
            if let Some(id) = self.current_venue().map(|venue| venue.id) {
                self.dispatch_day(DayAction::OpenDetails(id));
            }
        }
    }

    fn handle_night_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('v') => {
                let content = match self.night.content {
                    NightContent::Calendar => NightContent::List,
                    NightContent::List => NightContent::Calendar,
                };
                self.dispatch_night(NightAction::ShowContent(content));
                self.state.set_status(match content {
                    NightContent::Calendar => "Calendar view".to_string(),
                    NightContent::List => "List view".to_string(),
                });
            }
            KeyCode::Char(',') => self.cycle_location_pill(-1),
            KeyCode::Char('.') => self.cycle_location_pill(1),
            _ => match self.night.content {
                NightContent::List => self.handle_event_list_key(key),
                NightContent::Calendar => self.handle_calendar_key(key),
            },
        }
    }

    fn handle_event_list_key(&mut self, key: KeyEvent) {
        let len = self.visible_events().len();
        if self.state.event_list.handle_key(key, len) {
            return;
        }
        if key.code == KeyCode::Enter {
            if let Some(id) = self.current_event().map(|event| event.id) {
                self.dispatch_night(NightAction::OpenDetails(id));
            }
        }
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_cell(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cell(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cell(-7),
            KeyCode::Down | KeyCode::Char('j') => self.move_cell(7),
            KeyCode::Char(' ') => self.toggle_cursor_selection(),
            KeyCode::Char('[') => self.navigate_calendar(CalendarAction::Previous),
            KeyCode::Char(']') => self.navigate_calendar(CalendarAction::Next),
            KeyCode::Char('m') => {
                let focus = self.cursor_date();
                self.dispatch_night(NightAction::Calendar(CalendarAction::ToggleMode));
                match focus {
                    Some(date) => self.place_cell_cursor(date),
                    None => self.state.cell_cursor = 0,
                }
                self.state.agenda_cursor = 0;
                self.state.set_status(format!(
                    "{} view: {}",
                    self.night.calendar.mode.label(),
                    self.night.calendar.range_label()
                ));
            }
            KeyCode::Char('t') => {
                self.dispatch_night(NightAction::Calendar(CalendarAction::JumpTo(self.today)));
                self.place_cell_cursor(self.today);
                self.state.agenda_cursor = 0;
                self.state.set_status("Jumped to today".to_string());
            }
            KeyCode::Char('J') => {
                let len = self.agenda_ids().len();
                if len > 0 {
                    self.state.agenda_cursor = (self.state.agenda_cursor + 1).min(len - 1);
                }
            }
            KeyCode::Char('K') => {
                self.state.agenda_cursor = self.state.agenda_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                let ids = self.agenda_ids();
                match ids.get(self.state.agenda_cursor.min(ids.len().saturating_sub(1))) {
                    Some(id) => self.dispatch_night(NightAction::OpenDetails(*id)),
                    None => self.toggle_cursor_selection(),
                }
            }
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.state.modal_scroll = 0;
                match self.view.section {
                    Section::Day => self.dispatch_day(DayAction::CloseDetails),
                    Section::Night => self.dispatch_night(NightAction::CloseDetails),
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.modal_scroll = self.state.modal_scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.modal_scroll = self.state.modal_scroll.saturating_sub(1);
            }
            KeyCode::Char(c) => match self.view.section {
                Section::Day => self.trigger_venue_action(c),
                Section::Night => self.trigger_event_action(c),
            },
            _ => {}
        }
        Ok(())
    }

    fn trigger_venue_action(&mut self, key: char) {
        let Some(venue) = self.day.modal.selected().and_then(|id| self.catalog.venue(id)) else {
            return;
        };
        let action = venue
            .contact_actions()
            .into_iter()
            .find(|action| contact_key(action) == key);
        let message = match action {
            Some(ContactAction::Call(phone)) => format!("Calling {} at {phone}", venue.name),
            Some(ContactAction::Website(url)) => format!("Opening {url}"),
            Some(ContactAction::Reserve) => {
                format!("Reservation request for {} noted", venue.name)
            }
            None => return,
        };
        info!(venue = venue.id, key = %key, "Contact action");
        self.state.set_status(message);
    }

    fn trigger_event_action(&mut self, key: char) {
        let Some(event) = self
            .night
            .modal
            .selected()
            .and_then(|id| self.catalog.event(id))
        else {
            return;
        };
        let message = match key {
            'b' => format!("Tickets for {}: {}", event.name, event.price),
            'g' => format!("Directions to {}, {}", event.venue, event.location),
            _ => return,
        };
        info!(event = event.id, key = %key, "Event action");
        self.state.set_status(message);
    }

    fn dispatch_app(&mut self, action: AppAction) {
        self.view = self.view.reduce(action);
        self.state.mode = Mode::Browse;
        self.state.filter_field = 0;
        debug!(section = ?self.view.section, "Section changed");
        self.state
            .set_status(format!("{} section", self.view.section.label()));
    }

    fn dispatch_day(&mut self, action: DayAction) {
        debug!(?action, "Day action");
        self.day = std::mem::take(&mut self.day).reduce(action);
    }

    fn dispatch_night(&mut self, action: NightAction) {
        debug!(?action, "Night action");
        self.night = self.night.clone().reduce(action);
    }

    fn active_modal(&self) -> Modal {
        match self.view.section {
            Section::Day => self.day.modal,
            Section::Night => self.night.modal,
        }
    }

    fn search_text(&self) -> &str {
        match self.view.section {
            Section::Day => &self.day.filter.search,
            Section::Night => &self.night.filter.search,
        }
    }

    fn set_search(&mut self, text: String) {
        match self.view.section {
            Section::Day => self.dispatch_day(DayAction::SetSearch(text)),
            Section::Night => self.dispatch_night(NightAction::SetSearch(text)),
        }
        self.filters_changed();
    }

    fn toggle_filters(&mut self) {
        let shown = match self.view.section {
            Section::Day => {
                self.dispatch_day(DayAction::ToggleFilters);
                self.day.show_filters
            }
            Section::Night => {
                self.dispatch_night(NightAction::ToggleFilters);
                self.night.show_filters
            }
        };
        if shown {
            self.state.mode = Mode::Filters;
            self.state.filter_field = 0;
            self.state.set_status("Filters open".to_string());
        } else {
            self.state.mode = Mode::Browse;
            self.state.set_status("Filters hidden".to_string());
        }
    }

    fn clear_filters(&mut self) {
        match self.view.section {
            Section::Day => self.dispatch_day(DayAction::ClearFilters),
            Section::Night => {
                self.dispatch_night(NightAction::ClearFilters);
                self.state.date_input.clear();
            }
        }
        self.filters_changed();
        self.state.set_status("Filters cleared".to_string());
    }

    fn cycle_filter(&mut self, field: FilterField, delta: isize) {
        match field {
            FilterField::Location => match self.view.section {
                Section::Day => {
                    let next = self.day.filter.location.cycle(&LOCATIONS, delta);
                    self.dispatch_day(DayAction::SetLocation(next));
                }
                Section::Night => {
                    let next = self.night.filter.location.cycle(&LOCATIONS, delta);
                    self.dispatch_night(NightAction::SetLocation(next));
                }
            },
            FilterField::MinRating => {
                let current = Selector::from(self.day.filter.min_rating.as_str());
                let next = current.cycle(&RATING_THRESHOLDS, delta);
                let raw = next.value().unwrap_or_default().to_string();
                self.dispatch_day(DayAction::SetMinRating(raw));
            }
            FilterField::VenueType => {
                let next = self.day.filter.venue_type.cycle(&VENUE_TYPES, delta);
                self.dispatch_day(DayAction::SetVenueType(next));
            }
            FilterField::Genre => {
                let next = self.night.filter.genre.cycle(&genre_options(), delta);
                self.dispatch_night(NightAction::SetGenre(next));
            }
            FilterField::Date => {
                let base = parse_iso_date(&self.state.date_input).unwrap_or(self.today);
                let stepped = if delta < 0 {
                    base.checked_sub_days(Days::new(delta.unsigned_abs() as u64))
                } else {
                    base.checked_add_days(Days::new(delta as u64))
                };
                let date = if self.night.filter.date.is_active() {
                    stepped.unwrap_or(base)
                } else {
                    base
                };
                self.edit_date_input(date.to_iso_date_string());
            }
        }
        self.filters_changed();
    }

    /// Apply the date field once it holds a complete date or is emptied.
    fn edit_date_input(&mut self, input: String) {
        self.state.date_input = input;
        if self.state.date_input.is_empty() {
            self.dispatch_night(NightAction::SetDate(Selector::Any));
            self.filters_changed();
        } else if let Some(date) = parse_iso_date(&self.state.date_input) {
            self.dispatch_night(NightAction::SetDate(Selector::from(
                date.to_iso_date_string(),
            )));
            self.filters_changed();
        } else {
            self.state
                .set_status("Date must be YYYY-MM-DD".to_string());
        }
    }

    fn cycle_location_pill(&mut self, delta: isize) {
        let locations = self.catalog.event_locations();
        let options: Vec<&str> = locations.iter().map(String::as_str).collect();
        let next = self.night.filter.location.cycle(&options, delta);
        self.state.set_status(format!(
            "Location: {}",
            next.value().unwrap_or("All Locations")
        ));
        self.dispatch_night(NightAction::SetLocation(next));
        self.filters_changed();
    }

    fn filters_changed(&mut self) {
        self.state.venue_list.reset();
        self.state.event_list.reset();
        self.state.agenda_cursor = 0;
    }

    fn visible_venues(&self) -> Vec<&Venue> {
        self.day.visible(self.catalog.venues())
    }

    fn visible_events(&self) -> Vec<&Event> {
        self.night.visible(self.catalog.events())
    }

    fn current_venue(&self) -> Option<&Venue> {
        self.visible_venues()
            .get(self.state.venue_list.cursor)
            .copied()
    }

    fn current_event(&self) -> Option<&Event> {
        self.visible_events()
            .get(self.state.event_list.cursor)
            .copied()
    }

    /// Ids of the events listed under the selected calendar day.
    fn agenda_ids(&self) -> Vec<u32> {
        let events = self.night.filter.apply_owned(self.catalog.events());
        match self.night.calendar.agenda(&events) {
            DayAgenda::Events(_, list) => list.iter().map(|event| event.id).collect(),
            DayAgenda::NoSelection | DayAgenda::Empty(_) => Vec::new(),
        }
    }

    fn cursor_date(&self) -> Option<NaiveDate> {
        self.night
            .calendar
            .visible_dates()
            .get(self.state.cell_cursor)
            .copied()
    }

    fn place_cell_cursor(&mut self, date: NaiveDate) {
        let dates = self.night.calendar.visible_dates();
        self.state.cell_cursor = match dates.iter().position(|candidate| *candidate == date) {
            Some(index) => index,
            None => self.state.cell_cursor.min(dates.len().saturating_sub(1)),
        };
    }

    /// Move the cell cursor by `delta` days, paging the grid when it leaves the view.
    fn move_cell(&mut self, delta: i64) {
        let Some(current) = self.cursor_date() else {
            return;
        };
        let target = if delta < 0 {
            current.checked_sub_days(Days::new(delta.unsigned_abs()))
        } else {
            current.checked_add_days(Days::new(delta as u64))
        };
        let Some(target) = target else {
            return;
        };
        if !self.night.calendar.visible_dates().contains(&target) {
            let action = if delta < 0 {
                CalendarAction::Previous
            } else {
                CalendarAction::Next
            };
            self.dispatch_night(NightAction::Calendar(action));
        }
        self.place_cell_cursor(target);
    }

    fn navigate_calendar(&mut self, action: CalendarAction) {
        self.dispatch_night(NightAction::Calendar(action));
        let len = self.night.calendar.visible_dates().len();
        self.state.cell_cursor = self.state.cell_cursor.min(len.saturating_sub(1));
        self.state
            .set_status(self.night.calendar.range_label());
    }

    fn toggle_cursor_selection(&mut self) {
        if let Some(date) = self.cursor_date() {
            self.dispatch_night(NightAction::Calendar(CalendarAction::Select(date)));
            self.state.agenda_cursor = 0;
        }
    }
}

fn is_date_char(c: char) -> bool {
    c.is_ascii_digit() || c == '-'
}

fn contact_key(action: &ContactAction) -> char {
    match action {
        ContactAction::Call(_) => 'c',
        ContactAction::Website(_) => 'w',
        ContactAction::Reserve => 'r',
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

struct UiState {
    mode: Mode,
    filter_field: usize,
    date_input: String,
    venue_list: ListCursor,
    event_list: ListCursor,
    cell_cursor: usize,
    agenda_cursor: usize,
    modal_scroll: u16,
    status: String,
    show_banner: bool,
    should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            mode: Mode::Browse,
            filter_field: 0,
            date_input: String::new(),
            venue_list: ListCursor::default(),
            event_list: ListCursor::default(),
            cell_cursor: 0,
            agenda_cursor: 0,
            modal_scroll: 0,
            status: "Ready".to_string(),
            show_banner: true,
            should_quit: false,
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: String) {
        self.status = message;
    }
}

/// Scroll position of a list whose length is owned elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListCursor {
    cursor: usize,
    offset: usize,
    height: usize,
}

impl Default for ListCursor {
    fn default() -> Self {
        Self {
            cursor: 0,
            offset: 0,
            height: 1,
        }
    }
}

impl ListCursor {
    /// Handle list navigation keys; returns whether the key was consumed.
    fn handle_key(&mut self, key: KeyEvent, len: usize) -> bool {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_by(1, len),
            KeyCode::Char('k') | KeyCode::Up => self.move_by(-1, len),
            KeyCode::Char('g') | KeyCode::Home => self.move_to(0, len),
            KeyCode::Char('G') | KeyCode::End => self.move_to(len.saturating_sub(1), len),
            KeyCode::PageDown => self.move_by(self.height.min(len) as isize, len),
            KeyCode::PageUp => self.move_by(-(self.height.min(len) as isize), len),
            _ => return false,
        }
        true
    }

    fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let idx = (self.cursor as isize + delta).clamp(0, len as isize - 1);
        self.cursor = idx as usize;
        self.ensure_visible(len);
    }

    fn move_to(&mut self, index: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = index.min(len - 1);
        self.ensure_visible(len);
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.reset();
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    fn ensure_visible(&mut self, len: usize) {
        if len == 0 || self.height == 0 {
            self.offset = 0;
            return;
        }
        let max_offset = len.saturating_sub(self.height);
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use whereto_core::CalendarMode;

    fn date(value: &str) -> NaiveDate {
        parse_iso_date(value).expect("test date")
    }

    fn app_on(today: &str) -> Result<WhereToApp> {
        let catalog = Arc::new(Catalog::builtin()?);
        Ok(WhereToApp::with_today(
            catalog,
            &AppConfig::default(),
            date(today),
        ))
    }

    fn press(app: &mut WhereToApp, code: KeyCode) -> Result<()> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut WhereToApp, text: &str) -> Result<()> {
        for c in text.chars() {
            press(app, KeyCode::Char(c))?;
        }
        Ok(())
    }

    fn screen(app: &mut WhereToApp) -> Result<String> {
        let mut terminal = Terminal::new(TestBackend::new(160, 50))?;
        terminal.draw(|frame| app.draw(frame))?;
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let rows: Vec<String> = buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect();
        Ok(rows.join("\n"))
    }

    #[test]
    fn day_section_lists_every_venue() -> Result<()> {
        let mut app = app_on("2026-10-17")?;
        let text = screen(&mut app)?;
        assert!(text.contains("Featured Venues (18)"));
        assert!(text.contains("Rosewood Cafe"));
        Ok(())
    }

    #[test]
    fn search_without_matches_shows_empty_state() -> Result<()> {
        let mut app = app_on("2026-10-17")?;
        press(&mut app, KeyCode::Char('/'))?;
        type_text(&mut app, "zzzq")?;
        assert_eq!(app.day.filter.search, "zzzq");
        assert!(!app.state.should_quit);
        let text = screen(&mut app)?;
        assert!(text.contains("Featured Venues (0)"));
        assert!(text.contains("No venues found matching your criteria."));
        assert!(text.contains("Try adjusting your filters or search terms."));

        press(&mut app, KeyCode::Esc)?;
        assert_eq!(app.state.mode, Mode::Browse);
        assert_eq!(app.day.filter.search, "zzzq");
        Ok(())
    }

    #[test]
    fn filter_panel_cycles_location() -> Result<()> {
        let mut app = app_on("2026-10-17")?;
        press(&mut app, KeyCode::Char('f'))?;
        assert_eq!(app.state.mode, Mode::Filters);
        press(&mut app, KeyCode::Right)?;
        assert_eq!(app.day.filter.location, Selector::from("New York"));
        assert_eq!(app.visible_venues().len(), 3);

        press(&mut app, KeyCode::Down)?;
        press(&mut app, KeyCode::Right)?;
        press(&mut app, KeyCode::Right)?;
        assert_eq!(app.day.filter.min_rating, "4.5");
        assert!(screen(&mut app)?.contains("Featured Venues (3)"));

        press(&mut app, KeyCode::Char('x'))?;
        assert_eq!(app.visible_venues().len(), 18);
        Ok(())
    }

    #[test]
    fn venue_modal_offers_contact_actions() -> Result<()> {
        let mut app = app_on("2026-10-17")?;
        press(&mut app, KeyCode::Enter)?;
        assert_eq!(app.day.modal, Modal::Open(1));
        let text = screen(&mut app)?;
        assert!(text.contains("Call Now"));
        assert!(text.contains("Visit Website"));
        assert!(!text.contains("Make Reservation"));

        press(&mut app, KeyCode::Char('c'))?;
        assert!(app.state.status.contains("(312) 555-0142"));
        press(&mut app, KeyCode::Esc)?;
        assert_eq!(app.day.modal, Modal::Closed);
        Ok(())
    }

    #[test]
    fn venue_without_contact_details_offers_reservation() -> Result<()> {
        let mut app = app_on("2026-10-17")?;
        press(&mut app, KeyCode::Char('/'))?;
        type_text(&mut app, "Harbor")?;
        press(&mut app, KeyCode::Enter)?;
        press(&mut app, KeyCode::Enter)?;
        assert_eq!(app.day.modal, Modal::Open(8));
        assert!(screen(&mut app)?.contains("Make Reservation"));
        press(&mut app, KeyCode::Char('r'))?;
        assert!(app.state.status.contains("Harbor Grill"));
        Ok(())
    }

    #[test]
    fn night_list_filters_by_date_input() -> Result<()> {
        let mut app = app_on("2026-10-17")?;
        press(&mut app, KeyCode::Tab)?;
        press(&mut app, KeyCode::Char('v'))?;
        assert!(screen(&mut app)?.contains("Upcoming Events (24)"));

        press(&mut app, KeyCode::Char('f'))?;
        press(&mut app, KeyCode::Down)?;
        press(&mut app, KeyCode::Down)?;
        type_text(&mut app, "2026-10-2")?;
        assert_eq!(app.night.filter.date, Selector::Any);
        type_text(&mut app, "4")?;
        assert_eq!(app.night.filter.date, Selector::from("2026-10-24"));
        assert!(screen(&mut app)?.contains("Upcoming Events (3)"));

        press(&mut app, KeyCode::Backspace)?;
        assert_eq!(app.night.filter.date, Selector::from("2026-10-24"));
        press(&mut app, KeyCode::Char('x'))?;
        assert_eq!(app.visible_events().len(), 24);
        assert!(app.state.date_input.is_empty());
        Ok(())
    }

    #[test]
    fn location_pills_use_catalog_locations() -> Result<()> {
        let mut app = app_on("2026-10-17")?;
        press(&mut app, KeyCode::Char('2'))?;
        press(&mut app, KeyCode::Char('.'))?;
        assert_eq!(app.night.filter.location, Selector::from("Chicago"));
        press(&mut app, KeyCode::Char(','))?;
        assert_eq!(app.night.filter.location, Selector::Any);
        press(&mut app, KeyCode::Char(','))?;
        assert_eq!(app.night.filter.location, Selector::from("San Francisco"));
        assert!(screen(&mut app)?.contains("All Locations"));
        Ok(())
    }

    #[test]
    fn week_calendar_buckets_and_overflows() -> Result<()> {
        let mut app = app_on("2026-10-24")?;
        press(&mut app, KeyCode::Tab)?;
        assert_eq!(app.night.calendar.mode, CalendarMode::Week);
        let text = screen(&mut app)?;
        assert!(text.contains("October 19 - October 25, 2026"));
        assert!(text.contains("+1 more"));

        assert_eq!(app.cursor_date(), Some(date("2026-10-24")));
        press(&mut app, KeyCode::Char(' '))?;
        assert_eq!(app.night.calendar.selected, Some(date("2026-10-24")));
        assert_eq!(app.agenda_ids(), vec![109, 110, 111]);

        press(&mut app, KeyCode::Char('J'))?;
        press(&mut app, KeyCode::Enter)?;
        assert_eq!(app.night.modal, Modal::Open(110));
        let text = screen(&mut app)?;
        assert!(text.contains("Buy Tickets"));
        assert!(text.contains("10:00 PM"));
        Ok(())
    }

    #[test]
    fn selecting_an_empty_day_says_so() -> Result<()> {
        let mut app = app_on("2026-10-21")?;
        press(&mut app, KeyCode::Tab)?;
        press(&mut app, KeyCode::Char(' '))?;
        assert_eq!(app.night.calendar.selected, Some(date("2026-10-21")));
        assert!(screen(&mut app)?.contains("No events scheduled for Wednesday, October 21, 2026"));

        press(&mut app, KeyCode::Char(' '))?;
        assert_eq!(app.night.calendar.selected, None);
        Ok(())
    }

    #[test]
    fn cell_cursor_pages_past_the_week() -> Result<()> {
        let mut app = app_on("2026-10-25")?;
        press(&mut app, KeyCode::Tab)?;
        assert_eq!(app.state.cell_cursor, 6);
        press(&mut app, KeyCode::Right)?;
        assert_eq!(app.night.calendar.anchor, date("2026-10-26"));
        assert_eq!(app.cursor_date(), Some(date("2026-10-26")));

        press(&mut app, KeyCode::Char('m'))?;
        assert_eq!(app.night.calendar.mode, CalendarMode::Month);
        assert_eq!(app.cursor_date(), Some(date("2026-10-26")));
        assert!(screen(&mut app)?.contains("October 2026"));

        press(&mut app, KeyCode::Char('t'))?;
        assert_eq!(app.cursor_date(), Some(date("2026-10-25")));
        Ok(())
    }

    #[test]
    fn today_in_month_view_shows_its_own_month() -> Result<()> {
        let mut app = app_on("2026-10-01")?;
        press(&mut app, KeyCode::Tab)?;
        press(&mut app, KeyCode::Char('m'))?;
        assert_eq!(app.night.calendar.range_label(), "September 2026");

        press(&mut app, KeyCode::Char('t'))?;
        assert_eq!(app.night.calendar.range_label(), "October 2026");
        assert_eq!(app.cursor_date(), Some(date("2026-10-01")));
        assert!(screen(&mut app)?.contains("October 2026"));
        Ok(())
    }

    #[test]
    fn list_cursor_scrolls_within_bounds() {
        let mut list = ListCursor {
            height: 3,
            ..ListCursor::default()
        };
        list.move_by(5, 10);
        assert_eq!((list.cursor, list.offset), (5, 3));
        list.move_by(-10, 10);
        assert_eq!((list.cursor, list.offset), (0, 0));
        list.move_to(42, 10);
        assert_eq!((list.cursor, list.offset), (9, 7));
        list.clamp(4);
        assert_eq!(list.cursor, 3);
        list.move_by(1, 0);
        assert_eq!(list.cursor, 3);
    }
}
