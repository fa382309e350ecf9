use std::cmp;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};
use whereto_core::{
    calendar::{CalendarGrid, DayAgenda, GridCell, IsoDate},
    filter::parse_rating_threshold,
    format::{long_date, short_date, star_strip, truncate, twelve_hour_time},
    CalendarMode, Event, NightContent, Section, Venue,
};

use super::{contact_key, FilterField, ListCursor, Mode, WhereToApp};
use crate::{
    block_font,
    theme::{genre_color, Theme},
};

const BANNER_TEXT: &str = "WhereTo?";
const BANNER_MIN_HEIGHT: u16 = 32;
const AGENDA_HEIGHT: u16 = 8;

impl WhereToApp {
    pub(super) fn draw(&mut self, frame: &mut Frame) {
        let theme = Theme::for_section(self.view.section);
        let size = frame.size();
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.primary_bg).fg(theme.primary_fg)),
            size,
        );

        let show_banner = self.state.show_banner
            && size.height >= BANNER_MIN_HEIGHT
            && size.width as usize >= block_font::width(BANNER_TEXT) + 2;
        let fields = FilterField::for_section(self.view.section);
        let show_filters = self.filters_visible();
        let show_pills = self.view.section == Section::Night;

        let mut constraints = Vec::new();
        if show_banner {
            constraints.push(Constraint::Length(block_font::height() as u16 + 2));
        }
        constraints.push(Constraint::Length(3));
        if show_filters {
            constraints.push(Constraint::Length(fields.len() as u16 + 2));
        }
        if show_pills {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(8));
        constraints.push(Constraint::Length(4));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(size);
        let mut chunk_iter = chunks.iter().copied();

        if show_banner {
            if let Some(area) = chunk_iter.next() {
                render_banner(frame, area, &theme);
            }
        }
        let header_chunk = chunk_iter.next().unwrap_or(size);
        self.render_header(frame, header_chunk, &theme);
        if show_filters {
            if let Some(area) = chunk_iter.next() {
                self.render_filters(frame, area, &theme);
            }
        }
        if show_pills {
            if let Some(area) = chunk_iter.next() {
                self.render_location_pills(frame, area, &theme);
            }
        }
        let body_chunk = chunk_iter.next().unwrap_or(size);
        let status_chunk = chunk_iter.next().unwrap_or(size);

        match (self.view.section, self.night.content) {
            (Section::Day, _) => self.draw_day(frame, body_chunk, &theme),
            (Section::Night, NightContent::List) => self.draw_event_list(frame, body_chunk, &theme),
            (Section::Night, NightContent::Calendar) => {
                self.draw_calendar(frame, body_chunk, &theme)
            }
        }
        self.render_status(frame, status_chunk, &theme);

        if self.active_modal().is_open() {
            self.render_modal(frame, &theme);
        }
    }

    fn filters_visible(&self) -> bool {
        match self.view.section {
            Section::Day => self.day.show_filters,
            Section::Night => self.night.show_filters,
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(26), Constraint::Min(20)])
            .split(area);

        let selected = match self.view.section {
            Section::Day => 0,
            Section::Night => 1,
        };
        let tabs = Tabs::new(vec![
            format!(" 1 {} ", Section::Day.label()),
            format!(" 2 {} ", Section::Night.label()),
        ])
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title(" WhereTo? "))
        .style(Style::default().fg(theme.muted))
        .highlight_style(
            Style::default()
                .fg(theme.on_accent)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(tabs, chunks[0]);

        let searching = self.state.mode == Mode::Search;
        let text = self.search_text();
        let line = if text.is_empty() && !searching {
            let placeholder = match self.view.section {
                Section::Day => "Search venues, cuisine, or location...",
                Section::Night => "Search events, artists, or venues...",
            };
            Line::from(Span::styled(placeholder, Style::default().fg(theme.muted)))
        } else {
            Line::from(text.to_string())
        };
        let border = if searching {
            Style::default().fg(theme.accent)
        } else {
            Style::default()
        };
        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title("Search"),
        );
        frame.render_widget(paragraph, chunks[1]);

        if searching {
            let inner_width = chunks[1].width.saturating_sub(2);
            let offset = (text.chars().count() as u16).min(inner_width.saturating_sub(1));
            frame.set_cursor(chunks[1].x + 1 + offset, chunks[1].y + 1);
        }
    }

    fn filter_value(&self, field: FilterField) -> String {
        match field {
            FilterField::Location => {
                let location = match self.view.section {
                    Section::Day => &self.day.filter.location,
                    Section::Night => &self.night.filter.location,
                };
                location.value().unwrap_or("All Locations").to_string()
            }
            FilterField::MinRating => parse_rating_threshold(&self.day.filter.min_rating)
                .map(|threshold| format!("{threshold:.1}+ Stars"))
                .unwrap_or_else(|| "Any Rating".to_string()),
            FilterField::VenueType => self
                .day
                .filter
                .venue_type
                .value()
                .unwrap_or("All Types")
                .to_string(),
            FilterField::Genre => self
                .night
                .filter
                .genre
                .value()
                .unwrap_or("All Genres")
                .to_string(),
            FilterField::Date => {
                if !self.state.date_input.is_empty() {
                    self.state.date_input.clone()
                } else {
                    self.night
                        .filter
                        .date
                        .value()
                        .unwrap_or("Any Date")
                        .to_string()
                }
            }
        }
    }

    fn render_filters(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.state.mode == Mode::Filters;
        let lines: Vec<Line> = FilterField::for_section(self.view.section)
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let is_current = focused && idx == self.state.filter_field;
                let marker = if is_current {
                    Span::styled(
                        "▶ ",
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("  ")
                };
                Line::from(vec![
                    marker,
                    Span::styled(
                        format!("{:<16}", field.label()),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("‹ ", Style::default().fg(theme.muted)),
                    Span::styled(self.filter_value(*field), Style::default().fg(theme.accent)),
                    Span::styled(" ›", Style::default().fg(theme.muted)),
                ])
            })
            .collect();
        let border = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default()
        };
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title("Filters (x: clear all)"),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_location_pills(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let active = self.night.filter.location.value();
        let locations = self.catalog.event_locations();
        let mut spans = Vec::new();
        let pills = std::iter::once(("All Locations", active.is_none())).chain(
            locations
                .iter()
                .map(|location| (location.as_str(), active == Some(location.as_str()))),
        );
        for (label, is_active) in pills {
            let style = if is_active {
                Style::default()
                    .fg(theme.on_accent)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            spans.push(Span::styled(format!(" {label} "), style));
            spans.push(Span::raw(" "));
        }
        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("Locations"));
        frame.render_widget(paragraph, area);
    }

    fn draw_day(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let venues = self.day.visible(self.catalog.venues());
        let title = format!("Featured Venues ({})", venues.len());
        let list = &mut self.state.venue_list;
        if venues.is_empty() {
            list.reset();
            frame.render_widget(empty_state("venues", &title, theme), chunks[0]);
            let details = Block::default().borders(Borders::ALL).title("Venue Details");
            frame.render_widget(details, chunks[1]);
            return;
        }

        let items = window_items(list, chunks[0], venues.len(), |idx, is_selected| {
            let venue = venues[idx];
            Line::from(vec![
                cursor_marker(is_selected, theme),
                Span::styled(
                    venue.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(star_strip(venue.filled_stars()), Style::default().fg(theme.warning)),
                Span::styled(
                    format!(" {:.1} · {}", venue.rating, venue.location),
                    Style::default().fg(theme.muted),
                ),
            ])
        });
        render_window(frame, chunks[0], items, list, &title, theme);

        let block = Block::default().borders(Borders::ALL).title("Venue Details");
        if let Some(venue) = venues.get(list.cursor) {
            let mut lines = venue_lines(venue, theme);
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Enter: view details",
                Style::default().fg(theme.muted),
            )));
            let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
            frame.render_widget(paragraph, chunks[1]);
        }
    }

    fn draw_event_list(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let events = self.night.visible(self.catalog.events());
        let title = format!("Upcoming Events ({})", events.len());
        let list = &mut self.state.event_list;
        if events.is_empty() {
            list.reset();
            frame.render_widget(empty_state("events", &title, theme), chunks[0]);
            let details = Block::default().borders(Borders::ALL).title("Event Details");
            frame.render_widget(details, chunks[1]);
            return;
        }

        let items = window_items(list, chunks[0], events.len(), |idx, is_selected| {
            let event = events[idx];
            Line::from(vec![
                cursor_marker(is_selected, theme),
                Span::styled(
                    event.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} · {}  ", short_date(&event.date), twelve_hour_time(&event.time)),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(
                    event.genre.clone(),
                    Style::default().fg(genre_color(event.genre_kind())),
                ),
            ])
        });
        render_window(frame, chunks[0], items, list, &title, theme);

        let block = Block::default().borders(Borders::ALL).title("Event Details");
        if let Some(event) = events.get(list.cursor) {
            let mut lines = event_lines(event, theme);
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Enter: view details",
                Style::default().fg(theme.muted),
            )));
            let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
            frame.render_widget(paragraph, chunks[1]);
        }
    }

    fn draw_calendar(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let events = self.night.filter.apply_owned(self.catalog.events());
        let grid = CalendarGrid::build(&self.night.calendar, &events, self.today);
        let agenda = self.night.calendar.agenda(&events);
        if let DayAgenda::Events(_, list) = &agenda {
            self.state.agenda_cursor = self.state.agenda_cursor.min(list.len().saturating_sub(1));
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(AGENDA_HEIGHT)])
            .split(area);

        let title = format!(
            " {} · {} view ",
            self.night.calendar.range_label(),
            self.night.calendar.mode.label()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                title,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let cursor = self.state.cell_cursor;
        match grid.mode {
            CalendarMode::Week => render_week_grid(frame, inner, &grid, cursor, theme),
            CalendarMode::Month => render_month_grid(frame, inner, &grid, cursor, theme),
        }
        render_agenda(frame, chunks[1], &agenda, self.state.agenda_cursor, theme);
    }

    fn render_modal(&mut self, frame: &mut Frame, theme: &Theme) {
        let (title, mut lines, actions) = match self.view.section {
            Section::Day => {
                let Some(venue) = self.day.modal.selected().and_then(|id| self.catalog.venue(id))
                else {
                    return;
                };
                let actions: Vec<Span> = venue
                    .contact_actions()
                    .iter()
                    .flat_map(|action| action_button(contact_key(action), action.label(), theme))
                    .collect();
                (venue.name.clone(), venue_lines(venue, theme), actions)
            }
            Section::Night => {
                let Some(event) = self
                    .night
                    .modal
                    .selected()
                    .and_then(|id| self.catalog.event(id))
                else {
                    return;
                };
                let mut lines = event_lines(event, theme);
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Highlights",
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(format!(
                    "Live Music · {} Capacity · {} Start",
                    event.capacity,
                    twelve_hour_time(&event.time)
                )));
                let mut actions = action_button('b', "Buy Tickets", theme);
                actions.extend(action_button('g', "Get Directions", theme));
                (event.name.clone(), lines, actions)
            }
        };
        lines.push(Line::from(""));
        lines.push(Line::from(actions));
        lines.push(Line::from(Span::styled(
            "Esc close · j/k scroll",
            Style::default().fg(theme.muted),
        )));

        let size = frame.size();
        let width = cmp::max(cmp::min(76_u16, size.width.saturating_sub(4)), 24_u16);
        let height = cmp::min(26_u16, size.height.saturating_sub(2)).max(8_u16);
        let area = centered_rect(width, height, size);

        let visible = area.height.saturating_sub(2) as usize;
        let max_scroll = lines.len().saturating_sub(visible) as u16;
        self.state.modal_scroll = self.state.modal_scroll.min(max_scroll);

        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.accent))
                    .title(format!(" {title} ")),
            )
            .style(Style::default().bg(theme.primary_bg).fg(theme.primary_fg))
            .wrap(Wrap { trim: false })
            .scroll((self.state.modal_scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let primary = if self.state.mode == Mode::Search {
            format!("Search: {}", self.search_text())
        } else {
            self.state.status.clone()
        };
        let paragraph = Paragraph::new(vec![
            Line::from(primary),
            Line::from(Span::styled(self.key_hints(), Style::default().fg(theme.muted))),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn key_hints(&self) -> &'static str {
        if self.active_modal().is_open() {
            return match self.view.section {
                Section::Day => "c/w/r contact · j/k scroll · Esc close",
                Section::Night => "b tickets · g directions · j/k scroll · Esc close",
            };
        }
        match (self.state.mode, self.view.section, self.night.content) {
            (Mode::Search, _, _) => "Type to search · Backspace delete · Enter/Esc done",
            (Mode::Filters, _, _) => "↑↓ field · ←→ change · x clear · Esc done · f hide",
            (Mode::Browse, Section::Day, _) => {
                "j/k move · Enter details · / search · f filters · Tab night · q quit"
            }
            (Mode::Browse, Section::Night, NightContent::List) => {
                "j/k move · Enter details · ,/. location · v calendar · / search · f filters · q quit"
            }
            (Mode::Browse, Section::Night, NightContent::Calendar) => {
                "h/j/k/l move · Space select · J/K agenda · Enter open · [/] page · m week/month · t today · v list · q quit"
            }
        }
    }
}

fn render_banner(frame: &mut Frame, area: Rect, theme: &Theme) {
    let content: Vec<Line> = block_font::render(BANNER_TEXT)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(theme.accent))))
        .collect();
    let paragraph = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn empty_state<'a>(noun: &str, title: &'a str, theme: &Theme) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("No {noun} found matching your criteria."),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Try adjusting your filters or search terms.",
            Style::default().fg(theme.muted),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title(title))
}

fn cursor_marker(is_selected: bool, theme: &Theme) -> Span<'static> {
    if is_selected {
        Span::styled(
            "▶ ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw("  ")
    }
}

/// Size `list` to `area` and build the rows currently scrolled into view.
fn window_items<'a>(
    list: &mut ListCursor,
    area: Rect,
    len: usize,
    row: impl Fn(usize, bool) -> Line<'a>,
) -> Vec<ListItem<'a>> {
    list.height = area.height.saturating_sub(2) as usize;
    list.clamp(len);
    list.ensure_visible(len);
    let end = (list.offset + list.height).min(len);
    (list.offset..end)
        .map(|idx| ListItem::new(row(idx, idx == list.cursor)))
        .collect()
}

fn render_window(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    list: &ListCursor,
    title: &str,
    theme: &Theme,
) {
    let mut list_state = ListState::default();
    if !items.is_empty() {
        let selected = list
            .cursor
            .saturating_sub(list.offset)
            .min(items.len().saturating_sub(1));
        list_state.select(Some(selected));
    }
    let widget = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .fg(theme.selection_fg),
        );
    frame.render_stateful_widget(widget, area, &mut list_state);
}

fn venue_lines(venue: &Venue, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            venue.name.clone(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} · {}", venue.venue_type, venue.cuisine),
            Style::default().fg(theme.muted),
        )),
        Line::from(vec![
            Span::styled(star_strip(venue.filled_stars()), Style::default().fg(theme.warning)),
            Span::raw(format!(" {:.1}", venue.rating)),
        ]),
        Line::from(""),
        labelled("Location", &venue.location),
        labelled("Price Range", &venue.price_range),
        labelled("Hours", &venue.hours),
    ];
    if let Some(phone) = &venue.phone {
        lines.push(labelled("Phone", phone));
    }
    if let Some(website) = &venue.website {
        lines.push(labelled("Website", website));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(venue.description.clone()));
    lines
}

fn event_lines(event: &Event, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            event.name.clone(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!("by {}  ", event.artist), Style::default().fg(theme.muted)),
            Span::styled(
                format!(" {} ", event.genre),
                Style::default()
                    .fg(Color::White)
                    .bg(genre_color(event.genre_kind()))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        labelled("Date", &long_date(&event.date)),
        labelled("Time", &twelve_hour_time(&event.time)),
        labelled("Venue", &format!("{}, {}", event.venue, event.location)),
        labelled("Price", &event.price),
        labelled("Capacity", &format!("{} people", event.capacity)),
        Line::from(""),
        Line::from(event.description.clone()),
    ]
}

fn labelled(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}

fn action_button(key: char, label: &str, theme: &Theme) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            format!("[{key}]"),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {label}  ")),
    ]
}

fn render_week_grid(
    frame: &mut Frame,
    area: Rect,
    grid: &CalendarGrid,
    cursor: usize,
    theme: &Theme,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(area);
    for (idx, cell) in grid.cells.iter().enumerate() {
        if let Some(column) = columns.get(idx) {
            render_grid_cell(frame, *column, cell, grid.mode, idx == cursor, theme);
        }
    }
}

fn render_month_grid(
    frame: &mut Frame,
    area: Rect,
    grid: &CalendarGrid,
    cursor: usize,
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let header_columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(rows[0]);
    let weekdays = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    for (name, column) in weekdays.iter().zip(header_columns.iter()) {
        let label = Paragraph::new(Span::styled(
            *name,
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(label, *column);
    }

    let week_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 6); 6])
        .split(rows[1]);
    for (row_idx, (week, row_area)) in grid.weeks().zip(week_rows.iter()).enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 7); 7])
            .split(*row_area);
        for (col_idx, (cell, column)) in week.iter().zip(columns.iter()).enumerate() {
            let idx = row_idx * 7 + col_idx;
            render_grid_cell(frame, *column, cell, grid.mode, idx == cursor, theme);
        }
    }
}

fn render_grid_cell(
    frame: &mut Frame,
    area: Rect,
    cell: &GridCell,
    mode: CalendarMode,
    focused: bool,
    theme: &Theme,
) {
    let (limit, with_time, title) = match mode {
        CalendarMode::Week => (2, true, cell.date.format("%a %-d").to_string()),
        CalendarMode::Month => (1, false, cell.date.format("%-d").to_string()),
    };
    let muted = Style::default().fg(theme.muted);

    let title_style = if cell.outside_month {
        muted.add_modifier(Modifier::DIM)
    } else if cell.is_today {
        Style::default()
            .fg(theme.accent_alt)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let border_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else if cell.is_today {
        Style::default().fg(theme.accent_alt)
    } else {
        muted
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title, title_style));
    if cell.is_selected {
        block = block.style(
            Style::default()
                .bg(theme.selection_bg)
                .fg(theme.selection_fg),
        );
    }

    let width = area.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();
    for event in cell.events.iter().take(limit) {
        let mut style = Style::default().fg(genre_color(event.genre_kind()));
        if cell.outside_month {
            style = style.add_modifier(Modifier::DIM);
        }
        lines.push(Line::from(Span::styled(truncate(&event.name, width), style)));
        if with_time {
            lines.push(Line::from(Span::styled(
                twelve_hour_time(&event.time),
                muted,
            )));
        }
    }
    if cell.events.len() > limit {
        lines.push(Line::from(Span::styled(
            format!("+{} more", cell.events.len() - limit),
            muted,
        )));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_agenda(
    frame: &mut Frame,
    area: Rect,
    agenda: &DayAgenda,
    cursor: usize,
    theme: &Theme,
) {
    let muted = Style::default().fg(theme.muted);
    match agenda {
        DayAgenda::NoSelection => {
            let paragraph = Paragraph::new(vec![
                Line::from(Span::styled("Select a day to see its events.", muted)),
                Line::from(Span::styled("Space: select the highlighted day", muted)),
            ])
            .block(Block::default().borders(Borders::ALL).title("Selected Day"));
            frame.render_widget(paragraph, area);
        }
        DayAgenda::Empty(date) => {
            let label = long_date(&date.to_iso_date_string());
            let paragraph = Paragraph::new(Line::from(Span::styled(
                format!("No events scheduled for {label}."),
                muted,
            )))
            .block(Block::default().borders(Borders::ALL).title(label));
            frame.render_widget(paragraph, area);
        }
        DayAgenda::Events(date, events) => {
            let items: Vec<ListItem> = events
                .iter()
                .enumerate()
                .map(|(idx, event)| {
                    ListItem::new(Line::from(vec![
                        cursor_marker(idx == cursor, theme),
                        Span::styled(format!("{:>8}  ", twelve_hour_time(&event.time)), muted),
                        Span::styled(
                            event.name.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(format!(" · {}, {}  ", event.venue, event.location), muted),
                        Span::styled(
                            event.genre.clone(),
                            Style::default().fg(genre_color(event.genre_kind())),
                        ),
                    ]))
                })
                .collect();
            let mut list_state = ListState::default();
            list_state.select(Some(cursor.min(events.len().saturating_sub(1))));
            let title = format!(
                "Events on {} ({})",
                long_date(&date.to_iso_date_string()),
                events.len()
            );
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(title))
                .highlight_style(
                    Style::default()
                        .bg(theme.selection_bg)
                        .fg(theme.selection_fg),
                );
            frame.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
