//! # ListingGrid Component
//!
//! Scrollable grid of listing cards.
//!
//! ## Responsibilities
//!
//! - Keep a card per listing, rebuilt only when the diff says so
//! - Move the highlighted card with arrow keys
//! - Emit `GridEvent::Select` when a card is opened
//!
//! ## Architecture
//!
//! `GridState` is persistent and lives in `TuiState`. `ListingGrid` is a
//! transient wrapper created each frame around `&mut GridState`, so the
//! render pass can adjust the scroll offset.
//!
//! New collections arrive through [`GridState::submit_list`], which runs
//! [`calculate_diff`] against the cards on screen. Cards whose listing is
//! the same item with the same content are carried over untouched.

use std::sync::Arc;

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::diff::{Diff, ListingDiffCallback, calculate_diff};
use crate::core::image::ImageSlot;
use crate::network::Listing;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::image_pane::ImagePane;
use crate::tui::event::TuiEvent;

/// Rows of a single card, borders included.
pub const CARD_HEIGHT: u16 = 8;
/// Rows jumped by PageUp / PageDown.
const PAGE_ROWS: usize = 3;

/// Display data derived from one listing.
#[derive(Debug, Clone)]
pub struct Card {
    pub listing: Arc<Listing>,
    pub image: ImageSlot,
    pub title: String,
    pub price: String,
    pub kind: &'static str,
}

impl Card {
    pub fn bind(listing: Arc<Listing>) -> Self {
        Self {
            image: ImageSlot::for_url(listing.image_url.as_deref()),
            title: format!(" #{} ", listing.label()),
            price: listing.display_price(),
            kind: listing.display_type(),
            listing,
        }
    }
}

/// Events emitted by the grid.
#[derive(Debug)]
pub enum GridEvent {
    Select(Arc<Listing>),
}

/// Persistent state for the listing grid.
pub struct GridState {
    pub cards: Vec<Card>,
    pub selected: usize,
    pub columns: usize,
    /// First visible row.
    pub scroll_row: usize,
    /// Total number of cards built by `Card::bind` since creation.
    pub binds: usize,
}

impl GridState {
    pub fn new(columns: u16) -> Self {
        Self {
            cards: Vec::new(),
            selected: 0,
            columns: columns.max(1) as usize,
            scroll_row: 0,
            binds: 0,
        }
    }

    /// Replaces the displayed collection, reusing cards the diff keeps.
    pub fn submit_list(&mut self, listings: &[Arc<Listing>]) -> Diff {
        let old: Vec<Arc<Listing>> = self.cards.iter().map(|c| c.listing.clone()).collect();
        let diff = calculate_diff(&old, listings, &ListingDiffCallback);
        let dirty = diff.dirty_positions();

        let mut previous: Vec<Option<Card>> = std::mem::take(&mut self.cards)
            .into_iter()
            .map(Some)
            .collect();
        let previous_selected = self.selected;

        let mut selected = None;
        self.cards = listings
            .iter()
            .enumerate()
            .map(|(new_index, listing)| {
                let source = diff.sources[new_index];
                if source == Some(previous_selected) {
                    selected = Some(new_index);
                }
                let reused = source
                    .filter(|_| !dirty.contains(&new_index))
                    .and_then(|old_index| previous[old_index].take());
                reused.unwrap_or_else(|| {
                    self.binds += 1;
                    Card::bind(listing.clone())
                })
            })
            .collect();

        let last = self.cards.len().saturating_sub(1);
        self.selected = selected.unwrap_or_else(|| previous_selected.min(last));
        debug!(
            "Grid updated: {} cards, {} ops, {} rebuilt",
            self.cards.len(),
            diff.ops.len(),
            dirty.len()
        );
        diff
    }

    pub fn selected_listing(&self) -> Option<&Arc<Listing>> {
        self.cards.get(self.selected).map(|c| &c.listing)
    }

    fn row_count(&self) -> usize {
        self.cards.len().div_ceil(self.columns)
    }

    fn move_by(&mut self, delta: isize) {
        if self.cards.is_empty() {
            return;
        }
        let last = self.cards.len() - 1;
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, last as isize) as usize;
    }

    /// Adjusts `scroll_row` so the selected card is within `visible_rows`.
    fn scroll_to_selected(&mut self, visible_rows: usize) {
        let visible_rows = visible_rows.max(1);
        let row = self.selected / self.columns;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible_rows {
            self.scroll_row = row + 1 - visible_rows;
        }
        let max_scroll = self.row_count().saturating_sub(visible_rows);
        self.scroll_row = self.scroll_row.min(max_scroll);
    }
}

impl EventHandler for GridState {
    type Event = GridEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<GridEvent> {
        let columns = self.columns as isize;
        match event {
            TuiEvent::CursorLeft => self.move_by(-1),
            TuiEvent::CursorRight => self.move_by(1),
            TuiEvent::CursorUp => {
                if self.selected >= self.columns {
                    self.move_by(-columns);
                }
            }
            TuiEvent::CursorDown => {
                if self.selected + self.columns < self.cards.len() {
                    self.move_by(columns);
                }
            }
            TuiEvent::PageUp => self.move_by(-columns * PAGE_ROWS as isize),
            TuiEvent::PageDown => self.move_by(columns * PAGE_ROWS as isize),
            TuiEvent::Home => self.selected = 0,
            TuiEvent::End => self.selected = self.cards.len().saturating_sub(1),
            TuiEvent::Submit => {
                return self
                    .selected_listing()
                    .map(|listing| GridEvent::Select(listing.clone()));
            }
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the grid.
pub struct ListingGrid<'a> {
    state: &'a mut GridState,
    frame_index: usize,
}

impl<'a> ListingGrid<'a> {
    pub fn new(state: &'a mut GridState, frame_index: usize) -> Self {
        Self { state, frame_index }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, card: &Card, is_selected: bool) {
        let accent = if card.listing.is_rental() {
            Color::Cyan
        } else {
            Color::Yellow
        };
        let border_style = if is_selected {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(accent).add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .title(card.title.as_str())
            .border_style(border_style)
            .title_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [image_area, text_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(2)]).areas(inner);

        let mut pane = ImagePane::new(&card.image, self.frame_index);
        pane.show_caption = false;
        pane.render(frame, image_area);

        let text = vec![
            Line::from(Span::styled(card.kind, Style::default().fg(accent))),
            Line::from(Span::styled(
                card.price.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(Paragraph::new(text), text_area);
    }
}

impl Component for ListingGrid<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.state.cards.is_empty() {
            let empty = Paragraph::new("No listings.")
                .style(Style::default().fg(Color::DarkGray))
                .centered();
            frame.render_widget(empty, area);
            return;
        }

        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        self.state.scroll_to_selected(visible_rows);

        let columns = self.state.columns;
        let first = self.state.scroll_row * columns;
        let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
            .split(area);

        for (row_offset, row_area) in row_areas.iter().enumerate() {
            let col_areas =
                Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns])
                    .split(*row_area);
            for (col, card_area) in col_areas.iter().enumerate() {
                let index = first + row_offset * columns + col;
                let Some(card) = self.state.cards.get(index) else {
                    return;
                };
                self.render_card(frame, *card_area, card, index == self.state.selected);
            }
        }
    }
}
