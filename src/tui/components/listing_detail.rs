//! # ListingDetail Component
//!
//! Full-screen view of one listing, opened from the grid. Esc goes back.

use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::image::ImageSlot;
use crate::network::Listing;
use crate::tui::component::Component;
use crate::tui::components::image_pane::ImagePane;

pub struct ListingDetail<'a> {
    pub listing: &'a Arc<Listing>,
    pub frame_index: usize,
}

impl<'a> ListingDetail<'a> {
    pub fn new(listing: &'a Arc<Listing>, frame_index: usize) -> Self {
        Self {
            listing,
            frame_index,
        }
    }

    fn facts(&self) -> Vec<Line<'a>> {
        let label = Style::default().fg(Color::DarkGray);
        let listing = self.listing;
        vec![
            Line::from(vec![
                Span::styled("Type   ", label),
                Span::styled(
                    listing.display_type(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Price  ", label),
                Span::styled(
                    listing.display_price(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Id     ", label),
                Span::raw(listing.label().to_string()),
            ]),
        ]
    }
}

impl Component for ListingDetail<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(format!(" Listing #{} ", self.listing.label()))
            .title_bottom(Line::from(" Esc Back ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [image_area, facts_area] =
            Layout::vertical([Constraint::Min(4), Constraint::Length(3)]).areas(inner);

        let slot = ImageSlot::for_url(self.listing.image_url.as_deref());
        ImagePane::new(&slot, self.frame_index).render(frame, image_area);
        frame.render_widget(Paragraph::new(self.facts()), facts_area);
    }
}
