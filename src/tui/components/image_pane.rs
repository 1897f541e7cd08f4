//! # ImagePane Component
//!
//! Stand-in for a listing photo. A terminal cannot show the image itself,
//! so the pane shows a placeholder: an animated loading frame captioned with
//! the https URL when there is one, a broken-image mark when there is not.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::image::ImageSlot;
use crate::tui::component::Component;

const LOADING_FRAMES: &[&str] = &["░▒▓█▓▒░", "▒▓█▓▒░░", "▓█▓▒░░▒", "█▓▒░░▒▓"];

pub struct ImagePane<'a> {
    pub slot: &'a ImageSlot,
    pub frame_index: usize,
    /// Show the URL caption under the placeholder.
    pub show_caption: bool,
}

impl<'a> ImagePane<'a> {
    pub fn new(slot: &'a ImageSlot, frame_index: usize) -> Self {
        Self {
            slot,
            frame_index,
            show_caption: true,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        match self.slot {
            ImageSlot::Remote(url) => {
                let art = LOADING_FRAMES[self.frame_index % LOADING_FRAMES.len()];
                let mut lines = vec![Line::from(Span::styled(
                    art,
                    Style::default().fg(Color::Rgb(193, 68, 14)),
                ))];
                if self.show_caption {
                    lines.push(Line::from(Span::styled(
                        url.as_str(),
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    )));
                }
                lines
            }
            ImageSlot::Placeholder => vec![
                Line::from(Span::styled("✕", Style::default().fg(Color::Red))),
                Line::from(Span::styled(
                    "no image",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        }
    }
}

impl Component for ImagePane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.lines())
            .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
