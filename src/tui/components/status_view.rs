//! # StatusView Component
//!
//! Centered placeholder shown instead of the grid while the first fetch is
//! loading, and whenever the last fetch failed.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::store::FetchStatus;
use crate::tui::component::Component;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct StatusView {
    pub status: FetchStatus,
    pub frame_index: usize,
}

impl StatusView {
    pub fn new(status: FetchStatus, frame_index: usize) -> Self {
        Self {
            status,
            frame_index,
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        match self.status {
            FetchStatus::Loading => vec![Line::from(vec![
                Span::styled(
                    SPINNER[self.frame_index % SPINNER.len()],
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(" Loading listings..."),
            ])],
            FetchStatus::Error => vec![
                Line::from(Span::styled(
                    "⚠ Connection error",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Press r to try again",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
            FetchStatus::Done => Vec::new(),
        }
    }
}

impl Component for StatusView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let [center] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).centered(), center);
    }
}
