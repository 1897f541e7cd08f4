//! # TitleBar Component
//!
//! Top status bar: where listings come from, how many there are, and the
//! latest status message.
//!
//! Stateless: it receives everything as props and renders one line.
//!
//! 1. **With message**: `"Mars Real Estate (https://mars.udacity.com/) | 24 listings | Refreshing..."`
//! 2. **Without message**: `"Mars Real Estate (https://mars.udacity.com/) | 24 listings"`
//! 3. **While loading**: the count is replaced by `"loading"`.

use crate::core::store::FetchStatus;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub struct TitleBar {
    pub source_label: String,
    pub status: FetchStatus,
    pub listing_count: usize,
    pub status_message: String,
}

impl TitleBar {
    fn format_title(&self) -> String {
        let count = match self.status {
            FetchStatus::Loading => "loading".to_string(),
            FetchStatus::Error => "error".to_string(),
            FetchStatus::Done if self.listing_count == 1 => "1 listing".to_string(),
            FetchStatus::Done => format!("{} listings", self.listing_count),
        };
        if self.status_message.is_empty() {
            format!("Mars Real Estate ({}) | {}", self.source_label, count)
        } else {
            format!(
                "Mars Real Estate ({}) | {} | {}",
                self.source_label, count, self.status_message
            )
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = match self.status {
            FetchStatus::Error => Style::default().fg(Color::Red),
            _ => Style::default(),
        };
        frame.render_widget(Span::styled(self.format_title(), style), area);
    }
}
