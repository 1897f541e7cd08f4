use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::state::App;
use crate::core::store::FetchStatus;
use crate::tui::component::Component;
use crate::tui::components::{ListingDetail, ListingGrid, StatusView, TitleBar};
use crate::tui::{Screen, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, frame_index: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    TitleBar {
        source_label: app.source_label.clone(),
        status: tui.fetch_status,
        listing_count: tui.grid.cards.len(),
        status_message: app.status_message.clone(),
    }
    .render(frame, title_area);

    match &tui.screen {
        Screen::Detail(listing) => {
            ListingDetail::new(listing, frame_index).render(frame, main_area);
        }
        Screen::Overview if shows_placeholder(tui) => {
            StatusView::new(tui.fetch_status, frame_index).render(frame, main_area);
        }
        Screen::Overview => {
            ListingGrid::new(&mut tui.grid, frame_index).render(frame, main_area);
        }
    }

    let help = match tui.screen {
        Screen::Overview => " ←↑↓→ Move  Enter Open  r Refresh  q Quit ",
        Screen::Detail(_) => " Esc Back  r Refresh  q Quit ",
    };
    frame.render_widget(
        Line::styled(help, Style::default().fg(Color::DarkGray)).centered(),
        help_area,
    );
}

/// The grid is replaced by the status view on error, and while loading
/// when there is nothing to show yet.
fn shows_placeholder(tui: &TuiState) -> bool {
    match tui.fetch_status {
        FetchStatus::Error => true,
        FetchStatus::Loading => tui.grid.cards.is_empty(),
        FetchStatus::Done => false,
    }
}
