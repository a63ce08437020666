//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`search`]: Title/Author selector and query input box
//! - [`grid`]: Result cards and the result count line
//! - [`loader`]: Spinner shown while a search is in flight
//! - [`banner`]: Failure and no-results messages
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Mode selector]
//! [Search box - 3 lines]
//! [Result count]
//! [Results: grid, spinner or banner]
//! [Border]
//! [Footer]
//! ```

pub mod banner;
pub mod footer;
pub mod grid;
pub mod header;
pub mod loader;
pub mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ResultsPanel, UIViewModel};

use banner::render_banner;
use footer::render_footer;
use grid::{render_grid, render_grid_status};
use header::render_header;
use loader::render_loader;
use search::render_search_bar;

/// Renders a horizontal border line at `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the full plugin layout into `out`.
///
/// Messages and the spinner sit a few rows into the results area; the grid
/// starts directly below the result count line.
pub fn render_layout(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols);

    let message_row = current_row + 3;
    match &vm.results {
        ResultsPanel::Nothing => {}
        ResultsPanel::Loader(loader) => {
            render_loader(out, message_row, loader, theme, cols);
        }
        ResultsPanel::Banner(banner) => {
            render_banner(out, message_row, banner, theme, cols);
        }
        ResultsPanel::Grid(grid) => {
            current_row = render_grid_status(out, current_row, grid, theme);
            render_grid(out, current_row, grid, theme);
        }
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);

    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_row, &vm.footer, theme, cols);
}
