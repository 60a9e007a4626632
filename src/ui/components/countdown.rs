//! Countdown panel renderer.

use crate::countdown::CountdownState;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CountdownInfo;

/// Width of the progress bar in cells.
const BAR_WIDTH: usize = 20;

/// Renders the countdown on one line at `row` and returns the next row.
///
/// ```text
///  Countdown  7 / 10  [███████·············]  running   < Pause >  (space)
/// ```
pub fn render_countdown(row: usize, countdown: &CountdownInfo, theme: &Theme, cols: usize) -> usize {
    let filled = if countdown.start == 0 {
        0
    } else {
        (countdown.remaining as usize * BAR_WIDTH) / countdown.start as usize
    }
    .min(BAR_WIDTH);

    let state = match countdown.state {
        CountdownState::Idle => "idle",
        CountdownState::Running => "running",
        CountdownState::Paused => "paused",
        CountdownState::Finished => "finished",
    };

    let line = format!(
        " Countdown {:>3} / {:<3} [{}{}]  {:<8}  < {} >  (space)",
        countdown.remaining,
        countdown.start,
        "█".repeat(filled),
        "·".repeat(BAR_WIDTH - filled),
        state,
        countdown.button_label,
    );
    let line_len = line.chars().count();

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.countdown_fg));
    if countdown.state == CountdownState::Finished {
        print!("{}", Theme::bold());
    }
    print!("{line}");
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));
    print!("{}", Theme::reset());
    row + 1
}
