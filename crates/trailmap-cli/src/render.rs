use crate::app::App;
use crate::theme::Theme;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};
use trailmap_core::{charset::Glyph, GridModel, Position, WalkStatus, WalkerState};

/// Foreground colour for one cell
fn cell_color(theme: &Theme, ch: char, visited: bool) -> Color {
    match Glyph::from_char(ch) {
        Some(Glyph::Start | Glyph::End) => theme.marker,
        Some(Glyph::Empty) => theme.fg,
        Some(Glyph::Letter(_)) if visited => theme.letter,
        Some(_) if visited => theme.trail,
        Some(_) => theme.path,
        None => theme.error,
    }
}

/// Write the map, colouring walked cells and the cursor.
///
/// Without a theme the characters are written verbatim, one row per line.
/// With an `origin` each row is placed with `MoveTo` instead of a newline,
/// which is what raw mode needs.
pub fn write_map<W: Write>(
    out: &mut W,
    model: &GridModel,
    cursor: Option<Position>,
    theme: Option<&Theme>,
    origin: Option<(u16, u16)>,
) -> io::Result<()> {
    for (r, line) in model.grid().rows().iter().enumerate() {
        match origin {
            Some((x, y)) => queue!(out, MoveTo(x, y + r as u16))?,
            None if r > 0 => writeln!(out)?,
            None => {}
        }

        let Some(theme) = theme else {
            let text: String = line.iter().collect();
            write!(out, "{text}")?;
            continue;
        };

        for (c, &ch) in line.iter().enumerate() {
            let here = Position::new(r as i32, c as i32);
            let visited = model.is_visited(here.row, here.col);
            let bg = if cursor == Some(here) {
                theme.cursor_bg
            } else {
                theme.bg
            };
            queue!(
                out,
                SetBackgroundColor(bg),
                SetForegroundColor(cell_color(theme, ch, visited)),
                Print(ch)
            )?;
        }
        queue!(out, ResetColor)?;
    }
    out.flush()
}

pub fn status_label(state: &WalkerState) -> &'static str {
    match state.status() {
        WalkStatus::Walking => "walking",
        WalkStatus::Complete => "complete",
        WalkStatus::Stuck => "stuck",
    }
}

/// Draw the interactive screen
pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, _) = terminal::size()?;
    let theme = &app.theme;

    execute!(
        stdout,
        Hide,
        SetBackgroundColor(theme.bg),
        Clear(ClearType::All),
        MoveTo(2, 0),
        SetForegroundColor(theme.fg),
        Print(&app.name)
    )?;

    let map_y = 2;
    write_map(
        stdout,
        app.state.model(),
        Some(app.state.position()),
        Some(theme),
        Some((2, map_y)),
    )?;

    let info_y = map_y + app.state.model().grid().row_count() as u16 + 1;
    render_info(stdout, app, 2, info_y, term_width)?;
    render_controls(stdout, app, 2, info_y + 5)?;

    execute!(stdout, ResetColor, Show)?;
    Ok(())
}

fn render_info(stdout: &mut io::Stdout, app: &App, x: u16, y: u16, width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let state = &app.state;

    let status_color = match state.status() {
        WalkStatus::Walking => theme.info,
        WalkStatus::Complete => theme.success,
        WalkStatus::Stuck => theme.error,
    };
    let status = if app.paused && !state.is_finished() {
        "paused"
    } else {
        status_label(state)
    };

    // Keep the trace on one line; show its tail when it is too long.
    let room = width.saturating_sub(x + 8) as usize;
    let trace = state.trace();
    let shown: String = if trace.chars().count() > room {
        let skip = trace.chars().count() - room;
        trace.chars().skip(skip).collect()
    } else {
        trace.to_string()
    };

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.info),
        Print("Letters "),
        SetForegroundColor(theme.letter),
        Print(state.letters()),
        MoveTo(x, y + 1),
        SetForegroundColor(theme.info),
        Print("Path    "),
        SetForegroundColor(theme.trail),
        Print(shown),
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print(format!("Steps   {}", state.steps())),
        MoveTo(x, y + 3),
        Print("Status  "),
        SetForegroundColor(status_color),
        Print(status)
    )
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    let controls = [
        ("Space", "Pause"),
        ("n/Right", "Step"),
        ("f", "Finish"),
        ("r", "Restart"),
        ("q/Esc", "Quit"),
    ];

    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 3;
        let row = i % 3;
        let cx = x + (col as u16) * 20;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>8}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailmap_core::{Grid, Walker};

    #[test]
    fn test_plain_map_is_verbatim() {
        let text = "@-A-+\n    |\nx-B-+";
        let model = GridModel::new(Grid::from_text(text));
        let mut out = Vec::new();
        write_map(&mut out, &model, None, None, None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), text);
    }

    #[test]
    fn test_themed_map_colours_cells() {
        let state = Walker::new().walk(WalkerState::new(Grid::from_text("@-x")).unwrap());
        let mut out = Vec::new();
        write_map(
            &mut out,
            state.model(),
            Some(state.position()),
            Some(&Theme::dark()),
            None,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\u{1b}'));
        assert!(text.contains('@') && text.contains('x'));
    }

    #[test]
    fn test_cell_colors() {
        let theme = Theme::dark();
        assert_eq!(cell_color(&theme, '@', false), theme.marker);
        assert_eq!(cell_color(&theme, 'A', true), theme.letter);
        assert_eq!(cell_color(&theme, '-', true), theme.trail);
        assert_eq!(cell_color(&theme, '-', false), theme.path);
        assert_eq!(cell_color(&theme, '#', false), theme.error);
    }
}
