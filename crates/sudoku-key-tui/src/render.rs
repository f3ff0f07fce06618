use crate::app::{App, ScreenState};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};
use sudoku_key_core::{Position, BOX_SIZE, N};

// Each cell is 3 chars plus a 1-char border: 9 * 4 + 1
const GRID_WIDTH: u16 = 37;
const GRID_HEIGHT: u16 = 19;

pub fn render<W: Write>(out: &mut W, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    queue!(
        out,
        Hide,
        SetBackgroundColor(app.theme.bg),
        Clear(ClearType::All)
    )?;

    let start_x = term_width.saturating_sub(GRID_WIDTH) / 2;
    let start_y = if term_height > GRID_HEIGHT + 8 { 2 } else { 1 };

    render_title(out, app, start_x, start_y)?;
    render_grid(out, app, start_x, start_y + 2)?;

    let below = start_y + 2 + GRID_HEIGHT + 1;
    match app.screen_state {
        ScreenState::Playing => render_controls(out, app, start_x, below)?,
        ScreenState::Solved | ScreenState::Failed => render_banner(out, app, start_x, below)?,
    }

    if app.screen_state == ScreenState::Playing {
        if let Some(ref msg) = app.message {
            render_message(out, app, msg, term_width)?;
        }
    }

    queue!(out, Show)?;
    out.flush()
}

fn render_title<W: Write>(out: &mut W, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    queue!(
        out,
        MoveTo(x, y),
        SetForegroundColor(theme.accent),
        Print("SUDOKU PUZZLE"),
        SetForegroundColor(theme.muted),
        Print(format!("   {}/81 filled", app.filled_count()))
    )
}

fn render_grid<W: Write>(out: &mut W, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    // +===+===+===+===+===+===+===+===+===+
    // ║ 5 │ 3 │ · ║ · │ 7 │ · ║ · │ · │ · ║
    // +---+---+---+---+---+---+---+---+---+
    queue!(
        out,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.box_rule),
        Print("+===+===+===+===+===+===+===+===+===+")
    )?;

    for row in 0..N {
        let cell_y = y + 1 + row as u16 * 2;
        queue!(out, MoveTo(x, cell_y))?;

        for col in 0..N {
            let (color, glyph) = if col % BOX_SIZE == 0 {
                (theme.box_rule, "║")
            } else {
                (theme.rule, "│")
            };
            queue!(
                out,
                SetBackgroundColor(theme.bg),
                SetForegroundColor(color),
                Print(glyph)
            )?;
            render_cell(out, app, Position::new(row, col))?;
        }
        queue!(
            out,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.box_rule),
            Print("║")
        )?;

        queue!(out, MoveTo(x, cell_y + 1))?;
        if (row + 1) % BOX_SIZE == 0 {
            queue!(
                out,
                SetForegroundColor(theme.box_rule),
                Print("+===+===+===+===+===+===+===+===+===+")
            )?;
        } else {
            queue!(
                out,
                SetForegroundColor(theme.rule),
                Print("+---+---+---+---+---+---+---+---+---+")
            )?;
        }
    }

    Ok(())
}

fn render_cell<W: Write>(out: &mut W, app: &App, pos: Position) -> io::Result<()> {
    let theme = &app.theme;
    let playing = app.screen_state == ScreenState::Playing;

    let bg = if playing && pos == app.cursor {
        theme.cursor
    } else if playing && app.is_highlighted(pos) {
        theme.peers
    } else {
        theme.bg
    };

    let fg = if app.has_conflict(pos) && !app.is_given(pos) {
        theme.bad
    } else if app.is_given(pos) {
        theme.given
    } else {
        theme.entry
    };

    queue!(out, SetBackgroundColor(bg), SetForegroundColor(fg))?;
    match app.value(pos) {
        Some(value) => queue!(out, Print(format!(" {} ", value))),
        None => queue!(out, SetForegroundColor(theme.muted), Print(" · ")),
    }
}

fn render_controls<W: Write>(out: &mut W, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    let controls = [
        ("hjkl/Arrows", "Move"),
        ("wasd", "Jump box"),
        ("1-9", "Set"),
        ("0/Del", "Clear"),
        ("Enter", "Submit"),
        ("Esc/q", "Give up"),
    ];

    // Two columns of three
    for (i, (key, desc)) in controls.iter().enumerate() {
        let cx = x + (i / 3) as u16 * 19;
        let cy = y + (i % 3) as u16;
        queue!(
            out,
            MoveTo(cx, cy),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.accent),
            Print(format!("{:>11}", key)),
            SetForegroundColor(theme.muted),
            Print(format!(" {}", desc))
        )?;
    }
    Ok(())
}

fn render_banner<W: Write>(out: &mut W, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let color: Color = match app.screen_state {
        ScreenState::Solved => theme.good,
        _ => theme.bad,
    };
    let text = app.message.as_deref().unwrap_or_default();

    queue!(
        out,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(color),
        Print(text),
        MoveTo(x, y + 1),
        SetForegroundColor(theme.muted),
        Print("Press any key to close")
    )
}

fn render_message<W: Write>(out: &mut W, app: &App, msg: &str, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.len() as u16) / 2;

    queue!(
        out,
        MoveTo(x, 0),
        SetForegroundColor(theme.text),
        SetBackgroundColor(theme.cursor),
        Print(&padded)
    )
}
