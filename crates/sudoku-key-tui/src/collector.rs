//! Front-ends that put the puzzle in front of a human.

use crate::app::{App, AppAction};
use crate::render;
use crate::theme::Theme;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, BufRead, Write};
use std::time::Duration;
use sudoku_key_core::{validate_solution, Collector, Grid, KeyError, Result, CELL_COUNT};
use tracing::debug;

/// Full-screen board in the terminal's alternate screen
pub struct TuiCollector {
    theme: Theme,
}

impl TuiCollector {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Collector for TuiCollector {
    fn collect(&mut self, puzzle: &[u8; CELL_COUNT], solution: &str) -> Result<String> {
        let mut app = App::new(puzzle, self.theme);
        let submitted = run_terminal(&mut app, solution)
            .map_err(|e| KeyError::Collector(format!("terminal: {e}")))?;
        submitted.ok_or_else(|| KeyError::Collector("puzzle abandoned".to_string()))
    }
}

fn run_terminal(app: &mut App, solution: &str) -> io::Result<Option<String>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode()?;
        return Err(e);
    }

    let result = run_app(&mut stdout, app, solution);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    result
}

/// Event loop. Returns the submitted candidate, or `None` if the player
/// gave up before submitting.
fn run_app<W: Write>(out: &mut W, app: &mut App, solution: &str) -> io::Result<Option<String>> {
    let mut submitted = None;

    loop {
        render::render(out, app)?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            AppAction::Continue => {}
            AppAction::Submit => {
                let candidate = app.candidate();
                debug!(len = candidate.len(), "grid submitted");
                app.finish(validate_solution(&candidate, solution));
                submitted = Some(candidate);
            }
            AppAction::Close | AppAction::Abort => return Ok(submitted),
        }
    }
}

/// Prints the puzzle and reads the solved grid as one line.
///
/// Whitespace in the answer is ignored so rows may be separated by spaces.
pub struct LineCollector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineCollector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, puzzle: &[u8; CELL_COUNT]) -> io::Result<String> {
        writeln!(self.output, "{}", Grid::from_cells(puzzle))?;
        writeln!(self.output, "Enter the solved grid as 81 digits, row by row:")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no answer on input"));
        }
        Ok(line.chars().filter(|c| !c.is_whitespace()).collect())
    }
}

impl<R: BufRead, W: Write> Collector for LineCollector<R, W> {
    fn collect(&mut self, puzzle: &[u8; CELL_COUNT], _solution: &str) -> Result<String> {
        self.prompt(puzzle)
            .map_err(|e| KeyError::Collector(format!("line input: {e}")))
    }
}
