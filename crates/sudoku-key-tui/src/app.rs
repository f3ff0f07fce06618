use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sudoku_key_core::{Grid, Position, BOX_SIZE, CELL_COUNT, N};

/// Result of handling a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    /// Player pressed Enter on the board
    Submit,
    /// Player gave up (Esc, q, Ctrl+C)
    Abort,
    /// Player dismissed the result banner
    Close,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Filling in the board
    Playing,
    /// Submitted grid matched
    Solved,
    /// Submitted grid did not match
    Failed,
}

/// Board being filled in by the player
pub struct App {
    /// Locked cells from the puzzle (`0` = editable)
    givens: [u8; CELL_COUNT],
    /// Player entries for editable cells (`0` = empty)
    entries: [u8; CELL_COUNT],
    /// Currently selected cell position
    pub cursor: Position,
    /// Color theme
    pub theme: Theme,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Message to display
    pub message: Option<String>,
}

impl App {
    pub fn new(puzzle: &[u8; CELL_COUNT], theme: Theme) -> Self {
        Self {
            givens: *puzzle,
            entries: [0; CELL_COUNT],
            cursor: Position::new(4, 4),
            theme,
            screen_state: ScreenState::Playing,
            message: None,
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Abort;
        }

        match self.screen_state {
            ScreenState::Solved | ScreenState::Failed => AppAction::Close,
            ScreenState::Playing => self.handle_board_key(key),
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return AppAction::Abort,
            KeyCode::Enter => return AppAction::Submit,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),

            // Jump to box
            KeyCode::Char('w') => self.jump_box(-1, 0),
            KeyCode::Char('s') => self.jump_box(1, 0),
            KeyCode::Char('a') => self.jump_box(0, -1),
            KeyCode::Char('d') => self.jump_box(0, 1),

            KeyCode::Char(c @ '1'..='9') => {
                let value = c as u8 - b'0';
                if !self.set_entry(self.cursor, value) {
                    self.message = Some("That cell is part of the puzzle".to_string());
                }
            }
            KeyCode::Char('0') | KeyCode::Delete | KeyCode::Backspace => {
                self.set_entry(self.cursor, 0);
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let max = N as i32 - 1;
        let new_row = (self.cursor.row as i32 + row_delta).clamp(0, max) as usize;
        let new_col = (self.cursor.col as i32 + col_delta).clamp(0, max) as usize;
        self.cursor = Position::new(new_row, new_col);
    }

    fn jump_box(&mut self, row_delta: i32, col_delta: i32) {
        let boxes = (N / BOX_SIZE) as i32 - 1;
        let box_row = (self.cursor.row / BOX_SIZE) as i32;
        let box_col = (self.cursor.col / BOX_SIZE) as i32;

        let new_box_row = (box_row + row_delta).clamp(0, boxes) as usize;
        let new_box_col = (box_col + col_delta).clamp(0, boxes) as usize;

        // Move to center of new box
        self.cursor = Position::new(
            new_box_row * BOX_SIZE + 1,
            new_box_col * BOX_SIZE + 1,
        );
    }

    /// Set an editable cell; returns `false` for locked cells
    pub fn set_entry(&mut self, pos: Position, value: u8) -> bool {
        if self.is_given(pos) {
            return false;
        }
        self.entries[pos.index()] = value;
        self.message = None;
        true
    }

    pub fn is_given(&self, pos: Position) -> bool {
        self.givens[pos.index()] != 0
    }

    /// Value shown at `pos`, given or entered
    pub fn value(&self, pos: Position) -> Option<u8> {
        match (self.givens[pos.index()], self.entries[pos.index()]) {
            (0, 0) => None,
            (0, entry) => Some(entry),
            (given, _) => Some(given),
        }
    }

    pub fn board(&self) -> Grid {
        let mut grid = Grid::new();
        for pos in Position::all() {
            grid.set(pos, self.value(pos).unwrap_or(0));
        }
        grid
    }

    /// Whether the value at `pos` repeats in its row, column or box
    pub fn has_conflict(&self, pos: Position) -> bool {
        let Some(value) = self.value(pos) else {
            return false;
        };
        let mut board = self.board();
        board.clear(pos);
        !board.is_valid(pos.row, pos.col, value)
    }

    /// Same row, column or box as the cursor
    pub fn is_highlighted(&self, pos: Position) -> bool {
        pos.row == self.cursor.row
            || pos.col == self.cursor.col
            || (pos.row / BOX_SIZE == self.cursor.row / BOX_SIZE
                && pos.col / BOX_SIZE == self.cursor.col / BOX_SIZE)
    }

    pub fn filled_count(&self) -> usize {
        Position::all().filter(|&pos| self.value(pos).is_some()).count()
    }

    /// The submitted grid: each cell's digit in row-major order. Empty cells
    /// contribute nothing, so an unfinished board yields a short string.
    pub fn candidate(&self) -> String {
        Position::all()
            .filter_map(|pos| self.value(pos))
            .map(|v| char::from(b'0' + v))
            .collect()
    }

    /// Switch to the result banner
    pub fn finish(&mut self, solved: bool) {
        if solved {
            self.screen_state = ScreenState::Solved;
            self.message = Some("Sudoku solved successfully!".to_string());
        } else {
            self.screen_state = ScreenState::Failed;
            self.message = Some("Solve failed".to_string());
        }
    }
}
