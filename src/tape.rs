//! Unbounded single-tape storage with a movable head.
//!
//! The tape is conceptually infinite in both directions but materialized
//! lazily: moving right past the end appends blanks, and moving left past
//! cell 0 prepends a blank and re-bases the head to 0. All operations are
//! total.

use crate::types::Direction;

/// The tape of a single-tape Turing machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<char>,
    head: usize,
    blank: char,
}

impl Tape {
    /// Creates a tape initialized with `input`, head at cell 0.
    ///
    /// An empty input materializes a single blank cell so the head always
    /// rests on a valid symbol.
    pub fn new(input: &str, blank: char) -> Self {
        let cells: Vec<char> = if input.is_empty() {
            vec![blank]
        } else {
            input.chars().collect()
        };

        Self {
            cells,
            head: 0,
            blank,
        }
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> char {
        self.cells.get(self.head).copied().unwrap_or(self.blank)
    }

    /// Writes `symbol` at the head, growing the tape if needed.
    pub fn write(&mut self, symbol: char) {
        self.grow_to_head();
        self.cells[self.head] = symbol;
    }

    /// Moves the head one cell in `direction`.
    ///
    /// Moving left from cell 0 prepends a blank and keeps the head at 0, so
    /// indices stay non-negative. Moving right past the end appends a blank.
    pub fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.head == 0 {
                    self.cells.insert(0, self.blank);
                } else {
                    self.head -= 1;
                }
            }
            Direction::Right => {
                self.head += 1;
                self.grow_to_head();
            }
            Direction::Stay => {}
        }
    }

    /// Renders the tape region spanning the head and all non-blank cells,
    /// together with the head's index into that rendering.
    ///
    /// Leading and trailing blanks outside the span are trimmed. This is a
    /// presentation helper; callers needing the exact materialized storage
    /// should use [`Tape::cells`].
    pub fn render(&self) -> (String, usize) {
        let first = self.cells.iter().position(|&c| c != self.blank);
        let last = self.cells.iter().rposition(|&c| c != self.blank);

        let (start, end) = match (first, last) {
            (Some(first), Some(last)) => (first.min(self.head), last.max(self.head)),
            _ => (self.head, self.head),
        };

        let content = self.cells[start..=end].iter().collect();
        (content, self.head - start)
    }

    /// Returns the rendered tape content (see [`Tape::render`]).
    pub fn content(&self) -> String {
        self.render().0
    }

    /// Returns the full materialized cell sequence.
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Returns the head position within the materialized cells.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the blank symbol this tape fills unused cells with.
    pub fn blank(&self) -> char {
        self.blank
    }

    fn grow_to_head(&mut self) {
        if self.head >= self.cells.len() {
            self.cells.resize(self.head + 1, self.blank);
        }
    }
}

impl std::fmt::Display for Tape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.content())
    }
}
