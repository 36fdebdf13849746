//! The 9x9 board and its group/liberty analysis.
//!
//! Points are `(row, col)` pairs with row 0 at the top of the board.
//! Groups are never stored: every query flood-fills from a stone using an
//! explicit stack and a visited grid.

use std::fmt;
use std::ops::Neg;

use crate::constants::{COLUMN_LETTERS, DELTA, N};

/// Stone color. The numeric values match the +1 / -1 player encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black = 1,
    White = -1,
}

impl Color {
    pub fn opp(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl Neg for Color {
    type Output = Self;

    fn neg(self) -> Self {
        self.opp()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// A board coordinate: `(row, col)`.
pub type Point = (usize, usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Option<Color>; N]; N],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from rows of `'X'` (Black), `'O'` (White) and `'.'`.
    ///
    /// Missing rows or columns are left empty; any other character is treated
    /// as empty as well.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Board::new();
        for (r, line) in rows.iter().take(N).enumerate() {
            let stones = line.chars().filter(|c| !c.is_whitespace()).take(N);
            for (c, ch) in stones.enumerate() {
                board.cells[r][c] = match ch {
                    'X' | 'x' | 'B' => Some(Color::Black),
                    'O' | 'o' | 'W' => Some(Color::White),
                    _ => None,
                };
            }
        }
        board
    }

    pub fn in_bounds((row, col): Point) -> bool {
        row < N && col < N
    }

    /// Stone at `point`, or `None` when empty or off the board.
    pub fn get(&self, (row, col): Point) -> Option<Color> {
        if !Self::in_bounds((row, col)) {
            return None;
        }
        self.cells[row][col]
    }

    pub(crate) fn set(&mut self, (row, col): Point, stone: Option<Color>) {
        self.cells[row][col] = stone;
    }

    /// Orthogonal neighbors of a point that lie on the board.
    pub fn neighbors(&self, (row, col): Point) -> impl Iterator<Item = Point> + use<> {
        DELTA.into_iter().filter_map(move |(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            Self::in_bounds((r, c)).then_some((r, c))
        })
    }

    /// Whether the group containing `start` has at least one liberty.
    ///
    /// Stops at the first empty neighbor found. Returns `false` for an empty
    /// or off-board start point.
    pub fn group_liberties(&self, start: Point) -> bool {
        let Some(color) = self.get(start) else {
            return false;
        };
        let mut stack = vec![start];
        let mut visited = [[false; N]; N];

        while let Some(pt) = stack.pop() {
            if visited[pt.0][pt.1] {
                continue;
            }
            visited[pt.0][pt.1] = true;

            for n in self.neighbors(pt) {
                match self.get(n) {
                    None => return true,
                    Some(c) if c == color && !visited[n.0][n.1] => stack.push(n),
                    _ => {}
                }
            }
        }
        false
    }

    /// Number of distinct liberties of the group containing `start`.
    pub fn liberty_count(&self, start: Point) -> usize {
        let Some(color) = self.get(start) else {
            return 0;
        };
        let mut stack = vec![start];
        let mut visited = [[false; N]; N];
        let mut liberty_visited = [[false; N]; N];
        let mut libs = 0;

        while let Some(pt) = stack.pop() {
            if visited[pt.0][pt.1] {
                continue;
            }
            visited[pt.0][pt.1] = true;

            for n in self.neighbors(pt) {
                match self.get(n) {
                    None => {
                        if !liberty_visited[n.0][n.1] {
                            liberty_visited[n.0][n.1] = true;
                            libs += 1;
                        }
                    }
                    Some(c) if c == color && !visited[n.0][n.1] => stack.push(n),
                    _ => {}
                }
            }
        }
        libs
    }

    /// All stones connected to `start`, in traversal order.
    pub fn group(&self, start: Point) -> Vec<Point> {
        let Some(color) = self.get(start) else {
            return Vec::new();
        };
        let mut stack = vec![start];
        let mut visited = [[false; N]; N];
        let mut out = Vec::new();

        while let Some(pt) = stack.pop() {
            if visited[pt.0][pt.1] {
                continue;
            }
            visited[pt.0][pt.1] = true;
            out.push(pt);
            for n in self.neighbors(pt) {
                if !visited[n.0][n.1] && self.get(n) == Some(color) {
                    stack.push(n);
                }
            }
        }
        out
    }

    /// Empty every stone of the group containing `start`.
    ///
    /// Returns the cleared points; empty when `start` holds no stone.
    pub fn remove_group(&mut self, start: Point) -> Vec<Point> {
        let removed = self.group(start);
        for &pt in &removed {
            self.set(pt, None);
        }
        removed
    }

    /// Number of stones of `color` on the board.
    pub fn count(&self, color: Color) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == Some(color))
            .count() as u32
    }

    /// Stones of `color` plus the empty regions bordered only by `color`.
    pub fn area(&self, color: Color) -> u32 {
        let mut total = self.count(color);
        let mut visited = [[false; N]; N];

        for row in 0..N {
            for col in 0..N {
                if visited[row][col] || self.cells[row][col].is_some() {
                    continue;
                }

                let mut region = 0u32;
                let mut seen_black = false;
                let mut seen_white = false;
                let mut stack = vec![(row, col)];

                while let Some(pt) = stack.pop() {
                    if visited[pt.0][pt.1] {
                        continue;
                    }
                    visited[pt.0][pt.1] = true;
                    region += 1;

                    for n in self.neighbors(pt) {
                        match self.get(n) {
                            None => {
                                if !visited[n.0][n.1] {
                                    stack.push(n);
                                }
                            }
                            Some(Color::Black) => seen_black = true,
                            Some(Color::White) => seen_white = true,
                        }
                    }
                }

                let owner = match (seen_black, seen_white) {
                    (true, false) => Some(Color::Black),
                    (false, true) => Some(Color::White),
                    _ => None,
                };
                if owner == Some(color) {
                    total += region;
                }
            }
        }
        total
    }

    /// All empty points in row-major order.
    pub fn empty_points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..N)
            .flat_map(|row| (0..N).map(move |col| (row, col)))
            .filter(|&pt| self.get(pt).is_none())
    }

    /// Render the board, marking `last` with parentheses.
    pub fn render(&self, last: Option<Point>) -> String {
        let letters: String = COLUMN_LETTERS
            .iter()
            .map(|&b| format!(" {} ", b as char))
            .collect();
        let mut out = format!("   {letters}\n");
        for row in 0..N {
            out.push_str(&format!("{:>2} ", N - row));
            for col in 0..N {
                let ch = match self.cells[row][col] {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                if last == Some((row, col)) {
                    out.push_str(&format!("({ch})"));
                } else {
                    out.push_str(&format!(" {ch} "));
                }
            }
            out.push_str(&format!(" {}\n", N - row));
        }
        out.push_str(&format!("   {letters}\n"));
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let ch = match cell {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parse a vertex such as `"E5"` into a point.
///
/// Columns use letters A-J without 'I'; rows count from 1 at the bottom.
/// Returns `None` for anything that is not a vertex on the board.
pub fn parse_vertex(s: &str) -> Option<Point> {
    let s = s.trim();
    let mut chars = s.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let col = COLUMN_LETTERS.iter().position(|&b| b as char == letter)?;
    let number: usize = chars.as_str().parse().ok()?;
    if number == 0 || number > N {
        return None;
    }
    Some((N - number, col))
}

/// Convert a point to vertex notation (e.g. `(4, 4)` -> `"E5"`).
pub fn vertex_str((row, col): Point) -> String {
    format!("{}{}", COLUMN_LETTERS[col] as char, N - row)
}
