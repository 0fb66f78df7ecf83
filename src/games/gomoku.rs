//! # Gomoku (Connect Five) Rules
//!
//! Board representation, win detection and candidate move generation for
//! five-in-a-row on a fixed 19x19 grid. `GomokuState` wraps a board with the
//! side to move so the search engine can drive it through [`GameState`].

use crate::error::{EngineError, Result};
use crate::{GameState, Outcome};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Side length of the board.
pub const BOARD_SIZE: usize = 19;
/// Number of contiguous stones that wins the game.
pub const WIN_LENGTH: usize = 5;
/// Cell played when the engine is asked to open on an empty board.
pub const CENTER: GomokuMove = GomokuMove(BOARD_SIZE / 2, BOARD_SIZE / 2);

/// The four axis directions; each is scanned together with its opposite.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
/// 4-neighbourhood used for candidate generation.
const NEIGHBORS: [(isize, isize); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

/// A stone colour.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    pub fn opponent(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// Single-character marker used in the text board format.
    pub fn symbol(self) -> char {
        match self {
            Stone::Black => 'b',
            Stone::White => 'w',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'b' => Some(Stone::Black),
            'w' => Some(Stone::White),
            _ => None,
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Stone {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Stone::Black),
            "w" | "white" => Ok(Stone::White),
            other => Err(EngineError::InvalidInput(format!("unknown colour '{}'", other))),
        }
    }
}

/// A placement at `(row, column)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct GomokuMove(pub usize, pub usize);

impl fmt::Display for GomokuMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

fn in_bounds(row: usize, col: usize) -> bool {
    row < BOARD_SIZE && col < BOARD_SIZE
}

/// Which empty cells are offered as moves for a colour.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CandidateRule {
    /// Empty cells 4-adjacent to the mover's own stones.
    #[default]
    OwnStones,
    /// Empty cells 4-adjacent to any stone.
    AnyStone,
    /// Every empty cell.
    AllEmpty,
}

impl FromStr for CandidateRule {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "own-stones" => Ok(CandidateRule::OwnStones),
            "any-stone" => Ok(CandidateRule::AnyStone),
            "all-empty" => Ok(CandidateRule::AllEmpty),
            other => Err(EngineError::InvalidInput(format!(
                "unknown candidate rule '{}' (expected own-stones, any-stone or all-empty)",
                other
            ))),
        }
    }
}

/// A 19x19 grid of optional stones.
///
/// Boards can only be built empty or through validated conversions, so every
/// `Board` value has the expected dimensions.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    cells: [[Option<Stone>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Builds a board from rows of cells, rejecting anything that is not 19x19.
    pub fn from_rows(rows: &[Vec<Option<Stone>>]) -> Result<Self> {
        if rows.len() != BOARD_SIZE {
            return Err(EngineError::InvalidBoard(format!(
                "expected {} rows, found {}",
                BOARD_SIZE,
                rows.len()
            )));
        }
        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != rows.len() {
                return Err(EngineError::InvalidBoard(format!(
                    "board is not square: row {} has {} cells",
                    r,
                    row.len()
                )));
            }
            board.cells[r].copy_from_slice(row);
        }
        Ok(board)
    }

    /// Builds a board from character rows using `.`, `b` and `w`.
    pub fn from_grid<T: AsRef<[char]>>(grid: &[T]) -> Result<Self> {
        let rows = grid
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.as_ref()
                    .iter()
                    .enumerate()
                    .map(|(c, &ch)| parse_cell(ch, r, c))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Board::from_rows(&rows)
    }

    /// Reads a board in the text format from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }

    /// Stone at `(row, col)`. Both coordinates must be below [`BOARD_SIZE`].
    pub fn get(&self, row: usize, col: usize) -> Option<Stone> {
        debug_assert!(in_bounds(row, col), "({}, {}) is outside the board", row, col);
        self.cells[row][col]
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_none()
    }

    /// Places a stone without any rule checks. The move must be on the board.
    pub fn place(&mut self, mv: GomokuMove, stone: Stone) {
        debug_assert!(in_bounds(mv.0, mv.1), "{} is outside the board", mv);
        self.cells[mv.0][mv.1] = Some(stone);
    }

    pub fn clear(&mut self) {
        self.cells = [[None; BOARD_SIZE]; BOARD_SIZE];
    }

    /// True when no stone of either colour is on the board.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|cell| cell.is_none())
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| cell.is_some())
    }

    /// Row-major iterator over every cell.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Option<Stone>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, &cell)| (r, c, cell)))
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = GomokuMove> + '_ {
        self.cells()
            .filter(|(_, _, cell)| cell.is_none())
            .map(|(r, c, _)| GomokuMove(r, c))
    }

    fn neighbor(row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < BOARD_SIZE && c < BOARD_SIZE).then_some((r, c))
    }

    fn has_neighbor(&self, row: usize, col: usize, accept: impl Fn(Stone) -> bool) -> bool {
        NEIGHBORS.iter().any(|&(dr, dc)| {
            Board::neighbor(row, col, dr, dc)
                .and_then(|(r, c)| self.cells[r][c])
                .is_some_and(&accept)
        })
    }

    /// Same-colour stones contiguous to `(row, col)` walking in one direction,
    /// not counting the starting cell.
    fn continuous_count(&self, row: usize, col: usize, dr: isize, dc: isize) -> usize {
        let Some(stone) = self.cells[row][col] else {
            return 0;
        };
        let mut count = 0;
        let (mut r, mut c) = (row, col);
        while let Some((nr, nc)) = Board::neighbor(r, c, dr, dc) {
            if self.cells[nr][nc] != Some(stone) {
                break;
            }
            count += 1;
            r = nr;
            c = nc;
        }
        count
    }
}

fn parse_cell(ch: char, row: usize, col: usize) -> Result<Option<Stone>> {
    if ch == '.' {
        return Ok(None);
    }
    Stone::from_symbol(ch).map(Some).ok_or_else(|| {
        EngineError::InvalidBoard(format!("unknown cell value '{}' at ({}, {})", ch, row, col))
    })
}

impl FromStr for Board {
    type Err = EngineError;

    /// Parses one row per non-blank line; whitespace between cells is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let grid: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        Board::from_grid(&grid)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or('.', Stone::symbol).to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Returns the colour at `(row, col)` if that stone is part of a contiguous
/// run of at least five along a row, column or diagonal.
///
/// `(row, col)` must be on the board.
pub fn detect_win(board: &Board, row: usize, col: usize) -> Option<Stone> {
    let stone = board.get(row, col)?;
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| {
            board.continuous_count(row, col, dr, dc) + board.continuous_count(row, col, -dr, -dc) + 1
                >= WIN_LENGTH
        })
        .then_some(stone)
}

/// Empty cells 4-adjacent to a stone of `color`, unique, in row-major order.
///
/// Empty when `color` has no stones on the board yet.
pub fn candidate_moves(board: &Board, color: Stone) -> Vec<GomokuMove> {
    candidate_moves_with(board, color, CandidateRule::OwnStones)
}

pub fn candidate_moves_with(board: &Board, color: Stone, rule: CandidateRule) -> Vec<GomokuMove> {
    board
        .empty_cells()
        .filter(|mv| is_candidate(board, *mv, color, rule))
        .collect()
}

fn has_candidate(board: &Board, color: Stone, rule: CandidateRule) -> bool {
    board.empty_cells().any(|mv| is_candidate(board, mv, color, rule))
}

fn is_candidate(board: &Board, mv: GomokuMove, color: Stone, rule: CandidateRule) -> bool {
    match rule {
        CandidateRule::OwnStones => board.has_neighbor(mv.0, mv.1, |s| s == color),
        CandidateRule::AnyStone => board.has_neighbor(mv.0, mv.1, |_| true),
        CandidateRule::AllEmpty => true,
    }
}

/// A hypothetical position used by the search: board, side to move and the
/// move that produced it.
#[derive(Debug, Clone)]
pub struct GomokuState {
    board: Board,
    current_player: Stone,
    last_move: Option<GomokuMove>,
    candidate_rule: CandidateRule,
}

impl GomokuState {
    /// A root position: `to_move` plays next and no move has been made yet.
    pub fn new(board: Board, to_move: Stone, candidate_rule: CandidateRule) -> Self {
        GomokuState {
            board,
            current_player: to_move,
            last_move: None,
            candidate_rule,
        }
    }

    pub fn get_board(&self) -> &Board {
        &self.board
    }

    fn is_root(&self) -> bool {
        self.last_move.is_none()
    }
}

impl GameState for GomokuState {
    type Move = GomokuMove;
    type Player = Stone;

    /// Candidates for the side to move. A root position whose mover has no
    /// stones yet (White's first move) widens to cells next to any stone.
    fn get_possible_moves(&self) -> Vec<Self::Move> {
        let moves = candidate_moves_with(&self.board, self.current_player, self.candidate_rule);
        if moves.is_empty() && self.is_root() {
            return candidate_moves_with(&self.board, self.current_player, CandidateRule::AnyStone);
        }
        moves
    }

    fn make_move(&mut self, mv: &Self::Move) {
        self.board.place(*mv, self.current_player);
        self.last_move = Some(*mv);
        self.current_player = self.current_player.opponent();
    }

    fn get_outcome(&self) -> Option<Outcome<Self::Player>> {
        let GomokuMove(r, c) = self.last_move?;
        if let Some(winner) = detect_win(&self.board, r, c) {
            return Some(Outcome::Win(winner));
        }
        if !has_candidate(&self.board, self.current_player, self.candidate_rule) {
            return Some(Outcome::Draw);
        }
        None
    }

    fn get_current_player(&self) -> Self::Player {
        self.current_player
    }
}
