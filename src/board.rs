use std::fmt;

use crate::{
    error::{Error, Result},
    CONNECT, HEIGHT, LINE_COUNT, WIDTH,
};

/// One of the two sides. Player one always moves first.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Parses the wire value used by presentation layers (1 or 2)
    pub fn from_number(number: u8) -> Result<Self> {
        match number {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(Error::InvalidPlayer(other)),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn index(self) -> usize {
        self.number() as usize - 1
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
            Cell::Empty => '.',
        }
    }
}

/// A cell coordinate, row 0 is the top of the board
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Steps `distance` cells along `direction`, `None` if that leaves the board
    pub fn offset(self, direction: Direction, distance: isize) -> Option<Position> {
        let (d_row, d_column) = direction.delta();
        let row = self.row as isize + d_row * distance;
        let column = self.column as isize + d_column * distance;
        if row < 0 || row >= HEIGHT as isize || column < 0 || column >= WIDTH as isize {
            return None;
        }
        Some(Position::new(row as usize, column as usize))
    }

    pub fn mirror(self) -> Self {
        Position::new(self.row, WIDTH - 1 - self.column)
    }
}

/// The four axes a line of discs can run along
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// top-left to bottom-right
    DiagonalDown,
    /// bottom-left to top-right
    DiagonalUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// (row step, column step) of one cell along the axis
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
        }
    }

    /// The axis a line maps onto when the board is reflected left-to-right
    pub fn mirror(self) -> Self {
        match self {
            Direction::DiagonalDown => Direction::DiagonalUp,
            Direction::DiagonalUp => Direction::DiagonalDown,
            other => other,
        }
    }
}

/// A run of exactly `CONNECT` cells along one axis
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Line {
    pub direction: Direction,
    pub cells: [Position; CONNECT],
}

/// Every line of four on the board, enumerated at compile time
pub const LINES: [Line; LINE_COUNT] = build_lines();

const fn build_lines() -> [Line; LINE_COUNT] {
    let empty = Line {
        direction: Direction::Horizontal,
        cells: [Position::new(0, 0); CONNECT],
    };
    let mut lines = [empty; LINE_COUNT];
    let mut n = 0;

    let mut d = 0;
    while d < 4 {
        let direction = Direction::ALL[d];
        let (d_row, d_column) = direction.delta();
        let mut row = 0;
        while row < HEIGHT {
            let mut column = 0;
            while column < WIDTH {
                let end_row = row as isize + d_row * (CONNECT as isize - 1);
                let end_column = column as isize + d_column * (CONNECT as isize - 1);
                if end_row >= 0
                    && end_row < HEIGHT as isize
                    && end_column >= 0
                    && end_column < WIDTH as isize
                {
                    let mut cells = [Position::new(0, 0); CONNECT];
                    let mut i = 0;
                    while i < CONNECT {
                        cells[i] = Position::new(
                            (row as isize + d_row * i as isize) as usize,
                            (column as isize + d_column * i as isize) as usize,
                        );
                        i += 1;
                    }
                    lines[n] = Line { direction, cells };
                    n += 1;
                }
                column += 1;
            }
            row += 1;
        }
        d += 1;
    }
    lines
}

/// A completed line found by `Board::check_win`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct WinLine {
    pub player: Player,
    pub direction: Direction,
    /// the seed cell first, then the cells walked in each direction
    pub cells: Vec<Position>,
}

/// A 6x7 Connect 4 grid, stored top row first
///
/// Boards are small `Copy` values: every placement through `apply_move`
/// returns a fresh snapshot, so search branches never alias each other.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Builds a board from a string of 1-indexed columns, alternating
    /// from player one, e.g. "4453"
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut player = Player::One;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    let position = board.play(column - 1, player)?;
                    // abort if the position is won at any point
                    if board.check_win(position).is_some() {
                        return Err(Error::GameOver);
                    }
                    player = player.opponent();
                }
                _ => return Err(Error::ParseMove(column_char)),
            }
        }
        Ok(board)
    }

    /// Builds a board from raw cell values (0 empty, 1 and 2 players),
    /// top row first, checking that no disc is floating
    pub fn from_grid(grid: &[[u8; WIDTH]; HEIGHT]) -> Result<Self> {
        let mut board = Self::new();
        for (row, values) in grid.iter().enumerate() {
            for (column, &value) in values.iter().enumerate() {
                board.cells[row][column] = match value {
                    0 => Cell::Empty,
                    1 => Cell::PlayerOne,
                    2 => Cell::PlayerTwo,
                    value => return Err(Error::InvalidCell { row, column, value }),
                };
            }
        }
        for row in 0..HEIGHT - 1 {
            for column in 0..WIDTH {
                if !board.cells[row][column].is_empty() && board.cells[row + 1][column].is_empty() {
                    return Err(Error::FloatingDisc { row, column });
                }
            }
        }
        Ok(board)
    }

    pub fn to_grid(&self) -> [[u8; WIDTH]; HEIGHT] {
        let mut grid = [[0; WIDTH]; HEIGHT];
        for (row, cells) in self.cells.iter().enumerate() {
            for (column, cell) in cells.iter().enumerate() {
                grid[row][column] = cell.owner().map_or(0, Player::number);
            }
        }
        grid
    }

    pub fn get(&self, position: Position) -> Cell {
        self.cells[position.row][position.column]
    }

    /// The row a disc dropped into `column` would land on
    pub fn lowest_empty_row(&self, column: usize) -> Option<usize> {
        if column >= WIDTH {
            return None;
        }
        (0..HEIGHT).rev().find(|&row| self.cells[row][column].is_empty())
    }

    pub fn is_legal_move(&self, column: usize) -> bool {
        self.lowest_empty_row(column).is_some()
    }

    /// Legal columns in ascending order
    pub fn legal_moves(&self) -> impl Iterator<Item = usize> + '_ {
        (0..WIDTH).filter(move |&column| self.is_legal_move(column))
    }

    /// Whether a disc could be placed on `position` this turn
    pub fn is_playable(&self, position: Position) -> bool {
        self.get(position).is_empty()
            && (position.row == HEIGHT - 1
                || !self.cells[position.row + 1][position.column].is_empty())
    }

    /// Returns a new board with `player`'s disc dropped into `column`
    pub fn apply_move(&self, column: usize, player: Player) -> Result<Board> {
        let mut next = *self;
        next.play(column, player)?;
        Ok(next)
    }

    /// Drops `player`'s disc into `column` in place, returning where it landed
    pub fn play(&mut self, column: usize, player: Player) -> Result<Position> {
        if column >= WIDTH {
            return Err(Error::ColumnOutOfRange(column));
        }
        let row = self
            .lowest_empty_row(column)
            .ok_or(Error::ColumnFull(column))?;
        self.cells[row][column] = player.cell();
        Ok(Position::new(row, column))
    }

    /// Places a disc without any checks, the caller guarantees `position`
    /// came from `lowest_empty_row`
    pub(crate) fn with_disc(&self, position: Position, player: Player) -> Board {
        let mut next = *self;
        next.cells[position.row][position.column] = player.cell();
        next
    }

    /// Same as `check_win(last).is_some()` without collecting the cells
    pub fn completes_four(&self, last: Position) -> bool {
        let player = match self.get(last).owner() {
            Some(player) => player,
            None => return false,
        };
        Direction::ALL.iter().any(|&direction| {
            let mut count = 1;
            for &step in [-1isize, 1].iter() {
                let mut distance = step;
                while let Some(position) = last.offset(direction, distance) {
                    if self.get(position) != player.cell() {
                        break;
                    }
                    count += 1;
                    distance += step;
                }
            }
            count >= CONNECT
        })
    }

    /// Checks whether the disc at `last` completes a line of four
    pub fn check_win(&self, last: Position) -> Option<WinLine> {
        let player = self.get(last).owner()?;

        for &direction in Direction::ALL.iter() {
            let mut cells = vec![last];
            for &step in [-1isize, 1].iter() {
                let mut distance = step;
                while let Some(position) = last.offset(direction, distance) {
                    if self.get(position) != player.cell() {
                        break;
                    }
                    cells.push(position);
                    distance += step;
                }
            }
            if cells.len() >= CONNECT {
                return Some(WinLine {
                    player,
                    direction,
                    cells,
                });
            }
        }
        None
    }

    /// Whether `player` would complete a line by dropping into `column`
    pub fn is_winning_move(&self, column: usize, player: Player) -> bool {
        match self.lowest_empty_row(column) {
            Some(row) => {
                let position = Position::new(row, column);
                self.with_disc(position, player).completes_four(position)
            }
            None => false,
        }
    }

    /// Scans every line on the board for a completed four
    pub fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|line| {
            let owner = self.get(line.cells[0]).owner()?;
            if line.cells[1..].iter().all(|&p| self.get(p) == owner.cell()) {
                Some(owner)
            } else {
                None
            }
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(|cell| !cell.is_empty())
    }

    pub fn disc_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// The player due to move if both sides have alternated from player one
    pub fn next_player(&self) -> Player {
        if self.disc_count() % 2 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }

    /// Reflects the board left-to-right
    pub fn mirror(&self) -> Board {
        let mut mirrored = *self;
        for row in mirrored.cells.iter_mut() {
            row.reverse();
        }
        mirrored
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        let columns: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        write!(f, "{}", columns)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}
