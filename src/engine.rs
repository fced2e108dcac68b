//! The computer opponent: tactical rules first, search for everything else

use log::{info, trace};

use std::fmt;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

use crate::{
    board::{Board, Player, Position},
    config::SearchConfig,
    error::{Error, Result},
    search::{move_order, HistoryTable, IterativeDeepening, SearchState},
    threats::{threat_columns, winning_moves},
    HEIGHT, WIDTH,
};

/// Why the engine chose its column
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Reason {
    /// completes four this turn
    ImmediateWin,
    /// answers the adjacent-stacking opening trap
    KnownTrap,
    /// first disc of the game
    Opening,
    /// fills the cell of the opponent's only open three
    Block,
    /// the opponent has several open threes, avoid losing on the spot
    LostPosition,
    /// the result of the iterative-deepening search
    Search,
    /// the search produced nothing usable, first legal column
    Fallback,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Reason::ImmediateWin => "winning move",
            Reason::KnownTrap => "known trap",
            Reason::Opening => "opening",
            Reason::Block => "forced block",
            Reason::LostPosition => "lost position",
            Reason::Search => "search",
            Reason::Fallback => "fallback",
        };
        f.write_str(text)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct MoveChoice {
    pub column: usize,
    pub reason: Reason,
    /// search score in the mover's favour, when a search decided the move
    pub score: Option<i32>,
    /// deepest completed search depth, when a search decided the move
    pub depth: Option<u32>,
}

impl MoveChoice {
    fn tactical(column: usize, reason: Reason) -> Self {
        Self {
            column,
            reason,
            score: None,
            depth: None,
        }
    }
}

/// The engine's answer to a move request
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Selection {
    Play(MoveChoice),
    /// the board is full, the game is drawn
    Draw,
}

impl Selection {
    pub fn column(&self) -> Option<usize> {
        match self {
            Selection::Play(choice) => Some(choice.column),
            Selection::Draw => None,
        }
    }
}

/// One game session of the computer opponent
///
/// The session owns its Zobrist keys, transposition table, history table
/// and killer slots. Separate games need separate engines.
#[derive(Clone)]
pub struct Engine {
    config: SearchConfig,
    state: SearchState,
}

impl Engine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            state: SearchState::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryTable {
        &self.state.history
    }

    /// Best root column of the latest pass at `depth`
    pub fn killer(&self, depth: u32) -> Option<usize> {
        self.state.killer(depth)
    }

    /// Nodes searched in this session
    pub fn node_count(&self) -> u64 {
        self.state.node_count
    }

    /// Starts a new game: fresh keys, empty caches
    pub fn new_game(&mut self) {
        self.state.reset(&self.config);
    }

    /// Cooperative form of the search: each step runs one more depth
    pub fn search(&mut self, board: &Board, mover: Player) -> IterativeDeepening<'_> {
        IterativeDeepening::new(&mut self.state, &self.config, *board, mover)
    }

    /// Chooses a column for `mover`, or reports a draw on a full board
    pub fn select_move(&mut self, board: &Board, mover: Player) -> Selection {
        let legal: Vec<usize> = board.legal_moves().collect();
        let first_legal = match legal.first() {
            Some(&column) => column,
            None => {
                info!("no legal moves, the game is drawn");
                return Selection::Draw;
            }
        };

        let choice = match self.tactical_move(board, mover, first_legal) {
            Some(choice) => choice,
            None => match self.search(board, mover).run() {
                Some(result) if board.is_legal_move(result.column) => MoveChoice {
                    column: result.column,
                    reason: Reason::Search,
                    score: Some(result.score),
                    depth: Some(result.depth),
                },
                _ => MoveChoice::tactical(first_legal, Reason::Fallback),
            },
        };

        info!(
            "player {} plays column {} ({})",
            mover, choice.column, choice.reason
        );
        Selection::Play(choice)
    }

    /// `select_move` over raw cells: 0 empty, 1 and 2 for the players
    pub fn select_move_grid(
        &mut self,
        grid: &[[u8; WIDTH]; HEIGHT],
        mover: u8,
    ) -> Result<Selection> {
        let board = Board::from_grid(grid)?;
        let mover = Player::from_number(mover)?;
        Ok(self.select_move(&board, mover))
    }

    /// Runs `select_move` on a worker thread
    ///
    /// The session moves into the worker and comes back with the selection,
    /// so the caller's thread stays free while the engine thinks.
    pub fn spawn_select(self, board: Board, mover: Player) -> PendingMove {
        let (tx, rx) = channel();
        thread::spawn(move || {
            let mut engine = self;
            let selection = engine.select_move(&board, mover);
            // the receiver may have been dropped, the result is simply discarded
            let _ = tx.send((engine, selection));
        });
        PendingMove { receiver: rx }
    }

    fn tactical_move(&self, board: &Board, mover: Player, first_legal: usize) -> Option<MoveChoice> {
        let opponent = mover.opponent();

        if let Some(&column) = winning_moves(board, mover).first() {
            trace!("immediate win in column {}", column);
            return Some(MoveChoice::tactical(column, Reason::ImmediateWin));
        }

        if is_adjacent_stack_trap(board, mover) {
            let column = [1, 4]
                .iter()
                .copied()
                .find(|&column| board.is_legal_move(column))
                .unwrap_or(first_legal);
            trace!("adjacent stack trap, answering in column {}", column);
            return Some(MoveChoice::tactical(column, Reason::KnownTrap));
        }

        if board.disc_count() == 0 {
            let column = move_order()
                .iter()
                .copied()
                .find(|&column| board.is_legal_move(column))
                .unwrap_or(first_legal);
            return Some(MoveChoice::tactical(column, Reason::Opening));
        }

        let threats = threat_columns(board, opponent);
        match threats.len() {
            0 => None,
            1 => {
                let column = threats[0];
                let blocked = board.apply_move(column, mover).ok()?;
                if blocked.is_winning_move(column, opponent) {
                    trace!("blocking column {} opens the cell above, searching instead", column);
                    None
                } else {
                    trace!("blocking open three in column {}", column);
                    Some(MoveChoice::tactical(column, Reason::Block))
                }
            }
            _ => {
                trace!("opponent has open threes in columns {:?}", threats);
                let column = board
                    .legal_moves()
                    .find(|&column| {
                        board
                            .apply_move(column, mover)
                            .map(|next| winning_moves(&next, opponent).is_empty())
                            .unwrap_or(false)
                    })
                    .unwrap_or(first_legal);
                Some(MoveChoice::tactical(column, Reason::LostPosition))
            }
        }
    }
}

/// The opponent opened in columns 3 and 4 (1-indexed) and the mover stacked
/// on the centre: blocking the obvious side loses, so a fixed reply is used
///
/// Only this exact position is recognised.
fn is_adjacent_stack_trap(board: &Board, mover: Player) -> bool {
    let opponent = mover.opponent();
    let bottom = HEIGHT - 1;
    board.disc_count() == 3
        && board.get(Position::new(bottom, 2)) == opponent.cell()
        && board.get(Position::new(bottom, 3)) == opponent.cell()
        && board.get(Position::new(bottom - 1, 3)) == mover.cell()
}

/// A move being chosen on a worker thread
pub struct PendingMove {
    receiver: Receiver<(Engine, Selection)>,
}

/// State of a `PendingMove` after a poll
pub enum Progress {
    Done(Engine, Selection),
    /// still thinking, poll the returned handle again later
    Thinking(PendingMove),
}

impl PendingMove {
    /// Polls the worker without blocking
    ///
    /// The handle is consumed once the result is out, so it can only be
    /// taken once.
    pub fn try_take(self) -> Result<Progress> {
        match self.receiver.try_recv() {
            Ok((engine, selection)) => Ok(Progress::Done(engine, selection)),
            Err(TryRecvError::Empty) => Ok(Progress::Thinking(self)),
            Err(TryRecvError::Disconnected) => Err(Error::WorkerLost),
        }
    }

    /// Blocks until the worker reports back
    pub fn wait(self) -> Result<(Engine, Selection)> {
        self.receiver.recv().map_err(|_| Error::WorkerLost)
    }
}
