#[cfg(test)]
pub mod test {
    use anyhow::{anyhow, Result};
    use std::time::Duration;

    use crate::{
        board::{Board, Direction, Player, Position},
        config::{EvalWeights, SearchConfig},
        engine::{Engine, Progress, Reason, Selection},
        error::Error,
        evaluation::evaluate,
        search::{is_decisive, move_order, plies_to_result, WIN_SCORE},
        threats::{find_open_threats, threat_columns, winning_moves},
        transposition_table::{Bound, TranspositionTable},
        zobrist::Zobrist,
        HEIGHT, WIDTH,
    };

    /// 42 alternating moves that fill the board without any four
    const DRAWN_GAME: &str = "311111122322522334334444456556556667777776";

    fn quick_engine(max_depth: u32) -> Engine {
        Engine::new(
            SearchConfig::default()
                .with_max_depth(max_depth)
                .with_table_size(1 << 16)
                .with_seed(7),
        )
    }

    fn choice(selection: Selection) -> Result<crate::engine::MoveChoice> {
        match selection {
            Selection::Play(choice) => Ok(choice),
            Selection::Draw => Err(anyhow!("expected a move, got a draw")),
        }
    }

    // -- board model --

    #[test]
    pub fn lowest_empty_row_respects_gravity() -> Result<()> {
        for end in 0..=DRAWN_GAME.len() {
            let board = Board::from_moves(&DRAWN_GAME[..end])?;
            for column in 0..WIDTH {
                if let Some(row) = board.lowest_empty_row(column) {
                    assert!(board.get(Position::new(row, column)).is_empty());
                    assert!(row == HEIGHT - 1 || !board.get(Position::new(row + 1, column)).is_empty());
                    assert!(board.is_legal_move(column));
                } else {
                    assert!(!board.is_legal_move(column));
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn out_of_range_columns_are_never_legal() {
        let board = Board::new();
        assert_eq!(board.lowest_empty_row(WIDTH), None);
        assert!(!board.is_legal_move(WIDTH));
        assert!(!board.is_legal_move(usize::MAX));
    }

    #[test]
    pub fn illegal_moves_do_not_mutate() -> Result<()> {
        let mut board = Board::from_moves("111111")?;
        let before = board;

        assert_eq!(board.apply_move(0, Player::One), Err(Error::ColumnFull(0)));
        assert_eq!(board.play(0, Player::One), Err(Error::ColumnFull(0)));
        assert_eq!(board.play(WIDTH, Player::One), Err(Error::ColumnOutOfRange(WIDTH)));
        assert_eq!(board, before);
        Ok(())
    }

    #[test]
    pub fn apply_move_returns_a_new_snapshot() -> Result<()> {
        let board = Board::from_moves("44")?;
        let next = board.apply_move(3, Player::One)?;

        assert_eq!(board.disc_count(), 2);
        assert_eq!(next.disc_count(), 3);
        assert_eq!(next.get(Position::new(3, 3)), Player::One.cell());
        Ok(())
    }

    #[test]
    pub fn parsing_moves() -> Result<()> {
        let board = Board::from_moves("4453")?;
        assert_eq!(board.to_string(), ".......\n.......\n.......\n.......\n...O...\n..OXX..\n1234567");
        assert_eq!(board.next_player(), Player::One);

        assert_eq!(Board::from_moves("48"), Err(Error::ParseMove('8')));
        assert_eq!(Board::from_moves("4x"), Err(Error::ParseMove('x')));
        assert_eq!(Board::from_moves("1111111"), Err(Error::ColumnFull(0)));
        assert_eq!(Board::from_moves("1212121"), Err(Error::GameOver));
        Ok(())
    }

    #[test]
    pub fn grid_round_trip_and_validation() -> Result<()> {
        let board = Board::from_moves("443")?;
        assert_eq!(Board::from_grid(&board.to_grid())?, board);

        let mut floating = [[0u8; WIDTH]; HEIGHT];
        floating[4][2] = 1;
        assert_eq!(
            Board::from_grid(&floating),
            Err(Error::FloatingDisc { row: 4, column: 2 })
        );

        let mut invalid = [[0u8; WIDTH]; HEIGHT];
        invalid[HEIGHT - 1][6] = 3;
        assert_eq!(
            Board::from_grid(&invalid),
            Err(Error::InvalidCell {
                row: HEIGHT - 1,
                column: 6,
                value: 3
            })
        );
        Ok(())
    }

    fn winning_boards() -> Result<Vec<(Board, Position, Direction)>> {
        let mut boards = Vec::new();

        let mut horizontal = Board::new();
        for column in 1..=3 {
            horizontal.play(column, Player::One)?;
        }
        let last = horizontal.play(4, Player::One)?;
        boards.push((horizontal, last, Direction::Horizontal));

        let mut vertical = Board::new();
        for _ in 0..3 {
            vertical.play(6, Player::Two)?;
        }
        let last = vertical.play(6, Player::Two)?;
        boards.push((vertical, last, Direction::Vertical));

        // the last disc lands in the middle of the diagonal
        let mut diagonal = Board::new();
        for (column, fillers) in [(0, 0), (1, 1), (2, 2), (3, 3)].iter() {
            for _ in 0..*fillers {
                diagonal.play(*column, Player::Two)?;
            }
        }
        for &column in [0, 1, 3].iter() {
            diagonal.play(column, Player::One)?;
        }
        let last = diagonal.play(2, Player::One)?;
        boards.push((diagonal, last, Direction::DiagonalUp));

        Ok(boards)
    }

    #[test]
    pub fn check_win_finds_every_axis() -> Result<()> {
        for (board, last, direction) in winning_boards()? {
            let line = board.check_win(last).ok_or_else(|| anyhow!("no win found:{:?}", board))?;
            assert_eq!(line.direction, direction);
            assert_eq!(line.cells.len(), 4);
            assert_eq!(line.cells[0], last);
            assert_eq!(Some(line.player), board.winner());
        }
        Ok(())
    }

    #[test]
    pub fn check_win_is_mirror_symmetric() -> Result<()> {
        for (board, last, direction) in winning_boards()? {
            let line = board.check_win(last).ok_or_else(|| anyhow!("no win found"))?;
            let mirrored = board.mirror();
            let mirrored_line = mirrored
                .check_win(last.mirror())
                .ok_or_else(|| anyhow!("no win found after mirroring"))?;

            assert_eq!(mirrored_line.direction, direction.mirror());
            assert_eq!(mirrored_line.player, line.player);

            let mut expected: Vec<Position> = line.cells.iter().map(|p| p.mirror()).collect();
            let mut actual = mirrored_line.cells.clone();
            expected.sort_by_key(|p| (p.row, p.column));
            actual.sort_by_key(|p| (p.row, p.column));
            assert_eq!(actual, expected);
        }

        // no win stays no win
        let board = Board::from_moves("4453")?;
        for column in 0..WIDTH {
            if let Some(row) = board.lowest_empty_row(column) {
                let position = Position::new(row + 1, column);
                if row + 1 < HEIGHT {
                    assert_eq!(board.check_win(position).is_some(), board.mirror().check_win(position.mirror()).is_some());
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn check_win_ignores_empty_cells() {
        assert_eq!(Board::new().check_win(Position::new(HEIGHT - 1, 3)), None);
    }

    #[test]
    pub fn full_board_without_four_is_a_draw() -> Result<()> {
        let mut board = Board::new();
        let mut player = Player::One;
        for column_char in DRAWN_GAME.chars() {
            assert!(!board.is_full());
            let column = column_char.to_digit(10).ok_or_else(|| anyhow!("bad move"))? as usize - 1;
            let last = board.play(column, player)?;
            assert_eq!(board.check_win(last), None);
            player = player.opponent();
        }
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
        assert_eq!(board.disc_count(), WIDTH * HEIGHT);
        assert_eq!(board.legal_moves().count(), 0);
        Ok(())
    }

    // -- threats --

    #[test]
    pub fn vertical_three_is_an_open_threat() -> Result<()> {
        let mut grid = [[0u8; WIDTH]; HEIGHT];
        for row in 3..HEIGHT {
            grid[row][0] = 1;
        }
        let board = Board::from_grid(&grid)?;

        assert!(find_open_threats(&board, Player::One).contains(&0));
        assert!(find_open_threats(&board, Player::Two).is_empty());

        let mut engine = quick_engine(4);
        let choice = choice(engine.select_move(&board, Player::Two))?;
        assert_eq!(choice.column, 0);
        assert_eq!(choice.reason, Reason::Block);
        Ok(())
    }

    #[test]
    pub fn unreachable_gap_is_not_a_threat() -> Result<()> {
        // player one holds row 4 in columns 0-2, but (4, 3) has nothing below it
        let mut grid = [[0u8; WIDTH]; HEIGHT];
        grid[5] = [2, 2, 1, 0, 0, 0, 0];
        grid[4] = [1, 1, 1, 0, 0, 0, 0];
        let board = Board::from_grid(&grid)?;

        assert!(find_open_threats(&board, Player::One).is_empty());

        grid[5][3] = 2;
        let board = Board::from_grid(&grid)?;
        assert_eq!(find_open_threats(&board, Player::One), vec![3]);
        Ok(())
    }

    #[test]
    pub fn threats_report_every_line() -> Result<()> {
        // 2 3 _ 5 style three in the bottom row plus both open ends
        let board = Board::from_moves("22334")?;
        assert_eq!(threat_columns(&board, Player::One), vec![0, 4]);
        assert_eq!(winning_moves(&board, Player::One), vec![0, 4]);
        assert!(winning_moves(&board, Player::Two).is_empty());
        Ok(())
    }

    // -- evaluation --

    #[test]
    pub fn evaluation_is_idempotent() -> Result<()> {
        let weights = EvalWeights::default();
        let board = Board::from_moves("4453326")?;
        let first = evaluate(&board, Player::Two, &weights);
        let second = evaluate(&board, Player::Two, &weights);
        assert_eq!(first, second);
        assert_eq!(evaluate(&Board::new(), Player::One, &weights), 0);
        Ok(())
    }

    #[test]
    pub fn evaluation_prefers_the_centre() -> Result<()> {
        let weights = EvalWeights::default();
        let centre = evaluate(&Board::new().apply_move(3, Player::Two)?, Player::Two, &weights);
        for &column in [0, 1, 2, 4, 5, 6].iter() {
            let side = evaluate(&Board::new().apply_move(column, Player::Two)?, Player::Two, &weights);
            assert!(centre > side, "column {} scored {} against {}", column, side, centre);
        }
        Ok(())
    }

    #[test]
    pub fn opponent_open_three_dominates() -> Result<()> {
        let weights = EvalWeights::default();
        let mut board = Board::new();
        for column in 0..3 {
            board.play(column, Player::One)?;
        }
        assert!(evaluate(&board, Player::Two, &weights) <= -weights.block_three);
        assert!(evaluate(&board, Player::One, &weights) >= weights.open_three);
        Ok(())
    }

    #[test]
    pub fn default_weights_are_ordered() {
        assert!(EvalWeights::default().is_well_ordered());
        let flat = EvalWeights {
            double_threat: 500,
            ..EvalWeights::default()
        };
        assert!(!flat.is_well_ordered());
    }

    fn zero_weights() -> EvalWeights {
        EvalWeights {
            center_column: 0,
            other_column: 0,
            odd_row: 0,
            open_three: 0,
            block_three: 0,
            open_two: 0,
            open_one: 0,
            double_threat: 0,
        }
    }

    /// A board holding only `player`'s discs on the bottom row
    fn bottom_row(columns: &[usize], player: u8) -> Result<Board> {
        let mut grid = [[0u8; WIDTH]; HEIGHT];
        for &column in columns {
            grid[HEIGHT - 1][column] = player;
        }
        Ok(Board::from_grid(&grid)?)
    }

    #[test]
    pub fn odd_row_bonus_applies_to_bottom_discs() -> Result<()> {
        let weights = EvalWeights {
            odd_row: 7,
            ..zero_weights()
        };
        let board = bottom_row(&[0], 1)?;
        assert_eq!(evaluate(&board, Player::One, &weights), 7);
        assert_eq!(evaluate(&board, Player::Two, &weights), -7);
        Ok(())
    }

    #[test]
    pub fn open_one_needs_both_ends_free() -> Result<()> {
        let weights = EvalWeights {
            open_one: 3,
            ..zero_weights()
        };
        // only the horizontal windows starting in columns 2 and 3 have room on both sides
        let board = bottom_row(&[3], 1)?;
        assert_eq!(evaluate(&board, Player::One, &weights), 2 * 3);
        assert_eq!(evaluate(&board, Player::Two, &weights), -2 * 3);
        Ok(())
    }

    #[test]
    pub fn open_two_needs_both_ends_free() -> Result<()> {
        let weights = EvalWeights {
            open_two: 5,
            ..zero_weights()
        };
        let centre = bottom_row(&[2, 3], 1)?;
        assert_eq!(evaluate(&centre, Player::One, &weights), 2 * 5);
        assert_eq!(evaluate(&centre, Player::Two, &weights), -2 * 5);

        // the single window through the corner pair touches the edge
        let corner = bottom_row(&[0, 1], 2)?;
        assert_eq!(evaluate(&corner, Player::Two, &weights), 0);
        Ok(())
    }

    #[test]
    pub fn double_threat_bonus_needs_two_windows() -> Result<()> {
        let weights = EvalWeights {
            double_threat: 11,
            ..zero_weights()
        };
        let centre = bottom_row(&[2, 3], 1)?;
        assert_eq!(evaluate(&centre, Player::One, &weights), 11);
        assert_eq!(evaluate(&centre, Player::Two, &weights), -11);

        let corner = bottom_row(&[0, 1], 1)?;
        assert_eq!(evaluate(&corner, Player::One, &weights), 0);
        Ok(())
    }

    // -- transposition table and hashing --

    #[test]
    pub fn transposition_bounds() {
        let mut table = TranspositionTable::new(64);
        assert!(table.is_empty());

        table.set(5, 4, 100, Bound::Exact);
        table.set(6, 4, 100, Bound::LowerBound);
        table.set(7, 4, 100, Bound::UpperBound);

        assert_eq!(table.probe(5, 4, -50, 50), Some(100));
        // too shallow
        assert_eq!(table.probe(5, 5, -50, 50), None);

        assert_eq!(table.probe(6, 3, -50, 50), Some(100));
        assert_eq!(table.probe(6, 3, -50, 150), None);

        assert_eq!(table.probe(7, 3, 150, 200), Some(100));
        assert_eq!(table.probe(7, 3, 50, 200), None);

        assert_eq!(table.len(), 3);
        table.clear();
        assert_eq!(table.get(5).map(|e| e.score), None);
    }

    #[test]
    pub fn transposition_replacement_prefers_depth() {
        let mut table = TranspositionTable::new(8);
        table.set(1, 6, 10, Bound::Exact);
        // same slot, different position, shallower: kept out
        table.set(9, 2, 20, Bound::Exact);
        assert_eq!(table.get(1).map(|e| e.score), Some(10));
        assert!(table.get(9).is_none());

        table.set(9, 6, 30, Bound::Exact);
        assert!(table.get(1).is_none());
        assert_eq!(table.get(9).map(|e| e.score), Some(30));
    }

    #[test]
    pub fn zobrist_incremental_matches_full_hash() -> Result<()> {
        let zobrist = Zobrist::new(Some(42));
        let board = Board::from_moves("4453")?;
        let hash = zobrist.hash(&board, Player::One, Player::Two);

        let row = board.lowest_empty_row(2).ok_or_else(|| anyhow!("column full"))?;
        let next = board.apply_move(2, Player::One)?;
        let updated = zobrist.update(hash, Position::new(row, 2), Player::One);

        assert_eq!(updated, zobrist.hash(&next, Player::Two, Player::Two));
        assert_ne!(hash, zobrist.hash(&board, Player::One, Player::One));
        assert_ne!(hash, updated);
        Ok(())
    }

    #[test]
    pub fn zobrist_seeds() -> Result<()> {
        let board = Board::from_moves("4453")?;
        let a = Zobrist::new(Some(1)).hash(&board, Player::One, Player::One);
        let b = Zobrist::new(Some(1)).hash(&board, Player::One, Player::One);
        let c = Zobrist::new(Some(2)).hash(&board, Player::One, Player::One);
        assert_eq!(a, b);
        assert_ne!(a, c);
        Ok(())
    }

    // -- search --

    #[test]
    pub fn centre_first_move_order() {
        assert_eq!(move_order(), [3, 4, 2, 5, 1, 6, 0]);
    }

    #[test]
    pub fn search_finds_immediate_win_at_depth_one() -> Result<()> {
        let board = Board::from_moves("1516172")?;
        let mut engine = quick_engine(8);

        let results: Vec<_> = engine.search(&board, Player::Two).collect();
        // a forced win ends the iteration
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].column, 3);
        assert_eq!(results[0].score, WIN_SCORE - 1);
        assert_eq!(plies_to_result(results[0].score), Some(1));
        Ok(())
    }

    #[test]
    pub fn search_blocks_without_tactics() -> Result<()> {
        let board = Board::from_moves("12131")?;
        let mut engine = quick_engine(2);

        let result = engine
            .search(&board, Player::Two)
            .run()
            .ok_or_else(|| anyhow!("no search result"))?;
        assert_eq!(result.column, 0);
        assert_eq!(result.depth, 2);
        assert!(!is_decisive(result.score));
        Ok(())
    }

    #[test]
    pub fn search_sees_forced_loss() -> Result<()> {
        // two open ends on the bottom row, nothing saves player two
        let board = Board::from_moves("22334")?;
        let mut engine = quick_engine(2);

        let result = engine
            .search(&board, Player::Two)
            .run()
            .ok_or_else(|| anyhow!("no search result"))?;
        assert_eq!(result.score, -WIN_SCORE + 2);
        assert_eq!(plies_to_result(result.score), Some(2));
        Ok(())
    }

    #[test]
    pub fn search_prefers_centre_on_empty_board() {
        let mut engine = quick_engine(1);
        let result = engine.search(&Board::new(), Player::Two).run();
        assert_eq!(result.map(|r| (r.column, r.depth)), Some((3, 1)));
    }

    #[test]
    pub fn search_updates_history_and_killers() -> Result<()> {
        let board = Board::from_moves("44")?;
        let mut engine = quick_engine(3);

        let result = engine
            .search(&board, Player::One)
            .run()
            .ok_or_else(|| anyhow!("no search result"))?;
        assert_eq!(result.depth, 3);
        assert!(engine.history().weight(result.column) >= 1);
        assert_eq!(engine.killer(3), Some(result.column));
        assert!(engine.node_count() > 0);

        engine.new_game();
        assert_eq!(engine.node_count(), 0);
        assert_eq!(engine.killer(3), None);
        assert!((0..WIDTH).all(|column| engine.history().weight(column) == 0));
        Ok(())
    }

    #[test]
    pub fn unbounded_depth_is_limited_by_the_board() -> Result<()> {
        let config = SearchConfig::default()
            .with_max_depth(u32::MAX)
            .with_time_budget(Duration::from_millis(50))
            .with_table_size(1 << 16);
        let mut engine = Engine::new(config);
        assert_eq!(engine.killer(u32::MAX), None);

        let board = Board::from_moves("4453")?;
        let choice = choice(engine.select_move(&board, Player::One))?;
        assert!(board.is_legal_move(choice.column));
        Ok(())
    }

    #[test]
    pub fn search_stops_at_the_time_budget() -> Result<()> {
        let board = Board::from_moves("44")?;
        let mut engine = Engine::new(SearchConfig::default().with_time_budget(Duration::from_millis(0)));
        assert_eq!(engine.search(&board, Player::One).next(), None);
        Ok(())
    }

    // -- move selection --

    #[test]
    pub fn immediate_win_beats_blocking() -> Result<()> {
        // player one threatens column 1, but player two completes the bottom row first
        let board = Board::from_moves("1516172")?;
        assert_eq!(threat_columns(&board, Player::One), vec![0]);

        let mut engine = quick_engine(4);
        let choice = choice(engine.select_move(&board, Player::Two))?;
        assert_eq!(choice.column, 3);
        assert_eq!(choice.reason, Reason::ImmediateWin);
        Ok(())
    }

    #[test]
    pub fn empty_board_opens_in_the_centre() {
        let mut engine = quick_engine(4);
        let selection = engine.select_move(&Board::new(), Player::Two);
        assert_eq!(selection.column(), Some(3));
    }

    #[test]
    pub fn adjacent_stack_trap() -> Result<()> {
        let board = Board::from_moves("443")?;
        let mut engine = quick_engine(4);
        let choice = choice(engine.select_move(&board, Player::Two))?;
        assert_eq!(choice.column, 1);
        assert_eq!(choice.reason, Reason::KnownTrap);
        Ok(())
    }

    #[test]
    pub fn double_threat_is_lost() -> Result<()> {
        let board = Board::from_moves("22334")?;
        let mut engine = quick_engine(4);
        let choice = choice(engine.select_move(&board, Player::Two))?;
        assert_eq!(choice.reason, Reason::LostPosition);
        assert_eq!(choice.column, 0);
        Ok(())
    }

    #[test]
    pub fn block_that_opens_the_cell_above_is_searched() -> Result<()> {
        let mut grid = [[0u8; WIDTH]; HEIGHT];
        grid[5] = [1, 1, 1, 0, 2, 2, 1];
        grid[4] = [2, 2, 0, 0, 1, 1, 1];
        grid[3][0] = 2;
        let board = Board::from_grid(&grid)?;
        assert_eq!(threat_columns(&board, Player::One), vec![3]);

        let mut engine = quick_engine(3);
        let choice = choice(engine.select_move(&board, Player::Two))?;
        assert_eq!(choice.reason, Reason::Search);
        assert!(board.is_legal_move(choice.column));
        assert!(choice.score.map_or(false, |score| score < 0 && is_decisive(score)));
        Ok(())
    }

    #[test]
    pub fn full_board_selects_draw() -> Result<()> {
        let board = Board::from_moves(DRAWN_GAME)?;
        let mut engine = quick_engine(4);
        assert_eq!(engine.select_move(&board, Player::One), Selection::Draw);
        assert_eq!(engine.select_move(&board, Player::One).column(), None);
        Ok(())
    }

    #[test]
    pub fn exhausted_budget_falls_back_to_first_legal() -> Result<()> {
        let board = Board::from_moves("44")?;
        let mut engine = Engine::new(SearchConfig::default().with_time_budget(Duration::from_millis(0)));
        let choice = choice(engine.select_move(&board, Player::One))?;
        assert_eq!(choice.reason, Reason::Fallback);
        assert_eq!(choice.column, 0);
        Ok(())
    }

    #[test]
    pub fn search_decides_quiet_positions() -> Result<()> {
        let board = Board::from_moves("4453")?;
        let mut engine = quick_engine(4);
        let choice = choice(engine.select_move(&board, Player::One))?;
        assert_eq!(choice.reason, Reason::Search);
        assert_eq!(choice.depth, Some(4));
        assert!(board.is_legal_move(choice.column));
        Ok(())
    }

    #[test]
    pub fn grid_interface() -> Result<()> {
        let mut grid = [[0u8; WIDTH]; HEIGHT];
        for row in 3..HEIGHT {
            grid[row][0] = 1;
        }
        let mut engine = quick_engine(4);
        assert_eq!(engine.select_move_grid(&grid, 2)?.column(), Some(0));
        assert_eq!(engine.select_move_grid(&grid, 3), Err(Error::InvalidPlayer(3)));

        grid[2][5] = 2;
        assert_eq!(
            engine.select_move_grid(&grid, 2),
            Err(Error::FloatingDisc { row: 2, column: 5 })
        );
        Ok(())
    }

    #[test]
    pub fn background_selection() -> Result<()> {
        let board = Board::from_moves("12131")?;
        let engine = quick_engine(4);

        let pending = engine.spawn_select(board, Player::Two);
        let (engine, selection) = pending.wait()?;
        assert_eq!(selection.column(), Some(0));
        assert_eq!(engine.config().max_depth, 4);

        // the returned session keeps working
        let mut pending = engine.spawn_select(Board::from_moves("4453")?, Player::One);
        let (engine, selection) = loop {
            pending = match pending.try_take()? {
                Progress::Done(engine, selection) => break (engine, selection),
                Progress::Thinking(pending) => pending,
            };
            std::thread::sleep(Duration::from_millis(5));
        };
        assert!(selection.column().is_some());
        assert!(engine.node_count() > 0);
        Ok(())
    }

    #[test]
    pub fn separate_sessions_do_not_share_state() -> Result<()> {
        let board = Board::from_moves("4453")?;
        let mut first = quick_engine(3);
        let second = quick_engine(3);

        first.select_move(&board, Player::One);
        assert!(first.node_count() > 0);
        assert_eq!(second.node_count(), 0);
        assert!((0..WIDTH).all(|column| second.history().weight(column) == 0));
        Ok(())
    }
}
