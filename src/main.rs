use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use std::time::Duration;

use connect4_ai::*;

mod terminal;
use terminal::*;

/// Random plies played before the engines take over in self-play
const SELF_PLAY_OPENING: usize = 2;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum GameState {
    Playing,
    Won(Player),
    Draw,
}

fn main() -> Result<()> {
    env_logger::init();

    println!("Welcome to Connect 4\n");

    let think_time = ask_number("AI thinking time in milliseconds?", 1500)?;
    let config = SearchConfig::default().with_time_budget(Duration::from_millis(think_time));

    if ask_yes_no("Run engine self-play instead of a game?")? {
        return self_play(config);
    }

    let ai_players = (
        ask_yes_no("Is player 1 AI controlled?")?,
        ask_yes_no("Is player 2 AI controlled?")?,
    );
    play_game(config, ai_players)
}

fn play_game(config: SearchConfig, ai_players: (bool, bool)) -> Result<()> {
    let mut board = Board::new();
    let mut player = Player::One;
    let mut state = GameState::Playing;
    let mut winning_cells = Vec::new();

    // each computer side gets its own session
    let mut engines = [
        if ai_players.0 { Some(Engine::new(config)) } else { None },
        if ai_players.1 { Some(Engine::new(config)) } else { None },
    ];

    // game loop
    while state == GameState::Playing {
        display(&board, &winning_cells)?;

        let column = match engines[player.index()].take() {
            // AI player
            Some(engine) => {
                // slow down play if both players are AI
                if ai_players == (true, true) {
                    std::thread::sleep(Duration::from_secs(1));
                }

                let (engine, selection) = think(engine, board, player)?;
                engines[player.index()] = Some(engine);

                match selection {
                    Selection::Play(choice) => {
                        if let Some(score) = choice.score {
                            if let Some(plies) = search::plies_to_result(score) {
                                let winner = if score > 0 { player } else { player.opponent() };
                                println!("Player {} can force a win within {} plies.", winner, plies);
                            }
                        }
                        println!("Best move: {} ({})", choice.column + 1, choice.reason);
                        choice.column
                    }
                    Selection::Draw => {
                        state = GameState::Draw;
                        continue;
                    }
                }
            }
            // human player
            None => {
                let input = prompt(&format!("Player {} move input > ", player))?;
                match input.parse::<usize>() {
                    Ok(column @ 1..=WIDTH) => column - 1,
                    _ => {
                        println!("Invalid column: {}, expected 1 to {}", input, WIDTH);
                        continue;
                    }
                }
            }
        };

        let position = match board.play(column, player) {
            Ok(position) => position,
            Err(err) => {
                println!("{}", err);
                // try the move again
                continue;
            }
        };

        state = outcome(&board, position, player);
        if let Some(line) = board.check_win(position) {
            winning_cells = line.cells;
        }
        player = player.opponent();
    }

    display(&board, &winning_cells)?;
    match state {
        GameState::Won(winner) => println!("Player {} wins!", winner),
        _ => println!("Draw!"),
    }
    Ok(())
}

/// Runs the engine on a worker while a spinner keeps the terminal alive
fn think(engine: Engine, board: Board, player: Player) -> Result<(Engine, Selection)> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("AI is thinking...");

    let mut pending = engine.spawn_select(board, player);
    loop {
        pending = match pending.try_take()? {
            Progress::Done(engine, selection) => {
                spinner.finish_and_clear();
                return Ok((engine, selection));
            }
            Progress::Thinking(pending) => pending,
        };
        spinner.tick();
        std::thread::sleep(Duration::from_millis(50));
    }
}

fn outcome(board: &Board, last: Position, player: Player) -> GameState {
    if board.check_win(last).is_some() {
        GameState::Won(player)
    } else if board.is_full() {
        GameState::Draw
    } else {
        GameState::Playing
    }
}

/// Plays engine-vs-engine games in parallel and reports the tally
fn self_play(config: SearchConfig) -> Result<()> {
    let games = ask_number("How many games?", 8)?;

    let progress = ProgressBar::new(games);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Self-play: {bar:40.cyan/blue} {pos}/{len} games ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let outcomes = (0..games)
        .into_par_iter()
        .map(|game| {
            let outcome = self_play_game(config, game);
            progress.inc(1);
            outcome
        })
        .collect::<Result<Vec<_>>>()?;
    progress.finish();

    let count = |state: GameState| outcomes.iter().filter(|&&s| s == state).count();
    println!(
        "Player 1 wins: {}, Player 2 wins: {}, Draws: {}",
        count(GameState::Won(Player::One)),
        count(GameState::Won(Player::Two)),
        count(GameState::Draw)
    );
    Ok(())
}

fn self_play_game(config: SearchConfig, game: u64) -> Result<GameState> {
    let mut rng = StdRng::seed_from_u64(game);
    let mut engines = [
        Engine::new(config.with_seed(2 * game)),
        Engine::new(config.with_seed(2 * game + 1)),
    ];
    let mut board = Board::new();
    let mut player = Player::One;

    let mut ply = 0;
    loop {
        let column = if ply < SELF_PLAY_OPENING {
            let legal: Vec<usize> = board.legal_moves().collect();
            legal[rng.random_range(0..legal.len())]
        } else {
            match engines[player.index()].select_move(&board, player) {
                Selection::Play(choice) => choice.column,
                Selection::Draw => return Ok(GameState::Draw),
            }
        };

        let position = board
            .play(column, player)
            .map_err(|err| anyhow!("game {}: engine chose an illegal move: {}", game, err))?;
        match outcome(&board, position, player) {
            GameState::Playing => player = player.opponent(),
            finished => return Ok(finished),
        }
        ply += 1;
    }
}
