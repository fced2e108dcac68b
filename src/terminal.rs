use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdin, stdout, Write};

use connect4_ai::{Board, Cell, Position, HEIGHT, WIDTH};

/// Draws the board below the cursor, marking `highlight` cells
pub fn display(board: &Board, highlight: &[Position]) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for _ in 0..HEIGHT {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    let (origin_x, origin_y) = crossterm::cursor::position()?;

    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            let position = Position::new(row, column);
            let (pos_x, pos_y) = (
                origin_x + column as u16,
                origin_y - (HEIGHT - 1 - row) as u16,
            );
            let symbol = if highlight.contains(&position) { "#" } else { "O" };

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style(symbol)
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match board.get(position) {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x + WIDTH as u16, origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}

/// Prints `question` and reads one trimmed line
pub fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    stdout().flush()?;
    let mut buffer = String::new();
    if stdin().read_line(&mut buffer)? == 0 {
        return Err(anyhow!("input closed"));
    }
    Ok(buffer.trim().to_string())
}

pub fn ask_yes_no(question: &str) -> Result<bool> {
    loop {
        let answer = prompt(&format!("{} y/n: ", question))?;
        match answer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

/// Asks for a number, an empty answer picks `default`
pub fn ask_number(question: &str, default: u64) -> Result<u64> {
    loop {
        let answer = prompt(&format!("{} [{}]: ", question, default))?;
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<u64>() {
            Ok(number) => return Ok(number),
            Err(_) => println!("Invalid number: {}", answer),
        }
    }
}
