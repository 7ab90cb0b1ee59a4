/*
  Minuet, a chess rules engine.
  Copyright (C) 2025 The Minuet Authors.

  Minuet is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Minuet is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! A console driver for the rules core: renders the board, reads moves in
//! coordinate notation, and plays whichever side is to move.

use std::env;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use minuet::{movegen, perft::perft, Board, Move, Square};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "perft" => {
                if let Some(depth) = args.get(2).and_then(|s| s.parse::<u8>().ok()) {
                    let tic = Instant::now();
                    let nodes = perft(&mut Board::new(), depth);
                    let secs = tic.elapsed().as_secs_f64();
                    #[allow(clippy::cast_precision_loss)]
                    let speed = nodes as f64 / secs;
                    println!("depth {depth}: {nodes} nodes in {secs:.2} secs ({speed:.0} nodes/sec)");
                } else {
                    println!("please specify a depth");
                }
            }
            _ => {
                println!("unrecognized mode of operation {:?}", args[1]);
                println!("modes: perft <depth>, or no arguments for interactive play");
            }
        }
        return;
    }

    if let Err(e) = play() {
        eprintln!("input failed: {e}");
    }
}

/// Run the interactive move loop until `quit` or end of input.
fn play() -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut board = Board::new();

    loop {
        println!("{board}");
        println!("{} to move", board.player());
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let input = line?;
        let token = input.trim();

        match token {
            "" => {}
            "quit" => break,
            "undo" => board.undo(),
            "moves" => {
                let moves = movegen::legal_moves(&mut board);
                let listing: Vec<String> = moves.iter().map(ToString::to_string).collect();
                println!("{}", listing.join(" "));
            }
            _ => match parse_move(token) {
                Ok(m) => {
                    if movegen::legal_moves(&mut board).contains(&m) {
                        board.apply(m).expect("legal move must apply");
                    } else {
                        println!("illegal move: {m}");
                    }
                }
                Err(e) => println!("could not read move: {e}"),
            },
        }
    }

    println!("Exiting.");
    Ok(())
}

/// Parse a four-character coordinate move such as `e2e4`.
fn parse_move(token: &str) -> Result<Move, &'static str> {
    if token.len() != 4 || !token.is_ascii() {
        return Err("expected a move like e2e4");
    }
    let from = Square::from_algebraic(&token[0..2])?;
    let to = Square::from_algebraic(&token[2..4])?;
    Ok(Move::normal(from, to))
}
