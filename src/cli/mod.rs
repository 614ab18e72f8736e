//! Terminal front end for the `play` binary.
//!
//! All input comes through [`Console`], a line reader over async stdin, so the
//! computer's thinking pause and the prompt share one tokio runtime.

pub mod duel;
pub mod puzzles;

use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

pub struct Console {
    lines: Lines<BufReader<Stdin>>,
}

impl Console {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prints `text` and waits for a line. `None` once stdin is closed.
    pub async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        print!("{} ", text.bold());
        std::io::stdout().flush()?;
        let line = self.lines.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }
}

pub fn is_quit(input: &str) -> bool {
    matches!(input.to_ascii_lowercase().as_str(), "q" | "quit" | "exit")
}

pub fn report_error(err: impl std::fmt::Display) {
    println!("{}", err.to_string().red());
}
