//! Confirmation prompts for destructive or ambiguous operations.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Ask a yes/no question on stdout and read the answer from stdin.
/// `assume_yes` (the `--yes` flag) short-circuits to `true`.
pub fn confirm(question: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    print!("{} (y/n): ", question);
    io::stdout().flush().context("failed to flush stdout")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;

    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Ask the caller to pick one of a short list of single-letter choices,
/// e.g. `choose("Replace, merge, or cancel?", &['r', 'm', 'c'])`.
/// Re-prompts until one of the letters is given.
pub fn choose(question: &str, choices: &[char]) -> Result<char> {
    loop {
        print!("{} [{}]: ", question, choices.iter().collect::<String>());
        io::stdout().flush().context("failed to flush stdout")?;

        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("failed to read choice")?;

        // EOF: treat as the last (cancel-ish) choice so piped input cannot
        // spin forever.
        if answer.is_empty() {
            return Ok(*choices.last().expect("choices must be non-empty"));
        }

        if let Some(c) = answer.trim().chars().next() {
            let c = c.to_ascii_lowercase();
            if choices.contains(&c) {
                return Ok(c);
            }
        }
        println!("Please answer one of: {:?}", choices);
    }
}
