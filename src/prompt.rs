//! Interactive confirmation.
//!
//! Fetching a change by number runs code nobody has reviewed yet, so the
//! installer asks first. On a terminal the question is a `dialoguer`
//! confirm prompt on standard error. When standard input is not a terminal
//! (piped input, scripts) one line is read from it instead and only `y` or
//! `yes` counts as consent.

use std::io::{self, BufRead, IsTerminal, Write};

use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::error::{Error, Result};

/// Trait for asking the user a yes/no question - allows mocking in tests
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Asks on the controlling terminal, or reads an answer from standard input.
pub struct TerminalConfirmation;

impl Confirmation for TerminalConfirmation {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let stderr = Term::stderr();
        if io::stdin().is_terminal() && stderr.is_term() {
            let theme = ColorfulTheme::default();
            return Confirm::with_theme(&theme)
                .with_prompt(prompt)
                .default(false)
                .interact_on(&stderr)
                .map_err(|e| Error::Prompt {
                    message: e.to_string(),
                });
        }

        eprint!("{} [y/n] ", prompt);
        io::stderr().flush()?;
        read_answer(io::stdin().lock())
    }
}

/// Reads one line and interprets it as a yes/no answer.
pub fn read_answer<R: BufRead>(mut input: R) -> Result<bool> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_answer_yes() {
        assert!(read_answer(Cursor::new("y\n")).unwrap());
        assert!(read_answer(Cursor::new("yes\n")).unwrap());
        assert!(read_answer(Cursor::new("  Y  \n")).unwrap());
    }

    #[test]
    fn test_read_answer_no() {
        assert!(!read_answer(Cursor::new("n\n")).unwrap());
        assert!(!read_answer(Cursor::new("yep\n")).unwrap());
        assert!(!read_answer(Cursor::new("\n")).unwrap());
    }

    #[test]
    fn test_read_answer_eof_declines() {
        assert!(!read_answer(Cursor::new("")).unwrap());
    }
}
