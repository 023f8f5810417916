//! Yes/no confirmation capability.
//!
//! The pipeline never reads stdin directly; it takes a `&dyn Confirm` so
//! non-interactive runs (`--yes`) and tests can substitute fixed answers.

use std::io::{self, BufRead, Write};

pub trait Confirm {
    /// Ask the operator a yes/no question. An empty answer selects
    /// `default_yes`; unrecognized input also falls back to the default.
    fn confirm(&self, prompt: &str, default_yes: bool) -> bool;
}

/// Interactive prompter reading one line from stdin.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str, default_yes: bool) -> bool {
        let hint = if default_yes { "[Y/n]" } else { "[y/N]" };
        print!("{} {} ", prompt, hint);
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return default_yes;
        }
        parse_answer(&line, default_yes)
    }
}

/// Answers yes to everything (`--yes` flag, integration tests).
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str, _default_yes: bool) -> bool {
        true
    }
}

/// Answers no to everything.
#[derive(Debug, Default)]
pub struct AssumeNo;

impl Confirm for AssumeNo {
    fn confirm(&self, _prompt: &str, _default_yes: bool) -> bool {
        false
    }
}

fn parse_answer(line: &str, default_yes: bool) -> bool {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => default_yes,
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default_yes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_answer_takes_default() {
        assert!(parse_answer("\n", true));
        assert!(!parse_answer("\n", false));
    }

    #[test]
    fn explicit_answers_override_default() {
        assert!(parse_answer("y\n", false));
        assert!(parse_answer("YES\n", false));
        assert!(!parse_answer("n\n", true));
        assert!(!parse_answer("No\n", true));
    }

    #[test]
    fn garbage_falls_back_to_default() {
        assert!(!parse_answer("maybe\n", false));
        assert!(parse_answer("maybe\n", true));
    }

    #[test]
    fn fixed_answer_impls() {
        assert!(AssumeYes.confirm("anything?", false));
        assert!(!AssumeNo.confirm("anything?", true));
    }
}
