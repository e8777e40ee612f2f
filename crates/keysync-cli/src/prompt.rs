// Terminal prompts for workflows that need a decision

use std::io::{self, BufRead, Write};

use keysync_keybinds::Prompter;

use crate::output::OutputStyle;

/// Asks on the terminal; `--yes` answers every confirmation
///
/// When stdin is not a terminal and `--yes` was not given, confirmations
/// are declined and selections cancelled instead of blocking.
pub struct TerminalPrompter {
    assume_yes: bool,
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            interactive: atty::is(atty::Stream::Stdin),
        }
    }

    fn ask(&self, message: &str) -> Option<String> {
        if !self.interactive {
            return None;
        }
        let style = OutputStyle::default();
        eprint!("{}", style.prompt(message));
        io::stderr().flush().ok()?;

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        self.ask(&format!("{} [y/N]", message))
            .map(|answer| is_yes(&answer))
            .unwrap_or(false)
    }

    fn choose(&self, message: &str, options: &[String]) -> Option<usize> {
        if options.is_empty() {
            return None;
        }
        if self.assume_yes {
            return Some(0);
        }

        let style = OutputStyle::default();
        eprintln!("{}", style.header(message));
        for (i, option) in options.iter().enumerate() {
            eprintln!("{}", style.choice(i + 1, option));
        }
        let answer = self.ask(&format!("Select 1-{} (empty to cancel):", options.len()))?;
        parse_choice(&answer, options.len())
    }

    fn input(&self, message: &str) -> Option<String> {
        self.ask(message).filter(|answer| !answer.is_empty())
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}

/// One-based selection to a zero-based index
fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    let n: usize = answer.trim().parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes("YES"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice(" 3 ", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("x", 3), None);
    }

    #[test]
    fn test_assume_yes_answers_without_terminal() {
        let prompter = TerminalPrompter {
            assume_yes: true,
            interactive: false,
        };
        assert!(prompter.confirm("overwrite?"));
        assert_eq!(prompter.choose("pick", &["a".into(), "b".into()]), Some(0));
    }

    #[test]
    fn test_non_interactive_declines() {
        let prompter = TerminalPrompter {
            assume_yes: false,
            interactive: false,
        };
        assert!(!prompter.confirm("overwrite?"));
        assert_eq!(prompter.choose("pick", &["a".into()]), None);
        assert_eq!(prompter.input("name"), None);
    }
}
