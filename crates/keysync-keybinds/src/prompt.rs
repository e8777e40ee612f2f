//! User interaction capability
//!
//! Workflows that need a decision from the user (overwrite this file?
//! migrate that one? which backup?) ask through [`Prompter`]. The host
//! decides how: the command line reads stdin, tests script the answers.

/// Questions a workflow may ask the user
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question
    fn confirm(&self, message: &str) -> bool;

    /// Pick one of `options`, returning its index, or `None` to cancel
    fn choose(&self, message: &str, options: &[String]) -> Option<usize>;

    /// Ask for free-form text, `None` to cancel
    fn input(&self, message: &str) -> Option<String>;
}

/// Non-interactive prompter with fixed answers
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoPrompter {
    /// Answer given to every confirmation
    pub assume_yes: bool,
}

impl AutoPrompter {
    pub fn yes() -> Self {
        AutoPrompter { assume_yes: true }
    }

    pub fn no() -> Self {
        AutoPrompter { assume_yes: false }
    }
}

impl Prompter for AutoPrompter {
    fn confirm(&self, _message: &str) -> bool {
        self.assume_yes
    }

    /// Picks the first option when answering yes
    fn choose(&self, _message: &str, options: &[String]) -> Option<usize> {
        (self.assume_yes && !options.is_empty()).then_some(0)
    }

    fn input(&self, _message: &str) -> Option<String> {
        None
    }
}
