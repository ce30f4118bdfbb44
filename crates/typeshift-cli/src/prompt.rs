//! Confirmation prompts.

use crate::error::CliError;
use dialoguer::Confirm;

/// Asks the operator a yes/no question.
pub trait Prompt {
    /// Ask `question`; `true` means go ahead.
    fn confirm(&self, question: &str) -> Result<bool, CliError>;
}

/// Asks on the terminal.
pub struct InteractivePrompt;

impl Prompt for InteractivePrompt {
    fn confirm(&self, question: &str) -> Result<bool, CliError> {
        Ok(Confirm::new()
            .with_prompt(question)
            .default(true)
            .interact()?)
    }
}

/// Answers every question with a fixed answer.
pub struct FixedAnswer(pub bool);

impl Prompt for FixedAnswer {
    fn confirm(&self, _question: &str) -> Result<bool, CliError> {
        Ok(self.0)
    }
}

/// Pick the prompt for a command: `--yes` skips the questions.
pub fn for_flags(yes: bool) -> Box<dyn Prompt> {
    if yes {
        Box::new(FixedAnswer(true))
    } else {
        Box::new(InteractivePrompt)
    }
}
