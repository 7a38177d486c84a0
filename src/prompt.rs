//! Terminal implementation of the controller's blocking prompts.

use agenda_core::controller::Prompter;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

pub struct TerminalPrompter {
    /// Answer yes to every confirmation without asking
    assume_yes: bool,
}

impl TerminalPrompter {
    pub fn new(assume_yes: bool) -> Self {
        TerminalPrompter { assume_yes }
    }
}

impl Prompter for TerminalPrompter {
    fn alert(&mut self, message: &str) {
        eprintln!("  {}", message.red());
    }

    /// A prompt that cannot be shown (no terminal) counts as "no".
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        Confirm::new()
            .with_prompt(format!("  {}", message))
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                tracing::debug!("Confirmation prompt failed: {}", e);
                false
            })
    }
}
