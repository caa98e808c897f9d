//! Yes/no gate in front of every state-changing submission.
//!
//! The interactive scripts prompt on the terminal; automation injects
//! [`AutoApprove`] instead of answering prompts.

/// Asks the operator before a state-changing action goes out.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Interactive terminal prompt.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Approves everything. For non-interactive runs.
pub struct AutoApprove;

impl Confirm for AutoApprove {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
