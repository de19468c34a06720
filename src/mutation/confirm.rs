//! Confirmation prompts for destructive mutations

/// Asks the user to confirm a destructive action
///
/// Any `FnMut(&str) -> bool` is a `Confirm`, so a test or a UI binding can
/// pass a closure.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirms everything (scripts, batch tools)
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Declines everything
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl Confirm for DenyAll {
    fn confirm(&mut self, _prompt: &str) -> bool {
        false
    }
}
