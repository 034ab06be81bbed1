/// Asks the user to approve a destructive or far-reaching operation.
///
/// Operations that need approval take a `Confirm` instead of prompting
/// themselves, so that they can be driven by a dialog, a separate HTTP
/// request or a test.
pub trait Confirm {
    /// Show `prompt` to the user and return whether they agreed.
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
