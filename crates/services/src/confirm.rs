/// Question asked before progress is wiped.
pub const RESET_PROMPT: &str =
    "Are you sure you want to reset all progress? This action cannot be undone.";

/// Synchronous yes/no prompt supplied by the host.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Answers "yes" to everything. Useful for `--yes` runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn closures_receive_the_prompt() {
        let seen = RefCell::new(String::new());
        let confirm = |prompt: &str| {
            seen.replace(prompt.to_owned());
            false
        };
        assert!(!confirm.confirm(RESET_PROMPT));
        assert_eq!(seen.borrow().as_str(), RESET_PROMPT);
    }

    #[test]
    fn fixed_answers() {
        assert!(AlwaysConfirm.confirm("?"));
        assert!(!NeverConfirm.confirm("?"));
    }
}
