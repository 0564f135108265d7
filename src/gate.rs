use tracing::{info, warn};

/// Static shared-code check in front of the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorGate {
    passcode: String,
}

impl OperatorGate {
    pub fn new(passcode: impl Into<String>) -> Self {
        Self {
            passcode: passcode.into(),
        }
    }

    /// Plain comparison against the configured code. Surrounding whitespace
    /// in the input is ignored.
    pub fn unlock(&self, input: &str) -> bool {
        let granted = input.trim() == self.passcode;
        if granted {
            info!("admin dashboard unlocked");
        } else {
            warn!("wrong admin passcode entered");
        }
        granted
    }
}

impl Default for OperatorGate {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PASSCODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_code_unlocks() {
        let gate = OperatorGate::default();
        assert!(gate.unlock("0605"));
        assert!(gate.unlock(" 0605\n"));
        assert!(!gate.unlock("0606"));
        assert!(!gate.unlock(""));
    }
}
