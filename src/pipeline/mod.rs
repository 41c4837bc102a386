//! Shared plumbing for command handlers: output targets and exit codes.

mod output;

pub use output::{OutputTarget, STDOUT_PATH, should_use_color, write_output};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Every input is valid, or the fixed SBOM was written
    pub const SUCCESS: i32 = 0;
    /// An input is missing, malformed, unsupported or empty, or output failed
    pub const FAILURE: i32 = 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::FAILURE, 1);
    }
}
