//! Invocation environment for the AWS command-line tools.
//!
//! When `AWS_PAGER` is set, the AWS CLI pipes its output through an
//! interactive pager, which stalls non-interactive runs and corrupts
//! captured output. Every child process therefore receives a copy of the
//! ambient environment with that variable removed. The process's own
//! environment is never mutated.

use std::ffi::OsString;

/// Pager-selection variable honoured by the AWS CLI.
pub const AWS_PAGER: &str = "AWS_PAGER";

/// Remove the pager variable from an arbitrary variable set.
///
/// Pure so it can be exercised without touching the process environment.
/// When the pager variable is absent the input passes through unchanged.
pub fn scrub_pager<I>(vars: I) -> Vec<(OsString, OsString)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter(|(key, _)| key.as_os_str() != AWS_PAGER)
        .collect()
}

/// The ambient process environment minus the pager variable.
pub fn scrubbed_env() -> Vec<(OsString, OsString)> {
    scrub_pager(std::env::vars_os())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(key: &str, value: &str) -> (OsString, OsString) {
        (OsString::from(key), OsString::from(value))
    }

    #[test]
    fn test_scrub_removes_pager_variable() {
        let vars = vec![
            var("PATH", "/usr/bin"),
            var(AWS_PAGER, "less"),
            var("HOME", "/home/deployer"),
        ];

        let scrubbed = scrub_pager(vars);

        assert_eq!(scrubbed.len(), 2);
        assert!(scrubbed.iter().all(|(key, _)| key.as_os_str() != AWS_PAGER));
        assert!(scrubbed.iter().any(|(key, _)| key == "PATH"));
        assert!(scrubbed.iter().any(|(key, _)| key == "HOME"));
    }

    #[test]
    fn test_scrub_is_identity_when_pager_absent() {
        let vars = vec![var("PATH", "/usr/bin"), var("HOME", "/home/deployer")];

        let scrubbed = scrub_pager(vars.clone());

        assert_eq!(scrubbed, vars);
    }

    #[test]
    fn test_scrub_preserves_variable_values_verbatim() {
        let vars = vec![var("AWS_PROFILE", "prod deploy"), var(AWS_PAGER, "")];

        let scrubbed = scrub_pager(vars);

        assert_eq!(scrubbed, vec![var("AWS_PROFILE", "prod deploy")]);
    }
}
