//! External command invocation with captured output.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::harness::error::HarnessError;

/// Captured outcome of one external invocation.
///
/// A nonzero `exit_code` is ordinary data, not an error; the caller decides
/// whether it constitutes a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code of the child; `-1` if it was terminated by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    /// True if the child exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Launch `program` with `cwd` as working directory, wait for it to exit,
/// and capture both streams decoded as text (lossy UTF-8).
///
/// Blocks until the child terminates; no timeout is applied, since the
/// expected workloads are long-running build tools. Fails only if the
/// process cannot be started at all.
pub fn run_command<P, S>(program: P, args: &[S], cwd: &Path) -> Result<CommandResult, HarnessError>
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    debug!(
        program = %program.as_ref().to_string_lossy(),
        cwd = %cwd.display(),
        "running command"
    );
    let output = Command::new(program.as_ref())
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|source| HarnessError::Launch {
            program: program.as_ref().to_string_lossy().into_owned(),
            source,
        })?;
    Ok(CommandResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn captures_stdout_and_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_command("sh", &["-c", "printf '123\\n'"], dir.path()).unwrap();
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "123\n");
        assert_eq!(result.stderr, "");
        assert!(result.success());
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_command("sh", &["-c", "echo oops >&2; exit 3"], dir.path()).unwrap();
        assert_eq!(result.exit_code, 3);
        assert_eq!(result.stderr, "oops\n");
        assert!(!result.success());
    }

    #[test]
    fn missing_executable_is_launch_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_command("tempproj-no-such-binary", &[] as &[&str], dir.path()).unwrap_err();
        assert!(matches!(err, HarnessError::Launch { .. }));
    }
}
