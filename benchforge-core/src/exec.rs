// SPDX-License-Identifier: Apache-2.0

//! Subprocess execution for archive entry points.
//!
//! A [`CommandSpec`] captures everything needed to run a main class against
//! a classpath: launcher executable, classpath entries, main class, and a
//! positional argument sequence. Execution blocks until the child exits and
//! returns its exit code; stdio is inherited from the parent.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use crate::types::EntryPoint;

/// Split a free-form argument string into non-blank tokens.
///
/// Runs of whitespace collapse to a single delimiter, so no empty token is
/// ever passed to the child process.
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_owned).collect()
}

/// A fully specified child-process invocation.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    launcher: String,
    classpath: Vec<PathBuf>,
    main_class: EntryPoint,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(
        launcher: impl Into<String>,
        classpath: Vec<PathBuf>,
        main_class: EntryPoint,
    ) -> Self {
        Self {
            launcher: launcher.into(),
            classpath,
            main_class,
            args: Vec::new(),
        }
    }

    pub fn args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// `:`-joined classpath argument.
    fn classpath_arg(&self) -> OsString {
        let mut joined = OsString::new();
        for (index, path) in self.classpath.iter().enumerate() {
            if index > 0 {
                joined.push(":");
            }
            joined.push(path.as_os_str());
        }
        joined
    }

    /// Spawn the child and block until it terminates.
    ///
    /// Returns the child's exit code as-is. Spawn failures surface as the
    /// raw `io::Error`; callers wrap it in their task-specific error type.
    /// A signal-terminated child has no exit code and is reported as 1.
    pub fn status(&self) -> Result<i32, std::io::Error> {
        tracing::debug!(
            launcher = %self.launcher,
            main_class = %self.main_class,
            args = ?self.args,
            "Spawning child process"
        );

        let status = Command::new(&self.launcher)
            .arg("-cp")
            .arg(self.classpath_arg())
            .arg(self.main_class.as_str())
            .args(&self.args)
            .status()?;

        match status.code() {
            Some(code) => Ok(code),
            None => {
                tracing::warn!(
                    launcher = %self.launcher,
                    "Child process terminated by signal"
                );
                Ok(1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    fn entry_point() -> EntryPoint {
        EntryPoint::parse("org.openjdk.jmh.Main").unwrap()
    }

    /// Write an executable shell script usable as a fake launcher.
    fn fake_launcher(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("launcher.sh");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "#!/bin/sh").unwrap();
        writeln!(file, "{}", body).unwrap();
        drop(file);
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn test_tokenize_whitespace_only_is_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("\t \n ").is_empty());
    }

    #[test]
    fn test_tokenize_collapses_whitespace_runs() {
        assert_eq!(
            tokenize("  -wi 3   -i  5 "),
            vec!["-wi", "3", "-i", "5"]
        );
        assert!(tokenize("-wi  3").iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn test_tokenize_report_format_args() {
        assert_eq!(
            tokenize("-rf json -rff out.json"),
            vec!["-rf", "json", "-rff", "out.json"]
        );
    }

    #[test]
    fn test_status_propagates_exit_code() {
        let temp = TempDir::new().unwrap();
        let launcher = fake_launcher(temp.path(), "exit 7");
        let spec = CommandSpec::new(
            launcher.display().to_string(),
            vec![PathBuf::from("archive.tar")],
            entry_point(),
        );
        assert_eq!(spec.status().unwrap(), 7);
    }

    #[test]
    fn test_child_receives_positional_tokens() {
        let temp = TempDir::new().unwrap();
        let log = temp.path().join("argv.log");
        // Skip the "-cp <classpath> <main-class>" prelude, log benchmark args.
        let launcher = fake_launcher(
            temp.path(),
            &format!("shift 3\nprintf '%s\\n' \"$@\" > {}", log.display()),
        );
        let spec = CommandSpec::new(
            launcher.display().to_string(),
            vec![PathBuf::from("archive.tar")],
            entry_point(),
        )
        .args(tokenize("-rf json -rff out.json"));

        assert_eq!(spec.status().unwrap(), 0);
        let logged = std::fs::read_to_string(&log).unwrap();
        let tokens: Vec<&str> = logged.lines().collect();
        assert_eq!(tokens, vec!["-rf", "json", "-rff", "out.json"]);
    }

    #[test]
    fn test_spawn_failure_is_io_error() {
        let spec = CommandSpec::new(
            "/nonexistent/launcher",
            vec![PathBuf::from("archive.tar")],
            entry_point(),
        );
        assert!(spec.status().is_err());
    }
}
