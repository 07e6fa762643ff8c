use crate::error::GitError;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Character the colorizer uses for its horizontal-rule separator between
/// the file header block and the first hunk.
pub const RULE_MARKER: char = '─';

/// Lines dropped *after* the rule line itself when trimming the colorizer's
/// preamble. The colorizer prints the rule, then three header lines (file
/// name banner and column captions) before the first content line.
pub const RULE_SKIP_LINES: usize = 3;

/// Default colorizing formatter the diff output is piped through.
const COLORIZER: &str = "git-split-diffs";
const COLORIZER_ARGS: &[&str] = &["--color"];

/// A stateless provider of colorized diff text for one commit + path.
///
/// The browser owns caching and error policy; implementations just run the
/// request and report success or failure.
pub trait DiffSource {
    fn load_diff(&self, commit_id: &str, path: &str) -> Result<String, GitError>;
}

/// Production source: `git show <id> -- <path>` piped into the colorizer,
/// stdout-to-stdin, no shell anywhere.
pub struct GitDiffSource {
    colorizer: String,
    colorizer_args: Vec<String>,
    dir: Option<PathBuf>,
}

impl GitDiffSource {
    pub fn new() -> Self {
        Self {
            colorizer: COLORIZER.to_string(),
            colorizer_args: COLORIZER_ARGS.iter().map(|s| s.to_string()).collect(),
            dir: None,
        }
    }

    /// Override the colorizer stage and run git in an explicit directory.
    /// Used by tests; the binary always uses the defaults.
    #[allow(dead_code)]
    pub fn with_colorizer(colorizer: &str, args: &[&str], dir: Option<PathBuf>) -> Self {
        Self {
            colorizer: colorizer.to_string(),
            colorizer_args: args.iter().map(|s| s.to_string()).collect(),
            dir,
        }
    }
}

impl Default for GitDiffSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffSource for GitDiffSource {
    fn load_diff(&self, commit_id: &str, path: &str) -> Result<String, GitError> {
        let mut show = Command::new("git");
        show.args(["show", commit_id, "--"])
            .arg(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.dir {
            show.current_dir(dir);
        }
        let mut show_child = show.spawn().map_err(|e| GitError::Spawn {
            tool: "git show".to_string(),
            source: e,
        })?;

        let Some(show_stdout) = show_child.stdout.take() else {
            return Err(GitError::ProcessFailure {
                tool: "git show".to_string(),
                status: None,
                stderr: "stdout was not captured".to_string(),
            });
        };

        let mut color = Command::new(&self.colorizer);
        color
            .args(&self.colorizer_args)
            .stdin(Stdio::from(show_stdout))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.dir {
            color.current_dir(dir);
        }
        let color_child = match color.spawn() {
            Ok(child) => child,
            Err(e) => {
                // Reap the producer before reporting the missing colorizer
                let _ = show_child.kill();
                let _ = show_child.wait();
                return Err(GitError::Spawn {
                    tool: self.colorizer.clone(),
                    source: e,
                });
            }
        };

        let color_out = color_child.wait_with_output()?;

        let mut show_stderr = String::new();
        if let Some(mut err) = show_child.stderr.take() {
            let _ = err.read_to_string(&mut show_stderr);
        }
        let show_status = show_child.wait()?;

        // The producer's failure is the root cause; report it first
        if !show_status.success() {
            return Err(GitError::ProcessFailure {
                tool: "git show".to_string(),
                status: show_status.code(),
                stderr: show_stderr.trim().to_string(),
            });
        }
        if !color_out.status.success() {
            return Err(GitError::from_output(&self.colorizer, &color_out));
        }

        let text = String::from_utf8_lossy(&color_out.stdout);
        Ok(trim_preamble(&text, RULE_SKIP_LINES))
    }
}

/// Drop everything up to and including the first line containing
/// [`RULE_MARKER`], then `skip_after_rule` further lines. Output without a
/// rule line is returned untrimmed rather than erroring.
pub fn trim_preamble(raw: &str, skip_after_rule: usize) -> String {
    let lines: Vec<&str> = raw.lines().collect();
    let Some(rule_idx) = lines.iter().position(|l| l.contains(RULE_MARKER)) else {
        return raw.to_string();
    };
    let start = rule_idx + 1 + skip_after_rule;
    if start >= lines.len() {
        return String::new();
    }
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_drops_through_rule_plus_skip_lines() {
        let raw = "line1\nline2\n────\nextra\nreal diff content";
        assert_eq!(trim_preamble(raw, 1), "real diff content");
    }

    #[test]
    fn trim_with_production_constant() {
        let raw = "noise\n────\nbanner\ncaption a\ncaption b\nfirst hunk line\nsecond";
        assert_eq!(
            trim_preamble(raw, RULE_SKIP_LINES),
            "first hunk line\nsecond"
        );
    }

    #[test]
    fn trim_without_rule_returns_untrimmed() {
        let raw = "plain diff\nno rule anywhere";
        assert_eq!(trim_preamble(raw, RULE_SKIP_LINES), raw);
    }

    #[test]
    fn trim_rule_at_end_yields_empty() {
        assert_eq!(trim_preamble("header\n────", 3), "");
    }

    // ── Pipeline against a real repository ──
    //
    // `cat` stands in for the colorizer: it keeps the two-process pipe
    // wiring honest without requiring git-split-diffs on the test host.

    fn git(dir: &std::path::Path, args: &[&str]) {
        let status = std::process::Command::new("git")
            .args(args)
            .current_dir(dir)
            .status()
            .expect("failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }

    fn repo_with_one_commit(dir: &std::path::Path) -> String {
        git(dir, &["init", "-q"]);
        git(dir, &["config", "user.name", "Test User"]);
        git(dir, &["config", "user.email", "test@example.com"]);
        std::fs::write(dir.join("file.txt"), "hello pipeline\n").unwrap();
        git(dir, &["add", "file.txt"]);
        git(dir, &["commit", "-q", "-m", "Initial"]);
        let out = std::process::Command::new("git")
            .args(["rev-parse", "--short", "HEAD"])
            .current_dir(dir)
            .output()
            .unwrap();
        String::from_utf8_lossy(&out.stdout).trim().to_string()
    }

    #[test]
    fn pipeline_produces_diff_text() {
        let tmp = tempfile::tempdir().unwrap();
        let id = repo_with_one_commit(tmp.path());

        let source = GitDiffSource::with_colorizer("cat", &[], Some(tmp.path().to_path_buf()));
        let diff = source.load_diff(&id, "file.txt").unwrap();
        // `cat` emits no rule line, so the output comes through untrimmed
        assert!(diff.contains("hello pipeline"), "got: {diff}");
    }

    #[test]
    fn bad_commit_id_is_process_failure() {
        let tmp = tempfile::tempdir().unwrap();
        repo_with_one_commit(tmp.path());

        let source = GitDiffSource::with_colorizer("cat", &[], Some(tmp.path().to_path_buf()));
        let err = source.load_diff("doesnotexist", "file.txt").unwrap_err();
        assert!(matches!(err, GitError::ProcessFailure { ref tool, .. } if tool == "git show"));
    }

    #[test]
    fn missing_colorizer_is_spawn_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let id = repo_with_one_commit(tmp.path());

        let source = GitDiffSource::with_colorizer(
            "definitely-not-a-real-colorizer",
            &[],
            Some(tmp.path().to_path_buf()),
        );
        let err = source.load_diff(&id, "file.txt").unwrap_err();
        assert!(matches!(err, GitError::Spawn { .. }));
    }
}
