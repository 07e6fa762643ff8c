use crate::error::GitError;
use std::path::Path;
use std::process::Command;

/// Two-character token separating `<id> <subject>` from `<author>, <date>`.
/// Chosen by the log format below; does not occur in normal commit subjects.
const RECORD_DELIM: &str = "||";

/// Log format producing one record per line: `%h %s||%cn, %ah`.
const LOG_FORMAT: &str = "--pretty=format:%h %s||%cn, %ah";

/// One revision entry touching the browsed file.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitSummary {
    /// Short revision id (non-empty).
    pub id: String,
    /// One-line commit message (may be empty).
    pub subject: String,
    pub author: String,
    /// Relative date string, kept opaque.
    pub date: String,
}

impl CommitSummary {
    /// First list line: `<id> <subject>`.
    pub fn title(&self) -> String {
        format!("{} {}", self.id, self.subject)
    }

    /// Second list line: `<author>, <date>`.
    pub fn byline(&self) -> String {
        format!("{}, {}", self.author, self.date)
    }
}

/// Load the commit history for `path` from the repository containing the
/// current working directory.
pub fn load_history(path: &str) -> Result<Vec<CommitSummary>, GitError> {
    load_history_in(None, path)
}

/// Same as [`load_history`] but running `git` in an explicit directory.
pub fn load_history_in(dir: Option<&Path>, path: &str) -> Result<Vec<CommitSummary>, GitError> {
    let mut cmd = Command::new("git");
    cmd.args(["log", LOG_FORMAT, "--"]).arg(path);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let output = cmd.output().map_err(|e| GitError::Spawn {
        tool: "git log".to_string(),
        source: e,
    })?;

    if !output.status.success() {
        return Err(GitError::from_output("git log", &output));
    }

    parse_history(&String::from_utf8_lossy(&output.stdout))
}

/// Parse raw `git log` output into commit summaries, preserving order.
///
/// A nonempty line without the `||` delimiter is a hard error — we never
/// build a half-populated record from it.
pub fn parse_history(raw: &str) -> Result<Vec<CommitSummary>, GitError> {
    let mut commits = Vec::new();
    for line in raw.lines() {
        if line.is_empty() {
            continue;
        }
        let (head, tail) = line.split_once(RECORD_DELIM).ok_or_else(|| {
            GitError::MalformedOutput {
                line: line.to_string(),
            }
        })?;

        // `%h %s` — subject may be empty, so the space is optional
        let (id, subject) = match head.split_once(' ') {
            Some((id, subject)) => (id, subject),
            None => (head, ""),
        };

        // `%cn, %ah` — split on the first ", "; author names keep any
        // later commas
        let (author, date) = match tail.split_once(", ") {
            Some((author, date)) => (author, date),
            None => (tail, ""),
        };

        commits.push(CommitSummary {
            id: id.to_string(),
            subject: subject.to_string(),
            author: author.to_string(),
            date: date.to_string(),
        });
    }
    Ok(commits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn parse_well_formed_lines_verbatim() {
        let raw = "abc123 Fix bug||Alice, 2 days ago\ndef456 Initial||Bob, 1 week ago";
        let commits = parse_history(raw).unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].id, "abc123");
        assert_eq!(commits[0].subject, "Fix bug");
        assert_eq!(commits[0].author, "Alice");
        assert_eq!(commits[0].date, "2 days ago");
        assert_eq!(commits[1].id, "def456");
        assert_eq!(commits[1].subject, "Initial");
        assert_eq!(commits[1].author, "Bob");
        assert_eq!(commits[1].date, "1 week ago");
    }

    #[test]
    fn parse_preserves_source_order() {
        let raw = "c3 third||A, now\nc2 second||A, now\nc1 first||A, now";
        let commits = parse_history(raw).unwrap();
        let ids: Vec<&str> = commits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c3", "c2", "c1"]);
    }

    #[test]
    fn parse_empty_output_is_empty_not_error() {
        assert!(parse_history("").unwrap().is_empty());
        assert!(parse_history("\n").unwrap().is_empty());
    }

    #[test]
    fn parse_line_without_delimiter_is_malformed() {
        let err = parse_history("abc123 no delimiter here").unwrap_err();
        assert!(matches!(
            err,
            crate::error::GitError::MalformedOutput { ref line } if line == "abc123 no delimiter here"
        ));
    }

    #[test]
    fn parse_empty_subject() {
        let commits = parse_history("abc123 ||Alice, 2 days ago").unwrap();
        assert_eq!(commits[0].id, "abc123");
        assert_eq!(commits[0].subject, "");
    }

    #[test]
    fn parse_author_with_comma_splits_on_first() {
        let commits = parse_history("abc123 msg||Smith, Jane, 2 days ago").unwrap();
        assert_eq!(commits[0].author, "Smith");
        assert_eq!(commits[0].date, "Jane, 2 days ago");
    }

    #[test]
    fn titles_match_raw_fields() {
        let commits =
            parse_history("abc123 Fix bug||Alice, 2 days ago\ndef456 Initial||Bob, 1 week ago")
                .unwrap();
        assert_eq!(commits[0].title(), "abc123 Fix bug");
        assert_eq!(commits[1].title(), "def456 Initial");
        assert_eq!(commits[0].byline(), "Alice, 2 days ago");
    }

    // ── Against a real repository ──

    fn git(dir: &std::path::Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .status()
            .expect("failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }

    fn init_repo_with_two_commits(dir: &std::path::Path) {
        git(dir, &["init", "-q"]);
        git(dir, &["config", "user.name", "Test User"]);
        git(dir, &["config", "user.email", "test@example.com"]);
        std::fs::write(dir.join("file.txt"), "one\n").unwrap();
        git(dir, &["add", "file.txt"]);
        git(dir, &["commit", "-q", "-m", "Initial"]);
        std::fs::write(dir.join("file.txt"), "one\ntwo\n").unwrap();
        git(dir, &["add", "file.txt"]);
        git(dir, &["commit", "-q", "-m", "Fix bug"]);
    }

    #[test]
    fn load_history_from_real_repo() {
        let tmp = tempfile::tempdir().unwrap();
        init_repo_with_two_commits(tmp.path());

        let commits = load_history_in(Some(tmp.path()), "file.txt").unwrap();
        assert_eq!(commits.len(), 2);
        // Newest first
        assert_eq!(commits[0].subject, "Fix bug");
        assert_eq!(commits[1].subject, "Initial");
        assert_eq!(commits[0].author, "Test User");
        assert!(!commits[0].id.is_empty());
    }

    #[test]
    fn load_history_untracked_file_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        init_repo_with_two_commits(tmp.path());

        let commits = load_history_in(Some(tmp.path()), "never-committed.txt").unwrap();
        assert!(commits.is_empty());
    }

    #[test]
    fn load_history_outside_repo_is_process_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_history_in(Some(tmp.path()), "file.txt").unwrap_err();
        assert!(matches!(
            err,
            crate::error::GitError::ProcessFailure { .. }
        ));
    }
}
