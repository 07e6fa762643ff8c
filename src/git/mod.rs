mod history;
mod show;

pub use history::{load_history, load_history_in, parse_history, CommitSummary};
pub use show::{trim_preamble, DiffSource, GitDiffSource, RULE_MARKER, RULE_SKIP_LINES};
