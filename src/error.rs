use thiserror::Error;

/// Errors produced by the git subprocess layer.
#[derive(Debug, Error)]
pub enum GitError {
    /// A subprocess exited nonzero.
    #[error("{tool} failed{}: {stderr}", status.map(|c| format!(" (exit {c})")).unwrap_or_default())]
    ProcessFailure {
        tool: String,
        status: Option<i32>,
        stderr: String,
    },

    /// A history line did not contain the `||` record delimiter.
    #[error("malformed history line (missing '||'): {line:?}")]
    MalformedOutput { line: String },

    /// A subprocess could not be started at all.
    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GitError {
    /// Build a `ProcessFailure` from a finished subprocess's output.
    pub fn from_output(tool: &str, output: &std::process::Output) -> Self {
        GitError::ProcessFailure {
            tool: tool.to_string(),
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}
