//! Wrapper around the external Go toolchain.
//!
//! The graph builder does not care where its edge lines come from; this
//! module supplies the default source by running `go mod graph` in the
//! module directory and capturing its stdout.

use std::path::Path;
use std::process::{Command, ExitStatus};

/// Errors from invoking the Go toolchain.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    /// The `go` binary could not be spawned.
    #[error("failed to run `go mod graph`: {0}")]
    Spawn(#[from] std::io::Error),

    /// The command ran but exited unsuccessfully.
    #[error("`go mod graph` failed ({status}): {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

/// Runs `go mod graph` in `dir` and returns its stdout.
pub fn module_graph(dir: &Path) -> Result<String, ToolchainError> {
    let output = Command::new("go")
        .args(["mod", "graph"])
        .current_dir(dir)
        .output()?;

    if !output.status.success() {
        return Err(ToolchainError::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
