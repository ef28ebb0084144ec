//! Subprocess execution for external tools.
//!
//! Every invocation takes an explicit working directory through the caller's
//! [`Command`]; nothing here touches the process-wide current directory.

use crate::bundler::error::{Error, Result};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;

/// Renders a command line for logs and error messages.
pub fn describe(command: &Command) -> String {
    let std_command = command.as_std();
    std::iter::once(std_command.get_program())
        .chain(std_command.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs a command to completion and returns its stdout.
///
/// Fails if the process cannot be started or exits unsuccessfully; the
/// captured stderr is carried in the error.
pub async fn capture(mut command: Command) -> Result<String> {
    let description = describe(&command);
    log::debug!("Running {}", description);

    let output = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|error| Error::CommandFailed {
            command: description.clone(),
            error,
        })?;

    if !output.status.success() {
        return Err(Error::ToolFailed {
            command: description,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Runs a command, optionally feeding `stdin`, and forwards its output.
///
/// Stdout lines go to the debug log. Stderr lines are diagnostics and are
/// forwarded as warnings prefixed with `label` as they arrive. All three
/// streams are driven concurrently so a chatty tool cannot block on a full pipe.
pub async fn run_streaming(mut command: Command, stdin: Option<String>, label: &str) -> Result<()> {
    let description = describe(&command);
    log::debug!("Running {}", description);

    let mut child = command
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|error| Error::CommandFailed {
            command: description.clone(),
            error,
        })?;

    let stdin_pipe = child.stdin.take();
    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();

    let (write_result, _, stderr_lines) = tokio::join!(
        async {
            if let (Some(mut pipe), Some(input)) = (stdin_pipe, stdin.as_deref()) {
                pipe.write_all(input.as_bytes()).await?;
                pipe.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        },
        async {
            if let Some(stdout) = stdout_pipe {
                let mut lines = BufReader::new(stdout).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    log::debug!("[{}] {}", label, line);
                }
            }
        },
        async {
            let mut captured = Vec::new();
            if let Some(stderr) = stderr_pipe {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    log::warn!("[{}] {}", label, line);
                    captured.push(line);
                }
            }
            captured
        }
    );

    let status = child.wait().await.map_err(|error| Error::CommandFailed {
        command: description.clone(),
        error,
    })?;

    if !status.success() {
        return Err(Error::ToolFailed {
            command: description,
            status,
            stderr: stderr_lines.join("\n"),
        });
    }

    // The tool exited cleanly, so a broken stdin pipe only means it stopped reading early
    if let Err(e) = write_result {
        log::warn!("[{}] could not write file list to stdin: {}", label, e);
    }

    Ok(())
}
