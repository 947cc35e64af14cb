//! Process output plumbing and build-publish result extraction.

use jfkit_core::TaskLogPort;
use serde::Deserialize;
use std::io::Write;
use thiserror::Error;

// ============================================================================
// Writers
// ============================================================================

/// Forwards process output to the task log.
pub struct TaskLogWriter<'a> {
    log: &'a dyn TaskLogPort,
}

impl<'a> TaskLogWriter<'a> {
    pub fn new(log: &'a dyn TaskLogPort) -> Self {
        Self { log }
    }
}

impl Write for TaskLogWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.log.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Shows output on the task log while keeping a copy for inspection.
pub struct TeeWriter<'a> {
    log: TaskLogWriter<'a>,
    captured: Vec<u8>,
}

impl<'a> TeeWriter<'a> {
    pub fn new(log: &'a dyn TaskLogPort) -> Self {
        Self {
            log: TaskLogWriter::new(log),
            captured: Vec::new(),
        }
    }

    pub fn captured(&self) -> &[u8] {
        &self.captured
    }

    /// Captured output, lossily decoded.
    pub fn into_string(self) -> String {
        String::from_utf8_lossy(&self.captured).into_owned()
    }
}

impl Write for TeeWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.log.write_all(buf)?;
        self.captured.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.log.flush()
    }
}

// ============================================================================
// Build-publish output
// ============================================================================

/// Why a build-publish output did not yield a URL.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("No JSON object found in the command output")]
    NoJsonObject,

    #[error("Failed to parse build-publish output: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct BuildPublishOutput {
    #[serde(rename = "buildInfoUiUrl")]
    build_info_ui_url: Option<String>,
}

/// `rt bp` and `rt build-publish`.
pub fn is_build_publish(args: &[String]) -> bool {
    matches!(
        args,
        [first, second, ..] if first == "rt" && (second == "bp" || second == "build-publish")
    )
}

/// Build info UI URL printed by a build-publish command.
///
/// A well-formed object without a URL, or with a blank one, yields `Ok(None)`.
pub fn parse_build_info_url(output: &str) -> Result<Option<String>, OutputError> {
    let json = first_json_object(output).ok_or(OutputError::NoJsonObject)?;
    let parsed: BuildPublishOutput = serde_json::from_str(json)?;
    Ok(parsed
        .build_info_ui_url
        .filter(|url| !url.trim().is_empty()))
}

/// Like [`parse_build_info_url`], discarding the reason.
pub fn extract_build_info_url(output: &str) -> Option<String> {
    parse_build_info_url(output).ok().flatten()
}

/// First top-level `{ ... }` in `text`, honouring braces inside JSON strings.
fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}
