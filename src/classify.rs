//! Media type classification via external MIME tools.
//!
//! Two strategies are available: a content sniffer (`file`) and the desktop
//! filetype registry (`xdg-mime`). Extensions known to confuse the registry go
//! straight to the sniffer; everything else asks the registry first and falls
//! back to the sniffer once when the registry answer is unusable.

mod mime;
mod runner;

pub use mime::{MediaType, MimeType};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};

use thiserror::Error;
use tracing::{debug, trace};

use crate::config::ClassifierSettings;
use crate::path;

#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The classifier tool could not be started at all.
    #[error("failed to run {args:?}: {source}")]
    Spawn {
        args: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    /// The classifier tool ran but exited unsuccessfully.
    #[error("{stderr}command {args:?} returned non-zero exit status {}", exit_status(.status))]
    ProcessFailure {
        stderr: String,
        args: Vec<String>,
        status: Option<i32>,
    },

    /// Every strategy ran but none produced a `type/subtype` answer.
    #[error("{args:?} returns: {output}")]
    ClassificationFailure { output: String, args: Vec<String> },
}

fn exit_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "(terminated by signal)".to_string(),
    }
}

/// Anything that can tell whether a file is audio, video or neither.
pub trait Classify {
    fn classify(&self, path: &str) -> Result<MediaType, ClassifyError>;
}

impl<T: Classify + ?Sized> Classify for &T {
    fn classify(&self, path: &str) -> Result<MediaType, ClassifyError> {
        (**self).classify(path)
    }
}

pub struct Classifier<R> {
    runner: R,
    settings: ClassifierSettings,
}

impl<R: CommandRunner> Classifier<R> {
    pub fn new(runner: R, settings: ClassifierSettings) -> Self {
        Self { runner, settings }
    }

    /// Whether `path` skips the registry and goes straight to the sniffer.
    pub fn uses_fast_path(&self, path: &str) -> bool {
        path::extension(path)
            .map(|ext| self.settings.fast_path_extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }

    /// Resolve the MIME type of `path`.
    pub fn mime_type(&self, path: &str) -> Result<MimeType, ClassifyError> {
        let sniff_args = with_path(&self.settings.sniff_command, path);
        if self.uses_fast_path(path) {
            return self.query(sniff_args);
        }

        let registry_args = with_path(&self.settings.registry_command, path);
        match self.query(registry_args) {
            Err(ClassifyError::ClassificationFailure { output, args }) => {
                debug!(?args, %output, "registry answer unusable, sniffing content");
                self.query(sniff_args)
            }
            other => other,
        }
    }

    fn query(&self, args: Vec<String>) -> Result<MimeType, ClassifyError> {
        let output = match self.runner.run(&args) {
            Ok(o) => o,
            Err(source) => return Err(ClassifyError::Spawn { args, source }),
        };

        if !output.success() {
            return Err(ClassifyError::ProcessFailure {
                stderr: output.stderr,
                args,
                status: output.status,
            });
        }

        let answer = output.stdout.trim_end();
        match MimeType::parse(answer) {
            Some(mime) => {
                trace!(?args, %mime, "classified");
                Ok(mime)
            }
            None => Err(ClassifyError::ClassificationFailure {
                output: answer.to_string(),
                args,
            }),
        }
    }
}

impl<R: CommandRunner> Classify for Classifier<R> {
    fn classify(&self, path: &str) -> Result<MediaType, ClassifyError> {
        self.mime_type(path).map(|m| m.media_type())
    }
}

fn with_path(command: &[String], path: &str) -> Vec<String> {
    let mut args = command.to_vec();
    args.push(path.to_string());
    args
}

#[cfg(test)]
mod tests;
