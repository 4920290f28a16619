use thiserror::Error;

/// Failures of a single emission. They never reach the caller: the logger
/// writes their `Display` form to the sink as a diagnostic line instead.
#[derive(Debug, Error)]
pub enum LogError {
    /// The record could not be encoded.
    #[error("failed to marshal message {source} original message {template}")]
    Serialize {
        source: serde_json::Error,
        template: String,
    },

    /// The sink rejected the write.
    #[error("failed to write to out: {0}")]
    Write(#[from] std::io::Error),
}

impl LogError {
    /// Diagnostic line written in place of the record.
    pub fn diagnostic(&self) -> String {
        format!("{self}\n")
    }
}
