use thiserror::Error;

/// Failures a message handler could not turn into a response.
///
/// Backend failures never surface here; handlers answer those with a
/// placeholder message instead.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("prompt construction failed: {0}")]
    Prompt(String),

    #[error("handler panicked: {0}")]
    Panicked(String),
}
