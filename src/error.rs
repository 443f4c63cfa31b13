// One error type for the whole app.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed.
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed.
    #[error("window update error: {0}")]
    WindowUpdate(String),

    /// A required setting is missing or malformed.
    #[error("config error: {0}")]
    Config(String),

    /// Encoding the canvas snapshot failed.
    #[error("snapshot encode error: {0}")]
    Encode(String),

    /// The HTTP client could not be built or the request never completed.
    #[error("analysis request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("analysis endpoint returned status {status}")]
    Response { status: u16, body: String },

    /// The endpoint answered but the body was not the expected shape.
    #[error("analysis response decode failed: {0}")]
    Decode(String),

    /// Loading the typesetting tables failed.
    #[error("typesetter load failed: {0}")]
    Typeset(String),

    /// A background thread could not be spawned or died before answering.
    #[error("worker error: {0}")]
    Worker(String),
}
