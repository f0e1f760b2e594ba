/// Error types.  The game rules never fail; only the terminal and the
/// command-line configuration can.

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Terminal or log-file I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected command-line settings
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
