//! Error types for starlist-tui
//!
//! Wraps library errors and terminal I/O errors. Fetch failures never reach
//! this type; they are folded into screen state by the loader.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuiError {
    /// Configuration or logging setup failed
    #[error("Starlist error: {0}")]
    Starlist(#[from] libstarlist::StarlistError),

    /// Drawing or reading the terminal failed
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The async runtime backing the loaders could not start
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl TuiError {
    pub fn exit_code(&self) -> i32 {
        match self {
            TuiError::Starlist(e) => e.exit_code(),
            TuiError::Terminal(_) | TuiError::Runtime(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, TuiError>;
