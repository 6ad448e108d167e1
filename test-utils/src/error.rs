use thiserror::Error;

/// Errors that can occur while setting up a test context.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to create the scratch directory or write the env file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
