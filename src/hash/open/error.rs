/// Errors returned by fallible table operations.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[error("key not found")]
    KeyNotFound,
}
