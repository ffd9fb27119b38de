use thiserror::Error;

/// Everything an editing operation can refuse. None of these are fatal: the
/// operation that returns one has left data, history and views untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("index {index} out of range for {len} points")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("'{text}' is not a valid number")]
    InvalidNumericInput { text: String, revert: String },
    #[error("input has {got} curve arrays but the group has {expected} curves")]
    ShapeMismatch { expected: usize, got: usize },
    #[error("malformed import: {0}")]
    MalformedImport(String),
    #[error("name '{0}' already exists")]
    DuplicateName(String),
    #[error("at least one group must remain")]
    LastGroup,
    #[error("no group named '{0}'")]
    UnknownGroup(String),
    #[error("no curve named '{0}'")]
    UnknownCurve(String),
    #[error("select a row first")]
    NoRowSelected,
}

impl EditError {
    /// Stable machine-readable code, shared with the host binding.
    pub fn code(&self) -> &'static str {
        match self {
            EditError::IndexOutOfRange { .. } => "index_out_of_range",
            EditError::InvalidNumericInput { .. } => "invalid_number",
            EditError::ShapeMismatch { .. } => "shape_mismatch",
            EditError::MalformedImport(_) => "malformed_import",
            EditError::DuplicateName(_) => "duplicate_name",
            EditError::LastGroup => "last_group",
            EditError::UnknownGroup(_) => "unknown_group",
            EditError::UnknownCurve(_) => "unknown_curve",
            EditError::NoRowSelected => "no_selection",
        }
    }
}

pub type EditResult<T> = Result<T, EditError>;
