pub mod document;
pub mod error;

pub use document::{
    ChatRole, ChatTurn, GeneratedDocument, ManualProjectFacts, RepositoryDescription, require,
};
pub use error::{
    ErrorCategory, ErrorKind, LlmError, ReadmeError, Result, ValidationError, ValidationErrorKind,
};
