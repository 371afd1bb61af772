use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns `true` when the error signals a clean end of the page,
    /// as opposed to corrupt or inconsistent page contents.
    pub fn is_end_of_data(&self) -> bool {
        matches!(self.kind(), ErrorKind::ExhaustedInput { .. })
    }

    pub fn exhausted_input(consumed: usize, total: usize) -> Error {
        Error(ErrorKind::ExhaustedInput { consumed, total }.into())
    }

    pub fn truncated_value(offset: usize, expected: usize, available: usize) -> Error {
        Error(
            ErrorKind::TruncatedValue {
                offset,
                expected,
                available,
            }
            .into(),
        )
    }

    pub fn index_stream(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::IndexStream {
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_dictionary_index(index: u32, position: usize, cardinality: usize) -> Error {
        Error(
            ErrorKind::InvalidDictionaryIndex {
                index,
                position,
                cardinality,
            }
            .into(),
        )
    }

    pub fn invalid_format(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    pub fn not_implemented(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::NotImplemented {
                message: message.into(),
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("no more data: consumed {consumed} of {total} bytes")]
    ExhaustedInput { consumed: usize, total: usize },

    #[error(
        "not enough data for value at offset {offset}: expected {expected} bytes, {available} available"
    )]
    TruncatedValue {
        offset: usize,
        expected: usize,
        available: usize,
    },

    #[error("index stream error: {message}")]
    IndexStream { message: String },

    #[error(
        "dictionary index {index} at position {position} is out of range (cardinality {cardinality})"
    )]
    InvalidDictionaryIndex {
        index: u32,
        position: usize,
        cardinality: usize,
    },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("not yet implemented: {message}")]
    NotImplemented { message: String },

    #[error("invalid page format for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("invalid decoder configuration: {source}")]
    InvalidConfig { source: serde_json::Error },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        ErrorKind::InvalidConfig { source: e }.into()
    }
}

/// Aborts the current call path on a caller-side programming defect,
/// such as handing a decoder an output sink it does not support.
///
/// This is not a data error: malformed pages are always reported through
/// [`Error`], never through this function.
#[cold]
#[track_caller]
pub fn contract_violation(message: &str) -> ! {
    panic!("contract violation: {message}")
}
