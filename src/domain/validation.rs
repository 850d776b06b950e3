use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidNumber { input: String },
    MessageTooLong { max: usize, actual: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { input } => write!(f, "invalid phone number: {input:?}"),
            Self::MessageTooLong { max, actual } => {
                write!(f, "message is too long: {actual} characters (max {max})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
