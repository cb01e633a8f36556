use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooManyRecipients { max: usize, actual: usize },
    InvalidPhoneNumber { input: String },
    InvalidSendDate { input: String },
    PageSizeOutOfRange { min: u32, max: u32, actual: u32 },
    CurrentPageOutOfRange { min: u32, actual: u32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooManyRecipients { max, actual } => {
                write!(f, "too many recipients: {actual} (max {max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidSendDate { input } => {
                write!(f, "invalid send date: {input} (expected YYYYMMDD)")
            }
            Self::PageSizeOutOfRange { min, max, actual } => {
                write!(f, "page size out of range: {actual} (expected {min}..={max})")
            }
            Self::CurrentPageOutOfRange { min, actual } => {
                write!(f, "current page out of range: {actual} (expected >= {min})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty {
            field: "PhoneNumbers",
        };
        assert_eq!(err.to_string(), "PhoneNumbers must not be empty");

        let err = ValidationError::TooManyRecipients { max: 2, actual: 3 };
        assert_eq!(err.to_string(), "too many recipients: 3 (max 2)");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::InvalidSendDate {
            input: "2024-01-01".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "invalid send date: 2024-01-01 (expected YYYYMMDD)"
        );

        let err = ValidationError::PageSizeOutOfRange {
            min: 1,
            max: 50,
            actual: 51,
        };
        assert_eq!(
            err.to_string(),
            "page size out of range: 51 (expected 1..=50)"
        );

        let err = ValidationError::CurrentPageOutOfRange { min: 1, actual: 0 };
        assert_eq!(
            err.to_string(),
            "current page out of range: 0 (expected >= 1)"
        );
    }
}
