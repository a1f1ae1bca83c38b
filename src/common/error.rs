use super::metadata::MAX_CHAR_COUNT;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, thiserror::Error)]
pub enum QRError {
    // Input validity
    #[error("empty input")]
    EmptyData,

    #[error("too many characters: {0} (max {MAX_CHAR_COUNT})")]
    TooManyChars(usize),

    #[error("unsupported character: '{0}'")]
    UnsupportedChar(char),

    // Format validity
    #[error("invalid digit: '{0}'")]
    InvalidDigit(char),

    #[error("digit count {len} is not a multiple of {group}")]
    MisalignedDigits { len: usize, group: usize },

    #[error("wrong length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

pub type QRResult<T> = Result<T, QRError>;
