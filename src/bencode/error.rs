use thiserror::Error;

#[derive(Debug, Error)]
pub enum BencodeError {
    #[error("Decoder exceeded input length at offset {0}")]
	ExceededLength(usize),

	#[error("Unknown type tag '{0}' at offset {1}")]
	UnknownTag(char, usize),

	#[error("Invalid Integer {0}")]
	InvalidInteger(String),

	#[error("Invalid string length {0}")]
	InvalidLength(String),

	#[error("Declared length {declared} exceeds remaining input ({available} bytes left)")]
	TruncatedString { declared: usize, available: usize },

	#[error("Dictionary key is not a string at offset {0}")]
	KeyNotString(usize),

	#[error("Duplicate key in dictionary: {0}")]
	DuplicateKey(String),

	#[error("Missing value for key: {0}")]
	MissingValue(String),

	#[error("Conversion error: {0}")]
	Conversion(String),
}
