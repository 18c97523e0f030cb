//! Errors raised while turning raw stored or imported option values into
//! a typed question configuration. The evaluation functions themselves
//! never fail.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
	#[error("Invalid number of expected attachments: {0} (allowed are -1 for unlimited or a positive count)")]
	InvalidAttachments(i64),
	#[error("Invalid number in element '{element}': '{value}'")]
	InvalidNumber { element: String, value: String },
}

pub type Result<T> = std::result::Result<T, OptionError>;

/// A message language code that has no catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown language '{0}', known are en, de and fr.")]
pub struct UnknownLanguage(pub String);
