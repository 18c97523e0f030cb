//! The data the evaluation logic works on: the immutable configuration of
//! one question and the answer snapshots compared against each other.

use crate::error::{OptionError, Result};
use crate::options::FileResponseOptions;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// How many files a question expects. Zero is not a valid expectation,
/// a fileresponse question always wants at least one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpectedAttachments {
	Exact(NonZeroU32),
	/// At least one file, no upper bound.
	Unlimited,
}

impl ExpectedAttachments {
	/// The stored value meaning "unlimited".
	pub const UNLIMITED_SETTING: i64 = -1;

	/// `None` for zero.
	pub fn exactly(count: u32) -> Option<ExpectedAttachments> {
		NonZeroU32::new(count).map(ExpectedAttachments::Exact)
	}

	/// Interprets the stored `attachments` option.
	pub fn from_setting(setting: i64) -> Result<ExpectedAttachments> {
		if setting == Self::UNLIMITED_SETTING {
			return Ok(ExpectedAttachments::Unlimited);
		}
		u32::try_from(setting)
			.ok()
			.and_then(ExpectedAttachments::exactly)
			.ok_or(OptionError::InvalidAttachments(setting))
	}

	/// The value to store for this expectation.
	pub fn setting(&self) -> i64 {
		match self {
			ExpectedAttachments::Exact(n) => i64::from(n.get()),
			ExpectedAttachments::Unlimited => Self::UNLIMITED_SETTING,
		}
	}
}

/// Turns a file count coming out of arithmetic on the host side into a
/// valid count. Negative values become zero.
pub fn clamp_count(count: i64) -> usize {
	if count < 0 {
		warn!("Negative attachment count {count} treated as zero.");
		return 0;
	}
	usize::try_from(count).unwrap_or(usize::MAX)
}

/// A snapshot of one submitted answer. Never mutated once built.
///
/// `answer_text` separates three states: `None` (nothing submitted),
/// `Some("")` (explicitly emptied) and any other text, including "0".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseState {
	pub answer_text: Option<String>,
	pub attachment_count: usize,
}

impl ResponseState {
	pub fn new(answer_text: Option<String>, attachment_count: i64) -> ResponseState {
		ResponseState {
			answer_text,
			attachment_count: clamp_count(attachment_count),
		}
	}

	/// A state where no answer text key was submitted at all.
	pub fn without_answer() -> ResponseState {
		ResponseState::default()
	}

	pub fn with_answer(text: impl Into<String>) -> ResponseState {
		ResponseState {
			answer_text: Some(text.into()),
			attachment_count: 0,
		}
	}

	pub fn with_attachments(self, count: i64) -> ResponseState {
		ResponseState {
			attachment_count: clamp_count(count),
			..self
		}
	}
}

/// Configuration of one question instance, built once from the stored
/// options and then only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionConfig {
	/// Height of the text box, zero means no text box at all.
	pub response_field_lines: u32,
	/// Text pre-filled into the answer. Empty means no template.
	pub response_template: String,
	pub expected_attachments: ExpectedAttachments,
	pub allow_download: bool,
	pub allow_picker_plugins: bool,
}

impl QuestionConfig {
	pub fn new(expected_attachments: ExpectedAttachments) -> QuestionConfig {
		QuestionConfig {
			response_field_lines: FileResponseOptions::DEFAULT_FIELD_LINES,
			response_template: String::new(),
			expected_attachments,
			allow_download: true,
			allow_picker_plugins: false,
		}
	}

	pub fn with_template(self, template: impl Into<String>) -> QuestionConfig {
		QuestionConfig {
			response_template: template.into(),
			..self
		}
	}

	pub fn response_text_enabled(&self) -> bool {
		self.response_field_lines > 0
	}

	/// Builds the typed configuration out of the stored option record.
	///
	/// The response is always read as plain text, whatever format older
	/// versions stored. The template is kept as stored, the comparator
	/// falls back to it for answers without text.
	pub fn from_options(options: &FileResponseOptions) -> Result<QuestionConfig> {
		if options.responseformat != FileResponseOptions::PLAIN_FORMAT {
			warn!("Response format '{}' read as 'plain'.", options.responseformat);
		}
		let expected_attachments = ExpectedAttachments::from_setting(options.attachments)?;
		let response_field_lines = u32::try_from(options.responsefieldlines).unwrap_or_else(|_| {
			debug!("Input box size {} replaced with no input box.", options.responsefieldlines);
			0
		});

		Ok(QuestionConfig {
			response_field_lines,
			response_template: options.responsetemplate.clone(),
			expected_attachments,
			allow_download: options.forcedownload == 0,
			allow_picker_plugins: options.allowpickerplugins != 0,
		})
	}
}

impl Default for QuestionConfig {
	fn default() -> QuestionConfig {
		QuestionConfig::new(ExpectedAttachments::Exact(NonZeroU32::MIN))
	}
}
