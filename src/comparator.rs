//! Decides whether a response counts as given and whether two responses
//! are the same, for "has the answer changed" checks.
//!
//! Completeness is a presence check, never a truthiness check: an answer
//! of exactly "0" is a complete answer and differs from an empty one.

use crate::model::{QuestionConfig, ResponseState};

/// True when some non-empty answer text has been submitted.
pub fn is_complete(state: &ResponseState, _config: &QuestionConfig) -> bool {
	matches!(state.answer_text.as_deref(), Some(text) if !text.is_empty())
}

/// The text a response stands for. A response without any answer text
/// stands for the question's template, an explicitly empty one stays empty.
pub fn effective_text<'a>(state: &'a ResponseState, config: &'a QuestionConfig) -> &'a str {
	match &state.answer_text {
		Some(text) => text.as_str(),
		None => config.response_template.as_str(),
	}
}

/// Exact string equality of the effective texts.
pub fn is_same_response(previous: &ResponseState, current: &ResponseState, config: &QuestionConfig) -> bool {
	effective_text(previous, config) == effective_text(current, config)
}
