//! Answer evaluation for the Moodle File Response question type.
//!
//! A fileresponse answer is an optional free text plus a number of
//! uploaded files. This crate decides whether such an answer is complete,
//! whether it changed between two steps, and which progress message the
//! attachment area should show. It also knows the question type's stored
//! options and how they look inside question.xml.
//!
//! ```
//! use fileresponse::{classify_attachment_status, evaluate_completeness};
//! use fileresponse::{AttachmentStatus, ExpectedAttachments, QuestionConfig, ResponseState};
//!
//! let config = QuestionConfig::new(ExpectedAttachments::exactly(3).unwrap());
//! assert!(evaluate_completeness(&ResponseState::with_answer("0"), &config));
//! assert_eq!(
//!     classify_attachment_status(config.expected_attachments, 2),
//!     AttachmentStatus::MOfN { uploaded: 2, expected: 3 }
//! );
//! ```

pub mod comparator;
pub mod error;
pub mod messages;
pub mod model;
pub mod options;
pub mod status;
pub mod xml;

pub use comparator::{effective_text, is_complete, is_same_response};
pub use error::{OptionError, Result, UnknownLanguage};
pub use messages::{Catalog, Language, MessageFormatter};
pub use model::{clamp_count, ExpectedAttachments, QuestionConfig, ResponseState};
pub use options::FileResponseOptions;
pub use status::{
	attachment_requirement, check_attachment_count, classify_attachment_status, count_uploaded_files,
	AttachmentCountIssue, AttachmentRequirement, AttachmentStatus,
};

/// Whether the student has given an answer text. Same as [`is_complete`].
pub fn evaluate_completeness(state: &ResponseState, config: &QuestionConfig) -> bool {
	comparator::is_complete(state, config)
}
