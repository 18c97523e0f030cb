//! Attachment status classification.
//!
//! Maps the expected number of files and the number actually uploaded to
//! one of a closed set of categories. Categories carry the numbers a
//! message needs, turning them into text is left to a
//! [`MessageFormatter`](crate::messages::MessageFormatter).

use crate::model::{clamp_count, ExpectedAttachments};
use log::warn;
use serde::Serialize;
use std::fmt;

/// Progress of the attachment area as shown to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum AttachmentStatus {
	/// Unlimited expected and nothing uploaded yet, nothing to say.
	NoStatusMessage,
	ExactlyOneOfUnlimited,
	NOfUnlimited { uploaded: usize },
	ZeroOfOne,
	OneOfOne,
	/// More files than expected. Should be prevented upstream, but still
	/// has to render.
	OverfilledExact { uploaded: usize },
	ZeroOfN { expected: u32 },
	OneOfN { expected: u32 },
	MOfN { uploaded: usize, expected: u32 },
}

/// Classifies an attachment area. Negative counts are read as zero.
pub fn classify_attachment_status(expected: ExpectedAttachments, actual: i64) -> AttachmentStatus {
	let uploaded = clamp_count(actual);
	match expected {
		ExpectedAttachments::Unlimited => match uploaded {
			0 => AttachmentStatus::NoStatusMessage,
			1 => AttachmentStatus::ExactlyOneOfUnlimited,
			_ => AttachmentStatus::NOfUnlimited { uploaded },
		},
		ExpectedAttachments::Exact(n) if n.get() == 1 => match uploaded {
			0 => AttachmentStatus::ZeroOfOne,
			1 => AttachmentStatus::OneOfOne,
			_ => overfilled(uploaded, 1),
		},
		ExpectedAttachments::Exact(n) => {
			let expected = n.get();
			match uploaded {
				0 => AttachmentStatus::ZeroOfN { expected },
				1 => AttachmentStatus::OneOfN { expected },
				_ if uploaded > expected as usize => overfilled(uploaded, expected),
				_ => AttachmentStatus::MOfN { uploaded, expected },
			}
		}
	}
}

fn overfilled(uploaded: usize, expected: u32) -> AttachmentStatus {
	warn!("Attachment area holds {uploaded} files while {expected} were expected.");
	AttachmentStatus::OverfilledExact { uploaded }
}

/// The "files required" notice shown before the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "requirement", rename_all = "snake_case")]
pub enum AttachmentRequirement {
	OneRequired,
	NRequired { expected: u32 },
}

/// `None` for unlimited, where no explanation is needed.
pub fn attachment_requirement(expected: ExpectedAttachments) -> Option<AttachmentRequirement> {
	match expected {
		ExpectedAttachments::Unlimited => None,
		ExpectedAttachments::Exact(n) if n.get() == 1 => Some(AttachmentRequirement::OneRequired),
		ExpectedAttachments::Exact(n) => Some(AttachmentRequirement::NRequired { expected: n.get() }),
	}
}

/// Counts the files of an attachment area, leaving out `skip` which names
/// a file generated on the host side (e.g. a zip of the area).
pub fn count_uploaded_files<'a, I>(file_names: I, skip: Option<&str>) -> usize
where
	I: IntoIterator<Item = &'a str>,
{
	file_names
		.into_iter()
		.filter(|name| Some(*name) != skip)
		.count()
}

/// Outcome of the "does this count exceed that count" validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum AttachmentCountIssue {
	TooFew { uploaded: usize, required: usize },
	TooMany { uploaded: usize, allowed: usize },
}

impl fmt::Display for AttachmentCountIssue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AttachmentCountIssue::TooFew { uploaded, required } => {
				write!(f, "{uploaded} files uploaded, at least {required} required")
			}
			AttachmentCountIssue::TooMany { uploaded, allowed } => {
				write!(f, "{uploaded} files uploaded, at most {allowed} allowed")
			}
		}
	}
}

/// Validates an upload count. Unlimited only asks for one file, an exact
/// expectation asks for precisely that many.
pub fn check_attachment_count(expected: ExpectedAttachments, actual: i64) -> Option<AttachmentCountIssue> {
	let uploaded = clamp_count(actual);
	let (required, allowed) = match expected {
		ExpectedAttachments::Unlimited => (1, usize::MAX),
		ExpectedAttachments::Exact(n) => (n.get() as usize, n.get() as usize),
	};
	if uploaded < required {
		Some(AttachmentCountIssue::TooFew { uploaded, required })
	} else if uploaded > allowed {
		Some(AttachmentCountIssue::TooMany { uploaded, allowed })
	} else {
		None
	}
}
