//! Shows the attachment messages students of a fileresponse question
//! will see while uploading.

use position_preserving_moodle_question_xml_edit::{QParser, Question};
use fileresponse::xml::{import_options, QTYPE};
use fileresponse::{attachment_requirement, classify_attachment_status};
use fileresponse::{AttachmentStatus, Catalog, ExpectedAttachments, Language, MessageFormatter, QuestionConfig};
use crate::action::{flag_value, Action};
use log::warn;
use serde::Serialize;

pub struct StatusPreview {
	previewed: usize
}

#[derive(Serialize)]
struct PreviewLine {
	question: usize,
	uploaded: usize,
	status: AttachmentStatus,
	message: Option<String>
}

impl StatusPreview {
	/// Simple initialisation logic.
	pub fn new() -> StatusPreview {
		StatusPreview { previewed: 0 }
	}
}

/// Counts worth showing, one past the expectation to show the overfilled state.
fn preview_counts(expected: ExpectedAttachments) -> std::ops::RangeInclusive<usize> {
	match expected {
		ExpectedAttachments::Exact(n) => 0..=(n.get() as usize + 1),
		ExpectedAttachments::Unlimited => 0..=3
	}
}

fn catalog_for(flags: &[String]) -> Catalog {
	match flag_value(flags, "lang") {
		None => Catalog::default(),
		Some(code) => match code.parse::<Language>() {
			Ok(language) => Catalog::new(language),
			Err(e) => {
				warn!("{e} Using English.");
				Catalog::default()
			}
		}
	}
}

impl Action for StatusPreview {
	fn process(&mut self, question: &Question, _parser: &mut QParser, flags: &[String]) -> (bool, Vec<String>) {
		let mut notes: Vec<String> = Vec::new();
		let json = flags.iter().any(|f| f == "json");
		let catalog = catalog_for(flags);

		let config = match import_options(question.whole_element.content.as_str()) {
			Ok(Some(options)) => match QuestionConfig::from_options(&options) {
				Ok(config) => config,
				Err(e) => {
					notes.push(format!(" Cannot preview: {e}"));
					return (false, notes);
				}
			},
			Ok(None) => return (false, notes),
			Err(e) => {
				notes.push(format!(" Cannot preview: {e}"));
				return (false, notes);
			}
		};
		self.previewed += 1;

		if !json {
			match attachment_requirement(config.expected_attachments) {
				Some(requirement) => notes.push(format!(" {}", catalog.format_requirement(&requirement))),
				None => notes.push(" (no requirement notice)".to_string())
			}
		}

		for uploaded in preview_counts(config.expected_attachments) {
			let status = classify_attachment_status(config.expected_attachments, uploaded as i64);
			let message = catalog.format_status(&status);
			if json {
				let line = PreviewLine { question: question.index + 1, uploaded, status, message };
				match serde_json::to_string(&line) {
					Ok(s) => notes.push(s),
					Err(e) => warn!("Could not serialise preview line: {e}")
				}
			} else {
				notes.push(format!("  {uploaded} uploaded: {}", message.unwrap_or_else(|| "(no message)".to_string())));
			}
		}

		(false, notes)
	}

	fn name(&self) -> String {
		"Attachment status preview".to_string()
	}

	fn flag(&self) -> String {
		"status".to_string()
	}

	fn description(&self) -> String {
		"Prints the \"files required\" notice of each fileresponse question and the
upload status message shown for each number of uploaded files, up to one past
the expected number.

 --lang=en|de|fr message language [default en]
 --json print one JSON object per count instead of text".to_string()
	}

	fn supports(&self, qtype: &str) -> bool {
		qtype == QTYPE
	}

	fn report(&self) -> Option<String> {
		if self.previewed == 0 {
			None
		} else {
			Some(format!("Previewed the attachment messages of {} questions.", self.previewed))
		}
	}
}
