//! The stored option record of a fileresponse question and the choices
//! offered to question authors when editing one.

use crate::messages::Catalog;
use crate::model::ExpectedAttachments;
use serde::{Deserialize, Serialize};

/// Options as persisted per question. Field names follow the stored
/// columns and the question.xml elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResponseOptions {
	pub responseformat: String,
	pub responsefieldlines: i64,
	/// 1, 2, 3 or -1 for unlimited.
	pub attachments: i64,
	/// 0 download enabled, 1 disabled.
	pub forcedownload: i64,
	pub allowpickerplugins: i64,
	pub graderinfo: String,
	pub graderinfoformat: i64,
	pub responsetemplate: String,
}

impl FileResponseOptions {
	pub const PLAIN_FORMAT: &'static str = "plain";
	pub const DEFAULT_FIELD_LINES: u32 = 15;
	/// FORMAT_HTML
	pub const HTML_TEXT_FORMAT: i64 = 1;

	/// Applies the rules enforced when options are saved: the response
	/// is always plain text and a template is never shown.
	pub fn normalised(self) -> FileResponseOptions {
		FileResponseOptions {
			responseformat: Self::PLAIN_FORMAT.to_string(),
			responsetemplate: String::new(),
			..self
		}
	}
}

impl Default for FileResponseOptions {
	fn default() -> FileResponseOptions {
		FileResponseOptions {
			responseformat: Self::PLAIN_FORMAT.to_string(),
			responsefieldlines: i64::from(Self::DEFAULT_FIELD_LINES),
			attachments: 1,
			forcedownload: 0,
			allowpickerplugins: 0,
			graderinfo: String::new(),
			graderinfoformat: Self::HTML_TEXT_FORMAT,
			responsetemplate: String::new(),
		}
	}
}

/// Input box heights, 0 to 40 lines in steps of five.
pub fn response_sizes(catalog: &Catalog) -> Vec<(u32, String)> {
	(0..=40)
		.step_by(5)
		.map(|lines: u32| {
			let label = if lines == 0 {
				catalog.get_string("noinputbox", None)
			} else {
				catalog.get_string("nlines", Some(lines.to_string().as_str()))
			};
			(lines, label)
		})
		.collect()
}

/// Numbers of expected files. Zero is never offered.
pub fn attachment_options(catalog: &Catalog) -> Vec<(ExpectedAttachments, String)> {
	let mut choices: Vec<(ExpectedAttachments, String)> = (1..=3)
		.filter_map(|n: u32| ExpectedAttachments::exactly(n).map(|e| (e, n.to_string())))
		.collect();
	choices.push((ExpectedAttachments::Unlimited, catalog.get_string("unlimited", None)));
	choices
}

pub fn forcedownload_options(catalog: &Catalog) -> Vec<(i64, String)> {
	vec![
		(0, catalog.get_string("withdownload", None)),
		(1, catalog.get_string("withoutdownload", None)),
	]
}

pub fn allowpickerplugins_options(catalog: &Catalog) -> Vec<(i64, String)> {
	vec![
		(0, catalog.get_string("allowpickerpluginsno", None)),
		(1, catalog.get_string("allowpickerpluginsyes", None)),
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::messages::Language;

	#[test]
	fn test_normalised_forces_plain_and_drops_template() {
		let options = FileResponseOptions {
			responseformat: "editor".to_string(),
			responsetemplate: "Dear grader".to_string(),
			attachments: 3,
			..FileResponseOptions::default()
		}
		.normalised();
		assert_eq!(options.responseformat, "plain");
		assert_eq!(options.responsetemplate, "");
		assert_eq!(options.attachments, 3);
	}

	#[test]
	fn test_response_sizes() {
		let sizes = response_sizes(&Catalog::default());
		assert_eq!(sizes.len(), 9);
		assert_eq!(sizes[0], (0, "no input box".to_string()));
		assert_eq!(sizes[1], (5, "5 lines".to_string()));
		assert_eq!(sizes[8], (40, "40 lines".to_string()));
	}

	#[test]
	fn test_attachment_options_never_offer_zero() {
		let options = attachment_options(&Catalog::new(Language::De));
		let settings: Vec<i64> = options.iter().map(|(e, _)| e.setting()).collect();
		assert_eq!(settings, vec![1, 2, 3, -1]);
		assert_eq!(options[3].1, "Unbegrenzt");
	}

	#[test]
	fn test_download_and_picker_choices() {
		let catalog = Catalog::default();
		assert_eq!(forcedownload_options(&catalog)[1].1, "Rename, Delete (file download disabled)");
		assert_eq!(allowpickerplugins_options(&catalog)[0].0, 0);
	}

	#[test]
	fn test_options_from_json_use_defaults() {
		let options: FileResponseOptions = serde_json::from_str(r#"{"attachments": -1}"#).unwrap();
		assert_eq!(options.attachments, -1);
		assert_eq!(options.responsefieldlines, 15);
		assert_eq!(options.responseformat, "plain");
	}
}
