//! Checks the stored options of fileresponse questions.
//! If executed with "write"-flag will repair the ones that can be repaired.

use position_preserving_moodle_question_xml_edit::{Change, ContentRef, ContentType, QParser, Question};
use fileresponse::xml::{has_element, import_options, QTYPE};
use fileresponse::{ExpectedAttachments, FileResponseOptions, QuestionConfig};
use crate::action::Action;
use log::debug;

pub struct FileResponseAuditor {
	questions: usize,
	valid: usize,
	unreadable: usize,
	repairable: usize,
	repaired: usize,
	unrepairable: usize,
	templates: usize
}

impl FileResponseAuditor {
	/// Simple initialisation logic.
	pub fn new() -> FileResponseAuditor {
		FileResponseAuditor {
			questions: 0,
			valid: 0,
			unreadable: 0,
			repairable: 0,
			repaired: 0,
			unrepairable: 0,
			templates: 0
		}
	}

	/// Sets an existing element to a new value, or tells what would be done.
	/// Values that came from import defaults have no element to change and
	/// are only reported. Returns true when something was or could be changed.
	fn repair(&mut self, question: &Question, parser: &mut QParser, write: bool,
			element: &str, value: &str, what: &str, notes: &mut Vec<String>) -> bool {
		if !has_element(question.whole_element.content.as_str(), element) {
			self.unrepairable += 1;
			notes.push(format!(" WARNING! No <{element}> element, cannot {what}."));
			return false;
		}
		if !write {
			self.repairable += 1;
			notes.push(format!(" Could {what}."));
			return true;
		}
		if replace_element(question, parser, element, value) {
			self.repaired += 1;
			notes.push(format!(" Did {what}."));
			true
		} else {
			self.unrepairable += 1;
			notes.push(format!(" WARNING! Failed to locate <{element}>, cannot {what}."));
			false
		}
	}
}

/// One line summary of a working configuration.
fn describe(config: &QuestionConfig) -> String {
	let files = match config.expected_attachments {
		ExpectedAttachments::Exact(n) => format!("exactly {n} file(s)"),
		ExpectedAttachments::Unlimited => "at least one file".to_string()
	};
	let text = if config.response_text_enabled() {
		format!("{} line text box", config.response_field_lines)
	} else {
		"no text box".to_string()
	};
	format!(" Expects {files}, {text}, download {}, picker plugins {}.",
		if config.allow_download {"enabled"} else {"disabled"},
		if config.allow_picker_plugins {"enabled"} else {"disabled"})
}

/// Registers a change replacing the first element of that name in the question.
fn replace_element(question: &Question, parser: &mut QParser, name: &str, value: &str) -> bool {
	let target: Option<ContentRef> = parser.get_elements(question.index, vec![name.to_string()])
		.into_iter()
		.find_map(|element| match element {
			ContentType::Element(_name, whole_element_ref, _attributes_and_content) => Some(whole_element_ref),
			_ => None
		});
	match target {
		Some(cref) => {
			parser.register_change(Change::new(cref, format!("<{name}>{value}</{name}>")));
			true
		},
		None => {
			debug!("No '{name}' element in question {}.", question.index);
			false
		}
	}
}

impl Action for FileResponseAuditor {
	fn process(&mut self, question: &Question, parser: &mut QParser, flags: &[String]) -> (bool, Vec<String>) {
		let write = flags.iter().any(|f| f == "write");
		let mut notes: Vec<String> = Vec::new();
		let mut things_to_do: bool = false;
		self.questions += 1;

		let options: FileResponseOptions = match import_options(question.whole_element.content.as_str()) {
			Ok(Some(options)) => options,
			Ok(None) => {
				return (false, notes);
			},
			Err(e) => {
				self.unreadable += 1;
				notes.push(format!(" WARNING! Could not read the options: {e}"));
				return (false, notes);
			}
		};

		match QuestionConfig::from_options(&options) {
			Ok(config) => {
				self.valid += 1;
				notes.push(describe(&config));
			},
			Err(e) => {
				notes.push(format!(" WARNING! {e}"));
			}
		}

		// Zero files was possible in old versions, the question type needs at least one.
		if options.attachments == 0 {
			things_to_do |= self.repair(question, parser, write, "attachments", "1",
				"set the number of expected files from 0 to 1", &mut notes);
		} else if options.attachments > 3 {
			notes.push(format!(" NOTE! Expects {} files, authors can only choose 1, 2, 3 or unlimited.", options.attachments));
		}

		if options.responseformat != FileResponseOptions::PLAIN_FORMAT {
			let what = format!("change response format '{}' to 'plain'", options.responseformat);
			things_to_do |= self.repair(question, parser, write, "responseformat",
				FileResponseOptions::PLAIN_FORMAT, &what, &mut notes);
		}

		if !options.responsetemplate.is_empty() {
			self.templates += 1;
			notes.push(" NOTE! Has a response template, fileresponse questions never show one.".to_string());
		}

		(things_to_do, notes)
	}

	fn name(&self) -> String {
		"Fileresponse option auditor".to_string()
	}

	fn flag(&self) -> String {
		"audit".to_string()
	}

	fn description(&self) -> String {
		"Reads the options of fileresponse questions and describes what the question
expects from students. Flags options the question type cannot work with.

Questions expecting zero files (possible in older versions) and questions with
a response format other than plain text can be repaired with --write. Response
templates are only reported, they are dropped whenever the question is saved.".to_string()
	}

	fn supports(&self, qtype: &str) -> bool {
		qtype == QTYPE
	}

	fn report(&self) -> Option<String> {
		if self.questions == 0 {
			return None;
		}
		let mut result: String = format!("Saw {} fileresponse questions of which {} have working options.",
			self.questions, self.valid);
		if self.unreadable > 0 {
			result.push_str(&format!("\n{} questions had options that could not be read at all.", self.unreadable));
		}
		if self.repairable > 0 {
			result.push_str(&format!("\n{} option values could be repaired.", self.repairable));
		}
		if self.repaired > 0 {
			result.push_str(&format!("\n{} option values were repaired.", self.repaired));
		}
		if self.unrepairable > 0 {
			result.push_str(&format!("\n{} option values need fixing in Moodle itself.", self.unrepairable));
		}
		if self.templates > 0 {
			result.push_str(&format!("\n{} questions carry an unused response template.", self.templates));
		}
		Some(result)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	const QUIZ: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<quiz>
  <question type="fileresponse">
    <name><text>Old essay upload</text></name>
    <questiontext format="html"><text>Upload your essay.</text></questiontext>
    <responseformat>editor</responseformat>
    <responsefieldlines>10</responsefieldlines>
    <attachments>0</attachments>
    <forcedownload>0</forcedownload>
    <allowpickerplugins>0</allowpickerplugins>
  </question>
  <question type="fileresponse">
    <name><text>Very old upload</text></name>
    <questiontext format="html"><text>Upload something.</text></questiontext>
    <responsetemplate>Dear grader</responsetemplate>
  </question>
  <question type="fileresponse">
    <name><text>Broken upload</text></name>
    <questiontext format="html"><text>Upload.</text></questiontext>
    <attachments>many</attachments>
  </question>
</quiz>
"#;

	fn load_quiz() -> (TempDir, String, QParser) {
		let dir = tempfile::tempdir().expect("Temporary directory");
		let path = dir.path().join("question.xml").to_string_lossy().to_string();
		std::fs::write(&path, QUIZ).expect("Writing the quiz");
		let parser = QParser::load_xml_file(path.clone()).expect("Loading the quiz");
		(dir, path, parser)
	}

	#[test]
	fn test_process_without_write_only_tells() {
		let (_dir, _path, mut parser) = load_quiz();
		let questions = parser.find_questions();
		let flags: Vec<String> = vec!["audit".to_string()];
		let mut auditor = FileResponseAuditor::new();

		let (changes, notes) = auditor.process(&questions[0], &mut parser, &flags);
		assert!(changes);
		assert!(notes.contains(&" Could set the number of expected files from 0 to 1.".to_string()));
		assert!(notes.contains(&" Could change response format 'editor' to 'plain'.".to_string()));
		assert_eq!(auditor.repairable, 2);

		// Zero files comes from the import default, there is no element to fix.
		let (changes, notes) = auditor.process(&questions[1], &mut parser, &flags);
		assert!(!changes);
		assert!(notes.contains(
			&" WARNING! No <attachments> element, cannot set the number of expected files from 0 to 1.".to_string()));
		assert!(notes.iter().any(|n| n.contains("response template")));
		assert_eq!(auditor.repairable, 2);
		assert_eq!(auditor.unrepairable, 1);
		assert_eq!(auditor.templates, 1);

		let (changes, notes) = auditor.process(&questions[2], &mut parser, &flags);
		assert!(!changes);
		assert!(notes[0].starts_with(" WARNING! Could not read the options:"));
		assert_eq!(auditor.unreadable, 1);
		assert_eq!(auditor.questions, 3);
		assert_eq!(auditor.valid, 0);

		let report = auditor.report().unwrap();
		assert!(report.contains("2 option values could be repaired."));
		assert!(report.contains("1 option values need fixing in Moodle itself."));
		assert!(!report.contains("were repaired"));
	}

	#[test]
	fn test_process_with_write_changes_the_file() {
		let (_dir, path, mut parser) = load_quiz();
		let flags: Vec<String> = vec!["audit".to_string(), "write".to_string()];
		let mut auditor = FileResponseAuditor::new();

		let questions = parser.find_questions();
		let (changes, notes) = auditor.process(&questions[0], &mut parser, &flags);
		assert!(changes);
		assert!(notes.contains(&" Did set the number of expected files from 0 to 1.".to_string()));
		assert!(notes.contains(&" Did change response format 'editor' to 'plain'.".to_string()));

		let questions = parser.find_questions();
		let (changes, _notes) = auditor.process(&questions[1], &mut parser, &flags);
		assert!(!changes);
		assert_eq!(auditor.repaired, 2);
		assert_eq!(auditor.repairable, 0);
		assert_eq!(auditor.unrepairable, 1);

		parser.save_to_file(path.clone()).expect("Saving the quiz");
		let saved = std::fs::read_to_string(&path).expect("Reading the quiz");
		assert!(saved.contains("<attachments>1</attachments>"));
		assert!(saved.contains("<responseformat>plain</responseformat>"));
		assert!(!saved.contains("<attachments>0</attachments>"));
		// Nothing got inserted into the question without the element.
		assert_eq!(saved.matches("<attachments>").count(), 2);
		assert!(saved.contains("<responsefieldlines>10</responsefieldlines>"));
	}

	#[test]
	fn test_describe() {
		let config = QuestionConfig::new(ExpectedAttachments::exactly(2).unwrap());
		assert_eq!(describe(&config),
			" Expects exactly 2 file(s), 15 line text box, download enabled, picker plugins disabled.");

		let config = QuestionConfig {
			response_field_lines: 0,
			allow_download: false,
			..QuestionConfig::new(ExpectedAttachments::Unlimited)
		};
		assert_eq!(describe(&config),
			" Expects at least one file, no text box, download disabled, picker plugins disabled.");
	}

	#[test]
	fn test_report_only_after_questions() {
		let auditor = FileResponseAuditor::new();
		assert_eq!(auditor.report(), None);
		assert!(auditor.supports("fileresponse"));
		assert!(!auditor.supports("essay"));
	}
}
