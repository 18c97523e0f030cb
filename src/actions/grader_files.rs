//! Matches the files embedded in the grader information of fileresponse
//! questions against the references in its text. Only reports.

use position_preserving_moodle_question_xml_edit::{QParser, Question};
use fileresponse::xml::{embedded_files, graderinfo_section, plugin_file_references, QTYPE};
use crate::action::Action;

pub struct GraderInfoFileChecker {
	total_files: usize,
	unreferenced_files: usize,
	missing_files: usize
}

impl GraderInfoFileChecker {
	/// Simple initialisation logic.
	pub fn new() -> GraderInfoFileChecker {
		GraderInfoFileChecker {
			total_files: 0,
			unreferenced_files: 0,
			missing_files: 0
		}
	}
}

/// Splits references and files into (missing references, unreferenced files).
fn unmatched(refs: &[(String, String)], files: &[String]) -> (Vec<String>, Vec<String>) {
	let missing: Vec<String> = refs.iter()
		.filter(|(raw, decoded)| !files.iter().any(|f| f == raw || f == decoded))
		.map(|(raw, _)| raw.clone())
		.collect();
	let unreferenced: Vec<String> = files.iter()
		.filter(|f| !refs.iter().any(|(raw, decoded)| *f == raw || *f == decoded))
		.cloned()
		.collect();
	(missing, unreferenced)
}

impl Action for GraderInfoFileChecker {
	fn process(&mut self, question: &Question, _parser: &mut QParser, _flags: &[String]) -> (bool, Vec<String>) {
		let mut notes: Vec<String> = Vec::new();
		let section: &str = match graderinfo_section(question.whole_element.content.as_str()) {
			Some(section) => section,
			None => return (false, notes)
		};

		let refs = plugin_file_references(section);
		let files = embedded_files(section);
		self.total_files += files.len();

		let (missing, unreferenced) = unmatched(&refs, &files);
		for raw in &missing {
			notes.push(format!(" WARNING! Grader information references '{raw}', which is not present."));
		}
		for name in &unreferenced {
			notes.push(format!(" Grader information carries '{name}', which is never referenced."));
		}
		self.missing_files += missing.len();
		self.unreferenced_files += unreferenced.len();

		(false, notes)
	}

	fn name(&self) -> String {
		"Grader information file checker".to_string()
	}

	fn flag(&self) -> String {
		"graderfiles".to_string()
	}

	fn description(&self) -> String {
		"Grader information of fileresponse questions can embed files, e.g. rubrics.
This lists references in the grader information text that have no matching
file and files that nothing refers to. Nothing is changed.".to_string()
	}

	fn supports(&self, qtype: &str) -> bool {
		qtype == QTYPE
	}

	fn report(&self) -> Option<String> {
		if self.total_files == 0 && self.missing_files == 0 {
			return None;
		}
		Some(format!("Saw {} grader information files, {} of them unreferenced.
{} references pointed to files that were not present.",
			self.total_files, self.unreferenced_files, self.missing_files))
	}
}
