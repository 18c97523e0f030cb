//! General definition for a check the CLI-tool can run on questions.
use position_preserving_moodle_question_xml_edit::{QParser, Question};

pub trait Action {
	/// Looks into a given question, returns some notes as well as a boolean
	/// telling if something was changed or would be changed with "write".
	fn process(&mut self, question: &Question, parser: &mut QParser, flags: &[String]) -> (bool, Vec<String>);

	/// Gives a name for this action.
	/// e.g. "Fileresponse option auditor"
	fn name(&self) -> String;

	/// Gives a flag to be used when selecting this action to be in action.
	fn flag(&self) -> String;

	/// Longer description of the action.
	fn description(&self) -> String;

	/// Check if this action supports a given question type.
	fn supports(&self, qtype: &str) -> bool;

	/// End report summarising what was or would have been done.
	fn report(&self) -> Option<String>;
}

/// Value of a `--key=value` flag.
pub fn flag_value<'a>(flags: &'a [String], key: &str) -> Option<&'a str> {
	flags.iter().find_map(|f| f.strip_prefix(key).and_then(|rest| rest.strip_prefix('=')))
}
