//! Reading and writing the fileresponse specific part of a question in
//! Moodle question.xml.
//!
//! Works on the raw text of one `<question>` element, the same text the
//! question.xml parser hands out for a question.

use crate::error::{OptionError, Result};
use crate::options::FileResponseOptions;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::collections::HashMap;
use urlencoding::decode as url_decode;

pub const QTYPE: &str = "fileresponse";

/// Elements whose content gets read.
const ELEMENTS: &[&str] = &[
	"responseformat",
	"responsefieldlines",
	"attachments",
	"forcedownload",
	"allowpickerplugins",
	"graderinfoformat",
	"responsetemplate",
	"text",
];

lazy_static! {
	static ref QUESTION_TYPE: Regex = Regex::new(r#"<question\s+type\s*=\s*["']([^"']*)["']"#).unwrap();
	static ref GRADERINFO: Regex = Regex::new(r"(?s)<graderinfo(\s[^>]*)?>(.*?)</graderinfo>").unwrap();
	static ref FORMAT_ATTRIBUTE: Regex = Regex::new(r#"format\s*=\s*["']([^"']*)["']"#).unwrap();
	static ref PLUGIN_FILE: Regex = Regex::new(r#"["']@@PLUGINFILE@@([^"']*)["']"#).unwrap();
	static ref FILE_ELEMENT: Regex = Regex::new(r"<file(\s[^>]*)>").unwrap();
	static ref PATH_ATTRIBUTE: Regex = Regex::new(r#"\bpath\s*=\s*"([^"]*)""#).unwrap();
	static ref NAME_ATTRIBUTE: Regex = Regex::new(r#"\bname\s*=\s*"([^"]*)""#).unwrap();
	static ref ELEMENT_PATTERNS: HashMap<&'static str, Regex> = ELEMENTS
		.iter()
		.map(|name| (*name, Regex::new(&format!(r"(?s)<{name}(?:\s[^>]*)?>(.*?)</{name}>")).unwrap()))
		.collect();
}

/// The `type` attribute of the first `<question>` element in the text.
pub fn question_type(question_xml: &str) -> Option<String> {
	QUESTION_TYPE
		.captures(question_xml)
		.map(|caps| caps[1].to_string())
}

/// Decodes the handful of entities question.xml writers produce.
pub fn basic_entity_decode(text: &str) -> String {
	text.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&quot;", "\"")
		.replace("&#34;", "\"")
		.replace("&apos;", "'")
		.replace("&#39;", "'")
		.replace("&amp;", "&")
}

/// Text content of a node, CDATA unwrapped or entities decoded.
pub fn unwrap_text(raw: &str) -> String {
	let trimmed = raw.trim();
	match trimmed.strip_prefix("<![CDATA[").and_then(|t| t.strip_suffix("]]>")) {
		Some(inner) => inner.to_string(),
		None => basic_entity_decode(trimmed),
	}
}

/// Inner content of the first element called `name`.
fn element_content<'a>(xml: &'a str, name: &str) -> Option<&'a str> {
	let re = match ELEMENT_PATTERNS.get(name) {
		Some(re) => re,
		None => {
			debug!("No pattern for element '{name}'.");
			return None;
		}
	};
	re.captures(xml).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// Whether the question has an element of that name with content.
pub fn has_element(question_xml: &str, name: &str) -> bool {
	element_content(question_xml, name).is_some()
}

/// Content of an element that may hold its value directly or inside a
/// `<text>` child.
fn element_text(xml: &str, name: &str) -> Option<String> {
	let content = element_content(xml, name)?;
	match element_content(content, "text") {
		Some(inner) => Some(unwrap_text(inner)),
		None => Some(unwrap_text(content)),
	}
}

fn number(xml: &str, name: &str, default: i64) -> Result<i64> {
	match element_text(xml, name) {
		None => Ok(default),
		Some(value) => value.trim().parse::<i64>().map_err(|_| OptionError::InvalidNumber {
			element: name.to_string(),
			value,
		}),
	}
}

/// Text formats appear either as numbers or by name.
fn text_format(value: &str) -> Result<i64> {
	match value.trim() {
		"moodle_auto_format" => Ok(0),
		"html" => Ok(1),
		"plain_text" => Ok(2),
		"markdown" => Ok(4),
		other => other.parse::<i64>().map_err(|_| OptionError::InvalidNumber {
			element: "graderinfo".to_string(),
			value: other.to_string(),
		}),
	}
}

/// Reads the options of a fileresponse question. `Ok(None)` when the
/// question is of some other type. Missing elements take the values an
/// import has always defaulted to.
pub fn import_options(question_xml: &str) -> Result<Option<FileResponseOptions>> {
	if question_type(question_xml).as_deref() != Some(QTYPE) {
		return Ok(None);
	}

	let mut options = FileResponseOptions {
		responseformat: element_text(question_xml, "responseformat")
			.unwrap_or_else(|| FileResponseOptions::PLAIN_FORMAT.to_string()),
		responsefieldlines: number(question_xml, "responsefieldlines", 1)?,
		attachments: number(question_xml, "attachments", 0)?,
		forcedownload: number(question_xml, "forcedownload", 0)?,
		allowpickerplugins: number(question_xml, "allowpickerplugins", 0)?,
		graderinfo: String::new(),
		graderinfoformat: number(question_xml, "graderinfoformat", FileResponseOptions::HTML_TEXT_FORMAT)?,
		responsetemplate: element_text(question_xml, "responsetemplate").unwrap_or_default(),
	};

	if let Some(caps) = GRADERINFO.captures(question_xml) {
		let attributes = caps.get(1).map(|m| m.as_str()).unwrap_or("");
		let body = caps.get(2).map(|m| m.as_str()).unwrap_or("");
		options.graderinfo = element_content(body, "text").map(unwrap_text).unwrap_or_default();
		if let Some(format) = FORMAT_ATTRIBUTE.captures(attributes) {
			options.graderinfoformat = text_format(&format[1])?;
		}
	}

	debug!("Imported fileresponse options {:?}", options);
	Ok(Some(options))
}

/// Text element in the form question.xml writers use, CDATA only when needed.
fn write_text(text: &str) -> String {
	if text.contains(['<', '>', '&']) {
		format!("<text><![CDATA[{text}]]></text>")
	} else {
		format!("<text>{text}</text>")
	}
}

/// The fileresponse elements of a question, in export order. Grader
/// information files are written by whoever owns the file storage.
pub fn export_options(options: &FileResponseOptions) -> String {
	let mut out = String::new();
	out.push_str(&format!("    <responseformat>{}</responseformat>\n", options.responseformat));
	out.push_str(&format!("    <responsefieldlines>{}</responsefieldlines>\n", options.responsefieldlines));
	out.push_str(&format!("    <attachments>{}</attachments>\n", options.attachments));
	out.push_str(&format!("    <forcedownload>{}</forcedownload>\n", options.forcedownload));
	out.push_str(&format!("    <allowpickerplugins>{}</allowpickerplugins>\n", options.allowpickerplugins));
	out.push_str(&format!(
		"    <graderinfo format=\"{}\">{}</graderinfo>\n",
		options.graderinfoformat,
		write_text(&options.graderinfo)
	));
	out.push_str(&format!("    <graderinfoformat>{}</graderinfoformat>\n", options.graderinfoformat));
	out
}

/// The raw `<graderinfo>` body, files included.
pub fn graderinfo_section(question_xml: &str) -> Option<&str> {
	GRADERINFO
		.captures(question_xml)
		.and_then(|caps| caps.get(2))
		.map(|m| m.as_str())
}

/// `@@PLUGINFILE@@` references as (raw, decoded) pairs. Query strings are
/// dropped before decoding, people add them to defeat caches.
pub fn plugin_file_references(text: &str) -> Vec<(String, String)> {
	let mut refs: Vec<(String, String)> = Vec::new();
	for (_, [raw]) in PLUGIN_FILE.captures_iter(text).map(|caps| caps.extract()) {
		let getless = raw.split('?').next().unwrap_or(raw);
		let decoded = match url_decode(getless) {
			Ok(d) => d.into_owned(),
			Err(_) => getless.to_string(),
		};
		if !refs.iter().any(|(r, _)| r == raw) {
			refs.push((raw.to_string(), decoded));
		}
	}
	refs
}

/// Path plus name of every `<file>` element in the text.
pub fn embedded_files(text: &str) -> Vec<String> {
	let attr = |attributes: &str, re: &Regex| -> String {
		re.captures(attributes)
			.map(|caps| basic_entity_decode(&caps[1]))
			.unwrap_or_default()
	};
	FILE_ELEMENT
		.captures_iter(text)
		.map(|caps| {
			let attributes = &caps[1];
			let path = attr(attributes, &*PATH_ATTRIBUTE);
			let path = if path.is_empty() { "/".to_string() } else { path };
			format!("{}{}", path, attr(attributes, &*NAME_ATTRIBUTE))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	const QUESTION: &str = r#"<question type="fileresponse">
    <name><text>Upload your essay</text></name>
    <questiontext format="html"><text><![CDATA[<p>Please upload two files.</p>]]></text></questiontext>
    <responseformat>plain</responseformat>
    <responsefieldlines>10</responsefieldlines>
    <attachments>2</attachments>
    <forcedownload>1</forcedownload>
    <allowpickerplugins>1</allowpickerplugins>
    <graderinfo format="1"><text><![CDATA[<p>See <a href="@@PLUGINFILE@@/rubric%20v2.pdf?time=1">rubric</a></p>]]></text>
<file name="rubric v2.pdf" path="/" encoding="base64">AAAA</file>
<file name="old.pdf" path="/" encoding="base64">BBBB</file>
</graderinfo>
    <graderinfoformat>1</graderinfoformat>
  </question>"#;

	#[test]
	fn test_import_options() {
		let options = import_options(QUESTION).unwrap().unwrap();
		assert_eq!(options.responseformat, "plain");
		assert_eq!(options.responsefieldlines, 10);
		assert_eq!(options.attachments, 2);
		assert_eq!(options.forcedownload, 1);
		assert_eq!(options.allowpickerplugins, 1);
		assert_eq!(options.graderinfoformat, 1);
		assert!(options.graderinfo.starts_with("<p>See <a href="));
		assert_eq!(options.responsetemplate, "");
	}

	#[test]
	fn test_import_other_types_is_none() {
		let xml = r#"<question type="essay"><attachments>1</attachments></question>"#;
		assert_eq!(import_options(xml), Ok(None));
	}

	#[test]
	fn test_import_defaults_for_missing_elements() {
		let options = import_options(r#"<question type="fileresponse"><name><text>x</text></name></question>"#)
			.unwrap()
			.unwrap();
		assert_eq!(options.responseformat, "plain");
		assert_eq!(options.responsefieldlines, 1);
		assert_eq!(options.attachments, 0);
		assert_eq!(options.forcedownload, 0);
		assert_eq!(options.allowpickerplugins, 0);
		assert_eq!(options.graderinfo, "");
		assert_eq!(options.graderinfoformat, 1);
	}

	#[test]
	fn test_import_format_in_text_child_and_named_formats() {
		let xml = r#"<question type="fileresponse">
<responseformat><text>editor</text></responseformat>
<graderinfo format="markdown"><text>Check &amp; grade</text></graderinfo>
</question>"#;
		let options = import_options(xml).unwrap().unwrap();
		assert_eq!(options.responseformat, "editor");
		assert_eq!(options.graderinfo, "Check & grade");
		assert_eq!(options.graderinfoformat, 4);
	}

	#[test]
	fn test_import_rejects_non_numbers() {
		let xml = r#"<question type="fileresponse"><attachments>many</attachments></question>"#;
		assert_eq!(
			import_options(xml),
			Err(OptionError::InvalidNumber {
				element: "attachments".to_string(),
				value: "many".to_string()
			})
		);
	}

	#[test]
	fn test_export_then_import_keeps_options() {
		let options = FileResponseOptions {
			attachments: -1,
			graderinfo: "<b>Be kind</b>".to_string(),
			..FileResponseOptions::default()
		};
		let exported = export_options(&options);
		assert!(exported.contains("<attachments>-1</attachments>"));
		assert!(exported.contains("<graderinfo format=\"1\"><text><![CDATA[<b>Be kind</b>]]></text></graderinfo>"));
		let xml = format!("<question type=\"fileresponse\">\n{exported}</question>");
		assert_eq!(import_options(&xml), Ok(Some(options)));
	}

	#[test]
	fn test_plugin_file_references_and_embedded_files() {
		let section = graderinfo_section(QUESTION).unwrap();
		let refs = plugin_file_references(section);
		assert_eq!(refs, vec![("/rubric%20v2.pdf?time=1".to_string(), "/rubric v2.pdf".to_string())]);
		assert_eq!(embedded_files(section), vec!["/rubric v2.pdf".to_string(), "/old.pdf".to_string()]);
	}

	#[test]
	fn test_has_element() {
		assert!(has_element(QUESTION, "attachments"));
		assert!(!has_element(QUESTION, "responsetemplate"));
		assert!(!has_element(QUESTION, "nosuchelement"));
	}

	#[test]
	fn test_question_type() {
		assert_eq!(question_type(QUESTION).as_deref(), Some("fileresponse"));
		assert_eq!(question_type("<name/>"), None);
	}
}
