//! Turning status categories into user facing text.
//!
//! Hosts normally plug in their own string lookup through
//! [`MessageFormatter`]. [`Catalog`] is the built-in implementation
//! carrying the question type's own English, German and French strings.

use crate::error::UnknownLanguage;
use crate::status::{AttachmentRequirement, AttachmentStatus};
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Renders categories produced by the classifier.
pub trait MessageFormatter {
	/// `None` when the category needs no message at all.
	fn format_status(&self, status: &AttachmentStatus) -> Option<String>;

	fn format_requirement(&self, requirement: &AttachmentRequirement) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
	#[default]
	En,
	De,
	Fr,
}

impl FromStr for Language {
	type Err = UnknownLanguage;

	fn from_str(code: &str) -> Result<Language, UnknownLanguage> {
		match code.trim().to_ascii_lowercase().as_str() {
			"en" => Ok(Language::En),
			"de" => Ok(Language::De),
			"fr" => Ok(Language::Fr),
			other => Err(UnknownLanguage(other.to_string())),
		}
	}
}

impl fmt::Display for Language {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let code = match self {
			Language::En => "en",
			Language::De => "de",
			Language::Fr => "fr",
		};
		f.write_str(code)
	}
}

const EN: &[(&str, &str)] = &[
	("allowpickerpluginsno", "Disable (\"Upload a file\" only)"),
	("allowpickerpluginsyes", "Enable (also Flickr, Wikimedia etc.)"),
	("formatplain", "Plain text"),
	("nattachmentsexpected", "{$a} files required."),
	("nattachmentssubmitted", "{$a} files uploaded."),
	("nlines", "{$a} lines"),
	("noinputbox", "no input box"),
	("noofnattachmentsubmitted", "0 of {$a} files uploaded."),
	("noofoneattachmentsubmitted", "0 of 1 files uploaded."),
	("ofnattachmentssubmitted", " of {$a} files uploaded."),
	("oneattachmentexpected", "1 file required."),
	("oneattachmentsubmitted", "1 file uploaded."),
	("oneofnattachmentssubmitted", "1 of {$a} files uploaded."),
	("oneofoneattachmentsubmitted", "1 of 1 files uploaded."),
	("unlimited", "Unlimited"),
	("withdownload", "Download, Rename, Move, Delete (file download enabled)"),
	("withoutdownload", "Rename, Delete (file download disabled)"),
];

const DE: &[(&str, &str)] = &[
	("allowpickerpluginsno", "Deaktiviert (nur \"Datei hochladen\")"),
	("allowpickerpluginsyes", "Aktiviert (auch Flickr, Wikimedia etc.)"),
	("nattachmentsexpected", "{$a} Dateien erwartet."),
	("nattachmentssubmitted", "{$a} Dateien hochgeladen."),
	("nlines", "{$a} Linien"),
	("noinputbox", "kein Eingabefenster"),
	("noofnattachmentsubmitted", "0 von {$a} Dateien hochgeladen."),
	("noofoneattachmentsubmitted", "0 von 1 Datei hochgeladen."),
	("ofnattachmentssubmitted", " von {$a} Dateien hochgeladen."),
	("oneattachmentexpected", "1 Datei erwartet."),
	("oneattachmentsubmitted", "1 Datei hochgeladen."),
	("oneofnattachmentssubmitted", "1 von {$a} Dateien hochgeladen."),
	("oneofoneattachmentsubmitted", "1 von 1 Datei hochgeladen."),
	("unlimited", "Unbegrenzt"),
	("withdownload", "Herunterladen, Umbenennen, Verschieben, Löschen (Dateien können heruntergeladen werden)"),
	("withoutdownload", "Umbenennen, Löschen (Dateien können nicht heruntergeladen werden)"),
];

const FR: &[(&str, &str)] = &[
	("nattachmentsexpected", "{$a} fichiers requis."),
	("nattachmentssubmitted", "{$a} fichiers téléchargés."),
	("nlines", "{$a} lignes"),
	("noinputbox", "Pas de champ de saisie"),
	("noofnattachmentsubmitted", "0 sur {$a} fichiers téléchargés."),
	("noofoneattachmentsubmitted", "0 sur 1 fichier téléchargés."),
	("ofnattachmentssubmitted", " sur {$a} fichiers téléchargés."),
	("oneattachmentexpected", "1 fichier requis."),
	("oneattachmentsubmitted", "1 fichier téléchargé."),
	("oneofnattachmentssubmitted", "1 sur {$a} fichiers téléchargé."),
	("oneofoneattachmentsubmitted", "1 sur 1 fichier téléchargé."),
	("unlimited", "Illimité"),
	("withdownload", "Télécharger, Renommer, Déplacer, Supprimer (téléchargement des fichiers activé)"),
	("withoutdownload", "Renommer, Supprimer (téléchargement des fichiers désactivé)"),
];

/// The question type's own strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog {
	language: Language,
}

impl Catalog {
	pub fn new(language: Language) -> Catalog {
		Catalog { language }
	}

	pub fn language(&self) -> Language {
		self.language
	}

	/// Looks up a string, falling back to English for strings a
	/// translation lacks. Unknown keys come back as `[[key]]`.
	pub fn get_string(&self, key: &str, a: Option<&str>) -> String {
		let table = match self.language {
			Language::En => EN,
			Language::De => DE,
			Language::Fr => FR,
		};
		let raw = match lookup(table, key).or_else(|| lookup(EN, key)) {
			Some(raw) => raw,
			None => {
				debug!("Missing string '{key}'.");
				return format!("[[{key}]]");
			}
		};
		match a {
			Some(value) => raw.replace("{$a}", value),
			None => raw.to_string(),
		}
	}
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
	table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

impl MessageFormatter for Catalog {
	fn format_status(&self, status: &AttachmentStatus) -> Option<String> {
		let text = match status {
			AttachmentStatus::NoStatusMessage => return None,
			AttachmentStatus::ExactlyOneOfUnlimited => self.get_string("oneattachmentsubmitted", None),
			AttachmentStatus::NOfUnlimited { uploaded } | AttachmentStatus::OverfilledExact { uploaded } => {
				self.get_string("nattachmentssubmitted", Some(uploaded.to_string().as_str()))
			}
			AttachmentStatus::ZeroOfOne => self.get_string("noofoneattachmentsubmitted", None),
			AttachmentStatus::OneOfOne => self.get_string("oneofoneattachmentsubmitted", None),
			AttachmentStatus::ZeroOfN { expected } => {
				self.get_string("noofnattachmentsubmitted", Some(expected.to_string().as_str()))
			}
			AttachmentStatus::OneOfN { expected } => {
				self.get_string("oneofnattachmentssubmitted", Some(expected.to_string().as_str()))
			}
			AttachmentStatus::MOfN { uploaded, expected } => format!(
				"{uploaded}{}",
				self.get_string("ofnattachmentssubmitted", Some(expected.to_string().as_str()))
			),
		};
		Some(text)
	}

	fn format_requirement(&self, requirement: &AttachmentRequirement) -> String {
		match requirement {
			AttachmentRequirement::OneRequired => self.get_string("oneattachmentexpected", None),
			AttachmentRequirement::NRequired { expected } => {
				self.get_string("nattachmentsexpected", Some(expected.to_string().as_str()))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_language_codes() {
		assert_eq!("de".parse::<Language>(), Ok(Language::De));
		assert_eq!(" FR ".parse::<Language>(), Ok(Language::Fr));
		assert_eq!("xx".parse::<Language>(), Err(UnknownLanguage("xx".to_string())));
		assert_eq!(
			UnknownLanguage("xx".to_string()).to_string(),
			"Unknown language 'xx', known are en, de and fr."
		);
		assert_eq!(Language::default().to_string(), "en");
	}

	#[test]
	fn test_status_messages_in_english() {
		let catalog = Catalog::default();
		assert_eq!(catalog.format_status(&AttachmentStatus::NoStatusMessage), None);
		assert_eq!(
			catalog.format_status(&AttachmentStatus::ZeroOfOne).as_deref(),
			Some("0 of 1 files uploaded.")
		);
		assert_eq!(
			catalog.format_status(&AttachmentStatus::MOfN { uploaded: 2, expected: 3 }).as_deref(),
			Some("2 of 3 files uploaded.")
		);
		assert_eq!(
			catalog.format_status(&AttachmentStatus::OverfilledExact { uploaded: 5 }).as_deref(),
			Some("5 files uploaded.")
		);
		assert_eq!(
			catalog.format_status(&AttachmentStatus::ExactlyOneOfUnlimited).as_deref(),
			Some("1 file uploaded.")
		);
	}

	#[test]
	fn test_status_messages_translated() {
		let catalog = Catalog::new(Language::De);
		assert_eq!(
			catalog.format_status(&AttachmentStatus::OneOfN { expected: 3 }).as_deref(),
			Some("1 von 3 Dateien hochgeladen.")
		);
		assert_eq!(
			catalog.format_requirement(&AttachmentRequirement::NRequired { expected: 2 }),
			"2 Dateien erwartet."
		);
		let catalog = Catalog::new(Language::Fr);
		assert_eq!(
			catalog.format_status(&AttachmentStatus::MOfN { uploaded: 2, expected: 3 }).as_deref(),
			Some("2 sur 3 fichiers téléchargés.")
		);
	}

	#[test]
	fn test_missing_translation_falls_back_to_english() {
		let catalog = Catalog::new(Language::Fr);
		assert_eq!(catalog.get_string("allowpickerpluginsyes", None), "Enable (also Flickr, Wikimedia etc.)");
		assert_eq!(catalog.get_string("nosuchstring", None), "[[nosuchstring]]");
	}
}
