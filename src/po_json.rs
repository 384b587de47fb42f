//! Folds parsed catalog entries into the `context -> id -> record` tree which
//! is written out as JSON.

use crate::gettext_po::{self, CatalogEntry, ParsingError, SequenceAnomaly};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap as _, Serializer};

/// Matches `Key: Value\n` pairs of the header entry, where `\n` is the escape
/// sequence as written in the file and not a real line break.
static HEADER_FIELD_REGEX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"([a-zA-Z0-9-]+): (.*?)\\n").expect("valid regex literal"));

pub const TRANSLATION_KEY: &str = "translation";
pub const PLURALS_KEY: &str = "plurals";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageRecord {
  pub translation: Option<String>,
  pub plurals: Vec<String>,
  pub header_fields: IndexMap<String, String>,
}

impl MessageRecord {
  pub fn is_empty(&self) -> bool {
    self.translation.is_none() && self.plurals.is_empty() && self.header_fields.is_empty()
  }

  fn merge_header(&mut self, text: &str) {
    for caps in HEADER_FIELD_REGEX.captures_iter(text) {
      self.header_fields.insert(caps[1].to_owned(), caps[2].to_owned());
    }
  }
}

impl Serialize for MessageRecord {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let has_plurals = !self.plurals.is_empty();
    let mut map = serializer.serialize_map(None)?;
    if let Some(translation) = &self.translation {
      map.serialize_entry(TRANSLATION_KEY, translation)?;
    }
    if has_plurals {
      map.serialize_entry(PLURALS_KEY, &self.plurals)?;
    }
    for (key, value) in &self.header_fields {
      let shadowed = match key.as_str() {
        TRANSLATION_KEY => self.translation.is_some(),
        PLURALS_KEY => has_plurals,
        _ => false,
      };
      if !shadowed {
        map.serialize_entry(key, value)?;
      }
    }
    map.end()
  }
}

pub type ContextMessages = IndexMap<String, MessageRecord>;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Document {
  contexts: IndexMap<String, ContextMessages>,
}

impl Document {
  pub fn new() -> Self { Self::default() }

  #[inline(always)]
  pub fn contexts(&self) -> &IndexMap<String, ContextMessages> { &self.contexts }

  pub fn get(&self, context: &str, id: &str) -> Option<&MessageRecord> {
    self.contexts.get(context)?.get(id)
  }

  pub fn message_count(&self) -> usize { self.contexts.values().map(|msgs| msgs.len()).sum() }

  /// Entries which never saw a keyword line leave the tree untouched, so that
  /// runs of blank lines don't conjure up an empty header record.
  pub fn add_entry(&mut self, entry: CatalogEntry) {
    if entry.is_empty() {
      return;
    }
    let is_header = entry.is_header();
    let CatalogEntry { start_pos: _, context, id, translation, id_plural: _, translation_plurals } =
      entry;

    let record = self.contexts.entry(context).or_default().entry(id).or_default();

    if !translation.is_empty() {
      if is_header {
        record.merge_header(&translation);
      } else {
        record.translation = Some(translation);
      }
    }

    record.plurals.extend(translation_plurals);
  }
}

#[derive(Debug, Clone)]
pub struct Conversion {
  pub document: Document,
  pub anomalies: Vec<SequenceAnomaly>,
}

/// Runs the whole catalog through the parser. A string line outside of any
/// section aborts the conversion, out-of-order keywords are only collected
/// into [`Conversion::anomalies`].
pub fn convert(src: &str) -> Result<Conversion, ParsingError> {
  let mut parser = gettext_po::parse(src);
  let mut document = Document::new();
  for entry in parser.by_ref() {
    document.add_entry(entry?);
  }
  Ok(Conversion { document, anomalies: parser.into_anomalies() })
}

#[cfg(test)]
mod tests {
  use super::*;

  use serde_json::json;

  fn convert_to_json(src: &str) -> serde_json::Value {
    serde_json::to_value(&convert(src).unwrap().document).unwrap()
  }

  #[test]
  fn test_non_header_translation() {
    assert_eq!(
      convert_to_json("msgid \"Hello\"\nmsgstr \"Hola\"\n"),
      json!({ "": { "Hello": { "translation": "Hola" } } }),
    );
  }

  #[test]
  fn test_header_fields() {
    let src = concat!(
      "msgid \"\"\n",
      "msgstr \"\"\n",
      "\"Project-Id-Version: X\\n\"\n",
      "\"POT-Creation-Date: Y\\n\"\n",
    );
    assert_eq!(
      convert_to_json(src),
      json!({ "": { "": { "Project-Id-Version": "X", "POT-Creation-Date": "Y" } } }),
    );
  }

  #[test]
  fn test_header_values_are_non_greedy() {
    let mut record = MessageRecord::default();
    record.merge_header(
      r"Plural-Forms: nplurals=2; plural=(n != 1);\nLanguage: fr\ntrailing garbage",
    );
    record.merge_header(r"Language: de\nBad Key: ignored\n");
    let fields: Vec<(&str, &str)> =
      record.header_fields.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    assert_eq!(fields, vec![
      ("Plural-Forms", "nplurals=2; plural=(n != 1);"),
      ("Language", "de"),
      ("Key", "ignored"),
    ]);
  }

  #[test]
  fn test_empty_entries_create_records() {
    assert_eq!(convert_to_json(""), json!({}));
    assert_eq!(convert_to_json("\n\n# only comments\n\n"), json!({}));
    assert_eq!(convert_to_json("msgid \"\"\nmsgstr \"\"\n"), json!({ "": { "": {} } }));
    assert_eq!(
      convert_to_json("msgctxt \"ctx\"\nmsgid \"untranslated\"\nmsgstr \"\"\n"),
      json!({ "ctx": { "untranslated": {} } }),
    );
  }

  #[test]
  fn test_blank_lines_are_idempotent() {
    let one = "msgid \"a\"\nmsgstr \"b\"\n\nmsgid \"c\"\nmsgstr \"d\"\n";
    let many = "msgid \"a\"\nmsgstr \"b\"\n\n\n \n\t\nmsgid \"c\"\nmsgstr \"d\"\n";
    assert_eq!(convert(one).unwrap().document, convert(many).unwrap().document);
    assert_eq!(
      convert_to_json(one),
      json!({ "": { "a": { "translation": "b" }, "c": { "translation": "d" } } }),
    );
  }

  #[test]
  fn test_plural_order_is_preserved() {
    let src = concat!(
      "msgid \"day\"\n",
      "msgid_plural \"days\"\n",
      "msgstr[2] \"dnej\"\n",
      "msgstr[0] \"den\"\n",
      "msgstr[1] \"dny\"\n",
    );
    assert_eq!(
      convert_to_json(src),
      json!({ "": { "day": { "plurals": ["dnej", "den", "dny"] } } }),
    );
  }

  #[test]
  fn test_repeated_pairs_merge() {
    let src = concat!(
      "msgid \"file\"\n",
      "msgstr \"old\"\n",
      "msgstr[0] \"a\"\n",
      "msgstr[1] \"b\"\n",
      "\n",
      "msgid \"file\"\n",
      "msgstr \"new\"\n",
      "msgstr[0] \"c\"\n",
    );
    let conversion = convert(src).unwrap();
    let record = conversion.document.get("", "file").unwrap();
    assert_eq!(record.translation.as_deref(), Some("new"));
    assert_eq!(record.plurals, vec!["a", "b", "c"]);
    assert_eq!(conversion.document.message_count(), 1);
  }

  #[test]
  fn test_comment_transparency() {
    let plain =
      "msgctxt \"c\"\nmsgid \"a\"\nmsgid_plural \"as\"\nmsgstr[0] \"x\"\nmsgstr[1] \"y\"\n";
    let commented = concat!(
      "# translator note\n",
      "msgctxt \"c\"\n",
      "#. extracted\n",
      "msgid \"a\"\n",
      "# translator note\n",
      "msgid_plural \"as\"\n",
      "#: src/main.c:10\n",
      "msgstr[0] \"x\"\n",
      "    # indented\n",
      "msgstr[1] \"y\"\n",
      "#, fuzzy\n",
    );
    assert_eq!(convert(plain).unwrap().document, convert(commented).unwrap().document);
  }

  #[test]
  fn test_orphan_string_is_rejected() {
    let error = convert("\"orphan string\"\nmsgid \"a\"\nmsgstr \"b\"\n").unwrap_err();
    assert_eq!(error.pos.line, 1);
  }

  #[test]
  fn test_end_of_input_flush() {
    let without_blank = "msgid \"a\"\nmsgstr \"b\"";
    let with_blank = "msgid \"a\"\nmsgstr \"b\"\n\n";
    assert_eq!(convert_to_json(without_blank), json!({ "": { "a": { "translation": "b" } } }));
    assert_eq!(convert(without_blank).unwrap().document, convert(with_blank).unwrap().document);
  }

  #[test]
  fn test_anomalies_are_reported() {
    let conversion = convert("msgid \"a\"\nmsgid \"b\"\nmsgstr \"c\"\n").unwrap();
    assert_eq!(conversion.anomalies.len(), 1);
    assert_eq!(conversion.anomalies[0].pos.line, 2);
    assert_eq!(
      serde_json::to_value(&conversion.document).unwrap(),
      json!({ "": { "ab": { "translation": "c" } } }),
    );
  }

  #[test]
  fn test_header_fields_do_not_shadow_typed_fields() {
    let src = concat!(
      "msgid \"\"\n",
      "msgid_plural \"\"\n",
      "msgstr[0] \"zero\"\n",
      "\n",
      "msgid \"\"\n",
      "msgstr \"plurals: header\\ntranslation: header\\n\"\n",
    );
    assert_eq!(
      convert_to_json(src),
      json!({ "": { "": { "plurals": ["zero"], "translation": "header" } } }),
    );
  }
}
