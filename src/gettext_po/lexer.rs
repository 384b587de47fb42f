use super::CharPos;

use once_cell::sync::Lazy;
use regex::Regex;
use std::iter;
use std::str;

static KEYWORD_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r#"^(?:(msgctxt|msgid|msgstr|msgid_plural)|msgstr\[(\d+)\])\s+"(.*)"$"#)
    .expect("valid regex literal")
});

static STRING_LINE_REGEX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r#"^"(.*)"$"#).expect("valid regex literal"));

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line<'src> {
  pub pos: CharPos,
  pub type_: LineType<'src>,
}

/// The payloads of all string-carrying variants are the raw text between the
/// quotes, escape sequences are left as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineType<'src> {
  Comment(&'src str),
  Blank,
  Msgctxt(&'src str),
  Msgid(&'src str),
  Msgstr(&'src str),
  MsgidPlural(&'src str),
  /// The index is kept only for debugging, plural forms are stored in the
  /// order they are encountered.
  MsgstrPlural(&'src str, &'src str),
  String(&'src str),
  Unknown(&'src str),
}

impl<'src> LineType<'src> {
  /// Classification is order-sensitive: comments win over everything, then
  /// blank lines, then the keyword lines and finally bare strings.
  pub fn classify(line: &'src str) -> Self {
    if let Some(comment) = line.trim_start().strip_prefix('#') {
      return Self::Comment(comment);
    }
    if line.trim().is_empty() {
      return Self::Blank;
    }

    if let Some(caps) = KEYWORD_LINE_REGEX.captures(line) {
      let text = caps.get(3).map_or("", |m| m.as_str());
      if let Some(index) = caps.get(2) {
        return Self::MsgstrPlural(index.as_str(), text);
      }
      return match caps.get(1).map(|m| m.as_str()) {
        Some("msgctxt") => Self::Msgctxt(text),
        Some("msgid") => Self::Msgid(text),
        Some("msgstr") => Self::Msgstr(text),
        Some("msgid_plural") => Self::MsgidPlural(text),
        _ => unreachable!("{:?}", line),
      };
    }

    if let Some(caps) = STRING_LINE_REGEX.captures(line) {
      return Self::String(caps.get(1).map_or("", |m| m.as_str()));
    }

    Self::Unknown(line)
  }
}

#[derive(Debug, Clone)]
pub struct Lexer<'src> {
  lines: iter::Enumerate<str::Lines<'src>>,
}

impl<'src> Lexer<'src> {
  pub fn new(src: &'src str) -> Self { Self { lines: src.lines().enumerate() } }
}

impl<'src> Iterator for Lexer<'src> {
  type Item = Line<'src>;

  fn next(&mut self) -> Option<Self::Item> {
    let (index, text) = self.lines.next()?;
    Some(Line { pos: CharPos { line: index + 1, column: 1 }, type_: LineType::classify(text) })
  }

  #[inline(always)]
  fn size_hint(&self) -> (usize, Option<usize>) { self.lines.size_hint() }
}

impl iter::FusedIterator for Lexer<'_> {
}
