use super::lexer::{Lexer, Line, LineType};
use super::{CharPos, ParsingError};
use crate::impl_prelude::*;

use serde::Serialize;
use std::fmt;
use std::mem;

/// One translation unit, accumulated from a keyword line and any number of
/// string continuation lines following it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CatalogEntry {
  /// Position of the first keyword line of the entry, `None` if the entry
  /// was sealed before any keyword line was seen.
  #[serde(skip)]
  pub start_pos: Option<CharPos>,
  pub context: String,
  pub id: String,
  pub translation: String,
  pub id_plural: String,
  pub translation_plurals: Vec<String>,
}

impl CatalogEntry {
  /// Entries produced by runs of blank or comment lines are empty.
  #[inline]
  pub fn is_empty(&self) -> bool { self.start_pos.is_none() }
  #[inline]
  pub fn is_header(&self) -> bool { self.id.is_empty() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserState {
  Unspecified,
  Context,
  Id,
  Translation,
  IdPlural,
  TranslationPlural,
}

impl ParserState {
  pub const ALL: [Self; 6] = [
    Self::Unspecified,
    Self::Context,
    Self::Id,
    Self::Translation,
    Self::IdPlural,
    Self::TranslationPlural,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Self::Unspecified => "unspecified",
      Self::Context => "msgctxt",
      Self::Id => "msgid",
      Self::Translation => "msgstr",
      Self::IdPlural => "msgid_plural",
      Self::TranslationPlural => "msgstr_plural",
    }
  }

  #[inline(always)]
  const fn bit(self) -> u8 { 1 << self as u8 }
}

impl fmt::Display for ParserState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// A tiny bitset of [`ParserState`]s.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StateSet(u8);

impl StateSet {
  pub const EMPTY: Self = Self(0);
  pub const ENTRY_START: Self = Self::of(&[ParserState::Context, ParserState::Id]);

  pub const fn of(states: &[ParserState]) -> Self {
    let mut bits = 0;
    let mut i = 0;
    while i < states.len() {
      bits |= states[i].bit();
      i += 1;
    }
    Self(bits)
  }

  #[inline]
  pub fn contains(self, state: ParserState) -> bool { self.0 & state.bit() != 0 }

  pub fn iter(self) -> impl Iterator<Item = ParserState> {
    let all: &'static [ParserState] = &ParserState::ALL;
    all.iter().copied().filter(move |&state| self.contains(state))
  }
}

impl fmt::Debug for StateSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}

impl fmt::Display for StateSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("{")?;
    for (i, state) in self.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      f.write_str(state.name())?;
    }
    f.write_str("}")
  }
}

/// A keyword line which appeared where the grammar didn't expect it. These
/// are tolerated: the line is applied regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceAnomaly {
  pub pos: CharPos,
  pub found: ParserState,
  pub expected: StateSet,
}

impl fmt::Display for SequenceAnomaly {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Invalid .po file at line {}. Found {}, expected one of {}",
      self.pos.line, self.found, self.expected,
    )
  }
}

#[derive(Debug, Clone)]
pub struct Parser<'src> {
  lexer: Lexer<'src>,
  done: bool,
  state: ParserState,
  valid_next_states: StateSet,
  current_entry: CatalogEntry,
  anomalies: Vec<SequenceAnomaly>,
}

impl<'src> Parser<'src> {
  pub fn new(lexer: Lexer<'src>) -> Self {
    Self {
      lexer,
      done: false,
      state: ParserState::Unspecified,
      valid_next_states: StateSet::ENTRY_START,
      current_entry: CatalogEntry::default(),
      anomalies: Vec::new(),
    }
  }

  #[inline(always)]
  pub fn state(&self) -> ParserState { self.state }
  #[inline(always)]
  pub fn valid_next_states(&self) -> StateSet { self.valid_next_states }
  #[inline(always)]
  pub fn anomalies(&self) -> &[SequenceAnomaly] { &self.anomalies }
  #[inline(always)]
  pub fn into_anomalies(self) -> Vec<SequenceAnomaly> { self.anomalies }

  fn seal_entry(&mut self) -> CatalogEntry {
    self.state = ParserState::Unspecified;
    self.valid_next_states = StateSet::ENTRY_START;
    mem::take(&mut self.current_entry)
  }

  fn expect_state(&mut self, pos: CharPos, found: ParserState) {
    if !self.valid_next_states.contains(found) {
      let anomaly = SequenceAnomaly { pos, found, expected: self.valid_next_states };
      warn!("{}", anomaly);
      self.anomalies.push(anomaly);
    }
  }

  /// Switches into the given state and returns the buffer which subsequent
  /// string lines will be appended to.
  fn begin_section(
    &mut self,
    pos: CharPos,
    state: ParserState,
    valid_next_states: Option<StateSet>,
  ) -> &mut String {
    self.expect_state(pos, state);
    self.state = state;
    if let Some(valid_next_states) = valid_next_states {
      self.valid_next_states = valid_next_states;
    }

    let entry = &mut self.current_entry;
    entry.start_pos.get_or_insert(pos);
    match state {
      ParserState::Context => &mut entry.context,
      ParserState::Id => &mut entry.id,
      ParserState::Translation => &mut entry.translation,
      ParserState::IdPlural => &mut entry.id_plural,
      ParserState::TranslationPlural => {
        entry.translation_plurals.push(String::new());
        entry.translation_plurals.last_mut().unwrap()
      }
      ParserState::Unspecified => unreachable!(),
    }
  }

  fn current_section_buffer(&mut self) -> Option<&mut String> {
    let entry = &mut self.current_entry;
    match self.state {
      ParserState::Unspecified => None,
      ParserState::Context => Some(&mut entry.context),
      ParserState::Id => Some(&mut entry.id),
      ParserState::Translation => Some(&mut entry.translation),
      ParserState::IdPlural => Some(&mut entry.id_plural),
      ParserState::TranslationPlural => entry.translation_plurals.last_mut(),
    }
  }

  fn emit_error(&mut self, pos: CharPos, message: String) -> ParsingError {
    self.done = true;
    ParsingError { pos, message }
  }

  fn parse_next_entry(&mut self) -> Result<Option<CatalogEntry>, ParsingError> {
    if self.done {
      return Ok(None);
    }

    use ParserState as S;
    while let Some(Line { pos, type_ }) = self.lexer.next() {
      match type_ {
        LineType::Comment(_) => {}

        LineType::Blank => return Ok(Some(self.seal_entry())),

        LineType::Msgctxt(text) => {
          self.begin_section(pos, S::Context, Some(StateSet::of(&[S::Id]))).push_str(text);
        }
        LineType::Msgid(text) => {
          let next = StateSet::of(&[S::IdPlural, S::Translation]);
          self.begin_section(pos, S::Id, Some(next)).push_str(text);
        }
        LineType::Msgstr(text) => {
          self.begin_section(pos, S::Translation, None).push_str(text);
        }
        LineType::MsgidPlural(text) => {
          let next = StateSet::of(&[S::TranslationPlural]);
          self.begin_section(pos, S::IdPlural, Some(next)).push_str(text);
        }
        LineType::MsgstrPlural(_index, text) => {
          let next = StateSet::of(&[S::TranslationPlural]);
          self.begin_section(pos, S::TranslationPlural, Some(next)).push_str(text);
        }

        LineType::String(text) => match self.current_section_buffer() {
          Some(buf) => buf.push_str(text),
          None => {
            return Err(self.emit_error(
              pos,
              "encountered a string outside of any msgctxt/msgid/msgstr section, please ensure \
              the input file is in a valid .po format"
                .to_owned(),
            ));
          }
        },

        LineType::Unknown(text) => {
          debug!("Skipping an unrecognized line {}: {:?}", pos.line, text);
        }
      }
    }

    // The entry at the end of the input is flushed as if the file had a
    // trailing blank line.
    self.done = true;
    Ok(Some(self.seal_entry()))
  }
}

impl<'src> Iterator for Parser<'src> {
  type Item = Result<CatalogEntry, ParsingError>;

  fn next(&mut self) -> Option<Self::Item> {
    match self.parse_next_entry() {
      Ok(Some(v)) => Some(Ok(v)),
      Ok(None) => None,
      Err(e) => Some(Err(e)),
    }
  }
}
