use crate::impl_prelude::*;

use std::fmt;

/// Both fields are 1-based, a zero means "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CharPos {
  pub line: usize,
  pub column: usize,
}

impl fmt::Display for CharPos {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.column)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingError {
  pub pos: CharPos,
  pub message: String,
}

impl ParsingError {
  #[inline(always)]
  pub fn nice_formatter<'error>(
    &'error self,
    filename: &'error str,
    src: &'error str,
  ) -> NiceParsingErrorFormatter<'error> {
    NiceParsingErrorFormatter { error: self, filename, src: Some(src) }
  }
}

impl fmt::Display for ParsingError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(
      &NiceParsingErrorFormatter { error: self, filename: "<unknown>", src: None },
      f,
    )
  }
}

impl StdError for ParsingError {
}

#[derive(Debug)]
pub struct NiceParsingErrorFormatter<'error> {
  error: &'error ParsingError,
  filename: &'error str,
  src: Option<&'error str>,
}

impl<'error> fmt::Display for NiceParsingErrorFormatter<'error> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let pos = self.error.pos;
    writeln!(f, "Syntax error in {}:{}", self.filename, pos)?;
    if let Some(line_text) = self.src.and_then(|src| find_line(src, pos.line)) {
      let line_number_str = format!("{}", pos.line);
      let line_number_margin = " ".repeat(line_number_str.len());
      writeln!(f, "{} | {}", line_number_str, line_text)?;
      writeln!(f, "{} |{}^", line_number_margin, " ".repeat(pos.column))?;
      write!(f, "{} = {}", line_number_margin, self.error.message)?;
    } else {
      write!(f, "{}", self.error.message)?;
    }
    Ok(())
  }
}

/// Line numbers are counted the same way the gettext lexer counts them, i.e.
/// starting from one and with `\r\n` treated as a single terminator.
pub fn find_line(string: &str, line_number: usize) -> Option<&str> {
  string.lines().nth(line_number.checked_sub(1)?)
}
