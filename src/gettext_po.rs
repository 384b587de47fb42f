// See:
// <https://www.gnu.org/software/gettext/manual/gettext.html#PO-Files>
// <https://www.gnu.org/software/gettext/manual/gettext.html#Filling-in-the-Header-Entry>
// <https://www.gnu.org/software/gettext/manual/gettext.html#Translating-plural-forms>
//
// This is deliberately not a complete gettext parser: every line is matched
// against a handful of shapes (comment, blank, msgctxt, msgid, msgstr,
// msgid_plural, msgstr[N] and bare strings) and anything out of order is only
// warned about. Quoted text is kept exactly as written, so escape sequences
// such as `\n` end up in the output verbatim.

pub mod lexer;
pub mod parser;

pub use crate::utils::parsing::{CharPos, ParsingError};
pub use lexer::Lexer;
pub use parser::{CatalogEntry, Parser, ParserState, SequenceAnomaly, StateSet};

pub fn parse(src: &str) -> Parser { Parser::new(Lexer::new(src)) }
