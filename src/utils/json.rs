use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub const DEFAULT_INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatterConfig {
  pub indent: Option<&'static str>,
}

impl FormatterConfig {
  pub const PRETTY: Self = Self { indent: Some(DEFAULT_INDENT) };
  pub const COMPACT: Self = Self { indent: None };
}

impl Default for FormatterConfig {
  #[inline(always)]
  fn default() -> Self { Self::PRETTY }
}

fn serialize_with<W, F, T>(writer: W, formatter: F, value: &T) -> io::Result<()>
where
  W: Write,
  F: Formatter,
  T: ?Sized + serde::Serialize,
{
  let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
  value.serialize(&mut serializer)?;
  Ok(())
}

/// Serializes the value and terminates the output with a newline.
pub fn write<W, T>(mut writer: W, value: &T, config: FormatterConfig) -> io::Result<()>
where
  W: Write,
  T: ?Sized + serde::Serialize,
{
  match config.indent {
    Some(indent) => {
      serialize_with(&mut writer, PrettyFormatter::with_indent(indent.as_bytes()), value)?
    }
    None => serialize_with(&mut writer, CompactFormatter, value)?,
  }
  writer.write_all(b"\n")?;
  writer.flush()?;
  Ok(())
}

pub fn write_file<T>(path: &Path, value: &T, config: FormatterConfig) -> io::Result<()>
where
  T: ?Sized + serde::Serialize,
{
  write(io::BufWriter::new(fs::File::create(path)?), value, config)
}

pub fn to_string<T>(value: &T, config: FormatterConfig) -> io::Result<String>
where
  T: ?Sized + serde::Serialize,
{
  let mut bytes = Vec::new();
  write(&mut bytes, value, config)?;
  String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
  use super::*;

  use serde_json::json;

  #[test]
  fn test_pretty_and_compact() {
    let value = json!({ "": { "Hello": { "translation": "Hola", "plurals": ["a", "b"] } } });
    assert_eq!(
      to_string(&value, FormatterConfig::COMPACT).unwrap(),
      "{\"\":{\"Hello\":{\"translation\":\"Hola\",\"plurals\":[\"a\",\"b\"]}}}\n",
    );
    assert_eq!(
      to_string(&value, FormatterConfig::PRETTY).unwrap(),
      concat!(
        "{\n",
        "  \"\": {\n",
        "    \"Hello\": {\n",
        "      \"translation\": \"Hola\",\n",
        "      \"plurals\": [\n",
        "        \"a\",\n",
        "        \"b\"\n",
        "      ]\n",
        "    }\n",
        "  }\n",
        "}\n",
      ),
    );
  }

  #[test]
  fn test_escapes_are_preserved_verbatim() {
    let value = json!({ "key": r"line\n" });
    assert_eq!(to_string(&value, FormatterConfig::COMPACT).unwrap(), "{\"key\":\"line\\\\n\"}\n");
  }
}
