use super::FileOrStdStream;
use crate::gettext_po::{self, CatalogEntry};
use crate::impl_prelude::*;
use crate::utils::json;

use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug)]
pub struct ParsePoCommand;

impl super::Command for ParsePoCommand {
  fn name(&self) -> &'static str { "parse-po" }

  fn create_arg_parser<'help>(&self, app: clap::App<'help>) -> clap::App<'help> {
    app
      .about(
        "Debug command which prints every entry sealed by the gettext po parser, including \
        the empty ones, before they are merged into the JSON document.",
      )
      .setting(clap::AppSettings::Hidden)
      .arg(
        clap::Arg::new("file")
          .value_name("FILE")
          .value_hint(clap::ValueHint::FilePath)
          .help("Path to the .po file, stdin is read if omitted."),
      )
  }

  fn run(&self, _global_opts: super::GlobalOpts, matches: &clap::ArgMatches) -> AnyResult<()> {
    let opt_file =
      matches.value_of_os("file").map_or(FileOrStdStream::StdStream, FileOrStdStream::from);

    let filename = opt_file.display_name();
    let src = opt_file
      .read_to_string()
      .with_context(|| format!("Failed to read the input file {:?}", filename))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut parser = gettext_po::parse(&src);
    for entry in parser.by_ref() {
      let entry = entry.map_err(|e| format_err!("{}", e.nice_formatter(&filename, &src)))?;
      json::write(&mut out, &DebugEntry::new(&entry), json::FormatterConfig::PRETTY)?;
    }
    out.flush()?;

    for anomaly in parser.anomalies() {
      debug!("{}", anomaly);
    }
    Ok(())
  }
}

#[derive(Debug, Serialize)]
struct DebugEntry<'a> {
  line: Option<usize>,
  #[serde(flatten)]
  entry: &'a CatalogEntry,
}

impl<'a> DebugEntry<'a> {
  fn new(entry: &'a CatalogEntry) -> Self {
    Self { line: entry.start_pos.map(|pos| pos.line), entry }
  }
}
