use super::FileOrStdStream;
use crate::impl_prelude::*;
use crate::po_json::{self, Document};
use crate::utils::json;

use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub struct ConvertCommand;

impl super::Command for ConvertCommand {
  fn name(&self) -> &'static str { "convert" }

  fn create_arg_parser<'help>(&self, app: clap::App<'help>) -> clap::App<'help> {
    app
      .about("Converts a gettext Portable Object (.po) file to JSON.")
      .arg(
        clap::Arg::new("input")
          .value_name("INPUT_PATH")
          .value_hint(clap::ValueHint::FilePath)
          .required(true)
          .help("Path to the .po file, or - to read it from stdin."),
      )
      .arg(
        clap::Arg::new("output")
          .value_name("PATH")
          .value_hint(clap::ValueHint::FilePath)
          .short('o')
          .long("output")
          .takes_value(true)
          .help("Path to a file to write the resulting JSON to."),
      )
      .arg(
        clap::Arg::new("print")
          .short('p')
          .long("print")
          .help(
            "Print the resulting JSON to stdout. This is the default when no output file is \
            given.",
          ),
      )
      .arg(
        clap::Arg::new("compact")
          .long("compact")
          //
          .help("Write the JSON without any whitespace."),
      )
      .arg(
        clap::Arg::new("strict")
          .long("strict")
          .help(
            "Fail instead of producing output if any keyword lines appear out of the expected \
            order. A string line outside of any section is always an error.",
          ),
      )
  }

  fn run(&self, _global_opts: super::GlobalOpts, matches: &clap::ArgMatches) -> AnyResult<()> {
    let opt_input = FileOrStdStream::from(matches.value_of_os("input").unwrap());
    let opt_output = matches.value_of_os("output").map(PathBuf::from);
    let opt_print = matches.is_present("print") || opt_output.is_none();
    let opt_compact = matches.is_present("compact");
    let opt_strict = matches.is_present("strict");

    let filename = opt_input.display_name();
    info!("Converting {:?}", filename);

    let src = opt_input
      .read_to_string()
      .with_context(|| format!("Failed to read the input file {:?}", filename))?;
    let document = run_conversion(&src, &filename, opt_strict)?;

    let json_config =
      if opt_compact { json::FormatterConfig::COMPACT } else { json::FormatterConfig::PRETTY };

    if let Some(output) = &opt_output {
      json::write_file(output, &document, json_config)
        .with_context(|| format!("Failed to write the output file {:?}", output))?;
      info!("Wrote {:?}", output);
    }

    if opt_print {
      let stdout = io::stdout();
      json::write(stdout.lock(), &document, json_config)
        .context("Failed to print the result to stdout")?;
    }

    Ok(())
  }
}

/// Parses the catalog and builds the document tree. Syntax errors are
/// rendered with the offending line of `src`, out-of-order keywords are only
/// fatal in strict mode.
pub fn run_conversion(src: &str, filename: &str, strict: bool) -> AnyResult<Document> {
  let conversion = po_json::convert(src)
    .map_err(|e| format_err!("{}", e.nice_formatter(filename, src)))
    .with_context(|| format!("Failed to parse {:?}", filename))?;

  let anomalies_count = conversion.anomalies.len();
  if anomalies_count > 0 {
    warn!("{} line(s) in {:?} appeared out of the expected order", anomalies_count, filename);
    ensure!(
      !strict,
      "Refusing to convert {:?} in strict mode because of {} out-of-order line(s)",
      filename,
      anomalies_count,
    );
  }

  let document = conversion.document;
  debug!(
    "Found {} messages in {} contexts",
    document.message_count(),
    document.contexts().len(),
  );
  Ok(document)
}
