pub mod completions;
pub mod convert;
pub mod parse_po;

use crate::impl_prelude::*;
use crate::logging::{self, Verbosity};

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

pub trait Command {
  fn name(&self) -> &'static str;

  fn create_arg_parser<'help>(&self, app: clap::App<'help>) -> clap::App<'help>;

  fn run(&self, global_opts: GlobalOpts, matches: &clap::ArgMatches) -> AnyResult<()>;
}

pub fn all_commands() -> Vec<Box<dyn Command>> {
  vec![
    Box::new(convert::ConvertCommand),
    Box::new(parse_po::ParsePoCommand),
    Box::new(completions::CompletionsCommand),
  ]
}

#[derive(Debug, Clone, Copy)]
pub struct GlobalOpts {
  pub verbosity: Verbosity,
  pub no_banner_message: bool,
}

impl GlobalOpts {
  pub fn create_arg_parser<'help>(app: clap::App<'help>) -> clap::App<'help> {
    app
      .arg(
        clap::Arg::new("verbose")
          .short('v')
          .long("verbose")
          .conflicts_with("quiet")
          .help("Print more logs, may help with troubleshooting.")
          .global(true),
      )
      .arg(
        clap::Arg::new("quiet")
          .short('q')
          .long("quiet")
          .help("Print only warnings and errors.")
          .global(true),
      )
      .arg(
        clap::Arg::new("no_banner_message")
          .long("no-banner-message")
          .help("Don't print the banner message with the program version on startup.")
          .global(true),
      )
  }

  pub fn from_matches(matches: &clap::ArgMatches) -> Self {
    Self {
      verbosity: if matches.is_present("verbose") {
        Verbosity::Verbose
      } else if matches.is_present("quiet") {
        Verbosity::Quiet
      } else {
        Verbosity::Normal
      },
      no_banner_message: matches.is_present("no_banner_message"),
    }
  }
}

pub fn create_complete_arg_parser() -> (clap::App<'static>, Vec<Box<dyn Command>>) {
  let commands = all_commands();
  let mut app = GlobalOpts::create_arg_parser(
    clap::App::new(crate::CRATE_NAME)
      .version(crate::CRATE_NICE_VERSION)
      .about("Converts gettext Portable Object (.po) files to JSON.")
      .setting(clap::AppSettings::SubcommandRequiredElseHelp),
  );
  for command in &commands {
    app = app.subcommand(command.create_arg_parser(clap::App::new(command.name())));
  }
  (app, commands)
}

pub fn run() -> AnyResult<()> {
  let (arg_parser, commands) = create_complete_arg_parser();
  let matches = arg_parser.get_matches();

  let global_opts = GlobalOpts::from_matches(&matches);
  logging::set_verbosity(global_opts.verbosity);
  if !global_opts.no_banner_message {
    logging::print_banner_message();
  }

  let (command_name, command_matches) = matches.subcommand().unwrap();
  let command = commands.iter().find(|command| command.name() == command_name).unwrap();
  command.run(global_opts, command_matches)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOrStdStream {
  File(PathBuf),
  StdStream,
}

const STD_STREAM_STR: &str = "-";

impl FileOrStdStream {
  pub fn display_name(&self) -> Cow<str> {
    match self {
      Self::File(path) => path.to_string_lossy(),
      Self::StdStream => Cow::Borrowed("<stdin>"),
    }
  }

  pub fn read_to_string(&self) -> io::Result<String> {
    match self {
      Self::File(path) => fs::read_to_string(path),
      Self::StdStream => {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
      }
    }
  }
}

impl<T: ?Sized + AsRef<OsStr>> From<&T> for FileOrStdStream {
  fn from(s: &T) -> Self { Self::from(s.as_ref().to_os_string()) }
}

impl From<OsString> for FileOrStdStream {
  fn from(v: OsString) -> Self {
    if v == STD_STREAM_STR {
      Self::StdStream
    } else {
      Self::File(PathBuf::from(v))
    }
  }
}
