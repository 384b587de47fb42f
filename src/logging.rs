use crate::impl_prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
  Quiet,
  Normal,
  Verbose,
}

impl Verbosity {
  pub fn level_filter(self) -> log::LevelFilter {
    match self {
      Self::Quiet => log::LevelFilter::Warn,
      Self::Normal => log::LevelFilter::Debug,
      Self::Verbose => log::LevelFilter::Trace,
    }
  }
}

/// Returns `false` if some other logger had been installed already.
pub fn init() -> bool {
  env_logger::try_init_from_env(env_logger::Env::default().default_filter_or(
    // The logging level of `env_logger` can't be changed once the logger has
    // been installed, so instead let's by default allow all logging levels on
    // the `env_logger` side, we will lower the logging level later on
    // ourselves on the `log` side.
    "trace",
  ))
  .is_ok()
}

pub fn set_verbosity(verbosity: Verbosity) {
  log::set_max_level(log::max_level().min(verbosity.level_filter()));
}

pub fn print_banner_message() {
  info!("{} v{}", crate::CRATE_NAME, crate::CRATE_NICE_VERSION);
}

pub fn report_critical_error_impl(
  error: AnyError,
  module_path: &'static str,
  file: &'static str,
  line: u32,
) {
  let thread = std::thread::current();
  let thread_name = thread.name().unwrap_or("<unnamed>");
  let error = error.context(format!("CRITICAL ERROR in thread '{}'", thread_name));
  let level = log::Level::Error;
  if log_enabled!(target: module_path, level) {
    log::logger().log(
      &log::Record::builder()
        .args(format_args!("{:?}", error))
        .level(level)
        .target(module_path)
        .module_path_static(Some(module_path))
        .file_static(Some(file))
        .line(Some(line))
        .build(),
    );
  } else {
    eprintln!("ERROR: {:?}", error);
  }
}

#[macro_export]
macro_rules! report_critical_error {
  ($error:expr $(,)?) => {
    $crate::logging::report_critical_error_impl($error, module_path!(), file!(), line!())
  };
}
