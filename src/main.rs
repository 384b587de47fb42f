fn main() {
  po2json::logging::init();
  if let Err(err) = po2json::cli::run() {
    po2json::report_critical_error!(err);
    std::process::exit(1);
  }
}
