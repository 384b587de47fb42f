use std::env;
use std::path::Path;
use std::process::Command;

fn main() {
  println!("cargo:rerun-if-changed=build.rs");
  export_nice_version();
}

/// Exposes `CARGO_PKG_NICE_VERSION`, which is the package version with the
/// hash and the date of the current commit appended, when building from a git
/// checkout. Outside of one the variable is simply not set.
fn export_nice_version() -> Option<()> {
  // <https://git-scm.com/docs/gitrepository-layout/>
  let git_dir = Path::new(".git");
  println!("cargo:rerun-if-changed={}", git_dir.join("HEAD").display());
  println!("cargo:rerun-if-changed={}", git_dir.join("refs").display());

  let version = env::var("CARGO_PKG_VERSION").ok()?;
  let git_output = Command::new("git")
    .arg(format!("--git-dir={}", git_dir.display()))
    .args(&["log", "-1", "--date=short", "--pretty=format:%h %cd"])
    .output()
    .ok()?;
  if !git_output.status.success() {
    return None;
  }

  let commit = String::from_utf8(git_output.stdout).ok()?;
  println!("cargo:rustc-env=CARGO_PKG_NICE_VERSION={} ({})", version, commit.trim());
  Some(())
}
