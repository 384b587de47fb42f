#![deny(missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod cli;
pub mod gettext_po;
pub mod impl_prelude;
pub mod logging;
pub mod po_json;
pub mod utils;

pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
pub const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CRATE_NICE_VERSION: &str = match option_env!("CARGO_PKG_NICE_VERSION") {
  Some(v) => v,
  None => CRATE_VERSION,
};

pub use po_json::{convert, Conversion, Document, MessageRecord};
