pub use anyhow::{
  ensure, format_err, Context as ResultContextExt, Error as AnyError, Result as AnyResult,
};
pub use log::{debug, error, info, log_enabled, warn};
pub use std::error::Error as StdError;
