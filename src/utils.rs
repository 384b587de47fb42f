pub mod json;
pub mod parsing;
