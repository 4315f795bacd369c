mod error;
mod options;

pub use error::OptionsError;
pub use options::*;
