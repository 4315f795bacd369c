pub mod conf;
pub mod logging;
pub mod static_files;

pub use conf::{OptionsError, SendOptions, SendSettings};
pub use static_files::{SendOutcome, SendRequest, Sender, send};
