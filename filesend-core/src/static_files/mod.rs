mod body;
mod error;
pub mod fs;
pub mod handler;
mod hooks;
pub mod mime;
pub mod render;
pub mod resolve;
mod response;

#[cfg(test)]
mod tests;

pub use body::SendBody;
pub use error::SendError;
pub use fs::{FileStat, FileSystem, TokioFs};
pub use handler::{Sender, send};
pub use hooks::{DirectoryHook, ErrorHook, FileHook, SendHooks};
pub use mime::{MimeGuess, MimeLookup};
pub use response::{ConditionalHeaders, OutcomeKind, ResponseFragment, SendOutcome, SendRequest};
