pub mod conditional;
mod directory;
mod error;
pub mod etag;
mod file;
pub(crate) mod headers;
pub mod html;
pub mod range;

pub(crate) use directory::render_directory;
pub(crate) use error::render_error;
pub(crate) use file::render_file;
