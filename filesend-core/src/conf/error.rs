use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("{option} option must be a string, a list of strings, or false")]
    InvalidList { option: &'static str },

    #[error("{option} option must not contain empty names")]
    EmptyName { option: &'static str },

    #[error("invalid root directory {}: {source}", path.display())]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
