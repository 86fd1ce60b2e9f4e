pub(crate) mod fs;
pub(crate) mod terminal;

// Public API - utilities used by commands
pub use fs::{copy_file, create_file_if_absent, expand_home};
pub use terminal::{set_terminal_title, TerminalTitle};
