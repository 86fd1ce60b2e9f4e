//! Terminal title handling

use std::io::Write;

/// Sets the terminal title to the specified text
pub fn set_terminal_title(title: &str) {
    // ANSI escape sequence to set terminal title
    print!("\x1b]0;{}\x07", title);
    let _ = std::io::stdout().flush();
}

/// Shows a running title for the lifetime of a command and a done title afterwards
///
/// The done title is also set on early returns and errors.
pub struct TerminalTitle {
    done: String,
}

impl TerminalTitle {
    pub fn running(command: &str) -> Self {
        set_terminal_title(&format!("🚀 classroom {command}"));
        Self {
            done: format!("✅ classroom {command}"),
        }
    }
}

impl Drop for TerminalTitle {
    fn drop(&mut self) {
        set_terminal_title(&self.done);
    }
}
