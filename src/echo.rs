//! Command echo formatting.
//!
//! When the user submits a command it is shown in the display before the
//! raw text is forwarded to the subprocess. The echo is three styled
//! segments in prompt order: identity, working directory, and the
//! literal command.

use crate::render::{StyleTag, StyledRun};

/// Styled segments echoing a submitted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEcho {
    /// `user@host:` in green.
    pub identity: StyledRun,
    /// `cwd$ ` in blue.
    pub cwd: StyledRun,
    /// The literal command plus a newline, unstyled.
    pub command: StyledRun,
}

impl CommandEcho {
    /// The segments in display order.
    pub fn segments(&self) -> [&StyledRun; 3] {
        [&self.identity, &self.cwd, &self.command]
    }
}

/// Build the echo segments for a submitted command.
pub fn format_command(user: &str, host: &str, cwd: &str, command: &str) -> CommandEcho {
    CommandEcho {
        identity: StyledRun::new(format!("{}@{}:", user, host), StyleTag::Green),
        cwd: StyledRun::new(format!("{}$ ", cwd), StyleTag::Blue),
        command: StyledRun::new(format!("{}\n", command), StyleTag::Default),
    }
}

/// Build the echo segments from the current environment.
pub fn echo_current(command: &str) -> CommandEcho {
    format_command(
        &current_user(),
        &current_host(),
        &current_dir_display(),
        command,
    )
}

/// The raw text written to the subprocess input: the command plus one
/// newline. The write must be flushed immediately.
pub fn wire_format(command: &str) -> String {
    format!("{}\n", command)
}

/// Current user name, or `"user"` if it cannot be determined.
pub fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "user".to_string())
}

/// Current host name, or `"host"` if it cannot be determined.
pub fn current_host() -> String {
    std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .unwrap_or_else(|_| "host".to_string())
}

/// Current working directory for display, or `"~"` if unavailable.
pub fn current_dir_display() -> String {
    std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "~".to_string())
}
