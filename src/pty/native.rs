//! Native PTY implementation using portable-pty.

use portable_pty::{native_pty_system, CommandBuilder, PtySize as NativePtySize};
use std::io::{Read, Write};
use std::path::Path;

use super::{PtyHandle, PtySize};
use crate::error::ConsoleError;
use crate::Result;

/// Get the default shell for the current platform.
///
/// Used when no program to wrap is configured.
pub fn default_shell() -> &'static str {
    #[cfg(unix)]
    {
        std::env::var("SHELL")
            .ok()
            .map(|s| Box::leak(s.into_boxed_str()) as &'static str)
            .unwrap_or("/bin/sh")
    }
    #[cfg(windows)]
    {
        "powershell.exe"
    }
}

/// Wrapper around the native PTY system.
pub struct NativePty {
    pty_system: Box<dyn portable_pty::PtySystem + Send>,
}

impl NativePty {
    /// Create a new NativePty instance.
    pub fn new() -> Self {
        Self {
            pty_system: native_pty_system(),
        }
    }

    /// Spawn the wrapped program in a new PTY.
    ///
    /// # Arguments
    ///
    /// * `program` - The interactive program to run.
    /// * `args` - Arguments passed to the program.
    /// * `working_dir` - Optional working directory for the child.
    /// * `size` - The initial size of the PTY.
    ///
    /// # Returns
    ///
    /// A `PtyHandle` containing the reader, writer, and process ID.
    pub fn spawn(
        &self,
        program: &str,
        args: &[String],
        working_dir: Option<&Path>,
        size: PtySize,
    ) -> Result<PtyHandle<Box<dyn Read + Send>, Box<dyn Write + Send>>> {
        let native_size = NativePtySize {
            rows: size.rows,
            cols: size.cols,
            pixel_width: 0,
            pixel_height: 0,
        };

        let pair = self
            .pty_system
            .openpty(native_size)
            .map_err(|e| ConsoleError::Pty(e.to_string()))?;

        let mut cmd = CommandBuilder::new(program);
        for arg in args {
            cmd.arg(arg);
        }
        if let Some(dir) = working_dir {
            cmd.cwd(dir);
        }

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| ConsoleError::Pty(e.to_string()))?;

        let pid = child.process_id().unwrap_or(0);
        let killer = child.clone_killer();

        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| ConsoleError::Pty(e.to_string()))?;

        let writer = pair
            .master
            .take_writer()
            .map_err(|e| ConsoleError::Pty(e.to_string()))?;

        Ok(PtyHandle::new(
            reader,
            writer,
            pid,
            killer,
            Box::new((pair.master, child)),
        ))
    }

    /// Spawn the platform default shell with no arguments.
    pub fn spawn_default(
        &self,
        size: PtySize,
    ) -> Result<PtyHandle<Box<dyn Read + Send>, Box<dyn Write + Send>>> {
        self.spawn(default_shell(), &[], None, size)
    }
}

impl Default for NativePty {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shell() {
        let shell = default_shell();
        assert!(!shell.is_empty());

        #[cfg(unix)]
        {
            // Should be a valid path or command
            assert!(shell.starts_with('/') || !shell.contains('/'));
        }

        #[cfg(windows)]
        {
            assert!(shell.ends_with(".exe"));
        }
    }

    #[test]
    fn test_spawn_default_shell() {
        let pty = NativePty::new();
        let handle = pty.spawn_default(PtySize::default());

        assert!(handle.is_ok(), "Failed to spawn shell: {:?}", handle.err());

        let handle = handle.unwrap();
        assert!(handle.pid > 0, "PID should be positive");
    }

    #[test]
    #[cfg(unix)]
    fn test_spawn_with_args_and_dir() {
        let pty = NativePty::new();
        let handle = pty.spawn(
            "/bin/sh",
            &["-i".to_string()],
            Some(Path::new("/tmp")),
            PtySize::new(40, 120),
        );

        assert!(handle.is_ok());
    }

    #[test]
    #[cfg(unix)]
    fn test_kill_ends_output_stream() {
        let pty = NativePty::new();
        let mut handle = pty
            .spawn("/bin/sleep", &["30".to_string()], None, PtySize::default())
            .unwrap();

        handle.killer.kill().unwrap();

        // With the child gone the master read terminates (EOF or EIO)
        // instead of blocking for the remaining 30 seconds.
        let mut buf = Vec::new();
        let _ = handle.reader.read_to_end(&mut buf);
    }
}
