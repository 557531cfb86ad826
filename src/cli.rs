//! Command-line interface for shell-console.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Working directory for the wrapped program.
    pub working_dir: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Program to spawn (first positional argument).
    pub program: Option<String>,
    /// Arguments for the program (remaining positionals).
    pub program_args: Vec<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('d') | Long("workdir") => {
                result.working_dir = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                // First positional is the program; everything after it
                // belongs to the program verbatim.
                result.program = Some(val.to_string_lossy().into());
                for rest in parser.raw_args()? {
                    result.program_args.push(rest.to_string_lossy().into());
                }
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"shell-console {version}
Styled live console for interactive subprocess output

USAGE:
    shell-console [OPTIONS] [PROGRAM [ARGS...]]

ARGS:
    PROGRAM                 Interactive program to wrap [default: $SHELL]
    ARGS                    Arguments passed to the program verbatim

OPTIONS:
    -c, --config <FILE>     Path to configuration file (JSON)
    -d, --workdir <DIR>     Working directory for the program
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    SHELL_CONSOLE_PROGRAM    Program to wrap (overrides config)
    SHELL_CONSOLE_WORKDIR    Working directory (overrides config)
    SHELL_CONSOLE_LOG_LEVEL  Log level (overrides config)
    RUST_LOG                 Alternative log level setting

EXAMPLES:
    # Wrap the default shell
    shell-console

    # Wrap a specific interactive program
    shell-console ./bin/terminal_app

    # Wrap a program with its own arguments
    shell-console python3 -i

    # Start with config file
    shell-console -c /etc/shell-console/config.json
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("shell-console {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
