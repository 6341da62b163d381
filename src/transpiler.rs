//! Transpiler boundary
//!
//! The engine never parses Python itself; transpilation is an injected
//! capability with a narrow text-to-text contract. The production
//! implementation shells out to an external command, the way the Brython
//! toolchain ships its own `python -> js` converters.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use crate::config::Config;
use crate::error::{BrycError, BrycResult};

/// Environment variable carrying the logical module name to the command
pub const MODULE_ENV: &str = "BRYC_MODULE";

/// Placeholder replaced with the module name in configured arguments
pub const MODULE_PLACEHOLDER: &str = "{module}";

/// Converts source text into target-language text.
pub trait Transpiler {
    fn transpile(&self, source: &str, module_name: &str) -> BrycResult<String>;
}

/// Transpiler backed by an external command.
///
/// Source text is written to the child's stdin, target text is read from
/// its stdout. A non-zero exit status fails that one module's conversion
/// with the captured stderr as the message.
#[derive(Debug, Clone)]
pub struct CommandTranspiler {
    program: String,
    args: Vec<String>,
}

impl CommandTranspiler {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from configuration; a missing command is a fatal configuration
    /// error, reported before any processing begins.
    pub fn from_config(config: &Config) -> BrycResult<Self> {
        match &config.transpiler.command {
            Some(command) => Ok(Self::new(command.clone(), config.transpiler.args.clone())),
            None => Err(BrycError::NoTranspiler),
        }
    }
}

impl Transpiler for CommandTranspiler {
    fn transpile(&self, source: &str, module_name: &str) -> BrycResult<String> {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.replace(MODULE_PLACEHOLDER, module_name))
            .collect();

        let mut child = Command::new(&self.program)
            .args(&args)
            .env(MODULE_ENV, module_name)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Feed stdin from its own thread: writing inline deadlocks once a
        // streaming child fills its stdout pipe while we are still pushing
        // input larger than the stdin pipe buffer.
        let mut stdin = child.stdin.take();
        let input = source.to_string();
        let writer = thread::spawn(move || match stdin.as_mut() {
            Some(stdin) => match stdin.write_all(input.as_bytes()) {
                // A child that exits without draining stdin is not a write
                // error; its exit status decides below.
                Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(e),
                _ => Ok(()),
            },
            None => Ok(()),
        });

        let output = child.wait_with_output()?;
        writer
            .join()
            .map_err(|_| io::Error::other("stdin writer thread panicked"))??;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(BrycError::TranspileFailed {
                module: module_name.to_string(),
                message,
            });
        }

        String::from_utf8(output.stdout).map_err(|_| BrycError::TranspileFailed {
            module: module_name.to_string(),
            message: "produced non-UTF-8 output".to_string(),
        })
    }
}

/// Deterministic in-process transpiler for tests: prefixes the source with
/// a module banner so artifacts are recognizable without a real toolchain.
#[cfg(test)]
pub struct StubTranspiler;

#[cfg(test)]
impl Transpiler for StubTranspiler {
    fn transpile(&self, source: &str, module_name: &str) -> BrycResult<String> {
        Ok(format!("// module {}\n{}", module_name, source))
    }
}
