//! Persists generated code and runs the external Java toolchain over it.
//!
//! Failures here are about the toolchain, not about the translated program,
//! and are reported through their own [`Error`].

use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
    process::{Command, Output},
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("couldn't run {tool}: {source}")]
    Io {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error(
        "{tool} exited with code {code} and stderr output:\n{}",
        String::from_utf8_lossy(.stderr)
    )]
    Exited {
        tool: String,
        code: i32,
        stderr: Vec<u8>,
    },

    #[error(
        "{tool} terminated with stderr output:\n{}",
        String::from_utf8_lossy(.stderr)
    )]
    Terminated { tool: String, stderr: Vec<u8> },
}

/// Writes `code` to `<out_dir>/<class_name>.java`, creating `out_dir` if
/// needed, and returns the written path.
pub fn write_source(out_dir: &Path, class_name: &str, code: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(format!("{class_name}.java"));
    fs::write(&path, code)?;
    Ok(path)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    pub javac: String,
    pub java: String,
}

impl Default for Toolchain {
    fn default() -> Toolchain {
        Toolchain {
            javac: "javac".to_owned(),
            java: "java".to_owned(),
        }
    }
}

impl Toolchain {
    /// Compiles a source file. Class files land next to the source.
    pub fn compile(&self, source: &Path) -> Result<Output, Error> {
        let mut cmd = Command::new(&self.javac);
        cmd.arg(source);
        execute(&self.javac, cmd)
    }

    /// Runs `class_name`, looking it up in `classpath`.
    pub fn run(&self, classpath: &Path, class_name: &str) -> Result<Output, Error> {
        let mut cmd = Command::new(&self.java);
        cmd.arg("-cp").arg(classpath).arg(class_name);
        execute(&self.java, cmd)
    }
}

fn execute(tool: impl AsRef<OsStr>, mut cmd: Command) -> Result<Output, Error> {
    let tool = tool.as_ref().to_string_lossy().into_owned();
    let output = match cmd.output() {
        Ok(output) => output,
        Err(source) => return Err(Error::Io { tool, source }),
    };

    if output.status.success() {
        Ok(output)
    } else {
        match output.status.code() {
            Some(code) => Err(Error::Exited {
                tool,
                code,
                stderr: output.stderr,
            }),

            None => Err(Error::Terminated {
                tool,
                stderr: output.stderr,
            }),
        }
    }
}
