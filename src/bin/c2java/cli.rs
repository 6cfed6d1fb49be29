use std::{fs, io, path::PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

use c2java::codegen::DEFAULT_CLASS_NAME;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print progress to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Translate a program, then compile and run it with the Java toolchain.
    Build {
        #[command(flatten)]
        input: Input,

        /// Directory the Java source and class files are written to.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Name of the generated class.
        #[arg(long, default_value = DEFAULT_CLASS_NAME, value_parser = java_identifier)]
        class_name: String,

        /// Stop after compiling.
        #[arg(long)]
        no_run: bool,

        /// The Java compiler.
        #[arg(long, default_value = "javac")]
        javac: String,

        /// The Java launcher.
        #[arg(long, default_value = "java")]
        java: String,
    },

    /// Print the output of one pipeline stage to stdout.
    Emit {
        #[command(flatten)]
        input: Input,

        /// What to print.
        #[arg(long, value_enum, default_value_t = Emit::Java)]
        emit: Emit,

        /// Name of the generated class.
        #[arg(long, default_value = DEFAULT_CLASS_NAME, value_parser = java_identifier)]
        class_name: String,
    },
}

#[derive(Args)]
pub struct Input {
    /// The input file.
    pub input: String,

    /// Whether the given input should be used directly as the source instead
    /// of as the source file path.
    #[arg(long, short, action)]
    pub source: bool,
}

impl Input {
    /// Returns the display name and the text of the input.
    pub fn load(&self) -> io::Result<(String, String)> {
        if self.source {
            Ok(("<source>".to_owned(), self.input.clone()))
        } else {
            let source = fs::read_to_string(&self.input)?;
            Ok((self.input.clone(), source))
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum Emit {
    /// The token stream.
    Tokens,
    /// Lexemes grouped by lexical class.
    Classify,
    /// The syntax tree.
    Ast,
    /// The generated Java source.
    Java,
}

/// Words Java doesn't accept as a class name: keywords, literals and the
/// restricted type identifiers.
static JAVA_RESERVED: phf::Set<&'static str> = phf::phf_set! {
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch",
    "char", "class", "const", "continue", "default", "do", "double", "else",
    "enum", "extends", "false", "final", "finally", "float", "for", "goto",
    "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "permits", "private", "protected",
    "public", "record", "return", "sealed", "short", "static", "strictfp",
    "super", "switch", "synchronized", "this", "throw", "throws", "transient",
    "true", "try", "var", "void", "volatile", "while", "yield",
};

fn java_identifier(name: &str) -> Result<String, String> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        Err(format!("{name:?} is not a valid Java class name"))
    } else if JAVA_RESERVED.contains(name) {
        Err(format!("{name:?} is reserved in Java"))
    } else {
        Ok(name.to_owned())
    }
}
