mod cli;

use std::{
    fmt,
    io::{self, Write},
    process::{ExitCode, Output},
};

use clap::Parser as _;

use c2java::{
    checker::Checker,
    classify,
    codegen::{self, Options},
    driver::{self, Toolchain},
    lexer, parser,
    util::fmt::{tree, LineCol},
    Error,
};

use crate::cli::{Cli, Command, Emit};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("{0}")]
    Translate(String),

    #[error("compilation failed: {0}")]
    Compile(#[source] driver::Error),

    #[error("execution failed: {0}")]
    Run(#[source] driver::Error),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Io(_) | CliError::Translate(_) => 1,
            CliError::Compile(_) => 2,
            CliError::Run(_) => 3,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let verbose = cli.verbose;

    match cli.command {
        Command::Build {
            input,
            out_dir,
            class_name,
            no_run,
            javac,
            java,
        } => {
            let (name, source) = input.load()?;
            progress(verbose, format_args!("translating {name}"));

            let options = Options { class_name };
            let code = c2java::translate(&source, &options)
                .map_err(|error| diagnose(&name, &source, &error))?;

            let path = driver::write_source(&out_dir, &options.class_name, &code)?;
            progress(verbose, format_args!("wrote {}", path.display()));

            let toolchain = Toolchain { javac, java };
            let compiled = toolchain.compile(&path).map_err(CliError::Compile)?;
            forward(&compiled)?;
            progress(verbose, format_args!("compilation successful"));

            if no_run {
                return Ok(());
            }

            let ran = toolchain
                .run(&out_dir, &options.class_name)
                .map_err(CliError::Run)?;
            forward(&ran)?;
            progress(verbose, format_args!("execution successful"));
        }

        Command::Emit {
            input,
            emit,
            class_name,
        } => {
            let (name, source) = input.load()?;
            let options = Options { class_name };
            let out = emit_stage(&source, emit, &options)
                .map_err(|error| diagnose(&name, &source, &error))?;
            io::stdout().write_all(out.as_bytes())?;
        }
    }

    Ok(())
}

fn emit_stage(src: &str, emit: Emit, options: &Options) -> Result<String, Error> {
    let tokens = lexer::tokenize(src)?;
    match emit {
        Emit::Tokens => Ok(tokens
            .iter()
            .map(|token| format!("{}\n", token.display(src)))
            .collect()),
        Emit::Classify => Ok(classify::report(src, &tokens)),
        Emit::Ast | Emit::Java => {
            let program = parser::parse(src, &tokens)?;
            let (program, _) = Checker::new().check(program);
            if emit == Emit::Ast {
                Ok(tree::print_tree_string(&program))
            } else {
                Ok(codegen::generate(&program, options)?)
            }
        }
    }
}

/// Renders a pipeline error with the `name:line:col` of its position.
fn diagnose(name: &str, src: &str, error: &Error) -> CliError {
    let message = match error {
        Error::Lexical(error) => {
            let at = LineCol::locate(src, error.span.lo);
            format!("{name}:{at}: {}", error.inner)
        }
        Error::Syntax(error) => {
            let at = LineCol::locate(src, error.span.lo);
            format!("{name}:{at}: {}", error.inner)
        }
        Error::Codegen(error) => format!("{name}: {error}"),
    };
    CliError::Translate(message)
}

/// Passes a tool's captured output through to ours.
fn forward(output: &Output) -> io::Result<()> {
    io::stdout().write_all(&output.stdout)?;
    io::stderr().write_all(&output.stderr)
}

fn progress(verbose: bool, message: fmt::Arguments<'_>) {
    if verbose {
        eprintln!("{message}");
    }
}
