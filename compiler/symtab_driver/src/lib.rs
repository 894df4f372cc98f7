//! Drives a [`ScopeStack`] from a command script.
//!
//! Each line of the script declares, resolves or removes a name, opens or
//! closes a scope, or dumps the table. Successful commands write a line to
//! the output; failed ones become [`Diagnostic`]s sent to a [`Handler`].

use std::{io::Write, num::NonZeroUsize, path::PathBuf, process::ExitCode};

use command::{Command, ParseError, PrintTarget};
use log::info;
use symtab_handler::{Counter, Handler};
use symtab_table::{DuplicateNameError, ScopeStack, SymbolRecord};

pub mod command;

#[cfg(test)]
mod tests;

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "symtab",
    about = "Runs a command script against a scoped symbol table",
    author = "Simmypeet"
)]
pub struct Arguments {
    /// The command script to run.
    pub file: PathBuf,

    /// The number of hash buckets in every scope.
    #[clap(short, long, default_value = "7")]
    pub buckets: NonZeroUsize,

    /// Prints the whole table after the last command.
    #[clap(short, long)]
    pub dump_on_exit: bool,
}

/// A command that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    /// `I` named a symbol the current scope already declares.
    #[error("{0}")]
    DuplicateName(DuplicateNameError),

    /// `L` named a symbol no enclosing scope declares.
    #[error("`{0}` is not declared in any enclosing scope")]
    Undeclared(String),

    /// `D` named a symbol the current scope does not declare.
    #[error("`{0}` is not declared in the current scope")]
    NotInCurrentScope(String),

    /// `E` was issued while only the root scope was open.
    #[error("the root scope cannot be exited")]
    RootScopeExit,
}

/// Everything that stops a script from running to completion.
#[derive(Debug, thiserror::Error, derive_more::From)]
pub enum Error {
    /// The script could not be read, or the output could not be written.
    #[error("{0}")]
    Io(std::io::Error),

    /// The script is malformed.
    #[error("{0}")]
    Parse(ParseError),
}

/// Runs every command against `table`, writing results to `out` and failures
/// to `handler`.
///
/// # Errors
///
/// Only fails if writing to `out` fails.
pub fn execute(
    commands: &[Command],
    table: &mut ScopeStack,
    out: &mut impl Write,
    handler: &dyn Handler<Diagnostic>,
) -> std::io::Result<()> {
    for command in commands {
        match command {
            Command::Insert { name, token_type, semantic_type, data } => {
                let record = match semantic_type {
                    Some(semantic_type) => SymbolRecord::with_data(
                        name.as_str(),
                        token_type.as_str(),
                        semantic_type.as_str(),
                        data.clone(),
                    ),
                    None => {
                        SymbolRecord::new(name.as_str(), token_type.as_str())
                    }
                };
                let rendered = record.to_string();

                match table.insert_record(record) {
                    Ok(position) => writeln!(
                        out,
                        "Inserted {rendered} in ScopeTable# {} at position \
                         {position}",
                        table.current_scope().id()
                    )?,
                    Err(error) => {
                        handler.receive(Diagnostic::DuplicateName(error));
                    }
                }
            }

            Command::Lookup(name) => {
                let found = table.locate(name).and_then(|location| {
                    table
                        .scope(location.scope())
                        .map(|scope| (scope.id(), location.position()))
                });

                match found {
                    Some((id, position)) => writeln!(
                        out,
                        "Found in ScopeTable# {id} at position {position}"
                    )?,
                    None => {
                        handler.receive(Diagnostic::Undeclared(name.clone()));
                    }
                }
            }

            Command::Delete(name) => match table.remove(name) {
                Some((_, position)) => writeln!(
                    out,
                    "Deleted entry {position} from current ScopeTable"
                )?,
                None => handler
                    .receive(Diagnostic::NotInCurrentScope(name.clone())),
            },

            Command::Print(PrintTarget::All) => write!(out, "{table}")?,

            Command::Print(PrintTarget::Current) => {
                write!(out, "{}", table.current_scope())?;
            }

            Command::EnterScope => {
                table.enter_scope();
                writeln!(
                    out,
                    "New ScopeTable with id {} created",
                    table.current_scope().id()
                )?;
            }

            Command::ExitScope => match table.exit_scope() {
                Some(scope) => {
                    writeln!(out, "ScopeTable with id {} removed", scope.id())?;
                }
                None => handler.receive(Diagnostic::RootScopeExit),
            },
        }
    }

    Ok(())
}

/// Loads the script named by `argument`, runs it on a fresh table and
/// returns that table.
///
/// # Errors
///
/// See [`Error`]. Failed commands are not errors; they go to `handler`.
pub fn interpret(
    argument: &Arguments,
    out: &mut impl Write,
    handler: &dyn Handler<Diagnostic>,
) -> Result<ScopeStack, Error> {
    let source = std::fs::read_to_string(&argument.file)?;
    let commands = command::parse(&source)?;

    info!(
        "running {} commands from {} with {} buckets",
        commands.len(),
        argument.file.display(),
        argument.buckets
    );

    let mut table = ScopeStack::new(argument.buckets);
    execute(&commands, &mut table, out, handler)?;

    if argument.dump_on_exit {
        write!(out, "{table}")?;
    }

    Ok(table)
}

/// A [`Handler`] that prints every diagnostic to the standard error stream
/// and remembers whether it printed anything.
#[derive(Debug, Default)]
struct Printer {
    counter: Counter,
}

impl Printer {
    fn has_printed(&self) -> bool { self.counter.count() > 0 }
}

impl Handler<Diagnostic> for Printer {
    fn receive(&self, diagnostic: Diagnostic) {
        eprintln!("error: {diagnostic}");
        self.counter.receive(diagnostic);
    }
}

/// Runs the program with the given arguments.
#[must_use]
pub fn run(argument: Arguments) -> ExitCode {
    let printer = Printer::default();
    let mut stdout = std::io::stdout().lock();

    match interpret(&argument, &mut stdout, &printer) {
        Ok(_) if printer.has_printed() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {}: {error}", argument.file.display());
            ExitCode::FAILURE
        }
    }
}
