use std::{io::Write as _, num::NonZeroUsize};

use symtab_handler::{Handler as _, Storage};
use symtab_table::{Position, ScopeStack};

use crate::{
    command::{self, Command, ParseError, ParseErrorKind, PrintTarget},
    execute, interpret, Arguments, Diagnostic, Error, Printer,
};

fn run_script(source: &str) -> (String, Vec<Diagnostic>) {
    let commands = command::parse(source).unwrap();
    let mut table = ScopeStack::new(NonZeroUsize::new(7).unwrap());
    let mut out = Vec::new();
    let storage = Storage::<Diagnostic>::new();

    execute(&commands, &mut table, &mut out, &storage).unwrap();

    (String::from_utf8(out).unwrap(), storage.into_vec())
}

#[test]
fn parse_skips_blank_and_comment_lines() {
    let commands = command::parse(
        "# declarations\n\nI foo FUNCTION int float x\n  L foo  \nP A\nP \
         C\nS\nE\nD foo\n",
    )
    .unwrap();

    assert_eq!(commands, [
        Command::Insert {
            name: "foo".to_owned(),
            token_type: "FUNCTION".to_owned(),
            semantic_type: Some("int".to_owned()),
            data: vec!["float".to_owned(), "x".to_owned()],
        },
        Command::Lookup("foo".to_owned()),
        Command::Print(PrintTarget::All),
        Command::Print(PrintTarget::Current),
        Command::EnterScope,
        Command::ExitScope,
        Command::Delete("foo".to_owned()),
    ]);
}

#[test]
fn parse_reports_line_of_first_error() {
    assert_eq!(
        command::parse("S\n\nI foo\n"),
        Err(ParseError {
            line: 3,
            kind: ParseErrorKind::MissingOperand {
                command: "I",
                operand: "a token type",
            },
        })
    );
    assert_eq!(
        command::parse("L a b").unwrap_err().kind,
        ParseErrorKind::TrailingOperand("b".to_owned())
    );
    assert_eq!(
        command::parse("P X").unwrap_err().kind,
        ParseErrorKind::InvalidPrintTarget("X".to_owned())
    );
    assert_eq!(
        command::parse("Q").unwrap_err().to_string(),
        "line 1: unknown command `Q`"
    );
}

#[test]
fn script_output_and_diagnostics() {
    let (out, diagnostics) = run_script(
        "I a ID\nI h ID\nI a NUMBER\nL h\nS\nI a FUNCTION\nL a\nD h\nP \
         C\nE\nE\nD a\nL a\nL zzz\n",
    );

    assert_eq!(
        out,
        "Inserted <a, ID> in ScopeTable# 1 at position 6, 0\nInserted <h, \
         ID> in ScopeTable# 1 at position 6, 1\nFound in ScopeTable# 1 at \
         position 6, 1\nNew ScopeTable with id 1.1 created\nInserted <a, \
         FUNCTION> in ScopeTable# 1.1 at position 6, 0\nFound in ScopeTable# \
         1.1 at position 6, 0\n\n\tScopetable # 1.1\n\n\t\tBucket 6 : <a, \
         FUNCTION>\nScopeTable with id 1.1 removed\nDeleted entry 6, 0 from \
         current ScopeTable\n"
    );
    assert_eq!(diagnostics, [
        Diagnostic::DuplicateName(symtab_table::DuplicateNameError {
            name: "a".to_owned(),
            position: Position::new(6, 0),
        }),
        Diagnostic::NotInCurrentScope("h".to_owned()),
        Diagnostic::RootScopeExit,
        Diagnostic::Undeclared("a".to_owned()),
        Diagnostic::Undeclared("zzz".to_owned()),
    ]);
}

#[test]
fn interpret_reads_script_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "I x ID int\nS\nI y ID").unwrap();

    let argument = Arguments {
        file: file.path().to_path_buf(),
        buckets: NonZeroUsize::new(3).unwrap(),
        dump_on_exit: true,
    };
    let storage = Storage::<Diagnostic>::new();
    let mut out = Vec::new();

    let table = interpret(&argument, &mut out, &storage).unwrap();

    assert!(storage.is_empty());
    assert_eq!(table.scope_count(), 2);
    assert_eq!(table.current_scope().table().bucket_count(), 3);
    assert_eq!(table.lookup("x").unwrap().semantic_type(), Some("int"));

    let out = String::from_utf8(out).unwrap();
    assert!(out.ends_with(
        "==========================------X------=================================\n"
    ));
    assert!(out.contains("\tScopetable # 1.1\n"));
}

#[test]
fn interpret_surfaces_parse_and_io_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "I x ID\nX").unwrap();

    let mut argument = Arguments {
        file: file.path().to_path_buf(),
        buckets: NonZeroUsize::new(7).unwrap(),
        dump_on_exit: false,
    };

    let result = interpret(
        &argument,
        &mut Vec::<u8>::new(),
        &Storage::<Diagnostic>::new(),
    );
    assert!(matches!(result, Err(Error::Parse(ParseError { line: 2, .. }))));

    argument.file = file.path().with_extension("missing");

    let result = interpret(
        &argument,
        &mut Vec::<u8>::new(),
        &Storage::<Diagnostic>::new(),
    );
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn printer_remembers_printed_diagnostics() {
    let printer = Printer::default();
    assert!(!printer.has_printed());

    printer.receive(Diagnostic::RootScopeExit);
    printer.receive(Diagnostic::Undeclared("zzz".to_owned()));

    assert!(printer.has_printed());
    assert_eq!(printer.counter.count(), 2);
}
