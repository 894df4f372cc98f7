//! Parsing of command scripts.

/// What a `P` command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrintTarget {
    /// Every live scope, innermost first.
    All,

    /// The current scope only.
    Current,
}

/// A single line of a command script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `I <name> <token> [<semantic> [<data>...]]`
    Insert {
        /// The declared name.
        name: String,

        /// The token type of the declaration.
        token_type: String,

        /// The semantic type, if given.
        semantic_type: Option<String>,

        /// Auxiliary data strings; only present after a semantic type.
        data: Vec<String>,
    },

    /// `L <name>`
    Lookup(String),

    /// `D <name>`
    Delete(String),

    /// `P A` or `P C`
    Print(PrintTarget),

    /// `S`
    EnterScope,

    /// `E`
    ExitScope,
}

/// The reason a script line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// The first word is not a known command.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    /// A required operand is absent.
    #[error("`{command}` expects {operand}")]
    MissingOperand {
        /// The command letter.
        command: &'static str,

        /// A description of the missing operand.
        operand: &'static str,
    },

    /// The command was given more operands than it takes.
    #[error("unexpected operand `{0}`")]
    TrailingOperand(String),

    /// `P` was followed by something other than `A` or `C`.
    #[error("`P` expects `A` or `C`, found `{0}`")]
    InvalidPrintTarget(String),
}

/// A script line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// The one-based line number.
    pub line: usize,

    /// What went wrong.
    pub kind: ParseErrorKind,
}

fn expect<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    operand: &'static str,
) -> Result<String, ParseErrorKind> {
    words
        .next()
        .map(str::to_owned)
        .ok_or(ParseErrorKind::MissingOperand { command, operand })
}

fn finish<'a>(
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<(), ParseErrorKind> {
    words.next().map_or(Ok(()), |word| {
        Err(ParseErrorKind::TrailingOperand(word.to_owned()))
    })
}

fn parse_line(line: &str) -> Result<Option<Command>, ParseErrorKind> {
    let mut words = line.split_whitespace();

    let Some(head) = words.next() else {
        return Ok(None);
    };

    if head.starts_with('#') {
        return Ok(None);
    }

    let command = match head {
        "I" => {
            let name = expect(&mut words, "I", "a name")?;
            let token_type = expect(&mut words, "I", "a token type")?;
            let semantic_type = words.next().map(str::to_owned);
            let data = words.by_ref().map(str::to_owned).collect();

            Command::Insert { name, token_type, semantic_type, data }
        }
        "L" => Command::Lookup(expect(&mut words, "L", "a name")?),
        "D" => Command::Delete(expect(&mut words, "D", "a name")?),
        "P" => match expect(&mut words, "P", "`A` or `C`")?.as_str() {
            "A" => Command::Print(PrintTarget::All),
            "C" => Command::Print(PrintTarget::Current),
            other => {
                return Err(ParseErrorKind::InvalidPrintTarget(other.to_owned()))
            }
        },
        "S" => Command::EnterScope,
        "E" => Command::ExitScope,
        unknown => {
            return Err(ParseErrorKind::UnknownCommand(unknown.to_owned()))
        }
    };

    finish(&mut words)?;

    Ok(Some(command))
}

/// Parses a whole script. Blank lines and lines starting with `#` are
/// skipped.
///
/// # Errors
///
/// Returns the first line that fails to parse.
pub fn parse(source: &str) -> Result<Vec<Command>, ParseError> {
    let mut commands = Vec::new();

    for (index, line) in source.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(kind) => return Err(ParseError { line: index + 1, kind }),
        }
    }

    Ok(commands)
}
