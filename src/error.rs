use crate::input::Input;
use crate::value::ValueType;
use nom::error::{ErrorKind, ParseError};
use std::fmt::{self, Display};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Malformed input at the character level: bad number, string or keyword,
    /// illegal character.
    Parse,
    /// A token in a grammar position where it is not valid.
    Syntax,
    /// An accessor was used against a value of another type.
    Type,
    /// A well-formed tree does not have the expected shape.
    Data,
    /// Array position out of bounds.
    Index,
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parse => "ParseError",
            Self::Syntax => "SyntaxError",
            Self::Type => "TypeError",
            Self::Data => "DataError",
            Self::Index => "IndexError",
        };

        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Error {
    pub kind: Kind,
    /// Source line the error refers to, when one is known.
    pub line: Option<usize>,
    pub message: String,
}

impl Error {
    pub fn new(kind: Kind, line: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    pub fn parse(line: usize, message: impl Display) -> Self {
        Self::new(Kind::Parse, Some(line), format!("Line {}: {}", line, message))
    }

    pub fn syntax(line: usize, message: impl Display) -> Self {
        Self::new(Kind::Syntax, Some(line), format!("Line {}: {}", line, message))
    }

    /// `line` is the line of the offending value, 0 when unknown.
    pub fn type_mismatch(expected: ValueType, actual: ValueType, line: usize) -> Self {
        if line == 0 {
            Self::new(
                Kind::Type,
                None,
                format!("Expected {}, not {}", expected, actual),
            )
        } else {
            Self::new(
                Kind::Type,
                Some(line),
                format!("Expected {}, not {} on line {}", expected, actual, line),
            )
        }
    }

    pub fn data(line: usize, message: impl Into<String>) -> Self {
        Self::new(Kind::Data, known(line), message)
    }

    pub fn index(index: usize, len: usize, line: usize) -> Self {
        let mut message = format!("Index {} is out of bounds for array of length {}", index, len);
        if line != 0 {
            message.push_str(&format!(" on line {}", line));
        }

        Self::new(Kind::Index, known(line), message)
    }

    pub fn io(error: std::io::Error) -> Self {
        Self::new(Kind::Parse, None, format!("Unable to read input: {}", error))
    }

    pub fn is(&self, kind: Kind) -> bool {
        self.kind == kind
    }
}

fn known(line: usize) -> Option<usize> {
    (line != 0).then_some(line)
}

impl<'a> ParseError<Input<'a>> for Error {
    fn from_error_kind(input: Input<'a>, kind: ErrorKind) -> Self {
        Self::parse(input.line(), format!("Unexpected input ({})", kind.description()))
    }

    fn append(_input: Input<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}
