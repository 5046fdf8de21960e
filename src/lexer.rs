use crate::error::{Error, Kind, Result};
use crate::input::Input;
use nom::{
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, anychar, char, digit1, one_of},
    combinator::opt,
    Err, IResult, Offset, Slice,
};
use std::fmt::{self, Display};
use tracing::trace;

type LexResult<'a, R> = IResult<Input<'a>, R, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    String(String),
    Number(f64),
    True,
    False,
    Null,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
    Eof,
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(_) => write!(f, "string"),
            Self::Number(_) => write!(f, "number"),
            Self::True => write!(f, "'true'"),
            Self::False => write!(f, "'false'"),
            Self::Null => write!(f, "'null'"),
            Self::LeftBrace => write!(f, "'{{'"),
            Self::RightBrace => write!(f, "'}}'"),
            Self::LeftBracket => write!(f, "'['"),
            Self::RightBracket => write!(f, "']'"),
            Self::Colon => write!(f, "':'"),
            Self::Comma => write!(f, "','"),
            Self::Eof => write!(f, "end of file"),
        }
    }
}

fn fail(i: Input, message: impl Display) -> Err<Error> {
    Err::Failure(Error::parse(i.line(), message))
}

// Same set as C `isspace`, vertical tab and form feed included.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn line_comment(i: Input) -> LexResult<()> {
    let (i, _) = tag("//")(i)?;

    let rest = match memchr::memchr(b'\n', i.fragment().as_bytes()) {
        Some(n) => i.slice(n + 1..),
        None => i.exhausted(),
    };

    Ok((rest, ()))
}

// Block comments do not nest, and an unclosed one runs to the end of input.
fn block_comment(i: Input) -> LexResult<()> {
    let (i, _) = tag("/*")(i)?;

    let rest = match memchr::memmem::find(i.fragment().as_bytes(), b"*/") {
        Some(n) => i.slice(n + 2..),
        None => i.exhausted(),
    };

    Ok((rest, ()))
}

fn trivia(mut i: Input) -> LexResult<()> {
    loop {
        let (rest, _) = take_while(is_space)(i)?;

        i = match line_comment(rest).or_else(|_| block_comment(rest)) {
            Ok((after, _)) => after,
            Err(_) => return Ok((rest, ())),
        };
    }
}

fn unescape(c: char) -> char {
    match c {
        'b' => '\x08',
        'f' => '\x0C',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        other => other,
    }
}

fn string(i: Input) -> LexResult<String> {
    let (mut i, _) = char('"')(i)?;
    let mut value = String::new();

    loop {
        let bytes = i.fragment().as_bytes();

        let Some(n) = memchr::memchr2(b'"', b'\\', bytes) else {
            return Err(fail(i.exhausted(), "Unterminated string"));
        };

        value.push_str(&i.fragment()[..n]);
        let closing = bytes[n] == b'"';
        i = i.slice(n + 1..);

        if closing {
            return Ok((i, value));
        }

        let (rest, escaped) =
            anychar(i).map_err(|_: Err<Error>| fail(i, "Unterminated string"))?;
        value.push(unescape(escaped));
        i = rest;
    }
}

fn number(i: Input) -> LexResult<f64> {
    let start = i;

    let (i, _) = opt(char('-'))(i)?;
    let (i, _) = digit1(i).map_err(|_: Err<Error>| fail(i, "after sign must be numbers"))?;

    let (i, point) = opt(char('.'))(i)?;
    let i = match point {
        Some(_) => {
            digit1(i)
                .map_err(|_: Err<Error>| fail(i, "after decimal point must be numbers"))?
                .0
        }
        None => i,
    };

    let (i, exponent) = opt(one_of("eE"))(i)?;
    let i = match exponent {
        Some(_) => {
            let (i, _) = opt(one_of("+-"))(i)?;
            digit1(i)
                .map_err(|_: Err<Error>| fail(i, "bad format of exponent"))?
                .0
        }
        None => i,
    };

    let text = &start.fragment()[..start.offset(&i)];

    text.parse::<f64>()
        .map(|number| (i, number))
        .map_err(|_| fail(i, format!("Invalid number {}", text)))
}

fn keyword(i: Input) -> LexResult<Token> {
    let (rest, word) = alpha1(i)?;

    let token = match word.fragment() {
        "true" => Token::True,
        "false" => Token::False,
        "null" => Token::Null,
        other => return Err(fail(rest, format!("Unknown keyword {}", other))),
    };

    Ok((rest, token))
}

fn structural(i: Input) -> LexResult<Token> {
    let (rest, c) = one_of("{}[]:,")(i)?;

    let token = match c {
        '{' => Token::LeftBrace,
        '}' => Token::RightBrace,
        '[' => Token::LeftBracket,
        ']' => Token::RightBracket,
        ':' => Token::Colon,
        _ => Token::Comma,
    };

    Ok((rest, token))
}

fn token(i: Input) -> LexResult<Token> {
    let (i, _) = trivia(i)?;

    let Some(first) = i.fragment().chars().next() else {
        return Ok((i, Token::Eof));
    };

    match first {
        '"' => string(i).map(|(i, s)| (i, Token::String(s))),
        '-' | '0'..='9' => number(i).map(|(i, n)| (i, Token::Number(n))),
        c if c.is_ascii_alphabetic() => keyword(i),
        '{' | '}' | '[' | ']' | ':' | ',' => structural(i),
        c => Err(fail(
            i.slice(c.len_utf8()..),
            format!("Unknown character {} ({})", c, c as u32),
        )),
    }
}

fn unwrap_nom_error<T>(value: LexResult<T>) -> Result<(Input, T)> {
    match value {
        Ok(v) => Ok(v),
        Err(Err::Error(e)) | Err(Err::Failure(e)) => Err(e),
        // Only complete combinators are used, so this cannot be produced.
        Err(Err::Incomplete(_)) => Err(Error::new(Kind::Parse, None, "Unexpected end of input")),
    }
}

/// Pulls tokens one at a time out of the source text.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    rest: Input<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            rest: Input::new(source),
        }
    }

    /// Line of the last consumed character.
    pub fn line(&self) -> usize {
        self.rest.line()
    }

    pub fn next_token(&mut self) -> Result<Token> {
        let (rest, token) = unwrap_nom_error(token(self.rest))?;
        self.rest = rest;

        trace!(line = self.rest.line(), %token, "lexed token");

        Ok(token)
    }
}
