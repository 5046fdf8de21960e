use crate::error::{Error, Result};
use crate::lexer::{Lexer, Token};
use crate::value::{Array, Data, Object, Value};
use std::fmt::Display;
use std::io::Read;
use tracing::debug;

/// Containers nested deeper than this are rejected instead of overflowing the
/// stack.
pub const MAX_DEPTH: usize = 128;

/// Recursive descent over the tokens of one document.
///
/// The parser only holds per-call state (lexer cursor, line counter, nesting
/// depth). It is reset at the start of every [`parse`](Parser::parse), so one
/// parser can read any number of documents in turn, while `&mut self` keeps
/// two runs from overlapping.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    depth: usize,
}

impl<'a> Default for Parser<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Parser<'a> {
    pub fn new() -> Self {
        Self {
            lexer: Lexer::new(""),
            depth: 0,
        }
    }

    /// Parses exactly one value followed by the end of input.
    pub fn parse(&mut self, source: &'a str) -> Result<Value> {
        self.lexer = Lexer::new(source);
        self.depth = 0;

        debug!(bytes = source.len(), "parsing document");

        let value = self.value()?;

        match self.next()? {
            Token::Eof => {
                debug!(lines = self.lexer.line(), "parsed document");
                Ok(value)
            }
            other => Err(self.syntax_error(format!("Expected end of file, not {}", other))),
        }
    }

    fn next(&mut self) -> Result<Token> {
        self.lexer.next_token()
    }

    fn syntax_error(&self, message: impl Display) -> Error {
        Error::syntax(self.lexer.line(), message)
    }

    fn value(&mut self) -> Result<Value> {
        let token = self.next()?;
        self.value_from(token)
    }

    fn value_from(&mut self, token: Token) -> Result<Value> {
        let data = match token {
            Token::String(string) => Data::String(string),
            Token::Number(number) => Data::Number(number),
            Token::True => Data::Boolean(true),
            Token::False => Data::Boolean(false),
            Token::Null => Data::Null,
            Token::LeftBrace => Data::Object(self.nested(Self::object)?),
            Token::LeftBracket => Data::Array(self.nested(Self::array)?),
            other => return Err(self.syntax_error(format!("Expected value, not {}", other))),
        };

        // The closing token has just been consumed, so this is where the value ends.
        Ok(Value::new(data).with_line(self.lexer.line()))
    }

    fn nested<T>(&mut self, container: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth == MAX_DEPTH {
            return Err(self.syntax_error("Nesting too deep"));
        }

        self.depth += 1;
        let result = container(self);
        self.depth -= 1;

        result
    }

    fn object(&mut self) -> Result<Object> {
        let mut object = Object::new();

        let mut token = self.next()?;
        if token == Token::RightBrace {
            return Ok(object);
        }

        loop {
            let key = match token {
                Token::String(key) => key,
                other => return Err(self.syntax_error(format!("Expected string, not {}", other))),
            };

            match self.next()? {
                Token::Colon => {}
                other => return Err(self.syntax_error(format!("Expected ':', not {}", other))),
            }

            // Last write wins on duplicate keys.
            let value = self.value()?;
            object.insert(key, value);

            match self.next()? {
                Token::RightBrace => return Ok(object),
                Token::Comma => token = self.next()?,
                other => {
                    return Err(self.syntax_error(format!(
                        "After value in object must be ',' or '}}', not {}",
                        other
                    )))
                }
            }
        }
    }

    fn array(&mut self) -> Result<Array> {
        let mut array = Array::new();

        let mut token = self.next()?;
        if token == Token::RightBracket {
            return Ok(array);
        }

        loop {
            array.push(self.value_from(token)?);

            match self.next()? {
                Token::RightBracket => return Ok(array),
                Token::Comma => token = self.next()?,
                other => {
                    return Err(self.syntax_error(format!(
                        "After value in array must be ',' or ']', not {}",
                        other
                    )))
                }
            }
        }
    }
}

pub fn parse(s: &str) -> Result<Value> {
    Parser::new().parse(s)
}

/// Buffers the whole reader, then parses it like [`parse`].
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Value> {
    let mut source = String::new();
    reader.read_to_string(&mut source).map_err(Error::io)?;

    parse(&source)
}
