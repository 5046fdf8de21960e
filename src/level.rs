//! Level files: a commented JSON document describing the bricks and idols of
//! one puzzle.
//!
//! ```json
//! {
//!     "name": "First steps",
//!     "destroy": 2,            // destructible bricks to knock down
//!     "bricks": [
//!         ["n", 0, 0.5, 1, 1]  /* code, x, y, width, height */
//!     ],
//!     "idols": [
//!         [[0, 5], [-0.5, 0], [0.5, 0], [0, 1]]
//!     ]
//! }
//! ```
//!
//! The first pair of an idol is its position, the rest are polygon vertices.

use crate::error::{Error, Result};
use crate::parser::parse;
use crate::value::Value;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Unable to open file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error in file {}: {source}", .path.display())]
    Json { path: PathBuf, source: Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrickKind {
    Normal,
    Dark,
    Combo,
    Slippy,
    Gummy,
    Tnt,
}

impl BrickKind {
    pub const ALL: [BrickKind; 6] = [
        Self::Normal,
        Self::Dark,
        Self::Combo,
        Self::Slippy,
        Self::Gummy,
        Self::Tnt,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Normal => "n",
            Self::Dark => "d",
            Self::Combo => "c",
            Self::Slippy => "s",
            Self::Gummy => "g",
            Self::Tnt => "x",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    fn from_value(value: &Value) -> Result<Self> {
        let code = value.as_str()?;

        Self::from_code(code).ok_or_else(|| {
            let mut message = format!("Bad brick type '{}'", code);
            if value.line() != 0 {
                message.push_str(&format!(" on line {}", value.line()));
            }

            Error::data(value.line(), message)
        })
    }
}

impl Display for BrickKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(Self {
            x: value.at(0)?.as_number()?,
            y: value.at(1)?.as_number()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub kind: BrickKind,
    pub position: Point,
    pub width: f64,
    pub height: f64,
}

impl Brick {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(Self {
            kind: BrickKind::from_value(value.at(0)?)?,
            position: Point {
                x: value.at(1)?.as_number()?,
                y: value.at(2)?.as_number()?,
            },
            width: value.at(3)?.as_number()?,
            height: value.at(4)?.as_number()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Idol {
    pub position: Point,
    pub vertices: Vec<Point>,
}

impl Idol {
    fn from_value(value: &Value) -> Result<Self> {
        let position = Point::from_value(value.at(0)?)?;

        let vertices = value.as_array()?[1..]
            .iter()
            .map(Point::from_value)
            .collect::<Result<_>>()?;

        Ok(Self { position, vertices })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub name: String,
    /// Destructible bricks that have to go for the level to be won.
    pub destroy: f64,
    pub bricks: Vec<Brick>,
    pub idols: Vec<Idol>,
}

impl Level {
    pub fn from_value(root: &Value) -> Result<Self> {
        let name = root.member("name")?.as_str()?.to_owned();
        let destroy = root.member("destroy")?.as_number()?;

        let bricks = root
            .member("bricks")?
            .as_array()?
            .iter()
            .map(Brick::from_value)
            .collect::<Result<Vec<_>>>()?;

        let idols = root
            .member("idols")?
            .as_array()?
            .iter()
            .map(Idol::from_value)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            name = %name,
            bricks = bricks.len(),
            idols = idols.len(),
            "loaded level"
        );

        Ok(Self {
            name,
            destroy,
            bricks,
            idols,
        })
    }

    pub fn parse(source: &str) -> Result<Self> {
        Self::from_value(&parse(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, LoadError> {
        let path = path.as_ref();

        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;

        Self::parse(&source).map_err(|source| LoadError::Json {
            path: path.to_owned(),
            source,
        })
    }
}
