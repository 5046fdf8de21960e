use crate::error::{Error, Kind, Result};
use std::collections::BTreeMap;
use std::fmt::{self, Display};

pub type Array = Vec<Value>;
/// Members are kept ordered by key, not by the order they were written in.
pub type Object = BTreeMap<String, Value>;

/// Shared null, handy as a fallback for [`Value::get`].
pub static NULL: Value = Value::null();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        };

        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Data {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Array),
    Object(Object),
}

impl Data {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Number(_) => ValueType::Number,
            Self::String(_) => ValueType::String,
            Self::Array(_) => ValueType::Array,
            Self::Object(_) => ValueType::Object,
        }
    }
}

/// A node of the document tree together with the line it was read from.
///
/// The line is advisory: `0` means unknown, and it takes no part in equality,
/// so two documents that only differ in layout compare equal.
#[derive(Debug, Clone, Default)]
pub struct Value {
    data: Data,
    line: usize,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Value {
    pub const fn null() -> Self {
        Self {
            data: Data::Null,
            line: 0,
        }
    }

    pub fn new(data: impl Into<Data>) -> Self {
        Self {
            data: data.into(),
            line: 0,
        }
    }

    /// Empty value of the given type. A boolean has no obvious empty value, so
    /// asking for one is a [`Kind::Type`](crate::error::Kind::Type) error.
    pub fn of_type(value_type: ValueType) -> Result<Self> {
        let data = match value_type {
            ValueType::Object => Data::Object(Object::new()),
            ValueType::Array => Data::Array(Array::new()),
            ValueType::String => Data::String(String::new()),
            ValueType::Number => Data::Number(0.0),
            ValueType::Null => Data::Null,
            ValueType::Boolean => {
                return Err(Error::new(
                    Kind::Type,
                    None,
                    "A boolean has no default, it is either true or false",
                ))
            }
        };

        Ok(Self::new(data))
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    pub fn into_data(self) -> Data {
        self.data
    }

    /// Replaces type and payload, the line stays.
    pub fn assign(&mut self, data: impl Into<Data>) {
        self.data = data.into();
    }

    pub fn value_type(&self) -> ValueType {
        self.data.value_type()
    }

    pub fn is_null(&self) -> bool {
        matches!(self.data, Data::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.data, Data::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self.data, Data::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.data, Data::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.data, Data::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.data, Data::Object(_))
    }

    fn mismatch(&self, expected: ValueType) -> Error {
        Error::type_mismatch(expected, self.value_type(), self.line)
    }

    pub fn as_object(&self) -> Result<&Object> {
        match &self.data {
            Data::Object(object) => Ok(object),
            _ => Err(self.mismatch(ValueType::Object)),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object> {
        let (actual, line) = (self.value_type(), self.line);

        match &mut self.data {
            Data::Object(object) => Ok(object),
            _ => Err(Error::type_mismatch(ValueType::Object, actual, line)),
        }
    }

    pub fn as_array(&self) -> Result<&Array> {
        match &self.data {
            Data::Array(array) => Ok(array),
            _ => Err(self.mismatch(ValueType::Array)),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Array> {
        let (actual, line) = (self.value_type(), self.line);

        match &mut self.data {
            Data::Array(array) => Ok(array),
            _ => Err(Error::type_mismatch(ValueType::Array, actual, line)),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match &self.data {
            Data::String(string) => Ok(string),
            _ => Err(self.mismatch(ValueType::String)),
        }
    }

    pub fn as_number(&self) -> Result<f64> {
        match self.data {
            Data::Number(number) => Ok(number),
            _ => Err(self.mismatch(ValueType::Number)),
        }
    }

    /// Like the other getters, except that null reads as `false`: an absent
    /// flag means the flag is off.
    pub fn as_bool(&self) -> Result<bool> {
        match self.data {
            Data::Boolean(boolean) => Ok(boolean),
            Data::Null => Ok(false),
            _ => Err(self.mismatch(ValueType::Boolean)),
        }
    }

    pub fn at(&self, index: usize) -> Result<&Value> {
        let array = self.as_array()?;

        array
            .get(index)
            .ok_or_else(|| Error::index(index, array.len(), self.line))
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut Value> {
        let line = self.line;
        let array = self.as_array_mut()?;
        let len = array.len();

        array
            .get_mut(index)
            .ok_or_else(|| Error::index(index, len, line))
    }

    /// Member `key`, inserting a null member first when there is none.
    ///
    /// This mutates the object even when the caller only reads the result.
    /// Use [`get`](Self::get), [`has`](Self::has) or [`require`](Self::require)
    /// to look without touching.
    pub fn read_or_insert(&mut self, key: &str) -> Result<&mut Value> {
        let object = self.as_object_mut()?;

        Ok(object.entry(key.to_owned()).or_default())
    }

    /// Member `key`, or `fallback` when the object has no such member.
    pub fn get<'v>(&'v self, key: &str, fallback: &'v Value) -> Result<&'v Value> {
        Ok(self.as_object()?.get(key).unwrap_or(fallback))
    }

    pub fn has(&self, key: &str) -> Result<bool> {
        Ok(self.as_object()?.contains_key(key))
    }

    /// Fails with a [`Kind::Data`](crate::error::Kind::Data) error when the
    /// object has no member `key`.
    pub fn require(&self, key: &str) -> Result<()> {
        if self.has(key)? {
            return Ok(());
        }

        let message = if self.line != 0 {
            format!(
                "Object on line {} is missing required member '{}'",
                self.line, key
            )
        } else {
            format!("Member '{}' is required", key)
        };

        Err(Error::data(self.line, message))
    }

    /// [`require`](Self::require) followed by the lookup.
    pub fn member(&self, key: &str) -> Result<&Value> {
        self.require(key)?;
        self.get(key, &NULL)
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Data {
                fn from(value: $ty) -> Self {
                    Data::$variant(value.into())
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::new(value)
                }
            }
        )*
    };
}

impl_from!(
    bool => Boolean,
    f64 => Number,
    i32 => Number,
    String => String,
    &str => String,
    Array => Array,
    Object => Object,
);

impl From<()> for Data {
    fn from(_: ()) -> Self {
        Data::Null
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::null()
    }
}

impl From<Data> for Value {
    fn from(data: Data) -> Self {
        Value::new(data)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Value::new(iter.into_iter().collect::<Array>())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Value::new(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect::<Object>(),
        )
    }
}
