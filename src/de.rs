use serde::{
    de::{
        self,
        value::{MapDeserializer, SeqDeserializer, StrDeserializer},
        DeserializeSeed, EnumAccess, IntoDeserializer, VariantAccess, Visitor,
    },
    forward_to_deserialize_any, Deserialize, Deserializer,
};
use std::fmt::Display;

use crate::error::{Error, Kind, Result};
use crate::value::{Data, Value};

/// Reads a typed structure straight out of a parsed tree.
///
/// Numbers are `f64` in the tree, integer fields accept them when they have no
/// fractional part. Errors carry the line of the innermost value at fault.
pub fn from_value<'de, T: Deserialize<'de>>(value: &'de Value) -> Result<T> {
    T::deserialize(value)
}

impl de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::new(Kind::Data, None, msg.to_string())
    }
}

// Only the first value to fail gets to name its line.
fn locate(error: Error, line: usize) -> Error {
    match error.line {
        None if line != 0 => Error::new(
            error.kind,
            Some(line),
            format!("{} on line {}", error.message, line),
        ),
        _ => error,
    }
}

fn visit_data<'de, V: Visitor<'de>>(value: &'de Value, visitor: V) -> Result<V::Value> {
    match value.data() {
        Data::Null => visitor.visit_unit(),
        Data::Boolean(boolean) => visitor.visit_bool(*boolean),
        Data::Number(number) => visitor.visit_f64(*number),
        Data::String(string) => visitor.visit_borrowed_str(string),
        Data::Array(array) => {
            let mut seq: SeqDeserializer<_, Error> = SeqDeserializer::new(array.iter());
            let result = visitor.visit_seq(&mut seq)?;
            seq.end()?;

            Ok(result)
        }
        Data::Object(object) => {
            let mut map: MapDeserializer<_, Error> =
                MapDeserializer::new(object.iter().map(|(k, v)| (k.as_str(), v)));
            let result = visitor.visit_map(&mut map)?;
            map.end()?;

            Ok(result)
        }
    }
}

fn not_a_variant(value: &Value) -> Error {
    de::Error::custom(format!(
        "Expected string or single-member object, not {}",
        value.value_type()
    ))
}

macro_rules! deserialize_integer {
    ($($method:ident => $visit:ident as $ty:ty, $min:expr;)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                match self.data() {
                    Data::Number(n) if n.fract() == 0.0 && *n >= $min => {
                        visitor.$visit(*n as $ty).map_err(|e| locate(e, self.line()))
                    }
                    _ => self.deserialize_any(visitor),
                }
            }
        )*
    };
}

impl<'de> Deserializer<'de> for &'de Value {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visit_data(self, visitor).map_err(|e| locate(e, self.line()))
    }

    deserialize_integer! {
        deserialize_i8 => visit_i64 as i64, f64::MIN;
        deserialize_i16 => visit_i64 as i64, f64::MIN;
        deserialize_i32 => visit_i64 as i64, f64::MIN;
        deserialize_i64 => visit_i64 as i64, f64::MIN;
        deserialize_u8 => visit_u64 as u64, 0.0;
        deserialize_u16 => visit_u64 as u64, 0.0;
        deserialize_u32 => visit_u64 as u64, 0.0;
        deserialize_u64 => visit_u64 as u64, 0.0;
    }

    // Same leniency as `Value::as_bool`.
    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.data() {
            Data::Null => visitor.visit_bool(false),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.data() {
            Data::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    /// A unit variant is written as its name, any other variant as an object
    /// with a single member named after it.
    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let result = match self.data() {
            Data::String(name) => {
                let variant: StrDeserializer<Error> = name.as_str().into_deserializer();
                visitor.visit_enum(variant)
            }
            Data::Object(object) if object.len() == 1 => match object.iter().next() {
                Some((name, value)) => visitor.visit_enum(Variant { name, value }),
                None => Err(not_a_variant(self)),
            },
            _ => Err(not_a_variant(self)),
        };

        result.map_err(|e| locate(e, self.line()))
    }

    forward_to_deserialize_any! {
        f32 f64 char str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for &'de Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

struct Variant<'de> {
    name: &'de str,
    value: &'de Value,
}

impl<'de> EnumAccess<'de> for Variant<'de> {
    type Error = Error;
    type Variant = &'de Value;

    fn variant_seed<S: DeserializeSeed<'de>>(self, seed: S) -> Result<(S::Value, &'de Value)> {
        let name: StrDeserializer<Error> = self.name.into_deserializer();

        Ok((seed.deserialize(name)?, self.value))
    }
}

impl<'de> VariantAccess<'de> for &'de Value {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        <()>::deserialize(self)
    }

    fn newtype_variant_seed<S: DeserializeSeed<'de>>(self, seed: S) -> Result<S::Value> {
        seed.deserialize(self)
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_map(visitor)
    }
}
