//! A `serde` serializer that reads a record's fields as parameter pairs.
//!
//! Only structs, unit structs and maps are records. Scalars, sequences and
//! enum variants of any kind are rejected with [`ParamError::TypeMismatch`].
//! Field values are encoded with `serde_json` and converted to [`SqlValue`].

use std::fmt;

use serde::ser::{self, Impossible, Serialize, SerializeMap, SerializeStruct};
use serde_json::Value;

use crate::error::ParamError;
use crate::value::SqlValue;

type Pairs = Vec<(String, SqlValue)>;

impl ser::Error for ParamError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Serialization(<serde_json::Error as ser::Error>::custom(msg))
    }
}

fn field_value<T: Serialize + ?Sized>(value: &T) -> Result<SqlValue, ParamError> {
    Ok(SqlValue::from(serde_json::to_value(value)?))
}

const fn mismatch(found: &'static str) -> ParamError {
    ParamError::TypeMismatch { found }
}

/// Top-level serializer: accepts records and nothing else.
pub struct RecordSerializer;

impl ser::Serializer for RecordSerializer {
    type Ok = Pairs;
    type Error = ParamError;

    type SerializeSeq = Impossible<Pairs, ParamError>;
    type SerializeTuple = Impossible<Pairs, ParamError>;
    type SerializeTupleStruct = Impossible<Pairs, ParamError>;
    type SerializeTupleVariant = Impossible<Pairs, ParamError>;
    type SerializeMap = MapRecord;
    type SerializeStruct = StructRecord;
    type SerializeStructVariant = Impossible<Pairs, ParamError>;

    fn serialize_bool(self, _v: bool) -> Result<Pairs, ParamError> {
        Err(mismatch("boolean"))
    }

    fn serialize_i8(self, _v: i8) -> Result<Pairs, ParamError> {
        Err(mismatch("number"))
    }

    fn serialize_i16(self, _v: i16) -> Result<Pairs, ParamError> {
        Err(mismatch("number"))
    }

    fn serialize_i32(self, _v: i32) -> Result<Pairs, ParamError> {
        Err(mismatch("number"))
    }

    fn serialize_i64(self, _v: i64) -> Result<Pairs, ParamError> {
        Err(mismatch("number"))
    }

    fn serialize_i128(self, _v: i128) -> Result<Pairs, ParamError> {
        Err(mismatch("number"))
    }

    fn serialize_u8(self, _v: u8) -> Result<Pairs, ParamError> {
        Err(mismatch("number"))
    }

    fn serialize_u16(self, _v: u16) -> Result<Pairs, ParamError> {
        Err(mismatch("number"))
    }

    fn serialize_u32(self, _v: u32) -> Result<Pairs, ParamError> {
        Err(mismatch("number"))
    }

    fn serialize_u64(self, _v: u64) -> Result<Pairs, ParamError> {
        Err(mismatch("number"))
    }

    fn serialize_u128(self, _v: u128) -> Result<Pairs, ParamError> {
        Err(mismatch("number"))
    }

    fn serialize_f32(self, _v: f32) -> Result<Pairs, ParamError> {
        Err(mismatch("number"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Pairs, ParamError> {
        Err(mismatch("number"))
    }

    fn serialize_char(self, _v: char) -> Result<Pairs, ParamError> {
        Err(mismatch("string"))
    }

    fn serialize_str(self, _v: &str) -> Result<Pairs, ParamError> {
        Err(mismatch("string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Pairs, ParamError> {
        Err(mismatch("bytes"))
    }

    fn serialize_none(self) -> Result<Pairs, ParamError> {
        Err(mismatch("null"))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Pairs, ParamError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Pairs, ParamError> {
        Err(mismatch("unit"))
    }

    // A struct without fields is a record with no parameters.
    fn serialize_unit_struct(self, _name: &'static str) -> Result<Pairs, ParamError> {
        Ok(Vec::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Pairs, ParamError> {
        Err(mismatch("enum variant"))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Pairs, ParamError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Pairs, ParamError> {
        Err(mismatch("enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, ParamError> {
        Err(mismatch("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, ParamError> {
        Err(mismatch("sequence"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, ParamError> {
        Err(mismatch("sequence"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, ParamError> {
        Err(mismatch("enum variant"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap, ParamError> {
        Ok(MapRecord {
            pairs: Vec::with_capacity(len.unwrap_or_default()),
            key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, ParamError> {
        Ok(StructRecord {
            pairs: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, ParamError> {
        Err(mismatch("enum variant"))
    }
}

/// Collects the fields of a struct.
pub struct StructRecord {
    pairs: Pairs,
}

impl SerializeStruct for StructRecord {
    type Ok = Pairs;
    type Error = ParamError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), ParamError> {
        self.pairs.push((key.to_string(), field_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Pairs, ParamError> {
        Ok(self.pairs)
    }
}

/// Collects the entries of a map. Non-string keys use their JSON text.
pub struct MapRecord {
    pairs: Pairs,
    key: Option<String>,
}

impl SerializeMap for MapRecord {
    type Ok = Pairs;
    type Error = ParamError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), ParamError> {
        let key = match serde_json::to_value(key)? {
            Value::String(name) => name,
            other => other.to_string(),
        };
        self.key = Some(key);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ParamError> {
        let key = self
            .key
            .take()
            .ok_or_else(|| <ParamError as ser::Error>::custom("map value without a key"))?;
        self.pairs.push((key, field_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Pairs, ParamError> {
        Ok(self.pairs)
    }
}
