//! Column type and format definitions.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Fixed-width numeric element types a column file may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 8-bit signed integer.
    #[serde(alias = "char")]
    Int8,
    /// 8-bit unsigned integer.
    #[serde(alias = "unsigned char", alias = "uchar")]
    UInt8,
    /// 16-bit signed integer.
    #[serde(alias = "short")]
    Int16,
    /// 16-bit unsigned integer.
    #[serde(alias = "unsigned short", alias = "ushort")]
    UInt16,
    /// 32-bit signed integer.
    #[serde(alias = "int")]
    Int32,
    /// 32-bit unsigned integer.
    #[serde(alias = "unsigned int", alias = "uint")]
    UInt32,
    /// 64-bit signed integer.
    #[serde(alias = "long")]
    Int64,
    /// 64-bit unsigned integer.
    #[serde(alias = "unsigned long", alias = "ulong")]
    UInt64,
    /// 32-bit floating point.
    #[serde(alias = "float")]
    Float32,
    /// 64-bit floating point.
    #[serde(alias = "double")]
    Float64,
}

/// Decodes one little-endian element into a double.
pub(crate) type Decoder = fn(&[u8]) -> f64;

macro_rules! le_decoder {
    ($name:ident, $ty:ty) => {
        fn $name(bytes: &[u8]) -> f64 {
            let mut buf = [0u8; std::mem::size_of::<$ty>()];
            buf.copy_from_slice(&bytes[..std::mem::size_of::<$ty>()]);
            <$ty>::from_le_bytes(buf) as f64
        }
    };
}

le_decoder!(decode_i8, i8);
le_decoder!(decode_u8, u8);
le_decoder!(decode_i16, i16);
le_decoder!(decode_u16, u16);
le_decoder!(decode_i32, i32);
le_decoder!(decode_u32, u32);
le_decoder!(decode_i64, i64);
le_decoder!(decode_u64, u64);
le_decoder!(decode_f32, f32);
le_decoder!(decode_f64, f64);

impl ColumnType {
    /// Size of one element in bytes.
    pub fn size(self) -> usize {
        match self {
            ColumnType::Int8 | ColumnType::UInt8 => 1,
            ColumnType::Int16 | ColumnType::UInt16 => 2,
            ColumnType::Int32 | ColumnType::UInt32 | ColumnType::Float32 => 4,
            ColumnType::Int64 | ColumnType::UInt64 | ColumnType::Float64 => 8,
        }
    }

    /// Canonical type name.
    pub fn name(self) -> &'static str {
        match self {
            ColumnType::Int8 => "int8",
            ColumnType::UInt8 => "uint8",
            ColumnType::Int16 => "int16",
            ColumnType::UInt16 => "uint16",
            ColumnType::Int32 => "int32",
            ColumnType::UInt32 => "uint32",
            ColumnType::Int64 => "int64",
            ColumnType::UInt64 => "uint64",
            ColumnType::Float32 => "float32",
            ColumnType::Float64 => "float64",
        }
    }

    /// Check if this is an integer type.
    pub fn is_integer(self) -> bool {
        !matches!(self, ColumnType::Float32 | ColumnType::Float64)
    }

    pub(crate) fn decoder(self) -> Decoder {
        match self {
            ColumnType::Int8 => decode_i8,
            ColumnType::UInt8 => decode_u8,
            ColumnType::Int16 => decode_i16,
            ColumnType::UInt16 => decode_u16,
            ColumnType::Int32 => decode_i32,
            ColumnType::UInt32 => decode_u32,
            ColumnType::Int64 => decode_i64,
            ColumnType::UInt64 => decode_u64,
            ColumnType::Float32 => decode_f32,
            ColumnType::Float64 => decode_f64,
        }
    }

    /// Round-trip a parsed ascii value through this element type.
    ///
    /// An `int32` ascii column holding `3.7` yields `3.0`, the same value a typed
    /// array of that column would hold.
    pub fn narrow(self, value: f64) -> f64 {
        match self {
            ColumnType::Int8 => value as i8 as f64,
            ColumnType::UInt8 => value as u8 as f64,
            ColumnType::Int16 => value as i16 as f64,
            ColumnType::UInt16 => value as u16 as f64,
            ColumnType::Int32 => value as i32 as f64,
            ColumnType::UInt32 => value as u32 as f64,
            ColumnType::Int64 => value as i64 as f64,
            ColumnType::UInt64 => value as u64 as f64,
            ColumnType::Float32 => value as f32 as f64,
            ColumnType::Float64 => value,
        }
    }

    /// Encode a value as little-endian bytes of this type.
    pub fn encode(self, value: f64, out: &mut Vec<u8>) {
        match self {
            ColumnType::Int8 => out.extend_from_slice(&(value as i8).to_le_bytes()),
            ColumnType::UInt8 => out.extend_from_slice(&(value as u8).to_le_bytes()),
            ColumnType::Int16 => out.extend_from_slice(&(value as i16).to_le_bytes()),
            ColumnType::UInt16 => out.extend_from_slice(&(value as u16).to_le_bytes()),
            ColumnType::Int32 => out.extend_from_slice(&(value as i32).to_le_bytes()),
            ColumnType::UInt32 => out.extend_from_slice(&(value as u32).to_le_bytes()),
            ColumnType::Int64 => out.extend_from_slice(&(value as i64).to_le_bytes()),
            ColumnType::UInt64 => out.extend_from_slice(&(value as u64).to_le_bytes()),
            ColumnType::Float32 => out.extend_from_slice(&(value as f32).to_le_bytes()),
            ColumnType::Float64 => out.extend_from_slice(&value.to_le_bytes()),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.trim() {
            "int8" | "char" => ColumnType::Int8,
            "uint8" | "unsigned char" | "uchar" => ColumnType::UInt8,
            "int16" | "short" => ColumnType::Int16,
            "uint16" | "unsigned short" | "ushort" => ColumnType::UInt16,
            "int32" | "int" => ColumnType::Int32,
            "uint32" | "unsigned int" | "uint" => ColumnType::UInt32,
            "int64" | "long" => ColumnType::Int64,
            "uint64" | "unsigned long" | "ulong" => ColumnType::UInt64,
            "float32" | "float" => ColumnType::Float32,
            "float64" | "double" => ColumnType::Float64,
            other => {
                return Err(Error::Descriptor(format!("unknown column type '{}'", other)));
            }
        };
        Ok(ty)
    }
}

/// On-disk layout of a column file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnFormat {
    /// Flat little-endian array, no header.
    Binary,
    /// Whitespace, comma or tab delimited tokens.
    #[serde(alias = "text")]
    Ascii,
}

impl ColumnFormat {
    /// Format name as written in descriptors.
    pub fn name(self) -> &'static str {
        match self {
            ColumnFormat::Binary => "binary",
            ColumnFormat::Ascii => "ascii",
        }
    }
}

impl fmt::Display for ColumnFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "binary" => Ok(ColumnFormat::Binary),
            "ascii" | "text" => Ok(ColumnFormat::Ascii),
            other => Err(Error::Descriptor(format!("unknown column format '{}'", other))),
        }
    }
}

/// Description of one column as supplied by the metadata importer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Axis label.
    #[serde(default)]
    pub label: Option<String>,
    /// Element type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// File layout.
    pub format: ColumnFormat,
    /// Path to the column file.
    pub path: PathBuf,
    /// Data minimum, if the importer knows it.
    #[serde(default)]
    pub min_value: Option<f64>,
    /// Data maximum, if the importer knows it.
    #[serde(default)]
    pub max_value: Option<f64>,
}

impl ColumnDescriptor {
    /// Create a new column descriptor.
    pub fn new(column_type: ColumnType, format: ColumnFormat, path: impl Into<PathBuf>) -> Self {
        Self {
            label: None,
            column_type,
            format,
            path: path.into(),
            min_value: None,
            max_value: None,
        }
    }

    /// Set the axis label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set known data extrema.
    pub fn with_extrema(mut self, min: f64, max: f64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }
}
