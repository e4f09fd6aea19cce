//! Well-known host types and the closed set of primitive kinds.
//!
//! The universal object type, the primitive numeric kinds, and the sequence
//! type used for rest parameters have reserved hashes so they can be named
//! in `const` position. Every other host type is identified by
//! [`TypeHash::from_name`] of its qualified name.

use std::fmt;

use crate::TypeHash;

/// The universal object type (`System.Object`).
pub const OBJECT: TypeHash = TypeHash(0x0000_0000_0000_0100);
/// `void`, the return type of procedures.
pub const VOID: TypeHash = TypeHash(0x0000_0000_0000_0101);
/// `System.String`.
pub const STRING: TypeHash = TypeHash(0x0000_0000_0000_0102);
/// The sequence interface rest parameters are bound to.
pub const SEQ: TypeHash = TypeHash(0x0000_0000_0000_0103);

pub const SBYTE: TypeHash = TypeHash(0x0000_0000_0000_0110);
pub const BYTE: TypeHash = TypeHash(0x0000_0000_0000_0111);
pub const INT16: TypeHash = TypeHash(0x0000_0000_0000_0112);
pub const UINT16: TypeHash = TypeHash(0x0000_0000_0000_0113);
pub const INT32: TypeHash = TypeHash(0x0000_0000_0000_0114);
pub const UINT32: TypeHash = TypeHash(0x0000_0000_0000_0115);
pub const INT64: TypeHash = TypeHash(0x0000_0000_0000_0116);
pub const UINT64: TypeHash = TypeHash(0x0000_0000_0000_0117);
pub const SINGLE: TypeHash = TypeHash(0x0000_0000_0000_0118);
pub const DOUBLE: TypeHash = TypeHash(0x0000_0000_0000_0119);
pub const CHAR: TypeHash = TypeHash(0x0000_0000_0000_011a);
pub const DECIMAL: TypeHash = TypeHash(0x0000_0000_0000_011b);
pub const BOOL: TypeHash = TypeHash(0x0000_0000_0000_011c);

/// Qualified host name of the universal object type.
pub const OBJECT_NAME: &str = "System.Object";
/// Qualified host name of the string type.
pub const STRING_NAME: &str = "System.String";
/// Qualified host name of the sequence interface.
pub const SEQ_NAME: &str = "quill.lang.ISeq";

/// A primitive (unboxed) host value kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Char,
    Decimal,
    Boolean,
}

impl PrimitiveKind {
    /// All primitive kinds, in declaration order.
    pub const ALL: [PrimitiveKind; 13] = [
        PrimitiveKind::SByte,
        PrimitiveKind::Byte,
        PrimitiveKind::Int16,
        PrimitiveKind::UInt16,
        PrimitiveKind::Int32,
        PrimitiveKind::UInt32,
        PrimitiveKind::Int64,
        PrimitiveKind::UInt64,
        PrimitiveKind::Single,
        PrimitiveKind::Double,
        PrimitiveKind::Char,
        PrimitiveKind::Decimal,
        PrimitiveKind::Boolean,
    ];

    /// The reserved hash of this kind.
    pub const fn type_hash(self) -> TypeHash {
        match self {
            PrimitiveKind::SByte => SBYTE,
            PrimitiveKind::Byte => BYTE,
            PrimitiveKind::Int16 => INT16,
            PrimitiveKind::UInt16 => UINT16,
            PrimitiveKind::Int32 => INT32,
            PrimitiveKind::UInt32 => UINT32,
            PrimitiveKind::Int64 => INT64,
            PrimitiveKind::UInt64 => UINT64,
            PrimitiveKind::Single => SINGLE,
            PrimitiveKind::Double => DOUBLE,
            PrimitiveKind::Char => CHAR,
            PrimitiveKind::Decimal => DECIMAL,
            PrimitiveKind::Boolean => BOOL,
        }
    }

    /// Map a type hash back to its primitive kind, if it is one.
    pub fn from_hash(hash: TypeHash) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_hash() == hash)
    }

    /// Map a type-hint name (`long`, `double`, `int`, ...) to a kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "sbyte" => PrimitiveKind::SByte,
            "byte" => PrimitiveKind::Byte,
            "short" => PrimitiveKind::Int16,
            "ushort" => PrimitiveKind::UInt16,
            "int" => PrimitiveKind::Int32,
            "uint" => PrimitiveKind::UInt32,
            "long" => PrimitiveKind::Int64,
            "ulong" => PrimitiveKind::UInt64,
            "float" => PrimitiveKind::Single,
            "double" => PrimitiveKind::Double,
            "char" => PrimitiveKind::Char,
            "decimal" => PrimitiveKind::Decimal,
            "bool" | "boolean" => PrimitiveKind::Boolean,
            _ => return None,
        };
        Some(kind)
    }

    /// The type-hint name of this kind.
    pub const fn tag_name(self) -> &'static str {
        match self {
            PrimitiveKind::SByte => "sbyte",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Int16 => "short",
            PrimitiveKind::UInt16 => "ushort",
            PrimitiveKind::Int32 => "int",
            PrimitiveKind::UInt32 => "uint",
            PrimitiveKind::Int64 => "long",
            PrimitiveKind::UInt64 => "ulong",
            PrimitiveKind::Single => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Decimal => "decimal",
            PrimitiveKind::Boolean => "bool",
        }
    }

    /// The qualified host name of this kind.
    pub const fn host_name(self) -> &'static str {
        match self {
            PrimitiveKind::SByte => "System.SByte",
            PrimitiveKind::Byte => "System.Byte",
            PrimitiveKind::Int16 => "System.Int16",
            PrimitiveKind::UInt16 => "System.UInt16",
            PrimitiveKind::Int32 => "System.Int32",
            PrimitiveKind::UInt32 => "System.UInt32",
            PrimitiveKind::Int64 => "System.Int64",
            PrimitiveKind::UInt64 => "System.UInt64",
            PrimitiveKind::Single => "System.Single",
            PrimitiveKind::Double => "System.Double",
            PrimitiveKind::Char => "System.Char",
            PrimitiveKind::Decimal => "System.Decimal",
            PrimitiveKind::Boolean => "System.Boolean",
        }
    }

    /// Name of the runtime helper that converts a boxed value to this kind.
    pub const fn conversion_helper(self) -> &'static str {
        match self {
            PrimitiveKind::SByte => "convert_to_sbyte",
            PrimitiveKind::Byte => "convert_to_byte",
            PrimitiveKind::Int16 => "convert_to_short",
            PrimitiveKind::UInt16 => "convert_to_ushort",
            PrimitiveKind::Int32 => "convert_to_int",
            PrimitiveKind::UInt32 => "convert_to_uint",
            PrimitiveKind::Int64 => "convert_to_long",
            PrimitiveKind::UInt64 => "convert_to_ulong",
            PrimitiveKind::Single => "convert_to_float",
            PrimitiveKind::Double => "convert_to_double",
            PrimitiveKind::Char => "convert_to_char",
            PrimitiveKind::Decimal => "convert_to_decimal",
            PrimitiveKind::Boolean => "convert_to_bool",
        }
    }

    /// Whether this kind takes part in numeric widening.
    pub const fn is_numeric(self) -> bool {
        !matches!(self, PrimitiveKind::Char | PrimitiveKind::Boolean)
    }

    /// Whether function parameters and return values may be declared with
    /// this kind. Only `long` and `double` are supported.
    pub const fn is_fn_primitive(self) -> bool {
        matches!(self, PrimitiveKind::Int64 | PrimitiveKind::Double)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// Whether `hash` names a primitive kind.
#[inline]
pub fn is_primitive(hash: TypeHash) -> bool {
    PrimitiveKind::from_hash(hash).is_some()
}

/// Whether `hash` names a primitive numeric kind.
#[inline]
pub fn is_primitive_numeric(hash: TypeHash) -> bool {
    PrimitiveKind::from_hash(hash).is_some_and(PrimitiveKind::is_numeric)
}
