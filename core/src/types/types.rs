use core::fmt;

use ecow::EcoString;

/// Runtime representation category of a type.
///
/// Every resolved type has exactly one kind. The textual form returned by
/// [`Kind::as_str`] is the canonical name of the basic type of that kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    Bool,
    Array,
    Map,
    Func,
    Interface,
    Nil,
    Struct,
}

impl Kind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Int => "int",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::Array => "array",
            Kind::Map => "map",
            Kind::Func => "func",
            Kind::Interface => "interface",
            Kind::Nil => "nil",
            Kind::Struct => "struct",
        }
    }

    /// Signed integer kinds.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            Kind::Int | Kind::Int8 | Kind::Int16 | Kind::Int32 | Kind::Int64
        )
    }

    /// Unsigned integer kinds.
    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            Kind::Uint | Kind::Uint8 | Kind::Uint16 | Kind::Uint32 | Kind::Uint64
        )
    }

    pub fn is_integer(self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    pub fn is_float(self) -> bool {
        matches!(self, Kind::Float32 | Kind::Float64)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Numeric family or string: the kinds a named type can be unwrapped to.
    pub fn is_primitive(self) -> bool {
        self.is_numeric() || self == Kind::String
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static type attached to a node: a kind plus the declared type name.
///
/// Basic types are named after their kind (`int16` is called `"int16"`).
/// A named type layered over a basic kind carries its own declared name,
/// which is how it can be told apart from the basic one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    kind: Kind,
    name: EcoString,
}

impl Type {
    /// The basic type of `kind`.
    pub fn basic(kind: Kind) -> Self {
        Self {
            kind,
            name: EcoString::from(kind.as_str()),
        }
    }

    /// A declared type named `name` whose representation is `kind`.
    pub fn named(name: impl Into<EcoString>, kind: Kind) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn int() -> Self {
        Self::basic(Kind::Int)
    }

    pub fn uint() -> Self {
        Self::basic(Kind::Uint)
    }

    pub fn float() -> Self {
        Self::basic(Kind::Float64)
    }

    pub fn string() -> Self {
        Self::basic(Kind::String)
    }

    pub fn bool() -> Self {
        Self::basic(Kind::Bool)
    }

    pub fn nil() -> Self {
        Self::basic(Kind::Nil)
    }

    pub fn any() -> Self {
        Self::basic(Kind::Interface)
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the declared name differs from the canonical name of the kind.
    pub fn is_named(&self) -> bool {
        self.name != self.kind.as_str()
    }

    /// The basic type sharing this type's representation.
    pub fn underlying(&self) -> Type {
        Type::basic(self.kind)
    }

    pub fn is_any(&self) -> bool {
        self.kind == Kind::Interface
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_named() {
            write!(f, "{} ({})", self.name, self.kind)
        } else {
            f.write_str(&self.name)
        }
    }
}
