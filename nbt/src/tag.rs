//! The tag kind discriminant and the owned value tree built by the decoder.

use num_enum::TryFromPrimitive;

/// The NBT tag kind. Does not carry the name or payload, just the
/// discriminant used on the wire and to check expected kinds during
/// navigation.
#[derive(Debug, TryFromPrimitive, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum TagId {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
}

/// A fully decoded NBT value. Lists and compounds own their children
/// directly, so dropping a root tag drops its entire subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    /// Declared element kind plus the nameless children, in order.
    List(TagId, Vec<TagValue>),
    /// Named children, in declaration order. Duplicate names are kept;
    /// lookups return the first match.
    Compound(Vec<NamedTag>),
    IntArray(Vec<i32>),
}

impl TagValue {
    /// The kind of this value, as it would appear on the wire.
    pub fn id(&self) -> TagId {
        match self {
            TagValue::End => TagId::End,
            TagValue::Byte(_) => TagId::Byte,
            TagValue::Short(_) => TagId::Short,
            TagValue::Int(_) => TagId::Int,
            TagValue::Long(_) => TagId::Long,
            TagValue::Float(_) => TagId::Float,
            TagValue::Double(_) => TagId::Double,
            TagValue::ByteArray(_) => TagId::ByteArray,
            TagValue::String(_) => TagId::String,
            TagValue::List(_, _) => TagId::List,
            TagValue::Compound(_) => TagId::Compound,
            TagValue::IntArray(_) => TagId::IntArray,
        }
    }
}

/// A named tag: every tag carries a name except when it sits inside a
/// `List`, where the `List` itself carries the only name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTag {
    pub name: String,
    pub value: TagValue,
}
