//! Read-only lookup helpers over a decoded tag tree.
//!
//! These walk `Compound` children by name; they never allocate or modify
//! the tree. A missing name or a path that runs into a non-`Compound`
//! partway through simply yields `None`.

use crate::tag::{NamedTag, TagValue};

impl TagValue {
    /// Looks up a direct child of a `Compound` by name. Returns `None` if
    /// this value isn't a `Compound`, or it has no child with that name.
    /// Duplicate names return the first match, matching decode order.
    pub fn child_by_name(&self, name: &str) -> Option<&TagValue> {
        match self {
            TagValue::Compound(children) => children
                .iter()
                .find(|t| t.name == name)
                .map(|t| &t.value),
            _ => None,
        }
    }

    /// Walks a dotted path of compound field names, e.g. `"Level.xPos"`.
    /// Stops and returns `None` as soon as a segment is missing or the
    /// current value isn't a `Compound`.
    pub fn child_at_path(&self, path: &str) -> Option<&TagValue> {
        let mut current = self;
        for segment in path.split('.') {
            current = current.child_by_name(segment)?;
        }
        Some(current)
    }
}

/// Finds a named tag in a root tag list, e.g. the single root `Compound`
/// most NBT streams decode to.
pub fn find_root<'a>(roots: &'a [NamedTag], name: &str) -> Option<&'a TagValue> {
    roots.iter().find(|t| t.name == name).map(|t| &t.value)
}

impl TagValue {
    pub fn as_byte(&self) -> Option<i8> {
        match self {
            TagValue::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match self {
            TagValue::Short(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            TagValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            TagValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            TagValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            TagValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            TagValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            TagValue::ByteArray(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            TagValue::IntArray(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[TagValue]> {
        match self {
            TagValue::List(_, v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&[NamedTag]> {
        match self {
            TagValue::Compound(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}
