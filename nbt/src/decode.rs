//! Streaming decode of a tagged binary tree into an owned [`TagValue`] tree.
//!
//! The decoder keeps an explicit stack of open containers rather than
//! recursing, per the design note on the source's parent stack: each
//! frame borrows nothing from the tree being built, it just accumulates the
//! children of one compound or list until that container is complete, then
//! the completed value is attached to whatever is now on top of the stack
//! (or to the root list, if the stack just emptied).

use std::convert::TryFrom;
use std::io::Read;

use crate::error::{Error, Result};
use crate::reader::ByteReader;
use crate::tag::{NamedTag, TagId, TagValue};

enum Frame {
    Compound {
        name: Option<String>,
        children: Vec<NamedTag>,
    },
    List {
        name: Option<String>,
        element: TagId,
        remaining: i32,
        children: Vec<TagValue>,
    },
}

/// Decodes every root tag from `reader` until it is exhausted.
///
/// `reader` must already be decompressed; see [`crate::reader`]. Returns
/// the ordered list of root tags (in practice a single `Compound`).
pub fn decode<R: Read>(reader: R) -> Result<Vec<NamedTag>> {
    let mut r = ByteReader::new(reader);
    let mut roots = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        // A list whose declared count has been fully consumed closes here,
        // regardless of what's above it on the stack.
        if let Some(Frame::List { remaining, .. }) = stack.last() {
            if *remaining <= 0 {
                let frame = stack.pop().unwrap();
                if let Frame::List {
                    name,
                    element,
                    children,
                    ..
                } = frame
                {
                    attach(&mut stack, &mut roots, name, TagValue::List(element, children))?;
                }
                continue;
            }
        }

        // Still inside a list with elements left: read one element payload,
        // bare, using the list's declared element kind. No id, no name.
        if let Some(Frame::List { element, .. }) = stack.last() {
            let element = *element;
            if let Some(Frame::List { remaining, .. }) = stack.last_mut() {
                *remaining -= 1;
            }

            match element {
                TagId::Compound => {
                    stack.push(Frame::Compound {
                        name: None,
                        children: Vec::new(),
                    });
                }
                TagId::List => {
                    let (inner_element, count) = read_list_header(&mut r)?;
                    if count <= 0 {
                        attach(
                            &mut stack,
                            &mut roots,
                            None,
                            TagValue::List(inner_element, Vec::new()),
                        )?;
                    } else {
                        stack.push(Frame::List {
                            name: None,
                            element: inner_element,
                            remaining: count,
                            children: Vec::new(),
                        });
                    }
                }
                TagId::End => return Err(Error::MismatchedEnd),
                primitive => {
                    let value = read_primitive_payload(&mut r, primitive)?;
                    attach(&mut stack, &mut roots, None, value)?;
                }
            }
            continue;
        }

        // Otherwise we're either at the top level or inside a compound:
        // read a full tag id + (if not End) a name.
        let id_byte = match r.read_tag_id_or_eof()? {
            None => break,
            Some(b) => b,
        };
        let tag_id = TagId::try_from(id_byte).map_err(|_| Error::UnknownTagId(id_byte))?;

        if tag_id == TagId::End {
            match stack.pop() {
                Some(Frame::Compound { name, children }) => {
                    attach(&mut stack, &mut roots, name, TagValue::Compound(children))?;
                }
                _ => return Err(Error::MismatchedEnd),
            }
            continue;
        }

        let name = r.read_sized_string()?;

        match tag_id {
            TagId::Compound => {
                stack.push(Frame::Compound {
                    name: Some(name),
                    children: Vec::new(),
                });
            }
            TagId::List => {
                let (element, count) = read_list_header(&mut r)?;
                if count <= 0 {
                    attach(&mut stack, &mut roots, Some(name), TagValue::List(element, Vec::new()))?;
                } else {
                    stack.push(Frame::List {
                        name: Some(name),
                        element,
                        remaining: count,
                        children: Vec::new(),
                    });
                }
            }
            primitive => {
                let value = read_primitive_payload(&mut r, primitive)?;
                attach(&mut stack, &mut roots, Some(name), value)?;
            }
        }
    }

    if !stack.is_empty() {
        return Err(Error::UnexpectedEof);
    }

    Ok(roots)
}

/// Attaches a completed value to whatever container is now on top of the
/// stack, or to the root list if the stack is empty.
fn attach(
    stack: &mut [Frame],
    roots: &mut Vec<NamedTag>,
    name: Option<String>,
    value: TagValue,
) -> Result<()> {
    match stack.last_mut() {
        Some(Frame::Compound { children, .. }) => {
            children.push(NamedTag {
                name: name.expect("tag inside a compound always has a name"),
                value,
            });
        }
        Some(Frame::List { children, .. }) => {
            children.push(value);
        }
        None => {
            roots.push(NamedTag {
                name: name.expect("root tag always has a name"),
                value,
            });
        }
    }
    Ok(())
}

fn read_list_header<R: Read>(r: &mut ByteReader<R>) -> Result<(TagId, i32)> {
    let id_byte = r.read_u8()?;
    let count = r.read_i32()?;

    if count <= 0 {
        // Element kind is ignored for an empty list, so an otherwise
        // invalid byte here (including Compound/List themselves, which
        // can't recurse without their own header) doesn't fail decoding.
        let tag = TagId::try_from(id_byte).unwrap_or(TagId::End);
        Ok((tag, count))
    } else {
        let tag = TagId::try_from(id_byte).map_err(|_| Error::UnknownTagId(id_byte))?;
        Ok((tag, count))
    }
}

fn read_primitive_payload<R: Read>(r: &mut ByteReader<R>, tag: TagId) -> Result<TagValue> {
    Ok(match tag {
        TagId::Byte => TagValue::Byte(r.read_i8()?),
        TagId::Short => TagValue::Short(r.read_i16()?),
        TagId::Int => TagValue::Int(r.read_i32()?),
        TagId::Long => TagValue::Long(r.read_i64()?),
        TagId::Float => TagValue::Float(r.read_f32()?),
        TagId::Double => TagValue::Double(r.read_f64()?),
        TagId::String => TagValue::String(r.read_sized_string()?),
        TagId::ByteArray => {
            let n = r.read_i32()?;
            if n < 0 {
                return Err(Error::MalformedLength(n));
            }
            let bytes = r.read_bytes(n as usize)?;
            TagValue::ByteArray(bytes.into_iter().map(|b| b as i8).collect())
        }
        TagId::IntArray => {
            let n = r.read_i32()?;
            if n < 0 {
                return Err(Error::MalformedLength(n));
            }
            let mut v = Vec::with_capacity(n as usize);
            for _ in 0..n {
                v.push(r.read_i32()?);
            }
            TagValue::IntArray(v)
        }
        TagId::End | TagId::List | TagId::Compound => {
            unreachable!("containers and End are handled by the caller")
        }
    })
}
