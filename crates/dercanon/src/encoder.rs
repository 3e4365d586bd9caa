//! DER serialization of parsed elements.

use crate::{tags, Element, TagClass};

/// Serialize a normalized element tree to DER: tag, minimal-form length,
/// content. Indefinite lengths are never emitted.
pub(crate) fn encode(element: &Element) -> Vec<u8> {
    let content = encode_content(element);
    let mut out = element.tag.to_bytes();
    write_length(&mut out, content.len());
    out.extend_from_slice(&content);
    out
}

fn encode_content(element: &Element) -> Vec<u8> {
    if !element.tag.constructed {
        return encode_primitive(element);
    }
    if element.tag.class == TagClass::Universal && element.tag.number == tags::SET {
        return encode_set(element);
    }
    let mut content = Vec::new();
    for child in &element.children {
        content.extend_from_slice(&encode(child));
    }
    content
}

/// Primitive content bytes. Single-byte BOOLEAN values are normalized to
/// 0x00/0xFF; context-specific [1] is assumed to be an IMPLICIT-tagged
/// BOOLEAN (see the crate-level note on this heuristic).
fn encode_primitive(element: &Element) -> Vec<u8> {
    if element.value.len() == 1
        && element.tag.number == tags::BOOLEAN
        && matches!(
            element.tag.class,
            TagClass::Universal | TagClass::ContextSpecific
        )
    {
        let normalized = if element.value[0] == 0x00 { 0x00 } else { 0xFF };
        return vec![normalized];
    }
    element.value.clone()
}

/// DER orders SET members by the unsigned lexicographic comparison of
/// their complete encodings.
fn encode_set(element: &Element) -> Vec<u8> {
    let mut encoded: Vec<Vec<u8>> = element.children.iter().map(encode).collect();
    encoded.sort();
    encoded.concat()
}

/// Append the minimal DER encoding of `length`: one short-form octet below
/// 128, otherwise 0x80 | N followed by the N-byte big-endian value without
/// leading zeros.
fn write_length(out: &mut Vec<u8>, length: usize) {
    if length < 0x80 {
        out.push(length as u8);
        return;
    }
    let be = length.to_be_bytes();
    let skip = be.iter().take_while(|&&b| b == 0).count();
    let octets = &be[skip..];
    out.push(0x80 | octets.len() as u8);
    out.extend_from_slice(octets);
}
