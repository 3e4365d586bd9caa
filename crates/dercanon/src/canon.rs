//! Flattening of constructed encodings that DER requires to be primitive.
//!
//! BER permits BIT STRING, OCTET STRING, and the restricted character
//! strings to be split into a constructed sequence of primitive segments.
//! DER forbids that form, so before encoding, every Universal constructed
//! node with one of those tags is fused into a single primitive node. SET
//! stays constructed; its member ordering is handled by the encoder.

use crate::{tags, Element, TagClass};
use dercanon_types::Asn1Error;

/// Rewrite `element` and its descendants into DER-encodable shape.
///
/// Non-Universal classes and non-string Universal types keep their
/// structure; only their children are visited.
pub(crate) fn normalize(element: &mut Element) -> Result<(), Asn1Error> {
    if element.tag.constructed && element.tag.class == TagClass::Universal {
        match element.tag.number {
            tags::BIT_STRING => return fuse_bit_string(element),
            tags::OCTET_STRING => return fuse_octet_string(element),
            tags::UTF8_STRING
            | tags::NUMERIC_STRING
            | tags::PRINTABLE_STRING
            | tags::T61_STRING
            | tags::VIDEOTEX_STRING
            | tags::IA5_STRING
            | tags::GRAPHIC_STRING
            | tags::VISIBLE_STRING
            | tags::GENERAL_STRING
            | tags::UNIVERSAL_STRING
            | tags::BMP_STRING => return fuse_string(element),
            _ => {}
        }
    }
    for child in &mut element.children {
        normalize(child)?;
    }
    Ok(())
}

/// Each segment carries its own unused-bits octet; only the final segment
/// may leave bits unused. The fused content takes the final segment's
/// unused-bits count as its leading octet.
fn fuse_bit_string(element: &mut Element) -> Result<(), Asn1Error> {
    let last = element.children.len().checked_sub(1);
    let mut fused = vec![0x00];
    for (index, child) in element.children.iter().enumerate() {
        if !is_primitive_with_tag(child, tags::BIT_STRING) {
            return Err(Asn1Error::BitStringInvalidChild { index });
        }
        let (&unused, data) = child
            .value
            .split_first()
            .ok_or(Asn1Error::BitStringEmptyChunk { index })?;
        if Some(index) == last {
            fused[0] = unused;
        } else if unused != 0 {
            return Err(Asn1Error::BitStringNonZeroMiddle { index, unused });
        }
        fused.extend_from_slice(data);
    }
    make_primitive(element, fused);
    Ok(())
}

fn fuse_octet_string(element: &mut Element) -> Result<(), Asn1Error> {
    let mut fused = Vec::new();
    for (index, child) in element.children.iter().enumerate() {
        if !is_primitive_with_tag(child, tags::OCTET_STRING) {
            return Err(Asn1Error::OctetStringInvalidChild { index });
        }
        fused.extend_from_slice(&child.value);
    }
    make_primitive(element, fused);
    Ok(())
}

/// Restricted character strings: every segment must carry the parent's tag.
fn fuse_string(element: &mut Element) -> Result<(), Asn1Error> {
    let tag = element.tag.number;
    let mut fused = Vec::new();
    for (index, child) in element.children.iter().enumerate() {
        if !is_primitive_with_tag(child, tag) {
            return Err(Asn1Error::StringInvalidChild { tag, index });
        }
        fused.extend_from_slice(&child.value);
    }
    make_primitive(element, fused);
    Ok(())
}

fn is_primitive_with_tag(child: &Element, number: u64) -> bool {
    child.tag.class == TagClass::Universal && !child.tag.constructed && child.tag.number == number
}

fn make_primitive(element: &mut Element, value: Vec<u8>) {
    element.tag.constructed = false;
    element.value = value;
    element.children.clear();
}
