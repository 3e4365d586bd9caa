//! Building, parsing, and serializing [`Element`] trees.

use crate::{canon, encoder, tags, Decoder, Element, Tag, TagClass};
use dercanon_types::Asn1Error;

impl Element {
    /// A primitive element holding raw content bytes.
    pub fn primitive(class: TagClass, number: u64, value: Vec<u8>) -> Self {
        Element {
            tag: Tag {
                class,
                constructed: false,
                number,
            },
            value,
            children: Vec::new(),
        }
    }

    /// A constructed element holding the given children.
    pub fn constructed(class: TagClass, number: u64, children: Vec<Element>) -> Self {
        Element {
            tag: Tag {
                class,
                constructed: true,
                number,
            },
            value: Vec::new(),
            children,
        }
    }

    /// A BOOLEAN element (content 0x00 or 0xFF).
    pub fn boolean(value: bool) -> Self {
        let content = if value { 0xFF } else { 0x00 };
        Self::primitive(TagClass::Universal, tags::BOOLEAN, vec![content])
    }

    /// An INTEGER element from raw big-endian content bytes.
    pub fn integer(value: &[u8]) -> Self {
        Self::primitive(TagClass::Universal, tags::INTEGER, value.to_vec())
    }

    /// A primitive BIT STRING element with the given unused-bits count.
    pub fn bit_string(unused_bits: u8, data: &[u8]) -> Self {
        let mut value = Vec::with_capacity(1 + data.len());
        value.push(unused_bits);
        value.extend_from_slice(data);
        Self::primitive(TagClass::Universal, tags::BIT_STRING, value)
    }

    /// A primitive OCTET STRING element.
    pub fn octet_string(value: &[u8]) -> Self {
        Self::primitive(TagClass::Universal, tags::OCTET_STRING, value.to_vec())
    }

    /// A NULL element.
    pub fn null() -> Self {
        Self::primitive(TagClass::Universal, tags::NULL, Vec::new())
    }

    /// A SEQUENCE element; children encode in the given order.
    pub fn sequence(children: Vec<Element>) -> Self {
        Self::constructed(TagClass::Universal, tags::SEQUENCE, children)
    }

    /// A SET element; members are sorted by their encoded bytes during
    /// serialization.
    pub fn set(children: Vec<Element>) -> Self {
        Self::constructed(TagClass::Universal, tags::SET, children)
    }

    /// A constructed context-specific element wrapping the given children.
    pub fn context_specific(number: u64, children: Vec<Element>) -> Self {
        Self::constructed(TagClass::ContextSpecific, number, children)
    }

    /// Parse exactly one element spanning the whole of `input`.
    ///
    /// Zero-byte input fails with [`Asn1Error::EmptyInput`]; bytes left over
    /// after the element fail with [`Asn1Error::TrailingGarbage`].
    pub fn parse_ber(input: &[u8]) -> Result<Element, Asn1Error> {
        if input.is_empty() {
            return Err(Asn1Error::EmptyInput);
        }
        let mut decoder = Decoder::new(input);
        let element = decoder.read_element()?;
        if !decoder.is_empty() {
            return Err(Asn1Error::TrailingGarbage {
                remaining: decoder.remaining().len(),
            });
        }
        Ok(element)
    }

    /// Serialize to canonical DER.
    ///
    /// Constructed string encodings are fused first, then the tree is
    /// encoded with minimal lengths, sorted SET members, and normalized
    /// BOOLEAN content.
    pub fn into_der(mut self) -> Result<Vec<u8>, Asn1Error> {
        canon::normalize(&mut self)?;
        Ok(encoder::encode(&self))
    }
}
