#![forbid(unsafe_code)]
#![doc = "ASN.1 BER to DER canonicalization: parse permissive BER, re-encode as DER."]

mod canon;
mod decoder;
mod element;
mod encoder;
mod tag;

pub use decoder::{Decoder, MAX_DEPTH};
pub use dercanon_types::Asn1Error;

/// ASN.1 universal tag numbers.
pub mod tags {
    pub const BOOLEAN: u64 = 0x01;
    pub const INTEGER: u64 = 0x02;
    pub const BIT_STRING: u64 = 0x03;
    pub const OCTET_STRING: u64 = 0x04;
    pub const NULL: u64 = 0x05;
    pub const OID: u64 = 0x06;
    pub const UTF8_STRING: u64 = 0x0C;
    pub const SEQUENCE: u64 = 0x10;
    pub const SET: u64 = 0x11;
    pub const NUMERIC_STRING: u64 = 0x12;
    pub const PRINTABLE_STRING: u64 = 0x13;
    pub const T61_STRING: u64 = 0x14;
    pub const VIDEOTEX_STRING: u64 = 0x15;
    pub const IA5_STRING: u64 = 0x16;
    pub const GRAPHIC_STRING: u64 = 0x19;
    pub const VISIBLE_STRING: u64 = 0x1A;
    pub const GENERAL_STRING: u64 = 0x1B;
    pub const UNIVERSAL_STRING: u64 = 0x1C;
    pub const BMP_STRING: u64 = 0x1E;
}

/// ASN.1 tag class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

/// A parsed ASN.1 tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub class: TagClass,
    pub constructed: bool,
    pub number: u64,
}

/// A parsed ASN.1 element: one TLV and, when constructed, its children.
///
/// Exactly one of `value` and `children` is populated: primitive elements
/// hold their content bytes in `value`, constructed elements hold their
/// sub-elements in `children`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub value: Vec<u8>,
    pub children: Vec<Element>,
}

/// Re-encode a BER/DER byte sequence as canonical DER.
///
/// The input must contain exactly one top-level element. BER permissive
/// forms are accepted and rewritten: indefinite lengths become definite,
/// non-minimal lengths become minimal, constructed string / bit-string /
/// octet-string segments are fused into primitives, SET members are sorted
/// by their encoded bytes, and single-byte BOOLEAN content is normalized to
/// `0x00`/`0xFF`. Input that is already DER comes back bit-identical.
///
/// BOOLEAN normalization also applies to one-byte context-specific `[1]`
/// primitives, on the assumption that `[1] IMPLICIT BOOLEAN` is in use.
/// This is a schema-unaware heuristic: in schemas where `[1]` tags some
/// other single-byte type the content byte is rewritten all the same.
pub fn canonicalize(input: &[u8]) -> Result<Vec<u8>, Asn1Error> {
    Element::parse_ber(input)?.into_der()
}
