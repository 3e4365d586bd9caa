//! BER-tolerant ASN.1 element parsing.

use crate::{Element, Tag};
use dercanon_types::Asn1Error;

/// Maximum element nesting depth accepted by [`Decoder::read_element`].
/// Deeper input fails with [`Asn1Error::NestingTooDeep`]. Canonicalization
/// and encoding walk the parsed tree, so the same bound covers them.
pub const MAX_DEPTH: usize = 64;

/// Decoded length field of a TLV.
enum Length {
    Definite(u64),
    Indefinite,
}

/// A positional reader over a BER/DER byte buffer.
///
/// [`Decoder::read_element`] consumes one element per call, so a buffer of
/// concatenated elements can be drained by reading until [`Decoder::is_empty`].
/// Whole-input parsing with trailing-byte rejection is
/// [`Element::parse_ber`].
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Create a new decoder over the given data.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the remaining unconsumed bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Parse one element, consuming its tag, length, and content.
    ///
    /// Accepts the BER permissive forms: non-minimal definite lengths, and
    /// indefinite lengths on constructed elements (terminated by the
    /// two-zero-octet end-of-contents marker, which never appears in the
    /// returned tree).
    pub fn read_element(&mut self) -> Result<Element, Asn1Error> {
        self.read_element_at(0)
    }

    fn read_element_at(&mut self, depth: usize) -> Result<Element, Asn1Error> {
        if depth >= MAX_DEPTH {
            return Err(Asn1Error::NestingTooDeep { limit: MAX_DEPTH });
        }

        let (tag, tag_len) = Tag::from_bytes(self.remaining())?;
        self.pos += tag_len;

        match self.read_length()? {
            Length::Definite(declared) => self.read_definite(tag, declared, depth),
            Length::Indefinite => self.read_indefinite(tag, depth),
        }
    }

    /// Decode one length field: short form, long form, or the indefinite
    /// marker. Non-minimal long-form encodings are tolerated on input; the
    /// encoder emits minimal form only.
    fn read_length(&mut self) -> Result<Length, Asn1Error> {
        let first = *self.data.get(self.pos).ok_or(Asn1Error::TruncatedLength)?;
        self.pos += 1;

        if first & 0x80 == 0 {
            return Ok(Length::Definite(first as u64));
        }

        let num_octets = (first & 0x7F) as usize;
        if num_octets == 0 {
            return Ok(Length::Indefinite);
        }
        if self.data.len() - self.pos < num_octets {
            return Err(Asn1Error::TruncatedLength);
        }

        // Saturate instead of overflowing; the bounds check in
        // `read_definite` rejects anything the input cannot contain.
        let mut declared: u64 = 0;
        for &octet in &self.data[self.pos..self.pos + num_octets] {
            declared = declared.saturating_mul(256).saturating_add(octet as u64);
        }
        self.pos += num_octets;
        Ok(Length::Definite(declared))
    }

    fn read_definite(
        &mut self,
        tag: Tag,
        declared: u64,
        depth: usize,
    ) -> Result<Element, Asn1Error> {
        let remaining = self.data.len() - self.pos;
        if declared > remaining as u64 {
            return Err(Asn1Error::LengthExceedsData {
                declared,
                remaining,
            });
        }
        let length = declared as usize;

        if !tag.constructed {
            let value = self.data[self.pos..self.pos + length].to_vec();
            self.pos += length;
            return Ok(Element {
                tag,
                value,
                children: Vec::new(),
            });
        }

        let end = self.pos + length;
        let mut children = Vec::new();
        while self.pos < end {
            children.push(self.read_element_at(depth + 1)?);
        }
        if self.pos != end {
            return Err(Asn1Error::LengthMismatch {
                expected: end,
                actual: self.pos,
            });
        }
        Ok(Element {
            tag,
            value: Vec::new(),
            children,
        })
    }

    fn read_indefinite(&mut self, tag: Tag, depth: usize) -> Result<Element, Asn1Error> {
        if !tag.constructed {
            return Err(Asn1Error::IndefiniteOnPrimitive {
                class: tag.class.bits(),
                number: tag.number,
            });
        }

        let mut children = Vec::new();
        loop {
            if self.remaining().starts_with(&[0x00, 0x00]) {
                // End-of-contents marker
                self.pos += 2;
                return Ok(Element {
                    tag,
                    value: Vec::new(),
                    children,
                });
            }
            children.push(self.read_element_at(depth + 1)?);
        }
    }
}
