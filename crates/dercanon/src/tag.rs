//! ASN.1 identifier-octet parsing and encoding.

use crate::{Tag, TagClass};
use dercanon_types::Asn1Error;

/// Continuation octets a long-form tag number may span. A seventh
/// continuation octet that does not terminate the number is rejected, so
/// accepted tag numbers fit 49 bits.
const MAX_TAG_OCTETS: usize = 6;

impl TagClass {
    /// The two-bit class value from bits 7-6 of the identifier octet.
    pub(crate) fn bits(self) -> u8 {
        match self {
            TagClass::Universal => 0,
            TagClass::Application => 1,
            TagClass::ContextSpecific => 2,
            TagClass::Private => 3,
        }
    }
}

impl Tag {
    /// Parse a tag from the first bytes of `input`.
    /// Returns the tag and the number of bytes consumed.
    pub fn from_bytes(input: &[u8]) -> Result<(Self, usize), Asn1Error> {
        let first = *input.first().ok_or(Asn1Error::TruncatedTag)?;
        let class = match (first >> 6) & 0x03 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        };
        let constructed = (first & 0x20) != 0;

        let low_bits = first & 0x1F;
        if low_bits < 0x1F {
            // Short form tag number
            let tag = Tag {
                class,
                constructed,
                number: low_bits as u64,
            };
            return Ok((tag, 1));
        }

        // Long form: each octet contributes its low seven bits, big-endian,
        // until an octet with a cleared high bit terminates the number.
        let mut number: u64 = 0;
        let mut consumed = 0;
        loop {
            let octet = *input.get(1 + consumed).ok_or(Asn1Error::TruncatedTag)?;
            consumed += 1;
            number = (number << 7) | (octet & 0x7F) as u64;
            if octet & 0x80 == 0 {
                break;
            }
            if consumed > MAX_TAG_OCTETS {
                return Err(Asn1Error::TagTooLarge);
            }
        }

        let tag = Tag {
            class,
            constructed,
            number,
        };
        Ok((tag, 1 + consumed))
    }

    /// Encode this tag to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let class_bits = self.class.bits() << 6;
        let constructed_bit = if self.constructed { 0x20 } else { 0x00 };

        if self.number < 0x1F {
            return vec![class_bits | constructed_bit | self.number as u8];
        }

        let mut out = vec![class_bits | constructed_bit | 0x1F];
        let mut groups = Vec::new();
        let mut num = self.number;
        while num > 0 {
            groups.push((num & 0x7F) as u8);
            num >>= 7;
        }
        groups.reverse();
        for (i, group) in groups.iter().enumerate() {
            if i < groups.len() - 1 {
                out.push(group | 0x80);
            } else {
                out.push(*group);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sequence_tag() {
        let (tag, len) = Tag::from_bytes(&[0x30]).unwrap();
        assert_eq!(tag.class, TagClass::Universal);
        assert!(tag.constructed);
        assert_eq!(tag.number, 0x10);
        assert_eq!(len, 1);
    }

    #[test]
    fn test_parse_primitive_tag() {
        let (tag, len) = Tag::from_bytes(&[0x02, 0x01]).unwrap();
        assert_eq!(tag.class, TagClass::Universal);
        assert!(!tag.constructed);
        assert_eq!(tag.number, 0x02);
        assert_eq!(len, 1);
    }

    #[test]
    fn test_parse_classes() {
        let (tag, _) = Tag::from_bytes(&[0x41]).unwrap();
        assert_eq!(tag.class, TagClass::Application);
        let (tag, _) = Tag::from_bytes(&[0xA0]).unwrap();
        assert_eq!(tag.class, TagClass::ContextSpecific);
        let (tag, _) = Tag::from_bytes(&[0xC1]).unwrap();
        assert_eq!(tag.class, TagClass::Private);
    }

    #[test]
    fn test_short_form_boundary() {
        // 30 is the largest short-form number; 31 needs two octets.
        let (tag, len) = Tag::from_bytes(&[0x1E]).unwrap();
        assert_eq!(tag.number, 30);
        assert_eq!(len, 1);

        let (tag, len) = Tag::from_bytes(&[0x1F, 0x1F]).unwrap();
        assert_eq!(tag.number, 31);
        assert_eq!(len, 2);
    }

    #[test]
    fn test_parse_long_form() {
        // Context-specific constructed tag 200: BF 81 48
        let (tag, len) = Tag::from_bytes(&[0xBF, 0x81, 0x48]).unwrap();
        assert_eq!(tag.class, TagClass::ContextSpecific);
        assert!(tag.constructed);
        assert_eq!(tag.number, 200);
        assert_eq!(len, 3);
    }

    #[test]
    fn test_truncated_long_form() {
        let err = Tag::from_bytes(&[0x1F]).unwrap_err();
        assert!(matches!(err, Asn1Error::TruncatedTag));

        let err = Tag::from_bytes(&[0x1F, 0x81]).unwrap_err();
        assert!(matches!(err, Asn1Error::TruncatedTag));
    }

    #[test]
    fn test_empty_input() {
        let err = Tag::from_bytes(&[]).unwrap_err();
        assert!(matches!(err, Asn1Error::TruncatedTag));
    }

    #[test]
    fn test_tag_number_bound() {
        // Seven continuation octets, none terminating
        let err = Tag::from_bytes(&[0x1F, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80]).unwrap_err();
        assert!(matches!(err, Asn1Error::TagTooLarge));

        // Seventh octet terminates: still accepted
        let (tag, len) =
            Tag::from_bytes(&[0x1F, 0x81, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00]).unwrap();
        assert_eq!(tag.number, 1u64 << 42);
        assert_eq!(len, 8);
    }

    #[test]
    fn test_encode_short_form() {
        let tag = Tag {
            class: TagClass::Universal,
            constructed: true,
            number: 0x10,
        };
        assert_eq!(tag.to_bytes(), vec![0x30]);
    }

    #[test]
    fn test_encode_long_form() {
        let tag = Tag {
            class: TagClass::ContextSpecific,
            constructed: true,
            number: 200,
        };
        assert_eq!(tag.to_bytes(), vec![0xBF, 0x81, 0x48]);
    }

    #[test]
    fn test_roundtrip() {
        for number in [0, 1, 30, 31, 127, 128, 200, 16383, 16384, 1 << 40] {
            let tag = Tag {
                class: TagClass::Private,
                constructed: false,
                number,
            };
            let bytes = tag.to_bytes();
            let (parsed, len) = Tag::from_bytes(&bytes).unwrap();
            assert_eq!(parsed, tag);
            assert_eq!(len, bytes.len());
        }
    }
}
