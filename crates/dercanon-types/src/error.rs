/// ASN.1 parse and canonicalization errors.
///
/// Every failure is terminal for the call that produced it: no partial
/// output is returned, and errors from nested elements reach the caller
/// unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Asn1Error {
    // Structural parse errors
    #[error("empty input")]
    EmptyInput,
    #[error("truncated tag")]
    TruncatedTag,
    #[error("tag number too large")]
    TagTooLarge,
    #[error("truncated length")]
    TruncatedLength,
    #[error("declared length {declared} exceeds {remaining} remaining bytes")]
    LengthExceedsData { declared: u64, remaining: usize },
    #[error("indefinite length on primitive element (class {class}, tag {number})")]
    IndefiniteOnPrimitive { class: u8, number: u64 },
    #[error("constructed content overran its declared length (expected end at {expected}, reached {actual})")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("{remaining} trailing bytes after top-level element")]
    TrailingGarbage { remaining: usize },
    #[error("elements nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    // Canonicalization errors
    #[error("bit string: invalid sub-element at index {index}")]
    BitStringInvalidChild { index: usize },
    #[error("bit string: empty chunk at index {index}")]
    BitStringEmptyChunk { index: usize },
    #[error("bit string: non-final chunk {index} has {unused} unused bits")]
    BitStringNonZeroMiddle { index: usize, unused: u8 },
    #[error("octet string: invalid sub-element at index {index}")]
    OctetStringInvalidChild { index: usize },
    #[error("constructed string (tag {tag}): invalid sub-element at index {index}")]
    StringInvalidChild { tag: u64, index: usize },
}
