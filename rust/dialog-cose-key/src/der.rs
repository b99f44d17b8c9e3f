//! Minimal ASN.1 DER encoders.
//!
//! Only the handful of constructions needed to assemble a
//! SubjectPublicKeyInfo are provided. Every function is pure and returns a
//! freshly allocated buffer.

use crate::CoseKeyError;

/// Universal tag for `BIT STRING`.
pub const TAG_BIT_STRING: u8 = 0x03;

/// Universal tag for `OBJECT IDENTIFIER`.
pub const TAG_OBJECT_IDENTIFIER: u8 = 0x06;

/// Universal tag for constructed `SEQUENCE`.
pub const TAG_SEQUENCE: u8 = 0x30;

/// Largest length representable by [`encode_length`].
pub const MAX_LENGTH: usize = 0xffff;

/// Encode a DER length prefix.
///
/// Lengths up to 127 use the single-byte short form; up to 255 use `0x81`
/// followed by one byte; up to 65535 use `0x82` followed by two big-endian
/// bytes.
///
/// # Errors
///
/// Returns [`CoseKeyError::UnsupportedLength`] for lengths above 65535.
pub fn encode_length(length: usize) -> Result<Vec<u8>, CoseKeyError> {
    match length {
        0..=0x7f => Ok(vec![length as u8]),
        0x80..=0xff => Ok(vec![0x81, length as u8]),
        0x100..=MAX_LENGTH => Ok(vec![0x82, (length >> 8) as u8, (length & 0xff) as u8]),
        _ => Err(CoseKeyError::UnsupportedLength(length)),
    }
}

/// Encode an `OBJECT IDENTIFIER` from its pre-encoded content bytes.
///
/// # Errors
///
/// Returns [`CoseKeyError::UnsupportedLength`] if `oid` is too long to encode.
pub fn encode_object_identifier(oid: &[u8]) -> Result<Vec<u8>, CoseKeyError> {
    encode_tlv(TAG_OBJECT_IDENTIFIER, &[oid])
}

/// Encode a `BIT STRING` whose content is a whole number of bytes.
///
/// The unused-bits octet is always zero.
///
/// # Errors
///
/// Returns [`CoseKeyError::UnsupportedLength`] if `content` is too long to encode.
pub fn encode_bit_string(content: &[u8]) -> Result<Vec<u8>, CoseKeyError> {
    encode_tlv(TAG_BIT_STRING, &[&[0x00], content])
}

/// Encode a `SEQUENCE` of already-encoded elements, in the order given.
///
/// # Errors
///
/// Returns [`CoseKeyError::UnsupportedLength`] if the combined parts are too
/// long to encode.
pub fn encode_sequence(parts: &[&[u8]]) -> Result<Vec<u8>, CoseKeyError> {
    encode_tlv(TAG_SEQUENCE, parts)
}

fn encode_tlv(tag: u8, parts: &[&[u8]]) -> Result<Vec<u8>, CoseKeyError> {
    let content_len: usize = parts.iter().map(|part| part.len()).sum();
    let length = encode_length(content_len)?;

    let mut buf = Vec::with_capacity(1 + length.len() + content_len);
    buf.push(tag);
    buf.extend_from_slice(&length);
    for part in parts {
        buf.extend_from_slice(part);
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    #[test]
    fn it_encodes_short_and_long_form_lengths() -> TestResult {
        assert_eq!(encode_length(0)?, vec![0x00]);
        assert_eq!(encode_length(127)?, vec![0x7f]);
        assert_eq!(encode_length(128)?, vec![0x81, 0x80]);
        assert_eq!(encode_length(255)?, vec![0x81, 0xff]);
        assert_eq!(encode_length(256)?, vec![0x82, 0x01, 0x00]);
        assert_eq!(encode_length(65535)?, vec![0x82, 0xff, 0xff]);
        Ok(())
    }

    #[test]
    fn it_refuses_lengths_beyond_two_bytes() {
        assert!(matches!(
            encode_length(65536),
            Err(CoseKeyError::UnsupportedLength(65536))
        ));
    }

    #[test]
    fn it_encodes_an_object_identifier() -> TestResult {
        // 1.3.101.112 (id-Ed25519)
        assert_eq!(
            encode_object_identifier(&[0x2b, 0x65, 0x70])?,
            vec![0x06, 0x03, 0x2b, 0x65, 0x70]
        );
        Ok(())
    }

    #[test]
    fn it_prefixes_bit_strings_with_zero_unused_bits() -> TestResult {
        assert_eq!(encode_bit_string(&[0xab, 0xcd])?, vec![0x03, 0x03, 0x00, 0xab, 0xcd]);
        assert_eq!(encode_bit_string(&[])?, vec![0x03, 0x01, 0x00]);
        Ok(())
    }

    #[test]
    fn it_counts_the_unused_bits_octet_in_long_bit_strings() -> TestResult {
        // A P-521 uncompressed point is 133 bytes, which pushes the
        // BIT STRING into the long length form.
        let content = vec![0x04; 133];
        let encoded = encode_bit_string(&content)?;
        assert_eq!(&encoded[..4], &[0x03, 0x81, 134, 0x00]);
        assert_eq!(encoded.len(), 4 + 133);
        Ok(())
    }

    #[test]
    fn it_concatenates_sequence_parts_in_order() -> TestResult {
        let first = encode_object_identifier(&[0x2b, 0x65, 0x70])?;
        let second = encode_bit_string(&[0x01])?;
        assert_eq!(
            encode_sequence(&[&first, &second])?,
            vec![0x30, 0x09, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x02, 0x00, 0x01]
        );
        assert_eq!(encode_sequence(&[])?, vec![0x30, 0x00]);
        Ok(())
    }
}
