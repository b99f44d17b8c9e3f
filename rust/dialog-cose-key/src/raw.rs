//! Raw uncompressed EC points.
//!
//! A raw point is `X || Y`, optionally preceded by the SEC1 `0x04` marker,
//! with both coordinates as fixed-width big-endian integers. The curve is
//! inferred from the coordinate width alone.

use crate::{
    CoseKeyError,
    cose_key::{CoseKey, KeyType, label},
    curve::{EcCurve, UNCOMPRESSED_POINT_TAG},
};

/// Build the COSE_Key map for a raw P-256, P-384 or P-521 point.
///
/// Accepts 64, 96 or 132 bytes, or the same lengths plus one when the first
/// byte is `0x04`. The coordinates are copied as-is.
///
/// # Errors
///
/// Returns [`CoseKeyError::InvalidKeyLength`] for any other shape.
pub fn raw_ec_key_to_cose_key(bytes: &[u8]) -> Result<CoseKey, CoseKeyError> {
    // Coordinate pairs have even length, so only odd-length input can carry the marker.
    let coordinates = match bytes {
        [UNCOMPRESSED_POINT_TAG, rest @ ..] if bytes.len() % 2 == 1 => rest,
        _ => bytes,
    };
    let curve = EcCurve::from_coordinates_len(coordinates.len()).ok_or(
        CoseKeyError::InvalidKeyLength {
            length: bytes.len(),
            leading_byte: bytes.first().copied(),
        },
    )?;
    let (x, y) = coordinates.split_at(coordinates.len() / 2);

    Ok(CoseKey::new()
        .with(label::KEY_TYPE, KeyType::Ec2.cose_id())
        .with(label::ALGORITHM, curve.algorithm().code())
        .with(label::CURVE, curve.cose_id())
        .with(label::X, x)
        .with(label::Y, y))
}

/// Convert a raw P-256, P-384 or P-521 point to CBOR-encoded COSE_Key bytes.
///
/// The map is `{1: 2, 3: alg, -1: crv, -2: x, -3: y}`, with the algorithm
/// and curve inferred from the point length.
///
/// # Errors
///
/// Returns [`CoseKeyError::InvalidKeyLength`] if the point does not have one
/// of the accepted lengths.
pub fn raw_ec_key_to_cose(bytes: &[u8]) -> Result<Vec<u8>, CoseKeyError> {
    raw_ec_key_to_cose_key(bytes)?.to_cbor()
}

/// Encode affine coordinates as an uncompressed point `0x04 || X || Y`.
///
/// `x` and `y` are unsigned big-endian integers of any length. Each is
/// left-padded with zeros, or stripped of leading bytes, to exactly
/// `ceil(field_size_bits / 8)` bytes.
#[must_use]
pub fn ec_public_key_to_raw(x: &[u8], y: &[u8], field_size_bits: usize) -> Vec<u8> {
    let width = field_size_bits.div_ceil(8);

    let mut raw = Vec::with_capacity(1 + 2 * width);
    raw.push(UNCOMPRESSED_POINT_TAG);
    extend_fixed_width(&mut raw, x, width);
    extend_fixed_width(&mut raw, y, width);
    raw
}

fn extend_fixed_width(buf: &mut Vec<u8>, coordinate: &[u8], width: usize) {
    let kept = &coordinate[coordinate.len().saturating_sub(width)..];
    buf.resize(buf.len() + (width - kept.len()), 0x00);
    buf.extend_from_slice(kept);
}
