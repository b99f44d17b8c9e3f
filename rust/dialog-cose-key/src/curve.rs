//! Curve registry: COSE curve identifiers, ASN.1 object identifiers and
//! field sizes.
//!
//! OIDs are stored as pre-encoded DER content bytes, ready to be wrapped by
//! [`crate::der::encode_object_identifier`].

use crate::algorithm::CoseAlgorithm;

/// OID 1.2.840.10045.2.1 (`id-ecPublicKey`).
pub const EC_PUBLIC_KEY_OID: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01];

/// OID 1.2.840.10045.3.1.7 (`secp256r1`).
pub const P256_OID: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07];

/// OID 1.3.132.0.34 (`secp384r1`).
pub const P384_OID: &[u8] = &[0x2b, 0x81, 0x04, 0x00, 0x22];

/// OID 1.3.132.0.35 (`secp521r1`).
pub const P521_OID: &[u8] = &[0x2b, 0x81, 0x04, 0x00, 0x23];

/// The complete `AlgorithmIdentifier` for Ed25519: `SEQUENCE { OID 1.3.101.112 }`.
pub const ED25519_ALGORITHM_IDENTIFIER: &[u8] = &[0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70];

/// Marker byte of an uncompressed SEC1 point.
pub const UNCOMPRESSED_POINT_TAG: u8 = 0x04;

/// NIST curves usable with `EC2` COSE keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    /// NIST P-256 (`crv` 1).
    P256,
    /// NIST P-384 (`crv` 2).
    P384,
    /// NIST P-521 (`crv` 3).
    P521,
}

impl EcCurve {
    /// All supported curves, in COSE identifier order.
    pub const ALL: [EcCurve; 3] = [EcCurve::P256, EcCurve::P384, EcCurve::P521];

    /// COSE `crv` value.
    #[must_use]
    pub const fn cose_id(self) -> i64 {
        match self {
            EcCurve::P256 => 1,
            EcCurve::P384 => 2,
            EcCurve::P521 => 3,
        }
    }

    /// Look up a curve by its COSE `crv` value.
    #[must_use]
    pub const fn from_cose_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(EcCurve::P256),
            2 => Some(EcCurve::P384),
            3 => Some(EcCurve::P521),
            _ => None,
        }
    }

    /// Infer the curve from the combined length of both coordinates
    /// (64, 96 or 132 bytes).
    #[must_use]
    pub const fn from_coordinates_len(len: usize) -> Option<Self> {
        match len {
            64 => Some(EcCurve::P256),
            96 => Some(EcCurve::P384),
            132 => Some(EcCurve::P521),
            _ => None,
        }
    }

    /// The signature algorithm conventionally paired with this curve.
    #[must_use]
    pub const fn algorithm(self) -> CoseAlgorithm {
        match self {
            EcCurve::P256 => CoseAlgorithm::ES256,
            EcCurve::P384 => CoseAlgorithm::ES384,
            EcCurve::P521 => CoseAlgorithm::ES512,
        }
    }

    /// Pre-encoded named-curve OID.
    #[must_use]
    pub const fn oid(self) -> &'static [u8] {
        match self {
            EcCurve::P256 => P256_OID,
            EcCurve::P384 => P384_OID,
            EcCurve::P521 => P521_OID,
        }
    }

    /// Bit size of the curve's base field.
    #[must_use]
    pub const fn field_size_bits(self) -> usize {
        match self {
            EcCurve::P256 => 256,
            EcCurve::P384 => 384,
            EcCurve::P521 => 521,
        }
    }

    /// Width in bytes of one affine coordinate.
    #[must_use]
    pub const fn field_size_bytes(self) -> usize {
        self.field_size_bits().div_ceil(8)
    }
}

impl std::fmt::Display for EcCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EcCurve::P256 => "P-256",
            EcCurve::P384 => "P-384",
            EcCurve::P521 => "P-521",
        })
    }
}

/// Curves usable with `OKP` COSE keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OkpCurve {
    /// Ed25519 (`crv` 6).
    Ed25519,
}

impl OkpCurve {
    /// COSE `crv` value.
    #[must_use]
    pub const fn cose_id(self) -> i64 {
        match self {
            OkpCurve::Ed25519 => 6,
        }
    }

    /// Look up a curve by its COSE `crv` value. Only Ed25519 is supported.
    #[must_use]
    pub const fn from_cose_id(id: i64) -> Option<Self> {
        match id {
            6 => Some(OkpCurve::Ed25519),
            _ => None,
        }
    }
}
