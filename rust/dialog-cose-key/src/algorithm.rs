//! COSE algorithm identifiers and the signature schemes they name.

use crate::CoseKeyError;
use serde::{Deserialize, Serialize};

/// COSE algorithm identifiers understood by this crate.
///
/// Serializes as its IANA integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[allow(clippy::upper_case_acronyms)]
pub enum CoseAlgorithm {
    /// EdDSA (-8).
    EdDSA,
    /// ECDSA with SHA-256 (-7).
    ES256,
    /// ECDSA with SHA-384 (-35).
    ES384,
    /// ECDSA with SHA-512 (-36).
    ES512,
    /// RSASSA-PKCS1-v1_5 with SHA-256 (-257).
    RS256,
    /// RSASSA-PKCS1-v1_5 with SHA-384 (-258).
    RS384,
    /// RSASSA-PKCS1-v1_5 with SHA-512 (-259).
    RS512,
    /// RSASSA-PKCS1-v1_5 with SHA-1 (-65535).
    RS1,
}

impl CoseAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [CoseAlgorithm; 8] = [
        CoseAlgorithm::EdDSA,
        CoseAlgorithm::ES256,
        CoseAlgorithm::ES384,
        CoseAlgorithm::ES512,
        CoseAlgorithm::RS256,
        CoseAlgorithm::RS384,
        CoseAlgorithm::RS512,
        CoseAlgorithm::RS1,
    ];

    /// The IANA COSE code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            CoseAlgorithm::EdDSA => -8,
            CoseAlgorithm::ES256 => -7,
            CoseAlgorithm::ES384 => -35,
            CoseAlgorithm::ES512 => -36,
            CoseAlgorithm::RS256 => -257,
            CoseAlgorithm::RS384 => -258,
            CoseAlgorithm::RS512 => -259,
            CoseAlgorithm::RS1 => -65535,
        }
    }

    /// The provider-facing signature scheme for this algorithm.
    #[must_use]
    pub const fn signature_algorithm(self) -> SignatureAlgorithm {
        match self {
            CoseAlgorithm::EdDSA => SignatureAlgorithm::Ed25519,
            CoseAlgorithm::ES256 => SignatureAlgorithm::EcdsaSha256,
            CoseAlgorithm::ES384 => SignatureAlgorithm::EcdsaSha384,
            CoseAlgorithm::ES512 => SignatureAlgorithm::EcdsaSha512,
            CoseAlgorithm::RS256 => SignatureAlgorithm::RsaPkcs1Sha256,
            CoseAlgorithm::RS384 => SignatureAlgorithm::RsaPkcs1Sha384,
            CoseAlgorithm::RS512 => SignatureAlgorithm::RsaPkcs1Sha512,
            CoseAlgorithm::RS1 => SignatureAlgorithm::RsaPkcs1Sha1,
        }
    }
}

impl TryFrom<i64> for CoseAlgorithm {
    type Error = CoseKeyError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        CoseAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.code() == code)
            .ok_or_else(|| CoseKeyError::UnknownAlgorithm(code.to_string()))
    }
}

impl From<CoseAlgorithm> for i64 {
    fn from(alg: CoseAlgorithm) -> Self {
        alg.code()
    }
}

/// Signature schemes a key provider verifies with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    /// Pure Ed25519.
    Ed25519,
    /// ECDSA over SHA-256.
    EcdsaSha256,
    /// ECDSA over SHA-384.
    EcdsaSha384,
    /// ECDSA over SHA-512.
    EcdsaSha512,
    /// RSASSA-PKCS1-v1_5 over SHA-256.
    RsaPkcs1Sha256,
    /// RSASSA-PKCS1-v1_5 over SHA-384.
    RsaPkcs1Sha384,
    /// RSASSA-PKCS1-v1_5 over SHA-512.
    RsaPkcs1Sha512,
    /// RSASSA-PKCS1-v1_5 over SHA-1.
    RsaPkcs1Sha1,
}

impl SignatureAlgorithm {
    /// Standard name of the scheme (the ASN.1 name for the ECDSA and RSA
    /// variants).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SignatureAlgorithm::Ed25519 => "Ed25519",
            SignatureAlgorithm::EcdsaSha256 => "ecdsa-with-SHA256",
            SignatureAlgorithm::EcdsaSha384 => "ecdsa-with-SHA384",
            SignatureAlgorithm::EcdsaSha512 => "ecdsa-with-SHA512",
            SignatureAlgorithm::RsaPkcs1Sha256 => "sha256WithRSAEncryption",
            SignatureAlgorithm::RsaPkcs1Sha384 => "sha384WithRSAEncryption",
            SignatureAlgorithm::RsaPkcs1Sha512 => "sha512WithRSAEncryption",
            SignatureAlgorithm::RsaPkcs1Sha1 => "sha1WithRSAEncryption",
        }
    }
}

impl std::fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a COSE algorithm code to its signature scheme.
///
/// # Errors
///
/// Returns [`CoseKeyError::UnknownAlgorithm`] for codes outside the
/// supported set.
pub fn algorithm_name(code: i64) -> Result<SignatureAlgorithm, CoseKeyError> {
    CoseAlgorithm::try_from(code).map(CoseAlgorithm::signature_algorithm)
}

/// Map a JWS `alg` header value to a signature scheme.
///
/// Only `RS256` is accepted. Callers depend on this staying narrow, so do not
/// extend it into a general JWS registry.
///
/// # Errors
///
/// Returns [`CoseKeyError::UnknownAlgorithm`] for anything but `"RS256"`.
pub fn jws_algorithm_to_signature_algorithm(
    alg: &str,
) -> Result<SignatureAlgorithm, CoseKeyError> {
    match alg {
        "RS256" => Ok(SignatureAlgorithm::RsaPkcs1Sha256),
        other => Err(CoseKeyError::UnknownAlgorithm(other.to_string())),
    }
}
