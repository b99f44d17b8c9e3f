//! Pure-Rust key provider.
//!
//! EC keys are parsed with `p256` / `p384` / `p521`, Ed25519 keys with
//! `ed25519-dalek` and RSA keys with `rsa`. Each backend sits behind the
//! crate feature of the same algorithm family; a key whose backend is
//! compiled out is rejected with [`NativeKeyError::Unavailable`].

use super::{KeyProvider, UnsignedInteger};
use crate::{
    CoseKeyError,
    cose_key::KeyType,
    curve::EcCurve,
    import::import_cose_public_key,
    raw::ec_public_key_to_raw,
};
use thiserror::Error;

#[cfg(feature = "ed25519")]
use ed25519_dalek::pkcs8::DecodePublicKey as _;
#[cfg(feature = "es256")]
use p256::{elliptic_curve::sec1::ToEncodedPoint as _, pkcs8::DecodePublicKey as _};
#[cfg(feature = "es384")]
use p384::{elliptic_curve::sec1::ToEncodedPoint as _, pkcs8::DecodePublicKey as _};
#[cfg(feature = "es512")]
use p521::{elliptic_curve::sec1::ToEncodedPoint as _, pkcs8::DecodePublicKey as _};

/// Errors from the native provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NativeKeyError {
    /// The SubjectPublicKeyInfo did not parse, or its point is not on the
    /// curve.
    #[error("invalid SubjectPublicKeyInfo: {0}")]
    Spki(String),

    /// The RSA modulus or exponent was refused.
    #[error("invalid RSA public key: {0}")]
    Rsa(String),

    /// Support for the algorithm is not compiled in.
    #[error("{0} support is not enabled")]
    Unavailable(&'static str),
}

/// A public key parsed by the native provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativePublicKey {
    /// NIST P-256.
    #[cfg(feature = "es256")]
    P256(p256::PublicKey),
    /// NIST P-384.
    #[cfg(feature = "es384")]
    P384(p384::PublicKey),
    /// NIST P-521.
    #[cfg(feature = "es512")]
    P521(p521::PublicKey),
    /// Ed25519.
    #[cfg(feature = "ed25519")]
    Ed25519(ed25519_dalek::VerifyingKey),
    /// RSA.
    #[cfg(feature = "rsa")]
    Rsa(rsa::RsaPublicKey),
}

impl NativePublicKey {
    /// Decode CBOR COSE_Key bytes and import them with [`NativeProvider`].
    ///
    /// # Errors
    ///
    /// See [`import_cose_public_key`].
    pub fn from_cose(bytes: &[u8]) -> Result<Self, CoseKeyError> {
        import_cose_public_key(&NativeProvider, bytes)
    }

    /// The COSE key type of this key.
    #[must_use]
    pub const fn key_type(&self) -> KeyType {
        match self {
            #[cfg(feature = "es256")]
            NativePublicKey::P256(_) => KeyType::Ec2,
            #[cfg(feature = "es384")]
            NativePublicKey::P384(_) => KeyType::Ec2,
            #[cfg(feature = "es512")]
            NativePublicKey::P521(_) => KeyType::Ec2,
            #[cfg(feature = "ed25519")]
            NativePublicKey::Ed25519(_) => KeyType::Okp,
            #[cfg(feature = "rsa")]
            NativePublicKey::Rsa(_) => KeyType::Rsa,
        }
    }

    /// The curve of an EC key.
    #[must_use]
    pub const fn curve(&self) -> Option<EcCurve> {
        match self {
            #[cfg(feature = "es256")]
            NativePublicKey::P256(_) => Some(EcCurve::P256),
            #[cfg(feature = "es384")]
            NativePublicKey::P384(_) => Some(EcCurve::P384),
            #[cfg(feature = "es512")]
            NativePublicKey::P521(_) => Some(EcCurve::P521),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// Export an EC key as an uncompressed point `0x04 || X || Y`, with each
    /// coordinate at the curve's full field width.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::UnsupportedKeyType`] for non-EC keys.
    pub fn to_raw_ec_point(&self) -> Result<Vec<u8>, CoseKeyError> {
        let (encoded, curve) = match self {
            #[cfg(feature = "es256")]
            NativePublicKey::P256(key) => (key.to_encoded_point(false).as_bytes().to_vec(), EcCurve::P256),
            #[cfg(feature = "es384")]
            NativePublicKey::P384(key) => (key.to_encoded_point(false).as_bytes().to_vec(), EcCurve::P384),
            #[cfg(feature = "es512")]
            NativePublicKey::P521(key) => (key.to_encoded_point(false).as_bytes().to_vec(), EcCurve::P521),
            #[allow(unreachable_patterns)]
            other => return Err(CoseKeyError::UnsupportedKeyType(other.key_type().cose_id())),
        };

        // An uncompressed SEC1 encoding is the tag followed by both affine
        // coordinates at equal width.
        let coordinates = encoded.get(1..).unwrap_or_default();
        let (x, y) = coordinates.split_at(coordinates.len() / 2);
        Ok(ec_public_key_to_raw(x, y, curve.field_size_bits()))
    }
}

/// [`KeyProvider`] backed by the RustCrypto crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeProvider;

impl KeyProvider for NativeProvider {
    type PublicKey = NativePublicKey;
    type Error = NativeKeyError;

    fn import_ec(&self, curve: EcCurve, spki: &[u8]) -> Result<NativePublicKey, NativeKeyError> {
        match curve {
            #[cfg(feature = "es256")]
            EcCurve::P256 => p256::PublicKey::from_public_key_der(spki)
                .map(NativePublicKey::P256)
                .map_err(spki_error),
            #[cfg(feature = "es384")]
            EcCurve::P384 => p384::PublicKey::from_public_key_der(spki)
                .map(NativePublicKey::P384)
                .map_err(spki_error),
            #[cfg(feature = "es512")]
            EcCurve::P521 => p521::PublicKey::from_public_key_der(spki)
                .map(NativePublicKey::P521)
                .map_err(spki_error),
            #[allow(unreachable_patterns)]
            unavailable => {
                let _ = spki;
                Err(NativeKeyError::Unavailable(match unavailable {
                    EcCurve::P256 => "P-256",
                    EcCurve::P384 => "P-384",
                    EcCurve::P521 => "P-521",
                }))
            }
        }
    }

    #[cfg(feature = "ed25519")]
    fn import_ed25519(&self, spki: &[u8]) -> Result<NativePublicKey, NativeKeyError> {
        ed25519_dalek::VerifyingKey::from_public_key_der(spki)
            .map(NativePublicKey::Ed25519)
            .map_err(spki_error)
    }

    #[cfg(not(feature = "ed25519"))]
    fn import_ed25519(&self, _spki: &[u8]) -> Result<NativePublicKey, NativeKeyError> {
        Err(NativeKeyError::Unavailable("Ed25519"))
    }

    #[cfg(feature = "rsa")]
    fn import_rsa(
        &self,
        modulus: UnsignedInteger<'_>,
        exponent: UnsignedInteger<'_>,
    ) -> Result<NativePublicKey, NativeKeyError> {
        rsa::RsaPublicKey::new(
            rsa::BigUint::from_bytes_be(modulus.as_bytes()),
            rsa::BigUint::from_bytes_be(exponent.as_bytes()),
        )
        .map(NativePublicKey::Rsa)
        .map_err(|e| NativeKeyError::Rsa(e.to_string()))
    }

    #[cfg(not(feature = "rsa"))]
    fn import_rsa(
        &self,
        _modulus: UnsignedInteger<'_>,
        _exponent: UnsignedInteger<'_>,
    ) -> Result<NativePublicKey, NativeKeyError> {
        Err(NativeKeyError::Unavailable("RSA"))
    }
}

#[allow(dead_code)]
fn spki_error(error: impl std::fmt::Display) -> NativeKeyError {
    NativeKeyError::Spki(error.to_string())
}
