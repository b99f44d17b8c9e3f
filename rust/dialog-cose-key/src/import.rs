//! COSE_Key import.
//!
//! Importing happens in two steps. [`PublicKeyMaterial::from_cose`] decodes
//! the map and builds the provider-facing encoding: a SubjectPublicKeyInfo
//!
//! ```text
//! SEQUENCE {
//!     SEQUENCE { OID ecPublicKey, OID namedCurve }   -- or the Ed25519 AlgorithmIdentifier
//!     BIT STRING { 0x04 || X || Y }                  -- or the raw Ed25519 key
//! }
//! ```
//!
//! for EC2 and OKP keys, or a modulus/exponent pair for RSA keys.
//! [`PublicKeyMaterial::import`] then hands it to a [`KeyProvider`].

use crate::{
    CoseKeyError,
    cose_key::{CoseKey, KeyType, label},
    curve::{ED25519_ALGORITHM_IDENTIFIER, EC_PUBLIC_KEY_OID, EcCurve, OkpCurve, UNCOMPRESSED_POINT_TAG},
    der,
    provider::{KeyProvider, UnsignedInteger},
};

/// Decoded key material, ready for a [`KeyProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeyMaterial {
    /// An EC2 key as a DER SubjectPublicKeyInfo.
    Ec {
        /// Curve named in the key.
        curve: EcCurve,
        /// DER SubjectPublicKeyInfo.
        spki: Vec<u8>,
    },
    /// An Ed25519 OKP key as a DER SubjectPublicKeyInfo.
    Ed25519 {
        /// DER SubjectPublicKeyInfo.
        spki: Vec<u8>,
    },
    /// An RSA key's components, big-endian without leading zeros.
    Rsa {
        /// The modulus `n`.
        modulus: Vec<u8>,
        /// The public exponent `e`.
        exponent: Vec<u8>,
    },
}

impl PublicKeyMaterial {
    /// Decode CBOR COSE_Key bytes into key material.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::MalformedCoseKey`] if the CBOR does not decode
    /// or lacks a required field, [`CoseKeyError::UnsupportedKeyType`] or
    /// [`CoseKeyError::UnsupportedCurve`] for keys outside the supported set.
    pub fn from_cose(bytes: &[u8]) -> Result<Self, CoseKeyError> {
        Self::from_cose_key(&CoseKey::from_cbor(bytes)?)
    }

    /// Build key material from an already decoded COSE_Key.
    ///
    /// # Errors
    ///
    /// See [`PublicKeyMaterial::from_cose`].
    pub fn from_cose_key(key: &CoseKey) -> Result<Self, CoseKeyError> {
        let key_type = KeyType::try_from(key.key_type()?)?;

        match key_type {
            KeyType::Ec2 => {
                let crv = key.integer(label::CURVE)?;
                let curve = EcCurve::from_cose_id(crv).ok_or(CoseKeyError::UnsupportedCurve {
                    key_type,
                    curve: crv,
                })?;
                tracing::debug!(%curve, "building EC2 SubjectPublicKeyInfo");

                let spki = ec_spki(curve, key.bytes(label::X)?, key.bytes(label::Y)?)?;
                Ok(PublicKeyMaterial::Ec { curve, spki })
            }
            KeyType::Okp => {
                let crv = key.integer(label::CURVE)?;
                match OkpCurve::from_cose_id(crv) {
                    Some(OkpCurve::Ed25519) => {
                        tracing::debug!("building Ed25519 SubjectPublicKeyInfo");
                        let spki = ed25519_spki(key.bytes(label::X)?)?;
                        Ok(PublicKeyMaterial::Ed25519 { spki })
                    }
                    None => Err(CoseKeyError::UnsupportedCurve {
                        key_type,
                        curve: crv,
                    }),
                }
            }
            KeyType::Rsa => {
                tracing::debug!("reading RSA modulus and exponent");
                let modulus = UnsignedInteger::new(key.bytes(label::MODULUS)?);
                let exponent = UnsignedInteger::new(key.bytes(label::EXPONENT)?);
                Ok(PublicKeyMaterial::Rsa {
                    modulus: modulus.as_bytes().to_vec(),
                    exponent: exponent.as_bytes().to_vec(),
                })
            }
        }
    }

    /// The COSE key type this material came from.
    #[must_use]
    pub const fn key_type(&self) -> KeyType {
        match self {
            PublicKeyMaterial::Ec { .. } => KeyType::Ec2,
            PublicKeyMaterial::Ed25519 { .. } => KeyType::Okp,
            PublicKeyMaterial::Rsa { .. } => KeyType::Rsa,
        }
    }

    /// Hand the material to `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::KeyImportRejected`] with the provider's error
    /// attached if the provider refuses the key.
    pub fn import<P: KeyProvider>(&self, provider: &P) -> Result<P::PublicKey, CoseKeyError> {
        let result = match self {
            PublicKeyMaterial::Ec { curve, spki } => provider.import_ec(*curve, spki),
            PublicKeyMaterial::Ed25519 { spki } => provider.import_ed25519(spki),
            PublicKeyMaterial::Rsa { modulus, exponent } => provider.import_rsa(
                UnsignedInteger::new(modulus),
                UnsignedInteger::new(exponent),
            ),
        };

        result.map_err(|error| {
            tracing::debug!(key_type = %self.key_type(), %error, "key provider rejected public key");
            CoseKeyError::KeyImportRejected {
                key_type: self.key_type(),
                source: Box::new(error),
            }
        })
    }
}

/// Decode a CBOR COSE_Key and import it through `provider`.
///
/// # Errors
///
/// Any error from [`PublicKeyMaterial::from_cose`] or
/// [`PublicKeyMaterial::import`].
pub fn import_cose_public_key<P: KeyProvider>(
    provider: &P,
    bytes: &[u8],
) -> Result<P::PublicKey, CoseKeyError> {
    PublicKeyMaterial::from_cose(bytes)?.import(provider)
}

/// Build the SubjectPublicKeyInfo for an uncompressed EC point.
///
/// # Errors
///
/// Returns [`CoseKeyError::UnsupportedLength`] if the coordinates are too
/// long to encode.
pub fn ec_spki(curve: EcCurve, x: &[u8], y: &[u8]) -> Result<Vec<u8>, CoseKeyError> {
    let algorithm = der::encode_sequence(&[
        &der::encode_object_identifier(EC_PUBLIC_KEY_OID)?,
        &der::encode_object_identifier(curve.oid())?,
    ])?;

    let mut point = Vec::with_capacity(1 + x.len() + y.len());
    point.push(UNCOMPRESSED_POINT_TAG);
    point.extend_from_slice(x);
    point.extend_from_slice(y);

    der::encode_sequence(&[&algorithm, &der::encode_bit_string(&point)?])
}

/// Build the SubjectPublicKeyInfo for a raw Ed25519 public key.
///
/// # Errors
///
/// Returns [`CoseKeyError::UnsupportedLength`] if the key is too long to
/// encode.
pub fn ed25519_spki(public_key: &[u8]) -> Result<Vec<u8>, CoseKeyError> {
    der::encode_sequence(&[
        ED25519_ALGORITHM_IDENTIFIER,
        &der::encode_bit_string(public_key)?,
    ])
}
