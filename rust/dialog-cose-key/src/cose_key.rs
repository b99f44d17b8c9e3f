//! Decoded COSE_Key maps.
//!
//! A [`CoseKey`] holds the integer-labelled entries of a COSE_Key whose
//! values are integers or byte strings. Accessors are typed and fail with
//! [`CoseKeyError::MalformedCoseKey`] when a field is missing or holds the
//! other kind of value; nothing is coerced.

use crate::{CoseKeyError, algorithm::CoseAlgorithm};
use ciborium::value::{Integer, Value};
use std::collections::BTreeMap;

/// Common COSE_Key labels.
pub mod label {
    /// `kty`: key type.
    pub const KEY_TYPE: i64 = 1;
    /// `alg`: algorithm.
    pub const ALGORITHM: i64 = 3;
    /// `crv` for EC2/OKP keys, `n` for RSA keys.
    pub const CURVE: i64 = -1;
    /// `x` for EC2/OKP keys, `e` for RSA keys.
    pub const X: i64 = -2;
    /// `y` for EC2 keys.
    pub const Y: i64 = -3;
    /// `n` for RSA keys.
    pub const MODULUS: i64 = -1;
    /// `e` for RSA keys.
    pub const EXPONENT: i64 = -2;
}

/// COSE key types handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Octet key pair (`kty` 1).
    Okp,
    /// Elliptic curve with x and y coordinates (`kty` 2).
    Ec2,
    /// RSA (`kty` 3).
    Rsa,
}

impl KeyType {
    /// COSE `kty` value.
    #[must_use]
    pub const fn cose_id(self) -> i64 {
        match self {
            KeyType::Okp => 1,
            KeyType::Ec2 => 2,
            KeyType::Rsa => 3,
        }
    }
}

impl TryFrom<i64> for KeyType {
    type Error = CoseKeyError;

    fn try_from(kty: i64) -> Result<Self, Self::Error> {
        match kty {
            1 => Ok(KeyType::Okp),
            2 => Ok(KeyType::Ec2),
            3 => Ok(KeyType::Rsa),
            other => Err(CoseKeyError::UnsupportedKeyType(other)),
        }
    }
}

impl std::fmt::Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            KeyType::Okp => "OKP",
            KeyType::Ec2 => "EC2",
            KeyType::Rsa => "RSA",
        })
    }
}

/// A COSE_Key parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoseValue {
    /// A CBOR integer that fits in an `i64`.
    Integer(i64),
    /// A CBOR byte string.
    Bytes(Vec<u8>),
}

impl From<i64> for CoseValue {
    fn from(value: i64) -> Self {
        CoseValue::Integer(value)
    }
}

impl From<Vec<u8>> for CoseValue {
    fn from(value: Vec<u8>) -> Self {
        CoseValue::Bytes(value)
    }
}

impl From<&[u8]> for CoseValue {
    fn from(value: &[u8]) -> Self {
        CoseValue::Bytes(value.to_vec())
    }
}

/// Integer-labelled entries of one COSE_Key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoseKey {
    entries: BTreeMap<i64, CoseValue>,
}

impl CoseKey {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `label` to `value`, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, label: i64, value: impl Into<CoseValue>) -> Self {
        self.insert(label, value);
        self
    }

    /// Set `label` to `value`, replacing any previous value.
    pub fn insert(&mut self, label: i64, value: impl Into<CoseValue>) -> Option<CoseValue> {
        self.entries.insert(label, value.into())
    }

    /// Raw access to an entry.
    #[must_use]
    pub fn get(&self, label: i64) -> Option<&CoseValue> {
        self.entries.get(&label)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read an integer field.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::MalformedCoseKey`] if the field is missing or
    /// is not an integer.
    pub fn integer(&self, label: i64) -> Result<i64, CoseKeyError> {
        match self.entries.get(&label) {
            Some(CoseValue::Integer(value)) => Ok(*value),
            Some(CoseValue::Bytes(_)) => Err(CoseKeyError::MalformedCoseKey(format!(
                "field {label} is a byte string, expected an integer"
            ))),
            None => Err(missing(label)),
        }
    }

    /// Read a byte-string field.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::MalformedCoseKey`] if the field is missing or
    /// is not a byte string.
    pub fn bytes(&self, label: i64) -> Result<&[u8], CoseKeyError> {
        match self.entries.get(&label) {
            Some(CoseValue::Bytes(value)) => Ok(value),
            Some(CoseValue::Integer(_)) => Err(CoseKeyError::MalformedCoseKey(format!(
                "field {label} is an integer, expected a byte string"
            ))),
            None => Err(missing(label)),
        }
    }

    /// The `kty` field, as an integer.
    ///
    /// Unsupported values are returned as-is; see [`KeyType::try_from`].
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::MalformedCoseKey`] if `kty` is missing or not
    /// an integer.
    pub fn key_type(&self) -> Result<i64, CoseKeyError> {
        self.integer(label::KEY_TYPE)
    }

    /// The optional `alg` field.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::MalformedCoseKey`] if `alg` is present but not
    /// an integer, or [`CoseKeyError::UnknownAlgorithm`] if it is not a
    /// supported algorithm.
    pub fn algorithm(&self) -> Result<Option<CoseAlgorithm>, CoseKeyError> {
        match self.entries.get(&label::ALGORITHM) {
            None => Ok(None),
            Some(_) => CoseAlgorithm::try_from(self.integer(label::ALGORITHM)?).map(Some),
        }
    }

    /// Decode a CBOR-encoded COSE_Key.
    ///
    /// Entries whose label is not an integer, or whose value is neither an
    /// integer nor a byte string, are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::MalformedCoseKey`] if the bytes are not a
    /// single CBOR map.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, CoseKeyError> {
        let mut reader = bytes;
        let value: Value = ciborium::de::from_reader(&mut reader)
            .map_err(|e| CoseKeyError::MalformedCoseKey(e.to_string()))?;
        if !reader.is_empty() {
            return Err(CoseKeyError::MalformedCoseKey(format!(
                "{} trailing bytes after COSE_Key",
                reader.len()
            )));
        }

        let Value::Map(pairs) = value else {
            return Err(CoseKeyError::MalformedCoseKey(
                "expected a CBOR map".to_string(),
            ));
        };

        let mut key = CoseKey::new();
        for (label, value) in pairs {
            let Some(label) = label.as_integer().and_then(|i| i64::try_from(i).ok()) else {
                tracing::trace!(?label, "skipping COSE_Key entry with non-integer label");
                continue;
            };
            let value = match value {
                Value::Integer(i) => match i64::try_from(i) {
                    Ok(i) => CoseValue::Integer(i),
                    Err(_) => {
                        tracing::trace!(label, "skipping COSE_Key integer outside i64 range");
                        continue;
                    }
                },
                Value::Bytes(bytes) => CoseValue::Bytes(bytes),
                other => {
                    tracing::trace!(label, value = ?other, "skipping COSE_Key entry");
                    continue;
                }
            };
            if key.entries.insert(label, value).is_some() {
                return Err(CoseKeyError::MalformedCoseKey(format!(
                    "duplicate label {label}"
                )));
            }
        }

        Ok(key)
    }

    /// Encode as a CBOR map in CTAP2 canonical label order.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::MalformedCoseKey`] if CBOR serialization fails.
    pub fn to_cbor(&self) -> Result<Vec<u8>, CoseKeyError> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|(label, _)| canonical_order(**label));

        let pairs = entries
            .into_iter()
            .map(|(label, value)| {
                let value = match value {
                    CoseValue::Integer(i) => Value::Integer(Integer::from(*i)),
                    CoseValue::Bytes(bytes) => Value::Bytes(bytes.clone()),
                };
                (Value::Integer(Integer::from(*label)), value)
            })
            .collect();

        let mut buf = Vec::new();
        ciborium::ser::into_writer(&Value::Map(pairs), &mut buf)
            .map_err(|e| CoseKeyError::MalformedCoseKey(e.to_string()))?;
        Ok(buf)
    }
}

/// Unsigned labels sort before negative ones; within each, smaller
/// magnitudes first. For the small labels COSE uses this matches the
/// bytewise order of their CBOR encodings.
fn canonical_order(label: i64) -> (bool, u64) {
    (label < 0, label.unsigned_abs())
}

fn missing(label: i64) -> CoseKeyError {
    CoseKeyError::MalformedCoseKey(format!("missing field {label}"))
}
