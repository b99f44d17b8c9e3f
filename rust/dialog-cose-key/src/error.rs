//! Error types for public-key conversion.

use crate::cose_key::KeyType;
use thiserror::Error;

/// Boxed error returned by a [`crate::KeyProvider`] that rejected key material.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from converting public keys between COSE, raw point and DER forms.
///
/// Every variant is terminal for the call that produced it; nothing in this
/// crate retries.
#[derive(Debug, Error)]
pub enum CoseKeyError {
    /// A raw EC point does not have one of the accepted shapes.
    #[error(
        "raw EC point must be 64, 96 or 132 bytes long, or start with 0x04 and be 65, 97 or 133 bytes long; got {length} bytes starting with {}",
        describe_leading_byte(.leading_byte)
    )]
    InvalidKeyLength {
        /// Number of bytes supplied.
        length: usize,
        /// The first byte, if there was one.
        leading_byte: Option<u8>,
    },

    /// The CBOR does not decode to a COSE_Key map, or a required field is
    /// missing or has the wrong type.
    #[error("malformed COSE_Key: {0}")]
    MalformedCoseKey(String),

    /// The `kty` field names a key type this crate does not handle.
    #[error("unsupported COSE key type: {0}")]
    UnsupportedKeyType(i64),

    /// The `crv` field is not supported for the key type.
    #[error("unsupported curve {curve} for {key_type} key")]
    UnsupportedCurve {
        /// Key type the curve was read for.
        key_type: KeyType,
        /// The curve identifier as found in the map.
        curve: i64,
    },

    /// An algorithm identifier or JWS algorithm name is not in the table.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// A DER length above 65535 was requested.
    #[error("DER length {0} exceeds the two-byte long form")]
    UnsupportedLength(usize),

    /// The key provider refused the constructed key material.
    #[error("{key_type} key import rejected: {source}")]
    KeyImportRejected {
        /// Key type that was being imported.
        key_type: KeyType,
        /// The provider's error.
        #[source]
        source: ProviderError,
    },
}

fn describe_leading_byte(byte: &Option<u8>) -> String {
    match byte {
        Some(byte) => format!("0x{byte:02x}"),
        None => "nothing".to_string(),
    }
}
