//! Public-key format conversion for WebAuthn credentials.
//!
//! Authenticators report credential public keys as CBOR COSE_Key maps, some
//! platforms hand out raw uncompressed EC points, and cryptographic
//! libraries want a SubjectPublicKeyInfo or an RSA modulus/exponent pair.
//! This crate converts between those forms:
//!
//! - [`raw_ec_key_to_cose`] turns a raw P-256, P-384 or P-521 point into
//!   COSE_Key bytes.
//! - [`import_cose_public_key`] turns COSE_Key bytes into a public key
//!   through any [`KeyProvider`]; [`NativePublicKey::from_cose`] does the
//!   same with the built-in [`NativeProvider`].
//! - [`ec_public_key_to_raw`] and [`NativePublicKey::to_raw_ec_point`] go
//!   back to a fixed-width uncompressed point.
//! - [`algorithm_name`] and [`jws_algorithm_to_signature_algorithm`] map
//!   COSE and JWS algorithm identifiers to signature algorithm names.
//!
//! The native provider's backends are chosen with the `es256`, `es384`,
//! `es512`, `ed25519` and `rsa` features, all on by default.

pub mod algorithm;
pub mod cose_key;
pub mod curve;
pub mod der;
mod error;
pub mod import;
pub mod provider;
pub mod raw;

pub use algorithm::{
    CoseAlgorithm, SignatureAlgorithm, algorithm_name, jws_algorithm_to_signature_algorithm,
};
pub use cose_key::{CoseKey, CoseValue, KeyType};
pub use curve::{EcCurve, OkpCurve};
pub use error::{CoseKeyError, ProviderError};
pub use import::{PublicKeyMaterial, import_cose_public_key};
pub use provider::{
    KeyProvider, UnsignedInteger,
    native::{NativeKeyError, NativeProvider, NativePublicKey},
};
pub use raw::{ec_public_key_to_raw, raw_ec_key_to_cose};
