//! The boundary to a cryptographic key provider.
//!
//! The importer builds key material in the shape a provider's native public
//! key constructors accept (a SubjectPublicKeyInfo for EC and Ed25519, a
//! modulus/exponent pair for RSA) and hands it over through [`KeyProvider`].
//! [`native::NativeProvider`] is a pure-Rust implementation.

pub mod native;

use crate::curve::EcCurve;

/// Constructs public key objects from encoded key material.
pub trait KeyProvider {
    /// Opaque public key handle produced by this provider.
    type PublicKey;

    /// Error returned when the provider refuses key material.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Import an EC public key from a DER SubjectPublicKeyInfo whose
    /// parameters name `curve`.
    fn import_ec(&self, curve: EcCurve, spki: &[u8]) -> Result<Self::PublicKey, Self::Error>;

    /// Import an Ed25519 public key from a DER SubjectPublicKeyInfo.
    fn import_ed25519(&self, spki: &[u8]) -> Result<Self::PublicKey, Self::Error>;

    /// Construct an RSA public key from its modulus and public exponent.
    fn import_rsa(
        &self,
        modulus: UnsignedInteger<'_>,
        exponent: UnsignedInteger<'_>,
    ) -> Result<Self::PublicKey, Self::Error>;
}

/// A non-negative integer as big-endian bytes without leading zeros.
///
/// Zero is the empty slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnsignedInteger<'a>(&'a [u8]);

impl<'a> UnsignedInteger<'a> {
    /// Interpret `bytes` as an unsigned big-endian integer.
    ///
    /// Leading zero bytes, such as a DER-style sign byte, do not change the
    /// value and are dropped.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        let start = bytes
            .iter()
            .position(|byte| *byte != 0)
            .unwrap_or(bytes.len());
        Self(&bytes[start..])
    }

    /// The minimal big-endian representation.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Whether the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of significant bits.
    #[must_use]
    pub fn bits(&self) -> usize {
        match self.0.first() {
            Some(high) => self.0.len() * 8 - high.leading_zeros() as usize,
            None => 0,
        }
    }
}
