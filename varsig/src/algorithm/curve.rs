//! This module defines the elliptic curves that appear in headers.

use crate::hash::HashAlgorithm;
use std::fmt;

/// The EdDSA-compatible curves.
///
/// The discriminant is the multicodec code of the curve's public key.
#[cfg(feature = "eddsa")]
#[repr(u64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdDsaCurve {
    /// The Twisted Edwards 25519 curve
    Ed25519 = 0xed,

    /// The Edwards 448 curve
    Ed448 = 0x1203,
}

#[cfg(feature = "eddsa")]
impl EdDsaCurve {
    /// Multicodec code.
    #[must_use]
    pub const fn code(self) -> u64 {
        self as u64
    }

    /// Look up a curve by its multicodec code.
    #[must_use]
    pub const fn from_code(code: u64) -> Option<Self> {
        match code {
            0xed => Some(EdDsaCurve::Ed25519),
            0x1203 => Some(EdDsaCurve::Ed448),
            _ => None,
        }
    }

    /// The hash fixed by RFC 8032 for this curve.
    #[must_use]
    pub const fn hash(self) -> HashAlgorithm {
        match self {
            EdDsaCurve::Ed25519 => HashAlgorithm::Sha2_512,
            EdDsaCurve::Ed448 => HashAlgorithm::Shake256,
        }
    }

    /// Curve name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EdDsaCurve::Ed25519 => "Ed25519",
            EdDsaCurve::Ed448 => "Ed448",
        }
    }
}

#[cfg(feature = "eddsa")]
impl fmt::Display for EdDsaCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// ECDSA-compatible curves.
///
/// The discriminant is the multicodec code of the curve's public key.
#[cfg(feature = "ecdsa")]
#[repr(u64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EcDsaCurve {
    /// `secp256r1`, NIST P-256
    P256 = 0x1200,

    /// `secp384r1`, NIST P-384
    P384 = 0x1201,

    /// `secp521r1`, NIST P-521
    P521 = 0x1202,

    /// `secp256k1`
    Secp256k1 = 0xe7,
}

#[cfg(feature = "ecdsa")]
impl EcDsaCurve {
    /// Multicodec code.
    #[must_use]
    pub const fn code(self) -> u64 {
        self as u64
    }

    /// Look up a curve by its multicodec code.
    #[must_use]
    pub const fn from_code(code: u64) -> Option<Self> {
        match code {
            0x1200 => Some(EcDsaCurve::P256),
            0x1201 => Some(EcDsaCurve::P384),
            0x1202 => Some(EcDsaCurve::P521),
            0xe7 => Some(EcDsaCurve::Secp256k1),
            _ => None,
        }
    }

    /// Whether `hash` may be used with this curve.
    ///
    /// secp256k1 also admits Keccak-256 for Ethereum-style signatures.
    #[must_use]
    pub const fn permits(self, hash: HashAlgorithm) -> bool {
        matches!(
            (self, hash),
            (EcDsaCurve::P256, HashAlgorithm::Sha2_256)
                | (EcDsaCurve::P384, HashAlgorithm::Sha2_384)
                | (EcDsaCurve::P521, HashAlgorithm::Sha2_512)
                | (
                    EcDsaCurve::Secp256k1,
                    HashAlgorithm::Sha2_256 | HashAlgorithm::Keccak256
                )
        )
    }

    /// Curve name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EcDsaCurve::P256 => "P-256",
            EcDsaCurve::P384 => "P-384",
            EcDsaCurve::P521 => "P-521",
            EcDsaCurve::Secp256k1 => "secp256k1",
        }
    }
}

#[cfg(feature = "ecdsa")]
impl fmt::Display for EcDsaCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
