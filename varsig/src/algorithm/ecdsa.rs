//! ECDSA signature algorithms.
//!
//! Same shape as `EdDSA`: v1 writes the generic discriminator followed by
//! the curve, v0 uses the curve's public key code as the discriminator.

use super::{check_payload_encoding, curve::EcDsaCurve, Algorithm, SignatureAlgorithm};
use crate::{
    discriminator::Discriminator,
    encoding::{decode_payload_encoding, PayloadEncoding},
    error::{Cause, ConstructionError, DecodeError},
    hash::{decode_hash, HashAlgorithm},
    header::Varsig,
    varint::{self, Reader},
    version::Version,
};

/// The v1 ECDSA discriminator.
pub const DISCRIMINATOR_ECDSA: Discriminator = Discriminator(0xec);

/// A varsig for the ECDSA family.
pub type EcDsaVarsig = Varsig<EcDsa>;

/// The ECDSA signature algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EcDsa {
    curve: EcDsaCurve,
    hash: HashAlgorithm,
    payload_encoding: PayloadEncoding,
}

impl EcDsa {
    /// Create a new `EcDsa` configuration.
    #[must_use]
    pub const fn new(
        curve: EcDsaCurve,
        hash: HashAlgorithm,
        payload_encoding: PayloadEncoding,
    ) -> Self {
        EcDsa {
            curve,
            hash,
            payload_encoding,
        }
    }

    /// ES256 (P-256 curve with SHA2-256)
    #[must_use]
    pub const fn es256(payload_encoding: PayloadEncoding) -> Self {
        EcDsa::new(EcDsaCurve::P256, HashAlgorithm::Sha2_256, payload_encoding)
    }

    /// ES384 (P-384 curve with SHA2-384)
    #[must_use]
    pub const fn es384(payload_encoding: PayloadEncoding) -> Self {
        EcDsa::new(EcDsaCurve::P384, HashAlgorithm::Sha2_384, payload_encoding)
    }

    /// ES512 (P-521 curve with SHA2-512)
    #[must_use]
    pub const fn es512(payload_encoding: PayloadEncoding) -> Self {
        EcDsa::new(EcDsaCurve::P521, HashAlgorithm::Sha2_512, payload_encoding)
    }

    /// ES256K (secp256k1 curve with SHA2-256)
    #[must_use]
    pub const fn es256k(payload_encoding: PayloadEncoding) -> Self {
        EcDsa::new(EcDsaCurve::Secp256k1, HashAlgorithm::Sha2_256, payload_encoding)
    }

    /// The curve.
    #[must_use]
    pub const fn curve(&self) -> EcDsaCurve {
        self.curve
    }

    /// The hash algorithm.
    #[must_use]
    pub const fn hash(&self) -> HashAlgorithm {
        self.hash
    }
}

impl Algorithm for EcDsa {
    fn discriminator(&self, version: Version) -> Discriminator {
        match version {
            Version::V0 => Discriminator(self.curve.code()),
            Version::V1 => DISCRIMINATOR_ECDSA,
        }
    }

    fn payload_encoding(&self) -> PayloadEncoding {
        self.payload_encoding
    }

    fn validate(&self, version: Version) -> Result<(), ConstructionError> {
        if !self.curve.permits(self.hash) {
            return Err(ConstructionError::UnsupportedHash {
                algorithm: Self::NAME,
                variant: self.curve.name(),
                hash: self.hash,
            });
        }
        check_payload_encoding(self.payload_encoding, version)
    }

    fn encode_config(&self, version: Version, buf: &mut Vec<u8>) {
        if version == Version::V1 {
            varint::encode(self.curve.code(), buf);
        }
        self.hash.encode(buf);
        self.payload_encoding.encode(buf);
    }
}

impl SignatureAlgorithm for EcDsa {
    const NAME: &'static str = "ECDSA";

    const DISCRIMINATORS: &'static [(Version, Discriminator)] = &[
        (Version::V0, Discriminator(EcDsaCurve::P256.code())),
        (Version::V0, Discriminator(EcDsaCurve::P384.code())),
        (Version::V0, Discriminator(EcDsaCurve::P521.code())),
        (Version::V0, Discriminator(EcDsaCurve::Secp256k1.code())),
        (Version::V1, DISCRIMINATOR_ECDSA),
    ];

    fn decode_config(
        version: Version,
        discriminator: Discriminator,
        reader: &mut Reader<'_>,
    ) -> Result<Self, DecodeError> {
        let unsupported = || DecodeError::UnsupportedAlgorithm {
            version,
            cause: Cause::Code(discriminator.0),
        };

        let curve = match version {
            Version::V0 => EcDsaCurve::from_code(discriminator.0).ok_or_else(unsupported)?,
            Version::V1 => {
                if discriminator != DISCRIMINATOR_ECDSA {
                    return Err(unsupported());
                }
                let code = reader.read_varint().map_err(|e| DecodeError::UnsupportedCurve {
                    algorithm: Self::NAME,
                    cause: e.into(),
                })?;
                EcDsaCurve::from_code(code).ok_or(DecodeError::UnsupportedCurve {
                    algorithm: Self::NAME,
                    cause: Cause::Code(code),
                })?
            }
        };

        let hash = decode_hash(reader)?;
        let payload_encoding = decode_payload_encoding(reader, version)?;

        Ok(EcDsa::new(curve, hash, payload_encoding))
    }
}
