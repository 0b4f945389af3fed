//! `EdDSA` signature algorithms.
//!
//! v1 layout after the discriminator: `curve | hash | payload encoding`.
//!
//! v0 predates the generic `EdDSA` discriminator: the discriminator is the
//! curve's public key code, so the layout is `hash | payload encoding`.

use super::{check_payload_encoding, curve::EdDsaCurve, Algorithm, SignatureAlgorithm};
use crate::{
    discriminator::Discriminator,
    encoding::{decode_payload_encoding, PayloadEncoding},
    error::{Cause, ConstructionError, DecodeError},
    hash::{decode_hash, HashAlgorithm},
    header::Varsig,
    varint::{self, Reader},
    version::Version,
};

/// The v1 `EdDSA` discriminator.
pub const DISCRIMINATOR_EDDSA: Discriminator = Discriminator(0xed);

/// The v0 Ed25519 discriminator.
pub const DISCRIMINATOR_ED25519: Discriminator = Discriminator(0xed);

/// The v0 Ed448 discriminator.
pub const DISCRIMINATOR_ED448: Discriminator = Discriminator(0x1203);

/// A varsig for the `EdDSA` family.
pub type EdDsaVarsig = Varsig<EdDsa>;

/// The `EdDSA` signature algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdDsa {
    curve: EdDsaCurve,
    hash: HashAlgorithm,
    payload_encoding: PayloadEncoding,
}

impl EdDsa {
    /// Create a new `EdDsa` configuration.
    ///
    /// The combination is checked when it is turned into a [`Varsig`].
    #[must_use]
    pub const fn new(
        curve: EdDsaCurve,
        hash: HashAlgorithm,
        payload_encoding: PayloadEncoding,
    ) -> Self {
        EdDsa {
            curve,
            hash,
            payload_encoding,
        }
    }

    /// Ed25519 with SHA2-512.
    #[must_use]
    pub const fn ed25519(payload_encoding: PayloadEncoding) -> Self {
        EdDsa::new(EdDsaCurve::Ed25519, HashAlgorithm::Sha2_512, payload_encoding)
    }

    /// Ed448 with SHAKE-256.
    #[must_use]
    pub const fn ed448(payload_encoding: PayloadEncoding) -> Self {
        EdDsa::new(EdDsaCurve::Ed448, HashAlgorithm::Shake256, payload_encoding)
    }

    /// The curve.
    #[must_use]
    pub const fn curve(&self) -> EdDsaCurve {
        self.curve
    }

    /// The hash algorithm.
    #[must_use]
    pub const fn hash(&self) -> HashAlgorithm {
        self.hash
    }
}

impl Algorithm for EdDsa {
    fn discriminator(&self, version: Version) -> Discriminator {
        match version {
            Version::V0 => Discriminator(self.curve.code()),
            Version::V1 => DISCRIMINATOR_EDDSA,
        }
    }

    fn payload_encoding(&self) -> PayloadEncoding {
        self.payload_encoding
    }

    fn validate(&self, version: Version) -> Result<(), ConstructionError> {
        if self.hash != self.curve.hash() {
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

impl SignatureAlgorithm for EdDsa {
    const NAME: &'static str = "EdDSA";

    const DISCRIMINATORS: &'static [(Version, Discriminator)] = &[
        (Version::V0, DISCRIMINATOR_ED25519),
        (Version::V0, DISCRIMINATOR_ED448),
        (Version::V1, DISCRIMINATOR_EDDSA),
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
            Version::V0 => EdDsaCurve::from_code(discriminator.0).ok_or_else(unsupported)?,
            Version::V1 => {
                if discriminator != DISCRIMINATOR_EDDSA {
                    return Err(unsupported());
                }
                let code = reader.read_varint().map_err(|e| DecodeError::UnsupportedCurve {
                    algorithm: Self::NAME,
                    cause: e.into(),
                })?;
                EdDsaCurve::from_code(code).ok_or(DecodeError::UnsupportedCurve {
                    algorithm: Self::NAME,
                    cause: Cause::Code(code),
                })?
            }
        };

        let hash = decode_hash(reader)?;
        let payload_encoding = decode_payload_encoding(reader, version)?;

        Ok(EdDsa::new(curve, hash, payload_encoding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::VarintError, header::Options};
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    #[test]
    fn test_v1_config_layout() {
        let mut buf = Vec::new();
        EdDsa::ed25519(PayloadEncoding::DagCbor).encode_config(Version::V1, &mut buf);
        assert_eq!(buf, [0xed, 0x01, 0x13, 0x71]);
    }

    #[test]
    fn test_v0_config_layout_has_no_curve() {
        let mut buf = Vec::new();
        EdDsa::ed25519(PayloadEncoding::DagCbor).encode_config(Version::V0, &mut buf);
        assert_eq!(buf, [0x13, 0x71]);
    }

    #[test]
    fn test_discriminator_changes_with_version() {
        let ed448 = EdDsa::ed448(PayloadEncoding::Verbatim);
        assert_eq!(ed448.discriminator(Version::V0), DISCRIMINATOR_ED448);
        assert_eq!(ed448.discriminator(Version::V1), DISCRIMINATOR_EDDSA);
    }

    #[test]
    fn test_decode_v0_curve_from_discriminator() -> TestResult {
        let mut reader = Reader::new(&[0x19, 0x5f, 0xaa]);
        let algorithm = EdDsa::decode_config(Version::V0, DISCRIMINATOR_ED448, &mut reader)?;

        assert_eq!(algorithm, EdDsa::ed448(PayloadEncoding::Verbatim));
        assert_eq!(reader.remaining(), &[0xaa]);
        Ok(())
    }

    #[test]
    fn test_decode_v1_fails_on_unknown_curve() {
        let mut reader = Reader::new(&[0xe7, 0x01, 0x13, 0x71]);
        assert_eq!(
            EdDsa::decode_config(Version::V1, DISCRIMINATOR_EDDSA, &mut reader),
            Err(DecodeError::UnsupportedCurve {
                algorithm: "EdDSA",
                cause: Cause::Code(0xe7),
            })
        );
    }

    #[test]
    fn test_decode_v1_fails_on_truncated_curve() {
        let mut reader = Reader::new(&[0xed]);
        let err = EdDsa::decode_config(Version::V1, DISCRIMINATOR_EDDSA, &mut reader).unwrap_err();
        assert_eq!(err.varint_error(), Some(VarintError::TruncatedInput));
        assert!(matches!(err, DecodeError::UnsupportedCurve { .. }));
    }

    #[test]
    fn test_rejects_mismatched_hash() {
        let algorithm = EdDsa::new(
            EdDsaCurve::Ed25519,
            HashAlgorithm::Sha2_256,
            PayloadEncoding::DagCbor,
        );
        assert_eq!(
            EdDsaVarsig::new(algorithm),
            Err(ConstructionError::UnsupportedHash {
                algorithm: "EdDSA",
                variant: "Ed25519",
                hash: HashAlgorithm::Sha2_256,
            })
        );
    }

    #[test]
    fn test_rejects_legacy_encoding_in_v1() -> TestResult {
        let algorithm = EdDsa::ed25519(PayloadEncoding::Jwt);
        assert_eq!(
            EdDsaVarsig::new(algorithm),
            Err(ConstructionError::PayloadEncodingNotPermitted {
                encoding: PayloadEncoding::Jwt,
                version: Version::V1,
            })
        );

        let legacy = EdDsaVarsig::with_options(algorithm, Options::new().force_version0())?;
        assert_eq!(legacy.version(), Version::V0);
        Ok(())
    }
}
