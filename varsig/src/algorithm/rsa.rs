//! RSA (PKCS #1 v1.5) signature algorithms.
//!
//! Layout after the discriminator, in both versions:
//! `hash | key length in bytes | payload encoding`.

use super::{check_payload_encoding, Algorithm, SignatureAlgorithm};
use crate::{
    discriminator::Discriminator,
    encoding::{decode_payload_encoding, PayloadEncoding},
    error::{Cause, ConstructionError, DecodeError},
    hash::{decode_hash, HashAlgorithm},
    header::Varsig,
    varint::{self, Reader},
    version::Version,
};

/// The RSA discriminator (unchanged between v0 and v1).
pub const DISCRIMINATOR_RSA: Discriminator = Discriminator(0x1205);

/// A varsig for the RSA family.
pub type RsaVarsig = Varsig<Rsa>;

/// The RSA signature algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rsa {
    hash: HashAlgorithm,
    key_length: u64,
    payload_encoding: PayloadEncoding,
}

impl Rsa {
    /// Create a new `Rsa` configuration.
    ///
    /// `key_length` is the modulus size in bytes, which is also the
    /// signature size.
    #[must_use]
    pub const fn new(hash: HashAlgorithm, key_length: u64, payload_encoding: PayloadEncoding) -> Self {
        Rsa {
            hash,
            key_length,
            payload_encoding,
        }
    }

    /// RS256 with a key of `key_length` bytes (256 for 2048-bit RSA).
    #[must_use]
    pub const fn rs256(key_length: u64, payload_encoding: PayloadEncoding) -> Self {
        Rsa::new(HashAlgorithm::Sha2_256, key_length, payload_encoding)
    }

    /// The hash algorithm.
    #[must_use]
    pub const fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    /// The key length in bytes.
    #[must_use]
    pub const fn key_length(&self) -> u64 {
        self.key_length
    }
}

impl Algorithm for Rsa {
    fn discriminator(&self, _version: Version) -> Discriminator {
        DISCRIMINATOR_RSA
    }

    fn payload_encoding(&self) -> PayloadEncoding {
        self.payload_encoding
    }

    fn validate(&self, version: Version) -> Result<(), ConstructionError> {
        if !matches!(
            self.hash,
            HashAlgorithm::Sha2_256 | HashAlgorithm::Sha2_384 | HashAlgorithm::Sha2_512
        ) {
            return Err(ConstructionError::UnsupportedHash {
                algorithm: Self::NAME,
                variant: "PKCS #1 v1.5",
                hash: self.hash,
            });
        }
        if self.key_length == 0 {
            return Err(ConstructionError::InvalidKeyLength {
                algorithm: Self::NAME,
            });
        }
        check_payload_encoding(self.payload_encoding, version)
    }

    fn encode_config(&self, _version: Version, buf: &mut Vec<u8>) {
        self.hash.encode(buf);
        varint::encode(self.key_length, buf);
        self.payload_encoding.encode(buf);
    }
}

impl SignatureAlgorithm for Rsa {
    const NAME: &'static str = "RSA";

    const DISCRIMINATORS: &'static [(Version, Discriminator)] = &[
        (Version::V0, DISCRIMINATOR_RSA),
        (Version::V1, DISCRIMINATOR_RSA),
    ];

    fn decode_config(
        version: Version,
        discriminator: Discriminator,
        reader: &mut Reader<'_>,
    ) -> Result<Self, DecodeError> {
        if discriminator != DISCRIMINATOR_RSA {
            return Err(DecodeError::UnsupportedAlgorithm {
                version,
                cause: Cause::Code(discriminator.0),
            });
        }

        let hash = decode_hash(reader)?;
        let key_length = match reader.read_varint() {
            Ok(0) => return Err(DecodeError::InvalidKeyLength(Cause::Code(0))),
            Ok(len) => len,
            Err(e) => return Err(DecodeError::InvalidKeyLength(e.into())),
        };
        let payload_encoding = decode_payload_encoding(reader, version)?;

        Ok(Rsa::new(hash, key_length, payload_encoding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::VarintError, header::Options};
    use testresult::TestResult;

    #[test]
    fn test_rs256_2048_layout() -> TestResult {
        let varsig = RsaVarsig::new(Rsa::rs256(256, PayloadEncoding::DagCbor))?;
        assert_eq!(
            varsig.encode(),
            [0x34, 0x01, 0x85, 0x24, 0x12, 0x80, 0x02, 0x71]
        );
        Ok(())
    }

    #[test]
    fn test_same_discriminator_in_both_versions() -> TestResult {
        let algorithm = Rsa::rs256(512, PayloadEncoding::Verbatim);
        let v0 = RsaVarsig::with_options(algorithm, Options::new().force_version0())?;
        let v1 = RsaVarsig::new(algorithm)?;

        assert_eq!(v0.discriminator(), v1.discriminator());
        assert_eq!(v0.encode()[1..], v1.encode()[2..]);
        Ok(())
    }

    #[test]
    fn test_rejects_non_sha2_hash() {
        let algorithm = Rsa::new(HashAlgorithm::Blake2b256, 256, PayloadEncoding::DagCbor);
        assert!(matches!(
            RsaVarsig::new(algorithm),
            Err(ConstructionError::UnsupportedHash { algorithm: "RSA", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_key_length() {
        assert_eq!(
            RsaVarsig::new(Rsa::rs256(0, PayloadEncoding::DagCbor)),
            Err(ConstructionError::InvalidKeyLength { algorithm: "RSA" })
        );

        let mut reader = Reader::new(&[0x12, 0x00, 0x71]);
        assert_eq!(
            Rsa::decode_config(Version::V1, DISCRIMINATOR_RSA, &mut reader),
            Err(DecodeError::InvalidKeyLength(Cause::Code(0)))
        );
    }

    #[test]
    fn test_fails_on_missing_key_length() {
        let mut reader = Reader::new(&[0x12]);
        let err = Rsa::decode_config(Version::V1, DISCRIMINATOR_RSA, &mut reader).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidKeyLength(Cause::Varint(VarintError::TruncatedInput))
        );
    }
}
