//! Error types.
//!
//! Wire-decode failures ([`DecodeError`]) and construction-time validation
//! failures ([`ConstructionError`]) are separate types. Varint failures in
//! the shared segments (prefix, version, discriminator, hash, payload
//! encoding, curve, key length) are wrapped in the category of the segment
//! that was being read, and remain reachable through
//! [`std::error::Error::source`] and [`DecodeError::varint_error`].
//! Segments a family defines on its own surface as [`DecodeError::Varint`].

use crate::{
    discriminator::Discriminator, encoding::PayloadEncoding, hash::HashAlgorithm,
    version::Version,
};
use thiserror::Error;

/// Failure to read a single varint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum VarintError {
    /// The input ended before a terminating byte.
    #[error("truncated input")]
    TruncatedInput,

    /// The value overflows 64 bits or is not minimally encoded.
    #[error("malformed varint")]
    MalformedVarint,
}

/// Why a header segment was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Cause {
    /// The segment was read but its value is not recognized.
    #[error("unrecognized code {0:#x}")]
    Code(u64),

    /// A two-segment value was read but the pair is not recognized.
    #[error("unrecognized segments {0:#x}+{1:#x}")]
    Segments(u64, u64),

    /// The segment could not be read.
    #[error(transparent)]
    Varint(#[from] VarintError),
}

impl Cause {
    /// The underlying varint failure, if that is what this is.
    #[must_use]
    pub const fn varint_error(&self) -> Option<VarintError> {
        match self {
            Cause::Varint(err) => Some(*err),
            Cause::Code(_) | Cause::Segments(..) => None,
        }
    }
}

/// Errors produced while decoding a varsig.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The leading varint is not the varsig prefix.
    #[error("invalid varsig prefix: {0}")]
    InvalidPrefix(#[source] Cause),

    /// The version field is not a supported varsig version.
    #[error("unsupported varsig version: {0}")]
    UnsupportedVersion(#[source] Cause),

    /// The hash segment is not in the hash table.
    #[error("unknown hash algorithm: {0}")]
    UnknownHash(#[source] Cause),

    /// The payload encoding is not permitted for this version.
    #[error("unsupported payload encoding for varsig {version}: {cause}")]
    UnsupportedPayloadEncoding {
        /// Version in force for the decode.
        version: Version,

        /// The rejected segment(s).
        #[source]
        cause: Cause,
    },

    /// No algorithm is registered for the discriminator.
    #[error("unsupported signature algorithm for varsig {version}: {cause}")]
    UnsupportedAlgorithm {
        /// Version in force for the decode.
        version: Version,

        /// The raw discriminator, or why it could not be read.
        #[source]
        cause: Cause,
    },

    /// The algorithm does not know the curve segment.
    #[error("unsupported {algorithm} curve: {cause}")]
    UnsupportedCurve {
        /// Name of the algorithm family.
        algorithm: &'static str,

        /// The rejected curve code, or why it could not be read.
        #[source]
        cause: Cause,
    },

    /// The key length segment is missing or zero.
    #[error("invalid key length: {0}")]
    InvalidKeyLength(#[source] Cause),

    /// The header is well-formed but describes an invalid parameter set.
    #[error("invalid algorithm configuration: {0}")]
    InvalidConfig(#[source] ConstructionError),

    /// A family-specific segment without its own category failed to read.
    ///
    /// This is what `?` on [`Reader::read_varint`](crate::varint::Reader::read_varint)
    /// produces inside a
    /// [`SignatureAlgorithm::decode_config`](crate::algorithm::SignatureAlgorithm::decode_config).
    #[error(transparent)]
    Varint(#[from] VarintError),
}

impl DecodeError {
    /// The varint failure at the root of this error, if any.
    ///
    /// ```
    /// use varsig::{error::VarintError, hash::decode_hash, varint::Reader};
    ///
    /// let err = decode_hash(&mut Reader::new(&[])).unwrap_err();
    /// assert_eq!(err.varint_error(), Some(VarintError::TruncatedInput));
    /// ```
    #[must_use]
    pub const fn varint_error(&self) -> Option<VarintError> {
        match self {
            DecodeError::InvalidPrefix(cause)
            | DecodeError::UnsupportedVersion(cause)
            | DecodeError::UnknownHash(cause)
            | DecodeError::InvalidKeyLength(cause)
            | DecodeError::UnsupportedPayloadEncoding { cause, .. }
            | DecodeError::UnsupportedAlgorithm { cause, .. }
            | DecodeError::UnsupportedCurve { cause, .. } => cause.varint_error(),
            DecodeError::Varint(err) => Some(*err),
            DecodeError::InvalidConfig(_) => None,
        }
    }
}

/// Errors produced when constructing a varsig from parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// The hash algorithm cannot be paired with the chosen parameters.
    #[error("{algorithm} ({variant}) does not permit {hash} hashing")]
    UnsupportedHash {
        /// Name of the algorithm family.
        algorithm: &'static str,

        /// The curve or scheme the hash was paired with.
        variant: &'static str,

        /// The rejected hash.
        hash: HashAlgorithm,
    },

    /// The payload encoding does not exist in the target version.
    #[error("payload encoding {encoding} is not permitted in varsig {version}")]
    PayloadEncodingNotPermitted {
        /// The rejected encoding.
        encoding: PayloadEncoding,

        /// The target version.
        version: Version,
    },

    /// The key length is zero.
    #[error("{algorithm} key length must be non-zero")]
    InvalidKeyLength {
        /// Name of the algorithm family.
        algorithm: &'static str,
    },
}

/// Errors produced while populating a [`Registry`](crate::registry::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two algorithms claim the same slot.
    #[error("varsig {version} discriminator {discriminator} is already claimed by {existing} (claimed again by {claimant})")]
    DuplicateDiscriminator {
        /// Version of the contested slot.
        version: Version,

        /// Discriminator of the contested slot.
        discriminator: Discriminator,

        /// The algorithm already holding the slot.
        existing: &'static str,

        /// The algorithm that tried to claim it.
        claimant: &'static str,
    },
}
