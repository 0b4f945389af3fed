//! Multihash algorithms.
//!
//! This is separate from the `multihash-codetable` crate
//! because we only need the codes, not any hashing functionality.

use crate::{
    error::{Cause, DecodeError},
    varint::{self, Reader},
};
use std::fmt;

/// The hash applied to the payload before signing.
///
/// The discriminant of each variant is its multicodec code.
#[repr(u64)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HashAlgorithm {
    /// SHA2-224
    Sha2_224 = 0x1013,

    /// SHA2-256
    Sha2_256 = 0x12,

    /// SHA2-384
    Sha2_384 = 0x20,

    /// SHA2-512
    Sha2_512 = 0x13,

    /// SHA3-224
    Sha3_224 = 0x17,

    /// SHA3-256
    Sha3_256 = 0x16,

    /// SHA3-384
    Sha3_384 = 0x15,

    /// SHA3-512
    Sha3_512 = 0x14,

    /// SHA-512/224
    Sha512_224 = 0x1014,

    /// SHA-512/256
    Sha512_256 = 0x1015,

    /// BLAKE2s-256
    Blake2s256 = 0xb260,

    /// BLAKE2b-256
    Blake2b256 = 0xb220,

    /// BLAKE2b-384
    Blake2b384 = 0xb230,

    /// BLAKE2b-512
    Blake2b512 = 0xb240,

    /// SHAKE-256
    Shake256 = 0x19,

    /// Keccak-256
    Keccak256 = 0x1b,

    /// Keccak-512
    Keccak512 = 0x1d,
}

impl HashAlgorithm {
    /// Every recognized hash algorithm.
    pub const ALL: [HashAlgorithm; 17] = [
        HashAlgorithm::Sha2_224,
        HashAlgorithm::Sha2_256,
        HashAlgorithm::Sha2_384,
        HashAlgorithm::Sha2_512,
        HashAlgorithm::Sha3_224,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_384,
        HashAlgorithm::Sha3_512,
        HashAlgorithm::Sha512_224,
        HashAlgorithm::Sha512_256,
        HashAlgorithm::Blake2s256,
        HashAlgorithm::Blake2b256,
        HashAlgorithm::Blake2b384,
        HashAlgorithm::Blake2b512,
        HashAlgorithm::Shake256,
        HashAlgorithm::Keccak256,
        HashAlgorithm::Keccak512,
    ];

    /// Multicodec code.
    #[must_use]
    pub const fn code(self) -> u64 {
        self as u64
    }

    /// Look up a hash by its multicodec code.
    #[must_use]
    pub const fn from_code(code: u64) -> Option<Self> {
        Some(match code {
            0x1013 => HashAlgorithm::Sha2_224,
            0x12 => HashAlgorithm::Sha2_256,
            0x20 => HashAlgorithm::Sha2_384,
            0x13 => HashAlgorithm::Sha2_512,
            0x17 => HashAlgorithm::Sha3_224,
            0x16 => HashAlgorithm::Sha3_256,
            0x15 => HashAlgorithm::Sha3_384,
            0x14 => HashAlgorithm::Sha3_512,
            0x1014 => HashAlgorithm::Sha512_224,
            0x1015 => HashAlgorithm::Sha512_256,
            0xb260 => HashAlgorithm::Blake2s256,
            0xb220 => HashAlgorithm::Blake2b256,
            0xb230 => HashAlgorithm::Blake2b384,
            0xb240 => HashAlgorithm::Blake2b512,
            0x19 => HashAlgorithm::Shake256,
            0x1b => HashAlgorithm::Keccak256,
            0x1d => HashAlgorithm::Keccak512,
            _ => return None,
        })
    }

    /// Multicodec table name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha2_224 => "sha2-224",
            HashAlgorithm::Sha2_256 => "sha2-256",
            HashAlgorithm::Sha2_384 => "sha2-384",
            HashAlgorithm::Sha2_512 => "sha2-512",
            HashAlgorithm::Sha3_224 => "sha3-224",
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Sha3_384 => "sha3-384",
            HashAlgorithm::Sha3_512 => "sha3-512",
            HashAlgorithm::Sha512_224 => "sha2-512-224",
            HashAlgorithm::Sha512_256 => "sha2-512-256",
            HashAlgorithm::Blake2s256 => "blake2s-256",
            HashAlgorithm::Blake2b256 => "blake2b-256",
            HashAlgorithm::Blake2b384 => "blake2b-384",
            HashAlgorithm::Blake2b512 => "blake2b-512",
            HashAlgorithm::Shake256 => "shake-256",
            HashAlgorithm::Keccak256 => "keccak-256",
            HashAlgorithm::Keccak512 => "keccak-512",
        }
    }

    /// Append this hash's varint segment to `buf`.
    pub fn encode(self, buf: &mut Vec<u8>) {
        varint::encode(self.code(), buf);
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u64> for HashAlgorithm {
    type Error = Cause;

    fn try_from(code: u64) -> Result<Self, Self::Error> {
        HashAlgorithm::from_code(code).ok_or(Cause::Code(code))
    }
}

/// Read one hash segment.
///
/// # Errors
///
/// Returns [`DecodeError::UnknownHash`] if the segment cannot be read
/// (wrapping the varint failure) or is not in the hash table (carrying
/// the raw code).
pub fn decode_hash(reader: &mut Reader<'_>) -> Result<HashAlgorithm, DecodeError> {
    let code = reader
        .read_varint()
        .map_err(|e| DecodeError::UnknownHash(e.into()))?;
    HashAlgorithm::try_from(code).map_err(DecodeError::UnknownHash)
}
