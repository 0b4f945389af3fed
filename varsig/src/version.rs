//! Varsig versions and the header framing that depends on them.

use crate::{
    discriminator::Discriminator,
    error::{Cause, DecodeError},
    varint::{self, Reader},
};
use std::fmt;

/// The varuint prefix that opens every varsig.
pub const PREFIX: u64 = 0x34;

/// First legacy discriminator value.
///
/// Varsig v0 has no version field: the discriminator follows the prefix
/// directly. Every v0 discriminator in use is at least this large, which
/// is what tells a v0 header apart from an explicit version number.
pub const LEGACY_DISCRIMINATOR_FLOOR: u64 = 0x40;

/// Varsig format version.
///
/// v1 is stricter than v0: it only admits canonical payload encodings.
#[repr(u64)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
    /// Legacy varsig without a version field.
    V0 = 0,

    /// Varsig v1.
    #[default]
    V1 = 1,
}

impl Version {
    /// Numeric version.
    #[must_use]
    pub const fn number(self) -> u64 {
        self as u64
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

impl TryFrom<u64> for Version {
    type Error = Cause;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Version::V0),
            1 => Ok(Version::V1),
            other => Err(Cause::Code(other)),
        }
    }
}

/// Read one version field.
///
/// # Errors
///
/// Returns [`DecodeError::UnsupportedVersion`] for anything but `0` or `1`,
/// or if the field cannot be read.
pub fn decode_version(reader: &mut Reader<'_>) -> Result<Version, DecodeError> {
    let value = reader
        .read_varint()
        .map_err(|e| DecodeError::UnsupportedVersion(e.into()))?;
    Version::try_from(value).map_err(DecodeError::UnsupportedVersion)
}

/// Read and check the prefix.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidPrefix`] if the first varint is not
/// [`PREFIX`] or cannot be read.
pub fn decode_prefix(reader: &mut Reader<'_>) -> Result<(), DecodeError> {
    match reader.read_varint() {
        Ok(PREFIX) => Ok(()),
        Ok(other) => Err(DecodeError::InvalidPrefix(Cause::Code(other))),
        Err(e) => Err(DecodeError::InvalidPrefix(e.into())),
    }
}

/// Read the version and discriminator that follow the prefix.
///
/// A first value of [`LEGACY_DISCRIMINATOR_FLOOR`] or more is a v0
/// discriminator with no version field in front of it. An explicit `0`
/// is only accepted in front of a discriminator below the floor, so every
/// v0 header has a single byte form.
///
/// # Errors
///
/// - [`DecodeError::UnsupportedVersion`] if the version is neither `0` nor `1`,
///   or is an explicit `0` in front of a legacy discriminator.
/// - [`DecodeError::UnsupportedAlgorithm`] if the discriminator cannot be read.
pub fn decode_framing(reader: &mut Reader<'_>) -> Result<(Version, Discriminator), DecodeError> {
    let first = reader
        .read_varint()
        .map_err(|e| DecodeError::UnsupportedVersion(e.into()))?;

    if first >= LEGACY_DISCRIMINATOR_FLOOR {
        return Ok((Version::V0, Discriminator(first)));
    }

    let version = Version::try_from(first).map_err(DecodeError::UnsupportedVersion)?;
    let discriminator = reader
        .read_varint()
        .map_err(|e| DecodeError::UnsupportedAlgorithm {
            version,
            cause: e.into(),
        })?;

    if version == Version::V0 && discriminator >= LEGACY_DISCRIMINATOR_FLOOR {
        return Err(DecodeError::UnsupportedVersion(Cause::Code(first)));
    }

    Ok((version, Discriminator(discriminator)))
}

/// Append the prefix, version and discriminator to `buf`.
///
/// v0 headers carry no version field unless the discriminator would be
/// mistaken for one, in which case an explicit `0` is written.
pub fn encode_framing(version: Version, discriminator: Discriminator, buf: &mut Vec<u8>) {
    varint::encode(PREFIX, buf);

    let implicit = version == Version::V0 && discriminator.0 >= LEGACY_DISCRIMINATOR_FLOOR;
    if !implicit {
        varint::encode(version.number(), buf);
    }

    varint::encode(discriminator.0, buf);
}
