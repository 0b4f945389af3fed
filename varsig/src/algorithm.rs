//! Signature algorithm configuration.
//!
//! An algorithm family owns everything in a header between the
//! discriminator and the signature bytes. The core only knows the framing
//! around it; each family decides which parameters it carries and in
//! which order, per version.

#[cfg(any(feature = "eddsa", feature = "ecdsa"))]
pub mod curve;

#[cfg(feature = "ecdsa")]
pub mod ecdsa;

#[cfg(feature = "eddsa")]
pub mod eddsa;

#[cfg(feature = "rsa")]
pub mod rsa;

use crate::{
    discriminator::Discriminator,
    encoding::PayloadEncoding,
    error::{ConstructionError, DecodeError},
    varint::Reader,
    version::Version,
};
use std::{any::Any, fmt::Debug};

/// Describes a signature algorithm's header segments.
///
/// This trait captures the metadata needed to encode a signature
/// algorithm in a varsig header. It is object safe, so decoded headers
/// can hold any family behind a `dyn`.
pub trait Algorithm: Debug + Send + Sync {
    /// The discriminator written for this configuration under `version`.
    ///
    /// For example, `EdDSA` is `0xED` in v1.
    fn discriminator(&self, version: Version) -> Discriminator;

    /// The canonical encoding of the signed payload.
    fn payload_encoding(&self) -> PayloadEncoding;

    /// Check that the parameters form a legal combination for `version`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] describing the first illegal parameter.
    fn validate(&self, version: Version) -> Result<(), ConstructionError>;

    /// Append the algorithm-specific segments for `version` to `buf`.
    fn encode_config(&self, version: Version, buf: &mut Vec<u8>);
}

/// A concrete algorithm family that can be registered for decoding.
pub trait SignatureAlgorithm: Algorithm + Clone + PartialEq + Sized + 'static {
    /// Family name for diagnostics.
    const NAME: &'static str;

    /// Every `(version, discriminator)` slot this family claims.
    const DISCRIMINATORS: &'static [(Version, Discriminator)];

    /// Read the algorithm-specific segments.
    ///
    /// The reader is positioned just after the discriminator. Anything
    /// left unread when this returns is the signature.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if a segment is missing or unrecognized.
    fn decode_config(
        version: Version,
        discriminator: Discriminator,
        reader: &mut Reader<'_>,
    ) -> Result<Self, DecodeError>;

    /// Whether this family claims the slot.
    #[must_use]
    fn claims(version: Version, discriminator: Discriminator) -> bool {
        Self::DISCRIMINATORS.contains(&(version, discriminator))
    }
}

/// Type-erased [`SignatureAlgorithm`].
///
/// Implemented for every signature algorithm; lets a decoded header be
/// cloned, compared and downcast back to its family.
pub trait DynAlgorithm: Algorithm {
    /// Family name.
    fn name(&self) -> &'static str;

    /// Upcast for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Clone behind a box.
    fn clone_boxed(&self) -> Box<dyn DynAlgorithm>;

    /// Equality across erased values.
    fn dyn_eq(&self, other: &dyn DynAlgorithm) -> bool;
}

impl<A: SignatureAlgorithm> DynAlgorithm for A {
    fn name(&self) -> &'static str {
        A::NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn DynAlgorithm> {
        Box::new(self.clone())
    }

    fn dyn_eq(&self, other: &dyn DynAlgorithm) -> bool {
        other
            .as_any()
            .downcast_ref::<A>()
            .is_some_and(|other| other == self)
    }
}

/// Decode a family's segments and hold them to its construction rules.
pub(crate) fn decode_validated<A: SignatureAlgorithm>(
    version: Version,
    discriminator: Discriminator,
    reader: &mut Reader<'_>,
) -> Result<A, DecodeError> {
    let algorithm = A::decode_config(version, discriminator, reader)?;
    algorithm
        .validate(version)
        .map_err(DecodeError::InvalidConfig)?;
    Ok(algorithm)
}

/// Reject payload encodings that do not exist in `version`.
///
/// # Errors
///
/// Returns [`ConstructionError::PayloadEncodingNotPermitted`].
pub fn check_payload_encoding(
    encoding: PayloadEncoding,
    version: Version,
) -> Result<(), ConstructionError> {
    if encoding.is_permitted(version) {
        Ok(())
    } else {
        Err(ConstructionError::PayloadEncodingNotPermitted { encoding, version })
    }
}
