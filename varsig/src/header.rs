//! Varsig header
//!
//! A varsig is a shared envelope (version, discriminator, signature bytes)
//! around an algorithm-specific parameter set:
//!
//! ```text
//! varint(0x34) | [varint(version)] | varint(discriminator) | <algorithm segments> | <signature>
//! ```
//!
//! [`Varsig`] is the typed form, for when the algorithm is known ahead of
//! time. [`AnyVarsig`] is what the [`Registry`] produces when it is not.
//!
//! A varsig with no signature bytes is a template: it describes the
//! signing scheme a payload is expected to use.

use crate::{
    algorithm::{decode_validated, Algorithm, DynAlgorithm, SignatureAlgorithm},
    discriminator::Discriminator,
    encoding::PayloadEncoding,
    error::{Cause, ConstructionError, DecodeError},
    registry::Registry,
    varint::Reader,
    version::{decode_framing, decode_prefix, encode_framing, Version},
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_bytes::ByteBuf;

/// Options for constructing a [`Varsig`].
///
/// The defaults target v1 and produce a template (no signature).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    version: Version,
    signature: Vec<u8>,
}

impl Options {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Options::default()
    }

    /// Target a specific version.
    #[must_use]
    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Use the legacy v0 layout, for compatibility with existing signed
    /// artifacts.
    #[must_use]
    pub fn force_version0(self) -> Self {
        self.version(Version::V0)
    }

    /// Attach signature bytes.
    #[must_use]
    pub fn signature(mut self, signature: impl Into<Vec<u8>>) -> Self {
        self.signature = signature.into();
        self
    }
}

/// A varsig for a known algorithm family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Varsig<A> {
    version: Version,
    algorithm: A,
    signature: Vec<u8>,
}

impl<A: SignatureAlgorithm> Varsig<A> {
    /// Create a v1 template for `algorithm`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if the parameters are not a legal
    /// combination for the family.
    pub fn new(algorithm: A) -> Result<Self, ConstructionError> {
        Varsig::with_options(algorithm, Options::default())
    }

    /// Create a varsig for `algorithm` with explicit options.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if the parameters are not a legal
    /// combination for the family under the chosen version.
    pub fn with_options(algorithm: A, options: Options) -> Result<Self, ConstructionError> {
        algorithm.validate(options.version)?;
        Ok(Varsig {
            version: options.version,
            algorithm,
            signature: options.signature,
        })
    }

    /// Decode a varsig that must belong to this family.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnsupportedAlgorithm`] if the discriminator is
    /// not one `A` claims, or any other [`DecodeError`] from the header.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = Reader::new(bytes);
        decode_prefix(&mut reader)?;
        let (version, discriminator) = decode_framing(&mut reader)?;

        if !A::claims(version, discriminator) {
            return Err(DecodeError::UnsupportedAlgorithm {
                version,
                cause: Cause::Code(discriminator.0),
            });
        }

        let algorithm = decode_validated::<A>(version, discriminator, &mut reader)?;
        Ok(Varsig {
            version,
            algorithm,
            signature: reader.remaining().to_vec(),
        })
    }

    /// The format version.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// The discriminator written for this varsig.
    #[must_use]
    pub fn discriminator(&self) -> Discriminator {
        self.algorithm.discriminator(self.version)
    }

    /// The algorithm parameters.
    #[must_use]
    pub const fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// The canonical encoding of the signed payload.
    #[must_use]
    pub fn payload_encoding(&self) -> PayloadEncoding {
        self.algorithm.payload_encoding()
    }

    /// The raw signature bytes.
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Whether this varsig carries no signature.
    #[must_use]
    pub fn is_template(&self) -> bool {
        self.signature.is_empty()
    }

    /// Encode the header followed by the signature bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        encode_parts(self.version, &self.algorithm, &self.signature)
    }

    /// Erase the algorithm type.
    #[must_use]
    pub fn into_any(self) -> AnyVarsig {
        AnyVarsig::from_parts(self.version, Box::new(self.algorithm), self.signature)
    }
}

/// A varsig for any registered algorithm family.
#[derive(Debug)]
pub struct AnyVarsig {
    version: Version,
    algorithm: Box<dyn DynAlgorithm>,
    signature: Vec<u8>,
}

impl AnyVarsig {
    pub(crate) fn from_parts(
        version: Version,
        algorithm: Box<dyn DynAlgorithm>,
        signature: Vec<u8>,
    ) -> Self {
        AnyVarsig {
            version,
            algorithm,
            signature,
        }
    }

    /// The format version.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// The discriminator written for this varsig.
    #[must_use]
    pub fn discriminator(&self) -> Discriminator {
        self.algorithm.discriminator(self.version)
    }

    /// The algorithm parameters.
    #[must_use]
    pub fn algorithm(&self) -> &dyn DynAlgorithm {
        self.algorithm.as_ref()
    }

    /// The algorithm family name.
    #[must_use]
    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.name()
    }

    /// The canonical encoding of the signed payload.
    #[must_use]
    pub fn payload_encoding(&self) -> PayloadEncoding {
        self.algorithm.payload_encoding()
    }

    /// The raw signature bytes.
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Whether this varsig carries no signature.
    #[must_use]
    pub fn is_template(&self) -> bool {
        self.signature.is_empty()
    }

    /// Encode the header followed by the signature bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        encode_parts(self.version, self.algorithm.as_ref(), &self.signature)
    }

    /// Borrow the parameters as a specific family.
    #[must_use]
    pub fn downcast_ref<A: SignatureAlgorithm>(&self) -> Option<&A> {
        self.algorithm.as_any().downcast_ref::<A>()
    }

    /// Convert into the typed form of a specific family.
    ///
    /// # Errors
    ///
    /// Gives `self` back if it belongs to a different family.
    pub fn downcast<A: SignatureAlgorithm>(self) -> Result<Varsig<A>, Self> {
        let algorithm = match self.downcast_ref::<A>() {
            Some(algorithm) => algorithm.clone(),
            None => return Err(self),
        };

        Ok(Varsig {
            version: self.version,
            algorithm,
            signature: self.signature,
        })
    }
}

impl Clone for AnyVarsig {
    fn clone(&self) -> Self {
        AnyVarsig {
            version: self.version,
            algorithm: self.algorithm.clone_boxed(),
            signature: self.signature.clone(),
        }
    }
}

impl PartialEq for AnyVarsig {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.signature == other.signature
            && self.algorithm.dyn_eq(other.algorithm.as_ref())
    }
}

impl Eq for AnyVarsig {}

impl<A: SignatureAlgorithm> From<Varsig<A>> for AnyVarsig {
    fn from(varsig: Varsig<A>) -> Self {
        varsig.into_any()
    }
}

fn encode_parts<A: Algorithm + ?Sized>(version: Version, algorithm: &A, signature: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(16 + signature.len());
    encode_framing(version, algorithm.discriminator(version), &mut buf);
    algorithm.encode_config(version, &mut buf);
    buf.extend_from_slice(signature);
    buf
}

impl<A: SignatureAlgorithm> Serialize for Varsig<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.encode())
    }
}

impl<'de, A: SignatureAlgorithm> Deserialize<'de> for Varsig<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = ByteBuf::deserialize(deserializer)?;
        Varsig::decode(&bytes).map_err(de::Error::custom)
    }
}

impl Serialize for AnyVarsig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.encode())
    }
}

impl<'de> Deserialize<'de> for AnyVarsig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = ByteBuf::deserialize(deserializer)?;
        Registry::global().decode(&bytes).map_err(de::Error::custom)
    }
}
