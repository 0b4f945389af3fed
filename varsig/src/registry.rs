//! Discriminator registry.
//!
//! Maps `(version, discriminator)` slots to the algorithm family that
//! decodes them. Families are added with [`Registry::register`]; the
//! built-in families enabled by crate features are in
//! [`Registry::with_defaults`].

use crate::{
    algorithm::{decode_validated, DynAlgorithm, SignatureAlgorithm},
    discriminator::Discriminator,
    error::{Cause, DecodeError, RegistryError},
    header::AnyVarsig,
    varint::Reader,
    version::{decode_framing, decode_prefix, Version},
};
use std::{collections::HashMap, fmt, sync::OnceLock};

type DecodeFn =
    fn(Version, Discriminator, &mut Reader<'_>) -> Result<Box<dyn DynAlgorithm>, DecodeError>;

#[derive(Clone, Copy)]
struct Entry {
    name: &'static str,
    decode: DecodeFn,
}

fn decode_boxed<A: SignatureAlgorithm>(
    version: Version,
    discriminator: Discriminator,
    reader: &mut Reader<'_>,
) -> Result<Box<dyn DynAlgorithm>, DecodeError> {
    let algorithm = decode_validated::<A>(version, discriminator, reader)?;
    Ok(Box::new(algorithm))
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Lookup table from discriminator to algorithm family.
#[derive(Clone, Default)]
pub struct Registry {
    entries: HashMap<(Version, Discriminator), Entry>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Registry::default()
    }

    /// A registry holding every built-in family enabled by crate features.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Registry::new();

        #[cfg(feature = "eddsa")]
        registry.insert::<crate::algorithm::eddsa::EdDsa>();

        #[cfg(feature = "ecdsa")]
        registry.insert::<crate::algorithm::ecdsa::EcDsa>();

        #[cfg(feature = "rsa")]
        registry.insert::<crate::algorithm::rsa::Rsa>();

        registry
    }

    /// Claim every slot `A` declares.
    ///
    /// Nothing is inserted if any slot is already taken.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateDiscriminator`] for the first
    /// contested slot.
    pub fn register<A: SignatureAlgorithm>(&mut self) -> Result<&mut Self, RegistryError> {
        for &(version, discriminator) in A::DISCRIMINATORS {
            if let Some(existing) = self.entries.get(&(version, discriminator)) {
                return Err(RegistryError::DuplicateDiscriminator {
                    version,
                    discriminator,
                    existing: existing.name,
                    claimant: A::NAME,
                });
            }
        }

        self.insert::<A>();
        tracing::debug!(algorithm = A::NAME, "registered varsig algorithm");
        Ok(self)
    }

    fn insert<A: SignatureAlgorithm>(&mut self) {
        for &slot in A::DISCRIMINATORS {
            self.entries.insert(
                slot,
                Entry {
                    name: A::NAME,
                    decode: decode_boxed::<A>,
                },
            );
        }
    }

    /// Whether anything claims the slot.
    #[must_use]
    pub fn contains(&self, version: Version, discriminator: Discriminator) -> bool {
        self.entries.contains_key(&(version, discriminator))
    }

    /// Name of the family claiming the slot.
    #[must_use]
    pub fn lookup(&self, version: Version, discriminator: Discriminator) -> Option<&'static str> {
        self.entries
            .get(&(version, discriminator))
            .map(|entry| entry.name)
    }

    /// Decode a varsig of any registered family.
    ///
    /// Everything after the algorithm segments is the signature.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnsupportedAlgorithm`] if nothing claims the
    /// discriminator, or any other [`DecodeError`] from the header.
    #[tracing::instrument(skip_all, fields(len = bytes.len()))]
    pub fn decode(&self, bytes: &[u8]) -> Result<AnyVarsig, DecodeError> {
        let mut reader = Reader::new(bytes);
        self.decode_reader(&mut reader)
            .map(|(version, algorithm)| {
                AnyVarsig::from_parts(version, algorithm, reader.remaining().to_vec())
            })
            .inspect_err(|err| tracing::debug!(%err, "failed to decode varsig"))
    }

    fn decode_reader(
        &self,
        reader: &mut Reader<'_>,
    ) -> Result<(Version, Box<dyn DynAlgorithm>), DecodeError> {
        decode_prefix(reader)?;
        let (version, discriminator) = decode_framing(reader)?;
        tracing::trace!(%version, %discriminator, "read varsig framing");

        let entry = self.entries.get(&(version, discriminator)).ok_or(
            DecodeError::UnsupportedAlgorithm {
                version,
                cause: Cause::Code(discriminator.0),
            },
        )?;

        let algorithm = (entry.decode)(version, discriminator, reader)?;
        Ok((version, algorithm))
    }

    /// The process-wide registry.
    ///
    /// Holds the built-in families unless [`Registry::install`] ran first.
    #[must_use]
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::with_defaults)
    }

    /// Make this the process-wide registry.
    ///
    /// # Errors
    ///
    /// Gives the registry back if [`Registry::global`] was already
    /// initialized.
    pub fn install(self) -> Result<(), Registry> {
        GLOBAL.set(self)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut slots: Vec<_> = self
            .entries
            .iter()
            .map(|(&(version, discriminator), entry)| (version, discriminator, entry.name))
            .collect();
        slots.sort_unstable();

        f.debug_struct("Registry").field("slots", &slots).finish()
    }
}

#[cfg(all(test, feature = "eddsa", feature = "ecdsa", feature = "rsa"))]
mod tests {
    use super::*;
    use crate::{
        algorithm::{ecdsa::EcDsa, eddsa::EdDsa, rsa::Rsa},
        encoding::PayloadEncoding,
        error::ConstructionError,
        hash::HashAlgorithm,
        header::{Options, Varsig},
    };
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    #[test_log::test]
    fn test_defaults_cover_builtin_slots() {
        let registry = Registry::with_defaults();

        assert_eq!(registry.lookup(Version::V1, Discriminator(0xed)), Some("EdDSA"));
        assert_eq!(registry.lookup(Version::V0, Discriminator(0x1203)), Some("EdDSA"));
        assert_eq!(registry.lookup(Version::V1, Discriminator(0xec)), Some("ECDSA"));
        assert_eq!(registry.lookup(Version::V0, Discriminator(0xe7)), Some("ECDSA"));
        assert_eq!(registry.lookup(Version::V0, Discriminator(0x1205)), Some("RSA"));
        assert_eq!(registry.lookup(Version::V1, Discriminator(0x1205)), Some("RSA"));
        assert!(!registry.contains(Version::V1, Discriminator(0x1203)));
    }

    #[test_log::test]
    fn test_register_into_empty() -> TestResult {
        let mut registry = Registry::new();
        registry
            .register::<EdDsa>()?
            .register::<EcDsa>()?
            .register::<Rsa>()?;

        assert!(registry.contains(Version::V0, Discriminator(0xed)));
        assert!(registry.contains(Version::V0, Discriminator(0x1200)));
        Ok(())
    }

    #[test_log::test]
    fn test_duplicate_registration_is_rejected() -> TestResult {
        let mut registry = Registry::new();
        registry.register::<Rsa>()?;

        assert_eq!(
            registry.register::<Rsa>().unwrap_err(),
            RegistryError::DuplicateDiscriminator {
                version: Version::V0,
                discriminator: Discriminator(0x1205),
                existing: "RSA",
                claimant: "RSA",
            }
        );
        Ok(())
    }

    #[test_log::test]
    fn test_unregistered_family_is_unsupported() -> TestResult {
        let mut registry = Registry::new();
        registry.register::<EdDsa>()?;

        let rsa = Varsig::new(Rsa::rs256(256, PayloadEncoding::DagCbor))?.encode();
        assert_eq!(
            registry.decode(&rsa),
            Err(DecodeError::UnsupportedAlgorithm {
                version: Version::V1,
                cause: Cause::Code(0x1205),
            })
        );
        Ok(())
    }

    #[test_log::test]
    fn test_decode_validates_config() {
        // v0 Ed25519 paired with SHA2-256
        let bytes = [0x34, 0xed, 0x01, 0x12, 0x71];
        assert_eq!(
            Registry::with_defaults().decode(&bytes),
            Err(DecodeError::InvalidConfig(
                ConstructionError::UnsupportedHash {
                    algorithm: "EdDSA",
                    variant: "Ed25519",
                    hash: HashAlgorithm::Sha2_256,
                }
            ))
        );
    }

    #[test_log::test]
    fn test_decode_dispatches_by_family() -> TestResult {
        let registry = Registry::with_defaults();
        let expected = Varsig::with_options(
            EcDsa::es384(PayloadEncoding::DagPb),
            Options::new().force_version0(),
        )?;

        let decoded = registry.decode(&expected.encode())?;
        assert_eq!(decoded.version(), Version::V0);
        assert_eq!(decoded.algorithm_name(), "ECDSA");
        assert_eq!(decoded.downcast::<EcDsa>(), Ok(expected));
        Ok(())
    }
}
