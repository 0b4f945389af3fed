//! [Varsig] headers.
//!
//! A varsig is a self-describing signature: a multiformat header naming
//! the signature algorithm, its parameters and the canonical encoding of
//! the signed payload, followed by the raw signature bytes. This crate
//! decodes and encodes both the legacy v0 layout and v1.
//!
//! [Varsig]: https://github.com/ChainAgnostic/varsig
//!
//! # Example
//!
//! ```rust
//! use varsig::{
//!     algorithm::eddsa::{EdDsa, EdDsaVarsig},
//!     Options, PayloadEncoding, Version,
//! };
//!
//! // ✨ Template for Ed25519 over DAG-CBOR ✨
//! let template = EdDsaVarsig::new(EdDsa::ed25519(PayloadEncoding::DagCbor))?;
//! assert_eq!(template.encode(), [0x34, 0x01, 0xed, 0x01, 0xed, 0x01, 0x13, 0x71]);
//!
//! // Same scheme in the legacy layout, with a signature attached
//! let signed = EdDsaVarsig::with_options(
//!     EdDsa::ed25519(PayloadEncoding::DagCbor),
//!     Options::new().force_version0().signature([0u8; 64]),
//! )?;
//!
//! // Decode without knowing the algorithm ahead of time
//! let decoded = varsig::decode(&signed.encode())?;
//! assert_eq!(decoded.version(), Version::V0);
//! assert_eq!(decoded.algorithm_name(), "EdDSA");
//! assert_eq!(decoded.signature().len(), 64);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod algorithm;
pub mod discriminator;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod header;
pub mod registry;
pub mod varint;
pub mod version;

pub use discriminator::Discriminator;
pub use encoding::PayloadEncoding;
pub use error::{ConstructionError, DecodeError, RegistryError, VarintError};
pub use hash::HashAlgorithm;
pub use header::{AnyVarsig, Options, Varsig};
pub use registry::Registry;
pub use version::Version;

/// Decode a varsig with the process-wide [`Registry`].
///
/// # Errors
///
/// Returns a [`DecodeError`] if the header is malformed or its algorithm
/// is not registered.
pub fn decode(bytes: &[u8]) -> Result<AnyVarsig, DecodeError> {
    Registry::global().decode(bytes)
}
