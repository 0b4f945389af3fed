//! Payload encodings.
//!
//! A payload encoding is one varint segment, except for EIP-191 which is a
//! wrapper segment followed by exactly one inner segment. The set of
//! accepted segments depends on the [`Version`]: v1 drops the legacy
//! `DAG-PB` and JWT encodings.

use crate::{
    error::{Cause, DecodeError},
    varint::{self, Reader},
    version::Version,
};
use std::fmt;

const SEGMENT_VERBATIM: u64 = 0x5f;
const SEGMENT_DAG_PB: u64 = 0x70;
const SEGMENT_DAG_CBOR: u64 = 0x71;
const SEGMENT_DAG_JSON: u64 = 0x0129;
const SEGMENT_EIP191: u64 = 0xe191;
const SEGMENT_JWT: u64 = 0x6a77;

/// Canonical encoding of the signed payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PayloadEncoding {
    /// Raw bytes, signed as given.
    Verbatim,

    /// `DAG-PB` (v0 only).
    DagPb,

    /// `DAG-CBOR`.
    DagCbor,

    /// `DAG-JSON`.
    DagJson,

    /// EIP-191 personal message over raw bytes.
    Eip191Raw,

    /// EIP-191 personal message over `DAG-CBOR`.
    Eip191Cbor,

    /// Canonicalized JWT (v0 only).
    Jwt,
}

impl PayloadEncoding {
    /// Every payload encoding.
    pub const ALL: [PayloadEncoding; 7] = [
        PayloadEncoding::Verbatim,
        PayloadEncoding::DagPb,
        PayloadEncoding::DagCbor,
        PayloadEncoding::DagJson,
        PayloadEncoding::Eip191Raw,
        PayloadEncoding::Eip191Cbor,
        PayloadEncoding::Jwt,
    ];

    /// The canonical wire segments.
    #[must_use]
    pub const fn segments(self) -> &'static [u64] {
        match self {
            PayloadEncoding::Verbatim => &[SEGMENT_VERBATIM],
            PayloadEncoding::DagPb => &[SEGMENT_DAG_PB],
            PayloadEncoding::DagCbor => &[SEGMENT_DAG_CBOR],
            PayloadEncoding::DagJson => &[SEGMENT_DAG_JSON],
            PayloadEncoding::Eip191Raw => &[SEGMENT_EIP191, SEGMENT_VERBATIM],
            PayloadEncoding::Eip191Cbor => &[SEGMENT_EIP191, SEGMENT_DAG_CBOR],
            PayloadEncoding::Jwt => &[SEGMENT_JWT],
        }
    }

    /// Whether this encoding exists in `version`.
    #[must_use]
    pub const fn is_permitted(self, version: Version) -> bool {
        match version {
            Version::V0 => true,
            Version::V1 => !matches!(self, PayloadEncoding::DagPb | PayloadEncoding::Jwt),
        }
    }

    /// Append the canonical segments to `buf`.
    pub fn encode(self, buf: &mut Vec<u8>) {
        for segment in self.segments() {
            varint::encode(*segment, buf);
        }
    }

    /// The canonical segments as bytes.
    #[must_use]
    pub fn to_bytes(self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4);
        self.encode(&mut buf);
        buf
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PayloadEncoding::Verbatim => "verbatim",
            PayloadEncoding::DagPb => "dag-pb",
            PayloadEncoding::DagCbor => "dag-cbor",
            PayloadEncoding::DagJson => "dag-json",
            PayloadEncoding::Eip191Raw => "eip191+raw",
            PayloadEncoding::Eip191Cbor => "eip191+dag-cbor",
            PayloadEncoding::Jwt => "jwt",
        }
    }
}

impl fmt::Display for PayloadEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read a payload encoding under the grammar of `version`.
///
/// # Errors
///
/// Returns [`DecodeError::UnsupportedPayloadEncoding`] if a segment cannot
/// be read, is unknown, or is not permitted in `version`.
pub fn decode_payload_encoding(
    reader: &mut Reader<'_>,
    version: Version,
) -> Result<PayloadEncoding, DecodeError> {
    let unsupported = |cause: Cause| DecodeError::UnsupportedPayloadEncoding { version, cause };

    let first = reader.read_varint().map_err(|e| unsupported(e.into()))?;

    let encoding = match first {
        SEGMENT_VERBATIM => PayloadEncoding::Verbatim,
        SEGMENT_DAG_PB => PayloadEncoding::DagPb,
        SEGMENT_DAG_CBOR => PayloadEncoding::DagCbor,
        SEGMENT_DAG_JSON => PayloadEncoding::DagJson,
        SEGMENT_JWT => PayloadEncoding::Jwt,
        SEGMENT_EIP191 => {
            let inner = reader.read_varint().map_err(|e| unsupported(e.into()))?;
            match inner {
                SEGMENT_VERBATIM => PayloadEncoding::Eip191Raw,
                SEGMENT_DAG_CBOR => PayloadEncoding::Eip191Cbor,
                other => return Err(unsupported(Cause::Segments(first, other))),
            }
        }
        other => return Err(unsupported(Cause::Code(other))),
    };

    if encoding.is_permitted(version) {
        Ok(encoding)
    } else {
        Err(unsupported(Cause::Code(first)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VarintError;
    use testresult::TestResult;

    #[test]
    fn test_verbatim_in_both_versions() -> TestResult {
        for version in [Version::V0, Version::V1] {
            let encoding = decode_payload_encoding(&mut Reader::new(&[0x5f]), version)?;
            assert_eq!(encoding, PayloadEncoding::Verbatim);
        }
        Ok(())
    }

    #[test]
    fn test_jwt_is_v0_only() -> TestResult {
        let bytes = [0xf7, 0xd4, 0x01];
        assert_eq!(crate::varint::decode(&bytes)?, (0x6a77, 3));

        let v0 = decode_payload_encoding(&mut Reader::new(&bytes), Version::V0)?;
        assert_eq!(v0, PayloadEncoding::Jwt);

        assert_eq!(
            decode_payload_encoding(&mut Reader::new(&bytes), Version::V1),
            Err(DecodeError::UnsupportedPayloadEncoding {
                version: Version::V1,
                cause: Cause::Code(0x6a77),
            })
        );
        Ok(())
    }

    #[test]
    fn test_raw_jwt_code_bytes_fail_in_v1() {
        // 0x6a is a complete varint on its own, and not a known segment.
        assert_eq!(
            decode_payload_encoding(&mut Reader::new(&[0x6a, 0x77]), Version::V1),
            Err(DecodeError::UnsupportedPayloadEncoding {
                version: Version::V1,
                cause: Cause::Code(0x6a),
            })
        );
    }

    #[test]
    fn test_dag_pb_is_v0_only() -> TestResult {
        let v0 = decode_payload_encoding(&mut Reader::new(&[0x70]), Version::V0)?;
        assert_eq!(v0, PayloadEncoding::DagPb);

        let err = decode_payload_encoding(&mut Reader::new(&[0x70]), Version::V1).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnsupportedPayloadEncoding {
                version: Version::V1,
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn test_eip191_compound() -> TestResult {
        let raw = [0x91, 0xc3, 0x03, 0x5f];
        let cbor = [0x91, 0xc3, 0x03, 0x71];

        for version in [Version::V0, Version::V1] {
            assert_eq!(
                decode_payload_encoding(&mut Reader::new(&raw), version)?,
                PayloadEncoding::Eip191Raw
            );
            assert_eq!(
                decode_payload_encoding(&mut Reader::new(&cbor), version)?,
                PayloadEncoding::Eip191Cbor
            );
        }
        Ok(())
    }

    #[test]
    fn test_eip191_fails_on_unknown_inner() {
        assert_eq!(
            decode_payload_encoding(&mut Reader::new(&[0x91, 0xc3, 0x03, 0x70]), Version::V0),
            Err(DecodeError::UnsupportedPayloadEncoding {
                version: Version::V0,
                cause: Cause::Segments(0xe191, 0x70),
            })
        );
    }

    #[test]
    fn test_eip191_fails_on_missing_inner() {
        let err = decode_payload_encoding(&mut Reader::new(&[0x91, 0xc3, 0x03]), Version::V1)
            .unwrap_err();
        assert_eq!(err.varint_error(), Some(VarintError::TruncatedInput));
    }

    #[test]
    fn test_fails_on_unknown_segment() {
        assert_eq!(
            decode_payload_encoding(&mut Reader::new(&[0x42]), Version::V0),
            Err(DecodeError::UnsupportedPayloadEncoding {
                version: Version::V0,
                cause: Cause::Code(0x42),
            })
        );
    }

    #[test]
    fn test_grammar_is_bijective() {
        for version in [Version::V0, Version::V1] {
            for encoding in PayloadEncoding::ALL {
                let bytes = encoding.to_bytes();
                let mut reader = Reader::new(&bytes);
                match decode_payload_encoding(&mut reader, version) {
                    Ok(decoded) => {
                        assert!(encoding.is_permitted(version));
                        assert_eq!(decoded, encoding);
                        assert!(reader.is_empty());
                    }
                    Err(_) => assert!(!encoding.is_permitted(version)),
                }
            }
        }
    }
}
