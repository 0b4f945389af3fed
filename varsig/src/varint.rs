//! Unsigned LEB128 varints.
//!
//! Every segment of a varsig header is an unsigned varint: seven value bits
//! per byte, least significant group first, with the high bit set on every
//! byte except the last.
//!
//! Decoding is strict. A value that would not fit in a `u64` is rejected,
//! and so is any encoding longer than the minimal one (a trailing `0x00`
//! continuation), so each value has exactly one accepted byte form.
//!
//! ```
//! let mut buf = Vec::new();
//! varsig::varint::encode(0xed, &mut buf);
//! assert_eq!(buf, [0xed, 0x01]);
//!
//! let (value, len) = varsig::varint::decode(&buf).unwrap();
//! assert_eq!(value, 0xed);
//! assert_eq!(len, 2);
//! ```

use crate::error::VarintError;

/// Maximum number of bytes a `u64` varint can occupy.
pub const MAX_BYTES: usize = 10;

const CONTINUATION: u8 = 0x80;
const LOW_BITS: u8 = 0x7f;

/// Append the varint encoding of `value` to `buf`.
#[allow(clippy::cast_possible_truncation)] // masked to 7 bits
pub fn encode(mut value: u64, buf: &mut Vec<u8>) {
    while value >= u64::from(CONTINUATION) {
        buf.push((value as u8 & LOW_BITS) | CONTINUATION);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Encode `value` into a fresh buffer.
#[must_use]
pub fn to_vec(value: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MAX_BYTES);
    encode(value, &mut buf);
    buf
}

/// Decode one varint from the front of `bytes`.
///
/// Returns the value and the number of bytes it occupied.
///
/// # Errors
///
/// - [`VarintError::TruncatedInput`] if `bytes` ends before a terminating byte.
/// - [`VarintError::MalformedVarint`] if the value overflows a `u64` or
///   the encoding is not minimal.
pub fn decode(bytes: &[u8]) -> Result<(u64, usize), VarintError> {
    let mut value = 0u64;

    for (i, &byte) in bytes.iter().take(MAX_BYTES).enumerate() {
        // The tenth byte may only contribute the single remaining bit.
        if i == MAX_BYTES - 1 && byte > 0x01 {
            return Err(VarintError::MalformedVarint);
        }

        value |= u64::from(byte & LOW_BITS) << (7 * i);

        if byte & CONTINUATION == 0 {
            if byte == 0 && i > 0 {
                return Err(VarintError::MalformedVarint);
            }
            return Ok((value, i + 1));
        }
    }

    Err(VarintError::TruncatedInput)
}

/// A forward-only cursor over a varsig byte sequence.
///
/// Failed reads leave the cursor where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader positioned at the start of `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, position: 0 }
    }

    /// Read the next varint and advance past it.
    ///
    /// # Errors
    ///
    /// Propagates [`decode`] failures without moving the cursor.
    pub fn read_varint(&mut self) -> Result<u64, VarintError> {
        let (value, len) = decode(self.remaining())?;
        self.position += len;
        Ok(value)
    }

    /// The unread tail of the input.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.bytes.get(self.position..).unwrap_or_default()
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Whether every byte has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use testresult::TestResult;

    #[test]
    fn test_single_byte_values() -> TestResult {
        assert_eq!(to_vec(0), [0x00]);
        assert_eq!(to_vec(0x34), [0x34]);
        assert_eq!(to_vec(0x7f), [0x7f]);
        assert_eq!(decode(&[0x13])?, (0x13, 1));
        Ok(())
    }

    #[test]
    fn test_multi_byte_codes() -> TestResult {
        assert_eq!(to_vec(0xed), [0xed, 0x01]);
        assert_eq!(to_vec(0x0129), [0xa9, 0x02]);
        assert_eq!(to_vec(0xe191), [0x91, 0xc3, 0x03]);
        assert_eq!(decode(&[0x91, 0xc3, 0x03, 0xff])?, (0xe191, 3));
        Ok(())
    }

    #[test]
    fn test_u64_max() -> TestResult {
        let bytes = to_vec(u64::MAX);
        assert_eq!(bytes.len(), MAX_BYTES);
        assert_eq!(bytes.last(), Some(&0x01));
        assert_eq!(decode(&bytes)?, (u64::MAX, MAX_BYTES));
        Ok(())
    }

    #[test]
    fn test_fails_on_empty() {
        assert_eq!(decode(&[]), Err(VarintError::TruncatedInput));
    }

    #[test]
    fn test_fails_on_dangling_continuation() {
        assert_eq!(decode(&[0xed]), Err(VarintError::TruncatedInput));
        assert_eq!(decode(&[0x91, 0xc3]), Err(VarintError::TruncatedInput));
    }

    #[test]
    fn test_fails_on_overflow() {
        let mut bytes = vec![0xff; MAX_BYTES - 1];
        bytes.push(0x02);
        assert_eq!(decode(&bytes), Err(VarintError::MalformedVarint));

        let eleven = vec![0x80; MAX_BYTES + 1];
        assert_eq!(decode(&eleven), Err(VarintError::MalformedVarint));
    }

    #[test]
    fn test_fails_on_non_minimal() {
        assert_eq!(decode(&[0x80, 0x00]), Err(VarintError::MalformedVarint));
        assert_eq!(decode(&[0xed, 0x81, 0x00]), Err(VarintError::MalformedVarint));
    }

    #[test]
    fn test_reader_advances() -> TestResult {
        let bytes = [0x34, 0xed, 0x01, 0xaa];
        let mut reader = Reader::new(&bytes);

        assert_eq!(reader.read_varint()?, 0x34);
        assert_eq!(reader.read_varint()?, 0xed);
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.remaining(), &[0xaa]);
        assert!(!reader.is_empty());
        Ok(())
    }

    #[test]
    fn test_reader_does_not_advance_on_error() {
        let bytes = [0x12, 0x80];
        let mut reader = Reader::new(&bytes);

        assert_eq!(reader.read_varint(), Ok(0x12));
        assert_eq!(reader.read_varint(), Err(VarintError::TruncatedInput));
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.remaining(), &[0x80]);
    }

    proptest! {
        #[test]
        fn test_decode_inverts_encode(value in any::<u64>(), tail in proptest::collection::vec(any::<u8>(), 0..4)) {
            let mut bytes = to_vec(value);
            let len = bytes.len();
            bytes.extend_from_slice(&tail);
            prop_assert_eq!(decode(&bytes), Ok((value, len)));
        }

        #[test]
        fn test_accepted_bytes_are_canonical(bytes in proptest::collection::vec(any::<u8>(), 1..12)) {
            if let Ok((value, len)) = decode(&bytes) {
                prop_assert_eq!(to_vec(value), bytes[..len].to_vec());
            }
        }
    }
}
