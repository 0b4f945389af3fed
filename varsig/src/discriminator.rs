//! Algorithm discriminators.

use std::fmt;

/// Opaque identifier selecting the algorithm family of a header.
///
/// There is no closed list here: each algorithm declares the values it
/// claims alongside its implementation. Some families changed value
/// between v0 and v1, so a discriminator only means something together
/// with the [`Version`](crate::version::Version) it was read under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Discriminator(pub u64);

impl From<u64> for Discriminator {
    fn from(value: u64) -> Self {
        Discriminator(value)
    }
}

impl From<Discriminator> for u64 {
    fn from(discriminator: Discriminator) -> Self {
        discriminator.0
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
