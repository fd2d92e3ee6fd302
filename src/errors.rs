use thiserror::Error;

/// Errors surfaced by fallible key construction.
///
/// Not-found outcomes are not errors; lookups and removals signal absence
/// with `Option::None` so that a stored zero or default value can never be
/// confused with a missing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArtError {
    /// The key is longer than the maximum the chosen key type can hold.
    /// Rejected before any tree mutation takes place.
    #[error("key length {len} exceeds maximum of {max} bytes")]
    KeyTooLong { len: usize, max: usize },
}
