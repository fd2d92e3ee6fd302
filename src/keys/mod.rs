use crate::partials::Partial;

pub mod array_key;
pub mod vector_key;

/// A complete key: an ordered sequence of bytes.
///
/// Keys compare lexicographically over their raw bytes; the tree's iteration
/// order is exactly the `Ord` order of its key type.
pub trait KeyTrait: Clone + PartialEq + Eq + PartialOrd + Ord + AsRef<[u8]> {
    /// The compressed-prefix representation stored on inner nodes built from
    /// this key type.
    type PartialType: Partial;

    /// Upper bound on key length, if the representation imposes one.
    const MAXIMUM_SIZE: Option<usize>;

    /// Build a key from raw bytes. Panics if the slice exceeds
    /// `MAXIMUM_SIZE`; bounded key types offer a fallible alternative.
    fn new_from_slice(data: &[u8]) -> Self;

    /// The byte at `pos`.
    fn at(&self, pos: usize) -> u8;

    /// Number of bytes remaining at and after `at_depth`.
    fn length_at(&self, at_depth: usize) -> usize;

    /// The key's bytes from `at_depth` onward, as a partial.
    fn to_partial(&self, at_depth: usize) -> Self::PartialType;

    fn matches_slice(&self, slice: &[u8]) -> bool {
        self.as_ref() == slice
    }
}
