use crate::keys::KeyTrait;

pub mod array_partial;
pub mod vector_partial;

/// A path-compressed run of key bytes stored on an inner node.
///
/// A partial never includes the discriminating byte consumed by the parent
/// edge; it is only the bytes skipped between that edge and the node's
/// children.
pub trait Partial: AsRef<[u8]> + Clone {
    /// The first `length` bytes of this partial.
    fn partial_before(&self, length: usize) -> Self;
    /// The bytes from `start` onward.
    fn partial_after(&self, start: usize) -> Self;
    /// Concatenation `self ++ [byte] ++ other`, used when merging a
    /// single-child node back into its parent's compressed path.
    fn join(&self, byte: u8, other: &Self) -> Self;
    /// The byte at `pos`.
    fn at(&self, pos: usize) -> u8;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Length of the common prefix between this partial and `key` read from
    /// `at_depth` onward.
    fn prefix_length_key<'a, K>(&self, key: &'a K, at_depth: usize) -> usize
    where
        K: KeyTrait<PartialType = Self> + 'a,
    {
        let len = self.len().min(key.length_at(at_depth));
        let mut idx = 0;
        while idx < len {
            if self.at(idx) != key.at(at_depth + idx) {
                break;
            }
            idx += 1;
        }
        idx
    }
    /// Length of the common prefix between this partial and `slice`.
    fn prefix_length_slice(&self, slice: &[u8]) -> usize {
        let len = self.len().min(slice.len());
        let mut idx = 0;
        while idx < len {
            if self.at(idx) != slice[idx] {
                break;
            }
            idx += 1;
        }
        idx
    }
    fn to_slice(&self) -> &[u8] {
        self.as_ref()
    }
}
