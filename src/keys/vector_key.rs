use crate::keys::KeyTrait;
use crate::partials::vector_partial::VectorPartial;

/// A heap-allocated key of arbitrary length.
///
/// This is the fully-dynamic key representation: no fixed upper bound is
/// imposed (`MAXIMUM_SIZE` is `None`), so construction never fails and keys
/// are limited only by available memory.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct VectorKey {
    data: Box<[u8]>,
}

impl VectorKey {
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            data: Box::from(data),
        }
    }
}

impl AsRef<[u8]> for VectorKey {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl KeyTrait for VectorKey {
    type PartialType = VectorPartial;
    const MAXIMUM_SIZE: Option<usize> = None;

    fn new_from_slice(data: &[u8]) -> Self {
        Self::from_slice(data)
    }

    #[inline(always)]
    fn at(&self, pos: usize) -> u8 {
        self.data[pos]
    }

    #[inline(always)]
    fn length_at(&self, at_depth: usize) -> usize {
        self.data.len() - at_depth
    }

    fn to_partial(&self, at_depth: usize) -> VectorPartial {
        VectorPartial::from_slice(&self.data[at_depth..])
    }
}

impl From<&[u8]> for VectorKey {
    fn from(data: &[u8]) -> Self {
        Self::from_slice(data)
    }
}

impl From<&str> for VectorKey {
    fn from(data: &str) -> Self {
        Self::from_slice(data.as_bytes())
    }
}

impl From<String> for VectorKey {
    fn from(data: String) -> Self {
        Self::from_slice(data.as_bytes())
    }
}

impl From<Vec<u8>> for VectorKey {
    fn from(data: Vec<u8>) -> Self {
        Self {
            data: data.into_boxed_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::keys::vector_key::VectorKey;
    use crate::keys::KeyTrait;

    #[test]
    fn bytes_and_order() {
        let a = VectorKey::from_slice(b"A");
        let aa = VectorKey::from_slice(b"AA");
        assert!(a < aa);
        assert_eq!(aa.length_at(1), 1);
        assert_eq!(a.at(0), b'A');
    }
}
