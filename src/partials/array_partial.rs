use crate::partials::Partial;

/// Stack-allocated partial holding at most `N` bytes.
///
/// Paired with [`ArrayKey<N>`](crate::keys::array_key::ArrayKey); a key of at
/// most `N` bytes can never produce a compressed run longer than `N`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ArrPartial<const N: usize> {
    data: [u8; N],
    len: usize,
}

impl<const N: usize> ArrPartial<N> {
    pub fn from_slice(src: &[u8]) -> Self {
        assert!(src.len() <= N, "partial exceeds inline capacity");
        let mut data = [0; N];
        data[..src.len()].copy_from_slice(src);
        Self {
            data,
            len: src.len(),
        }
    }

    pub fn empty() -> Self {
        Self {
            data: [0; N],
            len: 0,
        }
    }
}

impl<const N: usize> AsRef<[u8]> for ArrPartial<N> {
    fn as_ref(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

impl<const N: usize> Partial for ArrPartial<N> {
    fn partial_before(&self, length: usize) -> Self {
        assert!(length <= self.len);
        Self::from_slice(&self.data[..length])
    }

    fn partial_after(&self, start: usize) -> Self {
        assert!(start <= self.len);
        Self::from_slice(&self.data[start..self.len])
    }

    fn join(&self, byte: u8, other: &Self) -> Self {
        assert!(self.len + 1 + other.len <= N, "joined partial exceeds inline capacity");
        let mut data = [0; N];
        data[..self.len].copy_from_slice(&self.data[..self.len]);
        data[self.len] = byte;
        data[self.len + 1..self.len + 1 + other.len].copy_from_slice(&other.data[..other.len]);
        Self {
            data,
            len: self.len + 1 + other.len,
        }
    }

    #[inline(always)]
    fn at(&self, pos: usize) -> u8 {
        assert!(pos < self.len);
        self.data[pos]
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use crate::partials::array_partial::ArrPartial;
    use crate::partials::Partial;

    #[test]
    fn before_after_at() {
        let p = ArrPartial::<16>::from_slice(b"abcdef");
        assert_eq!(p.len(), 6);
        assert_eq!(p.partial_before(3).to_slice(), b"abc");
        assert_eq!(p.partial_after(3).to_slice(), b"def");
        assert_eq!(p.at(2), b'c');
        assert!(ArrPartial::<16>::empty().is_empty());
    }

    #[test]
    fn join_reassembles_compressed_path() {
        let parent = ArrPartial::<16>::from_slice(b"ap");
        let child = ArrPartial::<16>::from_slice(b"le");
        assert_eq!(parent.join(b'p', &child).to_slice(), b"apple");
    }

    #[test]
    fn common_prefix_with_slice() {
        let p = ArrPartial::<16>::from_slice(b"romane");
        assert_eq!(p.prefix_length_slice(b"romanus"), 5);
        assert_eq!(p.prefix_length_slice(b"rubens"), 1);
        assert_eq!(p.prefix_length_slice(b""), 0);
        assert_eq!(p.prefix_length_slice(b"romane"), 6);
    }
}
