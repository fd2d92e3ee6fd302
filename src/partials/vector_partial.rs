use crate::partials::Partial;

/// Heap-allocated partial of unbounded length, paired with
/// [`VectorKey`](crate::keys::vector_key::VectorKey).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VectorPartial {
    data: Box<[u8]>,
}

impl VectorPartial {
    pub fn from_slice(src: &[u8]) -> Self {
        Self {
            data: Box::from(src),
        }
    }
}

impl AsRef<[u8]> for VectorPartial {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<&[u8]> for VectorPartial {
    fn from(src: &[u8]) -> Self {
        Self::from_slice(src)
    }
}

impl Partial for VectorPartial {
    fn partial_before(&self, length: usize) -> Self {
        assert!(length <= self.data.len());
        Self::from_slice(&self.data[..length])
    }

    fn partial_after(&self, start: usize) -> Self {
        assert!(start <= self.data.len());
        Self::from_slice(&self.data[start..])
    }

    fn join(&self, byte: u8, other: &Self) -> Self {
        let mut data = Vec::with_capacity(self.data.len() + 1 + other.data.len());
        data.extend_from_slice(&self.data);
        data.push(byte);
        data.extend_from_slice(&other.data);
        Self {
            data: data.into_boxed_slice(),
        }
    }

    #[inline(always)]
    fn at(&self, pos: usize) -> u8 {
        self.data[pos]
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::partials::vector_partial::VectorPartial;
    use crate::partials::Partial;

    #[test]
    fn before_after_join() {
        let p = VectorPartial::from_slice(b"banana");
        assert_eq!(p.partial_before(3).to_slice(), b"ban");
        assert_eq!(p.partial_after(3).to_slice(), b"ana");
        let joined = p.partial_before(2).join(b'n', &VectorPartial::from_slice(b"ana"));
        assert_eq!(joined.to_slice(), b"banana");
    }
}
