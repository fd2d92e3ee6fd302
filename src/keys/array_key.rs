use crate::errors::ArtError;
use crate::keys::KeyTrait;
use crate::partials::array_partial::ArrPartial;

/// A fixed-capacity key of up to `N` bytes, stored inline.
///
/// This is the bounded key representation: any attempt to build a key longer
/// than `N` bytes is rejected with [`ArtError::KeyTooLong`] before the tree
/// is touched. Keys are raw bytes; no terminator is appended, and keys that
/// are strict prefixes of other keys are handled by the tree itself.
///
/// The `From` conversions for strings and integers panic on overflow; use
/// [`ArrayKey::try_from_slice`] when the input length is not known to fit.
///
/// Integer conversions encode big-endian (sign bit flipped for signed types)
/// so that numeric order and byte-lexicographic order agree.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ArrayKey<const N: usize> {
    data: [u8; N],
    len: usize,
}

impl<const N: usize> ArrayKey<N> {
    /// Build a key from raw bytes, rejecting slices longer than `N`.
    pub fn try_from_slice(data: &[u8]) -> Result<Self, ArtError> {
        if data.len() > N {
            return Err(ArtError::KeyTooLong {
                len: data.len(),
                max: N,
            });
        }
        let mut arr = [0; N];
        arr[..data.len()].copy_from_slice(data);
        Ok(Self {
            data: arr,
            len: data.len(),
        })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

impl<const N: usize> AsRef<[u8]> for ArrayKey<N> {
    fn as_ref(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

impl<const N: usize> PartialOrd for ArrayKey<N> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for ArrayKey<N> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<const N: usize> KeyTrait for ArrayKey<N> {
    type PartialType = ArrPartial<N>;
    const MAXIMUM_SIZE: Option<usize> = Some(N);

    fn new_from_slice(data: &[u8]) -> Self {
        match Self::try_from_slice(data) {
            Ok(key) => key,
            Err(e) => panic!("{e}"),
        }
    }

    #[inline(always)]
    fn at(&self, pos: usize) -> u8 {
        self.data[pos]
    }

    #[inline(always)]
    fn length_at(&self, at_depth: usize) -> usize {
        self.len - at_depth
    }

    fn to_partial(&self, at_depth: usize) -> ArrPartial<N> {
        ArrPartial::from_slice(&self.data[at_depth..self.len])
    }
}

impl<'a, const N: usize> TryFrom<&'a [u8]> for ArrayKey<N> {
    type Error = ArtError;

    fn try_from(data: &'a [u8]) -> Result<Self, ArtError> {
        Self::try_from_slice(data)
    }
}

impl<const N: usize> From<&str> for ArrayKey<N> {
    fn from(data: &str) -> Self {
        Self::new_from_slice(data.as_bytes())
    }
}

impl<const N: usize> From<String> for ArrayKey<N> {
    fn from(data: String) -> Self {
        Self::new_from_slice(data.as_bytes())
    }
}

impl<const N: usize> From<&String> for ArrayKey<N> {
    fn from(data: &String) -> Self {
        Self::new_from_slice(data.as_bytes())
    }
}

macro_rules! impl_from_unsigned {
    ( $($t:ty),* ) => {
    $(
    impl<const N: usize> From<$t> for ArrayKey<N> {
        fn from(data: $t) -> Self {
            Self::new_from_slice(data.to_be_bytes().as_ref())
        }
    }
    impl<const N: usize> From<&$t> for ArrayKey<N> {
        fn from(data: &$t) -> Self {
            (*data).into()
        }
    }
    )*
    }
}
impl_from_unsigned!(u8, u16, u32, u64, usize, u128);

macro_rules! impl_from_signed {
    ( $t:ty, $tu:ty ) => {
        impl<const N: usize> From<$t> for ArrayKey<N> {
            fn from(val: $t) -> Self {
                // Flipping the sign bit maps the signed range onto the
                // unsigned range while preserving order.
                let v = val as $tu;
                let sign_bit = 1 << (<$tu>::BITS - 1);
                Self::new_from_slice((v ^ sign_bit).to_be_bytes().as_ref())
            }
        }
        impl<const N: usize> From<&$t> for ArrayKey<N> {
            fn from(val: &$t) -> Self {
                (*val).into()
            }
        }
    };
}
impl_from_signed!(i8, u8);
impl_from_signed!(i16, u16);
impl_from_signed!(i32, u32);
impl_from_signed!(i64, u64);
impl_from_signed!(i128, u128);
impl_from_signed!(isize, usize);
