use num_traits::PrimInt;

/// Fixed-width occupancy bitset over an array of primitive words.
///
/// `BITS` is the bit width of `S`, `SHIFT` is log2 of that width. The three
/// parameters are redundant but must be spelled out until
/// `generic_const_exprs` stabilizes.
pub(crate) struct Bitset<S, const BITS: usize, const SHIFT: usize, const WORDS: usize>
where
    S: PrimInt,
{
    words: [S; WORDS],
}

pub(crate) type Bitset64<const WORDS: usize> = Bitset<u64, 64, 6, WORDS>;

impl<S, const BITS: usize, const SHIFT: usize, const WORDS: usize> Bitset<S, BITS, SHIFT, WORDS>
where
    S: PrimInt,
{
    pub fn new() -> Self {
        Self {
            words: [S::zero(); WORDS],
        }
    }

    #[inline]
    pub fn set(&mut self, pos: usize) {
        debug_assert!(pos < WORDS * BITS);
        let bit = S::one() << (pos % BITS);
        self.words[pos >> SHIFT] = self.words[pos >> SHIFT] | bit;
    }

    #[inline]
    pub fn unset(&mut self, pos: usize) {
        debug_assert!(pos < WORDS * BITS);
        let bit = S::one() << (pos % BITS);
        self.words[pos >> SHIFT] = self.words[pos >> SHIFT] & !bit;
    }

    #[inline]
    pub fn check(&self, pos: usize) -> bool {
        debug_assert!(pos < WORDS * BITS);
        let bit = S::one() << (pos % BITS);
        !(self.words[pos >> SHIFT] & bit).is_zero()
    }

    pub fn clear(&mut self) {
        self.words = [S::zero(); WORDS];
    }

    /// Position of the lowest clear bit, if any.
    pub fn first_empty(&self) -> Option<usize> {
        for (i, w) in self.words.iter().enumerate() {
            if *w != S::max_value() {
                return Some((i << SHIFT) + w.trailing_ones() as usize);
            }
        }
        None
    }

    /// Position of the lowest set bit, if any.
    pub fn first_set(&self) -> Option<usize> {
        for (i, w) in self.words.iter().enumerate() {
            if !w.is_zero() {
                return Some((i << SHIFT) + w.trailing_zeros() as usize);
            }
        }
        None
    }

    /// Position of the highest set bit, if any.
    pub fn last_set(&self) -> Option<usize> {
        for (i, w) in self.words.iter().enumerate().rev() {
            if !w.is_zero() {
                return Some((i << SHIFT) + (BITS - 1) - w.leading_zeros() as usize);
            }
        }
        None
    }

    /// Set positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, w)| {
            (0..BITS).filter_map(move |j| {
                if (*w >> j) & S::one() == S::one() {
                    Some((i << SHIFT) + j)
                } else {
                    None
                }
            })
        })
    }
}

impl<S, const BITS: usize, const SHIFT: usize, const WORDS: usize> Default
    for Bitset<S, BITS, SHIFT, WORDS>
where
    S: PrimInt,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Bitset64;

    #[test]
    fn set_check_unset() {
        let mut bs = Bitset64::<4>::new();
        bs.set(0);
        bs.set(63);
        bs.set(64);
        bs.set(255);
        assert!(bs.check(0));
        assert!(bs.check(63));
        assert!(bs.check(64));
        assert!(bs.check(255));
        assert!(!bs.check(1));
        bs.unset(63);
        assert!(!bs.check(63));
    }

    #[test]
    fn first_and_last() {
        let mut bs = Bitset64::<1>::new();
        assert_eq!(bs.first_set(), None);
        assert_eq!(bs.last_set(), None);
        assert_eq!(bs.first_empty(), Some(0));
        bs.set(0);
        bs.set(5);
        bs.set(47);
        assert_eq!(bs.first_set(), Some(0));
        assert_eq!(bs.last_set(), Some(47));
        assert_eq!(bs.first_empty(), Some(1));
    }

    #[test]
    fn ascending_iter() {
        let mut bs = Bitset64::<4>::new();
        for pos in [3, 64, 65, 200, 255] {
            bs.set(pos);
        }
        let got: Vec<usize> = bs.iter().collect();
        assert_eq!(got, vec![3, 64, 65, 200, 255]);
    }

    #[test]
    fn full_word_first_empty() {
        let mut bs = Bitset64::<1>::new();
        for i in 0..64 {
            bs.set(i);
        }
        assert_eq!(bs.first_empty(), None);
        bs.unset(31);
        assert_eq!(bs.first_empty(), Some(31));
    }
}
