use std::mem::MaybeUninit;

use crate::utils::bitset::Bitset64;

/// Fixed-capacity slot storage with a bitset tracking which slots are live.
///
/// `WORDS` must be `CAP / 64`, rounded up. Slots hold `MaybeUninit<X>`; the
/// bitset is the single source of truth for which slots are initialized.
pub(crate) struct SlotArray<X, const CAP: usize, const WORDS: usize> {
    occupied: Bitset64<WORDS>,
    slots: Box<[MaybeUninit<X>; CAP]>,
}

impl<X, const CAP: usize, const WORDS: usize> SlotArray<X, CAP, WORDS> {
    pub fn new() -> Self {
        debug_assert!(WORDS * 64 >= CAP);
        Self {
            occupied: Bitset64::new(),
            slots: Box::new([const { MaybeUninit::uninit() }; CAP]),
        }
    }

    #[inline]
    pub fn first_free_pos(&self) -> Option<usize> {
        self.occupied.first_empty().filter(|pos| *pos < CAP)
    }

    #[inline]
    pub fn first_used_pos(&self) -> Option<usize> {
        self.occupied.first_set()
    }

    #[inline]
    pub fn last_used_pos(&self) -> Option<usize> {
        self.occupied.last_set()
    }

    #[inline]
    pub fn get(&self, pos: usize) -> Option<&X> {
        debug_assert!(pos < CAP);
        if self.occupied.check(pos) {
            Some(unsafe { self.slots[pos].assume_init_ref() })
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut X> {
        debug_assert!(pos < CAP);
        if self.occupied.check(pos) {
            Some(unsafe { self.slots[pos].assume_init_mut() })
        } else {
            None
        }
    }

    /// Write `x` into `pos`. The slot must be free.
    #[inline]
    pub fn set(&mut self, pos: usize, x: X) {
        debug_assert!(pos < CAP);
        debug_assert!(!self.occupied.check(pos));
        self.slots[pos].write(x);
        self.occupied.set(pos);
    }

    #[inline]
    pub fn erase(&mut self, pos: usize) -> Option<X> {
        debug_assert!(pos < CAP);
        if !self.occupied.check(pos) {
            return None;
        }
        self.occupied.unset(pos);
        let old = std::mem::replace(&mut self.slots[pos], MaybeUninit::uninit());
        Some(unsafe { old.assume_init() })
    }

    /// Live entries as `(position, &value)` in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &X)> {
        self.occupied
            .iter()
            .map(|pos| (pos, unsafe { self.slots[pos].assume_init_ref() }))
    }
}

impl<X, const CAP: usize, const WORDS: usize> Default for SlotArray<X, CAP, WORDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X, const CAP: usize, const WORDS: usize> Drop for SlotArray<X, CAP, WORDS> {
    fn drop(&mut self) {
        for pos in 0..CAP {
            if self.occupied.check(pos) {
                unsafe { self.slots[pos].assume_init_drop() }
            }
        }
        self.occupied.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::SlotArray;

    #[test]
    fn set_get_erase() {
        let mut arr: SlotArray<String, 48, 1> = SlotArray::new();
        assert_eq!(arr.first_free_pos(), Some(0));
        assert_eq!(arr.first_used_pos(), None);

        arr.set(3, "three".to_string());
        arr.set(40, "forty".to_string());
        assert_eq!(arr.get(3).map(String::as_str), Some("three"));
        assert_eq!(arr.get(4), None);
        assert_eq!(arr.first_used_pos(), Some(3));
        assert_eq!(arr.last_used_pos(), Some(40));

        assert_eq!(arr.erase(3), Some("three".to_string()));
        assert_eq!(arr.erase(3), None);
        assert_eq!(arr.first_used_pos(), Some(40));
    }

    #[test]
    fn iter_is_position_ordered() {
        let mut arr: SlotArray<u32, 256, 4> = SlotArray::new();
        for pos in [200usize, 7, 64, 0] {
            arr.set(pos, pos as u32);
        }
        let got: Vec<usize> = arr.iter().map(|(pos, _)| pos).collect();
        assert_eq!(got, vec![0, 7, 64, 200]);
    }

    #[test]
    fn drop_releases_only_live_slots() {
        use std::rc::Rc;
        let marker = Rc::new(());
        {
            let mut arr: SlotArray<Rc<()>, 48, 1> = SlotArray::new();
            arr.set(1, marker.clone());
            arr.set(2, marker.clone());
            arr.erase(1);
            assert_eq!(Rc::strong_count(&marker), 2);
        }
        assert_eq!(Rc::strong_count(&marker), 1);
    }
}
