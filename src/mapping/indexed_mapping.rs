use std::mem::MaybeUninit;

use crate::mapping::direct_mapping::DirectMapping;
use crate::mapping::keyed_mapping::KeyedMapping;
use crate::mapping::NodeMapping;
use crate::utils::slot_array::SlotArray;

const SLOT_EMPTY: u8 = 255;

/// Maps key bytes to children through a 256-entry byte-to-slot index and a
/// compact slot array. Lookup is two array reads; in-order iteration walks
/// the index, which is naturally byte-ordered. Used at width 48.
pub(crate) struct IndexedMapping<N, const WIDTH: usize, const WORDS: usize> {
    slot_of: Box<[u8; 256]>,
    children: SlotArray<N, WIDTH, WORDS>,
    num_children: u8,
}

impl<N, const WIDTH: usize, const WORDS: usize> IndexedMapping<N, WIDTH, WORDS> {
    pub fn new() -> Self {
        debug_assert!(WIDTH < SLOT_EMPTY as usize);
        Self {
            slot_of: Box::new([SLOT_EMPTY; 256]),
            children: SlotArray::new(),
            num_children: 0,
        }
    }

    /// Drain a keyed mapping into this layout (growth 16 -> 48).
    pub fn from_keyed<const KM_WIDTH: usize>(km: &mut KeyedMapping<N, KM_WIDTH>) -> Self {
        let mut im = Self::new();
        for i in 0..km.num_children as usize {
            let stolen = std::mem::replace(&mut km.children[i], MaybeUninit::uninit());
            im.add_child(km.keys[i], unsafe { stolen.assume_init() });
        }
        km.num_children = 0;
        im
    }

    /// Drain a direct mapping into this layout (shrink 256 -> 48).
    pub fn from_direct(dm: &mut DirectMapping<N>) -> Self {
        let mut im = Self::new();
        dm.drain_into(|key, node| im.add_child(key, node));
        im
    }

    /// Remove every entry in ascending key-byte order, feeding each to `f`.
    pub fn drain_into(&mut self, mut f: impl FnMut(u8, N)) {
        for key in 0..=255u8 {
            let slot = self.slot_of[key as usize];
            if slot == SLOT_EMPTY {
                continue;
            }
            self.slot_of[key as usize] = SLOT_EMPTY;
            if let Some(node) = self.children.erase(slot as usize) {
                f(key, node);
            }
        }
        self.num_children = 0;
    }

    /// Entries in ascending key-byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        (0..=255u8).filter_map(move |key| {
            let slot = self.slot_of[key as usize];
            if slot == SLOT_EMPTY {
                return None;
            }
            self.children.get(slot as usize).map(|n| (key, n))
        })
    }

    pub fn first(&self) -> Option<&N> {
        self.iter().next().map(|(_, n)| n)
    }

    pub fn last(&self) -> Option<&N> {
        (0..=255u8).rev().find_map(|key| {
            let slot = self.slot_of[key as usize];
            if slot == SLOT_EMPTY {
                return None;
            }
            self.children.get(slot as usize)
        })
    }
}

impl<N, const WIDTH: usize, const WORDS: usize> Default for IndexedMapping<N, WIDTH, WORDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const WIDTH: usize, const WORDS: usize> NodeMapping<N, WIDTH>
    for IndexedMapping<N, WIDTH, WORDS>
{
    fn add_child(&mut self, key: u8, node: N) {
        debug_assert!(self.slot_of[key as usize] == SLOT_EMPTY);
        let pos = self
            .children
            .first_free_pos()
            .expect("add_child on full mapping");
        self.slot_of[key as usize] = pos as u8;
        self.children.set(pos, node);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let slot = self.slot_of[key as usize];
        if slot == SLOT_EMPTY {
            return None;
        }
        self.children.get(slot as usize)
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let slot = self.slot_of[key as usize];
        if slot == SLOT_EMPTY {
            return None;
        }
        self.children.get_mut(slot as usize)
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        let slot = self.slot_of[key as usize];
        if slot == SLOT_EMPTY {
            return None;
        }
        self.slot_of[key as usize] = SLOT_EMPTY;
        let old = self.children.erase(slot as usize);
        if old.is_some() {
            self.num_children -= 1;
        }
        old
    }

    #[inline(always)]
    fn num_children(&self) -> usize {
        self.num_children as usize
    }
}

#[cfg(test)]
mod tests {
    use crate::mapping::indexed_mapping::IndexedMapping;
    use crate::mapping::NodeMapping;

    #[test]
    fn add_seek_delete() {
        let mut mapping = IndexedMapping::<u8, 48, 1>::new();
        for i in 0..48 {
            mapping.add_child(i, i);
        }
        for i in 0..48 {
            assert_eq!(mapping.seek_child(i), Some(&i));
        }
        for i in 0..48 {
            assert_eq!(mapping.delete_child(i), Some(i));
            assert_eq!(mapping.seek_child(i), None);
        }
        assert_eq!(mapping.num_children(), 0);
    }

    #[test]
    fn iter_is_byte_ordered() {
        let mut mapping = IndexedMapping::<u32, 48, 1>::new();
        for key in [250u8, 0, 128, 17] {
            mapping.add_child(key, key as u32);
        }
        let keys: Vec<u8> = mapping.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![0, 17, 128, 250]);
        assert_eq!(mapping.first(), Some(&0));
        assert_eq!(mapping.last(), Some(&250));
    }

    #[test]
    fn slot_reuse_after_delete() {
        let mut mapping = IndexedMapping::<u8, 48, 1>::new();
        for i in 0..48 {
            mapping.add_child(i, i);
        }
        assert_eq!(mapping.delete_child(20), Some(20));
        mapping.add_child(200, 99);
        assert_eq!(mapping.seek_child(200), Some(&99));
        assert_eq!(mapping.num_children(), 48);
    }
}
