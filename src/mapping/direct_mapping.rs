use crate::mapping::indexed_mapping::IndexedMapping;
use crate::mapping::NodeMapping;
use crate::utils::slot_array::SlotArray;

/// Maps key bytes straight into a 256-slot child array. Lookup is a single
/// indexed read; slot order is byte order, so iteration is a plain scan.
pub(crate) struct DirectMapping<N> {
    children: SlotArray<N, 256, 4>,
    num_children: u16,
}

impl<N> DirectMapping<N> {
    pub fn new() -> Self {
        Self {
            children: SlotArray::new(),
            num_children: 0,
        }
    }

    /// Drain an indexed mapping into this layout (growth 48 -> 256).
    pub fn from_indexed<const WIDTH: usize, const WORDS: usize>(
        im: &mut IndexedMapping<N, WIDTH, WORDS>,
    ) -> Self {
        let mut dm = Self::new();
        im.drain_into(|key, node| dm.add_child(key, node));
        dm
    }

    /// Remove every entry in ascending key-byte order, feeding each to `f`.
    pub fn drain_into(&mut self, mut f: impl FnMut(u8, N)) {
        for key in 0..=255u8 {
            if let Some(node) = self.children.erase(key as usize) {
                f(key, node);
            }
        }
        self.num_children = 0;
    }

    /// Entries in ascending key-byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        self.children.iter().map(|(key, node)| (key as u8, node))
    }

    pub fn first(&self) -> Option<&N> {
        self.children
            .first_used_pos()
            .and_then(|pos| self.children.get(pos))
    }

    pub fn last(&self) -> Option<&N> {
        self.children
            .last_used_pos()
            .and_then(|pos| self.children.get(pos))
    }
}

impl<N> Default for DirectMapping<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> NodeMapping<N, 256> for DirectMapping<N> {
    #[inline]
    fn add_child(&mut self, key: u8, node: N) {
        self.children.set(key as usize, node);
        self.num_children += 1;
    }

    #[inline]
    fn seek_child(&self, key: u8) -> Option<&N> {
        self.children.get(key as usize)
    }

    #[inline]
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        self.children.get_mut(key as usize)
    }

    #[inline]
    fn delete_child(&mut self, key: u8) -> Option<N> {
        let old = self.children.erase(key as usize);
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
    use crate::mapping::direct_mapping::DirectMapping;
    use crate::mapping::NodeMapping;

    #[test]
    fn full_range_add_seek_delete() {
        let mut dm = DirectMapping::new();
        for i in 0..=255u8 {
            dm.add_child(i, i);
        }
        assert_eq!(dm.num_children(), 256);
        for i in 0..=255u8 {
            assert_eq!(dm.seek_child(i), Some(&i));
        }
        assert_eq!(dm.delete_child(7), Some(7));
        assert_eq!(dm.seek_child(7), None);
        assert_eq!(dm.num_children(), 255);
    }

    #[test]
    fn first_last_and_order() {
        let mut dm = DirectMapping::new();
        for key in [99u8, 1, 255] {
            dm.add_child(key, key as u64);
        }
        assert_eq!(dm.first(), Some(&1));
        assert_eq!(dm.last(), Some(&255));
        let keys: Vec<u8> = dm.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![1, 99, 255]);
    }
}
