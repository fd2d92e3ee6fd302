use std::mem::MaybeUninit;

use crate::mapping::indexed_mapping::IndexedMapping;
use crate::mapping::NodeMapping;

/// Maps key bytes to children through parallel sorted arrays.
///
/// Keys are kept in ascending order and children shift with them on insert
/// and delete, so in-order child iteration is just a left-to-right scan.
/// Used at widths 4 (linear lookup) and 16 (binary search).
pub(crate) struct KeyedMapping<N, const WIDTH: usize> {
    pub(crate) keys: [u8; WIDTH],
    pub(crate) children: Box<[MaybeUninit<N>; WIDTH]>,
    pub(crate) num_children: u8,
}

impl<N, const WIDTH: usize> KeyedMapping<N, WIDTH> {
    pub fn new() -> Self {
        Self {
            keys: [255; WIDTH],
            children: Box::new([const { MaybeUninit::uninit() }; WIDTH]),
            num_children: 0,
        }
    }

    /// Move entries out of a mapping of another width (growth 4 -> 16 or
    /// shrink 16 -> 4). Order is preserved, so the result stays sorted; the
    /// live entries must fit the new width.
    pub fn from_resized<const OLD_WIDTH: usize>(old: &mut KeyedMapping<N, OLD_WIDTH>) -> Self {
        debug_assert!(old.num_children as usize <= WIDTH);
        let mut new = Self::new();
        for i in 0..old.num_children as usize {
            new.keys[i] = old.keys[i];
            new.children[i] = std::mem::replace(&mut old.children[i], MaybeUninit::uninit());
        }
        new.num_children = old.num_children;
        old.num_children = 0;
        new
    }

    /// Drain an indexed mapping into this layout (shrink 48 -> 16). The
    /// indexed iteration is byte-ascending, so sequential writes stay sorted.
    pub fn from_indexed<const IDX_WIDTH: usize, const IDX_WORDS: usize>(
        im: &mut IndexedMapping<N, IDX_WIDTH, IDX_WORDS>,
    ) -> Self {
        let mut new = Self::new();
        let mut cnt = 0;
        im.drain_into(|key, node| {
            new.keys[cnt] = key;
            new.children[cnt].write(node);
            cnt += 1;
        });
        new.num_children = cnt as u8;
        new
    }

    /// Remove and return the single remaining entry. Used when a one-child
    /// node is merged back into its parent's compressed path.
    pub fn take_sole_entry(&mut self) -> (u8, N) {
        debug_assert!(self.num_children == 1);
        let key = self.keys[0];
        let node = std::mem::replace(&mut self.children[0], MaybeUninit::uninit());
        self.num_children = 0;
        (key, unsafe { node.assume_init() })
    }

    /// Entries in ascending key-byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        (0..self.num_children as usize)
            .map(|i| (self.keys[i], unsafe { self.children[i].assume_init_ref() }))
    }

    pub fn first(&self) -> Option<&N> {
        if self.num_children == 0 {
            return None;
        }
        Some(unsafe { self.children[0].assume_init_ref() })
    }

    pub fn last(&self) -> Option<&N> {
        if self.num_children == 0 {
            return None;
        }
        Some(unsafe { self.children[self.num_children as usize - 1].assume_init_ref() })
    }

    fn position_of(&self, key: u8) -> Option<usize> {
        let n = self.num_children as usize;
        if WIDTH <= 4 {
            return (0..n).find(|&i| self.keys[i] == key);
        }
        self.keys[..n].binary_search(&key).ok()
    }
}

impl<N, const WIDTH: usize> Default for KeyedMapping<N, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const WIDTH: usize> NodeMapping<N, WIDTH> for KeyedMapping<N, WIDTH> {
    fn add_child(&mut self, key: u8, node: N) {
        let n = self.num_children as usize;
        debug_assert!(n < WIDTH, "add_child on full mapping");
        let idx = self.keys[..n].partition_point(|k| *k < key);
        for i in (idx..n).rev() {
            self.keys[i + 1] = self.keys[i];
            self.children[i + 1] = std::mem::replace(&mut self.children[i], MaybeUninit::uninit());
        }
        self.keys[idx] = key;
        self.children[idx].write(node);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let idx = self.position_of(key)?;
        Some(unsafe { self.children[idx].assume_init_ref() })
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let idx = self.position_of(key)?;
        Some(unsafe { self.children[idx].assume_init_mut() })
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        let idx = self.position_of(key)?;
        let n = self.num_children as usize;
        let node = std::mem::replace(&mut self.children[idx], MaybeUninit::uninit());

        for i in idx..n - 1 {
            self.keys[i] = self.keys[i + 1];
            self.children[i] = std::mem::replace(&mut self.children[i + 1], MaybeUninit::uninit());
        }
        self.keys[n - 1] = 255;
        self.num_children -= 1;

        Some(unsafe { node.assume_init() })
    }

    #[inline(always)]
    fn num_children(&self) -> usize {
        self.num_children as usize
    }
}

impl<N, const WIDTH: usize> Drop for KeyedMapping<N, WIDTH> {
    fn drop(&mut self) {
        for child in &mut self.children[..self.num_children as usize] {
            unsafe { child.assume_init_drop() }
        }
        self.num_children = 0;
    }
}
