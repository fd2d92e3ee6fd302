use crate::keys::KeyTrait;
use crate::mapping::direct_mapping::DirectMapping;
use crate::mapping::indexed_mapping::IndexedMapping;
use crate::mapping::keyed_mapping::KeyedMapping;
use crate::mapping::NodeMapping;
use crate::partials::Partial;

/// Terminal entity: owns the complete key bytes and the caller's value.
pub(crate) struct Leaf<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Leaf<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// A tree node: either a leaf or a boxed inner node. Ownership is strictly
/// hierarchical; dropping a node releases its whole subtree.
pub(crate) enum Node<K: KeyTrait, V> {
    Leaf(Leaf<K, V>),
    Inner(Box<InnerNode<K, V>>),
}

/// Inner node: a path-compressed prefix, an optional terminal leaf for a key
/// ending exactly here, and byte-indexed children in one of four adaptive
/// representations.
///
/// Invariant: an inner node holds at least two entries (children plus
/// terminal); a node down to one entry is collapsed by [`Node::collapse`].
/// The terminal sorts before every byte-indexed child.
pub(crate) struct InnerNode<K: KeyTrait, V> {
    pub(crate) prefix: K::PartialType,
    pub(crate) terminal: Option<Leaf<K, V>>,
    pub(crate) mapping: Mapping<K, V>,
}

pub(crate) enum Mapping<K: KeyTrait, V> {
    Node4(KeyedMapping<Node<K, V>, 4>),
    Node16(KeyedMapping<Node<K, V>, 16>),
    Node48(IndexedMapping<Node<K, V>, 48, 1>),
    Node256(DirectMapping<Node<K, V>>),
}

impl<K: KeyTrait, V> InnerNode<K, V> {
    /// New inner node, starting in the smallest representation.
    pub(crate) fn new(prefix: K::PartialType) -> Self {
        Self {
            prefix,
            terminal: None,
            mapping: Mapping::Node4(KeyedMapping::new()),
        }
    }

    pub(crate) fn num_children(&self) -> usize {
        match &self.mapping {
            Mapping::Node4(m) => m.num_children(),
            Mapping::Node16(m) => m.num_children(),
            Mapping::Node48(m) => m.num_children(),
            Mapping::Node256(m) => m.num_children(),
        }
    }

    pub(crate) fn seek_child(&self, key: u8) -> Option<&Node<K, V>> {
        match &self.mapping {
            Mapping::Node4(m) => m.seek_child(key),
            Mapping::Node16(m) => m.seek_child(key),
            Mapping::Node48(m) => m.seek_child(key),
            Mapping::Node256(m) => m.seek_child(key),
        }
    }

    pub(crate) fn seek_child_mut(&mut self, key: u8) -> Option<&mut Node<K, V>> {
        match &mut self.mapping {
            Mapping::Node4(m) => m.seek_child_mut(key),
            Mapping::Node16(m) => m.seek_child_mut(key),
            Mapping::Node48(m) => m.seek_child_mut(key),
            Mapping::Node256(m) => m.seek_child_mut(key),
        }
    }

    /// Add a child, growing the representation first when at capacity.
    /// Growth never touches the prefix or any existing child.
    pub(crate) fn add_child(&mut self, key: u8, node: Node<K, V>) {
        if self.is_full() {
            self.grow();
        }
        match &mut self.mapping {
            Mapping::Node4(m) => m.add_child(key, node),
            Mapping::Node16(m) => m.add_child(key, node),
            Mapping::Node48(m) => m.add_child(key, node),
            Mapping::Node256(m) => m.add_child(key, node),
        }
    }

    /// Remove the child for `key`, shrinking the representation when the
    /// remaining children fit comfortably in the next smaller one.
    pub(crate) fn delete_child(&mut self, key: u8) -> Option<Node<K, V>> {
        let node = match &mut self.mapping {
            Mapping::Node4(m) => m.delete_child(key),
            Mapping::Node16(m) => m.delete_child(key),
            Mapping::Node48(m) => m.delete_child(key),
            Mapping::Node256(m) => m.delete_child(key),
        };
        if node.is_some() {
            self.maybe_shrink();
        }
        node
    }

    fn is_full(&self) -> bool {
        match &self.mapping {
            Mapping::Node4(m) => m.num_children() >= m.width(),
            Mapping::Node16(m) => m.num_children() >= m.width(),
            Mapping::Node48(m) => m.num_children() >= m.width(),
            Mapping::Node256(_) => false,
        }
    }

    fn grow(&mut self) {
        let grown = match &mut self.mapping {
            Mapping::Node4(m) => Mapping::Node16(KeyedMapping::from_resized(m)),
            Mapping::Node16(m) => Mapping::Node48(IndexedMapping::from_keyed(m)),
            Mapping::Node48(m) => Mapping::Node256(DirectMapping::from_indexed(m)),
            Mapping::Node256(_) => unreachable!("Node256 cannot grow"),
        };
        self.mapping = grown;
    }

    fn maybe_shrink(&mut self) {
        let shrunk = match &mut self.mapping {
            Mapping::Node4(_) => return,
            Mapping::Node16(m) if m.num_children() < 5 => {
                Mapping::Node4(KeyedMapping::from_resized(m))
            }
            Mapping::Node48(m) if m.num_children() < 17 => {
                Mapping::Node16(KeyedMapping::from_indexed(m))
            }
            Mapping::Node256(m) if m.num_children() < 49 => {
                Mapping::Node48(IndexedMapping::from_direct(m))
            }
            _ => return,
        };
        self.mapping = shrunk;
    }

    pub(crate) fn first_child(&self) -> Option<&Node<K, V>> {
        match &self.mapping {
            Mapping::Node4(m) => m.first(),
            Mapping::Node16(m) => m.first(),
            Mapping::Node48(m) => m.first(),
            Mapping::Node256(m) => m.first(),
        }
    }

    pub(crate) fn last_child(&self) -> Option<&Node<K, V>> {
        match &self.mapping {
            Mapping::Node4(m) => m.last(),
            Mapping::Node16(m) => m.last(),
            Mapping::Node48(m) => m.last(),
            Mapping::Node256(m) => m.last(),
        }
    }

    /// Children in ascending key-byte order.
    pub(crate) fn iter(&self) -> Box<dyn Iterator<Item = (u8, &Node<K, V>)> + '_> {
        match &self.mapping {
            Mapping::Node4(m) => Box::new(m.iter()),
            Mapping::Node16(m) => Box::new(m.iter()),
            Mapping::Node48(m) => Box::new(m.iter()),
            Mapping::Node256(m) => Box::new(m.iter()),
        }
    }

    fn take_sole_child(&mut self) -> (u8, Node<K, V>) {
        match &mut self.mapping {
            Mapping::Node4(m) => m.take_sole_entry(),
            // Shrinking guarantees a single child only ever remains in a Node4.
            _ => unreachable!("sole child outside Node4"),
        }
    }
}

impl<K: KeyTrait, V> Node<K, V> {
    /// Re-establish path compression after this inner node lost an entry.
    ///
    /// With only the terminal left the node reverts to a plain leaf. With
    /// only one byte-indexed child left, that child replaces the node; an
    /// inner child absorbs the node's prefix plus the edge byte into its own
    /// (a leaf child already carries its full key and needs no rewrite).
    pub(crate) fn collapse(&mut self) {
        let Node::Inner(inner) = self else { return };

        if inner.num_children() == 0 {
            if let Some(leaf) = inner.terminal.take() {
                *self = Node::Leaf(leaf);
            }
            return;
        }
        if inner.num_children() == 1 && inner.terminal.is_none() {
            let (edge, child) = inner.take_sole_child();
            match child {
                Node::Leaf(leaf) => *self = Node::Leaf(leaf),
                Node::Inner(mut child_inner) => {
                    child_inner.prefix = inner.prefix.join(edge, &child_inner.prefix);
                    *self = Node::Inner(child_inner);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::keys::array_key::ArrayKey;
    use crate::node::{InnerNode, Leaf, Mapping, Node};
    use crate::partials::array_partial::ArrPartial;
    use crate::partials::Partial;

    type TestNode = Node<ArrayKey<16>, u32>;

    fn leaf(byte: u8, value: u32) -> TestNode {
        Node::Leaf(Leaf::new(ArrayKey::try_from_slice(&[byte]).unwrap(), value))
    }

    fn leaf_value(node: &TestNode) -> u32 {
        match node {
            Node::Leaf(l) => l.value,
            Node::Inner(_) => panic!("expected leaf"),
        }
    }

    #[test]
    fn grows_through_all_variants() {
        let mut inner = InnerNode::<ArrayKey<16>, u32>::new(ArrPartial::empty());
        for i in 0..=255u8 {
            inner.add_child(i, leaf(i, i as u32));
            let expected = match inner.num_children() {
                n if n <= 4 => matches!(inner.mapping, Mapping::Node4(_)),
                n if n <= 16 => matches!(inner.mapping, Mapping::Node16(_)),
                n if n <= 48 => matches!(inner.mapping, Mapping::Node48(_)),
                _ => matches!(inner.mapping, Mapping::Node256(_)),
            };
            assert!(expected, "wrong variant at {} children", inner.num_children());
        }
        for i in 0..=255u8 {
            assert_eq!(leaf_value(inner.seek_child(i).unwrap()), i as u32);
        }
    }

    #[test]
    fn shrinks_back_down() {
        let mut inner = InnerNode::<ArrayKey<16>, u32>::new(ArrPartial::empty());
        for i in 0..=255u8 {
            inner.add_child(i, leaf(i, i as u32));
        }
        for i in (2..=255u8).rev() {
            assert!(inner.delete_child(i).is_some());
        }
        assert!(matches!(inner.mapping, Mapping::Node4(_)));
        assert_eq!(inner.num_children(), 2);
        assert_eq!(leaf_value(inner.seek_child(0).unwrap()), 0);
        assert_eq!(leaf_value(inner.seek_child(1).unwrap()), 1);
    }

    #[test]
    fn child_iteration_is_byte_ordered_across_variants() {
        let mut inner = InnerNode::<ArrayKey<16>, u32>::new(ArrPartial::empty());
        let mut bytes: Vec<u8> = (0..60).map(|i| (i * 4) as u8).collect();
        bytes.reverse();
        for b in &bytes {
            inner.add_child(*b, leaf(*b, *b as u32));
        }
        let seen: Vec<u8> = inner.iter().map(|(k, _)| k).collect();
        let mut sorted = bytes.clone();
        sorted.sort_unstable();
        assert_eq!(seen, sorted);
        assert_eq!(leaf_value(inner.first_child().unwrap()), sorted[0] as u32);
        assert_eq!(
            leaf_value(inner.last_child().unwrap()),
            *sorted.last().unwrap() as u32
        );
    }

    #[test]
    fn collapse_merges_prefixes() {
        // parent("ap") -> 'p' -> child("l") with two grandchildren.
        let mut child = InnerNode::<ArrayKey<16>, u32>::new(ArrPartial::from_slice(b"l"));
        child.add_child(b'e', leaf(b'e', 1));
        child.add_child(b'y', leaf(b'y', 2));

        let mut parent = InnerNode::<ArrayKey<16>, u32>::new(ArrPartial::from_slice(b"ap"));
        parent.add_child(b'p', Node::Inner(Box::new(child)));

        let mut node: TestNode = Node::Inner(Box::new(parent));
        node.collapse();

        let Node::Inner(merged) = &node else {
            panic!("collapse should keep an inner node")
        };
        assert_eq!(merged.prefix.to_slice(), b"appl");
        assert_eq!(merged.num_children(), 2);
    }

    #[test]
    fn collapse_to_terminal_leaf() {
        let mut inner = InnerNode::<ArrayKey<16>, u32>::new(ArrPartial::from_slice(b"a"));
        inner.terminal = Some(Leaf::new("a".into(), 7));
        let mut node: TestNode = Node::Inner(Box::new(inner));
        node.collapse();
        assert_eq!(leaf_value(&node), 7);
    }
}
