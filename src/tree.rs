use std::ops::ControlFlow;

use crate::iter::Iter;
use crate::keys::KeyTrait;
use crate::node::{InnerNode, Leaf, Node};
use crate::partials::Partial;

/// An ordered map from byte-string keys to values, backed by an adaptive
/// radix tree.
///
/// Inner nodes pick one of four physical layouts (4, 16, 48 or 256 children)
/// based on occupancy, growing and shrinking as entries come and go. Paths
/// with no branches are compressed into a single node, and subtrees with a
/// single entry are represented by just a leaf, so tree height tracks the
/// branching structure of the key set rather than key length.
///
/// Iteration yields entries in ascending lexicographic order of their key
/// bytes. Keys that are proper prefixes of other keys are fully supported;
/// a key ending at an inner node is held in that node's terminal slot and
/// sorts before everything below it.
pub struct AdaptiveRadixTree<K: KeyTrait, V> {
    root: Option<Node<K, V>>,
    size: usize,
}

impl<K: KeyTrait, V> Default for AdaptiveRadixTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: KeyTrait, V> AdaptiveRadixTree<K, V> {
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// Number of entries in the tree.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get<Q>(&self, key: Q) -> Option<&V>
    where
        Q: Into<K>,
    {
        self.get_k(&key.into())
    }

    pub fn get_k(&self, key: &K) -> Option<&V> {
        let mut cur = self.root.as_ref()?;
        let mut depth = 0;
        loop {
            match cur {
                Node::Leaf(leaf) => {
                    return (leaf.key == *key).then_some(&leaf.value);
                }
                Node::Inner(inner) => {
                    let lcp = inner.prefix.prefix_length_key(key, depth);
                    if lcp != inner.prefix.len() {
                        return None;
                    }
                    depth += lcp;
                    if key.length_at(0) == depth {
                        return inner.terminal.as_ref().map(|l| &l.value);
                    }
                    cur = inner.seek_child(key.at(depth))?;
                    depth += 1;
                }
            }
        }
    }

    pub fn get_mut<Q>(&mut self, key: Q) -> Option<&mut V>
    where
        Q: Into<K>,
    {
        self.get_mut_k(&key.into())
    }

    pub fn get_mut_k(&mut self, key: &K) -> Option<&mut V> {
        let mut cur = self.root.as_mut()?;
        let mut depth = 0;
        loop {
            match cur {
                Node::Leaf(leaf) => {
                    return (leaf.key == *key).then_some(&mut leaf.value);
                }
                Node::Inner(inner) => {
                    let lcp = inner.prefix.prefix_length_key(key, depth);
                    if lcp != inner.prefix.len() {
                        return None;
                    }
                    depth += lcp;
                    if key.length_at(0) == depth {
                        return inner.terminal.as_mut().map(|l| &mut l.value);
                    }
                    cur = inner.seek_child_mut(key.at(depth))?;
                    depth += 1;
                }
            }
        }
    }

    /// Insert `value` under `key`, returning the previous value if the key
    /// was already present.
    pub fn insert<Q>(&mut self, key: Q, value: V) -> Option<V>
    where
        Q: Into<K>,
    {
        self.insert_k(&key.into(), value)
    }

    pub fn insert_k(&mut self, key: &K, value: V) -> Option<V> {
        let Some(root) = self.root.as_mut() else {
            self.root = Some(Node::Leaf(Leaf::new(key.clone(), value)));
            self.size = 1;
            return None;
        };
        let old = Self::insert_recurse(root, key, value, 0);
        if old.is_none() {
            self.size += 1;
        }
        old
    }

    fn insert_recurse(node: &mut Node<K, V>, key: &K, value: V, depth: usize) -> Option<V> {
        match node {
            Node::Leaf(leaf) => {
                if leaf.key == *key {
                    return Some(std::mem::replace(&mut leaf.value, value));
                }
                // Split: replace the leaf with an inner node compressing the
                // bytes the two keys still share, then hang both under it.
                let lcp = leaf.key.as_ref()[depth..]
                    .iter()
                    .zip(&key.as_ref()[depth..])
                    .take_while(|(a, b)| a == b)
                    .count();
                let prefix = key.to_partial(depth).partial_before(lcp);
                let at = depth + lcp;

                let old = std::mem::replace(node, Node::Inner(Box::new(InnerNode::new(prefix))));
                let Node::Inner(inner) = node else {
                    unreachable!()
                };
                let Node::Leaf(old_leaf) = old else {
                    unreachable!()
                };
                Self::attach_leaf(inner, old_leaf, at);
                Self::attach_leaf(inner, Leaf::new(key.clone(), value), at);
                None
            }
            Node::Inner(inner) => {
                let lcp = inner.prefix.prefix_length_key(key, depth);
                if lcp < inner.prefix.len() {
                    // Key diverges inside the compressed path. Split the
                    // path: a new parent keeps the shared head, this node
                    // keeps the tail past the discriminating byte.
                    let parent_prefix = inner.prefix.partial_before(lcp);
                    let edge = inner.prefix.at(lcp);
                    inner.prefix = inner.prefix.partial_after(lcp + 1);
                    let at = depth + lcp;

                    let old = std::mem::replace(
                        node,
                        Node::Inner(Box::new(InnerNode::new(parent_prefix))),
                    );
                    let Node::Inner(parent) = node else {
                        unreachable!()
                    };
                    parent.add_child(edge, old);
                    Self::attach_leaf(parent, Leaf::new(key.clone(), value), at);
                    return None;
                }
                let at = depth + lcp;
                if key.length_at(0) == at {
                    // Key ends exactly at this node.
                    return match &mut inner.terminal {
                        Some(leaf) => Some(std::mem::replace(&mut leaf.value, value)),
                        slot @ None => {
                            *slot = Some(Leaf::new(key.clone(), value));
                            None
                        }
                    };
                }
                let byte = key.at(at);
                match inner.seek_child_mut(byte) {
                    Some(child) => Self::insert_recurse(child, key, value, at + 1),
                    None => {
                        inner.add_child(byte, Node::Leaf(Leaf::new(key.clone(), value)));
                        None
                    }
                }
            }
        }
    }

    fn attach_leaf(inner: &mut InnerNode<K, V>, leaf: Leaf<K, V>, at: usize) {
        if leaf.key.length_at(0) == at {
            debug_assert!(inner.terminal.is_none());
            inner.terminal = Some(leaf);
        } else {
            let byte = leaf.key.at(at);
            inner.add_child(byte, Node::Leaf(leaf));
        }
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: Q) -> Option<V>
    where
        Q: Into<K>,
    {
        self.remove_k(&key.into())
    }

    pub fn remove_k(&mut self, key: &K) -> Option<V> {
        let root = self.root.as_mut()?;
        if let Node::Leaf(leaf) = root {
            if leaf.key != *key {
                return None;
            }
            let Some(Node::Leaf(leaf)) = self.root.take() else {
                unreachable!()
            };
            self.size -= 1;
            return Some(leaf.value);
        }
        let value = Self::remove_recurse(root, key, 0)?;
        self.size -= 1;
        root.collapse();
        Some(value)
    }

    fn remove_recurse(node: &mut Node<K, V>, key: &K, depth: usize) -> Option<V> {
        let Node::Inner(inner) = node else {
            return None;
        };
        let lcp = inner.prefix.prefix_length_key(key, depth);
        if lcp != inner.prefix.len() {
            return None;
        }
        let at = depth + lcp;
        if key.length_at(0) == at {
            let leaf = inner.terminal.take()?;
            return Some(leaf.value);
        }
        let byte = key.at(at);
        let child = inner.seek_child_mut(byte)?;
        match child {
            Node::Leaf(leaf) => {
                if leaf.key != *key {
                    return None;
                }
                let Some(Node::Leaf(leaf)) = inner.delete_child(byte) else {
                    unreachable!()
                };
                Some(leaf.value)
            }
            Node::Inner(_) => {
                let value = Self::remove_recurse(child, key, at + 1)?;
                // The child may have dropped to a single entry.
                child.collapse();
                Some(value)
            }
        }
    }

    /// The entry with the smallest key.
    pub fn minimum(&self) -> Option<(&K, &V)> {
        let mut cur = self.root.as_ref()?;
        loop {
            match cur {
                Node::Leaf(leaf) => return Some((&leaf.key, &leaf.value)),
                Node::Inner(inner) => {
                    // A key ending here precedes every key continuing below.
                    if let Some(t) = &inner.terminal {
                        return Some((&t.key, &t.value));
                    }
                    cur = inner.first_child()?;
                }
            }
        }
    }

    /// The entry with the largest key.
    pub fn maximum(&self) -> Option<(&K, &V)> {
        let mut cur = self.root.as_ref()?;
        loop {
            match cur {
                Node::Leaf(leaf) => return Some((&leaf.key, &leaf.value)),
                Node::Inner(inner) => match inner.last_child() {
                    Some(child) => cur = child,
                    None => {
                        let t = inner.terminal.as_ref()?;
                        return Some((&t.key, &t.value));
                    }
                },
            }
        }
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_ref())
    }

    /// Entries whose keys start with `prefix`, in ascending key order.
    ///
    /// Resolves the subtree below `prefix` once and iterates only it, rather
    /// than filtering a full-tree walk.
    pub fn prefix_iter(&self, prefix: &[u8]) -> Iter<'_, K, V> {
        Iter::new(self.locate_subtree(prefix))
    }

    fn locate_subtree(&self, prefix: &[u8]) -> Option<&Node<K, V>> {
        let mut cur = self.root.as_ref()?;
        let mut pos = 0;
        loop {
            if pos == prefix.len() {
                return Some(cur);
            }
            match cur {
                Node::Leaf(leaf) => {
                    return leaf.key.as_ref().starts_with(prefix).then_some(cur);
                }
                Node::Inner(inner) => {
                    let remaining = &prefix[pos..];
                    let common = inner.prefix.prefix_length_slice(remaining);
                    if common == remaining.len() {
                        // Prefix ends inside this node's compressed path;
                        // every key below matches it.
                        return Some(cur);
                    }
                    if common < inner.prefix.len() {
                        return None;
                    }
                    pos += common;
                    cur = inner.seek_child(prefix[pos])?;
                    pos += 1;
                }
            }
        }
    }

    /// Walk all entries in ascending key order, stopping early if `f`
    /// breaks. Returns `Continue` if the walk covered every entry.
    pub fn visit<B, F>(&self, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&K, &V) -> ControlFlow<B>,
    {
        match &self.root {
            Some(node) => Self::visit_node(node, f),
            None => ControlFlow::Continue(()),
        }
    }

    fn visit_node<B, F>(node: &Node<K, V>, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&K, &V) -> ControlFlow<B>,
    {
        match node {
            Node::Leaf(leaf) => f(&leaf.key, &leaf.value),
            Node::Inner(inner) => {
                if let Some(t) = &inner.terminal {
                    match f(&t.key, &t.value) {
                        ControlFlow::Continue(()) => {}
                        stop @ ControlFlow::Break(_) => return stop,
                    }
                }
                for (_, child) in inner.iter() {
                    match Self::visit_node(child, f) {
                        ControlFlow::Continue(()) => {}
                        stop @ ControlFlow::Break(_) => return stop,
                    }
                }
                ControlFlow::Continue(())
            }
        }
    }
}

impl<'a, K: KeyTrait, V> IntoIterator for &'a AdaptiveRadixTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
