use crate::keys::KeyTrait;
use crate::node::Node;

/// In-order iterator over a tree (or subtree), yielding key/value pairs in
/// ascending byte order of the keys.
///
/// Maintains an explicit stack of child iterators rather than recursing. A
/// node's terminal leaf is yielded before any of its byte-indexed children,
/// which is exactly lexicographic order: a key ending at a node is a proper
/// prefix of every key continuing below it.
pub struct Iter<'a, K: KeyTrait, V> {
    stack: Vec<Box<dyn Iterator<Item = &'a Node<K, V>> + 'a>>,
}

impl<'a, K: KeyTrait, V> Iter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>) -> Self {
        match root {
            Some(node) => Self {
                stack: vec![Box::new(std::iter::once(node))],
            },
            None => Self { stack: vec![] },
        }
    }
}

impl<'a, K: KeyTrait, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some(node) = frame.next() else {
                self.stack.pop();
                continue;
            };
            match node {
                Node::Leaf(leaf) => return Some((&leaf.key, &leaf.value)),
                Node::Inner(inner) => {
                    self.stack.push(Box::new(inner.iter().map(|(_, n)| n)));
                    if let Some(terminal) = &inner.terminal {
                        return Some((&terminal.key, &terminal.value));
                    }
                }
            }
        }
    }
}
