//! An adaptive radix tree: an ordered map from byte-string keys to values.
//!
//! Inner nodes adapt their physical layout to their occupancy, switching
//! between four representations (4, 16, 48 and 256 children) as entries are
//! inserted and removed. Single-branch paths are compressed into one node
//! and single-entry subtrees are stored as bare leaves, so lookups touch a
//! number of nodes proportional to the branching of the key set, not to key
//! length.
//!
//! Keys are any type implementing [`KeyTrait`]; two implementations are
//! provided. [`ArrayKey`] stores up to `N` bytes inline and rejects longer
//! keys with [`ArtError::KeyTooLong`]. [`VectorKey`] is heap-allocated and
//! unbounded. Integer conversions encode big-endian with the sign bit
//! flipped for signed types, so numeric order matches the tree's
//! byte-lexicographic iteration order.
//!
//! ```
//! use artree::{AdaptiveRadixTree, ArrayKey};
//!
//! let mut tree = AdaptiveRadixTree::<ArrayKey<16>, u32>::new();
//! tree.insert("apple", 1);
//! tree.insert("app", 2);
//! tree.insert("banana", 3);
//!
//! assert_eq!(tree.get("app"), Some(&2));
//! let keys: Vec<&[u8]> = tree.iter().map(|(k, _)| k.as_ref()).collect();
//! assert_eq!(keys, vec![b"app".as_slice(), b"apple".as_slice(), b"banana".as_slice()]);
//! ```

pub mod errors;
pub mod iter;
pub mod keys;
pub mod partials;
pub mod tree;

mod mapping;
mod node;
mod utils;

pub use errors::ArtError;
pub use iter::Iter;
pub use keys::array_key::ArrayKey;
pub use keys::vector_key::VectorKey;
pub use keys::KeyTrait;
pub use partials::array_partial::ArrPartial;
pub use partials::vector_partial::VectorPartial;
pub use partials::Partial;
pub use tree::AdaptiveRadixTree;
