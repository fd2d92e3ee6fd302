pub(crate) mod direct_mapping;
pub(crate) mod indexed_mapping;
pub(crate) mod keyed_mapping;

/// Common capability set of the per-variant child indexing strategies.
///
/// Implementations must keep children logically ordered by key byte: `iter`,
/// `first` and `last` observe ascending byte order regardless of the
/// physical layout.
pub(crate) trait NodeMapping<N, const NUM_CHILDREN: usize> {
    fn add_child(&mut self, key: u8, node: N);
    fn seek_child(&self, key: u8) -> Option<&N>;
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N>;
    fn delete_child(&mut self, key: u8) -> Option<N>;
    fn num_children(&self) -> usize;
    fn width(&self) -> usize {
        NUM_CHILDREN
    }
}
