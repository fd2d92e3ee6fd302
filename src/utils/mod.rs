pub(crate) mod bitset;
pub(crate) mod slot_array;
