pub mod graph;
pub mod hypergraph;
pub mod transition;

/// Token position within a sentence, with the root at index `0`.
pub type Index = u32;

/// A directed dependency arc `(head, modifier)`.
pub type Arc = (Index, Index);
