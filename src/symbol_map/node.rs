//! Trie node with a fixed fan-out.
//!
//! Every node owns exactly `radix` child slots, addressed directly by the
//! alphabet index of the edge character. A slot is either empty or owns its
//! whole subtree; nothing in the trie is shared.

/// A node in the [`SymbolMap`](super::SymbolMap) trie.
#[derive(Clone)]
pub(crate) struct Node<V> {
    /// Child slots, one per alphabet index.
    pub(crate) children: Box<[Option<Box<Node<V>>>]>,
    /// Value of the key ending at this node. `Some` marks the node as a key
    /// even when `V` itself encodes "nothing".
    pub(crate) value: Option<V>,
}

impl<V> Node<V> {
    /// Create an empty node with `radix` vacant child slots.
    pub(crate) fn new(radix: usize) -> Self {
        Self {
            children: std::iter::repeat_with(|| None).take(radix).collect(),
            value: None,
        }
    }

    #[inline]
    pub(crate) fn child(&self, index: usize) -> Option<&Node<V>> {
        self.children[index].as_deref()
    }

    /// The child at `index`, created on demand.
    #[inline]
    pub(crate) fn child_or_insert(&mut self, index: usize, radix: usize) -> &mut Node<V> {
        self.children[index].get_or_insert_with(|| Box::new(Node::new(radix)))
    }

    #[inline]
    pub(crate) fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Number of occupied child slots.
    pub(crate) fn num_children(&self) -> usize {
        self.children.iter().filter(|c| c.is_some()).count()
    }

    /// Occupied children with their alphabet index, ascending.
    pub(crate) fn occupied(&self) -> impl DoubleEndedIterator<Item = (usize, &Node<V>)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_deref().map(|c| (i, c)))
    }
}
