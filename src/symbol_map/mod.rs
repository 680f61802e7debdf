//! Radix trie keyed by strings over an [`Alphabet`].
//!
//! Each node has one child slot per alphabet character, so a key of length
//! `n` is reached by exactly `n` direct slot lookups from the root. Nodes are
//! created lazily by [`SymbolMap::put`] and never removed.
//!
//! Enumeration order is depth-first pre-order with siblings visited in
//! ascending alphabet index, i.e. declaration order of the alphabet rather
//! than code point order. A key is always reported before the keys that
//! extend it.

mod debug;
mod node;

use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use node::Node;

/// A symbol table from strings over an [`Alphabet`] to values of type `V`.
#[derive(Clone)]
pub struct SymbolMap<V> {
    root: Option<Box<Node<V>>>,
    alphabet: Arc<Alphabet>,
    len: usize,
}

impl<V> SymbolMap<V> {
    /// Create an empty map over `alphabet`.
    pub fn new(alphabet: Arc<Alphabet>) -> Self {
        Self {
            root: None,
            alphabet,
            len: 0,
        }
    }

    /// The alphabet keys are drawn from.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Number of distinct keys ever inserted.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no key has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Associate `value` with `key`, returning the value it replaces.
    ///
    /// # Panics
    ///
    /// Panics if `key` contains a character outside the alphabet. The map is
    /// left unchanged in that case. Validate untrusted input with
    /// [`Alphabet::is_valid`] first.
    pub fn put(&mut self, key: &str, value: V) -> Option<V> {
        // Resolve the whole path first so a bad character cannot leave a
        // dangling value-less branch behind.
        let path: Vec<usize> = key.chars().map(|c| self.alphabet.to_index(c)).collect();

        let radix = self.alphabet.radix();
        let mut node: &mut Node<V> = self.root.get_or_insert_with(|| Box::new(Node::new(radix)));
        for index in path {
            node = node.child_or_insert(index, radix);
        }

        let old = node.value.replace(value);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    /// The value stored under `key`.
    ///
    /// A key containing characters outside the alphabet is never present.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.node_at(key)?.value.as_ref()
    }

    /// Whether `key` has been inserted, regardless of what value it holds.
    pub fn contains_key(&self, key: &str) -> bool {
        self.node_at(key).is_some_and(Node::has_value)
    }

    /// Keys starting with `prefix`, in enumeration order.
    ///
    /// At most `max_results` keys are returned; `None` means no limit.
    /// Traversal stops as soon as the limit is reached, so a limited result
    /// is always a prefix of the unlimited one. A prefix that leads nowhere
    /// (including one with characters outside the alphabet) yields nothing.
    pub fn keys_with_prefix(&self, prefix: &str, max_results: Option<usize>) -> Vec<String> {
        let keys = self.prefix_iter(prefix).map(|(key, _)| key);
        match max_results {
            Some(limit) => keys.take(limit).collect(),
            None => keys.collect(),
        }
    }

    /// Lazily iterate over `(key, value)` pairs whose key starts with `prefix`.
    pub fn prefix_iter(&self, prefix: &str) -> PrefixIter<'_, V> {
        let stack = match self.node_at(prefix) {
            Some(node) => vec![(node, prefix.to_owned())],
            None => Vec::new(),
        };
        PrefixIter {
            alphabet: &self.alphabet,
            stack,
        }
    }

    /// Iterate over every `(key, value)` pair in enumeration order.
    pub fn iter(&self) -> PrefixIter<'_, V> {
        self.prefix_iter("")
    }

    /// The longest inserted key that is a prefix of `query`.
    ///
    /// Returns the empty string when no inserted key is a prefix of `query`
    /// (the empty key counts only if it was itself inserted).
    pub fn longest_prefix_of<'q>(&self, query: &'q str) -> &'q str {
        let Some(mut node) = self.root.as_deref() else {
            return "";
        };

        let mut best = 0;
        for (pos, c) in query.char_indices() {
            if node.has_value() {
                best = pos;
            }
            match self.alphabet.index_of(c).and_then(|i| node.child(i)) {
                Some(next) => node = next,
                None => return &query[..best],
            }
        }
        if node.has_value() {
            best = query.len();
        }
        &query[..best]
    }

    /// Number of allocated trie nodes, including the root.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Node<V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.occupied().map(|(_, child)| child));
        }
        count
    }

    /// Approximate heap bytes held by the trie.
    pub fn memory_usage(&self) -> usize {
        let slot = std::mem::size_of::<Option<Box<Node<V>>>>();
        self.node_count() * (std::mem::size_of::<Node<V>>() + self.alphabet.radix() * slot)
    }

    fn node_at(&self, key: &str) -> Option<&Node<V>> {
        let mut node = self.root.as_deref()?;
        for c in key.chars() {
            node = node.child(self.alphabet.index_of(c)?)?;
        }
        Some(node)
    }
}

impl<K: AsRef<str>, V> Extend<(K, V)> for SymbolMap<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key.as_ref(), value);
        }
    }
}

impl<'a, V> IntoIterator for &'a SymbolMap<V> {
    type Item = (String, &'a V);
    type IntoIter = PrefixIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Debug for SymbolMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Pre-order iterator over the keys below a trie node.
///
/// Created by [`SymbolMap::prefix_iter`] and [`SymbolMap::iter`].
pub struct PrefixIter<'a, V> {
    alphabet: &'a Alphabet,
    stack: Vec<(&'a Node<V>, String)>,
}

impl<'a, V> Iterator for PrefixIter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, key)) = self.stack.pop() {
            // Pushed in reverse so the lowest index is popped first.
            for (index, child) in node.occupied().rev() {
                let mut child_key = String::with_capacity(key.len() + 4);
                child_key.push_str(&key);
                child_key.push(self.alphabet.to_char(index));
                self.stack.push((child, child_key));
            }

            if let Some(value) = node.value.as_ref() {
                return Some((key, value));
            }
        }
        None
    }
}
