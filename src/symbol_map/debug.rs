//! Debug utilities for trie troubleshooting.

use std::fmt::{self, Write as _};

use super::{Node, SymbolMap};

impl<V> SymbolMap<V> {
    /// Render the trie as an indented outline, one node per line.
    pub fn debug_tree(&self) -> String
    where
        V: fmt::Debug,
    {
        let mut out = String::new();
        let _ = writeln!(out, "SymbolMap (len={}, radix={})", self.len, self.alphabet.radix());
        match self.root.as_deref() {
            Some(root) => self.debug_node(root, 0, &mut out),
            None => out.push_str("(empty)\n"),
        }
        out
    }

    fn debug_node(&self, node: &Node<V>, depth: usize, out: &mut String)
    where
        V: fmt::Debug,
    {
        for (index, child) in node.occupied() {
            let indent = "  ".repeat(depth);
            let _ = match child.value.as_ref() {
                Some(value) => writeln!(out, "{indent}{:?} = {value:?}", self.alphabet.to_char(index)),
                None => writeln!(out, "{indent}{:?}", self.alphabet.to_char(index)),
            };
            self.debug_node(child, depth + 1, out);
        }
    }

    /// Verify tree integrity - returns list of issues found.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut values = 0usize;

        let mut stack: Vec<(&Node<V>, String)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, String::new()));
        }

        while let Some((node, path)) = stack.pop() {
            if node.children.len() != self.alphabet.radix() {
                issues.push(format!(
                    "node {:?} has {} child slots, radix is {}",
                    path,
                    node.children.len(),
                    self.alphabet.radix()
                ));
                continue;
            }
            if node.has_value() {
                values += 1;
            } else if node.num_children() == 0 {
                issues.push(format!("node {:?} has neither a value nor children", path));
            }
            for (index, child) in node.occupied() {
                let mut child_path = path.clone();
                child_path.push(self.alphabet.to_char(index));
                stack.push((child, child_path));
            }
        }

        if values != self.len {
            issues.push(format!("{} value nodes but len()={}", values, self.len));
        }
        issues
    }
}
