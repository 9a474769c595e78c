//! Radix tree for longest-prefix lookups over import paths.
//!
//! Lookup walks one edge per matched run of characters, so its cost is
//! bounded by the length of the queried path rather than the number of
//! stored keys.

use std::collections::HashMap;

/// A radix tree (compressed trie) mapping string keys to values.
#[derive(Debug, Clone)]
pub struct RadixTree<V> {
	root: Node<V>,
}

#[derive(Debug, Clone)]
struct Node<V> {
	/// The edge label leading to this node.
	prefix: String,
	value: Option<V>,
	/// Children indexed by the first character of their edge label.
	children: HashMap<char, Node<V>>,
}

impl<V> Default for RadixTree<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> RadixTree<V> {
	pub fn new() -> Self {
		Self {
			root: Node::new(String::new()),
		}
	}

	/// Insert a key-value pair, returning the previous value for the key.
	pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
		self.root.insert(key, value)
	}

	/// Find the longest stored key that is a prefix of `key`.
	///
	/// Returns the byte length of that key together with its value.
	///
	/// ```
	/// use goimport_rewrite::matcher::RadixTree;
	///
	/// let mut tree = RadixTree::new();
	/// tree.insert("github.com/foo/", "short");
	/// tree.insert("github.com/foo/bar", "long");
	///
	/// assert_eq!(tree.longest_prefix("github.com/foo/bar/baz"), Some((18, &"long")));
	/// assert_eq!(tree.longest_prefix("github.com/foo/baz"), Some((15, &"short")));
	/// assert_eq!(tree.longest_prefix("github.com/other"), None);
	/// ```
	pub fn longest_prefix(&self, key: &str) -> Option<(usize, &V)> {
		let mut current = &self.root;
		let mut consumed = 0;
		let mut last_match = current.value.as_ref().map(|value| (0, value));

		loop {
			let remaining = &key[consumed..];
			let Some(first) = remaining.chars().next() else {
				break;
			};
			let Some(child) = current.children.get(&first) else {
				break;
			};
			if !remaining.starts_with(&child.prefix) {
				break;
			}

			consumed += child.prefix.len();
			current = child;
			if let Some(value) = &current.value {
				last_match = Some((consumed, value));
			}
		}

		last_match
	}
}

impl<V> Node<V> {
	fn new(prefix: String) -> Self {
		Self {
			prefix,
			value: None,
			children: HashMap::new(),
		}
	}

	fn leaf(prefix: &str, value: V) -> Self {
		let mut node = Self::new(prefix.to_string());
		node.value = Some(value);
		node
	}

	fn insert(&mut self, key: &str, value: V) -> Option<V> {
		let Some(first) = key.chars().next() else {
			return self.value.replace(value);
		};

		let Some(mut child) = self.children.remove(&first) else {
			self.children.insert(first, Node::leaf(key, value));
			return None;
		};

		let common = common_prefix_len(key, &child.prefix);
		if common == child.prefix.len() {
			let previous = child.insert(&key[common..], value);
			self.children.insert(first, child);
			return previous;
		}

		// Split the edge: the shared part becomes a new intermediate node
		// holding the old child under the rest of its label.
		let mut split = Node::new(key[..common].to_string());
		child.prefix = child.prefix[common..].to_string();
		if let Some(child_first) = child.prefix.chars().next() {
			split.children.insert(child_first, child);
		}

		let rest = &key[common..];
		match rest.chars().next() {
			None => split.value = Some(value),
			Some(rest_first) => {
				split.children.insert(rest_first, Node::leaf(rest, value));
			}
		}

		self.children.insert(first, split);
		None
	}
}

/// Byte length of the longest common prefix, on a character boundary.
fn common_prefix_len(a: &str, b: &str) -> usize {
	a.char_indices()
		.zip(b.chars())
		.find(|((_, x), y)| x != y)
		.map_or_else(|| a.len().min(b.len()), |((i, _), _)| i)
}
