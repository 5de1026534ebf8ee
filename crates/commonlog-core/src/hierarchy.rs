//! Hierarchical max-level resolution over dotted logger names.
//!
//! The hierarchy is a prefix trie keyed by name segments. Each node may hold
//! an explicitly configured maximum level. Resolving a name walks the trie
//! as far as the name matches existing nodes and returns the level of the
//! deepest configured node on that walk, so `server.http.v2` inherits from
//! `server.http`, then `server`, then the root.
//!
//! ## Example
//!
//! ```
//! use commonlog_core::NameHierarchy;
//! use commonlog_types::Level;
//!
//! let hierarchy = NameHierarchy::new();
//! hierarchy.set_max_level::<&str>(&[], Level::Notice);
//! hierarchy.set_max_level(&["server", "http"], Level::Debug);
//!
//! assert!(hierarchy.allow_level(&["server", "http"], Level::Debug));
//! assert!(!hierarchy.allow_level(&["server", "db"], Level::Debug));
//! assert!(hierarchy.allow_level(&["server", "db"], Level::Notice));
//! ```

use commonlog_types::Level;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Trie node. Children are owned exclusively by their parent.
#[derive(Debug, Default)]
struct Node {
    /// `None` until configured explicitly
    max_level: Option<Level>,
    children: HashMap<String, Node>,
}

impl Node {
    fn count(&self) -> usize {
        1 + self.children.values().map(Node::count).sum::<usize>()
    }

    fn collect(&self, path: &mut Vec<String>, out: &mut Vec<(String, Level)>) {
        if let Some(level) = self.max_level {
            out.push((path.join("."), level));
        }
        for (segment, child) in &self.children {
            path.push(segment.clone());
            child.collect(path, out);
            path.pop();
        }
    }
}

/// Name hierarchy mapping dotted names to maximum allowed levels.
///
/// Reads take a shared lock and writes take an exclusive one, so the
/// hierarchy can be reconfigured while other threads are logging.
#[derive(Debug, Default)]
pub struct NameHierarchy {
    root: RwLock<Node>,
}

impl NameHierarchy {
    /// Create an empty hierarchy; every name resolves to [`Level::None`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `level` is at or below the effective max level for `name`.
    pub fn allow_level<S: AsRef<str>>(&self, name: &[S], level: Level) -> bool {
        level <= self.get_max_level(name)
    }

    /// Resolve the effective max level for `name`.
    ///
    /// Walks the trie until the first segment with no matching child and
    /// returns the deepest configured level seen, falling back to
    /// [`Level::None`]. Never creates nodes.
    pub fn get_max_level<S: AsRef<str>>(&self, name: &[S]) -> Level {
        let root = self.root.read();
        let mut node = &*root;
        let mut level = node.max_level;

        for segment in name {
            match node.children.get(segment.as_ref()) {
                Some(child) => {
                    node = child;
                    if child.max_level.is_some() {
                        level = child.max_level;
                    }
                }
                None => break,
            }
        }

        level.unwrap_or(Level::None)
    }

    /// Set the max level for `name`, creating missing nodes along the path.
    ///
    /// An empty name configures the root.
    pub fn set_max_level<S: AsRef<str>>(&self, name: &[S], level: Level) {
        let mut root = self.root.write();
        let mut node = &mut *root;

        for segment in name {
            node = node.children.entry(segment.as_ref().to_string()).or_default();
        }

        node.max_level = Some(level);
    }

    /// Every explicitly configured name with its level, sorted by name.
    ///
    /// The root is reported as the empty string.
    pub fn configured(&self) -> Vec<(String, Level)> {
        let root = self.root.read();
        let mut out = Vec::new();
        root.collect(&mut Vec::new(), &mut out);
        out.sort();
        out
    }

    /// Total number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.root.read().count()
    }
}
