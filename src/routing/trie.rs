//! Persistent parameter trie.
//!
//! # Responsibilities
//! - Store values under pattern paths (literal and parameter segments)
//! - Merge two tries and mount a trie under a prefix
//! - Enumerate match candidates for a request path in precedence order
//!
//! # Design Decisions
//! - Nodes are never mutated once built; updates copy the path from the
//!   root to the changed node and share every other subtree
//! - Children and value lists are `rpds` sync collections, so copying a
//!   node is O(1) regardless of fan-out
//! - Literal children are tried before the parameter child at every branch
//! - A node has at most one parameter slot; differing capture names at the
//!   same position are reconciled by [`ParamNaming`]

use std::fmt;
use std::sync::Arc;

use rpds::{HashTrieMapSync, VectorSync};

use crate::routing::pattern::{PatternPath, Segment};
use crate::routing::types::{ParamNaming, Params};

struct ParamChild<V> {
    name: String,
    node: Arc<Node<V>>,
}

impl<V> Clone for ParamChild<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            node: Arc::clone(&self.node),
        }
    }
}

struct Node<V> {
    literals: HashTrieMapSync<String, Arc<Node<V>>>,
    param: Option<ParamChild<V>>,
    values: VectorSync<V>,
    /// Values stored in this subtree, own values included.
    len: usize,
}

impl<V> Clone for Node<V> {
    fn clone(&self) -> Self {
        Self {
            literals: self.literals.clone(),
            param: self.param.clone(),
            values: self.values.clone(),
            len: self.len,
        }
    }
}

impl<V> Node<V> {
    fn empty() -> Self {
        Self {
            literals: HashTrieMapSync::new_sync(),
            param: None,
            values: VectorSync::new_sync(),
            len: 0,
        }
    }
}

impl<V: Clone> Node<V> {
    fn inserted(&self, segments: &[Segment], value: V, naming: ParamNaming) -> Node<V> {
        let mut node = self.clone();
        node.len += 1;
        match segments.split_first() {
            None => node.values.push_back_mut(value),
            Some((Segment::Literal(text), rest)) => {
                let child = match self.literals.get(text.as_str()) {
                    Some(existing) => existing.inserted(rest, value, naming),
                    None => Node::empty().inserted(rest, value, naming),
                };
                node.literals.insert_mut(text.clone(), Arc::new(child));
            }
            Some((Segment::Param(name), rest)) => {
                node.param = Some(match &self.param {
                    Some(slot) => ParamChild {
                        name: naming.resolve(&slot.name, name).to_string(),
                        node: Arc::new(slot.node.inserted(rest, value, naming)),
                    },
                    None => ParamChild {
                        name: name.clone(),
                        node: Arc::new(Node::empty().inserted(rest, value, naming)),
                    },
                });
            }
        }
        node
    }

    fn merged(&self, other: &Node<V>, naming: ParamNaming) -> Node<V> {
        let mut literals = self.literals.clone();
        for (text, theirs) in other.literals.iter() {
            let child = match self.literals.get(text.as_str()) {
                Some(ours) => Arc::new(ours.merged(theirs, naming)),
                None => Arc::clone(theirs),
            };
            literals.insert_mut(text.clone(), child);
        }

        let param = match (&self.param, &other.param) {
            (Some(ours), Some(theirs)) => Some(ParamChild {
                name: naming.resolve(&ours.name, &theirs.name).to_string(),
                node: Arc::new(ours.node.merged(&theirs.node, naming)),
            }),
            (ours, theirs) => ours.clone().or_else(|| theirs.clone()),
        };

        let mut values = self.values.clone();
        for value in other.values.iter() {
            values.push_back_mut(value.clone());
        }

        Node {
            literals,
            param,
            values,
            len: self.len + other.len,
        }
    }
}

/// An immutable trie of values keyed by pattern path.
///
/// Cloning is a reference-count bump. Every operation returns a new trie and
/// leaves the receiver untouched.
pub struct Trie<V> {
    root: Arc<Node<V>>,
}

impl<V> Clone for Trie<V> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
        }
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    /// An empty trie.
    pub fn new() -> Self {
        Self {
            root: Arc::new(Node::empty()),
        }
    }

    /// Total number of values stored, across all nodes.
    pub fn len(&self) -> usize {
        self.root.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether both tries are the same published value.
    pub fn ptr_eq(&self, other: &Trie<V>) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    /// Lazily enumerate the candidates matching `path`.
    ///
    /// Candidates come out depth-first with the literal branch explored
    /// before the parameter branch at every node, so more specific routes
    /// are always offered first. Only nodes reached with the whole path
    /// consumed and holding at least one value are yielded.
    pub fn matches<'t, 'p, S: AsRef<str>>(&'t self, path: &'p [S]) -> Matches<'t, 'p, V, S> {
        Matches {
            path,
            stack: vec![Frame {
                node: &self.root,
                depth: 0,
                params: Params::new(),
            }],
        }
    }

    /// All candidates matching `path`, in precedence order.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Vec<Candidate<'_, V>> {
        self.matches(path).collect()
    }

    /// Every stored value with the pattern it was registered under.
    ///
    /// Listed depth-first: a node's own values, then its literal children in
    /// lexical order, then its parameter child.
    pub fn routes(&self) -> Vec<(PatternPath, &V)> {
        let mut out = Vec::new();
        let mut prefix = PatternPath::root();
        collect_routes(&self.root, &mut prefix, &mut out);
        out
    }
}

fn collect_routes<'t, V>(
    node: &'t Node<V>,
    prefix: &mut PatternPath,
    out: &mut Vec<(PatternPath, &'t V)>,
) {
    out.extend(node.values.iter().map(|value| (prefix.clone(), value)));

    let mut literals: Vec<_> = node.literals.iter().collect();
    literals.sort_by(|a, b| a.0.cmp(b.0));
    for (text, child) in literals {
        prefix.push(Segment::Literal(text.clone()));
        collect_routes(child, prefix, out);
        prefix.pop();
    }

    if let Some(slot) = &node.param {
        prefix.push(Segment::Param(slot.name.clone()));
        collect_routes(&slot.node, prefix, out);
        prefix.pop();
    }
}

impl<V: Clone> Trie<V> {
    /// Append `value` at `path`, relabelling parameter slots with the
    /// incoming names.
    pub fn insert(&self, path: &PatternPath, value: V) -> Trie<V> {
        self.insert_with(path, value, ParamNaming::Latest)
    }

    pub fn insert_with(&self, path: &PatternPath, value: V, naming: ParamNaming) -> Trie<V> {
        Trie {
            root: Arc::new(self.root.inserted(path.segments(), value, naming)),
        }
    }

    /// Combine two tries. At every shared node the values of `self` come
    /// before those of `other`.
    pub fn merge(&self, other: &Trie<V>) -> Trie<V> {
        self.merge_with(other, ParamNaming::Latest)
    }

    pub fn merge_with(&self, other: &Trie<V>, naming: ParamNaming) -> Trie<V> {
        Trie {
            root: Arc::new(self.root.merged(&other.root, naming)),
        }
    }

    /// This trie re-rooted under `prefix`: a value stored at `/p` ends up
    /// at `prefix` followed by `/p`.
    pub fn mount(&self, prefix: &PatternPath) -> Trie<V> {
        let root = prefix
            .segments()
            .iter()
            .rev()
            .fold(Arc::clone(&self.root), |child, segment| {
                let mut node = Node {
                    len: child.len,
                    ..Node::empty()
                };
                match segment {
                    Segment::Literal(text) => node.literals.insert_mut(text.clone(), child),
                    Segment::Param(name) => {
                        node.param = Some(ParamChild {
                            name: name.clone(),
                            node: child,
                        })
                    }
                }
                Arc::new(node)
            });
        Trie { root }
    }
}

impl<V: Clone> FromIterator<(PatternPath, V)> for Trie<V> {
    fn from_iter<It: IntoIterator<Item = (PatternPath, V)>>(iter: It) -> Self {
        iter.into_iter()
            .fold(Trie::new(), |trie, (path, value)| trie.insert(&path, value))
    }
}

impl<V> fmt::Debug for Trie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patterns: Vec<String> = self.routes().into_iter().map(|(p, _)| p.to_string()).collect();
        f.debug_struct("Trie").field("routes", &patterns).finish()
    }
}

/// One reachable terminal node for a path, with its captures.
pub struct Candidate<'t, V> {
    values: &'t VectorSync<V>,
    params: Params,
}

impl<'t, V> Candidate<'t, V> {
    /// Values registered at the node, in registration order.
    pub fn values(&self) -> impl Iterator<Item = &'t V> + 't {
        self.values.iter()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn into_params(self) -> Params {
        self.params
    }
}

impl<V> fmt::Debug for Candidate<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("values", &self.values.len())
            .field("params", &self.params)
            .finish()
    }
}

struct Frame<'t, V> {
    node: &'t Node<V>,
    depth: usize,
    params: Params,
}

/// Lazy candidate iterator returned by [`Trie::matches`].
pub struct Matches<'t, 'p, V, S> {
    path: &'p [S],
    stack: Vec<Frame<'t, V>>,
}

impl<'t, V, S: AsRef<str>> Iterator for Matches<'t, '_, V, S> {
    type Item = Candidate<'t, V>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(Frame { node, depth, params }) = self.stack.pop() {
            let Some(segment) = self.path.get(depth) else {
                if !node.values.is_empty() {
                    return Some(Candidate {
                        values: &node.values,
                        params,
                    });
                }
                continue;
            };
            let segment = segment.as_ref();

            // Pushed first so the literal branch is popped, and exhausted, first.
            if let Some(slot) = &node.param {
                let mut captured = params.clone();
                captured.insert(slot.name.as_str(), segment);
                self.stack.push(Frame {
                    node: &slot.node,
                    depth: depth + 1,
                    params: captured,
                });
            }
            if let Some(child) = node.literals.get(segment) {
                self.stack.push(Frame {
                    node: child,
                    depth: depth + 1,
                    params,
                });
            }
        }
        None
    }
}
