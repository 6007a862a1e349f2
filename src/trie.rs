//! A prefix tree holding every word of one corpus.

use std::collections::BTreeMap;

use crate::CorpusError;

/// The index of a node inside a [`Trie`].
///
/// Ids are only meaningful for the tree that handed them out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The position of the node in the tree's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Node {
    depth: usize,
    letter: Option<char>,
    children: BTreeMap<char, NodeId>,
    parent: Option<NodeId>,
}

/// A prefix tree of words that all have the same length.
///
/// Nodes live in an arena owned by the tree and refer to their parent and
/// children by [`NodeId`]. Nodes are never removed, so once the corpus is
/// loaded the tree can be shared freely between searches.
///
/// Because every word has the same length, no word is a prefix of another
/// and a node is a complete word exactly when it has no children.
///
/// # Examples
///
/// ```rust
/// use wordly_solver::Trie;
///
/// let mut trie = Trie::new(5);
/// trie.insert("muted")?;
/// trie.insert("mutes")?;
/// assert!(trie.insert("cat").is_err());
///
/// assert_eq!(trie.word_count(), 2);
/// assert_eq!(trie.words().collect::<Vec<_>>(), ["muted", "mutes"]);
/// #
/// # Ok::<_, wordly_solver::CorpusError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trie {
    nodes: Vec<Node>,
    length: usize,
    words: usize,
}

impl Trie {
    /// Creates an empty tree for words of `length` letters.
    pub fn new(length: usize) -> Self {
        Trie {
            nodes: vec![Node {
                depth: 0,
                letter: None,
                children: BTreeMap::new(),
                parent: None,
            }],
            length,
            words: 0,
        }
    }

    /// Builds a tree from a list of words.
    pub fn from_words<I, S>(length: usize, words: I) -> Result<Self, CorpusError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Trie::new(length);
        for word in words {
            trie.insert(word.as_ref())?;
        }
        Ok(trie)
    }

    /// Adds a word, sharing any prefix already in the tree.
    ///
    /// Returns `true` if the word was not already present, and an error if
    /// the word does not have the tree's length.
    pub fn insert(&mut self, word: &str) -> Result<bool, CorpusError> {
        let found = word.chars().count();
        if found != self.length {
            return Err(CorpusError::WordLength {
                word: word.to_string(),
                expected: self.length,
                found,
            });
        }

        let mut current = self.root();
        let mut created = false;
        for (i, letter) in word.chars().enumerate() {
            current = match self.nodes[current.0].children.get(&letter) {
                Some(&child) => child,
                None => {
                    let child = NodeId(self.nodes.len());
                    self.nodes.push(Node {
                        depth: i + 1,
                        letter: Some(letter),
                        children: BTreeMap::new(),
                        parent: Some(current),
                    });
                    self.nodes[current.0].children.insert(letter, child);
                    created = true;
                    child
                }
            };
        }

        if created {
            self.words += 1;
        }
        Ok(created)
    }

    /// Spells out the word leading to `node` by walking back to the root.
    pub fn reconstruct(&self, node: NodeId) -> String {
        let mut letters = Vec::with_capacity(self.nodes[node.0].depth);
        let mut current = Some(node);
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            letters.extend(node.letter);
            current = node.parent;
        }
        letters.iter().rev().collect()
    }

    /// Returns true if `word` was inserted into the tree.
    pub fn contains(&self, word: &str) -> bool {
        let mut current = self.root();
        for letter in word.chars() {
            match self.child(current, letter) {
                Some(child) => current = child,
                None => return false,
            }
        }
        self.is_leaf(current)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn depth(&self, node: NodeId) -> usize {
        self.nodes[node.0].depth
    }

    /// The letter that leads to `node`, or `None` for the root.
    pub fn letter(&self, node: NodeId) -> Option<char> {
        self.nodes[node.0].letter
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn child(&self, node: NodeId, letter: char) -> Option<NodeId> {
        self.nodes[node.0].children.get(&letter).copied()
    }

    /// Iterates over `(letter, child)` pairs in letter order.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = (char, NodeId)> + '_ {
        self.nodes[node.0]
            .children
            .iter()
            .map(|(&letter, &child)| (letter, child))
    }

    /// A node below the root with no children ends a word.
    pub fn is_leaf(&self, node: NodeId) -> bool {
        let node = &self.nodes[node.0];
        node.depth > 0 && node.children.is_empty()
    }

    /// The length of every word in the tree.
    pub fn length(&self) -> usize {
        self.length
    }

    /// The number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn word_count(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Iterates over the ids of every word-ending node.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(move |&id| self.is_leaf(id))
    }

    /// Iterates over every word in lexical order.
    pub fn words(&self) -> Words<'_> {
        Words {
            trie: self,
            stack: vec![self.root()],
        }
    }
}

/// Iterator over the words of a [`Trie`], created by [`Trie::words()`].
pub struct Words<'t> {
    trie: &'t Trie,
    stack: Vec<NodeId>,
}

impl Iterator for Words<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if self.trie.is_leaf(node) {
                return Some(self.trie.reconstruct(node));
            }
            // reversed so the smallest letter is popped first
            self.stack
                .extend(self.trie.nodes[node.0].children.values().rev().copied());
        }
        None
    }
}
