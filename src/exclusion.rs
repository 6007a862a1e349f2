//! Picking a guess that tests as many new letters as possible.
//!
//! Early in a game it often pays to guess a word that cannot be the answer,
//! as long as it avoids letters whose fate is already known. This module finds
//! the word with the fewest such letters.

use std::{
    cmp::Reverse,
    collections::{BTreeSet, BinaryHeap},
};

use itertools::Itertools;
use log::trace;
use rand::{seq::SliceRandom, Rng};

use crate::trie::{NodeId, Trie};

/// Finds the word with the fewest positions holding a `forbidden` letter.
///
/// Among equally good words, the one with the most distinct letters wins,
/// and any remaining tie is broken at random. Returns `None` only when the
/// tree is empty.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
/// use wordly_solver::{exclusion::exclusion_word, Trie};
///
/// let trie = Trie::from_words(5, ["crane", "slate", "pious"])?;
/// let forbidden: BTreeSet<char> = "crane".chars().collect();
///
/// assert_eq!(exclusion_word(&trie, &forbidden).as_deref(), Some("pious"));
/// #
/// # Ok::<_, wordly_solver::CorpusError>(())
/// ```
pub fn exclusion_word(trie: &Trie, forbidden: &BTreeSet<char>) -> Option<String> {
    exclusion_word_with_rng(trie, forbidden, &mut rand::thread_rng())
}

/// Like [`exclusion_word()`], drawing the final tie break from `rng`.
pub fn exclusion_word_with_rng<R: Rng + ?Sized>(
    trie: &Trie,
    forbidden: &BTreeSet<char>,
    rng: &mut R,
) -> Option<String> {
    let leaves = cheapest_leaves(trie, forbidden);

    let words = leaves
        .into_iter()
        .map(|leaf| trie.reconstruct(leaf))
        .collect_vec();
    let most_distinct = words.iter().map(|w| distinct_letters(w)).max()?;
    let best = words
        .into_iter()
        .filter(|w| distinct_letters(w) == most_distinct)
        .collect_vec();

    best.choose(rng).cloned()
}

/// Every word-ending node reachable with the minimum number of forbidden
/// letters on its path.
///
/// Costs never decrease along a path, so the heap pops nodes in order of
/// their final cost and the first leaf fixes the optimum.
fn cheapest_leaves(trie: &Trie, forbidden: &BTreeSet<char>) -> Vec<NodeId> {
    let mut heap = BinaryHeap::new();
    heap.push(Reverse((0_usize, trie.root())));

    let mut best = None;
    let mut leaves = Vec::new();

    while let Some(Reverse((cost, node))) = heap.pop() {
        if matches!(best, Some(b) if cost > b) {
            break;
        }

        if trie.is_leaf(node) {
            best = Some(cost);
            leaves.push(node);
            continue;
        }

        for (letter, child) in trie.children(node) {
            let step = usize::from(forbidden.contains(&letter));
            heap.push(Reverse((cost + step, child)));
        }
    }

    trace!("{} words with {:?} forbidden letters", leaves.len(), best);
    leaves
}

fn distinct_letters(word: &str) -> usize {
    word.chars().unique().count()
}
