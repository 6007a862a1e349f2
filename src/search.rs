//! Randomized backtracking search for a word that satisfies a
//! [`ConstraintSpec`].
//!
//! The search walks a [`Trie`] depth first. At each depth it either follows
//! the single child fixed by an exact position, or tries the children that
//! survive the exclusions and occurrence caps in a random order. The first
//! complete word whose letter tallies also check out is returned, so calling
//! the search repeatedly with the same constraints returns different words
//! when several are admissible.
//!
//! All traversal state lives in the call, so any number of searches can run
//! against the same tree at once.

use itertools::Itertools;
use log::trace;
use rand::{seq::SliceRandom, Rng};

use crate::{
    constraints::ConstraintSpec,
    trie::{NodeId, Trie},
};

/// Finds a random admissible word, using the thread-local generator.
///
/// Returns `None` when no word in the tree satisfies `spec`. That answer is
/// final: the search is exhaustive.
///
/// # Examples
///
/// ```rust
/// use wordly_solver::{search::search, ConstraintSpec, Trie};
///
/// let trie = Trie::from_words(5, ["muted", "cutey", "fumes", "gauge", "lutes"])?;
/// let spec = ConstraintSpec::new(5)
///     .exclude("abrols")
///     .exact(2, 't')
///     .exact(4, 'd');
///
/// assert_eq!(search(&trie, &spec).as_deref(), Some("muted"));
/// assert_eq!(search(&trie, &spec.cap('m', 0)), None);
/// #
/// # Ok::<_, wordly_solver::CorpusError>(())
/// ```
pub fn search(trie: &Trie, spec: &ConstraintSpec) -> Option<String> {
    search_with_rng(trie, spec, &mut rand::thread_rng())
}

/// Finds a random admissible word, drawing the order of branches from `rng`.
///
/// `spec` must be valid and describe words of the tree's length;
/// [`Forest::search()`](crate::Forest::search()) checks both.
pub fn search_with_rng<R: Rng + ?Sized>(
    trie: &Trie,
    spec: &ConstraintSpec,
    rng: &mut R,
) -> Option<String> {
    debug_assert_eq!(
        spec.length(),
        trie.length(),
        "constraints and tree disagree on the word length"
    );

    let mut search = Search {
        trie,
        spec,
        rng,
        visited: vec![false; trie.node_count()],
        prefix: Vec::with_capacity(trie.length()),
    };

    let found = search.visit(trie.root());
    trace!(
        "searched {} of {} nodes, found {:?}",
        search.visited.iter().filter(|&&v| v).count(),
        trie.node_count(),
        found
    );
    found
}

struct Search<'a, R: ?Sized> {
    trie: &'a Trie,
    spec: &'a ConstraintSpec,
    rng: &'a mut R,
    visited: Vec<bool>,
    /// letters on the path from the root to the current node
    prefix: Vec<char>,
}

impl<R: Rng + ?Sized> Search<'_, R> {
    fn visit(&mut self, node: NodeId) -> Option<String> {
        if self.visited[node.index()] {
            return None;
        }

        if self.trie.is_leaf(node) {
            let word = self.trie.reconstruct(node);
            let letters: Vec<char> = word.chars().collect();
            if self.spec.satisfies_tallies(&letters) {
                return Some(word);
            }
        }

        self.visited[node.index()] = true;

        let depth = self.trie.depth(node);
        if let Some(letter) = self.spec.exact_at(depth) {
            let child = self.trie.child(node, letter)?;
            return self.descend(child, letter);
        }

        let mut candidates: Vec<(char, NodeId)> = self
            .trie
            .children(node)
            .filter(|&(letter, _)| {
                !self.spec.is_excluded(letter)
                    && !self.spec.is_excluded_at(depth, letter)
                    && self.running_count(letter) < self.spec.cap_for(letter)
            })
            .collect_vec();
        candidates.shuffle(&mut *self.rng);

        for (letter, child) in candidates {
            if self.visited[child.index()] {
                continue;
            }
            if let Some(word) = self.descend(child, letter) {
                return Some(word);
            }
        }

        None
    }

    fn descend(&mut self, child: NodeId, letter: char) -> Option<String> {
        self.prefix.push(letter);
        let found = self.visit(child);
        self.prefix.pop();
        found
    }

    /// Copies of `letter` already on the path.
    fn running_count(&self, letter: char) -> usize {
        self.prefix.iter().filter(|&&c| c == letter).count()
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    const ENGLISH: [&str; 23] = [
        "abaca", "aband", "adeem", "aleft", "ascon", "asess", "babes", "bases", "begum", "begus",
        "birls", "booms", "yetts", "valve", "verst", "vower", "weals", "wifes", "muted", "cutey",
        "fumes", "gauge", "lutes",
    ];

    const RUSSIAN: [&str; 4] = ["океан", "будка", "кошка", "питон"];

    fn tree(words: &[&str]) -> Trie {
        Trie::from_words(5, words).unwrap()
    }

    #[test]
    fn unique_match_every_time() {
        let trie = tree(&ENGLISH);
        let spec = ConstraintSpec::new(5)
            .exclude("abrols")
            .exact(2, 't')
            .exact(4, 'd');

        for _ in 0..100 {
            assert_eq!(search(&trie, &spec).as_deref(), Some("muted"));
        }

        let capped = spec.cap('m', 0);
        for _ in 0..100 {
            assert_eq!(search(&trie, &capped), None);
        }
    }

    #[test]
    fn whole_alphabet_excluded() {
        let trie = tree(&ENGLISH);
        let spec = ConstraintSpec::new(5).exclude("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(search(&trie, &spec), None);
    }

    macro_rules! single_result_test {
        ($fn_name:ident[$words:expr; $spec:expr => $expected:expr]) => {
            #[test]
            fn $fn_name() {
                let trie = tree(&$words);
                let spec = $spec;
                for _ in 0..100 {
                    assert_eq!(search(&trie, &spec).as_deref(), $expected);
                }
            }
        };
    }

    single_result_test! { cyrillic_exact_positions [RUSSIAN;
        ConstraintSpec::new(5).exclude("бпт").exact(2, 'ш').exact(4, 'а') => Some("кошка")]
    }

    single_result_test! { cyrillic_first_letter [RUSSIAN;
        ConstraintSpec::new(5).exclude("ш").exact(0, 'о') => Some("океан")]
    }

    single_result_test! { cyrillic_nothing_left [RUSSIAN;
        ConstraintSpec::new(5).exclude("океанбудт") => None]
    }

    #[test]
    fn results_vary_between_calls() {
        let trie = tree(&ENGLISH);
        let spec = ConstraintSpec::new(5).exclude("a");

        let results: HashSet<String> = (0..100).filter_map(|_| search(&trie, &spec)).collect();
        assert!(results.len() > 1);
    }

    #[test]
    fn searches_run_concurrently() {
        let trie = tree(&ENGLISH);
        let spec = ConstraintSpec::new(5).exclude("a").cap('s', 1);

        let results: Vec<Option<String>> = std::thread::scope(|scope| {
            let handles = (0..8)
                .map(|_| scope.spawn(|| search(&trie, &spec)))
                .collect_vec();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        for word in results {
            assert!(spec.is_admissible(&word.unwrap()));
        }
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "disagree on the word length")]
    fn length_mismatch_is_caught() {
        let trie = tree(&ENGLISH);
        search(&trie, &ConstraintSpec::new(4));
    }

    #[test]
    fn seeded_search_is_repeatable() {
        let trie = tree(&ENGLISH);
        let spec = ConstraintSpec::new(5).exclude("a");

        let first = search_with_rng(&trie, &spec, &mut StdRng::seed_from_u64(7));
        let second = search_with_rng(&trie, &spec, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    /// Searches, removes the result from the corpus and rebuilds the tree
    /// until nothing is found, collecting every result along the way.
    fn enumerate(words: &[&str], spec: &ConstraintSpec) -> Vec<Option<String>> {
        let mut corpus: Vec<&str> = words.to_vec();
        let mut results = Vec::new();
        loop {
            let trie = tree(&corpus);
            let result = search(&trie, spec);
            results.push(result.clone());
            match result {
                Some(word) => corpus.retain(|w| *w != word),
                None => break,
            }
            assert!(results.len() <= words.len() + 1);
        }
        results
    }

    macro_rules! enumeration_test {
        ($fn_name:ident[$words:expr; $spec:expr => $( $expected:expr ),*]) => {
            #[test]
            fn $fn_name() {
                let spec = $spec;
                let results = enumerate(&$words, &spec);
                let (last, found) = results.split_last().unwrap();

                assert_eq!(*last, None);
                let found: Vec<String> = found.iter().flatten().cloned().sorted().collect();
                let expected: Vec<String> =
                    vec![$( $expected.to_string() ),*].into_iter().sorted().collect();
                assert_eq!(found, expected);
            }
        };
    }

    enumeration_test! { enumerate_exact_and_misplaced [ENGLISH;
        ConstraintSpec::new(5).exact(0, 'a').exclude_at(3, "e") => "aleft", "asess"]
    }

    enumeration_test! { enumerate_excluded_and_exact [ENGLISH;
        ConstraintSpec::new(5).exclude("bfy").exact(1, 'e') => "verst", "weals"]
    }

    enumeration_test! { enumerate_single [ENGLISH;
        ConstraintSpec::new(5).exclude("as").exact(4, 'm') => "begum"]
    }

    enumeration_test! { enumerate_with_caps [ENGLISH;
        ConstraintSpec::new(5).exact(0, 'a').cap('a', 2).cap('e', 1).cap('s', 2) =>
            "aband", "aleft", "ascon"]
    }

    enumeration_test! { enumerate_everything_combined [ENGLISH;
        ConstraintSpec::new(5).exclude("a").exact(0, 'b').exclude_at(2, "s").cap('o', 1) =>
            "birls", "begus"]
    }

    enumeration_test! { enumerate_cyrillic [RUSSIAN;
        ConstraintSpec::new(5).exclude("пб").exact(2, 'ш') => "кошка"]
    }

    fn letters() -> impl Strategy<Value = char> {
        prop::sample::select(vec!['a', 'b', 'c', 'd', 'e'])
    }

    prop_compose! {
        fn specs()(
            exact in prop::collection::btree_map(0..4_usize, letters(), 0..2),
            excluded_at in prop::collection::vec((0..4_usize, letters()), 0..3),
            excluded in prop::collection::vec(letters(), 0..2),
            caps in prop::collection::vec((letters(), 0..3_usize), 0..2),
        ) -> ConstraintSpec {
            let mut spec = ConstraintSpec::new(4);
            for (position, letter) in exact {
                spec = spec.exact(position, letter);
            }
            for (position, letter) in excluded_at {
                spec = spec.exclude_at(position, &letter.to_string());
            }
            for letter in excluded {
                spec = spec.exclude(&letter.to_string());
            }
            for (letter, cap) in caps {
                spec = spec.cap(letter, cap);
            }
            spec
        }
    }

    proptest! {
        #[test]
        fn found_words_are_admissible(
            corpus in prop::collection::btree_set(prop::collection::vec(letters(), 4), 1..40),
            spec in specs(),
            seed in any::<u64>(),
        ) {
            let words: Vec<String> = corpus.into_iter().map(|w| w.into_iter().collect()).collect();
            let trie = Trie::from_words(4, &words).unwrap();
            let found = search_with_rng(&trie, &spec, &mut StdRng::seed_from_u64(seed));

            match found {
                Some(word) => {
                    prop_assert!(words.contains(&word));
                    prop_assert!(spec.is_admissible(&word));
                    let counts = word.chars().counts();
                    for letter in spec.required_letters() {
                        prop_assert!(counts.contains_key(&letter));
                    }
                    for (letter, count) in counts {
                        prop_assert!(count <= spec.cap_for(letter));
                    }
                }
                None => prop_assert!(words.iter().all(|w| !spec.is_admissible(w))),
            }
        }
    }
}
