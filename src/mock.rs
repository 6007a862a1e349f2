use std::cell::RefCell;

use crate::{Language, Result, UserContext, WordSource};

/// A word source that always offers the same word and records who asked.
#[derive(Debug, Clone)]
pub(crate) struct MockWords {
    word: &'static str,
    asked: RefCell<Vec<Language>>,
}

impl MockWords {
    pub(crate) fn new(word: &'static str) -> Self {
        Self {
            word,
            asked: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn asked(&self) -> Vec<Language> {
        self.asked.borrow().clone()
    }
}

impl WordSource for MockWords {
    fn first_word(&self, language: Language) -> Result<String> {
        self.asked.borrow_mut().push(language);
        Ok(self.word.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MockUser(pub(crate) Language);

impl UserContext for MockUser {
    fn current_language(&self) -> Language {
        self.0
    }
}
