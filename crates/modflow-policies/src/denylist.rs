//! Lista de bloqueo de términos (coloquialismos codificados).
//!
//! Formato de archivo: un término por línea; líneas vacías y las que empiezan
//! con `#` se ignoran. Los términos se normalizan igual que el texto evaluado
//! (ASCII + minúsculas) y se comparan por palabras completas, de modo que un
//! término de varias palabras debe aparecer como secuencia contigua.
use indexmap::IndexSet;

use crate::normalize::{case_fold, tokenize, transliterate};

#[derive(Debug, Clone, Default)]
pub struct Denylist {
    terms: IndexSet<String>,
}

impl Denylist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(contents: &str) -> Self {
        let mut list = Self::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            list.insert(line);
        }
        list
    }

    /// Agrega un término; devuelve `false` si ya estaba o queda vacío.
    pub fn insert(&mut self, term: &str) -> bool {
        let normalized = tokenize(&case_fold(&transliterate(term))).join(" ");
        if normalized.is_empty() {
            return false;
        }
        self.terms.insert(normalized)
    }

    /// Términos presentes en un texto ya normalizado, en el orden de la lista.
    pub fn matches(&self, normalized_text: &str) -> Vec<&str> {
        let words = tokenize(normalized_text);
        self.terms
            .iter()
            .filter(|term| {
                let needle: Vec<&str> = term.split(' ').collect();
                words.windows(needle.len()).any(|w| w == needle.as_slice())
            })
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}
