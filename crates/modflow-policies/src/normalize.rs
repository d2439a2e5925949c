//! Normalización de texto previa a la clasificación.

use deunicode::deunicode;

/// Translitera a ASCII (homoglifos, acentos, escrituras no latinas).
pub fn transliterate(text: &str) -> String {
    deunicode(text)
}

pub fn case_fold(text: &str) -> String {
    text.to_lowercase()
}

/// Parte un texto ya normalizado en palabras: secuencias alfanuméricas, con
/// apóstrofes internos.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transliteration_removes_diacritics_and_homoglyphs() {
        assert_eq!(transliterate("Café"), "Cafe");
        // Cirílico 'а' y 'е' en lugar de latinas.
        assert_eq!(case_fold(&transliterate("bаd wоrd")), "bad word");
    }

    #[test]
    fn tokenize_splits_on_punctuation() {
        assert_eq!(tokenize("hello, world! it's 'fine'"), vec!["hello", "world", "it's", "fine"]);
        assert!(tokenize("  ...  ").is_empty());
    }
}
