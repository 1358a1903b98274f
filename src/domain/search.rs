use std::collections::BTreeMap;

/// Relevance tier attached to each lexeme. `A` ranks highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Weight {
    A,
    B,
    C,
}

impl Weight {
    fn label(&self) -> char {
        match self {
            Weight::A => 'A',
            Weight::B => 'B',
            Weight::C => 'C',
        }
    }
}

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from",
    "has", "have", "if", "in", "into", "is", "it", "its", "no", "not", "of",
    "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "were", "will", "with",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

fn has_vowel(word: &str) -> bool {
    word.chars().any(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
}

/// Lightweight English stemmer (Porter step-1 subset). Enough to fold
/// plurals and common verb forms: "websockets" -> "websocket",
/// "redis" -> "redi", "indexed" -> "index".
pub fn stem(word: &str) -> String {
    let mut stem = word.to_string();

    if stem.ends_with("sses") {
        stem.truncate(stem.len() - 2);
    } else if stem.ends_with("ies") {
        stem.truncate(stem.len() - 2);
    } else if !stem.ends_with("ss") && stem.ends_with('s') && stem.len() > 3 {
        stem.truncate(stem.len() - 1);
    }

    if stem.ends_with("ing") && stem.len() > 5 && has_vowel(&stem[..stem.len() - 3]) {
        stem.truncate(stem.len() - 3);
    } else if stem.ends_with("ed") && stem.len() > 4 && has_vowel(&stem[..stem.len() - 2]) {
        stem.truncate(stem.len() - 2);
    }

    stem
}

/// Splits on non-alphanumeric boundaries, lowercases, drops stop words,
/// and stems what remains. Empty input yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !is_stop_word(w))
        .map(stem)
        .collect()
}

/// Weighted token index over a project's text fields. Always a pure
/// function of (title, description, technologies): identical inputs
/// produce an identical vector, so re-saving unchanged text is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchVector {
    lexemes: BTreeMap<String, Vec<(u32, Weight)>>,
}

impl SearchVector {
    /// Merges the three fields into one vector: title at tier A,
    /// description at B, technologies at C. Positions run across the
    /// concatenated fields. Missing fields are treated as empty strings.
    pub fn build(title: &str, description: &str, technologies: &str) -> Self {
        let mut vector = SearchVector::default();
        let mut position = 0u32;

        for (text, weight) in [
            (title, Weight::A),
            (description, Weight::B),
            (technologies, Weight::C),
        ] {
            for token in tokenize(text) {
                position += 1;
                vector
                    .lexemes
                    .entry(token)
                    .or_default()
                    .push((position, weight));
            }
        }

        vector
    }

    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lexemes.len()
    }

    /// Best tier the lexeme occurs at, if present.
    pub fn weight_of(&self, lexeme: &str) -> Option<Weight> {
        self.lexemes
            .get(lexeme)
            .and_then(|entries| entries.iter().map(|(_, w)| *w).min())
    }

    /// Renders the Postgres tsvector literal, e.g. `'app':2A 'chat':1A`.
    /// Lexemes are alphanumeric only, so no quote escaping is needed.
    pub fn to_tsvector(&self) -> String {
        self.lexemes
            .iter()
            .map(|(lexeme, entries)| {
                let positions = entries
                    .iter()
                    .map(|(pos, weight)| format!("{}{}", pos, weight.label()))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("'{}':{}", lexeme, positions)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Builds an OR tsquery literal from a user query, run through the same
/// tokenizer as the stored vectors. `None` when nothing survives
/// tokenization, so callers can short-circuit to an empty result.
pub fn to_tsquery(query: &str) -> Option<String> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return None;
    }

    Some(
        tokens
            .iter()
            .map(|t| format!("'{}'", t))
            .collect::<Vec<_>>()
            .join(" | "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_plurals_and_verb_forms() {
        assert_eq!(stem("websockets"), "websocket");
        assert_eq!(stem("redis"), "redi");
        assert_eq!(stem("classes"), "class");
        assert_eq!(stem("indexed"), "index");
        assert_eq!(stem("building"), "build");
        // No vowel left after stripping: keep the word intact.
        assert_eq!(stem("string"), "string");
        assert_eq!(stem("less"), "less");
        assert_eq!(stem("app"), "app");
    }

    #[test]
    fn tokenize_splits_lowercases_and_drops_stop_words() {
        assert_eq!(tokenize("A real-time chat tool"), vec!["real", "time", "chat", "tool"]);
        assert_eq!(tokenize("websockets, redis"), vec!["websocket", "redi"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("the of and").is_empty());
    }

    #[test]
    fn build_assigns_weight_tiers_per_field() {
        let vector = SearchVector::build(
            "Chat App",
            "A real-time chat tool",
            "websockets, redis",
        );

        assert_eq!(vector.weight_of("chat"), Some(Weight::A));
        assert_eq!(vector.weight_of("app"), Some(Weight::A));
        assert_eq!(vector.weight_of("real"), Some(Weight::B));
        assert_eq!(vector.weight_of("time"), Some(Weight::B));
        assert_eq!(vector.weight_of("tool"), Some(Weight::B));
        assert_eq!(vector.weight_of("websocket"), Some(Weight::C));
        assert_eq!(vector.weight_of("redi"), Some(Weight::C));
        assert_eq!(vector.weight_of("dashboard"), None);
    }

    #[test]
    fn title_tier_wins_when_a_lexeme_repeats() {
        // "chat" appears in both title (A) and description (B).
        let vector = SearchVector::build("Chat App", "A real-time chat tool", "");
        assert_eq!(vector.weight_of("chat"), Some(Weight::A));
    }

    #[test]
    fn build_is_deterministic() {
        let a = SearchVector::build("Chat App", "A real-time chat tool", "websockets, redis");
        let b = SearchVector::build("Chat App", "A real-time chat tool", "websockets, redis");
        assert_eq!(a, b);
        assert_eq!(a.to_tsvector(), b.to_tsvector());
    }

    #[test]
    fn empty_fields_produce_an_empty_vector() {
        let vector = SearchVector::build("", "", "");
        assert!(vector.is_empty());
        assert_eq!(vector.to_tsvector(), "");
    }

    #[test]
    fn tsvector_literal_is_sorted_with_positions() {
        let vector = SearchVector::build("Chat App", "", "");
        assert_eq!(vector.to_tsvector(), "'app':2A 'chat':1A");

        let repeated = SearchVector::build("Chat", "chat", "");
        assert_eq!(repeated.to_tsvector(), "'chat':1A,2B");
    }

    #[test]
    fn tsquery_ors_the_stemmed_terms() {
        assert_eq!(to_tsquery("chat apps"), Some("'chat' | 'app'".to_string()));
        assert_eq!(to_tsquery("the of"), None);
        assert_eq!(to_tsquery(""), None);
    }
}
