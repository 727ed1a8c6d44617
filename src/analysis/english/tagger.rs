//! Rule-based coarse part-of-speech tagging for single English words.
//!
//! Each word is tagged in isolation: closed lexicons first, then suffix
//! heuristics, falling back to [`PartOfSpeech::Noun`].

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::analysis::english::lemmatizer::IRREGULAR_VERBS;
use crate::analysis::token::PartOfSpeech;

const BASE_ADJECTIVES: &[&str] = &[
    "bad", "big", "bitter", "black", "bold", "brave", "bright", "brief", "broad", "busy",
    "calm", "cheap", "clean", "clear", "clever", "close", "cold", "cool", "crazy", "cruel",
    "cute", "dark", "dead", "deep", "dirty", "dry", "dull", "early", "easy", "evil", "faint",
    "fair", "far", "fast", "fat", "fierce", "fine", "firm", "free", "fresh", "full", "funny",
    "gentle", "good", "grand", "great", "green", "happy", "hard", "harsh", "heavy", "high",
    "hot", "huge", "kind", "large", "late", "lazy", "light", "little", "lonely", "long",
    "loud", "lovely", "low", "lucky", "mad", "mean", "mild", "narrow", "near", "new", "nice",
    "noble", "odd", "old", "pale", "poor", "proud", "pure", "quick", "quiet", "rare", "rich",
    "rough", "rude", "sad", "safe", "scary", "sharp", "short", "shy", "sick", "simple", "slow",
    "small", "smart", "soft", "strange", "strict", "strong", "sweet", "tall", "thick", "thin",
    "tight", "tiny", "tough", "ugly", "warm", "weak", "weird", "wet", "white", "wide", "wild",
    "wise", "young",
];

/// Words with verb-like or adverb-like endings that are nearly always nouns.
const NOUNS: &[&str] = &[
    "anything", "ally", "assembly", "belly", "bully", "butterfly", "ceiling", "darling",
    "evening", "everything", "family", "firefly", "hundred", "italy", "jelly", "king",
    "lily", "monopoly", "morning", "nothing", "offspring", "rally", "reply", "ring",
    "sibling", "something", "spring", "sting", "string", "supply", "swing", "thing", "wedding",
    "wing",
];

/// "-ly" words that are adjectives rather than adverbs.
const LY_ADJECTIVES: &[&str] = &[
    "costly", "cowardly", "curly", "deadly", "early", "elderly", "friendly", "ghostly",
    "holy", "jolly", "likely", "lively", "lonely", "lovely", "manly", "motherly", "orderly",
    "silly", "ugly", "unlikely",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ish", "ic", "ical",
];

struct Lexicon {
    verbs: HashSet<&'static str>,
    adjectives: HashSet<&'static str>,
    nouns: HashSet<&'static str>,
    ly_adjectives: HashSet<&'static str>,
}

static LEXICON: LazyLock<Lexicon> = LazyLock::new(|| Lexicon {
    verbs: IRREGULAR_VERBS.iter().map(|(form, _)| *form).collect(),
    adjectives: BASE_ADJECTIVES.iter().copied().collect(),
    nouns: NOUNS.iter().copied().collect(),
    ly_adjectives: LY_ADJECTIVES.iter().copied().collect(),
});

/// Assigns a coarse part of speech to a lower-case word.
#[derive(Clone, Copy, Debug, Default)]
pub struct PosTagger;

impl PosTagger {
    pub fn new() -> Self {
        PosTagger
    }

    /// Tag a single lower-case word.
    pub fn tag(&self, word: &str) -> PartOfSpeech {
        let lexicon = &*LEXICON;

        if lexicon.nouns.contains(word) {
            return PartOfSpeech::Noun;
        }
        if lexicon.verbs.contains(word) {
            return PartOfSpeech::Verb;
        }
        if lexicon.adjectives.contains(word)
            || lexicon.ly_adjectives.contains(word)
            || self.is_graded_adjective(word)
        {
            return PartOfSpeech::Adjective;
        }
        if word.len() > 4 && word.ends_with("ly") {
            return PartOfSpeech::Adverb;
        }
        if (word.len() > 4 && word.ends_with("ing")) || (word.len() > 3 && word.ends_with("ed")) {
            return PartOfSpeech::Verb;
        }
        if word.len() > 4
            && ADJECTIVE_SUFFIXES
                .iter()
                .any(|suffix| word.ends_with(suffix))
        {
            return PartOfSpeech::Adjective;
        }

        PartOfSpeech::Noun
    }

    /// Comparative and superlative forms of a known adjective ("bigger", "happiest").
    fn is_graded_adjective(&self, word: &str) -> bool {
        if !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return false;
        }
        let adjectives = &LEXICON.adjectives;
        for suffix in ["est", "er"] {
            let Some(stem) = word.strip_suffix(suffix) else {
                continue;
            };
            if stem.is_empty() {
                return false;
            }

            let mut candidates = vec![stem.to_string(), format!("{stem}e")];
            if let Some(base) = stem.strip_suffix('i') {
                candidates.push(format!("{base}y"));
            }
            let bytes = stem.as_bytes();
            if bytes.len() >= 2 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2] {
                candidates.push(stem[..stem.len() - 1].to_string());
            }

            return candidates.iter().any(|c| adjectives.contains(c.as_str()));
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbs() {
        let tagger = PosTagger::new();
        for word in ["cooking", "went", "was", "has", "going", "killed", "fought"] {
            assert_eq!(tagger.tag(word), PartOfSpeech::Verb, "{word}");
        }
    }

    #[test]
    fn test_adjectives() {
        let tagger = PosTagger::new();
        for word in [
            "dark", "darker", "bigger", "happiest", "nicer", "mysterious", "lonely", "dangerous",
        ] {
            assert_eq!(tagger.tag(word), PartOfSpeech::Adjective, "{word}");
        }
    }

    #[test]
    fn test_adverbs() {
        let tagger = PosTagger::new();
        assert_eq!(tagger.tag("quickly"), PartOfSpeech::Adverb);
        assert_eq!(tagger.tag("suddenly"), PartOfSpeech::Adverb);
    }

    #[test]
    fn test_nouns_default() {
        let tagger = PosTagger::new();
        for word in ["studies", "thing", "morning", "family", "killer", "agent", "bond"] {
            assert_eq!(tagger.tag(word), PartOfSpeech::Noun, "{word}");
        }
    }

    #[test]
    fn test_non_ascii_graded_forms() {
        let tagger = PosTagger::new();
        // the stem "x\u{2082}" ends in two equal UTF-8 continuation bytes
        assert_eq!(tagger.tag("x\u{2082}er"), PartOfSpeech::Noun);
        assert_eq!(tagger.tag("x\u{2082}est"), PartOfSpeech::Noun);
        assert_eq!(tagger.tag("Bigger"), PartOfSpeech::Noun);
    }
}
