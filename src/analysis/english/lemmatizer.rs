//! Dictionary-free English lemmatizer.
//!
//! Lemmas are found in two stages, in the spirit of WordNet's morphy: an
//! exception table for irregular forms, then part-of-speech specific suffix
//! detachment. Without a dictionary to validate candidates, detached verb and
//! adjective stems are repaired with the Porter step 1b rules (restore a
//! trailing `e`, undouble a final consonant).

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::analysis::token::PartOfSpeech;

/// Irregular verb forms and their base form.
pub(crate) const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("am", "be"),
    ("are", "be"),
    ("is", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("doing", "do"),
    ("went", "go"),
    ("gone", "go"),
    ("goes", "go"),
    ("ate", "eat"),
    ("eaten", "eat"),
    ("began", "begin"),
    ("begun", "begin"),
    ("became", "become"),
    ("bit", "bite"),
    ("bitten", "bite"),
    ("bled", "bleed"),
    ("bred", "breed"),
    ("broke", "break"),
    ("broken", "break"),
    ("brought", "bring"),
    ("built", "build"),
    ("bought", "buy"),
    ("came", "come"),
    ("caught", "catch"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("clung", "cling"),
    ("crept", "creep"),
    ("dealt", "deal"),
    ("drew", "draw"),
    ("drawn", "draw"),
    ("dreamt", "dream"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("dug", "dig"),
    ("died", "die"),
    ("dies", "die"),
    ("dying", "die"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("fed", "feed"),
    ("felt", "feel"),
    ("fought", "fight"),
    ("found", "find"),
    ("fled", "flee"),
    ("flew", "fly"),
    ("flown", "fly"),
    ("forgot", "forget"),
    ("forgotten", "forget"),
    ("froze", "freeze"),
    ("frozen", "freeze"),
    ("gave", "give"),
    ("given", "give"),
    ("got", "get"),
    ("gotten", "get"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("heard", "hear"),
    ("held", "hold"),
    ("hid", "hide"),
    ("hidden", "hide"),
    ("hung", "hang"),
    ("kept", "keep"),
    ("knelt", "kneel"),
    ("knew", "know"),
    ("known", "know"),
    ("laid", "lay"),
    ("lain", "lie"),
    ("learnt", "learn"),
    ("led", "lead"),
    ("left", "leave"),
    ("lost", "lose"),
    ("lied", "lie"),
    ("lies", "lie"),
    ("lying", "lie"),
    ("made", "make"),
    ("meant", "mean"),
    ("met", "meet"),
    ("mistook", "mistake"),
    ("overcame", "overcome"),
    ("paid", "pay"),
    ("ran", "run"),
    ("rode", "ride"),
    ("ridden", "ride"),
    ("rose", "rise"),
    ("risen", "rise"),
    ("said", "say"),
    ("sang", "sing"),
    ("sung", "sing"),
    ("sank", "sink"),
    ("sunk", "sink"),
    ("sat", "sit"),
    ("saw", "see"),
    ("seen", "see"),
    ("sought", "seek"),
    ("sent", "send"),
    ("shook", "shake"),
    ("shaken", "shake"),
    ("shot", "shoot"),
    ("slept", "sleep"),
    ("slid", "slide"),
    ("sold", "sell"),
    ("spent", "spend"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("spun", "spin"),
    ("stood", "stand"),
    ("stole", "steal"),
    ("stolen", "steal"),
    ("strove", "strive"),
    ("struck", "strike"),
    ("swam", "swim"),
    ("swore", "swear"),
    ("sworn", "swear"),
    ("taught", "teach"),
    ("took", "take"),
    ("taken", "take"),
    ("thought", "think"),
    ("threw", "throw"),
    ("thrown", "throw"),
    ("told", "tell"),
    ("tore", "tear"),
    ("torn", "tear"),
    ("tied", "tie"),
    ("ties", "tie"),
    ("tying", "tie"),
    ("understood", "understand"),
    ("undertook", "undertake"),
    ("used", "use"),
    ("caused", "cause"),
    ("wept", "weep"),
    ("withdrew", "withdraw"),
    ("woke", "wake"),
    ("woken", "wake"),
    ("wore", "wear"),
    ("worn", "wear"),
    ("wrote", "write"),
    ("written", "write"),
];

const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("oxen", "ox"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("wolves", "wolf"),
    ("thieves", "thief"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("selves", "self"),
    ("elves", "elf"),
    ("shelves", "shelf"),
    ("heroes", "hero"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("data", "datum"),
];

const IRREGULAR_ADJECTIVES: &[(&str, &str)] = &[
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
    ("farther", "far"),
    ("farthest", "far"),
    ("elder", "old"),
    ("eldest", "old"),
];

const IRREGULAR_ADVERBS: &[(&str, &str)] = &[
    ("better", "well"),
    ("best", "well"),
    ("further", "far"),
    ("furthest", "far"),
];

/// Nouns whose singular ends in "ie" and would be mangled by the `ies -> y` rule.
const IE_NOUNS: &[&str] = &[
    "auntie", "bookie", "brownie", "calorie", "cookie", "die", "genie", "goalie", "groupie",
    "hippie", "hoodie", "lie", "movie", "newbie", "pie", "prairie", "rookie", "selfie",
    "smoothie", "sweetie", "tie", "yuppie", "zombie",
];

/// Nouns that end in "s" in their base form.
const INVARIANT_NOUNS: &[&str] = &[
    "atlas", "bus", "canvas", "chaos", "gas", "lens", "mathematics", "means", "news",
    "physics", "politics", "series", "species", "thanks",
];

struct Exceptions {
    verbs: HashMap<&'static str, &'static str>,
    nouns: HashMap<&'static str, &'static str>,
    adjectives: HashMap<&'static str, &'static str>,
    adverbs: HashMap<&'static str, &'static str>,
    ie_nouns: HashSet<&'static str>,
    invariant_nouns: HashSet<&'static str>,
}

static EXCEPTIONS: LazyLock<Exceptions> = LazyLock::new(|| Exceptions {
    verbs: IRREGULAR_VERBS.iter().copied().collect(),
    nouns: IRREGULAR_NOUNS.iter().copied().collect(),
    adjectives: IRREGULAR_ADJECTIVES.iter().copied().collect(),
    adverbs: IRREGULAR_ADVERBS.iter().copied().collect(),
    ie_nouns: IE_NOUNS.iter().copied().collect(),
    invariant_nouns: INVARIANT_NOUNS.iter().copied().collect(),
});

/// Reduces inflected English words to their dictionary form.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lemmatizer;

impl Lemmatizer {
    pub fn new() -> Self {
        Lemmatizer
    }

    /// Lemmatize a lower-case word for the given part of speech.
    pub fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String {
        if !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return word.to_string();
        }

        match pos {
            PartOfSpeech::Verb => self.lemmatize_verb(word),
            PartOfSpeech::Noun => self.lemmatize_noun(word),
            PartOfSpeech::Adjective => self.lemmatize_adjective(word),
            PartOfSpeech::Adverb => EXCEPTIONS
                .adverbs
                .get(word)
                .map_or_else(|| word.to_string(), |lemma| lemma.to_string()),
        }
    }

    fn lemmatize_verb(&self, word: &str) -> String {
        if let Some(lemma) = EXCEPTIONS.verbs.get(word) {
            return lemma.to_string();
        }
        if word.len() < 3 {
            return word.to_string();
        }

        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{stem}y");
        }
        for suffix in ["sses", "ches", "shes", "xes", "zes", "oes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }
        if let Some(stem) = word.strip_suffix("ied") {
            return format!("{stem}y");
        }
        if let Some(stem) = word.strip_suffix("eed") {
            if measure(stem) > 0 {
                return format!("{stem}ee");
            }
            return word.to_string();
        }
        for suffix in ["ing", "ed"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                if contains_vowel(stem) {
                    return repair_stem(stem);
                }
                return word.to_string();
            }
        }
        if word.ends_with('s') && !word.ends_with("ss") {
            return word[..word.len() - 1].to_string();
        }
        word.to_string()
    }

    fn lemmatize_noun(&self, word: &str) -> String {
        if let Some(lemma) = EXCEPTIONS.nouns.get(word) {
            return lemma.to_string();
        }
        // compounds such as "policemen" and "firemen"
        if let Some(stem) = word.strip_suffix("men").filter(|stem| stem.len() >= 4) {
            return format!("{stem}man");
        }
        if word.len() < 3 || EXCEPTIONS.invariant_nouns.contains(word) || !word.ends_with('s') {
            return word.to_string();
        }

        let singular = &word[..word.len() - 1];
        if EXCEPTIONS.ie_nouns.contains(singular) {
            return singular.to_string();
        }
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{stem}y");
        }
        if word.ends_with("sses") {
            return word[..word.len() - 2].to_string();
        }
        for suffix in ["ches", "shes", "xes", "zes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }
        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return word.to_string();
        }
        singular.to_string()
    }

    fn lemmatize_adjective(&self, word: &str) -> String {
        if let Some(lemma) = EXCEPTIONS.adjectives.get(word) {
            return lemma.to_string();
        }
        if word.len() < 3 {
            return word.to_string();
        }
        for (comparative, base) in [("iest", "y"), ("ier", "y")] {
            if let Some(stem) = word.strip_suffix(comparative) {
                return format!("{stem}{base}");
            }
        }
        for suffix in ["est", "er"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.len() >= 2 && contains_vowel(stem) {
                    return repair_stem(stem);
                }
            }
        }
        word.to_string()
    }
}

/// Porter step 1b clean-up applied after removing "ed"/"ing"/"er"/"est".
fn repair_stem(stem: &str) -> String {
    if stem.ends_with("at") || stem.ends_with("bl") || stem.ends_with("iz") {
        return format!("{stem}e");
    }
    if ends_with_double_consonant(stem) && !matches!(stem.as_bytes()[stem.len() - 1], b'l' | b's' | b'z')
    {
        return stem[..stem.len() - 1].to_string();
    }
    if measure(stem) == 1 && ends_cvc(stem) {
        return format!("{stem}e");
    }
    stem.to_string()
}

fn is_vowel(bytes: &[u8], i: usize) -> bool {
    match bytes[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => true,
        b'y' => i > 0 && !is_vowel(bytes, i - 1),
        _ => false,
    }
}

fn contains_vowel(word: &str) -> bool {
    let bytes = word.as_bytes();
    (0..bytes.len()).any(|i| is_vowel(bytes, i))
}

/// Number of vowel-consonant sequences in the word.
fn measure(word: &str) -> usize {
    let bytes = word.as_bytes();
    let n = bytes.len();
    let mut m = 0;
    let mut i = 0;

    while i < n && !is_vowel(bytes, i) {
        i += 1;
    }
    while i < n {
        while i < n && is_vowel(bytes, i) {
            i += 1;
        }
        if i >= n {
            break;
        }
        m += 1;
        while i < n && !is_vowel(bytes, i) {
            i += 1;
        }
    }
    m
}

fn ends_with_double_consonant(word: &str) -> bool {
    let bytes = word.as_bytes();
    let n = bytes.len();
    n >= 2 && bytes[n - 1] == bytes[n - 2] && !is_vowel(bytes, n - 1)
}

fn ends_cvc(word: &str) -> bool {
    let bytes = word.as_bytes();
    let n = bytes.len();
    n >= 3
        && !is_vowel(bytes, n - 3)
        && is_vowel(bytes, n - 2)
        && !is_vowel(bytes, n - 1)
        && !matches!(bytes[n - 1], b'w' | b'x' | b'y')
}
