//! Spelling out decimal digit strings as English cardinal numbers.
//!
//! ```
//! use reeltag::analysis::english::numerals::number_to_words;
//!
//! assert_eq!(number_to_words("2020"), "two thousand and twenty");
//! assert_eq!(number_to_words("42"), "forty-two");
//! ```

const UNITS: [&str; 10] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

const TEENS: [&str; 10] = [
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 12] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
    "sextillion",
    "septillion",
    "octillion",
    "nonillion",
    "decillion",
];

const DIGITS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Whether `word` is a non-empty run of ASCII decimal digits.
pub fn is_numeral(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit())
}

/// Spell a digit string as English words, without grouping commas.
///
/// Groups of three digits are read with scale words up to "decillion".
/// A final single-word group after a larger one is joined with "and"
/// ("one thousand and one"). Leading zeros are ignored and an all-zero
/// string reads "zero". Strings too long for the largest scale are read
/// digit by digit. Input that is not a digit string is returned unchanged.
pub fn number_to_words(digits: &str) -> String {
    if !is_numeral(digits) {
        return digits.to_string();
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return DIGITS[0].to_string();
    }
    if significant.len() > SCALES.len() * 3 {
        return significant
            .bytes()
            .map(|b| DIGITS[(b - b'0') as usize])
            .collect::<Vec<_>>()
            .join(" ");
    }

    let values: Vec<usize> = significant.bytes().map(|b| (b - b'0') as usize).collect();

    // Split into three-digit groups, most significant first.
    let lead = values.len() % 3;
    let mut groups: Vec<&[usize]> = Vec::new();
    if lead > 0 {
        groups.push(&values[..lead]);
    }
    groups.extend(values[lead..].chunks(3));

    let mut segments = Vec::new();
    let top_scale = groups.len() - 1;
    for (i, group) in groups.iter().enumerate() {
        let (hundreds, tens, units) = match group.len() {
            3 => (group[0], group[1], group[2]),
            2 => (0, group[0], group[1]),
            _ => (0, 0, group[0]),
        };
        if let Some(words) = spell_group(hundreds, tens, units) {
            let scale = SCALES[top_scale - i];
            if scale.is_empty() {
                segments.push(words);
            } else {
                segments.push(format!("{words} {scale}"));
            }
        }
    }

    match segments.len() {
        0 => DIGITS[0].to_string(),
        1 => segments.remove(0),
        n => {
            let last = &segments[n - 1];
            if last.contains(' ') {
                segments.join(" ")
            } else {
                format!("{} and {}", segments[..n - 1].join(" "), last)
            }
        }
    }
}

fn spell_group(hundreds: usize, tens: usize, units: usize) -> Option<String> {
    let rest = spell_tens(tens, units);
    if hundreds > 0 {
        let head = format!("{} hundred", UNITS[hundreds]);
        return Some(match rest {
            Some(rest) => format!("{head} and {rest}"),
            None => head,
        });
    }
    rest
}

fn spell_tens(tens: usize, units: usize) -> Option<String> {
    match (tens, units) {
        (0, 0) => None,
        (0, u) => Some(UNITS[u].to_string()),
        (1, u) => Some(TEENS[u].to_string()),
        (t, 0) => Some(TENS[t].to_string()),
        (t, u) => Some(format!("{}-{}", TENS[t], UNITS[u])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers() {
        let input = ["1", "2", "3", "10", "2020", "42", "9000"];
        let expected = [
            "one",
            "two",
            "three",
            "ten",
            "two thousand and twenty",
            "forty-two",
            "nine thousand",
        ];
        for (digits, words) in input.iter().zip(expected) {
            assert_eq!(number_to_words(digits), words);
        }
    }

    #[test]
    fn test_hundreds() {
        assert_eq!(number_to_words("100"), "one hundred");
        assert_eq!(number_to_words("101"), "one hundred and one");
        assert_eq!(number_to_words("115"), "one hundred and fifteen");
        assert_eq!(number_to_words("999"), "nine hundred and ninety-nine");
    }

    #[test]
    fn test_multiple_groups() {
        assert_eq!(number_to_words("1001"), "one thousand and one");
        assert_eq!(number_to_words("1100"), "one thousand one hundred");
        assert_eq!(
            number_to_words("123456"),
            "one hundred and twenty-three thousand four hundred and fifty-six"
        );
        assert_eq!(number_to_words("1000000"), "one million");
        assert_eq!(number_to_words("2000042"), "two million and forty-two");
        assert_eq!(number_to_words("1984"), "one thousand nine hundred and eighty-four");
    }

    #[test]
    fn test_zeros() {
        assert_eq!(number_to_words("0"), "zero");
        assert_eq!(number_to_words("000"), "zero");
        assert_eq!(number_to_words("007"), "seven");
    }

    #[test]
    fn test_overlong_reads_digits() {
        let digits = "1".repeat(37);
        let words = number_to_words(&digits);
        assert_eq!(words.split(' ').count(), 37);
        assert!(words.split(' ').all(|w| w == "one"));
    }

    #[test]
    fn test_never_contains_commas() {
        for digits in ["1", "1000", "1234567", "987654321012"] {
            assert!(!number_to_words(digits).contains(','));
        }
    }

    #[test]
    fn test_non_numerals_pass_through() {
        assert!(!is_numeral(""));
        assert!(!is_numeral("12a"));
        assert_eq!(number_to_words("bond007"), "bond007");
    }
}
