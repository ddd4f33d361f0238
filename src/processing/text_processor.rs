//! Text normalization and tokenization for the vector space

use regex::Regex;
use std::collections::HashSet;

/// Standard English stop-word list excluded from every vocabulary
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against",
    "all", "almost", "alone", "along", "already", "also", "although", "always",
    "am", "among", "amongst", "amoungst", "amount", "an", "and", "another",
    "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being",
    "below", "beside", "besides", "between", "beyond", "bill", "both",
    "bottom", "but", "by", "call", "can", "cannot", "cant", "co", "con",
    "could", "couldnt", "cry", "de", "describe", "detail", "do", "done",
    "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone",
    "everything", "everywhere", "except", "few", "fifteen", "fifty", "fill",
    "find", "fire", "first", "five", "for", "former", "formerly", "forty",
    "found", "four", "from", "front", "full", "further", "get", "give", "go",
    "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter",
    "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed",
    "interest", "into", "is", "it", "its", "itself", "keep", "last", "latter",
    "latterly", "least", "less", "ltd", "made", "many", "may", "me",
    "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
    "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone",
    "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on",
    "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our",
    "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps",
    "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side",
    "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such",
    "system", "take", "ten", "than", "that", "the", "their", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
    "third", "this", "those", "though", "three", "through", "throughout",
    "thru", "thus", "to", "together", "too", "top", "toward", "towards",
    "twelve", "twenty", "two", "un", "under", "until", "up", "upon", "us",
    "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby",
    "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
    "who", "whoever", "whole", "whom", "whose", "why", "will", "with",
    "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Applies the preprocessing contract and splits text into n-gram terms
pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    url_regex: Regex,
    email_regex: Regex,
    phone_regex: Regex,
    punctuation_regex: Regex,
    token_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let url_regex = Regex::new(r"http\S+|www\S+|https\S+")
            .expect("Invalid URL regex");

        let email_regex = Regex::new(r"\S+@\S+")
            .expect("Invalid email regex");

        let phone_regex = Regex::new(r"\+?\d[\d\s\-\(\)]+\d")
            .expect("Invalid phone regex");

        let punctuation_regex = Regex::new(r"[^\w\s]")
            .expect("Invalid punctuation regex");

        let token_regex = Regex::new(r"\b\w\w+\b")
            .expect("Invalid token regex");

        Self {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
            url_regex,
            email_regex,
            phone_regex,
            punctuation_regex,
            token_regex,
        }
    }

    /// Normalize raw text before vectorization.
    ///
    /// Lowercases, strips URLs, email addresses and phone-shaped digit runs,
    /// blanks out punctuation and collapses whitespace. Stripped spans become
    /// a space so that neighbouring words are never glued together, and the
    /// digit-run strip runs again once punctuation is gone so that runs such
    /// as `1.2` cannot survive one pass only to disappear on the next.
    pub fn preprocess(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let mut cleaned = text.to_lowercase();
        cleaned = self.url_regex.replace_all(&cleaned, " ").into_owned();
        cleaned = self.email_regex.replace_all(&cleaned, " ").into_owned();
        cleaned = self.phone_regex.replace_all(&cleaned, " ").into_owned();
        cleaned = self.punctuation_regex.replace_all(&cleaned, " ").into_owned();
        cleaned = self.phone_regex.replace_all(&cleaned, " ").into_owned();

        cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Word tokens of two or more characters, stop words removed
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.token_regex
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(token))
            .map(str::to_string)
            .collect()
    }

    /// All n-grams with `min_n <= n <= max_n`, joined by a single space
    pub fn ngrams(&self, text: &str, min_n: usize, max_n: usize) -> Vec<String> {
        let tokens = self.tokenize(text);
        let mut terms = Vec::new();

        for n in min_n.max(1)..=max_n {
            if n > tokens.len() {
                break;
            }
            if n == 1 {
                terms.extend(tokens.iter().cloned());
            } else {
                terms.extend(tokens.windows(n).map(|window| window.join(" ")));
            }
        }

        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_strips_contact_details() {
        let processor = TextProcessor::new();
        let text = "Contact me at john@email.com or call +1-555-1234.\nVisit https://johndoe.com\nI have 5+ years of experience!!!";

        let cleaned = processor.preprocess(text);

        assert!(!cleaned.contains("john"));
        assert!(!cleaned.contains("555"));
        assert!(!cleaned.contains("johndoe"));
        assert!(cleaned.contains("years of experience"));
        assert!(!cleaned.contains('!'));
        assert!(!cleaned.contains("  "));
    }

    #[test]
    fn test_preprocess_is_idempotent() {
        let processor = TextProcessor::new();
        let samples = [
            "Senior Rust Engineer (5+ yrs) - www.example.org/jobs",
            "Version 1.2.3 released; call (555) 123-4567 x 89",
            "a1 2b, foo@bar baz@ qux",
            "   \t\n ",
            "C++/C#, Node.js & scikit-learn",
        ];

        for sample in samples {
            let once = processor.preprocess(sample);
            assert_eq!(processor.preprocess(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("the python developer is a x expert");

        assert_eq!(tokens, vec!["python", "developer", "expert"]);
    }

    #[test]
    fn test_bigrams_skip_removed_stop_words() {
        let processor = TextProcessor::new();
        let terms = processor.ngrams("machine learning and deep learning", 1, 2);

        assert!(terms.contains(&"machine learning".to_string()));
        assert!(terms.contains(&"learning deep".to_string()));
        assert!(terms.contains(&"deep learning".to_string()));
        assert_eq!(terms.iter().filter(|t| t.as_str() == "learning").count(), 2);
    }
}
