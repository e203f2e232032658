//! Noun lemmatization
//!
//! A rule-based reduction of plural nouns to their singular form: a table
//! of irregular plurals, a list of words that look plural but are not, and
//! suffix rules for regular plurals. Words that are not plural come back
//! unchanged.

use std::collections::HashMap;
use std::sync::LazyLock;

static IRREGULAR: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("people", "person"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("lice", "louse"),
        ("oxen", "ox"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("data", "datum"),
        ("bacteria", "bacterium"),
        ("media", "medium"),
        ("curricula", "curriculum"),
        ("analyses", "analysis"),
        ("hypotheses", "hypothesis"),
        ("theses", "thesis"),
        ("crises", "crisis"),
        ("diagnoses", "diagnosis"),
        ("axes", "axis"),
        ("indices", "index"),
        ("matrices", "matrix"),
        ("vertices", "vertex"),
        ("appendices", "appendix"),
        ("nuclei", "nucleus"),
        ("fungi", "fungus"),
        ("stimuli", "stimulus"),
        ("radii", "radius"),
        ("alumni", "alumnus"),
        ("formulae", "formula"),
        ("larvae", "larva"),
        ("algae", "alga"),
        ("leaves", "leaf"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("halves", "half"),
        ("selves", "self"),
        ("shelves", "shelf"),
        ("wolves", "wolf"),
        ("calves", "calf"),
        ("thieves", "thief"),
        ("loaves", "loaf"),
        ("potatoes", "potato"),
        ("tomatoes", "tomato"),
        ("heroes", "hero"),
        ("echoes", "echo"),
        ("caches", "cache"),
        ("niches", "niche"),
        ("quizzes", "quiz"),
    ])
});

static INVARIANT: &[&str] = &[
    "species", "series", "news", "means", "physics", "mathematics", "economics", "genetics",
    "statistics", "ethics", "politics", "linguistics", "electronics", "mechanics", "optics",
    "thermodynamics", "aerodynamics", "sheep", "fish", "deer", "aircraft", "lens", "gas",
    "bus", "yes", "always", "perhaps", "sometimes", "whereas", "towards", "afterwards",
    "bias", "chaos", "atlas", "alias", "canvas", "pancreas", "cosmos", "ethos", "pathos",
    "kinetics", "kinematics", "dynamics", "acoustics", "semantics", "phonetics", "genomics",
    "logistics", "athletics", "gymnastics", "aesthetics", "graphics", "diabetes", "measles",
    "rabies", "herpes", "mumps",
];

/// Reduces plural nouns to singular
#[derive(Debug, Default, Clone, Copy)]
pub struct Lemmatizer;

impl Lemmatizer {
    /// Create a lemmatizer
    pub fn new() -> Self {
        Self
    }

    /// Lemma of a lowercase word
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = IRREGULAR.get(word) {
            return (*lemma).to_string();
        }
        if INVARIANT.contains(&word) || word.chars().count() <= 3 {
            return word.to_string();
        }
        if ["ss", "us", "is"].iter().any(|suffix| word.ends_with(suffix)) {
            return word.to_string();
        }

        if let Some(stem) = word.strip_suffix("ies") {
            if word.chars().count() > 4 {
                return format!("{stem}y");
            }
        }
        for suffix in ["sses", "ches", "shes", "xes", "zes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }
        match word.strip_suffix('s') {
            Some(stem) => stem.to_string(),
            None => word.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str) -> String {
        Lemmatizer::new().lemmatize(word)
    }

    #[test]
    fn test_regular_plurals() {
        assert_eq!(lemma("plants"), "plant");
        assert_eq!(lemma("cells"), "cell");
        assert_eq!(lemma("enzymes"), "enzyme");
    }

    #[test]
    fn test_singulars_ending_in_s() {
        for word in ["bias", "chaos", "kinetics", "atlas", "pancreas", "rabies", "diabetes"] {
            assert_eq!(lemma(word), word);
        }
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(lemma("studies"), "study");
        assert_eq!(lemma("classes"), "class");
        assert_eq!(lemma("branches"), "branch");
        assert_eq!(lemma("bushes"), "bush");
        assert_eq!(lemma("boxes"), "box");
    }

    #[test]
    fn test_irregular_plurals() {
        assert_eq!(lemma("children"), "child");
        assert_eq!(lemma("mitochondria"), "mitochondria");
        assert_eq!(lemma("phenomena"), "phenomenon");
        assert_eq!(lemma("leaves"), "leaf");
        assert_eq!(lemma("analyses"), "analysis");
    }

    #[test]
    fn test_non_plurals_unchanged() {
        assert_eq!(lemma("photosynthesis"), "photosynthesis");
        assert_eq!(lemma("glass"), "glass");
        assert_eq!(lemma("virus"), "virus");
        assert_eq!(lemma("species"), "species");
        assert_eq!(lemma("light"), "light");
        assert_eq!(lemma("gas"), "gas");
        assert_eq!(lemma("ties"), "tie");
    }

    #[test]
    fn test_short_words_unchanged() {
        assert_eq!(lemma("has"), "has");
        assert_eq!(lemma("dna"), "dna");
    }
}
