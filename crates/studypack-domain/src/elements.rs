//! Structured study elements

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io;

/// The five-field structured summary of study material
///
/// Produced per chunk by the element extractor and merged per document by the
/// aggregator. `questions[i]` corresponds to `answers[i]` only when both came
/// from the same chunk; after merging, the pairing is positional and may drift.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyElements {
    /// Important terms
    #[serde(default)]
    pub terms: Vec<String>,

    /// Definitions, often of the form `Term: definition`
    #[serde(default)]
    pub definitions: Vec<String>,

    /// Concrete examples
    #[serde(default)]
    pub examples: Vec<String>,

    /// Questions from quizzes and practice problems
    #[serde(default)]
    pub questions: Vec<String>,

    /// Answers, positionally matching `questions`
    #[serde(default)]
    pub answers: Vec<String>,
}

/// Names one of the five fields of [`StudyElements`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementField {
    /// `terms`
    Terms,
    /// `definitions`
    Definitions,
    /// `examples`
    Examples,
    /// `questions`
    Questions,
    /// `answers`
    Answers,
}

impl ElementField {
    /// All fields, in artifact JSON order
    pub const ALL: [ElementField; 5] = [
        ElementField::Terms,
        ElementField::Definitions,
        ElementField::Examples,
        ElementField::Questions,
        ElementField::Answers,
    ];

    /// JSON key of the field
    pub fn key(&self) -> &'static str {
        match self {
            ElementField::Terms => "terms",
            ElementField::Definitions => "definitions",
            ElementField::Examples => "examples",
            ElementField::Questions => "questions",
            ElementField::Answers => "answers",
        }
    }
}

impl StudyElements {
    /// All-empty elements
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every field is empty
    pub fn is_empty(&self) -> bool {
        ElementField::ALL.iter().all(|f| self.field(*f).is_empty())
    }

    /// Total number of items across all fields
    pub fn len(&self) -> usize {
        ElementField::ALL.iter().map(|f| self.field(*f).len()).sum()
    }

    /// Borrow one field
    pub fn field(&self, field: ElementField) -> &Vec<String> {
        match field {
            ElementField::Terms => &self.terms,
            ElementField::Definitions => &self.definitions,
            ElementField::Examples => &self.examples,
            ElementField::Questions => &self.questions,
            ElementField::Answers => &self.answers,
        }
    }

    /// Mutably borrow one field
    pub fn field_mut(&mut self, field: ElementField) -> &mut Vec<String> {
        match field {
            ElementField::Terms => &mut self.terms,
            ElementField::Definitions => &mut self.definitions,
            ElementField::Examples => &mut self.examples,
            ElementField::Questions => &mut self.questions,
            ElementField::Answers => &mut self.answers,
        }
    }

    /// Build elements from a loosely shaped JSON object
    ///
    /// Missing keys and values that are not arrays give empty fields. Array
    /// items that are not strings are kept as text rather than dropped.
    pub fn from_json_object(obj: &Map<String, Value>) -> Self {
        let mut elements = Self::new();
        for field in ElementField::ALL {
            if let Some(Value::Array(items)) = obj.get(field.key()) {
                *elements.field_mut(field) = items.iter().map(item_to_string).collect();
            }
        }
        elements
    }
}

/// Text form of a list item as the original extraction service stored it:
/// strings as-is, scalars the way Python's `str()` prints them, arrays and
/// objects as `json.dumps` output
fn item_to_string(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        Value::Number(n) => n.to_string(),
        nested => python_json(nested),
    }
}

fn python_json(value: &Value) -> String {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, PythonJsonFormatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(_) => value.to_string(),
    }
}

/// `json.dumps` defaults: `", "` and `": "` separators, non-ASCII escaped
struct PythonJsonFormatter;

impl serde_json::ser::Formatter for PythonJsonFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_is_empty() {
        let elements = StudyElements::new();
        assert!(elements.is_empty());
        assert_eq!(elements.len(), 0);
    }

    #[test]
    fn test_json_shape_field_order() {
        let elements = StudyElements {
            terms: strings(&["t"]),
            ..Default::default()
        };
        let json = serde_json::to_string(&elements).unwrap();
        assert_eq!(
            json,
            r#"{"terms":["t"],"definitions":[],"examples":[],"questions":[],"answers":[]}"#
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let elements: StudyElements = serde_json::from_str(r#"{"terms":["x"]}"#).unwrap();
        assert_eq!(elements.terms, strings(&["x"]));
        assert!(elements.answers.is_empty());
    }

    #[test]
    fn test_from_json_object_coerces_items() {
        let value: Value = serde_json::json!({
            "terms": ["ATP", 7, {"a": 1}],
            "definitions": "not a list",
            "summary": ["ignored"]
        });
        let elements = StudyElements::from_json_object(value.as_object().unwrap());
        assert_eq!(elements.terms, strings(&["ATP", "7", r#"{"a": 1}"#]));
        assert!(elements.definitions.is_empty());
        assert_eq!(elements.len(), 3);
    }

    #[test]
    fn test_scalars_render_like_python() {
        let value: Value = serde_json::json!({
            "examples": [true, false, null, 2.5, -3]
        });
        let elements = StudyElements::from_json_object(value.as_object().unwrap());
        assert_eq!(elements.examples, strings(&["True", "False", "None", "2.5", "-3"]));
    }

    #[test]
    fn test_nested_items_render_like_json_dumps() {
        let value: Value = serde_json::from_str(
            r#"{"answers": [{"q": "Zellen?", "tags": ["bio", "größe"]}, [1, [2, 3]]]}"#,
        )
        .unwrap();
        let elements = StudyElements::from_json_object(value.as_object().unwrap());
        assert_eq!(
            elements.answers,
            strings(&[
                r#"{"q": "Zellen?", "tags": ["bio", "gr\u00f6\u00dfe"]}"#,
                "[1, [2, 3]]",
            ])
        );
    }

    #[test]
    fn test_nested_keys_keep_model_order() {
        let value: Value = serde_json::from_str(r#"{"terms": [{"zeta": 1, "alpha": 2}]}"#).unwrap();
        let elements = StudyElements::from_json_object(value.as_object().unwrap());
        assert_eq!(elements.terms, strings(&[r#"{"zeta": 1, "alpha": 2}"#]));
    }

    #[test]
    fn test_field_keys() {
        let keys: Vec<_> = ElementField::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys, ["terms", "definitions", "examples", "questions", "answers"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn string_items_pass_through_unchanged(
            items in prop::collection::vec(".{0,12}", 0..8)
        ) {
            let mut obj = Map::new();
            obj.insert("terms".to_string(), Value::from(items.clone()));
            let elements = StudyElements::from_json_object(&obj);
            prop_assert_eq!(elements.terms, items);
        }
    }
}
