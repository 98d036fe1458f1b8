//! Content types and structures.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Type of content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Markdown content (.md files).
    Markdown,
}

impl ContentType {
    /// Determine content type from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Determine content type from a file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// A single decoded frontmatter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Plain scalar string, surrounding quotes removed.
    Text(String),
    /// Multi-line string collected from a `|` block.
    Block(String),
    /// Numeric scalar.
    Number(f64),
    /// `true` or `false`.
    Bool(bool),
    /// Flat list of strings.
    List(Vec<String>),
}

impl FieldValue {
    /// Loose truthiness used when ordering records.
    ///
    /// Empty strings, zero, `false` and NaN are falsy; every list is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) | Self::Block(s) => !s.is_empty(),
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Bool(b) => *b,
            Self::List(_) => true,
        }
    }

    /// Numeric reading of the value, if it has one.
    ///
    /// Booleans read as 1 or 0, an empty list as 0 and a one-item list as
    /// its item.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) | Self::Block(s) => parse_text_number(s),
            Self::List(items) => match items.as_slice() {
                [] => Some(0.0),
                [item] => parse_text_number(item),
                _ => None,
            },
        }
    }

    /// String contents for text and block values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Block(s) => Some(s),
            _ => None,
        }
    }
}

fn parse_text_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    crate::frontmatter::parse_number(s)
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) | Self::Block(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::List(items) => items.serialize(serializer),
            Self::Number(n) => {
                // Integral values are written without a fractional part.
                if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
        }
    }
}

/// Ordered frontmatter mapping.
///
/// Re-assigning a key replaces its value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fields(IndexMap<String, FieldValue>);

impl Fields {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Mutable lookup by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        self.0.get_mut(key)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether the key is present with a truthy value.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(FieldValue::is_truthy)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

/// One content file decoded into fields, identified by its file stem.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: String,
    fields: Fields,
}

impl Record {
    /// Build a record, writing `id` into the fields.
    ///
    /// A frontmatter `id` is overwritten in place.
    pub fn new(id: impl Into<String>, mut fields: Fields) -> Self {
        let id = id.into();
        fields.insert("id", id.clone());
        Self { id, fields }
    }

    /// Build a record from a content file path, using the file stem as id.
    ///
    /// Returns `None` when the path has no usable stem.
    pub fn from_path(path: &Path, fields: Fields) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        if stem.is_empty() {
            return None;
        }
        Some(Self::new(stem, fields))
    }

    /// Record identifier (file stem).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All fields, `id` included.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Set a field, unless it is `id`.
    pub fn set(&mut self, key: &str, value: impl Into<FieldValue>) {
        if key != "id" {
            self.fields.insert(key, value);
        }
    }

    /// The `order` value, when it is defined (truthy).
    pub fn order(&self) -> Option<&FieldValue> {
        self.get("order").filter(|value| value.is_truthy())
    }

    /// Whether `featured` is truthy.
    pub fn is_featured(&self) -> bool {
        self.fields.is_truthy("featured")
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(ContentType::from_extension("md"), Some(ContentType::Markdown));
        assert_eq!(
            ContentType::from_extension("MARKDOWN"),
            Some(ContentType::Markdown)
        );
        assert_eq!(ContentType::from_extension("txt"), None);
        assert_eq!(
            ContentType::from_path(Path::new("content/projects/site.md")),
            Some(ContentType::Markdown)
        );
        assert_eq!(ContentType::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(FieldValue::Bool(true).is_truthy());
        assert!(!FieldValue::Bool(false).is_truthy());
        assert!(!FieldValue::Number(0.0).is_truthy());
        assert!(FieldValue::Number(-1.0).is_truthy());
        assert!(!FieldValue::Text(String::new()).is_truthy());
        assert!(FieldValue::Text("no".into()).is_truthy());
        assert!(FieldValue::List(Vec::new()).is_truthy());
    }

    #[test]
    fn test_number_serialization() {
        let json = serde_json::to_string(&FieldValue::Number(42.0)).expect("serialize");
        assert_eq!(json, "42");
        let json = serde_json::to_string(&FieldValue::Number(2.5)).expect("serialize");
        assert_eq!(json, "2.5");
        let json = serde_json::to_string(&FieldValue::Number(-3.0)).expect("serialize");
        assert_eq!(json, "-3");
    }

    #[test]
    fn test_fields_keep_first_position() {
        let mut fields = Fields::new();
        fields.insert("title", "a");
        fields.insert("year", FieldValue::Number(2020.0));
        fields.insert("title", "b");

        let keys: Vec<_> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["title", "year"]);
        assert_eq!(fields.get("title").and_then(FieldValue::as_str), Some("b"));
    }

    #[test]
    fn test_record_appends_id() {
        let fields: Fields = [("title", "Site")].into_iter().collect();
        let record = Record::from_path(Path::new("content/projects/my-site.md"), fields)
            .expect("record");

        assert_eq!(record.id(), "my-site");
        assert_eq!(record.fields().len(), 2);
        let json = serde_json::to_string(&record).expect("serialize");
        assert_eq!(json, r#"{"title":"Site","id":"my-site"}"#);
    }

    #[test]
    fn test_record_overrides_frontmatter_id() {
        let fields: Fields = [("id", "custom"), ("title", "Site")].into_iter().collect();
        let mut record = Record::new("file-stem", fields);
        record.set("id", "ignored");

        assert_eq!(record.id(), "file-stem");
        let json = serde_json::to_string(&record).expect("serialize");
        assert_eq!(json, r#"{"id":"file-stem","title":"Site"}"#);
    }

    #[test]
    fn test_record_order() {
        let mut record = Record::new("a", Fields::new());
        assert_eq!(record.order(), None);

        record.set("order", FieldValue::Number(0.0));
        assert_eq!(record.order(), None);

        record.set("order", FieldValue::Bool(false));
        assert_eq!(record.order(), None);

        record.set("order", FieldValue::Number(3.0));
        assert_eq!(record.order().and_then(FieldValue::as_number), Some(3.0));

        record.set("order", "2");
        assert_eq!(record.order().and_then(FieldValue::as_number), Some(2.0));

        record.set("order", FieldValue::Bool(true));
        assert_eq!(record.order().and_then(FieldValue::as_number), Some(1.0));

        // Defined, but without a numeric reading.
        record.set("order", "soon");
        assert_eq!(record.order(), Some(&FieldValue::Text("soon".into())));
        assert_eq!(record.order().and_then(FieldValue::as_number), None);
    }

    #[test]
    fn test_as_number() {
        assert_eq!(FieldValue::Text(" 7 ".into()).as_number(), Some(7.0));
        assert_eq!(FieldValue::Bool(false).as_number(), Some(0.0));
        assert_eq!(FieldValue::List(Vec::new()).as_number(), Some(0.0));
        assert_eq!(FieldValue::List(vec!["4".into()]).as_number(), Some(4.0));
        assert_eq!(
            FieldValue::List(vec!["1".into(), "2".into()]).as_number(),
            None
        );
        assert_eq!(FieldValue::Block("x".into()).as_number(), None);
    }
}
