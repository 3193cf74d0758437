use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Number, Value as JsonValue};

/// A value produced by evaluating a table literal statically.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    /// An identifier or member chain such as `NumCoach.Solo`, kept unresolved.
    Reference(DottedReference),
    Sequence(Vec<ScriptValue>),
    Mapping(BTreeMap<String, ScriptValue>),
    /// An expression the static evaluator does not understand, tagged with its kind.
    Opaque(&'static str),
}

/// An unresolved dotted path: `base.member.member...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DottedReference {
    pub base: String,
    pub members: Vec<String>,
}

impl DottedReference {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            members: Vec::new(),
        }
    }

    pub fn member(mut self, name: impl Into<String>) -> Self {
        self.members.push(name.into());
        self
    }

    /// Legacy textual form (`A.B`) consumed by downstream tools.
    pub fn dotted(&self) -> String {
        let mut out = self.base.clone();
        for member in &self.members {
            out.push('.');
            out.push_str(member);
        }
        out
    }
}

impl std::fmt::Display for DottedReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dotted())
    }
}

static EMPTY: [ScriptValue; 0] = [];

impl ScriptValue {
    pub fn is_nil(&self) -> bool {
        matches!(self, ScriptValue::Nil)
    }

    /// Look up a key in a mapping.
    pub fn get(&self, key: &str) -> Option<&ScriptValue> {
        match self {
            ScriptValue::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Follow a chain of mapping keys.
    pub fn path(&self, keys: &[&str]) -> Option<&ScriptValue> {
        keys.iter().try_fold(self, |value, key| value.get(key))
    }

    /// Sequence items, or an empty slice for any other shape.
    pub fn items(&self) -> &[ScriptValue] {
        match self {
            ScriptValue::Sequence(items) => items,
            _ => &EMPTY,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScriptValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScriptValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Lower to JSON. Integral numbers become JSON integers, references become
    /// dotted strings, opaque nodes become `{"type": kind}`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            ScriptValue::Nil => JsonValue::Null,
            ScriptValue::Bool(b) => JsonValue::Bool(*b),
            ScriptValue::Number(n) => number_to_json(*n),
            ScriptValue::String(s) => JsonValue::String(s.clone()),
            ScriptValue::Reference(r) => JsonValue::String(r.dotted()),
            ScriptValue::Sequence(items) => {
                JsonValue::Array(items.iter().map(ScriptValue::to_json).collect())
            }
            ScriptValue::Mapping(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, JsonValue>>(),
            ),
            ScriptValue::Opaque(kind) => opaque_json(kind),
        }
    }
}

fn opaque_json(kind: &str) -> JsonValue {
    let mut map = Map::new();
    map.insert("type".to_string(), JsonValue::String(kind.to_string()));
    JsonValue::Object(map)
}

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn number_to_json(n: f64) -> JsonValue {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        JsonValue::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
    }
}

/// Format a number the way table keys are spelled (`1`, not `1.0`).
pub(crate) fn number_key(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl Serialize for ScriptValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ScriptValue::Nil => serializer.serialize_unit(),
            ScriptValue::Bool(b) => serializer.serialize_bool(*b),
            ScriptValue::Number(n) => number_to_json(*n).serialize(serializer),
            ScriptValue::String(s) => serializer.serialize_str(s),
            ScriptValue::Reference(r) => serializer.serialize_str(&r.dotted()),
            ScriptValue::Sequence(items) => items.serialize(serializer),
            ScriptValue::Mapping(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
            ScriptValue::Opaque(kind) => {
                let mut state = serializer.serialize_map(Some(1))?;
                state.serialize_entry("type", kind)?;
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_reference_dotted_form() {
        let r = DottedReference::new("Difficulty").member("Hard");
        assert_eq!(r.dotted(), "Difficulty.Hard");
        assert_eq!(
            ScriptValue::Reference(r).to_json(),
            JsonValue::String("Difficulty.Hard".into())
        );
    }

    #[test]
    fn test_integral_numbers_lower_to_integers() {
        assert_eq!(ScriptValue::Number(24.0).to_json(), json!(24));
        assert_eq!(ScriptValue::Number(-3.0).to_json(), json!(-3));
        assert_eq!(ScriptValue::Number(1.5).to_json(), json!(1.5));
    }

    #[test]
    fn test_number_key() {
        assert_eq!(number_key(1.0), "1");
        assert_eq!(number_key(2.5), "2.5");
    }

    #[test]
    fn test_path_and_items() {
        let mut inner = BTreeMap::new();
        inner.insert(
            "list".to_string(),
            ScriptValue::Sequence(vec![ScriptValue::Number(1.0)]),
        );
        let mut outer = BTreeMap::new();
        outer.insert("a".to_string(), ScriptValue::Mapping(inner));
        let root = ScriptValue::Mapping(outer);

        assert_eq!(root.path(&["a", "list"]).unwrap().items().len(), 1);
        assert!(root.path(&["a", "missing"]).is_none());
        assert!(root.items().is_empty());
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let value = ScriptValue::Sequence(vec![
            ScriptValue::Nil,
            ScriptValue::Bool(true),
            ScriptValue::Opaque("BinaryExpression"),
        ]);
        assert_eq!(serde_json::to_value(&value).unwrap(), value.to_json());
    }
}
