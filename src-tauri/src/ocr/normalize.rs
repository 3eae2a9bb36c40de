//! Defensive normalization of recognizer output.
//!
//! Recognition backends do not agree on an output shape: some return
//! records with named fields, some return loosely typed tuples. The raw
//! shapes are modeled as a tagged union and resolved by an explicit match
//! chain; a malformed item degrades to a best-effort string on its own,
//! never aborting the batch.

use std::fmt;

/// One raw item as produced by a recognition backend.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecognition {
    /// Record with named fields; any of them may be missing.
    Record {
        text: Option<String>,
        label: Option<String>,
        score: Option<f64>,
    },
    /// Ordered collection of loosely typed values.
    Sequence(Vec<RawValue>),
}

/// A loosely typed value inside a [`RawRecognition::Sequence`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Float(f64),
    Integer(i64),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => write!(f, "{s:?}"),
            RawValue::Float(v) => write!(f, "{v}"),
            RawValue::Integer(v) => write!(f, "{v}"),
        }
    }
}

impl fmt::Display for RawRecognition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawRecognition::Record { text, label, score } => {
                write!(
                    f,
                    "{{text: {:?}, label: {:?}, score: {:?}}}",
                    text, label, score
                )
            }
            RawRecognition::Sequence(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A normalized recognition line.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedLine {
    pub text: String,
    pub confidence: f64,
}

/// Normalize a whole batch; insertion order is recognition order.
pub fn normalize(items: Vec<RawRecognition>) -> Vec<RecognizedLine> {
    items.into_iter().map(normalize_item).collect()
}

fn normalize_item(item: RawRecognition) -> RecognizedLine {
    match item {
        RawRecognition::Record { text, label, score } => RecognizedLine {
            text: text.or(label).unwrap_or_default(),
            confidence: score.unwrap_or(0.0),
        },
        RawRecognition::Sequence(ref values) => match values.first() {
            Some(RawValue::Text(text)) => RecognizedLine {
                text: text.clone(),
                // First floating-point value after the text; integers
                // are positional data, not confidences.
                confidence: values
                    .iter()
                    .skip(1)
                    .find_map(|v| match v {
                        RawValue::Float(c) => Some(*c),
                        _ => None,
                    })
                    .unwrap_or(0.0),
            },
            _ => RecognizedLine {
                text: item.to_string(),
                confidence: 0.0,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_prefers_text_field() {
        let lines = normalize(vec![RawRecognition::Record {
            text: Some("Hello".into()),
            label: None,
            score: Some(0.9),
        }]);
        assert_eq!(
            lines,
            vec![RecognizedLine {
                text: "Hello".into(),
                confidence: 0.9
            }]
        );
    }

    #[test]
    fn record_falls_back_to_label() {
        let lines = normalize(vec![RawRecognition::Record {
            text: None,
            label: Some("Sign".into()),
            score: None,
        }]);
        assert_eq!(lines[0].text, "Sign");
        assert_eq!(lines[0].confidence, 0.0);
    }

    #[test]
    fn sequence_takes_first_float_as_confidence() {
        let lines = normalize(vec![RawRecognition::Sequence(vec![
            RawValue::Text("World".into()),
            RawValue::Float(0.75),
            RawValue::Text("extra".into()),
        ])]);
        assert_eq!(
            lines,
            vec![RecognizedLine {
                text: "World".into(),
                confidence: 0.75
            }]
        );
    }

    #[test]
    fn sequence_skips_integers_when_scanning_for_confidence() {
        let lines = normalize(vec![RawRecognition::Sequence(vec![
            RawValue::Text("Word".into()),
            RawValue::Integer(12),
            RawValue::Float(0.5),
        ])]);
        assert_eq!(lines[0].confidence, 0.5);
    }

    #[test]
    fn sequence_without_textual_head_degrades_to_rendering() {
        let lines = normalize(vec![RawRecognition::Sequence(vec![
            RawValue::Integer(42),
            RawValue::Text("x".into()),
        ])]);
        assert_eq!(
            lines,
            vec![RecognizedLine {
                text: "[42, \"x\"]".into(),
                confidence: 0.0
            }]
        );
    }

    #[test]
    fn malformed_item_degrades_alone() {
        let lines = normalize(vec![
            RawRecognition::Record {
                text: Some("good".into()),
                label: None,
                score: Some(0.8),
            },
            RawRecognition::Sequence(vec![]),
            RawRecognition::Sequence(vec![
                RawValue::Text("also good".into()),
                RawValue::Float(0.6),
            ]),
        ]);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "good");
        assert_eq!(lines[1].text, "[]");
        assert_eq!(lines[1].confidence, 0.0);
        assert_eq!(lines[2].text, "also good");
    }
}
