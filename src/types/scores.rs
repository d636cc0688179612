//! Per-category score vectors.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{CategorySet, ClassifyResult};

/// Mapping from every configured category to a score, in declaration order.
///
/// Serializes as a JSON object (`{"Invoice": 0.7, "Other": 0.3}`) with keys
/// in declaration order, and deserializes back without losing that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreVector {
    entries: Vec<(String, f32)>,
}

impl ScoreVector {
    /// Score for a label, `None` if the label is not part of the vector.
    pub fn get(&self, label: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, score)| *score)
    }

    /// `(label, score)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.entries.iter().map(|(l, s)| (l.as_str(), *s))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries sorted by score descending; the sort is stable, so equal
    /// scores keep declaration order.
    pub fn ranked(&self) -> Vec<(&str, f32)> {
        let mut ranked: Vec<(&str, f32)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// Running per-category sums over scored chunks.
///
/// Summed in `f64` so a handful of large but finite `f32` answers cannot
/// overflow before the average brings them back into range.
#[derive(Debug, Clone)]
pub(crate) struct ScoreTotals {
    entries: Vec<(String, f64)>,
}

impl ScoreTotals {
    pub(crate) fn new(categories: &CategorySet) -> Self {
        Self {
            entries: categories.iter().map(|l| (l.to_string(), 0.0)).collect(),
        }
    }

    /// Add one oracle answer. Labels outside the set are ignored; labels the
    /// answer omits contribute nothing.
    pub(crate) fn accumulate(&mut self, answer: &ClassifyResult) {
        for (label, total) in &mut self.entries {
            *total += f64::from(answer.score(label));
        }
    }

    /// Average over `n` scored chunks. `n == 0` yields the raw totals, which
    /// are all zero when nothing was accumulated.
    pub(crate) fn average(self, n: usize) -> ScoreVector {
        let n = n.max(1) as f64;
        ScoreVector {
            entries: self
                .entries
                .into_iter()
                .map(|(label, total)| (label, (total / n).min(f64::from(f32::MAX)) as f32))
                .collect(),
        }
    }
}

impl Serialize for ScoreVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, score) in &self.entries {
            map.serialize_entry(label, score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScoreVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoreVectorVisitor;

        impl<'de> Visitor<'de> for ScoreVectorVisitor {
            type Value = ScoreVector;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category label to score")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ScoreVector, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, score)) = access.next_entry::<String, f32>()? {
                    entries.push((label, score));
                }
                Ok(ScoreVector { entries })
            }
        }

        deserializer.deserialize_map(ScoreVectorVisitor)
    }
}
