//! Insertion-ordered risk factor map
//!
//! Categories are open-ended strings. The order in which a category first
//! receives a term is the order it is iterated and serialized in, which is
//! what drives recommendation order downstream.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskFactors {
    entries: Vec<(String, Vec<String>)>,
}

impl RiskFactors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term under `category`, opening the category on first use
    pub fn record(&mut self, category: &str, term: impl Into<String>) {
        let term = term.into();
        match self.entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, terms)) => terms.push(term),
            None => self.entries.push((category.to_string(), vec![term])),
        }
    }

    /// Append several terms at once; an empty iterator leaves the map untouched
    pub fn record_all<I, S>(&mut self, category: &str, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for term in terms {
            self.record(category, term);
        }
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, terms)| terms.as_slice())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, terms)| (name.as_str(), terms.as_slice()))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Every recorded term in category order
    pub fn all_terms(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|(_, terms)| terms.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for RiskFactors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, terms) in &self.entries {
            map.serialize_entry(name, terms)?;
        }
        map.end()
    }
}

struct RiskFactorsVisitor;

impl<'de> Visitor<'de> for RiskFactorsVisitor {
    type Value = RiskFactors;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of category names to term lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut factors = RiskFactors::new();
        while let Some((name, terms)) = access.next_entry::<String, Vec<String>>()? {
            factors.record_all(&name, terms);
        }
        Ok(factors)
    }
}

impl<'de> Deserialize<'de> for RiskFactors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RiskFactorsVisitor)
    }
}
