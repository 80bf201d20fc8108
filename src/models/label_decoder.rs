use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A predicted disease name, always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Label(String);

impl Label {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Maps class indices back to the names fit by the training-side label encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl LabelDecoder {
    pub fn new(classes: Vec<String>) -> Self {
        LabelDecoder { classes }
    }

    /// Size of the valid index range `[0, len)`.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn decode(&self, index: usize) -> Result<Label> {
        self.classes
            .get(index)
            .map(|name| Label(name.to_lowercase()))
            .ok_or(Error::UnknownIndex { index, known: self.classes.len() })
    }

    /// The closed label set, lowercased, in index order.
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.classes.iter().map(|c| Label(c.to_lowercase()))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.classes.iter().any(|c| c.to_lowercase() == label)
    }

    pub(crate) fn check_shape(&self) -> std::result::Result<(), String> {
        if self.classes.is_empty() {
            return Err("label set is empty".into());
        }
        if let Some(i) = self.classes.iter().position(|c| c.trim().is_empty()) {
            return Err(format!("label {} is blank", i));
        }
        Ok(())
    }
}
