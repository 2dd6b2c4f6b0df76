//! In-memory dataset representation

use serde_json::{Map, Value};

/// One example, as a JSON object
pub type Row = Map<String, Value>;

/// A named group of rows, e.g. one MMLU subject
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSubset {
    pub name: String,
    pub rows: Vec<Row>,
}

impl DatasetSubset {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Last path component of the subset name, used as the subject
    pub fn leaf_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// A resolved dataset split
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub subsets: Vec<DatasetSubset>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, subsets: Vec<DatasetSubset>) -> Self {
        Self {
            name: name.into(),
            subsets,
        }
    }

    /// Dataset with a single subset named after the dataset
    pub fn single(name: impl Into<String>, rows: Vec<Row>) -> Self {
        let name = name.into();
        Self {
            subsets: vec![DatasetSubset::new(name.clone(), rows)],
            name,
        }
    }

    /// All rows, subsets concatenated in order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.subsets.iter().flat_map(|subset| subset.rows.iter())
    }

    pub fn len(&self) -> usize {
        self.subsets.iter().map(|subset| subset.rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
