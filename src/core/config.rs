use serde::{Serialize, Deserialize};
use std::collections::HashSet;
use crate::core::error::{Error, ErrorKind, Result};
use crate::index::single_bound::RangeType;

/// Column layout of one table index, outermost column first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    pub table: String,
    pub columns: Vec<ColumnSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: ColumnKind,
}

/// How one key column is matched against a query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKind {
    Exact,
    SingleBound { range_type: RangeType },
    TwoBound,
}

impl IndexConfig {
    pub fn new(table: impl Into<String>) -> Self {
        IndexConfig {
            table: table.into(),
            columns: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn exact(self, name: impl Into<String>) -> Self {
        self.column(name, ColumnKind::Exact)
    }

    pub fn single_bound(self, name: impl Into<String>, range_type: RangeType) -> Self {
        self.column(name, ColumnKind::SingleBound { range_type })
    }

    pub fn two_bound(self, name: impl Into<String>) -> Self {
        self.column(name, ColumnKind::TwoBound)
    }

    fn column(mut self, name: impl Into<String>, kind: ColumnKind) -> Self {
        self.columns.push(ColumnSpec { name: name.into(), kind });
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("table '{}' declares no key columns", self.table),
            ));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::new(
                    ErrorKind::InvalidArgument,
                    format!("table '{}' declares column '{}' twice", self.table, column.name),
                ));
            }
        }

        Ok(())
    }
}
