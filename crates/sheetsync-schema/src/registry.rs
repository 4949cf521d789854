//! Registry of the output document schemas.
//!
//! Schemas are generated once, at construction, with [`schemars::schema_for!`].

use std::collections::HashMap;

use schemars::schema_for;
use sheetsync_core::{
    ClassEntry, ErrorDocument, LegendDocument, LegendGroup, RecordsDocument, Timetable,
    responses::RunSummary,
};

use crate::error::SchemaError;

pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::Value::from(schema_for!($ty)));
    };
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Files written by a run (4) ---
        register!(schemas, "records_document", RecordsDocument);
        register!(schemas, "error_document", ErrorDocument);
        register!(schemas, "timetable", Timetable);
        register!(schemas, "legend_document", LegendDocument);

        // --- Building blocks (2) ---
        register!(schemas, "class_entry", ClassEntry);
        register!(schemas, "legend_group", LegendGroup);

        // --- CLI response (1) ---
        register!(schemas, "run_summary", RunSummary);

        Self { schemas }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` with every validator message.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
