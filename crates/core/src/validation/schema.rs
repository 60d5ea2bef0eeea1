//! Per-field rulesets for JSON records, and a registry of them by entity type.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::definition::RuleDefinition;
use super::ruleset::Ruleset;
use crate::error::{CoreError, RuleError};

/// Aggregated result of evaluating a schema against one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub violations: Vec<FieldViolation>,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Ordered mapping of field name to the ruleset applied to it.
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    fields: IndexMap<String, Ruleset<Value>>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ruleset for `name`, created empty on first access.
    pub fn field(&mut self, name: impl Into<String>) -> &mut Ruleset<Value> {
        self.fields.entry(name.into()).or_default()
    }

    pub fn with_field(mut self, name: impl Into<String>, ruleset: Ruleset<Value>) -> Self {
        self.fields.insert(name.into(), ruleset);
        self
    }

    /// Build a schema from per-field rule definitions.
    ///
    /// The error names the field whose definition failed to build.
    pub fn from_definitions(
        definitions: IndexMap<String, Vec<RuleDefinition>>,
    ) -> Result<Self, (String, RuleError)> {
        let mut schema = Self::new();
        for (field, defs) in definitions {
            let rules = defs
                .iter()
                .map(RuleDefinition::build)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| (field.clone(), e))?;
            schema.field(field).add_rules(rules);
        }
        Ok(schema)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Ruleset<Value>)> {
        self.fields.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Evaluate every field's ruleset against `record`.
    ///
    /// Absent fields are evaluated as `null`. Violations are listed in field
    /// order, then rule registration order.
    pub fn validate_record(&self, record: &Map<String, Value>) -> Result<ValidationReport, RuleError> {
        let null = Value::Null;
        let mut violations = Vec::new();

        for (field, ruleset) in &self.fields {
            let value = record.get(field).unwrap_or(&null);
            let verdict = ruleset.check(value)?;
            for message in verdict.descriptions() {
                violations.push(FieldViolation {
                    field: field.clone(),
                    message,
                    value: (!value.is_null()).then(|| value.clone()),
                });
            }
        }

        tracing::debug!(
            fields = self.fields.len(),
            violations = violations.len(),
            "Record validated"
        );

        Ok(ValidationReport {
            is_valid: violations.is_empty(),
            violations,
        })
    }
}

/// Schema document layout: entity type -> field -> rule definitions.
type SchemaDocument = IndexMap<String, IndexMap<String, Vec<RuleDefinition>>>;

/// Field schemas keyed by entity type.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, FieldSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a schema document.
    ///
    /// ```json
    /// { "users": { "name": [{ "rule_type": "required" }] } }
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let document: SchemaDocument = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Invalid schema document: {e}")))?;

        let mut registry = Self::new();
        for (entity_type, fields) in document {
            let schema = FieldSchema::from_definitions(fields).map_err(|(field, e)| {
                CoreError::Validation(format!("{entity_type}.{field}: {e}"))
            })?;
            tracing::debug!(entity_type = %entity_type, fields = schema.len(), "Schema loaded");
            registry.insert(entity_type, schema);
        }
        Ok(registry)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Internal(format!("Failed to read schema file {}: {e}", path.display()))
        })?;
        let registry = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            entity_types = registry.len(),
            "Schema registry loaded"
        );
        Ok(registry)
    }

    pub fn insert(&mut self, entity_type: impl Into<String>, schema: FieldSchema) {
        self.schemas.insert(entity_type.into(), schema);
    }

    pub fn get(&self, entity_type: &str) -> Result<&FieldSchema, CoreError> {
        self.schemas.get(entity_type).ok_or_else(|| CoreError::NotFound {
            entity: "Schema",
            key: entity_type.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
        self.schemas.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::{MinLength, OnString, Required, StartsWith};
    use crate::validation::FnRule;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("record must be an object"),
        }
    }

    fn user_schema() -> FieldSchema {
        let mut schema = FieldSchema::new();
        schema
            .field("name")
            .add_rule(Required)
            .add_rule(OnString(MinLength::new(4)));
        schema.field("handle").add_rule(OnString(StartsWith::new("@")));
        schema
    }

    #[test]
    fn valid_record_has_no_violations() {
        let report = user_schema()
            .validate_record(&record(json!({"name": "Alice", "handle": "@alice"})))
            .unwrap();
        assert!(report.is_valid);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn absent_optional_field_passes() {
        let report = user_schema()
            .validate_record(&record(json!({"name": "Alice"})))
            .unwrap();
        assert!(report.is_valid);
    }

    #[test]
    fn violations_follow_field_then_rule_order() {
        let report = user_schema()
            .validate_record(&record(json!({"name": "", "handle": "bob"})))
            .unwrap();
        assert!(!report.is_valid);
        let fields: Vec<_> = report.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "name", "handle"]);
        assert_eq!(report.violations[0].message, "is required");
        assert_eq!(report.violations[2].value, Some(json!("bob")));
    }

    #[test]
    fn missing_required_field_has_no_value() {
        let report = user_schema().validate_record(&Map::new()).unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].value, None);
    }

    #[test]
    fn rule_error_propagates() {
        let schema = FieldSchema::new().with_field(
            "x",
            Ruleset::new().with_rule(FnRule::new("ok", |_: &Value| true)),
        );
        assert!(schema.validate_record(&Map::new()).is_ok());

        struct Failing;
        impl crate::validation::Rule<Value> for Failing {
            fn evaluate(&self, _: &Value) -> Result<bool, RuleError> {
                Err(RuleError::Evaluation("boom".into()))
            }
        }
        let schema = FieldSchema::new().with_field("x", Ruleset::new().with_rule(Failing));
        assert_matches!(
            schema.validate_record(&Map::new()),
            Err(RuleError::Evaluation(_))
        );
    }

    #[test]
    fn registry_loads_document_in_order() {
        let registry = SchemaRegistry::from_json_str(
            r#"{
                "users": {
                    "name": [{"rule_type": "required"}, {"rule_type": "min_length", "config": {"min": 2}}],
                    "email": [{"rule_type": "email", "message": "bad email"}]
                },
                "projects": {
                    "title": [{"rule_type": "required"}]
                }
            }"#,
        )
        .unwrap();

        let entity_types: Vec<_> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(entity_types, vec!["users", "projects"]);

        let users = registry.get("users").unwrap();
        let fields: Vec<_> = users.fields().map(|(name, rules)| (name, rules.len())).collect();
        assert_eq!(fields, vec![("name", 2), ("email", 1)]);

        let report = users
            .validate_record(&record(json!({"name": "Al", "email": "nope"})))
            .unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].message, "bad email");
    }

    #[test]
    fn registry_reports_failing_field() {
        let err = SchemaRegistry::from_json_str(
            r#"{"users": {"name": [{"rule_type": "nonsense"}]}}"#,
        )
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.starts_with("users.name:"));
    }

    #[test]
    fn registry_rejects_malformed_json() {
        assert_matches!(
            SchemaRegistry::from_json_str("not json"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn unknown_entity_type_is_not_found() {
        let registry = SchemaRegistry::new();
        assert_matches!(
            registry.get("ghosts"),
            Err(CoreError::NotFound { entity: "Schema", key }) if key == "ghosts"
        );
    }

    #[test]
    fn registry_reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schemas.json");
        std::fs::write(&path, r#"{"tags": {"label": [{"rule_type": "required"}]}}"#).unwrap();

        let registry = SchemaRegistry::from_path(&path).unwrap();
        assert_eq!(registry.len(), 1);

        let missing = SchemaRegistry::from_path(dir.path().join("missing.json"));
        assert_matches!(missing, Err(CoreError::Internal(_)));
    }
}
