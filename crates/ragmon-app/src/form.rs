//! The configuration form and its mapping to the backend's config tree.
//!
//! Fields are *declared*, not inferred: [`FieldSpec`] names each field's
//! dot-path, label, and coercion kind, and the whole registry is validated
//! once at startup. A malformed name fails fast instead of silently creating
//! stray nested objects at edit time.
//!
//! [`FormState::collect`] and [`FormState::fill`] are the two directions of
//! the mapping. Known boundary: numeric fields round-trip their parsed value,
//! not the original spelling -- an entered `"1.50"` collects as `1.5` and
//! refills as `"1.5"`.

use serde_json::{Map, Number, Value};

use ragmon_core::prelude::*;
use ragmon_core::{flatten_assign, flatten_read, FieldPath};

/// Coercion applied to a field's raw value during [`FormState::collect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Raw string, sent as-is.
    Text,
    /// Parsed to a JSON number; falls back to the raw string when the parse
    /// fails (never fails the collect pass).
    Number,
    /// Boolean toggle.
    Checkbox,
}

/// Declaration of one labeled form field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Dot-path into the config tree (doubles as the field's unique-ish
    /// name; duplicates are legal and collide last-writer-wins).
    pub name: &'static str,
    /// Operator-facing label.
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn spec(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, label, kind }
}

/// The console's field registry for the backend's runtime configuration.
///
/// Grouped the way the backend's config tree is shaped; the backend remains
/// the authority on validation.
pub fn default_fields() -> Vec<FieldSpec> {
    use FieldKind::*;
    vec![
        spec("documents_folder", "Documents folder", Text),
        spec("embedding_handler.device", "Embedding device", Text),
        spec("embedding_handler.model_path", "Embedding model path", Text),
        spec("answer_generator.device", "Generator device", Text),
        spec("answer_generator.quantization", "Quantization", Text),
        spec("answer_generator.generation_mode", "Generation mode", Text),
        spec(
            "answer_generator.generation.max_new_tokens",
            "Max new tokens",
            Number,
        ),
        spec(
            "answer_generator.generation.repetition_penalty",
            "Repetition penalty",
            Number,
        ),
        spec(
            "answer_generator.generation.early_stopping",
            "Early stopping",
            Checkbox,
        ),
        spec(
            "answer_generator.generation.stochastic.temperature",
            "Temperature",
            Number,
        ),
        spec("answer_generator.generation.stochastic.top_p", "Top-p", Number),
        spec("answer_generator.generation.stochastic.top_k", "Top-k", Number),
        spec("splitter.method", "Splitter method", Text),
        spec("splitter.words_per_context", "Words per context", Number),
        spec("splitter.overlap_words", "Overlap words", Number),
        spec(
            "document_processing.image_enabled",
            "Process images",
            Checkbox,
        ),
        spec("logging.level", "Log level", Text),
        spec("logging.console_level", "Console log level", Text),
    ]
}

/// One materialized field: spec + parsed path + current value.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
    path: FieldPath,
    /// Raw text for Text/Number fields.
    pub text: String,
    /// Toggle state for Checkbox fields.
    pub checked: bool,
}

impl FormField {
    /// Full dot-path name of this field.
    pub fn name(&self) -> String {
        self.path.to_string()
    }

    /// Value as shown in the form.
    pub fn display_value(&self) -> String {
        match self.kind {
            FieldKind::Checkbox => {
                let mark = if self.checked { "[x]" } else { "[ ]" };
                mark.to_string()
            }
            _ => self.text.clone(),
        }
    }
}

/// Text edit in progress on one field.
#[derive(Debug, Clone)]
pub struct EditBuffer {
    pub field_index: usize,
    pub text: String,
}

/// The labeled form region: declared fields, cursor, and edit state.
#[derive(Debug)]
pub struct FormState {
    fields: Vec<FormField>,
    pub cursor: usize,
    pub editing: Option<EditBuffer>,
}

impl FormState {
    /// Build the form from a registry, validating every name.
    ///
    /// This is the startup validation point: any malformed dot-path in the
    /// registry is an immediate [`Error::Path`].
    pub fn new(specs: Vec<FieldSpec>) -> Result<Self> {
        let mut fields = Vec::with_capacity(specs.len());
        for s in specs {
            let path = FieldPath::parse(s.name)?;
            fields.push(FormField {
                label: s.label,
                kind: s.kind,
                path,
                text: String::new(),
                checked: false,
            });
        }
        Ok(Self {
            fields,
            cursor: 0,
            editing: None,
        })
    }

    /// The console's default form.
    pub fn with_default_fields() -> Self {
        // The built-in registry is statically well-formed.
        Self::new(default_fields()).expect("default field registry is valid")
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn selected(&self) -> Option<&FormField> {
        self.fields.get(self.cursor)
    }

    // ── Cursor & editing ───────────────────────────────────────────────────

    pub fn select_prev(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.fields.len() {
            self.cursor += 1;
        }
    }

    /// Enter on a field: toggles a checkbox, otherwise opens an edit buffer
    /// seeded with the current text.
    pub fn activate(&mut self) {
        let Some(field) = self.fields.get_mut(self.cursor) else {
            return;
        };
        match field.kind {
            FieldKind::Checkbox => field.checked = !field.checked,
            FieldKind::Text | FieldKind::Number => {
                self.editing = Some(EditBuffer {
                    field_index: self.cursor,
                    text: field.text.clone(),
                });
            }
        }
    }

    pub fn input(&mut self, c: char) {
        if let Some(edit) = &mut self.editing {
            edit.text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(edit) = &mut self.editing {
            edit.text.pop();
        }
    }

    pub fn commit_edit(&mut self) {
        if let Some(edit) = self.editing.take() {
            if let Some(field) = self.fields.get_mut(edit.field_index) {
                field.text = edit.text;
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // ── FormBridge ─────────────────────────────────────────────────────────

    /// Read every field into a nested ConfigObject.
    ///
    /// Each field contributes exactly one leaf. Fields sharing a name collide
    /// last-writer-wins in field order -- an explicit tie-break, not a
    /// defect. Coercion never fails the pass: a Number field whose text does
    /// not parse contributes its raw string.
    pub fn collect(&self) -> Value {
        let mut config = Value::Object(Map::new());
        for field in &self.fields {
            let value = match field.kind {
                FieldKind::Checkbox => Value::Bool(field.checked),
                FieldKind::Number => parse_number(&field.text),
                FieldKind::Text => Value::String(field.text.clone()),
            };
            flatten_assign(&mut config, &field.path, value);
        }
        config
    }

    /// Write a ConfigObject back into the form.
    ///
    /// Each declared field looks up the leaf at its full path; scalars,
    /// booleans, arrays, and null are leaves, while an object at a field's
    /// path means the path addresses an interior node and the field is
    /// skipped. Fields with no corresponding leaf keep their current value
    /// -- no clearing.
    pub fn fill(&mut self, config: &Value) {
        for i in 0..self.fields.len() {
            if let Some(value) = flatten_read(config, &self.fields[i].path) {
                if value.is_object() {
                    // An object where the form expects a leaf: the field's
                    // path addresses an interior node, leave it untouched.
                    continue;
                }
                let field = &mut self.fields[i];
                match field.kind {
                    FieldKind::Checkbox => field.checked = coerce_bool(value),
                    FieldKind::Text | FieldKind::Number => field.text = render_value(value),
                }
            }
        }
    }
}

/// Numeric parse with string fallback. Integer-valued input narrows to i64
/// so `5` does not become `5.0` on the wire.
fn parse_number(text: &str) -> Value {
    let trimmed = text.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if let Some(num) = Number::from_f64(float) {
            return Value::Number(num);
        }
    }
    Value::String(text.to_string())
}

/// Boolean coercion for checkbox fills.
fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a leaf for a text field: strings unquoted, scalars via display,
/// opaque leaves (arrays) as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form_with(specs: Vec<FieldSpec>) -> FormState {
        FormState::new(specs).unwrap()
    }

    #[test]
    fn test_registry_validation_rejects_malformed_names() {
        let specs = vec![spec("valid.name", "ok", FieldKind::Text)];
        assert!(FormState::new(specs).is_ok());

        let specs = vec![spec("bad..name", "broken", FieldKind::Text)];
        assert!(matches!(FormState::new(specs), Err(Error::Path { .. })));

        let specs = vec![spec("", "empty", FieldKind::Text)];
        assert!(FormState::new(specs).is_err());
    }

    #[test]
    fn test_default_registry_is_valid() {
        let form = FormState::with_default_fields();
        assert!(!form.is_empty());
    }

    #[test]
    fn test_collect_coerces_by_kind() {
        let mut form = form_with(vec![
            spec("splitter.method", "m", FieldKind::Text),
            spec("splitter.words_per_context", "w", FieldKind::Number),
            spec("document_processing.image_enabled", "i", FieldKind::Checkbox),
        ]);
        form.fields[0].text = "sentences".into();
        form.fields[1].text = "250".into();
        form.fields[2].checked = true;

        let cfg = form.collect();
        assert_eq!(cfg["splitter"]["method"], json!("sentences"));
        assert_eq!(cfg["splitter"]["words_per_context"], json!(250));
        assert_eq!(cfg["document_processing"]["image_enabled"], json!(true));
    }

    #[test]
    fn test_collect_number_falls_back_to_raw_string() {
        let mut form = form_with(vec![spec("generation.temperature", "t", FieldKind::Number)]);
        form.fields[0].text = "warm-ish".into();
        let cfg = form.collect();
        assert_eq!(cfg["generation"]["temperature"], json!("warm-ish"));
    }

    #[test]
    fn test_collect_number_parses_floats() {
        let mut form = form_with(vec![spec("generation.temperature", "t", FieldKind::Number)]);
        form.fields[0].text = "0.75".into();
        assert_eq!(form.collect()["generation"]["temperature"], json!(0.75));
    }

    #[test]
    fn test_collect_top_level_key() {
        let mut form = form_with(vec![spec("documents_folder", "d", FieldKind::Text)]);
        form.fields[0].text = "/data/docs".into();
        assert_eq!(form.collect()["documents_folder"], json!("/data/docs"));
    }

    #[test]
    fn test_duplicate_names_last_writer_wins() {
        let mut form = form_with(vec![
            spec("logging.level", "a", FieldKind::Text),
            spec("logging.level", "b", FieldKind::Text),
        ]);
        form.fields[0].text = "DEBUG".into();
        form.fields[1].text = "ERROR".into();
        assert_eq!(form.collect()["logging"]["level"], json!("ERROR"));
    }

    #[test]
    fn test_fill_assigns_matching_leaves_only() {
        let mut form = form_with(vec![
            spec("splitter.method", "m", FieldKind::Text),
            spec("splitter.words_per_context", "w", FieldKind::Number),
        ]);
        form.fields[1].text = "100".into();

        form.fill(&json!({"splitter": {"method": "paragraphs"}}));
        assert_eq!(form.fields[0].text, "paragraphs");
        // No corresponding leaf: untouched.
        assert_eq!(form.fields[1].text, "100");
    }

    #[test]
    fn test_fill_checkbox_boolean_coercion() {
        let mut form = form_with(vec![
            spec("a", "a", FieldKind::Checkbox),
            spec("b", "b", FieldKind::Checkbox),
            spec("c", "c", FieldKind::Checkbox),
            spec("d", "d", FieldKind::Checkbox),
        ]);
        form.fill(&json!({"a": true, "b": 0, "c": "yes", "d": null}));
        assert!(form.fields[0].checked);
        assert!(!form.fields[1].checked);
        assert!(form.fields[2].checked);
        assert!(!form.fields[3].checked);
    }

    #[test]
    fn test_fill_renders_array_leaf_as_json() {
        let mut form = form_with(vec![spec(
            "document_processing.allowed_extensions",
            "ext",
            FieldKind::Text,
        )]);
        form.fill(&json!({"document_processing": {"allowed_extensions": [".pdf", ".txt"]}}));
        assert_eq!(form.fields[0].text, r#"[".pdf",".txt"]"#);
    }

    #[test]
    fn test_fill_collect_round_trip_preserves_leaves() {
        let mut form = form_with(vec![
            spec("splitter.method", "m", FieldKind::Text),
            spec("splitter.words_per_context", "w", FieldKind::Number),
            spec("document_processing.image_enabled", "i", FieldKind::Checkbox),
        ]);
        let cfg = json!({
            "splitter": {"method": "words", "words_per_context": 250},
            "document_processing": {"image_enabled": true}
        });
        form.fill(&cfg);
        assert_eq!(form.collect(), cfg);
    }

    #[test]
    fn test_fill_collect_numeric_round_trip_is_lossy_in_formatting_only() {
        let mut form = form_with(vec![spec("t", "t", FieldKind::Number)]);
        form.fields[0].text = "1.50".into();

        let cfg = form.collect();
        assert_eq!(cfg["t"], json!(1.5));

        form.fill(&cfg);
        assert_eq!(form.fields[0].text, "1.5");

        // Stable from here on.
        let again = form.collect();
        assert_eq!(again["t"], json!(1.5));
    }

    #[test]
    fn test_fill_collect_idempotent_on_visible_values() {
        let mut form = FormState::with_default_fields();
        form.fill(&json!({
            "documents_folder": "/srv/docs",
            "splitter": {"method": "sentences", "words_per_context": 120, "overlap_words": 10},
            "logging": {"level": "INFO", "console_level": "WARNING"},
            "document_processing": {"image_enabled": false}
        }));
        let first: Vec<String> = form.fields().iter().map(|f| f.display_value()).collect();
        let collected = form.collect();
        form.fill(&collected);
        let second: Vec<String> = form.fields().iter().map(|f| f.display_value()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_edit_cycle_commit_and_cancel() {
        let mut form = form_with(vec![spec("logging.level", "l", FieldKind::Text)]);
        form.activate();
        form.input('I');
        form.input('N');
        form.commit_edit();
        assert_eq!(form.fields()[0].text, "IN");

        form.activate();
        form.input('X');
        form.cancel_edit();
        assert_eq!(form.fields()[0].text, "IN");
    }

    #[test]
    fn test_activate_toggles_checkbox() {
        let mut form = form_with(vec![spec("flag", "f", FieldKind::Checkbox)]);
        assert!(!form.fields()[0].checked);
        form.activate();
        assert!(form.fields()[0].checked);
        assert!(form.editing.is_none());
    }
}
