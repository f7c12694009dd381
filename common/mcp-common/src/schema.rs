//! Input schema generation for tool descriptors

use std::sync::Arc;

use rmcp::model::JsonObject;
use schemars::{generate::SchemaSettings, JsonSchema};
use serde_json::Value;

/// JSON Schema object for a parameter struct, with sub-schemas inlined
///
/// Inlining keeps enums like `viewMode` readable for clients that do not
/// resolve `$ref`.
pub fn input_schema<T: JsonSchema>() -> Arc<JsonObject> {
    let generator = SchemaSettings::draft07()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();
    let schema = generator.into_root_schema_for::<T>();

    let mut object = match serde_json::to_value(schema) {
        Ok(Value::Object(object)) => object,
        _ => JsonObject::new(),
    };
    object.remove("$schema");
    object
        .entry("type")
        .or_insert_with(|| Value::String("object".to_string()));

    Arc::new(object)
}
