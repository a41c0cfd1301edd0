pub mod schema;

pub use schema::format_schema;

use serde_json::Value;

use crate::parse::scalar_text;

/// Pretty-print a value as an indented JSON block.
///
/// Falls back to the compact text of the value if serialization fails.
pub fn json_block(value: &Value) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("could not format example value: {e}");
            scalar_text(value)
        }
    }
}
