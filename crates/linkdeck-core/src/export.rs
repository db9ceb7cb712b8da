//! Export half of the Edit/Export Pipeline.

use crate::model::Document;
use crate::state::AppState;

#[must_use]
pub fn export_document(state: &AppState) -> Document {
    state.document()
}

/// Pretty-printed (two-space indent) JSON of the current document.
pub fn export_text(state: &AppState) -> Result<String, String> {
    document_to_json_pretty(&export_document(state))
}

pub fn document_to_json_pretty(document: &Document) -> Result<String, String> {
    serde_json::to_string_pretty(document).map_err(|err| format!("serialize document: {err}"))
}
