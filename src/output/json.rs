//! JSON output.

use crate::error::AppError;
use crate::model::TreeNode;

/// Pretty-printed array of `{id, title, type, url?, children}` objects.
pub fn render_json(roots: &[TreeNode]) -> Result<String, AppError> {
    let mut json =
        serde_json::to_string_pretty(roots).map_err(|e| AppError::RenderFailed(e.to_string()))?;
    json.push('\n');
    Ok(json)
}
