//! Title/type normalization for the heterogeneous shapes the API returns.
//!
//! Pages keep their title in whichever property is flagged as the title
//! property, databases carry a title rich-text array, and child blocks embed
//! a plain title string. Every path here ends in a non-empty display title.

use crate::constants::{UNTITLED_DATABASE, UNTITLED_PAGE};
use notion_client::objects::database::Database as NotionDatabase;
use notion_client::objects::page::{Page as NotionPage, PageProperty};
use notion_client::objects::rich_text::RichText;
use serde_json::Value;

/// Concatenates the plain text of rich-text runs in order.
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter().map(run_text).collect()
}

fn run_text(run: &RichText) -> String {
    match run {
        RichText::Text {
            text, plain_text, ..
        } => plain_text.clone().unwrap_or_else(|| text.content.clone()),
        RichText::Mention { plain_text, .. } => plain_text.clone(),
        RichText::Equation { plain_text, .. } => plain_text.clone(),
        _ => String::new(),
    }
}

/// Returns the first candidate with visible text, or the fallback.
fn first_visible(candidates: impl IntoIterator<Item = Option<String>>, fallback: &str) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|title| !title.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// The text of the page's title property, if it has one.
fn title_property_text(page: &NotionPage) -> Option<String> {
    page.properties.values().find_map(|property| match property {
        PageProperty::Title { title, .. } => Some(plain_text(title)),
        _ => None,
    })
}

/// Display title for a page object (root listing or database row).
pub fn page_title(page: &NotionPage) -> String {
    first_visible([title_property_text(page)], UNTITLED_PAGE)
}

/// Display title for a page known only through a `child_page` block.
pub fn child_page_title(embedded: &str) -> String {
    first_visible([Some(embedded.to_string())], UNTITLED_PAGE)
}

/// Display title for a database object.
pub fn database_title(database: &NotionDatabase) -> String {
    first_visible([Some(plain_text(&database.title))], UNTITLED_DATABASE)
}

/// Display title for a database known only through a `child_database` block.
pub fn child_database_title(embedded: &str) -> String {
    first_visible([Some(embedded.to_string())], UNTITLED_DATABASE)
}

/// Concatenates the plain text of rich-text runs given as raw JSON.
fn raw_plain_text(runs: &Value) -> Option<String> {
    let runs = runs.as_array()?;
    Some(
        runs.iter()
            .filter_map(|run| {
                run.get("plain_text")
                    .and_then(Value::as_str)
                    .or_else(|| run.pointer("/text/content").and_then(Value::as_str))
            })
            .collect(),
    )
}

/// Display title for a page object that only decoded as raw JSON.
pub fn raw_page_title(page: &Value) -> String {
    let title = page
        .get("properties")
        .and_then(Value::as_object)
        .and_then(|properties| {
            properties
                .values()
                .find(|property| property.get("type").and_then(Value::as_str) == Some("title"))
        })
        .and_then(|property| property.get("title"))
        .and_then(raw_plain_text);
    first_visible([title], UNTITLED_PAGE)
}

/// Display title for a database object that only decoded as raw JSON.
pub fn raw_database_title(database: &Value) -> String {
    let title = database.get("title").and_then(raw_plain_text);
    first_visible([title], UNTITLED_DATABASE)
}
