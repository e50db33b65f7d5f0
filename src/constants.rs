//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story
//! of how the traversal operates: how much it asks for per request,
//! how often it reports, and what it calls things that have no name.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. Root discovery and database row
/// listings fetch a single page of this size; block children are
/// paginated until exhausted.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// The Notion API version header sent with every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// How many times a request answered with `429 rate_limited` is attempted
/// before the rate-limit error is returned to the caller.
pub const RATE_LIMIT_MAX_ATTEMPTS: u32 = 3;

/// Upper bound on a single `Retry-After` wait, in seconds.
pub const RATE_LIMIT_MAX_WAIT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// A node-count progress event fires once per this many visited nodes.
pub const PROGRESS_SAMPLE_INTERVAL: usize = 5;

// ---------------------------------------------------------------------------
// Title fallbacks
// ---------------------------------------------------------------------------

/// Display title for a page whose title property is missing or blank.
pub const UNTITLED_PAGE: &str = "Untitled";

/// Display title for a database whose title is missing or blank.
pub const UNTITLED_DATABASE: &str = "Untitled Database";

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// File name of the debug log written to the system temp directory.
pub const LOG_FILE_NAME: &str = "notion_tree.log";
