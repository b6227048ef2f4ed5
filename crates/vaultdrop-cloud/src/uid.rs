//! Unique identifier generation
//!
//! Identifiers bind one distributed object to its tag and its shareable URL.
//! They are derived from timestamp plus process-local entropy, with no
//! external coordination.

use std::sync::Mutex;
use std::sync::OnceLock;
use uuid::Uuid;
use uuid::timestamp::Timestamp;
use uuid::timestamp::context::ContextV7;

static CONTEXT: OnceLock<Mutex<ContextV7>> = OnceLock::new();

/// Generate a fresh identifier for one distributed object.
///
/// UUIDv7 in simple form: 32 lowercase hex characters. Ids are time-ordered
/// (lexicographic order follows generation order), unique within the
/// process across arbitrarily many calls, and safe in a URL path segment
/// without further encoding.
pub fn generate() -> String {
    let context = CONTEXT.get_or_init(|| Mutex::new(ContextV7::new()));
    Uuid::new_v7(Timestamp::now(context)).simple().to_string()
}
