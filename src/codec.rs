//! JSON wire codec for task records.
//!
//! Deliberately not a general-purpose JSON parser or serializer. Field
//! extraction pattern-matches `"key": value` pairs in a flat object and
//! takes the first occurrence only; nested objects, arrays, and repeated
//! keys are not handled. Rendering escapes exactly backslash and double
//! quote, and passes control characters and non-ASCII through untouched.
//! Clients depend on this wire shape, so the codec must stay byte-for-byte
//! compatible rather than grow into a correct JSON implementation.

use regex::Regex;

use crate::task::Task;

/// Extracts the two recognized fields from a raw request body.
///
/// Owns its compiled patterns; construct once and share.
#[derive(Debug)]
pub struct FieldExtractor {
    title: Regex,
    completed: Regex,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self {
            title: Regex::new(r#""title"\s*:\s*"((?:\\.|[^"\\])*)""#)
                .expect("hard-coded pattern compiles"),
            completed: Regex::new(r#""completed"\s*:\s*(true|false)"#)
                .expect("hard-coded pattern compiles"),
        }
    }

    /// First `"title"` string value in the body, with `\\` and `\"` escapes
    /// undone. `None` when the key is absent or its value is not a string.
    pub fn title(&self, body: &str) -> Option<String> {
        self.title
            .captures(body)
            .map(|caps| unescape(caps.get(1).map_or("", |m| m.as_str())))
    }

    /// First `"completed"` boolean literal in the body.
    pub fn completed(&self, body: &str) -> Option<bool> {
        self.completed
            .captures(body)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str()) == "true")
    }
}

/// Undo the two escapes [`render_task`] produces. Any other backslash
/// sequence is kept verbatim.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Escape a title for embedding in a JSON string: backslash and double
/// quote only. Not a general JSON escaper, by wire-compatibility contract.
fn escape(raw: &str) -> String {
    raw.replace('\\', r"\\").replace('"', "\\\"")
}

/// Render one task as its canonical JSON object text.
pub fn render_task(task: &Task) -> String {
    format!(
        "{{\"id\":{},\"title\":\"{}\",\"completed\":{},\"createdAt\":{}}}",
        task.id,
        escape(&task.title),
        task.completed,
        task.created_at
    )
}

/// Render an error body. The message is embedded unescaped; callers only
/// pass fixed ASCII messages.
pub fn render_error(message: &str) -> String {
    format!("{{\"error\":\"{}\"}}", message)
}

/// Render a JSON array of tasks; an empty slice renders `[]`.
pub fn render_list(tasks: &[Task]) -> String {
    let items: Vec<String> = tasks.iter().map(render_task).collect();
    format!("[{}]", items.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, title: &str, completed: bool, created_at: i64) -> Task {
        Task {
            id,
            title: title.to_string(),
            completed,
            created_at,
        }
    }

    #[test]
    fn title_extraction_basics() {
        let codec = FieldExtractor::new();
        assert_eq!(
            codec.title(r#"{"title":"Buy milk"}"#),
            Some("Buy milk".to_string())
        );
        assert_eq!(
            codec.title(r#"{ "title" :  "spaced" }"#),
            Some("spaced".to_string())
        );
        assert_eq!(codec.title(r#"{"completed":true}"#), None);
        assert_eq!(codec.title(r#"{"title":42}"#), None);
        assert_eq!(codec.title(""), None);
    }

    #[test]
    fn title_extraction_undoes_escapes() {
        let codec = FieldExtractor::new();
        assert_eq!(
            codec.title(r#"{"title":"say \"hi\""}"#),
            Some("say \"hi\"".to_string())
        );
        assert_eq!(
            codec.title(r#"{"title":"a\\b"}"#),
            Some(r"a\b".to_string())
        );
    }

    #[test]
    fn title_extraction_takes_first_match_only() {
        // Flat JSON with at most one occurrence per field is the supported
        // input; repeated keys silently resolve to the first one.
        let codec = FieldExtractor::new();
        assert_eq!(
            codec.title(r#"{"title":"first","title":"second"}"#),
            Some("first".to_string())
        );
        // A nested object's field wins if it appears earlier in the text.
        assert_eq!(
            codec.title(r#"{"meta":{"title":"inner"},"title":"outer"}"#),
            Some("inner".to_string())
        );
    }

    #[test]
    fn completed_extraction() {
        let codec = FieldExtractor::new();
        assert_eq!(codec.completed(r#"{"completed":true}"#), Some(true));
        assert_eq!(codec.completed(r#"{"completed" : false}"#), Some(false));
        assert_eq!(codec.completed(r#"{"completed":"true"}"#), None);
        assert_eq!(codec.completed(r#"{"title":"x"}"#), None);
    }

    #[test]
    fn render_task_is_wire_exact() {
        let t = task(7, "Buy milk", false, 1700000000000);
        assert_eq!(
            render_task(&t),
            r#"{"id":7,"title":"Buy milk","completed":false,"createdAt":1700000000000}"#
        );
    }

    #[test]
    fn render_task_escapes_only_backslash_and_quote() {
        let t = task(1, "a\\b \"c\"", true, 5);
        assert_eq!(
            render_task(&t),
            "{\"id\":1,\"title\":\"a\\\\b \\\"c\\\"\",\"completed\":true,\"createdAt\":5}"
        );

        // Control characters and non-ASCII pass through unescaped.
        let t = task(2, "tab\there ünïcode", false, 5);
        assert_eq!(
            render_task(&t),
            "{\"id\":2,\"title\":\"tab\there ünïcode\",\"completed\":false,\"createdAt\":5}"
        );
    }

    #[test]
    fn render_list_joins_with_commas() {
        assert_eq!(render_list(&[]), "[]");
        let tasks = [task(1, "a", false, 1), task(2, "b", true, 2)];
        assert_eq!(
            render_list(&tasks),
            r#"[{"id":1,"title":"a","completed":false,"createdAt":1},{"id":2,"title":"b","completed":true,"createdAt":2}]"#
        );
    }

    #[test]
    fn render_error_shape() {
        assert_eq!(render_error("Not Found"), r#"{"error":"Not Found"}"#);
    }

    #[test]
    fn extraction_roundtrips_rendered_title() {
        let codec = FieldExtractor::new();
        let t = task(3, "quote \" and slash \\", false, 9);
        let rendered = render_task(&t);
        assert_eq!(codec.title(&rendered), Some(t.title.clone()));
        assert_eq!(codec.completed(&rendered), Some(false));
    }
}
