use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// A page as returned by search. Properties stay raw so a malformed title
/// shape is handled by title resolution rather than failing the whole page.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    pub last_edited_time: String,
    #[serde(default)]
    pub properties: Value,
}

impl Page {
    /// Last-edited date as `YYYY-MM-DD`.
    pub fn last_edited_date(&self) -> String {
        match self.last_edited_time.parse::<DateTime<Utc>>() {
            Ok(ts) => ts.format("%Y-%m-%d").to_string(),
            Err(_) => self.last_edited_time.chars().take(10).collect(),
        }
    }

    /// Browser URL for the page: the id without hyphens under `base`.
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.id.replace('-', ""))
    }
}

/// A block with its type-specific payload kept under the key named by `type`.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Block {
    /// Type-specific data, e.g. the `paragraph` object of a paragraph block.
    pub fn data(&self) -> Option<&Value> {
        self.fields.get(&self.kind)
    }

    /// True when the type-specific data carries anything at all.
    pub fn has_data(&self) -> bool {
        match self.data() {
            None | Some(Value::Null) => false,
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        }
    }

    /// The block's `rich_text` spans, or `None` if its data has no such list.
    ///
    /// Spans that do not parse are dropped.
    pub fn rich_text(&self) -> Option<Vec<RichText>> {
        let spans = self.data()?.get("rich_text")?.as_array()?;
        Some(
            spans
                .iter()
                .filter_map(|span| serde_json::from_value(span.clone()).ok())
                .collect(),
        )
    }
}

/// A rich-text span. Only `text` spans carry content used by this tool.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichText {
    Text { text: TextContent },
    #[serde(other)]
    Other,
}

impl RichText {
    pub fn text_content(&self) -> Option<&str> {
        match self {
            RichText::Text { text } => Some(&text.content),
            RichText::Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextContent {
    pub content: String,
}

/// One page of search results.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Page>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// One page of block children.
#[derive(Debug, Deserialize)]
pub struct BlockList {
    pub results: Vec<Block>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Error body returned by Notion on non-success responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Properties payload that sets the page title to a single text span.
pub fn title_properties(title: &str) -> Value {
    serde_json::json!({
        "title": {
            "title": [{ "text": { "content": title } }]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(value: Value) -> Block {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_block_data_and_rich_text() {
        let b = block(json!({
            "object": "block",
            "id": "b1",
            "type": "paragraph",
            "has_children": false,
            "paragraph": {
                "rich_text": [
                    {
                        "type": "text",
                        "text": { "content": "Hello", "link": null },
                        "plain_text": "Hello"
                    },
                    { "type": "mention", "mention": { "type": "date" }, "plain_text": "today" }
                ],
                "color": "default"
            }
        }));

        assert_eq!(b.kind, "paragraph");
        assert!(b.has_data());
        let spans = b.rich_text().unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text_content(), Some("Hello"));
        assert_eq!(spans[1], RichText::Other);
    }

    #[test]
    fn test_block_without_rich_text() {
        let divider = block(json!({ "id": "b2", "type": "divider", "divider": {} }));
        assert!(divider.rich_text().is_none());
        assert!(!divider.has_data());

        let missing = block(json!({ "id": "b3", "type": "unsupported" }));
        assert!(missing.data().is_none());
        assert!(!missing.has_data());
    }

    #[test]
    fn test_zero_number_data_is_empty() {
        let zero = block(json!({ "id": "b4", "type": "counter", "counter": 0 }));
        let seven = block(json!({ "id": "b5", "type": "counter", "counter": 7 }));
        assert!(!zero.has_data());
        assert!(seven.has_data());
    }

    #[test]
    fn test_search_response_keeps_page_with_null_properties() {
        let edited = "2024-01-01T00:00:00.000Z";
        let response: SearchResponse = serde_json::from_value(json!({
            "results": [
                { "id": "ok", "last_edited_time": edited, "properties": {} },
                { "id": "bad", "last_edited_time": edited, "properties": null },
                { "id": "odd", "last_edited_time": edited, "properties": [1, 2] }
            ],
            "next_cursor": null,
            "has_more": false
        }))
        .unwrap();

        assert_eq!(response.results.len(), 3);
        assert!(response.results[1].properties.is_null());
        assert!(response.results[2].properties.is_array());
    }

    #[test]
    fn test_page_url_and_date() {
        let page: Page = serde_json::from_value(json!({
            "id": "1a2b3c4d-0000-1111-2222-333344445555",
            "last_edited_time": "2024-03-09T18:22:00.000Z"
        }))
        .unwrap();

        assert!(page.properties.is_null());
        assert_eq!(page.last_edited_date(), "2024-03-09");
        assert_eq!(
            page.url("https://www.notion.so/"),
            "https://www.notion.so/1a2b3c4d000011112222333344445555"
        );
    }

    #[test]
    fn test_title_properties_shape() {
        let props = title_properties("Weekly sync");
        assert_eq!(props["title"]["title"][0]["text"]["content"], "Weekly sync");
    }
}
