use crate::notion::{Block, NotionApi, NotionResult};

/// Block types whose text is used for title suggestions.
const TEXT_BLOCK_TYPES: &[&str] = &["paragraph", "heading_1", "heading_2", "heading_3"];

/// Block types that count as visible content even without text.
const ALWAYS_VISIBLE_TYPES: &[&str] = &[
    "image",
    "video",
    "file",
    "embed",
    "equation",
    "pdf",
    "bookmark",
    "table",
    "table_row",
    "synced_block",
    "link_to_page",
];

/// Text of the page's top-level paragraphs and headings.
pub async fn page_text<N: NotionApi + ?Sized>(notion: &N, page_id: &str) -> NotionResult<String> {
    let blocks = notion.list_block_children(page_id).await?.results;
    log::debug!("Content: {} top-level block(s) in {}", blocks.len(), page_id);
    Ok(extract_text(&blocks))
}

/// Whether the page has no visible content. Fetches the blocks again.
pub async fn page_is_empty<N: NotionApi + ?Sized>(notion: &N, page_id: &str) -> NotionResult<bool> {
    let blocks = notion.list_block_children(page_id).await?.results;
    Ok(blocks_are_empty(&blocks))
}

/// Join every text span of paragraph and heading blocks with single spaces.
pub fn extract_text(blocks: &[Block]) -> String {
    let pieces: Vec<String> = blocks
        .iter()
        .filter(|block| TEXT_BLOCK_TYPES.contains(&block.kind.as_str()))
        .filter_map(Block::rich_text)
        .flatten()
        .filter_map(|span| span.text_content().map(str::to_string))
        .collect();

    pieces.join(" ").trim().to_string()
}

/// True when no block carries text, is an always-visible type, or has other data.
///
/// A block with a `rich_text` list is judged on its text alone.
pub fn blocks_are_empty(blocks: &[Block]) -> bool {
    match blocks.iter().find(|block| block_has_content(block)) {
        Some(block) => {
            log::debug!("Content: block {} ({}) is visible content", block.id, block.kind);
            false
        }
        None => true,
    }
}

fn block_has_content(block: &Block) -> bool {
    if let Some(spans) = block.rich_text() {
        return spans
            .iter()
            .filter_map(|span| span.text_content())
            .any(|content| !content.trim().is_empty());
    }

    ALWAYS_VISIBLE_TYPES.contains(&block.kind.as_str()) || block.has_data()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn block(kind: &str, data: Value) -> Block {
        let value = json!({ "id": format!("{kind}-id"), "type": kind, kind: data });
        serde_json::from_value(value).unwrap()
    }

    fn text_block(kind: &str, spans: &[&str]) -> Block {
        let rich_text: Vec<Value> = spans
            .iter()
            .map(|s| json!({ "type": "text", "text": { "content": s } }))
            .collect();
        block(kind, json!({ "rich_text": rich_text, "color": "default" }))
    }

    #[test]
    fn test_extract_text_joins_blocks_and_spans() {
        let blocks = vec![
            text_block("heading_1", &["  Meeting"]),
            text_block("paragraph", &["notes", "for Monday  "]),
            text_block("to_do", &["ignored task"]),
            text_block("heading_3", &["wrap-up"]),
        ];
        assert_eq!(extract_text(&blocks), "Meeting notes for Monday   wrap-up");
    }

    #[test]
    fn test_extract_text_skips_non_text_spans() {
        let paragraph = block(
            "paragraph",
            json!({
                "rich_text": [
                    { "type": "mention", "mention": { "type": "page", "page": { "id": "x" } } },
                    { "type": "text", "text": { "content": "Budget" } },
                    { "type": "equation", "equation": { "expression": "x^2" } }
                ]
            }),
        );
        assert_eq!(extract_text(&[paragraph]), "Budget");
    }

    #[test]
    fn test_extract_text_without_qualifying_blocks() {
        assert_eq!(extract_text(&[]), "");
        assert_eq!(extract_text(&[text_block("quote", &["words"])]), "");
        assert_eq!(extract_text(&[text_block("paragraph", &[])]), "");
    }

    #[test]
    fn test_blank_text_blocks_are_empty() {
        let blocks = vec![
            text_block("paragraph", &["", "   "]),
            text_block("heading_2", &[""]),
            text_block("to_do", &["\n"]),
            block("divider", json!({})),
        ];
        assert!(blocks_are_empty(&blocks));
        assert!(blocks_are_empty(&[]));
    }

    #[test]
    fn test_image_block_is_content() {
        let blocks = vec![
            text_block("paragraph", &[""]),
            block("image", json!({})),
        ];
        assert!(!blocks_are_empty(&blocks));
    }

    #[test]
    fn test_text_in_any_rich_text_block_is_content() {
        for kind in ["to_do", "callout", "toggle", "quote", "code", "bulleted_list_item"] {
            assert!(
                !blocks_are_empty(&[text_block(kind, &["x"])]),
                "{kind} with text should be content"
            );
        }
    }

    #[test]
    fn test_other_block_data_is_content() {
        let child_page = block("child_page", json!({ "title": "Sub page" }));
        assert!(!blocks_are_empty(&[child_page]));
    }
}
