//! Prompt construction for the rewrite call.

use ce_core::ReferenceArticle;

/// Per-reference character budget. Keeps the prompt bounded no matter
/// how long a competitor article is.
pub const REFERENCE_CHAR_BUDGET: usize = 3000;

const TRUNCATION_MARKER: &str = "...[truncated]";

fn truncate_chars(text: &str, budget: usize) -> (String, bool) {
    if text.chars().count() <= budget {
        (text.to_string(), false)
    } else {
        (text.chars().take(budget).collect(), true)
    }
}

fn reference_context(references: &[ReferenceArticle]) -> String {
    if references.is_empty() {
        return "No external articles provided for this enrichment.".to_string();
    }

    references
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let (content, truncated) = truncate_chars(&r.content, REFERENCE_CHAR_BUDGET);
            let marker = if truncated { TRUNCATION_MARKER } else { "" };
            format!(
                "=== External Article {}: \"{}\" ===\nSource: {}\n\n{}\n{}",
                i + 1,
                r.title,
                r.url,
                content,
                marker
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the full rewrite prompt: original article, competitor context,
/// rewrite instructions.
pub fn build_prompt(title: &str, original_content: &str, references: &[ReferenceArticle]) -> String {
    format!(
        r#"You are an expert content writer and SEO specialist. Your task is to rewrite and improve an article based on high-ranking competitor content.

## ORIGINAL ARTICLE
Title: "{title}"

Content:
{original_content}

## HIGH-RANKING COMPETITOR ARTICLES FOR REFERENCE
{context}

## YOUR TASK
Rewrite the original article to make it:
1. More comprehensive and in-depth like the competitors
2. Better structured with clear headings and subheadings
3. More engaging with improved formatting
4. SEO-optimized while keeping the original core message
5. Include relevant examples and actionable insights

## OUTPUT REQUIREMENTS
- Write the improved article in Markdown format
- Include H2 and H3 headings for structure
- Keep the same general topic and key points
- Make it at least as long as the original
- Write in a professional, engaging tone
- Do NOT include any citations or references (they will be added separately)

Write the improved article below:"#,
        title = title,
        original_content = original_content,
        context = reference_context(references),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(content: &str) -> ReferenceArticle {
        ReferenceArticle {
            title: "Ref Title".to_string(),
            content: content.to_string(),
            url: "https://ref.example.com".to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_original_and_reference() {
        let prompt = build_prompt("My Title", "Original body.", &[reference("Competitor body.")]);
        assert!(prompt.contains("Title: \"My Title\""));
        assert!(prompt.contains("Original body."));
        assert!(prompt.contains("External Article 1: \"Ref Title\""));
        assert!(prompt.contains("Source: https://ref.example.com"));
        assert!(!prompt.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn test_long_reference_is_truncated_with_marker() {
        let long = "a".repeat(REFERENCE_CHAR_BUDGET + 500);
        let prompt = build_prompt("T", "C", &[reference(&long)]);
        assert!(prompt.contains(TRUNCATION_MARKER));
        // The overlong tail must not survive into the prompt.
        assert!(!prompt.contains(&"a".repeat(REFERENCE_CHAR_BUDGET + 1)));
    }

    #[test]
    fn test_empty_reference_list_gets_placeholder() {
        let prompt = build_prompt("T", "C", &[]);
        assert!(prompt.contains("No external articles provided for this enrichment."));
    }
}
