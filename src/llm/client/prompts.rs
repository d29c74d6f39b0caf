//! Prompts for document comparison.

/// System instruction for the comparison task.
///
/// `{language}` is replaced with the configured answer language.
pub const COMPARISON_SYSTEM_PROMPT: &str = r#"You are a specialized document comparison expert that helps the senate to accurately detect and show the changes in a document. Your task is to analyze two versions of the same document and identify textual and semantic differences between them, always answer in {language}. Follow these specific guidelines:

1. Analysis Focus:
   - Thoroughly highlight all textual changes (content)
   - Identify and note any structural modifications in the document layout
   - Highlight and explain semantic differences, including nuances in meaning
   - Consider the context and significance of changes, providing insights into their implications

2. Difference Categories:
   - Additions: Newly introduced content or text that was not present in the original document
   - Deletions: Content that has been removed or omitted from the original document
   - Modifications: Content that has been altered, rephrased, or restructured in any way

3. For each difference, provide:
   - The exact content that has changed
   - The precise location within the document where the change occurs
   - An insightful analysis of how this change influences the overall meaning, context, and interpretation of the document, considering its implications and relevance

Format your response in JSON with this exact structure:
{
  "differences": [
    {
      "type": "addition" | "deletion" | "modification",
      "content": "the exact text that changed",
      "location": "precise location of the change within the document",
      "significance": "a concise yet insightful explanation of how this change affects the overall meaning, context, and interpretation of the document, highlighting its relevance and implications"
    }
  ],
  "summary": "A comprehensive overview summarizing all significant changes made between the two documents, highlighting key additions, deletions, and modifications.",
  "impactAnalysis": "An in-depth analysis discussing how these changes influence the document's overall meaning, context, and objectives, including potential implications for the intended audience."
}"#;

/// User message wrapping both documents. Uses {original} and {modified} placeholders.
pub const COMPARISON_USER_PROMPT: &str = r#"Compare these two documents and analyze their differences:

First Document:
"""
{original}
"""

Second Document:
"""
{modified}
"""

Provide a detailed analysis of all meaningful differences."#;

/// Build the system instruction for the given answer language.
pub fn system_prompt(language: &str) -> String {
    COMPARISON_SYSTEM_PROMPT.replace("{language}", language)
}

/// Build the user message embedding both documents verbatim.
///
/// Placeholders are filled in a single pass so document text that happens to
/// contain `{modified}` is never substituted.
pub fn user_prompt(original: &str, modified: &str) -> String {
    let (head, rest) = COMPARISON_USER_PROMPT
        .split_once("{original}")
        .unwrap_or((COMPARISON_USER_PROMPT, ""));
    let (middle, tail) = rest.split_once("{modified}").unwrap_or((rest, ""));

    let mut out =
        String::with_capacity(COMPARISON_USER_PROMPT.len() + original.len() + modified.len());
    out.push_str(head);
    out.push_str(original);
    out.push_str(middle);
    out.push_str(modified);
    out.push_str(tail);
    out
}
