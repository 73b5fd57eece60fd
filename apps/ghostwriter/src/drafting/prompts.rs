// Prompt text for draft generation.

use crate::drafting::models::{Audience, DocumentType};

/// Base system prompt. Replace `{doc_type}` and `{audience}` before sending.
const DRAFT_SYSTEM_TEMPLATE: &str = "\
You are a technical writer with all the experience and expertise of a 20 year career professional. \
Generate a professional {doc_type} for {audience}.
Use Markdown format, H1/H2, bullets or numbers, avoid repetition and marketing fluff. \
Be direct and helpful.";

const STYLE_GUIDE_PREAMBLE: &str = "Strictly follow this additional style guide:";

/// User message template. Replace `{doc_type}`, `{audience}` and `{product_info}`.
const DRAFT_USER_TEMPLATE: &str = "\
DOCUMENT TYPE: {doc_type}
AUDIENCE: {audience}
PRODUCT INFO:
{product_info}
";

/// Builds the system prompt, appending the style guide when one is active.
pub fn build_system_prompt(
    doc_type: DocumentType,
    audience: Audience,
    style_guide: Option<&str>,
) -> String {
    let mut prompt = DRAFT_SYSTEM_TEMPLATE
        .replace("{doc_type}", doc_type.display_name())
        .replace("{audience}", audience.display_name());

    if let Some(guide) = style_guide.map(str::trim).filter(|g| !g.is_empty()) {
        prompt.push_str("\n\n");
        prompt.push_str(STYLE_GUIDE_PREAMBLE);
        prompt.push('\n');
        prompt.push_str(guide);
    }
    prompt
}

pub fn build_user_prompt(doc_type: DocumentType, audience: Audience, product_info: &str) -> String {
    DRAFT_USER_TEMPLATE
        .replace("{doc_type}", doc_type.display_name())
        .replace("{audience}", audience.display_name())
        .replace("{product_info}", product_info)
}
