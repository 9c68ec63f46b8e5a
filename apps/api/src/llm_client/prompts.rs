// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file only holds pieces that are not specific to one kind of document.

/// Style directive appended to prose-generation prompts.
pub const STYLE_INSTRUCTION: &str = "Try to match the writing style of the information provided, \
    if possible.  If not, then try to write in a simple, succinct and concise manner.";
