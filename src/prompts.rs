//! Prompts for the redaction summarizer.
//!
//! Centralising the prompt here keeps a single source of truth and lets unit
//! tests inspect the exact text sent to the model without invoking one.
//!
//! The instructions are deliberately restrictive: the model sees only
//! already-redacted text and must not reintroduce sensitive content, invent
//! information not present in the text, or add greetings/preamble around the
//! list.

/// Instruction block placed before the redacted text.
pub const SUMMARY_PROMPT_HEADER: &str = "You are a medical document summarizer. \
Analyze the following redacted text and provide a brief summary on what is \
redacted and why in a list manner:";

/// Instruction block placed after the redacted text.
pub const SUMMARY_PROMPT_FOOTER: &str = "Do not include any sensitive information \
and information not present in the provided text. Do not include any additional \
text, greetings, or signatures. Start directly with the list:";

/// Build the full summarization prompt for one document.
pub fn summary_prompt(redacted_text: &str) -> String {
    format!("{SUMMARY_PROMPT_HEADER}\n\n{redacted_text}\n{SUMMARY_PROMPT_FOOTER}\n")
}
