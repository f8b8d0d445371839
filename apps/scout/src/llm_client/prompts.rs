// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// Appended to every analysis prompt. JSON mode already constrains the shape;
/// this keeps the model from wrapping it in prose.
pub const JSON_ONLY_INSTRUCTION: &str = "只输出符合给定 JSON Schema 的 JSON 对象，不要输出任何额外文字、解释或 Markdown 代码块。";
