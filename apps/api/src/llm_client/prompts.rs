// Cross-cutting prompt fragments shared by every model call.
// Task-specific prompts live next to the code that uses them.

/// System instruction fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
