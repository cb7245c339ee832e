/// Locates the JSON payload inside raw model output
///
/// Models frequently wrap their JSON in a markdown fence or surround it with
/// prose. This strips a leading ```json / ``` fence, then narrows to the span
/// between the first `{` and the last `}`. Best effort: input with no such span
/// comes back trimmed but otherwise unchanged.
pub fn extract_json(raw: &str) -> &str {
    let text = strip_fences(raw.trim());

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}

fn strip_fences(text: &str) -> &str {
    let body = if let Some(rest) = text.strip_prefix("```json") {
        rest
    } else if let Some(rest) = text.strip_prefix("```") {
        rest
    } else {
        return text;
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
