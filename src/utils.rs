/// Renders a signature string with a caret under the given byte offset.
/// Only called on the error path; offsets are clamped to the input length.
pub fn position_indicator(source: &str, offset: usize) -> String {
    let clamped = offset.min(source.len());
    let columns = source[..clamped].chars().count();
    format!("  {}\n  {}^", source, "-".repeat(columns))
}
