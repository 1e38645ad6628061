//! Hard-wrap: fixed-width character chunking.
//!
//! Lines are split on `\n` and every line longer than `width` characters is
//! cut into `width`-sized pieces regardless of word boundaries, so a word can
//! straddle two lines. Resume output is laid out from exactly these chunks.

/// Splits `content` into display lines. An empty line (including empty
/// `content`) still yields one empty line.
pub fn hard_wrap(content: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for line in content.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.len() <= width {
            lines.push(line.to_string());
            continue;
        }
        // The final chunk may be exactly `width` long; it is never followed
        // by an empty chunk.
        lines.extend(chars.chunks(width).map(|c| c.iter().collect::<String>()));
    }

    lines
}
