use estimate_render_lopdf::text_width;

/// Breaks `text` into lines no wider than `max_width` points.
///
/// Lines break at spaces; a word that alone is too wide is split between
/// characters. Text that already fits comes back unchanged, including its
/// spacing.
pub fn break_lines(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let fits = |s: &str| text_width(s, font_size) <= max_width;
    if fits(text) {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if fits(word) {
            current = word.to_string();
            continue;
        }
        for c in word.chars() {
            current.push(c);
            if !fits(&current) && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::replace(&mut current, c.to_string()));
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
