//! Source preparation for preset expression blocks.
//!
//! Preset files carry expression code as numbered key/value lines
//! (`per_frame_1=...`, `per_frame_2=...`), and authors freely split
//! argument lists across lines, leave off trailing semicolons, and drop
//! in `//` comments. Before lexing, a block is normalized:
//!
//! 1. Strip `//` comments to end of line.
//! 2. Join any line ending with `,` to its successor with a single space
//!    (argument lists split across preset lines).
//! 3. Trim every line and force it to end with `;`.
//!
//! The result has one complete statement list per line, each terminated.
//! Running the normalization twice yields the same output (the driver
//! relies on this being safe to apply defensively).

/// Normalize a block of expression source.
///
/// # Examples
///
/// ```
/// use milkc_lex::normalize;
///
/// let code = "zoom = 1.2 // pulse\nrot = min(rot,\n 0.1)";
/// assert_eq!(normalize(code), "zoom = 1.2;\nrot = min(rot, 0.1);\n");
/// ```
pub fn normalize(code: &str) -> String {
    // Pass 1: strip line comments.
    let stripped: Vec<&str> = code.lines().map(strip_comment).collect();

    // Pass 2: join continuation lines (trailing comma).
    let mut joined: Vec<String> = Vec::new();
    let mut current = String::new();
    for line in &stripped {
        let line = line.trim_end();
        if current.is_empty() {
            current.push_str(line);
        } else {
            current.push(' ');
            current.push_str(line.trim_start());
        }
        if current.trim_end().ends_with(',') {
            continue;
        }
        joined.push(std::mem::take(&mut current));
    }
    if !current.is_empty() {
        joined.push(current);
    }

    // Pass 3: trim, drop empties, terminate each line with ';'.
    let mut result = String::new();
    for line in &joined {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        result.push_str(line);
        if !line.ends_with(';') {
            result.push(';');
        }
        result.push('\n');
    }
    result
}

/// Cut a line at the first `//`.
fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    }
}
