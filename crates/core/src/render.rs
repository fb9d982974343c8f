use serde::de::IgnoredAny;

const INDENT: &str = "  ";

/// Formats one received frame for display.
///
/// Valid JSON is re-indented with two spaces. Only whitespace outside
/// strings changes: member order, duplicate members and number text are
/// kept as sent. Anything else is shown as-is.
pub fn render_frame(frame: &[u8]) -> String {
    if serde_json::from_slice::<IgnoredAny>(frame).is_ok() {
        if let Ok(text) = std::str::from_utf8(frame) {
            return format!("recv:\n{}", indent_json(text));
        }
    }
    format!("recv: {}", String::from_utf8_lossy(frame))
}

/// Re-indents already validated JSON text token by token.
fn indent_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    // an opening bracket was written; its newline waits to see if it is empty
    let mut just_opened = false;

    for c in json.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if matches!(c, ' ' | '\t' | '\n' | '\r') {
            continue;
        }
        if just_opened {
            just_opened = false;
            if c == '}' || c == ']' {
                depth = depth.saturating_sub(1);
                out.push(c);
                continue;
            }
            newline(&mut out, depth);
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '{' | '[' => {
                out.push(c);
                depth += 1;
                just_opened = true;
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                newline(&mut out, depth);
                out.push(c);
            }
            ',' => {
                out.push(c);
                newline(&mut out, depth);
            }
            ':' => out.push_str(": "),
            _ => out.push(c),
        }
    }
    out
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
