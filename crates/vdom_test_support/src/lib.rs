use vdom::Node;
use vdom::dom_snapshot::DomSnapshot;

pub mod reconcile_cases;

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;
    fn line_at(lines: &[String], i: usize) -> &str {
        lines.get(i).map(String::as_str).unwrap_or("<missing>")
    }

    let max = expected.len().max(actual.len());
    let mismatch = (0..max).find(|&i| line_at(expected, i) != line_at(actual, i));

    let mut out = String::new();
    if let Some(i) = mismatch {
        let start = i.saturating_sub(2);
        let end = (i + 3).min(max);
        let _ = writeln!(
            &mut out,
            "first mismatch at line {} (showing {}..={}):",
            i + 1,
            start + 1,
            end
        );
        for line_idx in start..end {
            let left = line_at(expected, line_idx);
            let right = line_at(actual, line_idx);
            let marker = if line_idx == i { ">" } else { " " };
            let _ = writeln!(&mut out, "{marker} {:>4}  expected: {left}", line_idx + 1);
            let _ = writeln!(&mut out, "{marker} {:>4}    actual: {right}", line_idx + 1);
        }
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

/// Compare two trees line by line through their snapshot rendering and panic
/// with a focused diff on the first differing line.
pub fn assert_same_snapshot(context: &str, expected: &Node, actual: &Node) {
    let expected = DomSnapshot::new(expected);
    let actual = DomSnapshot::new(actual);
    if expected.as_lines() != actual.as_lines() {
        panic!(
            "{context}: snapshots differ\n{}",
            diff_lines(expected.as_lines(), actual.as_lines())
        );
    }
}
