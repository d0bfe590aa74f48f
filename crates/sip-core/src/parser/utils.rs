// Framing helpers: locating the end of the header block and turning it into
// unfolded logical lines.

use super::whitespace::{is_wsp, trim_wsp};

/// Blank-line boundaries accepted between header block and body, tolerant of
/// both CRLF and bare LF line endings.
const HEADER_TERMINATORS: [&[u8]; 4] = [b"\r\n\r\n", b"\n\n", b"\r\n\n", b"\n\r\n"];

/// Skips CRLF keep-alives that some UAs send ahead of a message
pub fn skip_leading_line_endings(input: &[u8]) -> &[u8] {
    let start = input
        .iter()
        .position(|&c| c != b'\r' && c != b'\n')
        .unwrap_or(input.len());
    &input[start..]
}

/// Splits a message at the first blank line.
///
/// Returns the header block (start line included) and whatever follows the
/// blank line. Without a blank line the whole input is the header block.
pub fn split_head_body(input: &[u8]) -> (&[u8], &[u8]) {
    let boundary = HEADER_TERMINATORS
        .iter()
        .filter_map(|term| find(input, term).map(|idx| (idx, term.len())))
        .min_by_key(|&(idx, _)| idx);

    match boundary {
        Some((idx, len)) => (&input[..idx], &input[idx + len..]),
        None => (input, &input[input.len()..]),
    }
}

/// Splits the header block into logical lines.
///
/// A line starting with SP or HTAB continues the previous one (RFC 3261
/// Section 7.3.1); it is joined with a single SP. Blank lines are dropped.
pub fn logical_lines(head: &[u8]) -> Vec<Vec<u8>> {
    let mut lines: Vec<Vec<u8>> = Vec::new();

    for raw in head.split(|&c| c == b'\n') {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

        if raw.first().copied().is_some_and(is_wsp) {
            let continuation = trim_wsp(raw);
            if let Some(last) = lines.last_mut() {
                if !continuation.is_empty() {
                    let keep = last.iter().rposition(|&c| !is_wsp(c)).map_or(0, |i| i + 1);
                    last.truncate(keep);
                    last.push(b' ');
                    last.extend_from_slice(continuation);
                }
                continue;
            }
        }

        if trim_wsp(raw).is_empty() {
            continue;
        }
        lines.push(raw.to_vec());
    }

    lines
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_head_body_crlf() {
        let (head, body) = split_head_body(b"INVITE x SIP/2.0\r\nA: 1\r\n\r\nv=0\r\n");
        assert_eq!(head, b"INVITE x SIP/2.0\r\nA: 1");
        assert_eq!(body, b"v=0\r\n");
    }

    #[test]
    fn test_split_head_body_bare_lf() {
        let (head, body) = split_head_body(b"SIP/2.0 200 OK\nA: 1\n\nbody");
        assert_eq!(head, b"SIP/2.0 200 OK\nA: 1");
        assert_eq!(body, b"body");
    }

    #[test]
    fn test_split_head_body_mixed_endings() {
        let (head, body) = split_head_body(b"SIP/2.0 200 OK\r\nA: 1\r\n\nbody");
        assert_eq!(head, b"SIP/2.0 200 OK\r\nA: 1");
        assert_eq!(body, b"body");
    }

    #[test]
    fn test_split_without_blank_line() {
        let (head, body) = split_head_body(b"SIP/2.0 200 OK\r\nA: 1\r\n");
        assert_eq!(head, b"SIP/2.0 200 OK\r\nA: 1\r\n");
        assert!(body.is_empty());
    }

    #[test]
    fn test_skip_leading_line_endings() {
        assert_eq!(skip_leading_line_endings(b"\r\n\r\nINVITE"), b"INVITE");
        assert_eq!(skip_leading_line_endings(b"\r\n"), b"");
    }

    #[test]
    fn test_logical_lines_unfolds_continuations() {
        let lines = logical_lines(b"Subject: I know you're there,\r\n   pick up the phone\r\nTo: bob");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], b"Subject: I know you're there, pick up the phone".to_vec());
        assert_eq!(lines[1], b"To: bob".to_vec());
    }

    #[test]
    fn test_logical_lines_tab_fold_and_trailing_space() {
        let lines = logical_lines(b"Via: a \n\tb");
        assert_eq!(lines, vec![b"Via: a b".to_vec()]);
    }
}
