//! Line framing for the chat widget's streaming text parser.
//!
//! Every text part is written as one line, `0:"<escaped text>"\n`. Only double
//! quotes and newlines are escaped; everything else passes through verbatim.

const TEXT_PART_PREFIX: &str = "0:\"";
const TEXT_PART_SUFFIX: &str = "\"\n";

/// Frames a text fragment as a single text-part line.
/// Returns `None` for an empty fragment, which must not produce a line.
pub fn encode_text_part(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let escaped = text.replace('"', "\\\"").replace('\n', "\\n");
    Some(format!("{TEXT_PART_PREFIX}{escaped}{TEXT_PART_SUFFIX}"))
}

/// Inverse of [`encode_text_part`]: recovers the fragment from one framed line.
pub fn decode_text_part(line: &str) -> Option<String> {
    let body = line.strip_prefix(TEXT_PART_PREFIX)?.strip_suffix(TEXT_PART_SUFFIX)?;

    let mut text = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('"') => {
                    chars.next();
                    text.push('"');
                    continue;
                }
                Some('n') => {
                    chars.next();
                    text.push('\n');
                    continue;
                }
                _ => {}
            }
        }
        text.push(c);
    }
    Some(text)
}
