//! Character entity handling shared by the lexer and the renderer

use std::borrow::Cow;

/// Longest entity name looked at before giving up on a reference
const MAX_ENTITY_LEN: usize = 10;

/// Escape `& < > " '` for text content
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape_with(input, false)
}

/// Escape an attribute value for a double-quoted position
///
/// Backslashes are doubled as well since the lexer treats them as escapes
/// inside quoted values.
pub fn escape_attribute(input: &str) -> Cow<'_, str> {
    escape_with(input, true)
}

fn escape_with(input: &str, backslash: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>' | '"' | '\'') || (backslash && c == '\\');
    if !input.chars().any(needs_escape) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            '\\' if backslash => result.push_str("\\\\"),
            c => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Decode predefined and numeric character references
///
/// Unknown or malformed references are kept verbatim.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        let (head, tail) = rest.split_at(amp);
        result.push_str(head);
        match decode_reference(tail) {
            Some((ch, consumed)) => {
                result.push(ch);
                rest = tail.get(consumed..).unwrap_or_default();
            }
            None => {
                result.push('&');
                rest = tail.get(1..).unwrap_or_default();
            }
        }
    }
    result.push_str(rest);
    Cow::Owned(result)
}

/// Decode the reference at the start of `input` (which begins with `&`),
/// returning the character and the number of bytes it spans
fn decode_reference(input: &str) -> Option<(char, usize)> {
    let end = input.get(1..)?.find(';')?;
    if end == 0 || end > MAX_ENTITY_LEN {
        return None;
    }
    let entity = input.get(1..=end)?;
    let ch = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => decode_numeric_entity(entity)?,
    };
    Some((ch, end + 2))
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        if dec.is_empty() || !dec.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}
