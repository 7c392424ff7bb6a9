//! Substring scanning helpers for loosely structured JSON text.
//!
//! These never validate the document. A key is matched only when it appears
//! quoted and is followed by a colon, so `"symbol"` never matches inside
//! `"underlyingSymbol"` and a string value equal to a key name is skipped.

/// Byte offsets where the value of each `"key":` occurrence starts.
///
/// Whitespace between the key, the colon and the value is skipped.
pub(crate) fn value_offsets<'a>(text: &'a str, key: &str) -> impl Iterator<Item = usize> + 'a {
    let needle = format!("\"{}\"", key);
    let needle_len = needle.len();
    text.match_indices(&needle)
        .map(|(pos, _)| pos + needle_len)
        .collect::<Vec<_>>()
        .into_iter()
        .filter_map(move |after_key| {
            let rest = &text[after_key..];
            let colon = rest.len() - rest.trim_start().len();
            let rest = rest[colon..].strip_prefix(':')?;
            let ws = rest.len() - rest.trim_start().len();
            Some(after_key + colon + 1 + ws)
        })
}

/// Value text of the first `"key":` occurrence, running to the end of `text`.
pub(crate) fn value_of<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    value_offsets(text, key).next().map(|offset| &text[offset..])
}

/// Text between the value of `start_key` and the next quoted `end_key`.
///
/// Runs to the end of `text` when `end_key` never follows. Empty when
/// `start_key` is absent.
pub(crate) fn region<'a>(text: &'a str, start_key: &str, end_key: &str) -> &'a str {
    let Some(start) = value_offsets(text, start_key).next() else {
        return "";
    };
    let rest = &text[start..];
    let end_marker = format!("\"{}\"", end_key);
    match rest.find(&end_marker) {
        Some(end) => &rest[..end],
        None => rest,
    }
}

/// Text from the value of `key` to the end of `text`, empty when absent.
pub(crate) fn tail_from<'a>(text: &'a str, key: &str) -> &'a str {
    value_of(text, key).unwrap_or("")
}

/// Contents of a `"key":"..."` string value, up to the next quote.
pub(crate) fn string_value(text: &str, key: &str) -> Option<String> {
    let value = value_of(text, key)?.strip_prefix('"')?;
    let end = value.find('"')?;
    Some(value[..end].to_string())
}

/// Raw scalar token of `"key":`, up to the next comma or closing brace.
pub(crate) fn scalar_token<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let value = value_of(text, key)?;
    let end = value.find([',', '}']).unwrap_or(value.len());
    Some(value[..end].trim())
}

/// Trimmed tokens of the first `"key":[...]` array value.
///
/// Occurrences of `key` whose value is not an array are skipped.
pub(crate) fn array_tokens<'a>(text: &'a str, key: &str) -> Vec<&'a str> {
    let Some(inner) = value_offsets(text, key)
        .map(|offset| &text[offset..])
        .find_map(|value| value.strip_prefix('['))
    else {
        return Vec::new();
    };
    let inner = match inner.find(']') {
        Some(end) => &inner[..end],
        None => inner,
    };
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner.split(',').map(str::trim).collect()
}

/// Finite floating point value of a token; `null`, garbage and NaN/inf yield `None`.
pub(crate) fn parse_f64(token: &str) -> Option<f64> {
    if token == "null" {
        return None;
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integer value of a token; float tokens are truncated toward zero.
pub(crate) fn parse_i64(token: &str) -> Option<i64> {
    if token == "null" {
        return None;
    }
    token
        .parse::<i64>()
        .ok()
        .or_else(|| parse_f64(token).map(|v| v.trunc() as i64))
}
