use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Maps smart typography to decimal numeric character references and escapes
/// `&`, `<`, `>` for everything else. The single pass guarantees that a
/// reference's own `&`/`;` are never re-escaped.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2018}' => out.push_str("&#8216;"),
            '\u{2019}' => out.push_str("&#8217;"),
            '\u{201C}' => out.push_str("&#8220;"),
            '\u{201D}' => out.push_str("&#8221;"),
            '\u{2013}' => out.push_str("&#8211;"),
            '\u{2014}' => out.push_str("&#8212;"),
            '\u{2026}' => out.push_str("&#8230;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

static NAMED: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    HashMap::from([
        ("amp", '&'),
        ("lt", '<'),
        ("gt", '>'),
        ("quot", '"'),
        ("apos", '\''),
        ("nbsp", '\u{a0}'),
        ("lsquo", '\u{2018}'),
        ("rsquo", '\u{2019}'),
        ("ldquo", '\u{201C}'),
        ("rdquo", '\u{201D}'),
        ("ndash", '\u{2013}'),
        ("mdash", '\u{2014}'),
        ("hellip", '\u{2026}'),
    ])
});

// A reference body longer than this cannot be one we know.
const MAX_ENTITY_LEN: usize = 8;

/// Decodes numeric and known named character references. Anything that does
/// not parse as a reference passes through verbatim.
pub(crate) fn decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest[1..].find(';').and_then(|semi| {
            let body = &rest[1..semi + 1];
            if body.len() > MAX_ENTITY_LEN || !body.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'#') {
                return None;
            }
            decode_entity(body).map(|ch| (ch, semi + 2))
        });
        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(body: &str) -> Option<char> {
    if let Some(num) = body.strip_prefix('#') {
        let value = if let Some(hex) = num.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            num.parse::<u32>().ok()?
        };
        return char::from_u32(value);
    }
    NAMED.get(body).copied()
}
