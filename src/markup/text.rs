//! Reduction of Pango-style inline markup (`^markup{<b>x</b>}`) to the plain
//! text that is measured and painted.
//!
//! Tags are dropped and the five XML entities are decoded. A `<` without a
//! closing `>` is kept literally, as is an unknown `&entity;`.

/// Strip tags and decode entities.
pub fn plain_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(pos) = rest.find(['<', '&']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with('<') {
            match tail.find('>') {
                Some(end) => rest = &tail[end + 1..],
                None => {
                    out.push_str(tail);
                    rest = "";
                }
            }
            continue;
        }

        match decode_entity(tail) {
            Some((ch, len)) => {
                out.push(ch);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Whether the markup asks for bold text anywhere (`<b>` or a bold span).
pub fn is_bold(markup: &str) -> bool {
    markup.contains("<b>") || markup.contains("weight=\"bold\"")
}

/// Decode an entity at the start of `s`, returning the character and the
/// number of bytes consumed.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    const ENTITIES: [(&str, char); 5] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&apos;", '\''),
    ];
    ENTITIES
        .iter()
        .find(|(name, _)| s.starts_with(name))
        .map(|(name, ch)| (*ch, name.len()))
}
