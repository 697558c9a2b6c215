//! Parsing of raw scanner / keyboard input lines.

/// Actor id used for input typed on the keyboard.
pub const KEYBOARD_ACTOR: &str = "";

/// Split a raw input line into `(actor_id, barcode)`.
///
/// Scanners are programmed to prefix every barcode with `{c}_`, where `{c}`
/// is a single character unique to the device. Anything else came from the
/// keyboard.
pub fn parse_scan(line: &str) -> (&str, &str) {
    let bytes = line.as_bytes();
    if bytes.len() > 1 && bytes[1] == b'_' && line.is_char_boundary(1) {
        return (&line[..1], &line[2..]);
    }
    (KEYBOARD_ACTOR, line)
}

/// Abbreviate a drink style by dropping everything after the first
/// `" - "`, so `"IPA - Double"` becomes `"IPA"`.
pub fn shorten_style(style: &str) -> &str {
    style.split(" - ").next().unwrap_or(style)
}

/// Human-readable suffix naming the actor, empty for the keyboard.
pub fn pretty_actor(id: &str) -> String {
    if id.is_empty() {
        String::new()
    } else {
        format!(" with id = {id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan_keyboard() {
        assert_eq!(parse_scan("0123456789"), ("", "0123456789"));
        assert_eq!(parse_scan("7"), ("", "7"));
        assert_eq!(parse_scan(""), ("", ""));
    }

    #[test]
    fn test_parse_scan_scanner_prefix() {
        assert_eq!(parse_scan("a_0123456789"), ("a", "0123456789"));
        assert_eq!(parse_scan("b_"), ("b", ""));
    }

    #[test]
    fn test_parse_scan_multibyte_first_char_is_keyboard() {
        assert_eq!(parse_scan("é_1"), ("", "é_1"));
    }

    #[test]
    fn test_shorten_style() {
        assert_eq!(shorten_style("IPA - Double"), "IPA");
        assert_eq!(shorten_style("Stout - Imperial - Pastry"), "Stout");
        assert_eq!(shorten_style("Pilsner"), "Pilsner");
    }

    #[test]
    fn test_pretty_actor() {
        assert_eq!(pretty_actor(""), "");
        assert_eq!(pretty_actor("a"), " with id = a");
    }
}
