//! LDIF lexer for line unfolding and attribute line parsing.
//!
//! A line starting with a single space continues the previous line; the
//! space itself is dropped (RFC 2849 note 2).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::error::{LdifError, LdifErrorKind, LdifResult};

/// Splits input into logical lines, merging folded continuations.
///
/// Each logical line carries the 1-based number of its first physical line.
/// Blank lines are kept as empty strings because they separate records.
#[must_use]
pub fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();
    let mut continuable = false;

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if continuable
            && let Some(continuation) = line.strip_prefix(' ')
            && let Some((_, prev)) = lines.last_mut()
        {
            prev.push_str(continuation);
            continue;
        }

        continuable = !line.is_empty();
        lines.push((idx + 1, line.to_string()));
    }

    lines
}

/// A parsed `name: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrLine {
    /// Attribute description, options included (e.g. `userCertificate;binary`).
    pub name: String,
    pub value: AttrValue,
}

/// An attribute value as written in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// `name: value`
    Text(String),
    /// `name:: base64`, already decoded.
    Binary(Vec<u8>),
}

impl AttrValue {
    /// Returns the value bytes regardless of how they were written.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(s) => s.into_bytes(),
            Self::Binary(b) => b,
        }
    }
}

/// Parses a single logical line into its name and value.
///
/// Format: `name:[: | <] value`
///
/// ## Errors
/// Returns an error if the separator is missing, base64 is malformed, or the
/// value is a URL reference.
pub fn parse_attr_line(line: &str, line_num: usize) -> LdifResult<AttrLine> {
    let colon_pos = line.find(':').ok_or_else(|| {
        LdifError::new(
            LdifErrorKind::MissingSeparator,
            line_num,
            format!("no ':' in line: {line}"),
        )
    })?;

    let name = line[..colon_pos].trim().to_string();
    let rest = &line[colon_pos + 1..];

    if rest.starts_with('<') {
        return Err(LdifError::new(
            LdifErrorKind::Unsupported,
            line_num,
            format!("{name}: URL values are not supported"),
        ));
    }

    let value = if let Some(encoded) = rest.strip_prefix(':') {
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD.decode(compact.as_bytes()).map_err(|e| {
            LdifError::new(
                LdifErrorKind::InvalidBase64,
                line_num,
                format!("{name}: {e}"),
            )
        })?;
        AttrValue::Binary(bytes)
    } else {
        AttrValue::Text(rest.trim_start_matches(' ').to_string())
    };

    Ok(AttrLine { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfolds_continuations() {
        let lines = logical_lines("dn: CN=A,\n DC=example\ncn: A\n");
        assert_eq!(
            lines,
            vec![
                (1, "dn: CN=A,DC=example".to_string()),
                (3, "cn: A".to_string()),
            ]
        );
    }

    #[test]
    fn handles_crlf() {
        let lines = logical_lines("cn: A\r\n B\r\n\r\ncn: C\r\n");
        assert_eq!(
            lines,
            vec![
                (1, "cn: AB".to_string()),
                (3, String::new()),
                (4, "cn: C".to_string()),
            ]
        );
    }

    #[test]
    fn space_after_blank_line_is_not_a_continuation() {
        let lines = logical_lines("cn: A\n\n x\n");
        assert_eq!(lines[2], (3, " x".to_string()));
    }

    #[test]
    fn leading_continuation_is_kept_as_a_line() {
        let lines = logical_lines(" x\ncn: A\n");
        assert_eq!(
            lines,
            vec![(1, " x".to_string()), (2, "cn: A".to_string())]
        );
    }

    #[test]
    fn text_value() {
        let line = parse_attr_line("cn: Alice Smith", 1).expect("valid");
        assert_eq!(line.name, "cn");
        assert_eq!(line.value, AttrValue::Text("Alice Smith".into()));
    }

    #[test]
    fn base64_value() {
        let line = parse_attr_line("nTSecurityDescriptor:: AQAE gA==", 1).expect("valid");
        assert_eq!(line.value, AttrValue::Binary(vec![0x01, 0x00, 0x04, 0x80]));
    }

    #[test]
    fn attribute_options_stay_in_name() {
        let line = parse_attr_line("userCertificate;binary:: AA==", 1).expect("valid");
        assert_eq!(line.name, "userCertificate;binary");
        assert_eq!(line.value, AttrValue::Binary(vec![0x00]));
    }

    #[test]
    fn missing_separator() {
        let err = parse_attr_line("no separator here", 7).unwrap_err();
        assert_eq!(err.kind, LdifErrorKind::MissingSeparator);
        assert_eq!(err.line, 7);
    }

    #[test]
    fn bad_base64() {
        let err = parse_attr_line("x:: !!!", 2).unwrap_err();
        assert_eq!(err.kind, LdifErrorKind::InvalidBase64);
    }

    #[test]
    fn url_values_rejected() {
        let err = parse_attr_line("jpegPhoto:< file:///tmp/a.jpg", 3).unwrap_err();
        assert_eq!(err.kind, LdifErrorKind::Unsupported);
    }

    #[test]
    fn url_marker_wins_over_base64_decoding() {
        let err = parse_attr_line("jpegPhoto:<:AA==", 4).unwrap_err();
        assert_eq!(err.kind, LdifErrorKind::Unsupported);
        assert_eq!(err.line, 4);
    }
}
