//! LDIF content record parser.

use super::error::{LdifError, LdifErrorKind, LdifResult};
use super::lexer::{AttrLine, logical_lines, parse_attr_line};

/// One directory entry read from an LDIF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LdifEntry {
    pub dn: String,
    /// Attributes in file order; repeated names are kept as separate values.
    pub attributes: Vec<(String, Vec<u8>)>,
}

impl LdifEntry {
    /// Returns the first value of an attribute.
    ///
    /// Names compare case-insensitively and ignore `;options`.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&[u8]> {
        self.attributes
            .iter()
            .find(|(name, _)| base_name(name).eq_ignore_ascii_case(attribute))
            .map(|(_, value)| value.as_slice())
    }

    /// Returns true if the entry's DN equals `dn`, ignoring ASCII case.
    #[must_use]
    pub fn dn_matches(&self, dn: &str) -> bool {
        self.dn.trim().eq_ignore_ascii_case(dn.trim())
    }
}

fn base_name(name: &str) -> &str {
    name.split(';').next().unwrap_or(name)
}

/// Parses LDIF content records.
///
/// ## Errors
/// Returns an error if a record does not start with `dn:` or a line is
/// malformed.
pub fn parse(input: &str) -> LdifResult<Vec<LdifEntry>> {
    let mut entries = Vec::new();
    let mut current: Option<LdifEntry> = None;
    let mut seen_record = false;

    for (line_num, line) in logical_lines(input) {
        if line.is_empty() {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let AttrLine { name, value } = parse_attr_line(&line, line_num)?;

        match current.as_mut() {
            None if !seen_record && name.eq_ignore_ascii_case("version") => {
                tracing::trace!(line = line_num, "Skipping LDIF version line");
            }
            None if name.eq_ignore_ascii_case("dn") => {
                let dn = String::from_utf8(value.into_bytes()).map_err(|e| {
                    LdifError::new(
                        LdifErrorKind::MissingDn,
                        line_num,
                        format!("dn is not UTF-8: {e}"),
                    )
                })?;
                seen_record = true;
                current = Some(LdifEntry {
                    dn,
                    attributes: Vec::new(),
                });
            }
            None => {
                return Err(LdifError::new(
                    LdifErrorKind::MissingDn,
                    line_num,
                    format!("record starts with '{name}'"),
                ));
            }
            Some(entry) => entry.attributes.push((name, value.into_bytes())),
        }
    }

    if let Some(entry) = current {
        entries.push(entry);
    }

    tracing::debug!(count = entries.len(), "Parsed LDIF entries");
    Ok(entries)
}
