//! Where descriptor bytes come from.
//!
//! The codec itself never touches a directory; a source hands it the raw
//! attribute value for a DN.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ntsd_core::error::CoreError;
use ntsd_core::types::InputFormat;

use crate::error::AppResult;
use crate::ldif::{self, LdifEntry};

/// Supplies the binary value of an attribute on a directory entry.
pub trait AttributeSource {
    /// ## Summary
    /// Returns the raw bytes of `attribute` on the entry named `dn`.
    ///
    /// ## Errors
    /// Returns `CoreError::NotFound` if the entry or attribute does not exist.
    fn fetch_binary_attribute(&self, dn: &str, attribute: &str) -> AppResult<Vec<u8>>;
}

/// Entries read from an LDIF export.
#[derive(Debug, Clone)]
pub struct LdifSource {
    entries: Vec<LdifEntry>,
}

impl LdifSource {
    /// ## Summary
    /// Parses LDIF text into a source.
    ///
    /// ## Errors
    /// Returns an error if the text is not valid LDIF.
    pub fn parse(input: &str) -> AppResult<Self> {
        Ok(Self {
            entries: ldif::parse(input)?,
        })
    }

    /// ## Summary
    /// Reads and parses an LDIF file.
    ///
    /// ## Errors
    /// Returns an error if the file cannot be read or is not valid LDIF.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "Read LDIF file");
        Self::parse(&text)
    }
}

impl AttributeSource for LdifSource {
    fn fetch_binary_attribute(&self, dn: &str, attribute: &str) -> AppResult<Vec<u8>> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.dn_matches(dn))
            .ok_or_else(|| CoreError::NotFound(format!("entry {dn}")))?;

        let value = entry
            .get(attribute)
            .ok_or_else(|| CoreError::NotFound(format!("attribute {attribute} on {dn}")))?;

        tracing::debug!(dn, attribute, len = value.len(), "Fetched attribute");
        Ok(value.to_vec())
    }
}

/// A single descriptor blob stored in a file. The DN is ignored.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl FileSource {
    /// ## Summary
    /// Loads a blob stored as raw bytes, base64 or hex text.
    ///
    /// ## Errors
    /// Returns an error if the file cannot be read, the text fails to decode,
    /// or `format` is `Ldif`.
    pub fn load(path: &Path, format: InputFormat) -> AppResult<Self> {
        let raw = std::fs::read(path)?;
        let bytes = decode_blob(&raw, format)?;
        tracing::debug!(
            path = %path.display(),
            %format,
            len = bytes.len(),
            "Loaded descriptor blob"
        );
        Ok(Self {
            path: path.to_path_buf(),
            bytes,
        })
    }
}

impl AttributeSource for FileSource {
    fn fetch_binary_attribute(&self, dn: &str, attribute: &str) -> AppResult<Vec<u8>> {
        tracing::trace!(
            dn,
            attribute,
            path = %self.path.display(),
            "Ignoring DN for file source"
        );
        Ok(self.bytes.clone())
    }
}

/// ## Summary
/// Decodes a blob's text encoding into bytes.
///
/// ## Errors
/// Returns an error if the text is not valid for `format`, or `format` is
/// `Ldif`.
pub fn decode_blob(raw: &[u8], format: InputFormat) -> AppResult<Vec<u8>> {
    match format {
        InputFormat::Raw => Ok(raw.to_vec()),
        InputFormat::Base64 => Ok(STANDARD.decode(strip_whitespace(raw))?),
        InputFormat::Hex => Ok(hex::decode(strip_whitespace(raw))?),
        InputFormat::Ldif => {
            let message = "LDIF input is read through LdifSource".to_string();
            Err(CoreError::InvalidInput(message).into())
        }
    }
}

fn strip_whitespace(raw: &[u8]) -> Vec<u8> {
    raw.iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect()
}

/// ## Summary
/// Opens the source matching `format`.
///
/// ## Errors
/// Returns an error if the file cannot be read or parsed.
pub fn open_source(path: &Path, format: InputFormat) -> AppResult<Box<dyn AttributeSource>> {
    Ok(match format {
        InputFormat::Ldif => Box::new(LdifSource::from_path(path)?),
        other => Box::new(FileSource::load(path, other)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    const EXPORT: &str = "\
dn: CN=Alice,DC=example,DC=com
nTSecurityDescriptor:: AQAEgA==
";

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ntsd-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("write temp file");
        path
    }

    #[test_log::test]
    fn ldif_source_fetches_by_dn() {
        let source = LdifSource::parse(EXPORT).expect("valid");
        let value = source
            .fetch_binary_attribute("cn=alice,dc=example,dc=com", "nTSecurityDescriptor")
            .expect("present");
        assert_eq!(value, vec![0x01, 0x00, 0x04, 0x80]);
    }

    #[test]
    fn ldif_source_missing_entry() {
        let source = LdifSource::parse(EXPORT).expect("valid");
        let err = source
            .fetch_binary_attribute("CN=Bob,DC=example,DC=com", "nTSecurityDescriptor")
            .unwrap_err();
        assert!(matches!(err, AppError::CoreError(CoreError::NotFound(_))));
    }

    #[test]
    fn ldif_source_missing_attribute() {
        let source = LdifSource::parse(EXPORT).expect("valid");
        let err = source
            .fetch_binary_attribute("CN=Alice,DC=example,DC=com", "objectSid")
            .unwrap_err();
        assert!(matches!(err, AppError::CoreError(CoreError::NotFound(_))));
    }

    #[test]
    fn decodes_blob_formats() {
        assert_eq!(
            decode_blob(b"AQAE\ngA==\n", InputFormat::Base64).expect("base64"),
            vec![0x01, 0x00, 0x04, 0x80]
        );
        assert_eq!(
            decode_blob(b"01 00 04 80\n", InputFormat::Hex).expect("hex"),
            vec![0x01, 0x00, 0x04, 0x80]
        );
        assert_eq!(
            decode_blob(&[0xFF, 0x00], InputFormat::Raw).expect("raw"),
            vec![0xFF, 0x00]
        );
    }

    #[test]
    fn rejects_bad_blob_text() {
        assert!(matches!(
            decode_blob(b"zz", InputFormat::Hex).unwrap_err(),
            AppError::HexError(_)
        ));
        assert!(matches!(
            decode_blob(b"!!!", InputFormat::Base64).unwrap_err(),
            AppError::Base64Error(_)
        ));
    }

    #[test]
    fn file_source_ignores_dn() {
        let path = temp_file("blob.hex", b"0100 0480");
        let source = FileSource::load(&path, InputFormat::Hex).expect("loads");
        let value = source
            .fetch_binary_attribute("anything", "nTSecurityDescriptor")
            .expect("present");
        assert_eq!(value, vec![0x01, 0x00, 0x04, 0x80]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn open_source_dispatches_on_format() {
        let path = temp_file("export.ldif", EXPORT.as_bytes());
        let source = open_source(&path, InputFormat::Ldif).expect("opens");
        assert!(
            source
                .fetch_binary_attribute("CN=Alice,DC=example,DC=com", "ntsecuritydescriptor")
                .is_ok()
        );
        std::fs::remove_file(path).ok();
    }
}
