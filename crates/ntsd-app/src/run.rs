//! Fetch, decode and render one descriptor.

use ntsd_dtyp::dtyp::{SecurityDescriptor, decode_descriptor};

use crate::cli::RunOptions;
use crate::error::AppResult;
use crate::render::render;
use crate::source::{AttributeSource, open_source};

/// ## Summary
/// Runs the read-only pipeline described by `options` and returns the
/// rendered output.
///
/// ## Errors
/// Returns an error if the input cannot be read, the entry or attribute is
/// missing, or the descriptor fails to decode.
#[tracing::instrument(
    skip(options),
    fields(path = %options.path.display(), input = %options.input)
)]
pub fn run(options: &RunOptions) -> AppResult<String> {
    let source = open_source(&options.path, options.input)?;
    let sd = fetch_descriptor(source.as_ref(), &options.dn, &options.attribute)?;
    render(&sd, options.output)
}

/// ## Summary
/// Fetches an attribute value and decodes it as a security descriptor.
///
/// ## Errors
/// Returns an error if the fetch fails or the bytes are not a valid
/// descriptor.
pub fn fetch_descriptor(
    source: &dyn AttributeSource,
    dn: &str,
    attribute: &str,
) -> AppResult<SecurityDescriptor> {
    let bytes = source.fetch_binary_attribute(dn, attribute)?;
    let sd = decode_descriptor(&bytes).inspect_err(|e| {
        tracing::warn!(dn, attribute, error = %e, "Descriptor failed to decode");
    })?;
    tracing::info!(
        dn,
        len = bytes.len(),
        control = sd.control,
        "Decoded security descriptor"
    );
    Ok(sd)
}
