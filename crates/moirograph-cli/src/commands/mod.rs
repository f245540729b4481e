use std::path::{Path, PathBuf};

pub mod decode;
pub mod encode;

/// Default output path: the input's stem with a trailing `strip` removed,
/// plus `suffix`, as PNG, next to the input.
pub(crate) fn derive_output(input: &Path, strip: &str, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let stem = stem.strip_suffix(strip).unwrap_or(stem);

    input.with_file_name(format!("{stem}{suffix}.png"))
}
