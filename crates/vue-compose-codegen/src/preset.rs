//! Output layout for the near-operation-file preset.
//!
//! Each document gets its own module beside it. Fragments declared in other
//! documents are imported from those documents' modules.

use std::path::{Component, Path, PathBuf};

use crate::frontend::{file_stem, SourceDocument};
use crate::ir::{DocumentIR, ExternalFragment};

/// Module generated for a document: `<dir>/<stem><extension>`.
pub fn output_path(document: &Path, extension: &str) -> PathBuf {
    let stem = file_stem(document);
    document.with_file_name(format!("{}{}", stem, extension))
}

/// Relative module specifier from one generated module to another, without
/// the `.ts`/`.tsx` extension (`./user.generated`, `../shared/user.generated`).
pub fn module_specifier(from: &Path, to: &Path, with_js_extension: bool) -> String {
    let file = to
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let module = file
        .strip_suffix(".tsx")
        .or_else(|| file.strip_suffix(".ts"))
        .unwrap_or(&file)
        .to_string();

    let from_dir = from.parent().unwrap_or_else(|| Path::new(""));
    let to_dir = to.parent().unwrap_or_else(|| Path::new(""));
    let relative = pathdiff::diff_paths(to_dir, from_dir).unwrap_or_default();

    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::ParentDir => Some("..".to_string()),
            Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    segments.push(module);

    let mut specifier = segments.join("/");
    if !specifier.starts_with("..") {
        specifier = format!("./{}", specifier);
    }
    if with_js_extension {
        specifier.push_str(".js");
    }
    specifier
}

/// Fragments of the whole document set that `document` does not declare,
/// each pointing at the module generated for the document that does.
pub fn external_fragments(
    document: &SourceDocument,
    all: &DocumentIR,
    extension: &str,
    with_js_extension: bool,
) -> Vec<ExternalFragment> {
    let own_output = output_path(&document.location, extension);
    all.fragments
        .iter()
        .filter(|f| f.location.file != document.location)
        .map(|f| ExternalFragment {
            fragment: f.clone(),
            import_from: module_specifier(
                &own_output,
                &output_path(&f.location.file, extension),
                with_js_extension,
            ),
        })
        .collect()
}
