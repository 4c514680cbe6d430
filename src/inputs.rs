use std::{
    io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::error::ConvertError;

pub const RESX_EXTENSION: &str = "resx";

/// Expands a list of files and directories into resource files.
///
/// Files are taken as given, in order. Directories are walked for `.resx` files, visiting
/// the entries of each directory sorted by file name.
pub fn collect_resource_files<P: AsRef<Path>>(
    paths: &[P],
) -> Result<Vec<PathBuf>, ConvertError> {
    let mut resource_files = vec![];

    for path in paths {
        let path = path.as_ref();

        if !path.is_dir() {
            resource_files.push(path.to_path_buf());
            continue;
        }

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(|e| ConvertError::Io {
                path: path.to_path_buf(),
                source: io::Error::from(e),
            })?;

            if entry.file_type().is_file() && is_resx(entry.path()) {
                resource_files.push(entry.into_path());
            }
        }
    }

    Ok(resource_files)
}

fn is_resx(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RESX_EXTENSION))
}
