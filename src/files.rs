//! C# source file discovery and atomic writes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sharpfix_core::error::SharpfixError;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Directories never searched for sources.
const SKIPPED_DIRS: &[&str] = &["bin", "obj", ".git", ".vs", "node_modules"];

/// Expand `paths` into a sorted, deduplicated list of `.cs` files.
///
/// Files are taken as given, whatever their extension. Directories are
/// walked recursively, skipping build output and VCS directories.
pub fn collect_csharp_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, SharpfixError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            return Err(SharpfixError::file_not_found(path.display().to_string()));
        }
        for entry in WalkDir::new(path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !SKIPPED_DIRS.contains(&entry.file_name().to_string_lossy().as_ref())
            })
            .filter_map(|e| e.ok())
        {
            let entry_path = entry.path();
            if entry.file_type().is_file() && entry_path.extension().is_some_and(|ext| ext == "cs")
            {
                files.push(entry_path.to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Read a source file, mapping a missing file to a resolution error.
pub fn read_source(path: &Path) -> Result<String, SharpfixError> {
    if !path.is_file() {
        return Err(SharpfixError::file_not_found(path.display().to_string()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Replace the contents of `path` so readers see either the old or the new
/// text. The temp file lives next to the target so the rename stays on one
/// filesystem.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), SharpfixError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let apply_error = |message: String| SharpfixError::ApplyError {
        message,
        file: Some(path.display().to_string()),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| apply_error(e.to_string()))?;
    file.write_all(content.as_bytes())
        .map_err(|e| apply_error(e.to_string()))?;
    file.persist(path).map_err(|e| apply_error(e.error.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directories_are_walked_and_sorted() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join("obj")).unwrap();
        fs::write(root.join("src/B.cs"), "class B {}").unwrap();
        fs::write(root.join("src/nested/A.cs"), "class A {}").unwrap();
        fs::write(root.join("src/readme.md"), "# no").unwrap();
        fs::write(root.join("obj/Generated.cs"), "class G {}").unwrap();

        let files = collect_csharp_files(&[root.to_path_buf()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["src/B.cs", "src/nested/A.cs"]);
    }

    #[test]
    fn missing_path_is_not_found() {
        let err = collect_csharp_files(&[PathBuf::from("/nonexistent/sharpfix/input")]).unwrap_err();
        assert_eq!(err.error_code().code(), 3);
    }

    #[test]
    fn atomic_write_replaces_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("C.cs");
        fs::write(&path, "old").unwrap();
        write_atomic(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }
}
