use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;

/// Discover Go files from the given paths, respecting .gitignore. Directly
/// named files bypass the extension filter; directories are walked for
/// `*.go` files. Results are sorted and deduplicated.
pub fn discover_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            files.extend(walk_directory(path)?);
        } else {
            anyhow::bail!("path does not exist: {}", path.display());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn walk_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(dir);
    builder.hidden(true).git_ignore(true).git_global(true);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.context("error walking directory")?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "go") {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn setup_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("astwright_test_fs_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn discovers_go_files_in_directory() {
        let dir = setup_dir("discover");
        fs::write(dir.join("a.go"), "").unwrap();
        fs::write(dir.join("b.go"), "").unwrap();
        fs::write(dir.join("c.txt"), "").unwrap();

        let files = discover_files(&[dir.clone()]).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "go"));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn direct_file_bypasses_extension_filter() {
        let dir = setup_dir("direct");
        let script = dir.join("script");
        fs::write(&script, "package main\n").unwrap();

        let files = discover_files(&[script.clone()]).unwrap();

        assert_eq!(files, vec![script]);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn nonexistent_path_errors() {
        let result = discover_files(&[PathBuf::from("/no/such/path")]);
        assert!(result.is_err());
    }

    #[test]
    fn results_are_sorted_and_deduped() {
        let dir = setup_dir("sorted");
        fs::write(dir.join("z.go"), "").unwrap();
        fs::write(dir.join("a.go"), "").unwrap();
        fs::write(dir.join("m.go"), "").unwrap();

        let files = discover_files(&[dir.clone(), dir.clone()]).unwrap();

        assert_eq!(files.len(), 3);
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn walks_nested_directories() {
        let dir = setup_dir("nested");
        fs::create_dir_all(dir.join("pkg/util")).unwrap();
        fs::write(dir.join("main.go"), "").unwrap();
        fs::write(dir.join("pkg/util/helper.go"), "").unwrap();

        let files = discover_files(&[dir.clone()]).unwrap();

        assert_eq!(files.len(), 2);
        fs::remove_dir_all(&dir).ok();
    }
}
