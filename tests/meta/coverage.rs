#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    const SRC: &str = "src";
    const UNIT: &str = "tests/unit";

    // Names of `mod x;` and `pub mod x;` declarations in a module file
    fn declared_modules(file: &Path) -> Vec<String> {
        let content = fs::read_to_string(file)
            .unwrap_or_else(|error| panic!("cannot read {}: {error}", file.display()));

        content
            .lines()
            .map(str::trim)
            .filter_map(|line| line.strip_prefix("pub ").unwrap_or(line).strip_prefix("mod "))
            .filter_map(|rest| rest.strip_suffix(';'))
            .map(str::to_owned)
            .collect()
    }

    // Top-level module groups of the library, each a `src/<group>/mod.rs`
    fn source_groups() -> Vec<String> {
        declared_modules(&Path::new(SRC).join("lib.rs"))
    }

    #[test]
    fn test_unit_harness_declares_every_group() {
        let harness = declared_modules(&Path::new(UNIT).join("main.rs"));

        let missing: Vec<_> = source_groups()
            .into_iter()
            .filter(|group| !harness.contains(group))
            .collect();

        assert!(
            missing.is_empty(),
            "tests/unit/main.rs does not declare: {}",
            missing.join(", ")
        );
    }

    #[test]
    fn test_every_source_module_has_unit_tests() {
        let mut missing = Vec::new();

        for group in source_groups() {
            let unit_dir = Path::new(UNIT).join(&group);
            let registered = declared_modules(&unit_dir.join("mod.rs"));

            for module in declared_modules(&Path::new(SRC).join(&group).join("mod.rs")) {
                let test_file = unit_dir.join(format!("{module}.rs"));
                if !test_file.is_file() {
                    missing.push(format!("  - src/{group}/{module}.rs -> {}", test_file.display()));
                } else if !registered.contains(&module) {
                    missing.push(format!("  - {} is not declared in its mod.rs", test_file.display()));
                }
            }
        }

        assert!(
            missing.is_empty(),
            "Source modules without registered unit tests:\n{}",
            missing.join("\n")
        );
    }

    #[test]
    fn test_unit_tests_match_source_modules() {
        let mut orphaned = Vec::new();

        for group in source_groups() {
            let modules = declared_modules(&Path::new(SRC).join(&group).join("mod.rs"));
            for test_module in declared_modules(&Path::new(UNIT).join(&group).join("mod.rs")) {
                if !modules.contains(&test_module) {
                    orphaned.push(format!("  - tests/unit/{group}/{test_module}.rs"));
                }
            }
        }

        assert!(
            orphaned.is_empty(),
            "Unit tests without a source module:\n{}",
            orphaned.join("\n")
        );
    }

    fn unit_test_files(dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = fs::read_dir(dir)
            .unwrap_or_else(|error| panic!("cannot list {}: {error}", dir.display()));

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                unit_test_files(&path, files);
            } else if path.extension().is_some_and(|ext| ext == "rs")
                && !path.ends_with("main.rs")
                && !path.ends_with("mod.rs")
            {
                files.push(path);
            }
        }
    }

    #[test]
    fn test_unit_files_contain_tests() {
        let mut files = Vec::new();
        unit_test_files(Path::new(UNIT), &mut files);
        assert!(!files.is_empty());

        let empty: Vec<_> = files
            .iter()
            .filter(|path| {
                fs::read_to_string(path).is_ok_and(|content| !content.contains("#[test]"))
            })
            .map(|path| format!("  - {}", path.display()))
            .collect();

        assert!(
            empty.is_empty(),
            "Unit test files without any #[test]:\n{}",
            empty.join("\n")
        );
    }
}
