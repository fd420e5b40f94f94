use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{TdToolError, TestCase, TESTCASE_FILE, TESTCASE_SCHEMA_V1};

pub fn read_test_case(case_path: &Path) -> Result<TestCase, TdToolError> {
    let raw = fs::read_to_string(case_path).map_err(|source| TdToolError::ReadFile {
        path: case_path.to_path_buf(),
        source,
    })?;
    let parsed: TestCase = serde_json::from_str(&raw).map_err(|source| TdToolError::ParseCase {
        path: case_path.to_path_buf(),
        source,
    })?;

    if parsed.schema_version != TESTCASE_SCHEMA_V1 {
        return Err(TdToolError::InvalidSchemaVersion {
            expected: TESTCASE_SCHEMA_V1.to_string(),
            found: parsed.schema_version,
        });
    }

    Ok(parsed)
}

/// Every directory under `root` holding a `testcase.json`, sorted by path.
pub fn discover_case_dirs(root: &Path) -> Result<Vec<PathBuf>, TdToolError> {
    let mut dirs = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == TESTCASE_FILE)
        .filter_map(|entry| entry.path().parent().map(Path::to_path_buf))
        .collect::<Vec<_>>();
    dirs.sort();

    if dirs.is_empty() {
        return Err(TdToolError::CasesEmpty {
            file: TESTCASE_FILE.to_string(),
            path: root.to_path_buf(),
        });
    }

    Ok(dirs)
}

#[cfg(test)]
mod source_tests {
    use super::*;

    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should move forward")
            .as_nanos();
        std::env::temp_dir().join(format!("td-tool-source-{}-{}", name, nanos))
    }

    fn write_file(path: &Path, content: &str) {
        let parent = path.parent().expect("path should have parent");
        fs::create_dir_all(parent).expect("parent dir should be created");
        fs::write(path, content).expect("file should be written");
    }

    #[test]
    fn read_test_case_validates_schema_and_json() {
        let root = temp_dir("read");
        let path = root.join(TESTCASE_FILE);

        let missing = read_test_case(&path).expect_err("missing file should fail");
        assert!(matches!(missing, TdToolError::ReadFile { .. }));

        write_file(&path, "{");
        let invalid = read_test_case(&path).expect_err("invalid json should fail");
        assert!(matches!(invalid, TdToolError::ParseCase { .. }));

        write_file(&path, r#"{"schemaVersion":"other","turns":[]}"#);
        let schema = read_test_case(&path).expect_err("schema should fail");
        assert!(matches!(schema, TdToolError::InvalidSchemaVersion { .. }));

        write_file(&path, r#"{"schemaVersion":"td-tool-case.v1","turns":[]}"#);
        let parsed = read_test_case(&path).expect("valid case should parse");
        assert!(parsed.turns.is_empty());
    }

    #[test]
    fn discover_case_dirs_finds_nested_cases_in_order() {
        let root = temp_dir("discover");
        write_file(&root.join("b").join(TESTCASE_FILE), "{}");
        write_file(&root.join("a").join("deep").join(TESTCASE_FILE), "{}");
        write_file(&root.join("c").join("dialog.txt"), "");

        let dirs = discover_case_dirs(&root).expect("cases should be found");
        assert_eq!(dirs, vec![root.join("a").join("deep"), root.join("b")]);
    }

    #[test]
    fn discover_case_dirs_rejects_empty_tree() {
        let root = temp_dir("empty");
        fs::create_dir_all(&root).expect("root should be created");
        let error = discover_case_dirs(&root).expect_err("empty tree should fail");
        assert!(matches!(error, TdToolError::CasesEmpty { .. }));
    }
}
