use td_test_example::{demo_dir, demos_root, testcase_path};
use td_tool::{assert_case, discover_case_dirs, TESTCASE_FILE};

#[test]
fn every_demo_case_passes() {
    let dirs = discover_case_dirs(&demos_root()).expect("demo cases should exist");
    assert!(dirs.len() >= 4, "expected bundled demo cases");

    for dir in dirs {
        if let Err(error) = assert_case(&dir, &dir.join(TESTCASE_FILE)) {
            panic!("demo {} failed: {}", dir.display(), error);
        }
    }
}

#[test]
fn nested_topics_demo_runs_by_name() {
    assert_case(
        &demo_dir("03-nested-topics"),
        &testcase_path("03-nested-topics"),
    )
    .expect("nested topics case should pass");
}
