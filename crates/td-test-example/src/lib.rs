use std::path::PathBuf;

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

pub fn demos_root() -> PathBuf {
    workspace_root().join("demos").join("scripts")
}

pub fn demo_dir(name: &str) -> PathBuf {
    demos_root().join(name)
}

pub fn demo_script_path(name: &str) -> PathBuf {
    demo_dir(name).join("dialog.txt")
}

pub fn testcase_path(name: &str) -> PathBuf {
    demo_dir(name).join("testcase.json")
}
