use serde::{Deserialize, Serialize};

pub const TESTCASE_SCHEMA_V1: &str = "td-tool-case.v1";
pub const TESTCASE_FILE: &str = "testcase.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub schema_version: String,
    #[serde(default = "default_script")]
    pub script: String,
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
    #[serde(default)]
    pub expected_diagnostics: Vec<String>,
    #[serde(default)]
    pub turns: Vec<Turn>,
}

fn default_script() -> String {
    td_api::DEFAULT_SCRIPT_FILE.to_string()
}

fn default_random_seed() -> u64 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub input: String,
    pub expect: ExpectedReply,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExpectedReply {
    Text { text: String },
    OneOf { choices: Vec<String> },
    None,
}

impl ExpectedReply {
    pub fn accepts(&self, actual: Option<&str>) -> bool {
        match (self, actual) {
            (Self::Text { text }, Some(actual)) => text == actual,
            (Self::OneOf { choices }, Some(actual)) => {
                choices.iter().any(|choice| choice == actual)
            }
            (Self::None, None) => true,
            _ => false,
        }
    }
}
