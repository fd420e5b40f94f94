use std::collections::BTreeMap;

use td_core::VarValue;

/// Named variables of one dialog session. Script declarations seed it at
/// load time; wildcard captures overwrite entries while matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    values: BTreeMap<String, VarValue>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: VarValue) -> Option<VarValue> {
        self.values.insert(name.into(), value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VarValue)> + '_ {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn to_map(&self) -> BTreeMap<String, VarValue> {
        self.values.clone()
    }

    pub(crate) fn view(&self) -> VariableView<'_> {
        VariableView {
            store: self,
            pending: &[],
        }
    }
}

/// Read-only lookup over the store with assignments that are not committed
/// yet. Pending entries shadow the store; a later pending entry shadows an
/// earlier one with the same name.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VariableView<'a> {
    store: &'a VariableStore,
    pending: &'a [(String, VarValue)],
}

impl<'a> VariableView<'a> {
    pub(crate) fn with_pending(self, pending: &'a [(String, VarValue)]) -> Self {
        Self { pending, ..self }
    }

    pub(crate) fn get(&self, name: &str) -> Option<&'a VarValue> {
        self.pending
            .iter()
            .rev()
            .find(|(pending_name, _)| pending_name == name)
            .map(|(_, value)| value)
            .or_else(|| self.store.get(name))
    }
}

impl From<BTreeMap<String, VarValue>> for VariableStore {
    fn from(values: BTreeMap<String, VarValue>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;

    #[test]
    fn view_prefers_latest_pending_value_over_store() {
        let mut store = VariableStore::new();
        store.set("name", VarValue::Scalar("Alex".to_string()));
        store.set("mood", VarValue::Scalar("happy".to_string()));
        let pending = vec![
            ("name".to_string(), VarValue::Scalar("Kim".to_string())),
            ("name".to_string(), VarValue::Scalar("Ada".to_string())),
        ];
        let view = store.view().with_pending(&pending);
        assert_eq!(view.get("name"), Some(&VarValue::Scalar("Ada".to_string())));
        assert_eq!(view.get("mood"), Some(&VarValue::Scalar("happy".to_string())));
        assert_eq!(view.get("missing"), None);
        assert_eq!(
            store.get("name"),
            Some(&VarValue::Scalar("Alex".to_string()))
        );
    }

    #[test]
    fn set_overwrites_and_returns_previous_value() {
        let mut store = VariableStore::new();
        assert!(store.is_empty());
        assert_eq!(store.set("name", VarValue::Scalar("Alex".to_string())), None);
        let previous = store.set("name", VarValue::List(vec!["a".to_string()]));
        assert_eq!(previous, Some(VarValue::Scalar("Alex".to_string())));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("name").map(VarValue::type_name), Some("list"));
    }

    #[test]
    fn iter_is_sorted_by_name() {
        let mut values = BTreeMap::new();
        values.insert("b".to_string(), VarValue::Scalar("2".to_string()));
        values.insert("a".to_string(), VarValue::Scalar("1".to_string()));
        let store = VariableStore::from(values);
        let names = store.iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b"]);
    }
}
