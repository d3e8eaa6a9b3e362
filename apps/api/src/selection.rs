//! Selected troubleshooting actions.

use serde::{Deserialize, Serialize};

use crate::catalog::TsAction;

/// Set of troubleshooting actions. Membership has set semantics; iteration
/// follows selection order, which is the order the reports list them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedTs(Vec<TsAction>);

impl SelectedTs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, action: TsAction) -> bool {
        self.0.contains(&action)
    }

    pub fn insert(&mut self, action: TsAction) -> bool {
        if self.contains(action) {
            return false;
        }
        self.0.push(action);
        true
    }

    /// Adds the action if absent, removes it if present.
    pub fn toggle(&mut self, action: TsAction) {
        if let Some(idx) = self.0.iter().position(|a| *a == action) {
            self.0.remove(idx);
        } else {
            self.0.push(action);
        }
    }

    /// Union with the currently visible candidates.
    pub fn select_all(&mut self, visible: impl IntoIterator<Item = TsAction>) {
        for action in visible {
            self.insert(action);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = TsAction> + '_ {
        self.0.iter().copied()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.iter().map(TsAction::label).collect()
    }

    pub fn descriptions(&self) -> Vec<&'static str> {
        self.iter().map(TsAction::description).collect()
    }

    /// Builds a selection from persisted labels. Unknown labels are dropped.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut selected = Self::new();
        for label in labels {
            match TsAction::from_label(label.as_ref()) {
                Some(action) => {
                    selected.insert(action);
                }
                None => tracing::warn!("Dropping unknown troubleshooting label {:?}", label.as_ref()),
            }
        }
        selected
    }
}

impl FromIterator<TsAction> for SelectedTs {
    fn from_iter<I: IntoIterator<Item = TsAction>>(iter: I) -> Self {
        let mut selected = Self::new();
        selected.select_all(iter);
        selected
    }
}
