use super::event::{Outcome, SelectionEvent};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Raised when a caller toggles an id the model was not built with.
    #[error("invalid argument: unknown item '{0}'")]
    UnknownItem(ItemId),
    #[error("a selection needs at least one item")]
    NoItems,
    #[error("duplicate item '{0}'")]
    DuplicateItem(ItemId),
    #[error("item identifiers must not be blank")]
    BlankItem,
    #[error("item '{0}' has leading or trailing whitespace")]
    PaddedItem(ItemId),
}

/// Result of confirming a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Empty,
    Selected(Vec<ItemId>),
}

impl Confirmation {
    pub fn ids(&self) -> &[ItemId] {
        match self {
            Self::Empty => &[],
            Self::Selected(ids) => ids,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Immutable read of the selection, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<(ItemId, bool)>,
    all: bool,
}

impl Snapshot {
    pub fn all(&self) -> bool {
        self.all
    }

    pub fn entries(&self) -> &[(ItemId, bool)] {
        &self.entries
    }

    pub fn is_selected(&self, id: &ItemId) -> Option<bool> {
        self.entries
            .iter()
            .find(|(item, _)| item == id)
            .map(|(_, selected)| *selected)
    }

    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|(_, selected)| *selected).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
pub struct SelectionModel {
    items: Vec<ItemId>,
    selected: Vec<bool>,
    all: bool,
}

impl SelectionModel {
    /// Builds a model over `items` with nothing selected.
    ///
    /// The list must be non-empty and every id unique, non-blank and unpadded, so the
    /// aggregate is never the AND of an empty set.
    pub fn new<I, S>(items: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        let items: Vec<ItemId> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return Err(SelectionError::NoItems);
        }

        let mut seen = HashSet::new();
        for id in &items {
            if id.as_str().trim().is_empty() {
                return Err(SelectionError::BlankItem);
            }
            if id.as_str().trim() != id.as_str() {
                return Err(SelectionError::PaddedItem(id.clone()));
            }
            if !seen.insert(id) {
                return Err(SelectionError::DuplicateItem(id.clone()));
            }
        }

        let selected = vec![false; items.len()];
        Ok(Self {
            items,
            selected,
            all: false,
        })
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn is_all(&self) -> bool {
        self.all
    }

    pub fn is_selected(&self, id: &ItemId) -> Result<bool, SelectionError> {
        let index = self.position(id)?;
        Ok(self.selected[index])
    }

    /// Sets every item to the negation of the current aggregate.
    pub fn toggle_all(&mut self) -> Snapshot {
        let value = !self.all;
        self.selected.iter_mut().for_each(|entry| *entry = value);
        self.all = value;
        self.changed("toggle_all")
    }

    pub fn toggle_item(&mut self, id: &ItemId) -> Result<Snapshot, SelectionError> {
        let index = self.position(id)?;
        self.selected[index] = !self.selected[index];
        // Recomputed over every entry; completing the last unchecked item
        // must flip the aggregate on.
        self.all = self.selected.iter().all(|entry| *entry);
        Ok(self.changed("toggle_item"))
    }

    pub fn confirm_selection(&self) -> Confirmation {
        let ids: Vec<ItemId> = self
            .items
            .iter()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(id, _)| id.clone())
            .collect();

        if ids.is_empty() {
            Confirmation::Empty
        } else {
            Confirmation::Selected(ids)
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entries: self
                .items
                .iter()
                .cloned()
                .zip(self.selected.iter().copied())
                .collect(),
            all: self.all,
        }
    }

    pub fn apply(&mut self, event: &SelectionEvent) -> Result<Outcome, SelectionError> {
        match event {
            SelectionEvent::ToggleAll => Ok(Outcome::Changed(self.toggle_all())),
            SelectionEvent::ToggleItem(id) => self.toggle_item(id).map(Outcome::Changed),
            SelectionEvent::Confirm => {
                let confirmation = self.confirm_selection();
                tracing::info!(
                    selected = confirmation.ids().len(),
                    "Selection confirmed"
                );
                Ok(Outcome::Confirmed(confirmation))
            }
        }
    }

    fn position(&self, id: &ItemId) -> Result<usize, SelectionError> {
        self.items
            .iter()
            .position(|item| item == id)
            .ok_or_else(|| SelectionError::UnknownItem(id.clone()))
    }

    fn changed(&self, operation: &'static str) -> Snapshot {
        debug_assert_eq!(self.all, self.selected.iter().all(|entry| *entry));
        let snapshot = self.snapshot();
        tracing::debug!(
            operation,
            selected = snapshot.selected_count(),
            total = snapshot.len(),
            all = snapshot.all(),
            "Selection changed"
        );
        snapshot
    }
}
