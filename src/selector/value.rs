//! Selection value normalization.
//!
//! Hosts hand the dropdown a current selection in several shapes: a raw
//! string id, a numeric id, or a `{ "value": … }` wrapper. All of them are
//! normalized to a plain comparable id here, at the boundary, so matching
//! inside the renderer is one string comparison.

use crate::loader::ListEntry;

/// Normalized external selection.
///
/// The referenced item is not required to have loaded yet; `display_label`
/// falls back to the raw id text until it does.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionValue {
    #[default]
    None,
    Id(String),
}

impl SelectionValue {
    /// Normalize a host-supplied value of any supported shape.
    ///
    /// Accepts JSON strings, numbers, `null`, and objects carrying a `value`
    /// key with a string or number inside. Anything else normalizes to
    /// `None`.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => SelectionValue::Id(s.clone()),
            serde_json::Value::Number(n) => SelectionValue::Id(n.to_string()),
            serde_json::Value::Object(obj) => match obj.get("value") {
                Some(inner) if !inner.is_object() => Self::from_json(inner),
                _ => SelectionValue::None,
            },
            _ => SelectionValue::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, SelectionValue::None)
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            SelectionValue::None => None,
            SelectionValue::Id(id) => Some(id),
        }
    }

    /// Whether `item` is the selected one.
    pub fn matches<T: ListEntry>(&self, item: &T) -> bool {
        self.id() == Some(item.id())
    }

    /// Visible text for the current selection.
    ///
    /// The matching item's label when it has loaded, otherwise the raw id
    /// itself, otherwise `None` when nothing is selected.
    pub fn display_label<'a, T: ListEntry>(&'a self, items: &'a [T]) -> Option<&'a str> {
        let id = self.id()?;
        Some(
            items
                .iter()
                .find(|item| item.id() == id)
                .map(|item| item.label())
                .unwrap_or(id),
        )
    }
}

impl From<&str> for SelectionValue {
    fn from(id: &str) -> Self {
        SelectionValue::Id(id.to_string())
    }
}

impl From<String> for SelectionValue {
    fn from(id: String) -> Self {
        SelectionValue::Id(id)
    }
}

impl From<i64> for SelectionValue {
    fn from(id: i64) -> Self {
        SelectionValue::Id(id.to_string())
    }
}

impl<V: Into<SelectionValue>> From<Option<V>> for SelectionValue {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(SelectionValue::None)
    }
}
