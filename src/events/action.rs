//! Action enum for decoupling input handling from state changes.

/// Actions that can be dispatched from event handlers.
///
/// These represent user intents and are processed by the main loop to update
/// state and, where needed, dispatch page fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // === Application ===
    /// Quit the application
    Quit,

    // === Form navigation ===
    /// Move focus to the next field
    NextField,
    /// Move focus to the previous field
    PrevField,
    /// Clear the focused field's selection
    ClearField,

    // === Dropdown ===
    /// Open the dropdown on the focused field
    OpenDropdown,
    /// Close the dropdown without choosing
    CloseDropdown,
    /// Highlight the next row
    DropdownNext,
    /// Highlight the previous row
    DropdownPrev,
    /// Choose the highlighted row
    ChooseHighlighted,
    /// Reload the dropdown's collection from page 1
    RefreshDropdown,
    /// Make the backend fail the next fetch (exercises the retry path)
    InjectFailure,

    /// No action needed
    None,
}
