//! Application state for the service request form.
//!
//! Four form fields each pick one record from a remote collection through the
//! same generic dropdown; the team field's scope is filtered by the chosen
//! department, so changing the department invalidates any accumulated team
//! pages and the team selection itself.

use crate::config::Config;
use crate::loader::{FetchEvent, PageRequest, ScopeKey};
use crate::selector::{DropdownState, SelectionValue};
use crate::services::DirectoryRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Moving between form fields
    Normal,
    /// A dropdown is open on the active field
    Dropdown,
}

/// The four remote-backed form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Department,
    Team,
    Service,
    ServiceCategory,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Department,
        FieldKind::Team,
        FieldKind::Service,
        FieldKind::ServiceCategory,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            FieldKind::Department => "Department",
            FieldKind::Team => "Team",
            FieldKind::Service => "Service",
            FieldKind::ServiceCategory => "Service category",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    fn next(&self) -> FieldKind {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(&self) -> FieldKind {
        Self::ALL[self.index().checked_sub(1).unwrap_or(Self::ALL.len() - 1)]
    }
}

/// Current selections of the service request form.
#[derive(Debug, Default)]
pub struct RequestForm {
    pub department: SelectionValue,
    pub team: SelectionValue,
    pub service: SelectionValue,
    pub category: SelectionValue,
}

impl RequestForm {
    pub fn value(&self, field: FieldKind) -> &SelectionValue {
        match field {
            FieldKind::Department => &self.department,
            FieldKind::Team => &self.team,
            FieldKind::Service => &self.service,
            FieldKind::ServiceCategory => &self.category,
        }
    }

    pub fn set(&mut self, field: FieldKind, value: SelectionValue) {
        match field {
            FieldKind::Department => self.department = value,
            FieldKind::Team => self.team = value,
            FieldKind::Service => self.service = value,
            FieldKind::ServiceCategory => self.category = value,
        }
    }
}

pub struct App {
    pub input_mode: InputMode,
    pub active_field: FieldKind,
    pub form: RequestForm,
    /// Open dropdown, if any. Dropped on close; never shared across fields.
    pub dropdown: Option<DropdownState<DirectoryRecord>>,
    pub spinner_frame: usize,
    pub should_quit: bool,
    page_size: u32,
    visible_rows: usize,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            input_mode: InputMode::Normal,
            active_field: FieldKind::Department,
            form: RequestForm::default(),
            dropdown: None,
            spinner_frame: 0,
            should_quit: false,
            page_size: config.page_size,
            visible_rows: config.visible_rows,
        }
    }

    /// Scope key for a field given the current form state.
    ///
    /// Teams are scoped to the chosen department; the other collections are
    /// unfiltered.
    pub fn scope_for(&self, field: FieldKind) -> ScopeKey {
        match field {
            FieldKind::Department => ScopeKey::new("departments"),
            FieldKind::Team => {
                let scope = ScopeKey::new("teams");
                match self.form.department.id() {
                    Some(dep) => scope.with_filter("department", dep),
                    None => scope,
                }
            }
            FieldKind::Service => ScopeKey::new("services"),
            FieldKind::ServiceCategory => ScopeKey::new("service-categories"),
        }
    }

    pub fn next_field(&mut self) {
        self.active_field = self.active_field.next();
    }

    pub fn prev_field(&mut self) {
        self.active_field = self.active_field.prev();
    }

    /// Open a dropdown on the active field, returning the initial request.
    pub fn open_dropdown(&mut self) -> Option<PageRequest> {
        let scope = self.scope_for(self.active_field);
        let (dropdown, request) = DropdownState::open(scope, self.page_size, self.visible_rows);
        self.dropdown = Some(dropdown);
        self.input_mode = InputMode::Dropdown;
        request
    }

    /// Close the dropdown without choosing. Dropping the state is what
    /// cancels its trigger; any in-flight fetch result finds no subscriber.
    pub fn close_dropdown(&mut self) {
        self.dropdown = None;
        self.input_mode = InputMode::Normal;
    }

    /// Apply the highlighted choice to the form and close the dropdown.
    pub fn choose_highlighted(&mut self) {
        let Some(dropdown) = &self.dropdown else {
            return;
        };
        let Some(id) = dropdown.choose().map(str::to_string) else {
            return;
        };

        let field = self.active_field;
        let changed = self.form.value(field).id() != Some(id.as_str());
        self.form.set(field, SelectionValue::from(id));

        // A different department makes the previous team selection meaningless
        if field == FieldKind::Department && changed {
            self.form.set(FieldKind::Team, SelectionValue::None);
        }

        self.close_dropdown();
    }

    /// Clear the active field's selection.
    pub fn clear_active_field(&mut self) {
        self.form.set(self.active_field, SelectionValue::None);
        if self.active_field == FieldKind::Department {
            self.form.set(FieldKind::Team, SelectionValue::None);
        }
    }

    /// Route a completed fetch to the open dropdown.
    ///
    /// With no dropdown open the event is dropped on the floor; with one open
    /// the loader's staleness guard decides whether it still applies.
    pub fn apply_fetch(&mut self, event: FetchEvent<DirectoryRecord>) {
        let Some(dropdown) = &mut self.dropdown else {
            return;
        };
        match event.outcome {
            Ok(result) => dropdown.loader.page_arrived(&event.scope, event.page, result),
            Err(err) => dropdown.loader.page_failed(&event.scope, event.page, err),
        }
    }

    /// Let the open dropdown check its sentinel and ask for the next page.
    pub fn poll_more(&mut self) -> Option<PageRequest> {
        self.dropdown.as_mut()?.poll_more()
    }
}
