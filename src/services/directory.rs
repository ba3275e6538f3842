//! Simulated directory backend.
//!
//! Serves one page per call out of in-memory datasets for the four
//! collections the dashboard picks from: departments, teams, services, and
//! service categories. Stands in for the real HTTP client; same contract, no
//! transport. Latency is simulated so the incremental loading behavior is
//! visible in the UI, and the next fetch can be forced to fail to exercise
//! the retry path.

use std::sync::Mutex;
use std::time::Duration;

use futures::future::BoxFuture;

use crate::error::{FetchError, FetchResult};
use crate::loader::{ListEntry, PageFetcher, PageRequest, PageResult};

/// One record of a remote collection.
#[derive(Debug, Clone)]
pub struct DirectoryRecord {
    pub id: String,
    pub label: String,
    /// Owning department, set on team records only
    pub department_id: Option<String>,
}

impl DirectoryRecord {
    fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            department_id: None,
        }
    }

    fn in_department(mut self, department_id: impl Into<String>) -> Self {
        self.department_id = Some(department_id.into());
        self
    }
}

impl ListEntry for DirectoryRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// In-memory stand-in for the directory service.
pub struct DirectoryClient {
    departments: Vec<DirectoryRecord>,
    teams: Vec<DirectoryRecord>,
    services: Vec<DirectoryRecord>,
    categories: Vec<DirectoryRecord>,
    latency: Duration,
    /// When set, the next fetch fails with this error instead of answering
    fail_next: Mutex<Option<FetchError>>,
}

impl DirectoryClient {
    pub fn new(latency_ms: u64) -> Self {
        Self {
            departments: seed_departments(),
            teams: seed_teams(),
            services: seed_services(),
            categories: seed_categories(),
            latency: Duration::from_millis(latency_ms),
            fail_next: Mutex::new(None),
        }
    }

    /// Make the next fetch fail, whatever collection it targets.
    pub fn fail_next_fetch(&self, err: FetchError) {
        if let Ok(mut guard) = self.fail_next.lock() {
            *guard = Some(err);
        }
    }

    fn take_injected_failure(&self) -> Option<FetchError> {
        self.fail_next.lock().ok().and_then(|mut guard| guard.take())
    }

    /// Slice one page out of a collection, applying the scope's filters.
    fn page_of(&self, request: &PageRequest) -> FetchResult<PageResult<DirectoryRecord>> {
        let records: Vec<&DirectoryRecord> = match request.scope.resource() {
            "departments" => self.departments.iter().collect(),
            "teams" => {
                let department = request.scope.filter("department");
                self.teams
                    .iter()
                    .filter(|r| match department {
                        Some(dep) => r.department_id.as_deref() == Some(dep),
                        None => true,
                    })
                    .collect()
            }
            "services" => self.services.iter().collect(),
            "service-categories" => self.categories.iter().collect(),
            other => {
                return Err(FetchError::Server {
                    status: 404,
                    message: format!("unknown collection '{}'", other),
                });
            }
        };

        let page_size = request.page_size.max(1) as usize;
        let total_pages = records.len().div_ceil(page_size) as u32;
        let start = (request.page.max(1) as usize - 1) * page_size;
        let items = records
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        Ok(PageResult { items, total_pages })
    }
}

impl PageFetcher<DirectoryRecord> for DirectoryClient {
    fn fetch_page(
        &self,
        request: PageRequest,
    ) -> BoxFuture<'static, FetchResult<PageResult<DirectoryRecord>>> {
        let outcome = match self.take_injected_failure() {
            Some(err) => Err(err),
            None => self.page_of(&request),
        };
        let latency = self.latency;

        Box::pin(async move {
            tokio::time::sleep(latency).await;
            outcome
        })
    }
}

fn seed_departments() -> Vec<DirectoryRecord> {
    let names = [
        "Facilities", "Security", "IT Operations", "Fleet", "Maintenance",
        "Logistics", "Grounds", "Janitorial", "Catering", "Front Desk",
        "Engineering", "Procurement", "Finance", "Human Resources", "Legal",
        "Communications", "Planning", "Warehouse", "Dispatch", "Training",
        "Safety", "Compliance", "Records", "Mailroom",
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, name)| DirectoryRecord::new(format!("d-{}", i + 1), *name))
        .collect()
}

fn seed_teams() -> Vec<DirectoryRecord> {
    let mut teams = Vec::new();
    for dep in 1..=24 {
        let shifts = ["Day Shift", "Night Shift", "Weekend"];
        for (i, shift) in shifts.iter().enumerate() {
            teams.push(
                DirectoryRecord::new(
                    format!("t-{}-{}", dep, i + 1),
                    format!("Dept {} {}", dep, shift),
                )
                .in_department(format!("d-{}", dep)),
            );
        }
    }
    teams
}

fn seed_services() -> Vec<DirectoryRecord> {
    let names = [
        "Room Cleaning", "Lock Repair", "HVAC Inspection", "Pest Control",
        "Window Washing", "Snow Removal", "Light Replacement", "Painting",
        "Plumbing", "Electrical", "Moving Assistance", "Waste Pickup",
        "Key Cutting", "Badge Printing", "AV Setup", "Furniture Assembly",
        "Carpet Shampoo", "Elevator Service", "Fire Drill", "Landscaping",
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, name)| DirectoryRecord::new(format!("s-{}", i + 1), *name))
        .collect()
}

fn seed_categories() -> Vec<DirectoryRecord> {
    let names = [
        "Cleaning", "Repairs", "Inspections", "Installations", "Removals",
        "Events", "Grounds", "Utilities", "Access", "Transport", "Seasonal",
        "Emergency",
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, name)| DirectoryRecord::new(format!("c-{}", i + 1), *name))
        .collect()
}
