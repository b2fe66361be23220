//! View shell state: view mode, employee loading lifecycle and notifications.
//!
//! This is the UI-independent half of the main window. The egui app owns a
//! [`Shell`], spawns the async work it asks for, and feeds the results back.

use std::time::Duration;

use tracing::{info, warn};

use crate::client::CreatedEmployee;
use crate::config::UiConfig;
use crate::error::Result;
use crate::form::{FormState, MSG_FIX_ERRORS, SubmitBlocked};
use crate::geo::{MapPoint, filter_locations};
use crate::models::{EmployeeRecord, FormDraft};
use crate::notification::{Notification, Notifier};
use crate::table::TableViewState;

pub const MSG_LOADED: &str = "Data loaded successfully!";
pub const MSG_LOAD_FAILED: &str = "Failed to fetch employees";

/// Content shown below the tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Map,
    Add,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Table, ViewMode::Map, ViewMode::Add];

    /// Tab label.
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Table => "Employees Table",
            ViewMode::Map => "Map View",
            ViewMode::Add => "Add Employee",
        }
    }
}

/// Employee list loading lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// What started the fetch currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Initial,
    Refresh,
    AfterCreate,
}

/// Main window state.
#[derive(Debug)]
pub struct Shell {
    view: ViewMode,
    load_state: LoadState,
    /// Set before the startup fetch is spawned; never cleared.
    initial_fetch_started: bool,
    in_flight: Option<FetchKind>,
    /// A create succeeded while another fetch was in flight.
    refetch_pending: bool,
    employees: Vec<EmployeeRecord>,
    map_points: Vec<MapPoint>,
    pub table: TableViewState,
    pub form: FormState,
    pub notifier: Notifier,
}

impl Shell {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            view: ViewMode::default(),
            load_state: LoadState::Idle,
            initial_fetch_started: false,
            in_flight: None,
            refetch_pending: false,
            employees: Vec::new(),
            map_points: Vec::new(),
            table: TableViewState::new(ui.page_size),
            form: FormState::new(),
            notifier: Notifier::new(Duration::from_secs(ui.notification_secs)),
        }
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn select_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn employees(&self) -> &[EmployeeRecord] {
        &self.employees
    }

    pub fn map_points(&self) -> &[MapPoint] {
        &self.map_points
    }

    /// Table state together with the rows it applies to.
    pub fn table_mut(&mut self) -> (&mut TableViewState, &[EmployeeRecord]) {
        (&mut self.table, &self.employees)
    }

    /// Claim the startup fetch. Returns `true` exactly once per session.
    pub fn begin_initial_fetch(&mut self) -> bool {
        if self.initial_fetch_started {
            return false;
        }
        self.initial_fetch_started = true;
        self.load_state = LoadState::Loading;
        self.in_flight = Some(FetchKind::Initial);
        info!("Starting initial employee fetch");
        true
    }

    /// Claim a user-requested refresh. Ignored while another fetch is in flight.
    pub fn begin_refresh(&mut self) -> bool {
        self.begin_follow_up(FetchKind::Refresh)
    }

    fn begin_follow_up(&mut self, kind: FetchKind) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        if !self.initial_fetch_started {
            return self.begin_initial_fetch();
        }
        self.in_flight = Some(kind);
        true
    }

    /// Replace the employee list and map points with a fetch result.
    ///
    /// A failure clears both rather than keeping stale data. Returns `true`
    /// when a queued post-create fetch was claimed and must be spawned.
    pub fn apply_fetch(&mut self, result: Result<Vec<EmployeeRecord>>) -> bool {
        let kind = self.in_flight.take();
        let quiet = kind == Some(FetchKind::AfterCreate) || self.refetch_pending;
        match result {
            Ok(records) => {
                self.map_points = filter_locations(&records);
                info!(
                    "Loaded {} employees, {} with valid locations",
                    records.len(),
                    self.map_points.len()
                );
                self.employees = records;
                self.load_state = LoadState::Loaded;
                if !quiet {
                    self.notifier.show(Notification::success(MSG_LOADED));
                }
            }
            Err(e) => {
                warn!("Error fetching employees: {}", e);
                self.employees.clear();
                self.map_points.clear();
                self.load_state = LoadState::Errored;
                self.notifier.show(Notification::error(MSG_LOAD_FAILED));
            }
        }
        self.table.clamp_to(self.employees.len());

        if self.refetch_pending {
            self.refetch_pending = false;
            return self.begin_follow_up(FetchKind::AfterCreate);
        }
        false
    }

    /// Start a form submission. Shows the fix-errors notification when invalid.
    pub fn begin_submit(&mut self) -> Option<FormDraft> {
        match self.form.begin_submit() {
            Ok(draft) => Some(draft),
            Err(SubmitBlocked::Invalid) => {
                self.notifier.show(Notification::error(MSG_FIX_ERRORS));
                None
            }
            Err(SubmitBlocked::InFlight) => None,
        }
    }

    /// Apply a submission result.
    ///
    /// Returns `true` when a follow-up list fetch was claimed so the new
    /// employee shows up in the table and map. If a fetch is already in
    /// flight the follow-up is queued and claimed by [`Shell::apply_fetch`].
    pub fn apply_submit(&mut self, result: Result<CreatedEmployee>) -> bool {
        let notification = self.form.finish_submit(&result);
        self.notifier.show(notification);
        if result.is_err() {
            return false;
        }
        if self.in_flight.is_some() {
            info!("Fetch in flight, queueing post-create refresh");
            self.refetch_pending = true;
            return false;
        }
        self.begin_follow_up(FetchKind::AfterCreate)
    }
}
