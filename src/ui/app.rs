//! Main application window.

use std::sync::{Arc, mpsc};
use std::time::Instant;

use eframe::egui::{self, Align, Layout, RichText};
use egui_phosphor::regular::{MAP_TRIFOLD, TABLE, USER_PLUS};
use tracing::{error, info};

use crate::client::{ApiClient, CreatedEmployee};
use crate::config::AppConfig;
use crate::error::Result;
use crate::export::{export_rows_to_excel, generate_export_filename, show_save_dialog};
use crate::location::{Coordinates, LocationError, LocationProvider};
use crate::models::EmployeeRecord;
use crate::notification::Notification;
use crate::shell::{LoadState, Shell, ViewMode};
use crate::table::{EMPLOYEE_COLUMNS, filter_and_sort};

use super::components::{colors, notification_toast};
use super::form_view::{self, FormAction};
use super::map_view;
use super::table_view::{self, TableAction};

type LocationResult = std::result::Result<Coordinates, LocationError>;

/// Main application state.
pub struct DirectoryApp {
    config: AppConfig,
    rt: tokio::runtime::Runtime,
    client: ApiClient,
    location: Arc<dyn LocationProvider>,
    shell: Shell,

    fetch_rx: Option<mpsc::Receiver<Result<Vec<EmployeeRecord>>>>,
    submit_rx: Option<mpsc::Receiver<Result<CreatedEmployee>>>,
    location_rx: Option<mpsc::Receiver<LocationResult>>,
}

impl DirectoryApp {
    pub fn new(
        config: AppConfig,
        rt: tokio::runtime::Runtime,
        client: ApiClient,
        location: Arc<dyn LocationProvider>,
        startup_error: Option<String>,
    ) -> Self {
        let mut shell = Shell::new(&config.ui);
        if let Some(message) = startup_error {
            shell.notifier.show(Notification::error(message));
        }

        Self {
            config,
            rt,
            client,
            location,
            shell,
            fetch_rx: None,
            submit_rx: None,
            location_rx: None,
        }
    }

    /// Spawn a list fetch. The shell must already have claimed it.
    fn spawn_fetch(&mut self, ctx: &egui::Context) {
        let (tx, rx) = mpsc::channel();
        self.fetch_rx = Some(rx);

        let client = self.client.clone();
        let ctx = ctx.clone();
        self.rt.spawn(async move {
            let result = client.list_employees().await;
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    fn refresh(&mut self, ctx: &egui::Context) {
        if self.shell.begin_refresh() {
            info!("Refreshing employee list");
            self.spawn_fetch(ctx);
        }
    }

    fn request_location(&mut self, ctx: &egui::Context) {
        if !self.shell.form.begin_location_request() {
            return;
        }

        let (tx, rx) = mpsc::channel();
        self.location_rx = Some(rx);

        let provider = Arc::clone(&self.location);
        let ctx = ctx.clone();
        self.rt.spawn(async move {
            let result = provider.current_position().await;
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    fn submit(&mut self, ctx: &egui::Context) {
        let Some(draft) = self.shell.begin_submit() else {
            return;
        };

        let (tx, rx) = mpsc::channel();
        self.submit_rx = Some(rx);

        let client = self.client.clone();
        let ctx = ctx.clone();
        self.rt.spawn(async move {
            let result = client.create_employee(&draft).await;
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Write the filtered and sorted rows of every page to a workbook.
    fn export(&mut self) {
        let rows = filter_and_sort(self.shell.employees(), &self.shell.table);
        if rows.is_empty() {
            self.shell
                .notifier
                .show(Notification::info("No employees to export"));
            return;
        }

        let Some(path) = show_save_dialog(&generate_export_filename("employees")) else {
            return;
        };

        let count = rows.len();
        match export_rows_to_excel(&rows, &EMPLOYEE_COLUMNS, &path) {
            Ok(()) => {
                info!("Exported {} employees to {:?}", count, path);
                self.shell
                    .notifier
                    .show(Notification::success(format!("Exported {count} employees")));
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.shell
                    .notifier
                    .show(Notification::error(format!("Export failed: {e}")));
            }
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self, ctx: &egui::Context) {
        if let Some(rx) = &self.fetch_rx
            && let Ok(result) = rx.try_recv()
        {
            self.fetch_rx = None;
            if self.shell.apply_fetch(result) {
                self.spawn_fetch(ctx);
            }
        }

        if let Some(rx) = &self.location_rx
            && let Ok(result) = rx.try_recv()
        {
            self.location_rx = None;
            self.shell.form.apply_location(result);
        }

        if let Some(rx) = &self.submit_rx
            && let Ok(result) = rx.try_recv()
        {
            self.submit_rx = None;
            if self.shell.apply_submit(result) {
                self.spawn_fetch(ctx);
            }
        }
    }

    fn is_busy(&self) -> bool {
        self.fetch_rx.is_some() || self.location_rx.is_some() || self.submit_rx.is_some()
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui
                        .add_enabled(!self.shell.is_fetching(), egui::Button::new("Refresh"))
                        .clicked()
                    {
                        self.refresh(ui.ctx());
                        ui.close();
                    }
                    if ui.button("Export to Excel").clicked() {
                        self.export();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });
    }

    fn show_tabs(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("view_tabs").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                for view in ViewMode::ALL {
                    let icon = match view {
                        ViewMode::Table => TABLE,
                        ViewMode::Map => MAP_TRIFOLD,
                        ViewMode::Add => USER_PLUS,
                    };
                    let text = RichText::new(format!("{icon} {}", view.label().to_uppercase())).size(15.0);
                    if ui.selectable_label(self.shell.view() == view, text).clicked() {
                        self.shell.select_view(view);
                    }
                    ui.add_space(8.0);
                }
            });
            ui.add_space(4.0);
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    let (color, text) = match self.shell.load_state() {
                        LoadState::Idle => (colors::NEUTRAL, "Idle".to_string()),
                        LoadState::Loading => (colors::WARNING, "Loading...".to_string()),
                        LoadState::Loaded => (
                            colors::SUCCESS,
                            format!("{} employees", self.shell.employees().len()),
                        ),
                        LoadState::Errored => (colors::ERROR, "Load failed".to_string()),
                    };
                    if self.shell.is_fetching() {
                        ui.spinner();
                    }
                    ui.colored_label(color, text);

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(&self.config.api.base_url);
                    });
                });
            });
    }

    fn show_content(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let view = self.shell.view();
            if self.shell.is_loading() && view != ViewMode::Add {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                return;
            }

            match view {
                ViewMode::Table => {
                    let busy = self.shell.is_fetching();
                    let (state, employees) = self.shell.table_mut();
                    match table_view::show(ui, state, employees, busy) {
                        TableAction::Refresh => self.refresh(ui.ctx()),
                        TableAction::Export => self.export(),
                        TableAction::None => {}
                    }
                }
                ViewMode::Map => {
                    map_view::show(
                        ui,
                        self.shell.map_points(),
                        self.shell.employees().len(),
                        self.config.ui.map_center,
                    );
                }
                ViewMode::Add => match form_view::show(ui, &mut self.shell.form) {
                    FormAction::Submit => self.submit(ui.ctx()),
                    FormAction::RetryLocation => self.request_location(ui.ctx()),
                    FormAction::None => {}
                },
            }
        });
    }

    fn show_notification(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.shell.notifier.expire(now);

        if let Some(notification) = self.shell.notifier.current()
            && notification_toast(ctx, notification)
        {
            self.shell.notifier.dismiss();
        }

        if let Some(remaining) = self.shell.notifier.remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }
}

impl eframe::App for DirectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Startup fetch, claimed once
        if self.shell.begin_initial_fetch() {
            self.spawn_fetch(ctx);
        }

        // Location is requested the first time the form is displayed
        if self.shell.view() == ViewMode::Add && self.shell.form.needs_initial_location() {
            self.request_location(ctx);
        }

        self.poll_async_results(ctx);

        // Request repaint during async operations
        if self.is_busy() {
            ctx.request_repaint();
        }

        self.show_menu_bar(ctx);
        self.show_tabs(ctx);
        self.show_status_bar(ctx);
        self.show_content(ctx);
        self.show_notification(ctx);
    }
}
