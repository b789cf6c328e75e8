use crate::api::{ChangeEvent, Client, Monitor};
use crate::messages::{Request, Response};
use crate::style::configure_style;
use crate::ui::change_detail::{ChangeDetailWindow, DetailAction};
use crate::ui::history::{HistoryAction, HistoryWindow};
use crate::ui::monitor_form::{AddMonitorForm, EditMonitorForm, FormOutcome};
use crate::ui::monitor_list::{MonitorAction, MonitorList};
use crate::worker::spawn_worker;
use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender};
use tracing::{debug, error, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Banner {
    Error(String),
    Notice(String),
}

/// Main window: monitor list, dialogs and the history and change
/// viewports opened from it.
pub struct WatcherApp {
    sender: Sender<Request>,
    receiver: Receiver<Response>,
    monitors: MonitorList,
    add_form: Option<AddMonitorForm>,
    edit_form: Option<EditMonitorForm>,
    pending_delete: Option<Monitor>,
    histories: HashMap<u64, HistoryWindow>, // by monitor id
    details: HashMap<u64, ChangeDetailWindow>, // by change id
    banner: Option<Banner>,
}

impl WatcherApp {
    /// Style the context, start the worker and request the monitor list.
    /// The worker repaints the UI whenever a response is ready.
    pub fn new(cc: &eframe::CreationContext<'_>, client: Client) -> Self {
        configure_style(&cc.egui_ctx);
        let ctx = cc.egui_ctx.clone();
        let (sender, receiver) = spawn_worker(client, move || ctx.request_repaint());
        let mut app = Self::with_channels(sender, receiver);
        app.reload_monitors();
        app
    }

    fn with_channels(sender: Sender<Request>, receiver: Receiver<Response>) -> Self {
        Self {
            sender,
            receiver,
            monitors: MonitorList::default(),
            add_form: None,
            edit_form: None,
            pending_delete: None,
            histories: HashMap::new(),
            details: HashMap::new(),
            banner: None,
        }
    }

    fn request(&mut self, request: Request) {
        if let Err(e) = self.sender.send(request) {
            error!("Failed to send request: {}", e);
            self.banner = Some(Banner::Error("Background worker stopped".to_string()));
        }
    }

    fn reload_monitors(&mut self) {
        self.monitors.set_loading();
        self.request(Request::LoadMonitors);
    }

    fn handle_response(&mut self, response: Response) {
        match response {
            Response::MonitorsLoaded(Ok(monitors)) => self.monitors.set_monitors(monitors),
            Response::MonitorsLoaded(Err(e)) => {
                self.monitors.load_failed();
                self.banner = Some(Banner::Error(format!("Failed to load monitors: {e}")));
            }
            Response::MonitorCreated(Ok(monitor)) => {
                self.banner = Some(Banner::Notice(format!("Created monitor {}", monitor.name)));
                self.monitors.prepend(monitor);
            }
            Response::MonitorCreated(Err(e)) => {
                self.banner = Some(Banner::Error(format!("Failed to create monitor: {e}")));
            }
            Response::MonitorUpdated(Ok(monitor)) => {
                self.banner = Some(Banner::Notice(format!("Updated monitor {}", monitor.name)));
                self.monitors.replace(monitor);
            }
            Response::MonitorUpdated(Err(e)) => {
                self.banner = Some(Banner::Error(format!("Failed to update monitor: {e}")));
            }
            Response::MonitorDeleted(Ok(id)) => {
                self.histories.remove(&id);
                self.details.retain(|_, w| w.change().monitor_id != id);
                self.banner = Some(Banner::Notice("Monitor deleted".to_string()));
                self.reload_monitors();
            }
            Response::MonitorDeleted(Err(e)) => {
                self.banner = Some(Banner::Error(format!("Failed to delete monitor: {e}")));
            }
            Response::ChangesLoaded { monitor_id, result } => {
                match self.histories.get_mut(&monitor_id) {
                    Some(window) => window.set_changes(result),
                    None => debug!("History for monitor {} closed, dropping changes", monitor_id),
                }
            }
            Response::DiffLoaded { change_id, loaded } => match self.details.get_mut(&change_id) {
                Some(window) => window.set_loaded(loaded),
                None => debug!("Change {} closed, dropping diff", change_id),
            },
            Response::Saved(Ok(path)) => {
                self.banner = Some(Banner::Notice(format!("Saved to {}", path.display())));
            }
            Response::Saved(Err(e)) => {
                warn!("Save failed: {}", e);
                self.banner = Some(Banner::Error(e));
            }
        }
    }

    fn handle_monitor_action(&mut self, action: MonitorAction) {
        match action {
            MonitorAction::Add => self.add_form = Some(AddMonitorForm::default()),
            MonitorAction::Edit(monitor) => self.edit_form = Some(EditMonitorForm::new(&monitor)),
            MonitorAction::Delete(monitor) => self.pending_delete = Some(monitor),
            MonitorAction::History(monitor) => self.open_history(monitor),
            MonitorAction::Refresh => self.reload_monitors(),
        }
    }

    fn open_history(&mut self, monitor: Monitor) {
        let id = monitor.id;
        if self.histories.contains_key(&id) {
            return;
        }
        self.histories.insert(id, HistoryWindow::new(monitor));
        self.request(Request::LoadChanges(id));
    }

    fn open_change(&mut self, change: ChangeEvent) {
        if self.details.contains_key(&change.id) {
            return;
        }
        let monitor_name = self
            .histories
            .get(&change.monitor_id)
            .map(|w| w.monitor().name.clone())
            .unwrap_or_default();
        self.details.insert(
            change.id,
            ChangeDetailWindow::new(monitor_name, change.clone()),
        );
        self.request(Request::LoadDiff(change));
    }

    fn handle_history_action(&mut self, action: HistoryAction) {
        match action {
            HistoryAction::Refresh(monitor_id) => {
                if let Some(window) = self.histories.get_mut(&monitor_id) {
                    window.set_loading();
                }
                self.request(Request::LoadChanges(monitor_id));
            }
            HistoryAction::OpenChange(change) => self.open_change(change),
        }
    }

    fn handle_detail_action(&mut self, action: DetailAction) {
        let request = match action {
            DetailAction::SaveFile { file_name, data } => Request::SaveFile { file_name, data },
            DetailAction::SaveFileAs { file_name, data } => Request::SaveFileAs { file_name, data },
            DetailAction::DownloadAsset { file_name, url } => {
                Request::DownloadAsset { file_name, url }
            }
        };
        self.request(request);
    }

    fn show_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = &self.banner else {
            return;
        };
        let mut dismissed = false;
        ui.horizontal(|ui| {
            match banner {
                Banner::Error(message) => {
                    ui.colored_label(ui.visuals().error_fg_color, message);
                }
                Banner::Notice(message) => {
                    ui.label(message);
                }
            }
            if ui.small_button("✖").clicked() {
                dismissed = true;
            }
        });
        if dismissed {
            self.banner = None;
        }
    }

    fn show_forms(&mut self, ctx: &egui::Context) {
        if let Some(form) = self.add_form.as_mut() {
            match form.show(ctx) {
                Some(FormOutcome::Submit(request)) => {
                    self.add_form = None;
                    self.request(Request::CreateMonitor(request));
                }
                Some(FormOutcome::Cancel) => self.add_form = None,
                None => {}
            }
        }

        if let Some(form) = self.edit_form.as_mut() {
            let id = form.monitor_id;
            match form.show(ctx) {
                Some(FormOutcome::Submit(request)) => {
                    self.edit_form = None;
                    self.request(Request::UpdateMonitor { id, request });
                }
                Some(FormOutcome::Cancel) => self.edit_form = None,
                None => {}
            }
        }
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context) {
        let Some(monitor) = &self.pending_delete else {
            return;
        };
        let mut confirmed = None;
        egui::Window::new("Delete monitor")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("Delete monitor {}?", monitor.name));
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        confirmed = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        confirmed = Some(false);
                    }
                });
            });

        match confirmed {
            Some(true) => {
                let id = monitor.id;
                self.pending_delete = None;
                self.request(Request::DeleteMonitor(id));
            }
            Some(false) => self.pending_delete = None,
            None => {}
        }
    }

    fn show_windows(&mut self, ctx: &egui::Context) {
        let history_actions: Vec<HistoryAction> = self
            .histories
            .values_mut()
            .filter_map(|window| window.show(ctx))
            .collect();
        self.histories.retain(|_, w| w.is_open());
        for action in history_actions {
            self.handle_history_action(action);
        }

        let detail_actions: Vec<DetailAction> = self
            .details
            .values_mut()
            .filter_map(|window| window.show(ctx))
            .collect();
        self.details.retain(|_, w| w.is_open());
        for action in detail_actions {
            self.handle_detail_action(action);
        }
    }
}

impl eframe::App for WatcherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(response) = self.receiver.try_recv() {
            self.handle_response(response);
        }

        let mut action = None;
        egui::TopBottomPanel::top("toolbar_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            action = self.monitors.show_toolbar(ui);
            self.show_banner(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.monitors.show_list(ui);
        });

        if let Some(action) = action {
            self.handle_monitor_action(action);
        }
        self.show_forms(ctx);
        self.show_delete_confirmation(ctx);
        self.show_windows(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffResult;
    use crate::diff_loader::LoadedDiff;
    use chrono::Utc;
    use std::sync::mpsc;

    fn monitor(id: u64) -> Monitor {
        Monitor {
            id,
            name: format!("m{id}"),
            url: format!("https://example.com/{id}"),
            css_selector: None,
            frequency_seconds: 300,
            notify_email: false,
            notify_email_address: None,
            active: true,
            last_status: None,
            updated_at: Utc::now(),
            created_at: Utc::now(),
        }
    }

    fn change(id: u64, monitor_id: u64) -> ChangeEvent {
        ChangeEvent {
            id,
            monitor_id,
            run_id: id,
            http_status_prev: None,
            http_status_curr: None,
            html_prev: None,
            html_curr: None,
            html_diff: None,
            screenshot_curr: None,
            screenshot_prev: None,
            screenshot_diff: None,
            created_at: Utc::now(),
        }
    }

    fn app() -> (WatcherApp, Receiver<Request>, Sender<Response>) {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        (
            WatcherApp::with_channels(request_tx, response_rx),
            request_rx,
            response_tx,
        )
    }

    #[test]
    fn history_is_opened_once_per_monitor() {
        let (mut app, requests, _) = app();
        app.handle_monitor_action(MonitorAction::History(monitor(3)));
        app.handle_monitor_action(MonitorAction::History(monitor(3)));
        assert!(matches!(requests.try_recv(), Ok(Request::LoadChanges(3))));
        assert!(requests.try_recv().is_err());
        assert_eq!(app.histories.len(), 1);
    }

    #[test]
    fn opened_change_takes_monitor_name_and_loads_diff() {
        let (mut app, requests, _) = app();
        app.open_history(monitor(1));
        let _ = requests.try_recv();
        app.handle_history_action(HistoryAction::OpenChange(change(7, 1)));
        assert!(matches!(requests.try_recv(), Ok(Request::LoadDiff(c)) if c.id == 7));

        app.handle_response(Response::DiffLoaded {
            change_id: 7,
            loaded: LoadedDiff {
                result: DiffResult::TextDiff(Vec::new()),
                prev_html: String::new(),
                curr_html: "<p>x</p>".into(),
            },
        });
        assert!(app.details[&7].download_rows().is_some());
    }

    #[test]
    fn diff_for_closed_window_is_dropped() {
        let (mut app, _, _) = app();
        app.handle_response(Response::DiffLoaded {
            change_id: 99,
            loaded: LoadedDiff {
                result: DiffResult::Unavailable("gone".into()),
                prev_html: String::new(),
                curr_html: String::new(),
            },
        });
        assert!(app.details.is_empty());
        assert!(app.banner.is_none());
    }

    #[test]
    fn created_monitor_is_selected_with_notice() {
        let (mut app, _, _) = app();
        app.handle_response(Response::MonitorsLoaded(Ok(vec![monitor(1)])));
        app.handle_response(Response::MonitorCreated(Ok(monitor(2))));
        assert_eq!(app.monitors.selected().map(|m| m.id), Some(2));
        assert_eq!(app.banner, Some(Banner::Notice("Created monitor m2".into())));
    }

    #[test]
    fn deleting_closes_windows_and_reloads() {
        let (mut app, requests, _) = app();
        app.open_history(monitor(4));
        app.open_change(change(10, 4));
        while requests.try_recv().is_ok() {}

        app.handle_response(Response::MonitorDeleted(Ok(4)));
        assert!(app.histories.is_empty());
        assert!(app.details.is_empty());
        assert!(matches!(requests.try_recv(), Ok(Request::LoadMonitors)));
    }

    #[test]
    fn failures_surface_as_error_banner() {
        let (mut app, _, _) = app();
        app.handle_response(Response::MonitorsLoaded(Err("http 401: denied".into())));
        assert_eq!(
            app.banner,
            Some(Banner::Error("Failed to load monitors: http 401: denied".into()))
        );
    }

    #[test]
    fn stopped_worker_is_reported() {
        let (mut app, requests, _) = app();
        drop(requests);
        app.handle_monitor_action(MonitorAction::Refresh);
        assert_eq!(app.banner, Some(Banner::Error("Background worker stopped".into())));
    }
}
