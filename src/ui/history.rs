use crate::api::{ChangeEvent, Monitor};
use crate::constant::HISTORY_WINDOW_SIZE;
use egui::{Context, ScrollArea, Ui};

/// What the user asked for in a history window.
#[derive(Debug)]
pub enum HistoryAction {
    Refresh(u64), // monitor id
    OpenChange(ChangeEvent),
}

/// Change history of one monitor, in its own viewport.
pub struct HistoryWindow {
    monitor: Monitor,
    changes: Option<Vec<ChangeEvent>>,
    error: Option<String>,
    loading: bool,
    open: bool,
    viewport_id: egui::ViewportId,
}

impl HistoryWindow {
    /// Open in the loading state; the app requests the changes right away.
    pub fn new(monitor: Monitor) -> Self {
        let viewport_id = egui::ViewportId::from_hash_of(("history_window", monitor.id));
        Self {
            monitor,
            changes: None,
            error: None,
            loading: true,
            open: true,
            viewport_id,
        }
    }

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Mark a refresh in flight; the toolbar shows a spinner until the
    /// result arrives.
    pub fn set_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Store a fetch result; newest changes are listed first.
    pub fn set_changes(&mut self, result: Result<Vec<ChangeEvent>, String>) {
        self.loading = false;
        match result {
            Ok(mut changes) => {
                changes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                self.changes = Some(changes);
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
    }

    /// Changes newest first; `None` before the first load.
    pub fn changes(&self) -> Option<&[ChangeEvent]> {
        self.changes.as_deref()
    }

    /// Draw the history in its own viewport. Closing it marks the window
    /// closed so the app can drop it.
    ///
    /// # Returns
    /// A refresh or an opened change, if the user picked one this frame.
    pub fn show(&mut self, ctx: &Context) -> Option<HistoryAction> {
        if !self.open {
            return None;
        }

        let mut action = None;
        ctx.show_viewport_immediate(
            self.viewport_id,
            egui::ViewportBuilder::default()
                .with_title(format!("History – {}", self.monitor.name))
                .with_inner_size(HISTORY_WINDOW_SIZE)
                .with_resizable(true),
            |ctx, _class| {
                egui::TopBottomPanel::top("history_toolbar").show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("🔄 Refresh").clicked() {
                            action = Some(HistoryAction::Refresh(self.monitor.id));
                        }
                        ui.label(self.monitor.url.as_str());
                        if self.loading {
                            ui.spinner();
                        }
                    });
                });

                egui::CentralPanel::default().show(ctx, |ui| {
                    if let Some(change) = self.show_content(ui) {
                        action = Some(HistoryAction::OpenChange(change));
                    }
                });

                if ctx.input(|i| i.viewport().close_requested()) {
                    self.open = false;
                }
            },
        );
        action
    }

    fn show_content(&self, ui: &mut Ui) -> Option<ChangeEvent> {
        if let Some(error) = &self.error {
            ui.colored_label(ui.visuals().error_fg_color, error);
        }

        let Some(changes) = &self.changes else {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.heading("Loading history...");
                ui.spinner();
            });
            return None;
        };

        if changes.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.heading("No changes detected yet");
            });
            return None;
        }

        let mut opened = None;
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for change in changes {
                    let mut label = change.display_label();
                    if let Some((prev, curr)) = change.status_change() {
                        label.push_str(&format!("  (HTTP {prev} → {curr})"));
                    }
                    if ui.selectable_label(false, label).clicked() {
                        opened = Some(change.clone());
                    }
                }
            });
        opened
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn change(id: u64, hour: u32) -> ChangeEvent {
        ChangeEvent {
            id,
            monitor_id: 1,
            run_id: id,
            http_status_prev: None,
            http_status_curr: None,
            html_prev: None,
            html_curr: None,
            html_diff: None,
            screenshot_curr: None,
            screenshot_prev: None,
            screenshot_diff: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap(),
        }
    }

    fn window() -> HistoryWindow {
        HistoryWindow::new(Monitor {
            id: 1,
            name: "Blog".into(),
            url: "https://blog.example.com".into(),
            css_selector: None,
            frequency_seconds: 300,
            notify_email: false,
            notify_email_address: None,
            active: true,
            last_status: None,
            updated_at: Utc::now(),
            created_at: Utc::now(),
        })
    }

    #[test]
    fn changes_are_listed_newest_first() {
        let mut w = window();
        w.set_changes(Ok(vec![change(1, 8), change(2, 12), change(3, 10)]));
        let ids: Vec<u64> = w.changes().unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn failed_refresh_keeps_previous_changes() {
        let mut w = window();
        w.set_changes(Ok(vec![change(1, 8)]));
        w.set_changes(Err("http 500: boom".into()));
        assert_eq!(w.changes().unwrap().len(), 1);
        assert_eq!(w.error.as_deref(), Some("http 500: boom"));
        w.set_loading();
        assert!(w.error.is_none());
    }

    #[test]
    fn refresh_shows_loading_over_existing_changes() {
        let mut w = window();
        assert!(w.is_loading());
        w.set_changes(Ok(vec![change(1, 8)]));
        assert!(!w.is_loading());

        w.set_loading();
        assert!(w.is_loading());
        assert_eq!(w.changes().unwrap().len(), 1);

        w.set_changes(Err("timeout".into()));
        assert!(!w.is_loading());
    }
}
