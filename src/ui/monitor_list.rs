use crate::api::Monitor;
use egui::{ScrollArea, Ui};

/// Toolbar buttons of the main window.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorAction {
    Add,
    Delete(Monitor),
    History(Monitor),
    Edit(Monitor),
    Refresh,
}

/// The monitor list on the main window and its selection.
#[derive(Default)]
pub struct MonitorList {
    monitors: Vec<Monitor>,
    selected: Option<usize>,
    loading: bool,
}

impl MonitorList {
    /// Show the spinner until the next list or failure arrives.
    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    /// Replace the list; the selection is cleared.
    pub fn set_monitors(&mut self, monitors: Vec<Monitor>) {
        self.monitors = monitors;
        self.selected = None;
        self.loading = false;
    }

    pub fn load_failed(&mut self) {
        self.loading = false;
    }

    /// A freshly created monitor goes on top and becomes the selection.
    pub fn prepend(&mut self, monitor: Monitor) {
        self.monitors.insert(0, monitor);
        self.selected = Some(0);
    }

    /// Swap in an updated monitor, matched by id. Unknown ids are ignored.
    pub fn replace(&mut self, monitor: Monitor) {
        if let Some(slot) = self.monitors.iter_mut().find(|m| m.id == monitor.id) {
            *slot = monitor;
        }
    }

    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    pub fn selected(&self) -> Option<&Monitor> {
        self.selected.and_then(|i| self.monitors.get(i))
    }

    /// Select a row; selecting the selected row clears the selection.
    pub fn select(&mut self, index: usize) {
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index).filter(|&i| i < self.monitors.len())
        };
    }

    /// Draw the toolbar. Delete, History and Edit need a selection.
    ///
    /// # Returns
    /// The button clicked this frame, carrying the selected monitor.
    pub fn show_toolbar(&mut self, ui: &mut Ui) -> Option<MonitorAction> {
        let mut action = None;
        let selected = self.selected().cloned();
        ui.horizontal(|ui| {
            if ui.button("Add monitor").clicked() {
                action = Some(MonitorAction::Add);
            }
            ui.add_enabled_ui(selected.is_some(), |ui| {
                if ui.button("Delete").clicked() {
                    action = selected.clone().map(MonitorAction::Delete);
                }
                if ui.button("History").clicked() {
                    action = selected.clone().map(MonitorAction::History);
                }
                if ui.button("Edit").clicked() {
                    action = selected.clone().map(MonitorAction::Edit);
                }
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("🔄 Refresh").clicked() {
                    action = Some(MonitorAction::Refresh);
                }
                if self.loading {
                    ui.spinner();
                }
            });
        });
        action
    }

    /// Draw the monitors, or a hint when there are none.
    pub fn show_list(&mut self, ui: &mut Ui) {
        if self.monitors.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                if self.loading {
                    ui.heading("Loading monitors...");
                } else {
                    ui.heading("No monitors yet");
                    ui.label("Use \"Add monitor\" to start watching a page.");
                }
            });
            return;
        }

        let mut clicked = None;
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (i, monitor) in self.monitors.iter().enumerate() {
                    let is_selected = self.selected == Some(i);
                    if ui
                        .selectable_label(is_selected, monitor.display_label())
                        .clicked()
                    {
                        clicked = Some(i);
                    }
                }
            });
        if let Some(i) = clicked {
            self.select(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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

    #[test]
    fn reload_clears_selection() {
        let mut list = MonitorList::default();
        list.set_monitors(vec![monitor(1), monitor(2)]);
        list.select(1);
        assert_eq!(list.selected().map(|m| m.id), Some(2));
        list.set_monitors(vec![monitor(1)]);
        assert!(list.selected().is_none());
    }

    #[test]
    fn clicking_selected_row_unselects_it() {
        let mut list = MonitorList::default();
        list.set_monitors(vec![monitor(1)]);
        list.select(0);
        list.select(0);
        assert!(list.selected().is_none());
        list.select(5);
        assert!(list.selected().is_none());
    }

    #[test]
    fn created_monitor_goes_on_top_selected() {
        let mut list = MonitorList::default();
        list.set_monitors(vec![monitor(1)]);
        list.prepend(monitor(9));
        assert_eq!(list.monitors()[0].id, 9);
        assert_eq!(list.selected().map(|m| m.id), Some(9));
    }

    #[test]
    fn replace_updates_in_place() {
        let mut list = MonitorList::default();
        list.set_monitors(vec![monitor(1), monitor(2)]);
        let mut updated = monitor(2);
        updated.active = false;
        list.replace(updated);
        assert!(!list.monitors()[1].active);
        assert_eq!(list.monitors().len(), 2);
    }
}
