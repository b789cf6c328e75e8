use super::diff_view::render_result;
use crate::api::ChangeEvent;
use crate::constant::DETAIL_WINDOW_SIZE;
use crate::diff_loader::LoadedDiff;
use egui::{Context, ScrollArea, Ui};

/// Tabs of the change window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    TextDiff,
    Screenshots,
    Downloads,
}

/// Work the change window asks the app to hand to the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailAction {
    SaveFile { file_name: String, data: Vec<u8> },
    SaveFileAs { file_name: String, data: Vec<u8> },
    DownloadAsset { file_name: String, url: String },
}

/// What a row on the downloads tab offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadSource<'a> {
    Local(&'a str),
    Remote(&'a str),
    Unavailable,
}

/// One line of the downloads tab.
pub struct DownloadRow<'a> {
    pub label: &'static str,
    pub file_name: &'static str,
    pub source: DownloadSource<'a>,
}

/// One change event: text diff, screenshots and downloads.
pub struct ChangeDetailWindow {
    monitor_name: String,
    change: ChangeEvent,
    loaded: Option<LoadedDiff>,
    tab: DetailTab,
    open: bool,
    viewport_id: egui::ViewportId,
}

impl ChangeDetailWindow {
    /// Window for `change`, titled after its monitor. The diff is filled in
    /// later by [`ChangeDetailWindow::set_loaded`].
    pub fn new(monitor_name: impl Into<String>, change: ChangeEvent) -> Self {
        let viewport_id = egui::ViewportId::from_hash_of(("change_detail", change.id));
        Self {
            monitor_name: monitor_name.into(),
            change,
            loaded: None,
            tab: DetailTab::TextDiff,
            open: true,
            viewport_id,
        }
    }

    pub fn change(&self) -> &ChangeEvent {
        &self.change
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Store the fetched snapshots and their diff.
    pub fn set_loaded(&mut self, loaded: LoadedDiff) {
        self.loaded = Some(loaded);
    }

    /// Screenshots attached to the change.
    ///
    /// # Returns
    /// Label and URL of each screenshot with a non-empty URL, in Current,
    /// Previous, Diff order.
    pub fn screenshots(&self) -> Vec<(&'static str, &str)> {
        [
            ("Current", &self.change.screenshot_curr),
            ("Previous", &self.change.screenshot_prev),
            ("Diff", &self.change.screenshot_diff),
        ]
        .into_iter()
        .filter_map(|(label, url)| {
            url.as_deref()
                .filter(|url| !url.is_empty())
                .map(|url| (label, url))
        })
        .collect()
    }

    /// Rows of the downloads tab; `None` until the snapshots are in.
    pub fn download_rows(&self) -> Option<Vec<DownloadRow<'_>>> {
        let loaded = self.loaded.as_ref()?;
        Some(vec![
            DownloadRow {
                label: "Previous HTML",
                file_name: "previous.html",
                source: local_source(&loaded.prev_html),
            },
            DownloadRow {
                label: "Current HTML",
                file_name: "current.html",
                source: local_source(&loaded.curr_html),
            },
            DownloadRow {
                label: "Current screenshot",
                file_name: "current.png",
                source: remote_source(&self.change.screenshot_curr),
            },
            DownloadRow {
                label: "Previous screenshot",
                file_name: "previous.png",
                source: remote_source(&self.change.screenshot_prev),
            },
        ])
    }

    /// Draw the window in its own viewport.
    ///
    /// # Returns
    /// The download the user asked for this frame, if any.
    pub fn show(&mut self, ctx: &Context) -> Option<DetailAction> {
        if !self.open {
            return None;
        }

        let mut action = None;
        ctx.show_viewport_immediate(
            self.viewport_id,
            egui::ViewportBuilder::default()
                .with_title(format!("Change – {}", self.monitor_name))
                .with_inner_size(DETAIL_WINDOW_SIZE)
                .with_resizable(true),
            |ctx, _class| {
                egui::TopBottomPanel::top("detail_tabs").show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.selectable_value(&mut self.tab, DetailTab::TextDiff, "Text diff");
                        ui.selectable_value(&mut self.tab, DetailTab::Screenshots, "Screenshots");
                        ui.selectable_value(&mut self.tab, DetailTab::Downloads, "Downloads");
                    });
                });

                egui::CentralPanel::default().show(ctx, |ui| {
                    ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| match self.tab {
                            DetailTab::TextDiff => self.show_text_diff(ui),
                            DetailTab::Screenshots => self.show_screenshots(ui),
                            DetailTab::Downloads => action = self.show_downloads(ui),
                        });
                });

                if ctx.input(|i| i.viewport().close_requested()) {
                    self.open = false;
                }
            },
        );
        action
    }

    fn show_text_diff(&self, ui: &mut Ui) {
        match &self.loaded {
            Some(loaded) => render_result(ui, &loaded.result),
            None => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading diff…");
                });
            }
        }
    }

    fn show_screenshots(&self, ui: &mut Ui) {
        let shots = self.screenshots();
        if shots.is_empty() {
            ui.label("No screenshots available");
            return;
        }
        let width = ui.available_width();
        for (label, url) in shots {
            ui.horizontal(|ui| {
                ui.strong(label);
                ui.hyperlink_to("Open in browser", url);
            });
            // Loaded over HTTP by the egui_extras loaders installed at startup.
            ui.add(
                egui::Image::from_uri(url.to_owned())
                    .max_width(width)
                    .show_loading_spinner(true),
            );
            ui.add_space(12.0);
        }
    }

    fn show_downloads(&self, ui: &mut Ui) -> Option<DetailAction> {
        let Some(rows) = self.download_rows() else {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading downloads…");
            });
            return None;
        };

        let mut action = None;
        egui::Grid::new("downloads_grid")
            .num_columns(2)
            .spacing([24.0, 10.0])
            .show(ui, |ui| {
                for row in rows {
                    ui.label(row.label);
                    ui.horizontal(|ui| match row.source {
                        DownloadSource::Local(content) => {
                            if ui.button("Download").clicked() {
                                action = Some(DetailAction::SaveFile {
                                    file_name: row.file_name.to_string(),
                                    data: content.as_bytes().to_vec(),
                                });
                            }
                            if ui.button("Save as…").clicked() {
                                action = Some(DetailAction::SaveFileAs {
                                    file_name: row.file_name.to_string(),
                                    data: content.as_bytes().to_vec(),
                                });
                            }
                        }
                        DownloadSource::Remote(url) => {
                            if ui.button("Download").clicked() {
                                action = Some(DetailAction::DownloadAsset {
                                    file_name: row.file_name.to_string(),
                                    url: url.to_string(),
                                });
                            }
                        }
                        DownloadSource::Unavailable => {
                            ui.label("Unavailable");
                        }
                    });
                    ui.end_row();
                }
            });
        action
    }
}

fn local_source(content: &str) -> DownloadSource<'_> {
    if content.is_empty() {
        DownloadSource::Unavailable
    } else {
        DownloadSource::Local(content)
    }
}

fn remote_source(url: &Option<String>) -> DownloadSource<'_> {
    match url.as_deref() {
        Some(url) if !url.is_empty() => DownloadSource::Remote(url),
        _ => DownloadSource::Unavailable,
    }
}
