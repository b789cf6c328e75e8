use crate::api::{CreateMonitorRequest, Monitor, UpdateMonitorRequest};
use crate::constant::DEFAULT_FREQUENCY_SECONDS;
use egui::{Context, Grid, TextEdit};

/// How a form was closed.
pub enum FormOutcome<T> {
    Submit(T),
    Cancel,
}

/// Inputs of the "Add monitor" dialog, kept as typed text until submit.
pub struct AddMonitorForm {
    pub name: String,
    pub url: String,
    pub css_selector: String,
    pub frequency: String,
    pub render_js: bool,
    pub notify_email: bool,
    pub email_address: String,
    error: Option<String>,
}

impl Default for AddMonitorForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            url: String::new(),
            css_selector: String::new(),
            frequency: DEFAULT_FREQUENCY_SECONDS.to_string(),
            render_js: false,
            notify_email: true,
            email_address: String::new(),
            error: None,
        }
    }
}

impl AddMonitorForm {
    /// Validate the inputs. Name falls back to the URL and a bad frequency
    /// to the default; URL and, when notifying, an address are required.
    pub fn to_request(&self) -> Result<CreateMonitorRequest, String> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err("URL is required".to_string());
        }

        let name = match self.name.trim() {
            "" => url,
            name => name,
        };

        let frequency_seconds = self
            .frequency
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|f| *f > 0)
            .unwrap_or(DEFAULT_FREQUENCY_SECONDS);

        let css_selector = Some(self.css_selector.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let email_address = self.email_address.trim();
        if self.notify_email && email_address.is_empty() {
            return Err("Please enter an email address for notifications".to_string());
        }

        Ok(CreateMonitorRequest {
            name: name.to_string(),
            url: url.to_string(),
            css_selector,
            render_js: self.render_js,
            frequency_seconds,
            notify_email: self.notify_email,
            notify_email_address: email_address.to_string(),
        })
    }

    /// Draw the dialog. Validation errors stay inside the form.
    ///
    /// # Returns
    /// `Some` once the user creates or cancels.
    pub fn show(&mut self, ctx: &Context) -> Option<FormOutcome<CreateMonitorRequest>> {
        let mut outcome = None;
        egui::Window::new("Add monitor")
            .collapsible(false)
            .resizable(false)
            .default_width(450.0)
            .show(ctx, |ui| {
                Grid::new("add_monitor_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Name");
                        ui.text_edit_singleline(&mut self.name);
                        ui.end_row();

                        ui.label("URL");
                        ui.text_edit_singleline(&mut self.url);
                        ui.end_row();

                        ui.label("CSS selector");
                        ui.text_edit_singleline(&mut self.css_selector);
                        ui.end_row();

                        ui.label("Frequency (seconds)");
                        ui.text_edit_singleline(&mut self.frequency);
                        ui.end_row();

                        ui.label("");
                        ui.checkbox(&mut self.render_js, "Render JS (headless browser)");
                        ui.end_row();

                        ui.label("");
                        ui.checkbox(&mut self.notify_email, "Notify by email");
                        ui.end_row();

                        ui.label("Notification email");
                        ui.add(
                            TextEdit::singleline(&mut self.email_address)
                                .hint_text("your@email.com"),
                        );
                        ui.end_row();
                    });

                show_error(ui, &self.error);

                ui.horizontal(|ui| {
                    if ui.button("Create").clicked() {
                        match self.to_request() {
                            Ok(req) => outcome = Some(FormOutcome::Submit(req)),
                            Err(e) => self.error = Some(e),
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = Some(FormOutcome::Cancel);
                    }
                });
            });
        outcome
    }
}

/// Frequency and active flag of an existing monitor.
pub struct EditMonitorForm {
    pub monitor_id: u64,
    pub title: String,
    pub frequency: String,
    pub active: bool,
    error: Option<String>,
}

impl EditMonitorForm {
    /// Prefill from the monitor's current settings.
    pub fn new(monitor: &Monitor) -> Self {
        Self {
            monitor_id: monitor.id,
            title: format!("Monitor details – {}", monitor.name),
            frequency: monitor.frequency_seconds.to_string(),
            active: monitor.active,
            error: None,
        }
    }

    /// Frequency must be a positive whole number of seconds.
    pub fn to_request(&self) -> Result<UpdateMonitorRequest, String> {
        match self.frequency.trim().parse::<i64>() {
            Ok(frequency_seconds) if frequency_seconds > 0 => Ok(UpdateMonitorRequest {
                frequency_seconds,
                active: self.active,
            }),
            _ => Err("Please enter a valid positive frequency (seconds)".to_string()),
        }
    }

    pub fn show(&mut self, ctx: &Context) -> Option<FormOutcome<UpdateMonitorRequest>> {
        let mut outcome = None;
        egui::Window::new(self.title.clone())
            .id(egui::Id::new(("edit_monitor", self.monitor_id)))
            .collapsible(false)
            .resizable(false)
            .default_width(350.0)
            .show(ctx, |ui| {
                Grid::new("edit_monitor_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Frequency (seconds)");
                        ui.text_edit_singleline(&mut self.frequency);
                        ui.end_row();

                        ui.label("");
                        ui.checkbox(&mut self.active, "Monitor is active");
                        ui.end_row();
                    });

                show_error(ui, &self.error);

                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        match self.to_request() {
                            Ok(req) => outcome = Some(FormOutcome::Submit(req)),
                            Err(e) => self.error = Some(e),
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = Some(FormOutcome::Cancel);
                    }
                });
            });
        outcome
    }
}

fn show_error(ui: &mut egui::Ui, error: &Option<String>) {
    if let Some(error) = error {
        ui.colored_label(ui.visuals().error_fg_color, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn filled() -> AddMonitorForm {
        AddMonitorForm {
            url: " https://example.com ".into(),
            email_address: "me@example.com".into(),
            ..AddMonitorForm::default()
        }
    }

    #[test]
    fn url_is_required() {
        let form = AddMonitorForm::default();
        assert_eq!(form.to_request().unwrap_err(), "URL is required");
    }

    #[test]
    fn name_defaults_to_url_and_blank_selector_is_dropped() {
        let req = filled().to_request().unwrap();
        assert_eq!(req.name, "https://example.com");
        assert_eq!(req.url, "https://example.com");
        assert!(req.css_selector.is_none());
        assert_eq!(req.frequency_seconds, 300);
    }

    #[test]
    fn bad_frequency_falls_back_to_default() {
        for bad in ["abc", "0", "-5", ""] {
            let form = AddMonitorForm {
                frequency: bad.into(),
                ..filled()
            };
            assert_eq!(form.to_request().unwrap().frequency_seconds, 300);
        }
        let form = AddMonitorForm {
            frequency: "60".into(),
            css_selector: "#price".into(),
            ..filled()
        };
        let req = form.to_request().unwrap();
        assert_eq!(req.frequency_seconds, 60);
        assert_eq!(req.css_selector.as_deref(), Some("#price"));
    }

    #[test]
    fn email_required_only_when_notifying() {
        let form = AddMonitorForm {
            email_address: "  ".into(),
            ..filled()
        };
        assert!(form.to_request().is_err());

        let form = AddMonitorForm {
            notify_email: false,
            email_address: String::new(),
            ..filled()
        };
        assert!(!form.to_request().unwrap().notify_email);
    }

    #[test]
    fn edit_form_validates_frequency() {
        let monitor = Monitor {
            id: 3,
            name: "Docs".into(),
            url: "https://docs.example.com".into(),
            css_selector: None,
            frequency_seconds: 900,
            notify_email: false,
            notify_email_address: None,
            active: true,
            last_status: None,
            updated_at: Utc::now(),
            created_at: Utc::now(),
        };
        let mut form = EditMonitorForm::new(&monitor);
        assert_eq!(form.frequency, "900");
        form.active = false;
        assert_eq!(
            form.to_request().unwrap(),
            UpdateMonitorRequest {
                frequency_seconds: 900,
                active: false
            }
        );
        form.frequency = "0".into();
        assert!(form.to_request().is_err());
    }
}
