use page_watcher::api::{Client, register_instance};
use page_watcher::app::WatcherApp;
use page_watcher::config::{Config, instance_name};
use page_watcher::constant;
use page_watcher::ui;
use std::error::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Load the config, registering this machine with the backend on first start.
fn connect() -> Result<Client, Box<dyn Error>> {
    let mut config = Config::load()?;
    if !config.settings.has_credentials() {
        let (key, secret) = register_instance(&config.settings.backend_url, &instance_name())?;
        config.settings.set_credentials(key, secret);
        config.save()?;
    }
    let settings = &config.settings;
    let client = Client::new(
        settings.backend_url.as_str(),
        settings.instance_key.as_str(),
        settings.instance_secret.as_str(),
    )?;
    info!("Using backend {}", client.base_url());
    Ok(client)
}

fn main() -> eframe::Result {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .init();

    let client = match connect() {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to connect to backend: {}", e);
            std::process::exit(1);
        }
    };

    let options = ui::viewport::build_viewport();
    eframe::run_native(
        constant::DEFAULT_WINDOW_TITLE,
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_fonts(ui::font::setup_fonts());
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(WatcherApp::new(cc, client)))
        }),
    )
}
