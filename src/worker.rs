use crate::api::Client;
use crate::diff_loader::load_change_diff;
use crate::downloads::{save_as, save_to_downloads};
use crate::messages::{Request, Response};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use tracing::{error, info};

type Notify = Arc<dyn Fn() + Send + Sync>;

/// Serves [`Request`]s against the backend off the UI thread.
///
/// Monitor CRUD runs in order on the worker thread. Diff loads and asset
/// downloads get a thread each so a large page never holds up the list.
pub struct Worker {
    client: Client,
    receiver: Receiver<Request>,
    response_sender: Sender<Response>,
    notify: Notify,
}

impl Worker {
    pub fn new(
        client: Client,
        receiver: Receiver<Request>,
        response_sender: Sender<Response>,
        notify: Notify,
    ) -> Self {
        Self {
            client,
            receiver,
            response_sender,
            notify,
        }
    }

    /// Serve requests until every sender is dropped.
    pub fn run(&self) {
        while let Ok(request) = self.receiver.recv() {
            match request {
                Request::LoadMonitors => {
                    let result = self.client.list_monitors().map_err(|e| e.to_string());
                    self.send(Response::MonitorsLoaded(result));
                }
                Request::CreateMonitor(req) => {
                    let result = self.client.create_monitor(&req).map_err(|e| e.to_string());
                    self.send(Response::MonitorCreated(result));
                }
                Request::UpdateMonitor { id, request } => {
                    let result = self
                        .client
                        .update_monitor(id, &request)
                        .map_err(|e| e.to_string());
                    self.send(Response::MonitorUpdated(result));
                }
                Request::DeleteMonitor(id) => {
                    let result = self
                        .client
                        .delete_monitor(id)
                        .map(|_| id)
                        .map_err(|e| e.to_string());
                    self.send(Response::MonitorDeleted(result));
                }
                Request::LoadChanges(monitor_id) => {
                    let result = self
                        .client
                        .list_changes(monitor_id)
                        .map_err(|e| e.to_string());
                    self.send(Response::ChangesLoaded { monitor_id, result });
                }
                Request::LoadDiff(change) => {
                    let client = self.client.clone();
                    self.spawn(move || {
                        let loaded = load_change_diff(&client, &change);
                        Response::DiffLoaded {
                            change_id: change.id,
                            loaded,
                        }
                    });
                }
                Request::SaveFile { file_name, data } => {
                    let result = save_to_downloads(&file_name, &data).map_err(|e| e.to_string());
                    self.send(Response::Saved(result));
                }
                Request::SaveFileAs { file_name, data } => {
                    // The dialog blocks until the user picks a path.
                    let notify = Arc::clone(&self.notify);
                    let sender = self.response_sender.clone();
                    thread::spawn(move || {
                        let result = match save_as(&file_name, &data) {
                            Ok(Some(path)) => Ok(path),
                            Ok(None) => {
                                info!("Save of {} cancelled", file_name);
                                return;
                            }
                            Err(e) => Err(e.to_string()),
                        };
                        send_and_notify(&sender, &notify, Response::Saved(result));
                    });
                }
                Request::DownloadAsset { file_name, url } => {
                    let client = self.client.clone();
                    self.spawn(move || {
                        let result = client
                            .fetch_bytes(&url)
                            .map_err(|e| format!("failed to download asset: {e}"))
                            .and_then(|data| {
                                save_to_downloads(&file_name, &data).map_err(|e| e.to_string())
                            });
                        Response::Saved(result)
                    });
                }
            }
        }
        info!("Worker channel closed, stopping");
    }

    fn send(&self, response: Response) {
        send_and_notify(&self.response_sender, &self.notify, response);
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() -> Response + Send + 'static,
    {
        let sender = self.response_sender.clone();
        let notify = Arc::clone(&self.notify);
        thread::spawn(move || send_and_notify(&sender, &notify, job()));
    }
}

fn send_and_notify(sender: &Sender<Response>, notify: &Notify, response: Response) {
    if let Err(e) = sender.send(response) {
        error!("Failed to send response: {}", e);
        return;
    }
    notify();
}

/// Start the worker; `notify` runs after every response (e.g. to request a repaint).
pub fn spawn_worker<N>(client: Client, notify: N) -> (Sender<Request>, Receiver<Response>)
where
    N: Fn() + Send + Sync + 'static,
{
    let (sender, receiver) = mpsc::channel();
    let (response_sender, response_receiver) = mpsc::channel();
    let notify: Notify = Arc::new(notify);
    thread::spawn(move || {
        let worker = Worker::new(client, receiver, response_sender, notify);
        worker.run();
    });
    (sender, response_receiver)
}
