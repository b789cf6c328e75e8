use crate::api::{ApiError, ChangeEvent, Client};
use crate::diff::{self, DiffResult, Segment};
use tracing::{info, warn};

/// Everything the change-detail window needs once the snapshots are in.
#[derive(Debug, Clone)]
pub struct LoadedDiff {
    pub result: DiffResult,
    pub prev_html: String,
    pub curr_html: String,
}

/// Fetch both snapshots of `change` and compute what the text-diff tab shows.
///
/// Blocks on the network; call it off the UI thread.
pub fn load_change_diff(client: &Client, change: &ChangeEvent) -> LoadedDiff {
    let prev = client.fetch_text(change.html_prev.as_deref());
    let curr = client.fetch_text(change.html_curr.as_deref());
    resolve(change, prev, curr, |url| client.fetch_server_diff(url))
}

fn resolve<F>(
    change: &ChangeEvent,
    prev: Result<String, ApiError>,
    curr: Result<String, ApiError>,
    server_diff: F,
) -> LoadedDiff
where
    F: FnOnce(&str) -> Result<Vec<Segment>, ApiError>,
{
    let (prev_html, curr_html) = match (prev, curr) {
        (Ok(prev), Ok(curr)) => (prev, curr),
        (prev, curr) => {
            let mut msg = String::from("Failed to load HTML diff.");
            if let Err(e) = &prev {
                msg.push_str(&format!("\nPrev: {e}"));
            }
            if let Err(e) = &curr {
                msg.push_str(&format!("\nCurr: {e}"));
            }
            warn!(change = change.id, "{}", msg);
            return LoadedDiff {
                result: DiffResult::Unavailable(msg),
                prev_html: String::new(),
                curr_html: String::new(),
            };
        }
    };

    let result = if let Some((prev_status, curr_status)) = change.status_change() {
        DiffResult::status_change(prev_status, curr_status)
    } else if let Some(url) = server_diff_url(change, &prev_html, &curr_html) {
        info!(change = change.id, "no snapshots, using server diff");
        match server_diff(url) {
            Ok(segments) => DiffResult::TextDiff(segments),
            Err(e) => DiffResult::Unavailable(format!("Failed to load HTML diff: {e}")),
        }
    } else {
        DiffResult::TextDiff(diff::build(Some(&prev_html), Some(&curr_html)))
    };

    LoadedDiff {
        result,
        prev_html,
        curr_html,
    }
}

fn server_diff_url<'a>(change: &'a ChangeEvent, prev: &str, curr: &str) -> Option<&'a str> {
    if !prev.is_empty() || !curr.is_empty() {
        return None;
    }
    change.html_diff.as_deref().filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffStyle;
    use chrono::Utc;

    fn change() -> ChangeEvent {
        ChangeEvent {
            id: 1,
            monitor_id: 2,
            run_id: 3,
            http_status_prev: None,
            http_status_curr: None,
            html_prev: Some("https://cdn/prev.html".into()),
            html_curr: Some("https://cdn/curr.html".into()),
            html_diff: None,
            screenshot_curr: None,
            screenshot_prev: None,
            screenshot_diff: None,
            created_at: Utc::now(),
        }
    }

    fn status_err(status: u16) -> ApiError {
        ApiError::Status {
            status,
            body: String::new(),
        }
    }

    fn no_server_diff(_: &str) -> Result<Vec<Segment>, ApiError> {
        panic!("server diff must not be fetched")
    }

    #[test]
    fn text_diff_from_snapshots() {
        let loaded = resolve(
            &change(),
            Ok("price 10".into()),
            Ok("price 12".into()),
            no_server_diff,
        );
        let DiffResult::TextDiff(segments) = &loaded.result else {
            panic!("expected text diff, got {:?}", loaded.result);
        };
        assert!(segments.iter().any(|s| s.style == DiffStyle::Inserted && s.text == "12"));
        assert_eq!(loaded.prev_html, "price 10");
    }

    #[test]
    fn fetch_failure_names_failing_sides() {
        let loaded = resolve(&change(), Err(status_err(404)), Ok("x".into()), no_server_diff);
        assert_eq!(
            loaded.result,
            DiffResult::Unavailable("Failed to load HTML diff.\nPrev: http 404: ".into())
        );
        assert!(loaded.curr_html.is_empty());

        let loaded = resolve(
            &change(),
            Err(status_err(500)),
            Err(status_err(502)),
            no_server_diff,
        );
        let DiffResult::Unavailable(msg) = loaded.result else {
            panic!("expected failure");
        };
        assert!(msg.contains("Prev: http 500") && msg.contains("Curr: http 502"));
    }

    #[test]
    fn status_flip_overrides_text_diff() {
        let mut c = change();
        c.http_status_prev = Some(200);
        c.http_status_curr = Some(404);
        let loaded = resolve(&c, Ok("a".into()), Ok("b".into()), no_server_diff);
        assert_eq!(loaded.result, DiffResult::status_change(200, 404));
        assert_eq!(loaded.curr_html, "b");
    }

    #[test]
    fn server_diff_used_without_snapshots() {
        let mut c = change();
        c.html_prev = None;
        c.html_curr = None;
        c.html_diff = Some("https://cdn/diff.json".into());
        let loaded = resolve(&c, Ok(String::new()), Ok(String::new()), |url| {
            assert_eq!(url, "https://cdn/diff.json");
            Ok(vec![Segment::new("new", DiffStyle::Inserted)])
        });
        assert_eq!(
            loaded.result,
            DiffResult::TextDiff(vec![Segment::new("new", DiffStyle::Inserted)])
        );
    }

    #[test]
    fn no_snapshots_and_no_server_diff_is_empty() {
        let loaded = resolve(&change(), Ok(String::new()), Ok(String::new()), no_server_diff);
        assert_eq!(loaded.result, DiffResult::TextDiff(Vec::new()));
        assert!(loaded.result.is_empty());
    }
}
