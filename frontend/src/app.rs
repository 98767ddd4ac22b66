// frontend/src/app.rs
//
// Routes, global css, and the native Connect screen that probes and persists
// the analytics API base URL. On the web the dashboard opens directly.

#[cfg(not(target_arch = "wasm32"))]
const CONNECTION_TIMEOUT_MS: u64 = 4000;
#[cfg(not(target_arch = "wasm32"))]
const BODY_TRANSFER_TIMEOUT_MS: u64 = 8000;

use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

#[allow(unused_imports)]
use crate::dashboard::UrlConfig;
#[cfg(not(target_arch = "wasm32"))]
use dioxus_router::use_navigator;

// --- global css ---
const GLOBAL_CSS: &str = r#"
html, body {
    margin: 0;
    padding: 0;
    width: 100%;
    height: 100%;
    background: #020617;
}

:root, html {
    color-scheme: dark;
}

#main {
    width: 100%;
    min-height: 100%;
    background: #020617;
}

* { box-sizing: border-box; }

@keyframes paddock-spin {
    from { transform: rotate(0deg); }
    to { transform: rotate(360deg); }
}
"#;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[route("/")]
    Root {},

    #[route("/dashboard")]
    Dashboard {},

    #[cfg(not(target_arch = "wasm32"))]
    #[route("/connect")]
    Connect {},
}

// -------------------------
// Route probing
// -------------------------
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
struct RouteCheck {
    path: &'static str,
    url: String,
    ok: bool,
    status: Option<u16>,
    note: &'static str,
    err: Option<String>,
}

/// The root answers 200; data routes called without parameters answer with a
/// validation error, which still proves they are mounted.
#[cfg(not(target_arch = "wasm32"))]
fn status_ok_for_path(path: &str, status: u16) -> (bool, &'static str) {
    match path {
        "/" => (status == 200, "expected 200"),
        _ => match status {
            200 | 400 | 422 => (true, "reachable (parameters required)"),
            404 => (false, "route not found, check the /api/v1 prefix"),
            _ => (false, "unexpected status"),
        },
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn classify_reqwest_error(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connect failed (refused/unreachable/DNS/TLS)"
    } else if e.is_request() {
        "request build/dispatch error"
    } else if e.is_body() {
        "body read error"
    } else {
        "unknown"
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_probe_client() -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .connect_timeout(std::time::Duration::from_millis(CONNECTION_TIMEOUT_MS))
        .timeout(std::time::Duration::from_millis(BODY_TRANSFER_TIMEOUT_MS))
        .build()
        .map_err(|e| format!("build client failed: {e}"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn probe_routes(base: &str) -> Vec<RouteCheck> {
    use futures_util::future::join_all;
    use paddock_shared::Endpoint;

    let mut probes: Vec<&'static str> = vec!["/"];
    probes.extend(Endpoint::ALL.iter().map(|e| e.path()));

    let client = match build_probe_client() {
        Ok(c) => c,
        Err(e) => {
            return probes
                .iter()
                .map(|path| RouteCheck {
                    path,
                    url: paddock_shared::api::join_url(base, path),
                    ok: false,
                    status: None,
                    note: "client build failed",
                    err: Some(e.clone()),
                })
                .collect();
        }
    };

    let futs = probes.iter().map(|path| {
        let url = paddock_shared::api::join_url(base, path);
        let path = *path;
        let client = &client;

        async move {
            match client.get(&url).send().await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    let (ok, note) = status_ok_for_path(path, status);
                    RouteCheck {
                        path,
                        url,
                        ok,
                        status: Some(status),
                        note,
                        err: None,
                    }
                }
                Err(e) => RouteCheck {
                    path,
                    url,
                    ok: false,
                    status: None,
                    note: classify_reqwest_error(&e),
                    err: Some(e.to_string()),
                },
            }
        }
    });

    join_all(futs).await
}

#[cfg(not(target_arch = "wasm32"))]
fn format_route_report(base: &str, checks: &[RouteCheck]) -> String {
    let mut s = String::new();

    if checks.iter().all(|c| c.ok) {
        s.push_str("ALL ROUTES REACHABLE\n\n");
    }
    s.push_str(&format!("Base: {base}\n\n"));

    for c in checks {
        let mark = if c.ok { "ok  " } else { "FAIL" };
        let status = c
            .status
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".into());
        s.push_str(&format!(
            "{mark} {:24} status {:>3}  {}\n    URL: {}\n",
            c.path, status, c.note, c.url
        ));
        if let Some(e) = &c.err {
            s.push_str(&format!("    ERROR: {e}\n"));
        }
    }
    s
}

/// Rejects anything that is not an absolute http(s) URL with a host.
#[cfg(not(target_arch = "wasm32"))]
fn validate_base_url(raw: &str) -> Result<String, String> {
    let clean = paddock_shared::api::normalize_base_url(raw);
    if clean.is_empty() {
        return Err("Enter a URL first.".to_string());
    }
    let parsed = url::Url::parse(&clean).map_err(|e| format!("Invalid URL: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("URL must start with http:// or https://".to_string());
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err("Missing host in URL".to_string());
    }
    Ok(clean)
}

// -------------------------
// App
// -------------------------
#[component]
pub fn App() -> Element {
    rsx! {
        document::Style { "{GLOBAL_CSS}" }
        document::Title { "Paddock" }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }

        div {
            style: "min-height: 100vh; width: 100%; background: #020617; color: #e5e7eb;",
            Router::<Route> {}
        }
    }
}

#[component]
pub fn Root() -> Element {
    #[cfg(target_arch = "wasm32")]
    {
        return rsx! { Dashboard {} };
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let nav = use_navigator();

        use_effect(move || {
            if UrlConfig::stored_base_url().is_some() {
                let _ = nav.replace(Route::Dashboard {});
            } else {
                let _ = nav.replace(Route::Connect {});
            }
        });

        rsx! { div {} }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[component]
pub fn Connect() -> Element {
    let nav = use_navigator();

    let mut url_edit = use_signal(UrlConfig::base_http);
    let mut test_status = use_signal(String::new);
    let mut testing = use_signal(|| false);

    let button_style = "
        padding:10px 14px;
        border-radius:12px;
        border:1px solid #334155;
        background:#0f172a;
        color:#e5e7eb;
        cursor:pointer;
    ";

    rsx! {
        div {
            style: "height:100vh; display:flex; align-items:center; justify-content:center; background:#020617; color:#e5e7eb; font-family:system-ui;",
            div {
                style: "width:min(900px, 94vw); padding:24px; border:1px solid #334155; border-radius:16px; background:#0b1220; box-shadow:0 12px 30px rgba(0,0,0,0.5);",

                h1 { style: "margin:0 0 12px 0; font-size:20px;", "Paddock" }

                p { style: "margin:0 0 16px 0; color:#94a3b8;",
                    "Enter the analytics API base URL, including the version prefix. Example: ",
                    code { "{paddock_shared::api::DEFAULT_API_BASE}" }
                }

                input {
                    style: "width:100%; padding:12px; border-radius:12px; border:1px solid #334155; background:#020617; color:#e5e7eb; outline:none;",
                    value: "{url_edit()}",
                    oninput: move |evt| {
                        url_edit.set(evt.value());
                        test_status.set(String::new());
                    },
                }

                if !test_status().is_empty() {
                    pre {
                        style: "
                            margin:14px 0 0 0;
                            padding:12px;
                            border-radius:12px;
                            border:1px solid #334155;
                            background:#020617;
                            color:#cbd5e1;
                            font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace;
                            font-size:12px;
                            line-height:1.35;
                            max-height:420px;
                            overflow:auto;
                            white-space:pre;
                        ",
                        "{test_status()}"
                    }
                }

                div { style: "display:flex; gap:12px; margin-top:16px; justify-content:flex-end; flex-wrap:wrap;",
                    button {
                        style: "{button_style}",
                        disabled: testing(),
                        onclick: move |_| {
                            let base = match validate_base_url(&url_edit()) {
                                Ok(b) => b,
                                Err(e) => {
                                    test_status.set(e);
                                    return;
                                }
                            };

                            testing.set(true);
                            test_status.set("Testing connection...".to_string());

                            spawn(async move {
                                let checks = probe_routes(&base).await;
                                log::info!(
                                    "connection probe against {base}: {}/{} routes reachable",
                                    checks.iter().filter(|c| c.ok).count(),
                                    checks.len()
                                );
                                testing.set(false);
                                test_status.set(format_route_report(&base, &checks));
                            });
                        },
                        if testing() { "Testing..." } else { "Test Connection" }
                    }

                    button {
                        style: "{button_style} background:#111827;",
                        onclick: move |_| {
                            match validate_base_url(&url_edit()) {
                                Ok(base) => {
                                    UrlConfig::set_base_url_and_persist(base);
                                    let _ = nav.replace(Route::Dashboard {});
                                }
                                Err(e) => test_status.set(e),
                            }
                        },
                        "Connect"
                    }
                }
            }
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    rsx! { crate::dashboard::PaddockDashboard {} }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn base_url_validation() {
        assert_eq!(
            validate_base_url(" http://localhost:8000/api/v1/ ").unwrap(),
            "http://localhost:8000/api/v1"
        );
        assert!(validate_base_url("").is_err());
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("localhost:8000").is_err());
    }

    #[test]
    fn probe_status_classification() {
        assert!(status_ok_for_path("/", 200).0);
        assert!(!status_ok_for_path("/", 404).0);
        assert!(status_ok_for_path("/telemetry", 422).0);
        assert!(!status_ok_for_path("/telemetry", 404).0);
    }
}
