//! Charts drawn by the Google Charts library.
//!
//! The loader script is injected once per page. Every [`Chart`] waits on the
//! shared [`CHARTS`] latch and draws itself once the library is ready.

use std::sync::LazyLock;

use dioxus::document::eval;
use dioxus::prelude::*;
use types::analytics::ChartSpec;

mod readiness;

pub use readiness::{Load, Readiness};

pub static CHARTS: LazyLock<Readiness> = LazyLock::new(Readiness::new);

/// Loads one component tries before showing the chart as unavailable.
const MAX_LOAD_ATTEMPTS: usize = 3;

const LOADER_URL: &str = "https://www.gstatic.com/charts/loader.js";
const SCRIPT_ID: &str = "google-charts-script";

fn loader_js() -> String {
    format!(
        r#"
        const finish = () => {{
            google.charts.load("current", {{ packages: ["corechart", "geochart", "bar"] }});
            google.charts.setOnLoadCallback(() => dioxus.send(true));
        }};
        if (window.google && window.google.charts) {{
            finish();
        }} else {{
            let script = document.getElementById("{SCRIPT_ID}");
            if (!script) {{
                script = document.createElement("script");
                script.src = "{LOADER_URL}";
                script.id = "{SCRIPT_ID}";
                document.head.appendChild(script);
            }}
            script.addEventListener("load", finish);
            script.addEventListener("error", () => dioxus.send(false));
        }}
        "#
    )
}

async fn load_library() {
    match eval(&loader_js()).recv::<bool>().await {
        Ok(true) => {
            tracing::debug!("chart library ready");
            CHARTS.mark_ready();
        }
        Ok(false) => {
            tracing::warn!("chart library failed to load");
            CHARTS.fail();
        }
        Err(error) => {
            tracing::warn!(?error, "chart loader did not report back");
            CHARTS.fail();
        }
    }
}

/// The chart library's load state, starting the load if nobody has.
///
/// Settles on [`Load::Ready`] or, after repeated failures, [`Load::Failed`].
pub fn use_chart_library() -> Signal<Load> {
    let mut load = use_signal(|| {
        if CHARTS.is_ready() {
            Load::Ready
        } else {
            Load::Loading
        }
    });

    use_future(move || async move {
        for attempt in 1..=MAX_LOAD_ATTEMPTS {
            if CHARTS.begin() {
                // Not tied to this component: the load must finish even if the
                // component that started it unmounts.
                dioxus::core::spawn_forever(load_library());
            }
            if CHARTS.wait().await {
                load.set(Load::Ready);
                return;
            }
            tracing::debug!(attempt, "chart library not available yet");
        }
        load.set(Load::Failed);
    });

    load
}

fn draw_js(element_id: &str, spec: &ChartSpec) -> String {
    let element_id = serde_json::Value::from(element_id);
    format!(
        r#"
        const el = document.getElementById({element_id});
        if (el && window.google && google.visualization) {{
            const data = google.visualization.arrayToDataTable({data});
            new google.visualization.{class}(el).draw(data, {options});
        }}
        "#,
        data = spec.data,
        class = spec.kind.class_name(),
        options = spec.options,
    )
}

#[component]
pub fn Chart(
    id: String,
    spec: ChartSpec,
    #[props(default = "400px".to_string())] height: String,
) -> Element {
    let load = use_chart_library();
    let draw_id = id.clone();
    let draw_spec = spec.clone();

    use_effect(move || {
        if load() == Load::Ready {
            let _ = eval(&draw_js(&draw_id, &draw_spec));
        }
    });

    match load() {
        Load::Ready => {}
        Load::Failed => {
            return rsx! {
                div { class: "chart-placeholder", style: "height: {height}",
                    p { class: "text-muted", "Chart unavailable" }
                }
            };
        }
        Load::Idle | Load::Loading => {
            return rsx! {
                div { class: "chart-placeholder", style: "height: {height}",
                    p { class: "text-muted", "Loading Chart..." }
                }
            };
        }
    }

    rsx! {
        div { id: "{id}", class: "chart", style: "height: {height}" }
    }
}
