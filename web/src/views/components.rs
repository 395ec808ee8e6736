use dioxus::prelude::*;

/// A labelled text input bound to a signal, with an optional error beneath.
#[component]
pub fn FormField(
    id: String,
    label: String,
    value: Signal<String>,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] name: Option<String>,
    #[props(default)] placeholder: String,
    #[props(default)] error: Option<String>,
) -> Element {
    rsx! {
        div { class: "form-group",
            label { class: "form-label", r#for: "{id}", "{label}" }
            input {
                id: "{id}",
                name,
                class: if error.is_some() { "form-input form-input-invalid" } else { "form-input" },
                r#type: "{input_type}",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |e| value.set(e.value()),
            }
            if let Some(error) = &error {
                p { class: "form-error", "{error}" }
            }
        }
    }
}

/// "Showing x of y" line under a filtered table.
#[component]
pub fn ResultSummary(shown: usize, total: usize, noun: String) -> Element {
    rsx! {
        p { class: "result-summary text-muted", "Showing {shown} of {total} {noun}" }
    }
}
