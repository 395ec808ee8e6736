use dioxus::prelude::*;
use types::{Categorical, Choice};

/// A labelled single-select over a closed set of options, with "ALL" first.
#[component]
pub fn FilterDropdown<T: Categorical>(
    id: String,
    label: String,
    selected: Choice<T>,
    on_change: EventHandler<Choice<T>>,
) -> Element {
    rsx! {
        div { class: "filter-dropdown",
            label { class: "filter-label", r#for: "{id}",
                "{label}: "
                span { class: "filter-selected", "{selected}" }
            }
            select {
                id: "{id}",
                class: "form-input",
                value: "{selected.label()}",
                onchange: move |e| {
                    if let Some(choice) = Choice::<T>::parse(&e.value()) {
                        on_change.call(choice);
                    }
                },
                for choice in Choice::<T>::options() {
                    option {
                        key: "{choice.label()}",
                        value: "{choice.label()}",
                        selected: choice == selected,
                        "{choice.label()}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn SearchInput(
    value: String,
    placeholder: String,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "search-input",
            span { class: "search-icon", "⌕" }
            input {
                class: "form-input",
                r#type: "search",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |e| on_input.call(e.value()),
            }
        }
    }
}

/// A `type="date"` input reporting its raw `YYYY-MM-DD` value.
#[component]
pub fn DateInput(id: String, value: String, on_input: EventHandler<String>) -> Element {
    rsx! {
        input {
            id: "{id}",
            class: "form-input date-input",
            r#type: "date",
            value: "{value}",
            oninput: move |e| on_input.call(e.value()),
        }
    }
}
