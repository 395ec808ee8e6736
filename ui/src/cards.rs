use dioxus::prelude::*;

#[component]
pub fn StatCard(icon: String, title: String, value: String) -> Element {
    rsx! {
        div { class: "stat-card",
            div { class: "stat-card-icon", "{icon}" }
            div {
                p { class: "stat-card-title", "{title}" }
                p { class: "stat-card-value", "{value}" }
            }
        }
    }
}

#[component]
pub fn ChartCard(title: String, children: Element) -> Element {
    rsx! {
        div { class: "card chart-card",
            div { class: "card-header",
                h2 { class: "card-title", "{title}" }
            }
            div { class: "card-body", {children} }
        }
    }
}

/// Round avatar showing the image if there is one, otherwise the initial.
#[component]
pub fn Avatar(name: String, url: Option<String>, #[props(default)] small: bool) -> Element {
    let initial = name
        .chars()
        .next()
        .unwrap_or('?')
        .to_uppercase()
        .to_string();

    rsx! {
        div { class: if small { "avatar avatar-sm" } else { "avatar" },
            if let Some(url) = &url {
                img { src: "{url}", alt: "{name}" }
            } else {
                "{initial}"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    #[default]
    Default,
    Secondary,
    Outline,
    Destructive,
}

impl BadgeVariant {
    fn class(self) -> &'static str {
        match self {
            Self::Default => "badge",
            Self::Secondary => "badge badge-secondary",
            Self::Outline => "badge badge-outline",
            Self::Destructive => "badge badge-destructive",
        }
    }
}

#[component]
pub fn Badge(#[props(default)] variant: BadgeVariant, children: Element) -> Element {
    rsx! {
        span { class: variant.class(), {children} }
    }
}
