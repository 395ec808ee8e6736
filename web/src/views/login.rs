use dioxus::prelude::*;
use types::auth::{Field, LoginError, LoginForm};

use super::components::FormField;
use crate::Route;

/// Notice code set after a successful registration.
pub const REGISTERED: &str = "registered";

fn notice_message(code: &str) -> Option<&'static str> {
    match code {
        REGISTERED => Some("Account created. Sign in with your new credentials."),
        _ => None,
    }
}

#[component]
pub fn Login(error: Option<String>, notice: Option<String>) -> Element {
    let email = use_signal(String::new);
    let password = use_signal(String::new);

    let errors = use_memo(move || {
        LoginForm {
            email: email(),
            password: password(),
        }
        .validate()
        .err()
        .unwrap_or_default()
    });
    // Only complain about a field once something has been typed into it.
    let field_error = move |field: Field, value: Signal<String>| {
        (!value.read().is_empty())
            .then(|| errors.read().get(field).map(String::from))
            .flatten()
    };

    let login_error = error.as_deref().map(|code| {
        LoginError::from_code(code)
            .map(LoginError::message)
            .unwrap_or("Login failed. Please try again.")
    });
    let notice = notice.as_deref().and_then(notice_message);

    rsx! {
        div { class: "login-page",
            div { class: "login-card",
                div { class: "login-header",
                    h1 { class: "login-title", "Welcome back" }
                    p { class: "login-subtitle", "Enter your email below to sign in" }
                }
                if let Some(message) = login_error {
                    div { class: "alert alert-error", "{message}" }
                }
                if let Some(message) = notice {
                    div { class: "alert alert-success", "{message}" }
                }
                form {
                    action: "/auth/login",
                    method: "post",
                    FormField {
                        id: "email",
                        name: "email".to_string(),
                        label: "Email",
                        input_type: "email",
                        placeholder: "john@example.com",
                        value: email,
                        error: field_error(Field::Email, email),
                    }
                    FormField {
                        id: "password",
                        name: "password".to_string(),
                        label: "Password",
                        input_type: "password",
                        placeholder: "********",
                        value: password,
                        error: field_error(Field::Password, password),
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary login-btn",
                        disabled: !errors.read().is_empty(),
                        "Login"
                    }
                }
                p { class: "login-footer text-muted",
                    "Don't have an account? "
                    Link { to: Route::Register {}, "Register" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_notice_is_ignored() {
        assert!(notice_message(REGISTERED).is_some());
        assert_eq!(notice_message("something-else"), None);
    }
}
