use dioxus::prelude::*;
use types::{
    Categorical, UserRole,
    auth::{Field, FieldErrors, RegisterForm},
};

use super::components::FormField;
use super::login::REGISTERED;
use crate::Route;

#[component]
pub fn Register() -> Element {
    let name = use_signal(String::new);
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let confirm_password = use_signal(String::new);
    let mut role = use_signal(|| None::<UserRole>);
    let vehicle_type = use_signal(String::new);
    let model = use_signal(String::new);

    let mut errors = use_signal(FieldErrors::default);
    let mut submit_error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let form = move || RegisterForm {
        name: name(),
        email: email(),
        password: password(),
        confirm_password: confirm_password(),
        role: role(),
        vehicle_type: vehicle_type(),
        model: model(),
    };
    let field_error = move |field: Field| errors.read().get(field).map(String::from);

    let on_submit = move |_| {
        let form = form();
        if let Err(e) = form.validate() {
            errors.set(e);
            return;
        }
        errors.set(FieldErrors::default());

        spawn(async move {
            submitting.set(true);
            submit_error.set(None);
            match api::register(form).await {
                Ok(user) => {
                    tracing::info!(user = %user.id, role = %user.role, "account registered");
                    navigator().push(Route::Login {
                        error: None,
                        notice: Some(REGISTERED.to_string()),
                    });
                }
                Err(e) => submit_error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "login-page",
            div { class: "login-card login-card-wide",
                div { class: "login-header",
                    h1 { class: "login-title", "Register your account" }
                    p { class: "login-subtitle", "Enter your details to create an account" }
                }
                if let Some(message) = submit_error() {
                    div { class: "alert alert-error", "{message}" }
                }
                FormField {
                    id: "name",
                    label: "Name",
                    placeholder: "John Doe",
                    value: name,
                    error: field_error(Field::Name),
                }
                FormField {
                    id: "email",
                    label: "Email",
                    input_type: "email",
                    placeholder: "john.doe@company.com",
                    value: email,
                    error: field_error(Field::Email),
                }
                FormField {
                    id: "password",
                    label: "Password",
                    input_type: "password",
                    placeholder: "********",
                    value: password,
                    error: field_error(Field::Password),
                }
                FormField {
                    id: "confirm_password",
                    label: "Confirm Password",
                    input_type: "password",
                    placeholder: "********",
                    value: confirm_password,
                    error: field_error(Field::ConfirmPassword),
                }
                div { class: "form-group",
                    label { class: "form-label", r#for: "role", "Role" }
                    select {
                        id: "role",
                        class: "form-input",
                        onchange: move |e| role.set(UserRole::from_label(&e.value())),
                        option { value: "", selected: role().is_none(), "Select a role" }
                        for candidate in UserRole::VARIANTS.iter().copied() {
                            option {
                                key: "{candidate}",
                                value: "{candidate}",
                                selected: role() == Some(candidate),
                                "{candidate}"
                            }
                        }
                    }
                    if let Some(error) = field_error(Field::Role) {
                        p { class: "form-error", "{error}" }
                    }
                }
                if role() == Some(UserRole::Driver) {
                    div { class: "vehicle-fields",
                        FormField {
                            id: "vehicle_type",
                            label: "Vehicle Type",
                            placeholder: "e.g. Car, Bike",
                            value: vehicle_type,
                            error: field_error(Field::VehicleType),
                        }
                        FormField {
                            id: "model",
                            label: "Model",
                            placeholder: "e.g. Toyota Axio",
                            value: model,
                            error: field_error(Field::Model),
                        }
                    }
                }
                button {
                    class: "btn btn-primary login-btn",
                    disabled: submitting(),
                    onclick: on_submit,
                    if submitting() { "Creating account..." } else { "Submit" }
                }
                p { class: "login-footer text-muted",
                    "Already have an account? "
                    Link { to: Route::login(), "Login" }
                }
            }
        }
    }
}
