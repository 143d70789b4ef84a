//! Login and registration page.

use maud::{html, Markup, Render};

use crate::components::{Alert, BaseLayout, Form, FormGroup, HiddenInput, Input};

/// Render the login page.
///
/// Accounts exist only to gate the admin console; whether a signed-in
/// account actually gets admin capability is decided by the configured
/// allow-list, not here.
#[must_use]
pub fn render_login_page(error: Option<&str>) -> Markup {
    let login_form = html! {
        (HiddenInput::new("action", "login"))
        (FormGroup::new("Email", "email",
            Input::email("email").id("email").required().render()))
        (FormGroup::new("Password", "password",
            Input::password("password").id("password").required().render()))
        div class="form-group" {
            label {
                input type="checkbox" name="remember" value="true";
                " Remember me for 30 days"
            }
        }
        button type="submit" { "Login" }
    };

    let register_form = html! {
        (HiddenInput::new("action", "register"))
        (FormGroup::new("Email", "register-email",
            Input::email("email").id("register-email").required().render()))
        (FormGroup::new("Display name", "register-display-name",
            Input::text("display_name").id("register-display-name").required().render()))
        (FormGroup::new("Password (10+ characters)", "register-password",
            Input::password("password").id("register-password").required().render()))
        button type="submit" class="outline" { "Register" }
    };

    let content = html! {
        div class="auth-container" {
            h1 { "Login" }

            @if let Some(error) = error {
                (Alert::error(error))
            }

            (Form::post("/login", login_form))

            div class="register-section" {
                p { "Don't have an account?" }
                (Form::post("/login", register_form))
            }
        }
    };

    BaseLayout::new("Login", None).render(content)
}
