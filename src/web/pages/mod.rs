//! Maud-based page templates for the web UI.
//!
//! Each page module exports render functions that produce the complete
//! HTML for one view.

pub mod admin;
pub mod auth;
pub mod home;
pub mod info;
pub mod post;

pub use admin::{render_admin_dashboard, render_post_form, PostFormParams};
pub use auth::render_login_page;
pub use home::{render_home_page, ContentTypeFilterNav, HomePageParams, HostFilterSelect, SortNav};
pub use info::{render_about_page, render_contact_page};
pub use post::{render_post_detail_page, render_post_not_found, PostDetailParams};

use maud::Markup;

use crate::components::{html, Alert, BaseLayout};
use crate::db::User;

/// Generic error panel for failed queries.
pub fn render_error_page(title: &str, user: Option<&User>, is_admin: bool) -> Markup {
    let content = html! {
        div class="error-panel" {
            h2 { "⚠️ " (title) }
            p { "Please check your connection and try again." }
            (Alert::error("Something went wrong while talking to the content store."))
        }
    };

    BaseLayout::new(title, user).with_admin(is_admin).render(content)
}
