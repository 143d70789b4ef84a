//! Base layout components for the web UI.
//!
//! Provides the HTML skeleton, bilingual navigation, and footer shared by
//! every page.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::db::User;

/// Critical theme initialization script that runs in <head> to prevent
/// flash of wrong theme. Must be inline (not external) to execute before
/// body renders.
const THEME_INIT_SCRIPT: &str = r#"(function() {
    var theme = localStorage.getItem('theme');
    if (theme) {
        document.documentElement.setAttribute('data-theme', theme);
    } else if (window.matchMedia('(prefers-color-scheme: dark)').matches) {
        document.documentElement.setAttribute('data-theme', 'dark');
    }
})();"#;

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h1 { "नमस्ते" } };
/// let page = BaseLayout::new("Home", user.as_ref())
///     .with_admin(is_admin)
///     .render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    user: Option<&'a User>,
    is_admin: bool,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title and user.
    ///
    /// The user parameter is required so authentication state is always
    /// explicitly handled. Pass `None` for anonymous visitors.
    #[must_use]
    pub fn new(title: &'a str, user: Option<&'a User>) -> Self {
        Self {
            title,
            user,
            is_admin: false,
        }
    }

    /// Mark the current user as an admin, enabling the console link.
    #[must_use]
    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content is placed inside the `<main class="container">`
    /// element.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="hi" data-theme="light" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    meta name="color-scheme" content="light dark";
                    title { (self.title) " - प्रेरणा" }

                    link rel="stylesheet" href="/static/css/style.css";
                    link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🪔</text></svg>";
                    // Inline critical script to prevent theme flicker
                    script { (PreEscaped(THEME_INIT_SCRIPT)) }
                }
                body {
                    (self.render_header())
                    main class="container" {
                        (content)
                    }
                    (Self::render_footer())
                    script src="/static/js/theme.js" {}
                }
            }
        }
    }

    /// Render the page header with navigation.
    fn render_header(&self) -> Markup {
        html! {
            header class="container" {
                nav {
                    ul {
                        li {
                            a href="/" {
                                strong class="site-logo" { "प्रेरणा" }
                            }
                        }
                    }
                    ul {
                        li { a href="/" { "Home" } }
                        li { a href="/about" { "About" } }
                        li { a href="/contact" { "Contact" } }
                        @if self.is_admin {
                            li { a href="/admin" { "Admin" } }
                        }
                        @if let Some(user) = self.user {
                            li {
                                form action="/logout" method="post" class="inline-form" {
                                    button type="submit" class="link-button" {
                                        "Logout (" (user.display_name) ")"
                                    }
                                }
                            }
                        } @else {
                            li { a href="/login" { "Login" } }
                        }
                        li {
                            button id="theme-toggle" class="theme-toggle outline" title="Toggle dark mode" aria-label="Toggle dark mode" { "🌓" }
                        }
                    }
                }
            }
        }
    }

    /// Render the page footer.
    fn render_footer() -> Markup {
        html! {
            footer class="container" {
                small {
                    "प्रेरणा — हर सुबह एक नई सोच | Daily motivational content delivered with love and positivity"
                }
            }
        }
    }
}
