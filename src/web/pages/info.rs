//! Static informational pages.

use maud::{html, Markup};

use crate::components::BaseLayout;
use crate::db::User;

/// Render the About page.
#[must_use]
pub fn render_about_page(user: Option<&User>, is_admin: bool) -> Markup {
    let content = html! {
        section class="info-page" {
            h1 { "हमारे बारे में" }
            p {
                "प्रेरणा एक द्विभाषी मंच है जहाँ हर दिन नए प्रेरणादायक विचार, "
                "छवियां और वीडियो साझा किए जाते हैं।"
            }
            p {
                "Prerna is a bilingual Hindi/English platform sharing daily "
                "motivational thoughts, images, and videos. Every morning a new "
                "idea, every word a new direction."
            }
        }
    };

    BaseLayout::new("About", user).with_admin(is_admin).render(content)
}

/// Render the Contact page.
#[must_use]
pub fn render_contact_page(user: Option<&User>, is_admin: bool) -> Markup {
    let content = html! {
        section class="info-page" {
            h1 { "संपर्क करें" }
            p { "सुझाव, शिकायत या सहयोग के लिए हमें लिखें:" }
            p {
                a href="mailto:namaste@prerna.example" { "namaste@prerna.example" }
            }
            p {
                "For suggestions, feedback, or collaboration, drop us a line — "
                "we read everything."
            }
        }
    };

    BaseLayout::new("Contact", user).with_admin(is_admin).render(content)
}
