//! Home page: the public feed with its filter and sort controls.

use chrono::{Datelike, Utc};
use maud::{html, Markup, Render};
use urlencoding::encode;

use crate::components::{BaseLayout, EmptyState, Form, HiddenInput, PostGrid};
use crate::db::{ContentType, Post, User};
use crate::feed::{FilterState, SortMode};

/// Rotating quotes for the "Quote of the Day" box.
const QUOTES: &[&str] = &[
    "कर्म करो, फल की चिंता मत करो।",
    "मन के हारे हार है, मन के जीते जीत।",
    "The best way to find yourself is to lose yourself in the service of others.",
    "उठो, जागो और तब तक मत रुको जब तक लक्ष्य प्राप्त न हो जाए।",
    "जहाँ चाह वहाँ राह।",
    "Be the change that you wish to see in the world.",
    "सपने वो नहीं जो हम सोते हुए देखते हैं, सपने वो हैं जो हमें सोने नहीं देते।",
    "परिश्रम ही सफलता की कुंजी है।",
    "A little progress each day adds up to big results.",
    "अंधेरे को कोसने से अच्छा है एक दीया जलाया जाए।",
];

/// Day-indexed quote rotation: a rough unique index per calendar day.
#[must_use]
pub fn quote_of_the_day() -> &'static str {
    let today = Utc::now().date_naive();
    let day_index = (today.day0() + today.month0() * 31) as usize;
    QUOTES[day_index % QUOTES.len()]
}

/// Build a feed URL carrying the given filter selection, omitting
/// defaulted dimensions.
fn feed_url(host: Option<&str>, content_type: Option<ContentType>, sort: SortMode) -> String {
    let mut params = Vec::new();
    if let Some(host) = host {
        params.push(format!("host={}", encode(host)));
    }
    if let Some(content_type) = content_type {
        params.push(format!("type={}", content_type.as_str()));
    }
    if sort != SortMode::Latest {
        params.push(format!("sort={}", sort.as_str()));
    }

    if params.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", params.join("&"))
    }
}

/// Content type filter buttons, preserving the other two dimensions.
#[derive(Debug, Clone)]
pub struct ContentTypeFilterNav<'a> {
    state: &'a FilterState,
}

impl<'a> ContentTypeFilterNav<'a> {
    #[must_use]
    pub const fn new(state: &'a FilterState) -> Self {
        Self { state }
    }
}

/// Available content types for filtering.
const CONTENT_TYPES: &[(&str, Option<ContentType>)] = &[
    ("All", None),
    ("विचार", Some(ContentType::Text)),
    ("छवि", Some(ContentType::Image)),
    ("वीडियो", Some(ContentType::Video)),
];

impl Render for ContentTypeFilterNav<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="filter-section" {
                h3 { "Content Type" }
                div class="filter-buttons" {
                    @for (label, type_value) in CONTENT_TYPES {
                        @let is_active = self.state.content_type_filter() == *type_value;
                        @let class = if is_active { "filter-btn active" } else { "filter-btn" };
                        @let url = feed_url(self.state.host_filter(), *type_value, self.state.sort_mode());
                        a href=(url) class=(class) { (label) }
                    }
                }
            }
        }
    }
}

/// Sort mode links, preserving the other two dimensions.
#[derive(Debug, Clone)]
pub struct SortNav<'a> {
    state: &'a FilterState,
}

impl<'a> SortNav<'a> {
    #[must_use]
    pub const fn new(state: &'a FilterState) -> Self {
        Self { state }
    }
}

const SORT_MODES: &[(&str, SortMode)] = &[
    ("Latest", SortMode::Latest),
    ("Popular", SortMode::Popular),
    ("Trending", SortMode::Trending),
];

impl Render for SortNav<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="filter-section" {
                h3 { "Sort" }
                div class="filter-buttons" {
                    @for (label, mode) in SORT_MODES {
                        @let is_active = self.state.sort_mode() == *mode;
                        @let class = if is_active { "filter-btn active" } else { "filter-btn" };
                        @let url = feed_url(self.state.host_filter(), self.state.content_type_filter(), *mode);
                        a href=(url) class=(class) { (label) }
                    }
                }
            }
        }
    }
}

/// Host filter dropdown populated from the loaded posts, preserving the
/// other two dimensions via hidden inputs.
#[derive(Debug, Clone)]
pub struct HostFilterSelect<'a> {
    state: &'a FilterState,
    hosts: &'a [String],
}

impl<'a> HostFilterSelect<'a> {
    #[must_use]
    pub const fn new(state: &'a FilterState, hosts: &'a [String]) -> Self {
        Self { state, hosts }
    }
}

impl Render for HostFilterSelect<'_> {
    fn render(&self) -> Markup {
        let active = self.state.host_filter();
        let content = html! {
            @if let Some(content_type) = self.state.content_type_filter() {
                (HiddenInput::new("type", content_type.as_str()))
            }
            @if self.state.sort_mode() != SortMode::Latest {
                (HiddenInput::new("sort", self.state.sort_mode().as_str()))
            }
            select name="host" onchange="this.form.submit()" {
                option value="" selected[active.is_none()] { "All Hosts" }
                @for host in self.hosts {
                    option value=(host) selected[active == Some(host.as_str())] { (host) }
                }
            }
        };

        html! {
            div class="filter-section" {
                h3 { "Host" }
                (Form::get("/", content).class("host-filter-form"))
            }
        }
    }
}

/// Parameters for the home page.
#[derive(Debug)]
pub struct HomePageParams<'a> {
    pub user: Option<&'a User>,
    pub is_admin: bool,
    pub posts: &'a [Post],
    pub hosts: &'a [String],
    pub state: &'a FilterState,
}

/// Render the home page: hero, quote of the day, filters, and the feed.
#[must_use]
pub fn render_home_page(params: &HomePageParams<'_>) -> Markup {
    let content = html! {
        section class="hero" {
            h2 { "अपने दिन को प्रेरणा से भरें" }
            p {
                "हर सुबह एक नई सोच, हर शब्द एक नई दिशा। प्रेरणा के साथ पाएं हिंदी में "
                "जीवन को छूने वाले विचार, भावनाओं को रंगने वाली छवियां, और आत्मा को "
                "झकझोर देने वाले प्रेरक वीडियो।"
            }
        }

        section class="quote-box" {
            h3 { "Quote of the Day" }
            p class="quote" { "“" (quote_of_the_day()) "”" }
        }

        section class="filters" {
            (HostFilterSelect::new(params.state, params.hosts))
            (ContentTypeFilterNav::new(params.state))
            (SortNav::new(params.state))
        }

        section class="feed" {
            @if params.posts.is_empty() {
                (EmptyState::new("No posts found matching your criteria. Try adjusting your filters.")
                    .with_reset("/"))
            } @else {
                (PostGrid::new(params.posts))
            }
        }
    };

    BaseLayout::new("Home", params.user)
        .with_admin(params.is_admin)
        .render(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_url_omits_defaults() {
        assert_eq!(feed_url(None, None, SortMode::Latest), "/");
        assert_eq!(
            feed_url(Some("Anita"), None, SortMode::Latest),
            "/?host=Anita"
        );
        assert_eq!(
            feed_url(Some("अनीता"), Some(ContentType::Video), SortMode::Popular),
            format!("/?host={}&type=video&sort=popular", encode("अनीता"))
        );
    }

    #[test]
    fn test_quote_of_the_day_is_stable() {
        assert_eq!(quote_of_the_day(), quote_of_the_day());
    }
}
