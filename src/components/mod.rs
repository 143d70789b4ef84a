//! Maud HTML components for the web UI.
//!
//! Reusable building blocks for the public feed and admin console:
//!
//! - `layout`: base page layout and navigation
//! - `badge`: content type and engagement count badges
//! - `card`: post cards, grids, and empty states
//! - `form`: form elements and input components
//! - `alert`: alert messages
//! - `media`: image and video embeds

pub mod alert;
pub mod badge;
pub mod card;
pub mod form;
pub mod layout;
pub mod media;

pub use alert::{Alert, AlertVariant};
pub use badge::{Badge, ContentTypeBadge, EngagementBadge};
pub use card::{EmptyState, PostCard, PostGrid};
pub use form::{Form, FormGroup, HiddenInput, Input, Label, Select, SelectOption, TextArea};
pub use layout::BaseLayout;
pub use media::MediaEmbed;

/// Re-export maud for convenience
pub use maud::{html, Markup, PreEscaped, DOCTYPE};
