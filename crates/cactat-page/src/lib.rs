//! Collaborators around the CAC TAT contact form.
//!
//! The form's state machine lives in `cactat-core`. This crate holds the
//! contracts the surrounding page must satisfy and nothing the form depends
//! on:
//!
//! - [`page`]: document title, `#title`/`#subtitle` text nodes, the hidden
//!   `#cat` element, and the privacy-policy link.
//! - [`anchor`]: attribute-carrying links and what activating them does.
//! - [`privacy`]: the documents a link can navigate to.
//! - [`availability`]: the remote "is the page up" check.
//!
//! # Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `live-http` | [`availability::ReqwestFetcher`], a blocking HTTP client |

#![forbid(unsafe_code)]

pub mod anchor;
pub mod availability;
pub mod error;
pub mod page;
pub mod privacy;

pub use anchor::{Anchor, Navigation};
#[cfg(feature = "live-http")]
pub use availability::ReqwestFetcher;
pub use availability::{
    AvailabilityConfig, AvailabilityContract, AvailabilityError, HttpFetch, HttpResponse, probe,
};
pub use error::{PageError, PageResult};
pub use page::{ElementId, PAGE_TITLE, Page};
pub use privacy::{Document, PRIVACY_HEADING, PRIVACY_HREF, PrivacyPage};
