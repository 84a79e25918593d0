#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! In-memory model of a Mandrill template send and its wire serialization.
//!
//! The [`domain::messaging`] module holds the entity graph (message,
//! recipients, template, attachments) and the transformation into the
//! provider's flat array-of-records wire format. Transport toward the API
//! lives behind the [`domain::messaging::TemplateSender`] seam, with a thin
//! HTTP implementation in [`infrastructure`].

pub mod domain;
pub mod infrastructure;
