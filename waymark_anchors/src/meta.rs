// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document metadata values applied to title/meta tags by a host sink.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Document metadata for a page or an anchor: title, description, and any
/// additional `(name, content)` meta pairs in application order.
///
/// The core never writes these to a document itself; they travel through the
/// registry's inheritance resolution and out to a host-side metadata sink.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetaTags {
    /// Document title.
    pub title: Option<String>,
    /// `description` meta content.
    pub description: Option<String>,
    /// Additional `(name, content)` meta pairs, in order.
    pub extra: Vec<(String, String)>,
}

impl MetaTags {
    /// Creates an empty metadata value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates metadata carrying only a title.
    #[must_use]
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// Sets the description, consuming and returning `self`.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Appends an extra `(name, content)` pair, consuming and returning `self`.
    #[must_use]
    pub fn with_extra(mut self, name: &str, content: &str) -> Self {
        self.extra.push((name.to_string(), content.to_string()));
        self
    }

    /// Returns `true` if no field carries any content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(MetaTags::default().is_empty());
        assert_eq!(MetaTags::new(), MetaTags::default());
    }

    #[test]
    fn titled_sets_only_title() {
        let meta = MetaTags::titled("Pricing");
        assert_eq!(meta.title.as_deref(), Some("Pricing"));
        assert!(meta.description.is_none());
        assert!(meta.extra.is_empty());
        assert!(!meta.is_empty());
    }

    #[test]
    fn builder_accumulates_fields() {
        let meta = MetaTags::titled("Docs")
            .with_description("All the docs")
            .with_extra("og:type", "article")
            .with_extra("og:locale", "en_US");

        assert_eq!(meta.description.as_deref(), Some("All the docs"));
        assert_eq!(meta.extra.len(), 2);
        assert_eq!(meta.extra[0].0, "og:type");
    }
}
