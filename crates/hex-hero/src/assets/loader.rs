use std::fmt;
use crate::api::types::LoadTicket;

/// Why an image could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub url: String,
    pub reason: String,
}

impl LoadError {
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load image {}: {}", self.url, self.reason)
    }
}

impl std::error::Error for LoadError {}

/// Asynchronous image source.
///
/// `request` starts a load and returns immediately. The host reports the
/// outcome later by passing the same ticket to
/// [`HexHero::complete_load`](crate::api::hero::HexHero::complete_load).
/// Completions may arrive in any order relative to frames and pointer events.
pub trait ImageLoader {
    /// Begin loading `url`. Must not block.
    fn request(&mut self, ticket: LoadTicket, url: &str);

    /// Drop every decoded image and detach every pending callback.
    /// Called when the sprite pool is rebuilt and on teardown.
    fn reset(&mut self) {}
}

/// Loader that records requests and lets the caller resolve them by hand.
/// Used by headless hosts and tests.
#[derive(Debug, Default)]
pub struct ManualLoader {
    pending: Vec<(LoadTicket, String)>,
    resets: u32,
}

impl ManualLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet taken.
    pub fn pending(&self) -> &[(LoadTicket, String)] {
        &self.pending
    }

    /// Take all pending requests.
    pub fn take_pending(&mut self) -> Vec<(LoadTicket, String)> {
        std::mem::take(&mut self.pending)
    }

    /// Number of times `reset` was called.
    pub fn resets(&self) -> u32 {
        self.resets
    }
}

impl ImageLoader for ManualLoader {
    fn request(&mut self, ticket: LoadTicket, url: &str) {
        self.pending.push((ticket, url.to_string()));
    }

    fn reset(&mut self) {
        self.pending.clear();
        self.resets += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{ImageTier, SpriteId};

    fn ticket(n: u32) -> LoadTicket {
        LoadTicket {
            generation: 1,
            sprite: SpriteId(n),
            tier: ImageTier::Low,
        }
    }

    #[test]
    fn manual_loader_records_and_takes() {
        let mut loader = ManualLoader::new();
        loader.request(ticket(0), "a.jpg");
        loader.request(ticket(1), "b.jpg");
        assert_eq!(loader.pending().len(), 2);
        let taken = loader.take_pending();
        assert_eq!(taken[1].1, "b.jpg");
        assert!(loader.pending().is_empty());
    }

    #[test]
    fn reset_drops_pending() {
        let mut loader = ManualLoader::new();
        loader.request(ticket(0), "a.jpg");
        loader.reset();
        assert!(loader.pending().is_empty());
        assert_eq!(loader.resets(), 1);
    }

    #[test]
    fn error_display_names_url() {
        let err = LoadError::new("x.jpg", "404");
        assert_eq!(err.to_string(), "failed to load image x.jpg: 404");
    }
}
