//! crates/skimmly_core/src/explore.rs
//!
//! Like and download counters for posts on the explore page.

use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostEngagement {
    pub likes: u64,
    pub liked: bool,
}

pub struct Engagement {
    posts: HashMap<String, PostEngagement>,
    downloads_by_file: HashMap<String, u64>,
    saved_downloads: Vec<String>,
}

impl Default for Engagement {
    fn default() -> Self {
        Self {
            posts: HashMap::new(),
            downloads_by_file: HashMap::new(),
            saved_downloads: vec!["slope-notes.pdf".to_string(), "chemical-bonds.pdf".to_string()],
        }
    }
}

impl Engagement {
    /// Sets the counts shown for a post before the user interacts with it.
    pub fn track(&mut self, post_id: &str, likes: u64) {
        self.posts.entry(post_id.to_string()).or_default().likes = likes;
    }

    pub fn post(&self, post_id: &str) -> Option<&PostEngagement> {
        self.posts.get(post_id)
    }

    /// Flips the liked state and returns the new count.
    pub fn toggle_like(&mut self, post_id: &str) -> u64 {
        let post = self.posts.entry(post_id.to_string()).or_default();
        if post.liked {
            post.liked = false;
            post.likes = post.likes.saturating_sub(1);
        } else {
            post.liked = true;
            post.likes += 1;
        }
        debug!("{} liked={} likes={}", post_id, post.liked, post.likes);
        post.likes
    }

    /// Records a download and returns the file's new download count.
    pub fn download_file(&mut self, filename: &str) -> u64 {
        if !self.saved_downloads.iter().any(|f| f == filename) {
            self.saved_downloads.push(filename.to_string());
        }
        let count = self.downloads_by_file.entry(filename.to_string()).or_default();
        *count += 1;
        *count
    }

    pub fn saved_downloads(&self) -> &[String] {
        &self.saved_downloads
    }

    pub fn download_count(&self, filename: &str) -> u64 {
        self.downloads_by_file.get(filename).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_then_unlike_restores_count() {
        let mut engagement = Engagement::default();
        engagement.track("post1", 24);
        assert_eq!(engagement.toggle_like("post1"), 25);
        assert!(engagement.post("post1").unwrap().liked);
        assert_eq!(engagement.toggle_like("post1"), 24);
        assert!(!engagement.post("post1").unwrap().liked);
    }

    #[test]
    fn downloads_are_saved_once_and_counted_each_time() {
        let mut engagement = Engagement::default();
        assert_eq!(engagement.download_file("cell-diagram.pdf"), 1);
        assert_eq!(engagement.download_file("cell-diagram.pdf"), 2);
        assert_eq!(engagement.download_file("slope-notes.pdf"), 1);
        assert_eq!(
            engagement.saved_downloads(),
            ["slope-notes.pdf", "chemical-bonds.pdf", "cell-diagram.pdf"]
        );
        assert_eq!(engagement.download_count("cell-diagram.pdf"), 2);
    }

    #[test]
    fn downloads_are_counted_per_file_not_per_post() {
        let mut engagement = Engagement::default();
        engagement.track("post1", 3);
        engagement.download_file("slope-notes.pdf");

        assert_eq!(
            engagement.post("post1"),
            Some(&PostEngagement { likes: 3, liked: false })
        );
        assert_eq!(engagement.download_count("slope-notes.pdf"), 1);
    }
}
