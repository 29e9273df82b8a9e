//! crates/skimmly_core/src/comments.rs
//!
//! Per-post comment threads and the comments modal.

use crate::domain::Comment;
use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Author recorded for comments written by the signed-in user.
pub const LOCAL_AUTHOR: &str = "You";

/// What the comments modal currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentsModal {
    pub visible: bool,
    pub comments: Vec<Comment>,
    pub input: String,
}

pub struct CommentsManager {
    threads: HashMap<String, Vec<Comment>>,
    current_post: Option<String>,
    modal: CommentsModal,
}

impl CommentsManager {
    pub fn new(threads: HashMap<String, Vec<Comment>>) -> Self {
        Self {
            threads,
            current_post: None,
            modal: CommentsModal::default(),
        }
    }

    /// Starts from the sample threads shown on the explore page.
    pub fn seeded() -> Self {
        Self::new(sample_threads())
    }

    pub fn modal(&self) -> &CommentsModal {
        &self.modal
    }

    pub fn current_post(&self) -> Option<&str> {
        self.current_post.as_deref()
    }

    pub fn thread(&self, post_id: &str) -> &[Comment] {
        self.threads.get(post_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.modal.input = text.into();
    }

    pub fn open_comments(&mut self, post_id: &str) {
        self.current_post = Some(post_id.to_string());
        self.modal.comments = self.thread(post_id).to_vec();
        self.modal.visible = true;
    }

    /// Hides the modal. The current post is kept.
    pub fn close_comments(&mut self) {
        self.modal.visible = false;
        self.modal.input.clear();
    }

    /// Appends a comment by the local user to the open post.
    /// Blank text is ignored.
    pub fn add_comment(&mut self, text: &str) -> CoreResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        let Some(post_id) = self.current_post.clone() else {
            warn!("Comment submitted with no post open");
            return Err(CoreError::NoPostOpen);
        };

        self.threads
            .entry(post_id.clone())
            .or_default()
            .push(Comment::new(LOCAL_AUTHOR, text));
        debug!("Comment added to {}", post_id);

        self.open_comments(&post_id);
        self.modal.input.clear();
        Ok(())
    }

    /// Submits whatever is in the modal input.
    pub fn submit_input(&mut self) -> CoreResult<()> {
        let text = std::mem::take(&mut self.modal.input);
        let result = self.add_comment(&text);
        if result.is_err() || text.trim().is_empty() {
            self.modal.input = text;
        }
        result
    }
}

fn sample_threads() -> HashMap<String, Vec<Comment>> {
    let samples: [(&str, &[(&str, &str)]); 10] = [
        (
            "post1",
            &[
                ("Emma Wilson", "Great explanation! Really helped me understand slope better."),
                ("Mike Johnson", "The visual representation makes it so clear. Thanks for sharing!"),
                ("Lisa Chen", "Could you do one on derivatives next?"),
            ],
        ),
        (
            "post2",
            &[
                ("David Brown", "Perfect lab setup diagram!"),
                ("Anna Davis", "This is exactly what I needed for my chemistry practical. Thank you!"),
            ],
        ),
        (
            "post3",
            &[
                ("Tom Wilson", "Comprehensive timeline. Very helpful for history class."),
                ("Rachel Green", "Great resource! The dates are clearly organized."),
            ],
        ),
        (
            "post4",
            &[
                ("Kevin Park", "Amazing detail on the organelles!"),
                ("Sophie Martinez", "Perfect for my biology exam prep. Love the clear labeling!"),
            ],
        ),
        (
            "post5",
            &[
                ("Lucy Wang", "This saved my physics grade! Newton's laws finally make sense."),
                ("Marcus Thompson", "Great examples and practice problems. Very thorough!"),
                ("Nina Patel", "Perfect for AP Physics. Thank you so much!"),
            ],
        ),
        (
            "post6",
            &[
                ("Oliver Smith", "Shakespeare analysis is spot on! Helped with my essay."),
                ("Grace Liu", "Love the character studies. Very insightful."),
            ],
        ),
        (
            "post7",
            &[
                ("James Rodriguez", "Finally, statistics formulas that are easy to understand!"),
                ("Maya Gupta", "This formula sheet is a lifesaver. Bookmarked!"),
            ],
        ),
        (
            "post8",
            &[
                ("Isabella Cruz", "¡Excelente! This really helps with verb conjugations."),
                ("Antonio Silva", "Perfect reference guide. Muy útil!"),
            ],
        ),
        (
            "post9",
            &[
                ("Alex Chang", "This is gold for coding interviews! Thanks for sharing."),
                ("Taylor Brooks", "Data structures finally make sense. Great visual explanations."),
                ("Priya Sharma", "Using this for my CS midterm. Super helpful!"),
            ],
        ),
        (
            "post10",
            &[
                ("Nathan Lee", "Economics concepts explained so clearly!"),
                ("Samantha Davis", "Perfect graph for understanding market equilibrium."),
            ],
        ),
    ];

    samples
        .into_iter()
        .map(|(post_id, comments)| {
            let thread = comments
                .iter()
                .map(|(author, text)| Comment::new(*author, *text))
                .collect();
            (post_id.to_string(), thread)
        })
        .collect()
}
