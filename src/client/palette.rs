//! Per-user marker colors.

use crate::tag::ANONYMOUS_USER_ID;
use std::collections::HashMap;

/// Colors handed out to users in first-seen order.
pub const USER_COLOR_PALETTE: [&str; 6] = [
    "#FF2D95", "#7A5CFF", "#00F0FF", "#FFD166", "#06D6A0", "#EF476F",
];

/// Assigns palette colors to user ids as they are first seen.
///
/// Assignments last until [`UserColors::reset`], which the client calls on
/// every full reload, so a user's color can change between polls when the
/// order of first appearance changes.
#[derive(Debug, Default, Clone)]
pub struct UserColors {
    assigned: HashMap<String, &'static str>,
    next_index: usize,
}

impl UserColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the color for a user, assigning the next palette entry if the
    /// user has none yet. An empty id is treated as anonymous.
    pub fn color_for(&mut self, user_id: &str) -> &'static str {
        let key = if user_id.is_empty() {
            ANONYMOUS_USER_ID
        } else {
            user_id
        };

        if let Some(color) = self.assigned.get(key) {
            return *color;
        }

        let color = USER_COLOR_PALETTE[self.next_index % USER_COLOR_PALETTE.len()];
        self.assigned.insert(key.to_string(), color);
        self.next_index += 1;
        color
    }

    /// Forgets every assignment and restarts at the first palette color.
    pub fn reset(&mut self) {
        self.assigned.clear();
        self.next_index = 0;
    }

    /// Number of users with an assigned color.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
