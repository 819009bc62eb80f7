use serde::Serialize;
use std::fmt;

/// Number of found items at which the hunt counts as complete
pub const HUNT_GOAL: usize = 10;

/// Summary of how far along the hunt is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HuntProgress {
    pub found: usize,
    pub total: usize,
}

impl HuntProgress {
    pub fn new(found: usize, total: usize) -> Self {
        Self { found, total }
    }

    /// Short encouragement line shown on the report cover
    pub fn message(&self) -> String {
        found_message(self.found)
    }
}

/// Encouragement line for a number of found items
pub fn found_message(found: usize) -> String {
    if found >= HUNT_GOAL {
        "All items found!".to_string()
    } else if found > 0 {
        format!("You found {} items", found)
    } else {
        "Start your hunt!".to_string()
    }
}

impl fmt::Display for HuntProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} locations with photo", self.found, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_messages() {
        assert_eq!(HuntProgress::new(0, 5).message(), "Start your hunt!");
        assert_eq!(HuntProgress::new(3, 5).message(), "You found 3 items");
        assert_eq!(HuntProgress::new(10, 12).message(), "All items found!");
        assert_eq!(
            HuntProgress::new(2, 7).to_string(),
            "2 of 7 locations with photo"
        );
    }

    #[test]
    fn test_found_message_ignores_total() {
        assert_eq!(found_message(1), "You found 1 items");
        assert_eq!(found_message(HUNT_GOAL), "All items found!");
        assert_eq!(found_message(0), HuntProgress::new(0, 0).message());
    }
}
