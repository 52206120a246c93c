use crate::search::TemplateMatch;

/// Auto-select the top hit unless the top two scores are too close to call.
#[derive(Debug, Clone, Copy)]
pub struct SelectionPolicy {
    /// Minimum score gap between rank 1 and rank 2 for an automatic pick.
    pub closeness_threshold: f32,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            closeness_threshold: 0.03,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Selection {
    /// Nothing matched.
    NoMatch,
    /// Index of the auto-selected result.
    Auto(usize),
    /// Scores too close; the caller must collect an explicit choice.
    AskUser,
}

impl SelectionPolicy {
    pub fn decide(&self, matches: &[TemplateMatch]) -> Selection {
        match matches {
            [] => Selection::NoMatch,
            [_] => Selection::Auto(0),
            [first, second, ..] => {
                if (first.score - second.score).abs() < self.closeness_threshold {
                    Selection::AskUser
                } else {
                    Selection::Auto(0)
                }
            }
        }
    }
}
