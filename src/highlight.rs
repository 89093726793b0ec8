//! Hover highlighting shared by the sidebar and the PDF link overlays
//!
//! Only one preview is highlighted at a time. Handlers call into a
//! [`Highlighter`] and apply the returned [`HighlightChange`]s to the DOM.

/// Index of a preview in sidebar render order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewId(pub usize);

/// What an overlay needs to know about a preview to match it
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTarget {
    pub key: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightChange {
    Activate(PreviewId),
    Deactivate(PreviewId),
}

#[derive(Debug, Default)]
pub struct Highlighter {
    targets: Vec<PreviewTarget>,
    active: Option<PreviewId>,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the preview table after a sidebar rebuild
    pub fn reset(&mut self, targets: Vec<PreviewTarget>) {
        self.targets = targets;
        self.active = None;
    }

    pub fn active(&self) -> Option<PreviewId> {
        self.active
    }

    pub fn targets(&self) -> &[PreviewTarget] {
        &self.targets
    }

    /// Pointer entered a sidebar preview
    pub fn enter_preview(&mut self, id: PreviewId) -> Vec<HighlightChange> {
        self.activate(id)
    }

    /// Pointer left a sidebar preview
    ///
    /// The preview always loses its highlight, but the active slot is only
    /// cleared if it still points at this preview.
    pub fn leave_preview(&mut self, id: PreviewId) -> Vec<HighlightChange> {
        if self.active == Some(id) {
            self.active = None;
        }
        vec![HighlightChange::Deactivate(id)]
    }

    /// Pointer entered a link overlay; highlights the matching preview if any
    pub fn enter_overlay(&mut self, url: &str) -> Vec<HighlightChange> {
        match self.find_preview(url) {
            Some(id) => self.activate(id),
            None => Vec::new(),
        }
    }

    /// Pointer left a link overlay; clears whatever is active
    pub fn leave_overlay(&mut self) -> Vec<HighlightChange> {
        match self.active.take() {
            Some(id) => vec![HighlightChange::Deactivate(id)],
            None => Vec::new(),
        }
    }

    /// First preview, in sidebar order, whose key occurs in `url` or whose
    /// resolved URL is exactly `url`
    pub fn find_preview(&self, url: &str) -> Option<PreviewId> {
        self.targets
            .iter()
            .position(|t| url.contains(t.key.as_str()) || t.url == url)
            .map(PreviewId)
    }

    fn activate(&mut self, id: PreviewId) -> Vec<HighlightChange> {
        let mut changes = Vec::with_capacity(2);
        if let Some(previous) = self.active {
            changes.push(HighlightChange::Deactivate(previous));
        }
        changes.push(HighlightChange::Activate(id));
        self.active = Some(id);
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn target(key: &str) -> PreviewTarget {
        PreviewTarget {
            key: key.to_string(),
            url: crate::links::resolve_url(key),
        }
    }

    fn highlighter(keys: &[&str]) -> Highlighter {
        let mut h = Highlighter::new();
        h.reset(keys.iter().map(|k| target(k)).collect());
        h
    }

    /// Applies changes the way the DOM adapter toggles the `active` class
    #[derive(Default)]
    struct ClassSet(HashSet<PreviewId>);

    impl ClassSet {
        fn apply(&mut self, changes: Vec<HighlightChange>) {
            for change in changes {
                match change {
                    HighlightChange::Activate(id) => {
                        self.0.insert(id);
                    }
                    HighlightChange::Deactivate(id) => {
                        self.0.remove(&id);
                    }
                }
            }
            assert!(self.0.len() <= 1, "more than one active preview: {:?}", self.0);
        }
    }

    #[test]
    fn test_enter_preview_replaces_previous() {
        let mut h = highlighter(&["a.com", "b.com"]);
        assert_eq!(
            h.enter_preview(PreviewId(0)),
            vec![HighlightChange::Activate(PreviewId(0))]
        );
        assert_eq!(
            h.enter_preview(PreviewId(1)),
            vec![
                HighlightChange::Deactivate(PreviewId(0)),
                HighlightChange::Activate(PreviewId(1))
            ]
        );
        assert_eq!(h.active(), Some(PreviewId(1)));
    }

    #[test]
    fn test_leave_stale_preview_keeps_active() {
        let mut h = highlighter(&["a.com", "b.com"]);
        h.enter_preview(PreviewId(0));
        h.enter_preview(PreviewId(1));

        // a late leave from the first preview must not clear the second
        let changes = h.leave_preview(PreviewId(0));
        assert_eq!(changes, vec![HighlightChange::Deactivate(PreviewId(0))]);
        assert_eq!(h.active(), Some(PreviewId(1)));

        h.leave_preview(PreviewId(1));
        assert_eq!(h.active(), None);
    }

    #[test]
    fn test_overlay_matches_key_substring() {
        let h = highlighter(&["github.com/rheneault", "linkedin.com/in/rheneault"]);
        assert_eq!(
            h.find_preview("https://www.linkedin.com/in/rheneault/"),
            Some(PreviewId(1))
        );
        assert_eq!(h.find_preview("https://gitlab.com/other"), None);
    }

    #[test]
    fn test_overlay_matches_exact_url() {
        let mut h = Highlighter::new();
        h.reset(vec![PreviewTarget {
            key: "portfolio".to_string(),
            url: "https://me.example.org".to_string(),
        }]);
        assert_eq!(h.find_preview("https://me.example.org"), Some(PreviewId(0)));
    }

    #[test]
    fn test_overlay_first_match_wins() {
        let h = highlighter(&["github.com", "github.com/rheneault"]);
        assert_eq!(
            h.find_preview("https://github.com/rheneault"),
            Some(PreviewId(0))
        );
    }

    #[test]
    fn test_overlay_without_match_changes_nothing() {
        let mut h = highlighter(&["a.com"]);
        h.enter_preview(PreviewId(0));
        assert!(h.enter_overlay("https://unrelated.net").is_empty());
        assert_eq!(h.active(), Some(PreviewId(0)));
    }

    #[test]
    fn test_overlay_leave_clears_unconditionally() {
        let mut h = highlighter(&["a.com", "b.com"]);
        h.enter_preview(PreviewId(1));
        assert_eq!(
            h.leave_overlay(),
            vec![HighlightChange::Deactivate(PreviewId(1))]
        );
        assert_eq!(h.active(), None);
        assert!(h.leave_overlay().is_empty());
    }

    #[test]
    fn test_sidebar_then_overlay_leaves_single_active() {
        let mut h = highlighter(&["a.com", "b.com"]);
        let mut classes = ClassSet::default();

        classes.apply(h.enter_preview(PreviewId(0)));
        classes.apply(h.enter_overlay("https://b.com/project"));

        assert_eq!(h.active(), Some(PreviewId(1)));
        assert_eq!(classes.0, HashSet::from([PreviewId(1)]));
    }

    #[test]
    fn test_interleaved_events_never_exceed_one_active() {
        let mut h = highlighter(&["a.com", "b.com", "c.com"]);
        let mut classes = ClassSet::default();

        classes.apply(h.enter_preview(PreviewId(0)));
        classes.apply(h.enter_overlay("https://c.com"));
        classes.apply(h.enter_preview(PreviewId(1)));
        classes.apply(h.leave_preview(PreviewId(0)));
        classes.apply(h.enter_overlay("https://a.com"));
        classes.apply(h.leave_preview(PreviewId(1)));
        classes.apply(h.leave_overlay());

        assert!(classes.0.is_empty());
        assert_eq!(h.active(), None);
    }

    #[test]
    fn test_reset_drops_active() {
        let mut h = highlighter(&["a.com"]);
        h.enter_preview(PreviewId(0));
        h.reset(vec![target("b.com")]);
        assert_eq!(h.active(), None);
        assert_eq!(h.targets().len(), 1);
    }
}
