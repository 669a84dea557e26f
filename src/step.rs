//! Walkthrough steps - the scripted content of a guided tour.
//!
//! A step names one or more targets to highlight simultaneously plus the
//! title and body text shown on the instruction card. Steps are immutable
//! once constructed; the sequence is owned by the host and read-only to the
//! core.

/// Title used when a step does not supply its own.
pub const DEFAULT_TITLE: &str = "Walkthrough";

/// One stage of a walkthrough.
///
/// # Examples
///
/// ```
/// use lumen_tui::step::Step;
///
/// let single = Step::new("save_button", "Saving", "Press here to save.");
/// assert_eq!(single.ids, vec!["save_button".to_string()]);
///
/// let multi = Step::spanning(
///     ["sidebar", "toolbar"],
///     "Navigation",
///     "These two areas move you around.",
/// );
/// assert_eq!(multi.ids.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Target identifiers highlighted by this step, in order, unique.
    pub ids: Vec<String>,
    /// Card heading.
    pub title: String,
    /// Card body text.
    pub body: String,
}

impl Step {
    /// Create a step highlighting a single target.
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            ids: vec![id.into()],
            title: title.into(),
            body: body.into(),
        }
    }

    /// Create a step highlighting several targets at once.
    ///
    /// Duplicate identifiers are dropped, keeping first occurrence order.
    pub fn spanning<I, S>(ids: I, title: impl Into<String>, body: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            if !seen.contains(&id) {
                seen.push(id);
            }
        }
        Self {
            ids: seen,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Create a step with the default title.
    pub fn untitled(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(id, DEFAULT_TITLE, body)
    }
}
