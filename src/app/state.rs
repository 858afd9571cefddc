use super::Route;
use crate::model::{Project, ProjectSummary};
use crate::settings::{Constants, DisplayOption};

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// A completed action.
    Success,
    /// A failed backend call.
    Danger,
}

/// One dismissible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Severity.
    pub kind: AlertKind,
    /// Text shown to the user.
    pub message: String,
}

/// Ordered alert list. Alerts are only appended and dismissed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alerts(Vec<Alert>);

impl Alerts {
    /// Append a success alert.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(AlertKind::Success, message.into());
    }

    /// Append a danger alert.
    pub fn danger(&mut self, message: impl Into<String>) {
        self.push(AlertKind::Danger, message.into());
    }

    fn push(&mut self, kind: AlertKind, message: String) {
        log::warn!("alert ({kind:?}): {message}");
        self.0.push(Alert { kind, message });
    }

    /// Remove the alert at `index`, keeping the order of the rest.
    pub fn dismiss(&mut self, index: usize) -> Option<Alert> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    /// Alerts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.0.iter()
    }

    /// Most recent alert.
    #[must_use]
    pub fn last(&self) -> Option<&Alert> {
        self.0.last()
    }

    /// Number of alerts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no alerts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything the views read. Owned by [`super::App`].
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Pending alerts.
    pub alerts: Alerts,
    /// Normalized server constants.
    pub constants: Constants,
    /// Current view.
    pub route: Route,
    /// Loaded project, replaced on every reload.
    pub project: Option<Project>,
    /// Metadata of the loaded project.
    pub summary: Option<ProjectSummary>,
    /// Whether a project load is in progress.
    pub loading: bool,
    /// Feature used to colour residues.
    pub coloring_feature: Option<DisplayOption>,
}

impl AppState {
    /// Identifier of the loaded project.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alerts_append_and_dismiss_by_index() {
        let mut alerts = Alerts::default();
        alerts.danger("first");
        alerts.success("second");
        alerts.danger("third");

        let removed = alerts.dismiss(1).unwrap();
        assert_eq!(removed.kind, AlertKind::Success);
        let left: Vec<_> = alerts.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(left, ["first", "third"]);

        assert_eq!(alerts.dismiss(5), None);
        assert_eq!(alerts.len(), 2);
    }
}
