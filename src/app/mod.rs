//! The application driver.
//!
//! [`App`] owns the [`AppState`], the backend and the binder, and is the
//! only place a backend call is made. Every call completes before the
//! method returns: a project load decodes, assembles and binds in one go.
//! A failed call becomes one danger alert; guard failures do nothing.

mod route;
mod state;

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

pub use route::Route;
pub use state::{Alert, AlertKind, Alerts, AppState};

use crate::binder::{ViewEvent, VisualizationBinder};
use crate::error::PmwError;
use crate::model::{Project, ProjectSummary};
use crate::options::Config;
use crate::pdb;
use crate::rest::{
    self, decode_json, text_body, Backend, CALCULATION_PATH, PROJECT_PATH,
    SETTINGS_PATH,
};
use crate::settings::{Constants, Settings};
use crate::viewer::ViewerFactory;

/// What a calculation request computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationContext {
    /// A per-residue feature.
    Feature,
    /// A structure reconstruction step.
    Reconstruction,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculationRequest<'a> {
    project_id: &'a str,
    context: CalculationContext,
    value: i64,
}

#[derive(Serialize)]
struct FileUpload<'a> {
    file: &'a str,
}

/// Encode `bytes` as a `data:` URL, typed by the extension of `name`.
#[must_use]
pub fn data_url(name: &str, bytes: &[u8]) -> String {
    let mime = mime_guess::from_path(name).first_or_octet_stream();
    format!("data:{};base64,{}", mime.essence_str(), STANDARD.encode(bytes))
}

/// Single state container of the client.
pub struct App<B: Backend, F: ViewerFactory> {
    backend: B,
    binder: VisualizationBinder<F>,
    state: AppState,
}

impl<B: Backend, F: ViewerFactory> App<B, F> {
    /// Assemble an app from its parts.
    #[must_use]
    pub fn new(backend: B, binder: VisualizationBinder<F>, state: AppState) -> Self {
        Self {
            backend,
            binder,
            state,
        }
    }

    /// An app with empty state and a binder built from `config`.
    #[must_use]
    pub fn from_config(backend: B, factory: F, config: &Config) -> Self {
        Self::new(
            backend,
            VisualizationBinder::new(factory, config),
            AppState::default(),
        )
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The binder and its viewer.
    #[must_use]
    pub fn binder(&self) -> &VisualizationBinder<F> {
        &self.binder
    }

    /// Load the server constants.
    pub fn start(&mut self) {
        match self.fetch_settings() {
            Ok(settings) => {
                self.state.constants = Constants::from_settings(&settings);
                self.state.coloring_feature =
                    self.state.constants.features.first().cloned();
                log::info!(
                    "loaded {} features, {} reconstruction levels",
                    self.state.constants.features.len(),
                    self.state.constants.reconstruction_levels.len()
                );
            }
            Err(e) => {
                log::error!("loading settings failed: {e}");
                self.state.alerts.danger(format!(
                    "loading global constants from server {}",
                    e.alert_message()
                ));
            }
        }
    }

    fn fetch_settings(&self) -> Result<Settings, PmwError> {
        let body = self.backend.get(SETTINGS_PATH)?.into_body()?;
        decode_json(&body)
    }

    /// Switch to `route`, loading the project it names.
    pub fn navigate(&mut self, route: Route) {
        log::info!("navigating to {route}");
        let project_id = route.project_id().map(str::to_owned);
        self.state.route = route;
        match project_id {
            Some(id) => self.load_project(&id),
            None => {
                self.state.project = None;
                self.state.summary = None;
                self.binder.clear();
            }
        }
    }

    /// Switch to the view at `location`, e.g. `/project?id=proj123`.
    pub fn navigate_path(&mut self, location: &str) {
        self.navigate(Route::parse(location));
    }

    /// Fetch project `id`, assemble its PDB text and bind it.
    pub fn load_project(&mut self, id: &str) {
        log::info!("loading project {id}");
        self.state.loading = true;
        let mut project = match self.fetch_project(id) {
            Ok(project) => project,
            Err(e) => {
                self.state.loading = false;
                self.report("loading project", &e);
                return;
            }
        };
        if let Some(protein) = project.protein_mut() {
            pdb::compose(protein);
        }
        self.state.summary = Some(ProjectSummary::of(&project));
        let bound = match project.protein() {
            Some(protein) => self.binder.bind(protein),
            None => Ok(()),
        };
        self.state.project = Some(project);
        self.state.loading = false;
        if let Err(e) = bound {
            self.report("binding project", &e);
        }
    }

    fn fetch_project(&self, id: &str) -> Result<Project, PmwError> {
        let body = self.backend.get(&rest::project_path(id))?.into_body()?;
        Project::from_payload(&body)
    }

    /// Load the current project again.
    pub fn reload(&mut self) {
        let id = self
            .state
            .project_id()
            .or_else(|| self.state.route.project_id())
            .map(str::to_owned);
        if let Some(id) = id {
            self.load_project(&id);
        }
    }

    /// Ask the backend to compute `value` in `context` for the loaded
    /// project, then reload it.
    ///
    /// Does nothing without a loaded project or context, or for a
    /// negative value.
    pub fn request_calculation(
        &mut self,
        context: Option<CalculationContext>,
        value: i64,
    ) {
        let (Some(project_id), Some(context)) = (self.state.project_id(), context)
        else {
            return;
        };
        if value < 0 {
            return;
        }
        let result = serde_json::to_string(&CalculationRequest {
            project_id,
            context,
            value,
        })
        .map_err(PmwError::from)
        .and_then(|body| self.backend.post_json(CALCULATION_PATH, &body))
        .and_then(rest::Response::into_body);
        match result {
            Ok(body) => {
                self.state
                    .alerts
                    .success(format!("computed {}", text_body(&body)));
                self.reload();
            }
            Err(e) => self.report("calculation", &e),
        }
    }

    /// Request feature `value`.
    pub fn request_feature(&mut self, value: i64) {
        self.request_calculation(Some(CalculationContext::Feature), value);
    }

    /// Request reconstruction level `value`.
    pub fn request_reconstruction(&mut self, value: i64) {
        self.request_calculation(Some(CalculationContext::Reconstruction), value);
    }

    /// Create a project from `sequence` and open it.
    pub fn submit_sequence(&mut self, sequence: &str) {
        if sequence.is_empty() {
            return;
        }
        log::info!("submitting sequence of length {}", sequence.len());
        match serde_json::to_string(sequence) {
            Ok(body) => self.create_project(&body),
            Err(e) => self.report("sequence submission", &e.into()),
        }
    }

    /// Create a project from the structure file at `path` and open it.
    pub fn submit_file(&mut self, path: &Path) {
        match std::fs::read(path) {
            Ok(bytes) => {
                let name = path.to_string_lossy();
                self.submit_file_contents(&name, &bytes);
            }
            Err(e) => self.report("reading upload", &e.into()),
        }
    }

    /// Create a project from file contents and open it.
    pub fn submit_file_contents(&mut self, name: &str, bytes: &[u8]) {
        log::info!("uploading '{name}' ({} bytes)", bytes.len());
        let url = data_url(name, bytes);
        match serde_json::to_string(&FileUpload { file: &url }) {
            Ok(body) => self.create_project(&body),
            Err(e) => self.report("file upload", &e.into()),
        }
    }

    fn create_project(&mut self, body: &str) {
        let result = self
            .backend
            .post_json(PROJECT_PATH, body)
            .and_then(rest::Response::into_body);
        match result {
            Ok(body) => {
                let id = text_body(&body);
                log::info!("created project {id}");
                self.navigate(Route::Project { id: Some(id) });
            }
            Err(e) => self.report("project submission", &e),
        }
    }

    /// Apply a view toggle.
    pub fn apply(&mut self, event: ViewEvent) {
        self.binder.handle(event);
    }

    /// Pick the feature used for colouring by its index.
    pub fn select_coloring_feature(&mut self, index: usize) {
        self.state.coloring_feature =
            self.state.constants.features.get(index).cloned();
    }

    /// Dismiss the alert at `index`.
    pub fn dismiss_alert(&mut self, index: usize) -> Option<Alert> {
        self.state.alerts.dismiss(index)
    }

    fn report(&mut self, action: &str, error: &PmwError) {
        log::error!("{action} failed: {error}");
        self.state.alerts.danger(error.alert_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::{BinderState, CONTACT_LAYER, PROTEIN_LAYER};
    use crate::pdb::atom_line;
    use crate::rest::mock::{Method, MockBackend};
    use crate::rest::Response;
    use crate::viewer::{SceneFactory, Viewer};

    type TestApp = App<MockBackend, SceneFactory>;

    fn app(backend: MockBackend) -> TestApp {
        App::from_config(backend, SceneFactory::default(), &Config::default())
    }

    fn project_json(id: &str) -> String {
        let atoms: Vec<_> = (0..4)
            .map(|i| {
                serde_json::json!({
                    "residueNumber": i + 1,
                    "residueId": i,
                    "aminoAcid": "ALA",
                    "atoms": [{
                        "pdbRepresentation": atom_line(
                            i + 1, "CA", "ALA", 'A', i + 1,
                            [3.8 * i as f32, 0.0, 0.0],
                        ),
                    }],
                })
            })
            .collect();
        serde_json::json!({
            "_id": id,
            "name": "demo",
            "date": 1_450_000_000_000_i64,
            "proteins": [{
                "name": "demo",
                "chains": [{"chainId": "A", "residues": atoms}],
                "contacts": [{"partners": [0, 3]}],
            }],
        })
        .to_string()
    }

    fn loaded_app() -> TestApp {
        let backend = MockBackend::new()
            .on(Method::Get, "/rest/project/p1", Response::ok(project_json("p1")));
        let mut app = app(backend);
        app.navigate_path("/project?id=p1");
        app
    }

    #[test]
    fn submitting_sequence_posts_once_and_navigates() {
        let backend = MockBackend::new()
            .on(Method::Post, "/rest/project/", Response::ok("\"proj123\""));
        let mut app = app(backend);
        app.submit_sequence("ABCDE");

        assert_eq!(app.backend().count(Method::Post, "/rest/project/"), 1);
        let post = &app.backend().requests()[0];
        assert_eq!(post.body.as_deref(), Some("\"ABCDE\""));
        assert_eq!(app.state().route.to_string(), "/project?id=proj123");
    }

    #[test]
    fn empty_sequence_is_ignored() {
        let mut app = app(MockBackend::new());
        app.submit_sequence("");
        assert!(app.backend().requests().is_empty());
        assert!(app.state().alerts.is_empty());
    }

    #[test]
    fn failed_submission_alerts_with_status() {
        let mut app = app(MockBackend::new());
        app.submit_sequence("ABCDE");
        let alert = app.state().alerts.last().unwrap();
        assert_eq!(alert.kind, AlertKind::Danger);
        assert_eq!(alert.message, "failed with [404] Not Found");
        assert_eq!(app.state().route, Route::Home);
    }

    #[test]
    fn file_upload_posts_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seq.txt");
        std::fs::write(&path, b"hello").unwrap();
        let backend = MockBackend::new()
            .on(Method::Post, "/rest/project/", Response::ok("proj9"));
        let mut app = app(backend);
        app.submit_file(&path);

        let post = &app.backend().requests()[0];
        let body: serde_json::Value =
            serde_json::from_str(post.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["file"], "data:text/plain;base64,aGVsbG8=");
        assert_eq!(app.state().route.project_id(), Some("proj9"));
    }

    #[test]
    fn missing_upload_file_alerts_without_request() {
        let mut app = app(MockBackend::new());
        app.submit_file(Path::new("/nonexistent/upload.pdb"));
        assert!(app.backend().requests().is_empty());
        assert_eq!(app.state().alerts.len(), 1);
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(data_url("blob", &[0xff]), "data:application/octet-stream;base64,/w==");
    }

    #[test]
    fn loading_project_assembles_and_binds() {
        let app = loaded_app();
        let state = app.state();
        assert!(!state.loading);
        let protein = state.project.as_ref().unwrap().protein().unwrap();
        assert_eq!(protein.pdb_representation.lines().count(), 4);
        assert_eq!(state.summary.as_ref().unwrap().atoms, 4);

        let viewer = app.binder().viewer().unwrap();
        assert!(viewer.contains(PROTEIN_LAYER));
        assert_eq!(viewer.layer(CONTACT_LAYER).unwrap().mesh().unwrap().len(), 1);
    }

    #[test]
    fn sequence_project_with_nulls_loads_without_viewer() {
        let body = serde_json::json!({
            "_id": "seq1",
            "name": "query",
            "proteins": [{
                "name": "query",
                "title": null,
                "pdbRepresentation": null,
                "chains": [{
                    "chainId": "A",
                    "residues": [
                        {"aminoAcid": "MET", "residueNumber": 1, "insertionCode": null},
                        {"aminoAcid": "LYS", "residueId": 1},
                    ],
                }],
            }],
        })
        .to_string();
        let backend =
            MockBackend::new().on(Method::Get, "/rest/project/seq1", Response::ok(body));
        let mut app = app(backend);
        app.navigate_path("/project?id=seq1");

        let state = app.state();
        assert!(state.alerts.is_empty());
        assert!(!state.loading);
        assert_eq!(state.project_id(), Some("seq1"));
        assert_eq!(state.summary.as_ref().unwrap().residues, 2);
        assert_eq!(app.binder().state(), BinderState::Empty);
        assert!(app.binder().viewer().is_none());
    }

    #[test]
    fn failed_load_alerts_with_status() {
        let mut app = app(MockBackend::new());
        app.navigate_path("/project?id=missing");
        assert_eq!(
            app.state().alerts.last().unwrap().message,
            "failed with [404] Not Found"
        );
        assert!(app.state().project.is_none());
        assert!(!app.state().loading);
    }

    #[test]
    fn project_route_without_id_loads_nothing() {
        let mut app = app(MockBackend::new());
        app.navigate_path("/project");
        assert!(app.backend().requests().is_empty());
    }

    #[test]
    fn calculation_guards_send_nothing() {
        let mut app = app(MockBackend::new());
        app.request_feature(1);
        assert!(app.backend().requests().is_empty());

        let mut app = loaded_app();
        let before = app.backend().requests().len();
        app.request_calculation(None, 1);
        app.request_reconstruction(-1);
        assert_eq!(app.backend().requests().len(), before);
        assert!(app.state().alerts.is_empty());
    }

    #[test]
    fn calculation_posts_then_reloads() {
        let mut app = loaded_app();
        app.backend
            .set(Method::Post, "/rest/calculation/", Response::ok("\"SECONDARY_STRUCTURE\""));
        app.request_feature(2);

        let requests = app.backend().requests();
        let post = requests
            .iter()
            .find(|r| r.method == Method::Post)
            .unwrap();
        let body: serde_json::Value =
            serde_json::from_str(post.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"projectId": "p1", "context": "feature", "value": 2})
        );
        assert_eq!(app.backend().count(Method::Get, "/rest/project/p1"), 2);
        let alert = app.state().alerts.last().unwrap();
        assert_eq!(alert.kind, AlertKind::Success);
        assert_eq!(alert.message, "computed SECONDARY_STRUCTURE");
    }

    #[test]
    fn failed_calculation_alerts_without_reload() {
        let mut app = loaded_app();
        app.request_reconstruction(1);
        assert_eq!(app.backend().count(Method::Get, "/rest/project/p1"), 1);
        assert_eq!(
            app.state().alerts.last().unwrap().message,
            "failed with [404] Not Found"
        );
    }

    #[test]
    fn settings_are_normalized() {
        let backend = MockBackend::new().on(
            Method::Get,
            "/rest/settings/",
            Response::ok(r#"{"features": ["ACCESSIBLE_SURFACE_AREA"], "reconstructionLevels": ["CALPHA", "BACKBONE"]}"#),
        );
        let mut app = app(backend);
        app.start();
        let constants = &app.state().constants;
        assert_eq!(constants.features[0].text, "accessible surface area");
        assert_eq!(constants.reconstruction_levels.len(), 2);
        assert_eq!(constants.render_modes.len(), 8);
        assert_eq!(
            app.state().coloring_feature.as_ref().map(|f| f.raw.as_str()),
            Some("ACCESSIBLE_SURFACE_AREA")
        );
    }

    #[test]
    fn settings_failure_alerts() {
        let backend = MockBackend::new().unreachable(Method::Get, "/rest/settings/");
        let mut app = app(backend);
        app.start();
        let alert = app.state().alerts.last().unwrap();
        assert!(alert
            .message
            .starts_with("loading global constants from server failed"));
        assert!(app.state().constants.features.is_empty());
    }

    #[test]
    fn view_events_reach_the_binder() {
        let mut app = loaded_app();
        app.apply(ViewEvent::ShowContacts(false));
        let viewer = app.binder().viewer().unwrap();
        assert!(!viewer.layer(CONTACT_LAYER).unwrap().visible);
        assert_eq!(viewer.redraws(), 1);
    }

    #[test]
    fn leaving_project_view_drops_project() {
        let mut app = loaded_app();
        app.navigate(Route::About);
        assert!(app.state().project.is_none());
        assert!(!app.binder().is_loaded());

        let _ = app.dismiss_alert(0);
        assert!(app.state().alerts.is_empty());
    }
}
