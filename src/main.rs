//! Command-line entry point for the protein modeling workbench viewer.

use std::path::{Path, PathBuf};

use pmw_view::app::{AlertKind, App, CalculationContext, Route};
use pmw_view::options::Config;
use pmw_view::rest::HttpBackend;
use pmw_view::viewer::{SceneFactory, SceneViewer};

const USAGE: &str = "Usage: pmw-view [--config <FILE>] <COMMAND>

Commands:
  submit <SEQUENCE>                               create a project from a sequence
  upload <FILE>                                   create a project from a PDB file
  open <ID>                                       load and bind a project
  calc <ID> <feature|reconstruction> <VALUE>      request a calculation";

enum Command {
    Submit(String),
    Upload(PathBuf),
    Open(String),
    Calc(String, CalculationContext, i64),
}

struct Args {
    config: Option<PathBuf>,
    command: Command,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut config = None;
    let mut first = args.next().ok_or("missing command")?;
    if first == "--config" {
        config = Some(PathBuf::from(args.next().ok_or("--config needs a file")?));
        first = args.next().ok_or("missing command")?;
    }
    let mut next = |what: &str| args.next().ok_or(format!("missing {what}"));
    let command = match first.as_str() {
        "submit" => Command::Submit(next("sequence")?),
        "upload" => Command::Upload(PathBuf::from(next("file")?)),
        "open" => Command::Open(next("project id")?),
        "calc" => {
            let id = next("project id")?;
            let context = match next("context")?.as_str() {
                "feature" => CalculationContext::Feature,
                "reconstruction" => CalculationContext::Reconstruction,
                other => return Err(format!("unknown context '{other}'")),
            };
            let value = next("value")?
                .parse::<i64>()
                .map_err(|e| format!("invalid value: {e}"))?;
            Command::Calc(id, context, value)
        }
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(Args { config, command })
}

fn load_config(path: Option<&Path>) -> Result<Config, String> {
    match path {
        Some(path) => Config::load(path)
            .map_err(|e| format!("{}: {e}", path.display())),
        None => Ok(Config::default()),
    }
}

fn report(app: &App<HttpBackend, SceneFactory>) -> bool {
    let state = app.state();
    log::info!("route: {}", state.route);
    if let Some(summary) = &state.summary {
        log::info!(
            "project {} '{}' created {}: {} chains, {} residues, {} atoms",
            summary.id,
            summary.name,
            summary
                .created
                .map_or_else(|| "unknown".to_owned(), |t| t.to_rfc3339()),
            summary.chains,
            summary.residues,
            summary.atoms
        );
    }
    if let Some(viewer) = app.binder().viewer() {
        describe_scene(viewer);
    }
    let mut ok = true;
    for alert in state.alerts.iter() {
        match alert.kind {
            AlertKind::Success => log::info!("{}", alert.message),
            AlertKind::Danger => {
                log::error!("{}", alert.message);
                ok = false;
            }
        }
    }
    ok
}

fn describe_scene(viewer: &SceneViewer) {
    for layer in viewer.layers() {
        let content = match (layer.structure(), layer.mesh()) {
            (Some(s), _) => format!("{} residues as {}", s.residues, s.mode.as_str()),
            (_, Some(m)) => format!(
                "{} tubes ({:.1} Å), {} spheres",
                m.tubes.len(),
                m.tube_length(),
                m.spheres.len()
            ),
            (None, None) => String::new(),
        };
        log::info!("layer '{}': {content}", layer.name);
    }
    log::info!(
        "viewport {:?}, antialias {}, quality {:?}",
        viewer.size(),
        viewer.antialias(),
        viewer.quality()
    );
    let camera = viewer.camera();
    log::info!(
        "camera at {:?}, distance {:.1}",
        camera.center,
        camera.distance
    );
}

fn main() {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}\n{USAGE}");
            std::process::exit(2);
        }
    };

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let backend = HttpBackend::new(&config.server);
    let mut app = App::from_config(backend, SceneFactory::default(), &config);
    app.start();

    match args.command {
        Command::Submit(sequence) => app.submit_sequence(&sequence),
        Command::Upload(path) => app.submit_file(&path),
        Command::Open(id) => app.navigate(Route::Project { id: Some(id) }),
        Command::Calc(id, context, value) => {
            app.navigate(Route::Project { id: Some(id) });
            app.request_calculation(Some(context), value);
        }
    }

    if !report(&app) {
        std::process::exit(1);
    }
}
