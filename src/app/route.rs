use std::fmt;

/// A client-visible view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// Submission page.
    #[default]
    Home,
    /// About page.
    About,
    /// Project view, keyed by the `id` query parameter.
    Project {
        /// Project identifier.
        id: Option<String>,
    },
    /// Single-protein view, keyed by the `id` query parameter.
    Protein {
        /// Protein identifier.
        id: Option<String>,
    },
}

impl Route {
    /// Resolve a location such as `/project?id=proj123`.
    ///
    /// Unknown paths resolve to [`Route::Home`].
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let (path, query) = location.split_once('?').unwrap_or((location, ""));
        match path.trim_end_matches('/') {
            "/about" => Self::About,
            "/project" => Self::Project {
                id: query_id(query),
            },
            "/protein" => Self::Protein {
                id: query_id(query),
            },
            _ => Self::Home,
        }
    }

    /// Project id of a project route.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        match self {
            Self::Project { id } => id.as_deref(),
            _ => None,
        }
    }
}

fn query_id(query: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "id")
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(std::borrow::Cow::into_owned)
        .filter(|id| !id.is_empty())
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (path, id) = match self {
            Self::Home => ("/home", None),
            Self::About => ("/about", None),
            Self::Project { id } => ("/project", id.as_deref()),
            Self::Protein { id } => ("/protein", id.as_deref()),
        };
        match id {
            Some(id) => write!(f, "{path}?id={}", urlencoding::encode(id)),
            None => f.write_str(path),
        }
    }
}
