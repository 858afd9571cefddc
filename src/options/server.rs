use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Server", inline)]
#[serde(default)]
/// Where the workbench backend lives.
pub struct ServerOptions {
    /// Base URL that the `/rest/...` paths are appended to.
    #[schemars(title = "Base URL")]
    pub base_url: String,
    /// Overall timeout for one request, in seconds.
    #[schemars(title = "Timeout", range(min = 1, max = 600))]
    pub timeout_secs: u64,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
            timeout_secs: 30,
        }
    }
}
