use std::path::PathBuf;

/// Failures of a route build or of the route store.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("start and end of the route are the same point")]
    DegenerateRoute,
    #[error("unknown locality: {0}")]
    UnknownLocality(String),
    #[error("overpass query failed: {0}")]
    RemoteQuery(String),
    #[error("could not parse overpass response: {0}")]
    ResponseParse(String),
    #[error("could not write route to {}: {source}", .path.display())]
    PersistenceWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not read route from {}: {message}", .path.display())]
    PersistenceRead { path: PathBuf, message: String },
}

impl From<reqwest::Error> for RouteError {
    fn from(err: reqwest::Error) -> Self {
        RouteError::RemoteQuery(err.to_string())
    }
}
