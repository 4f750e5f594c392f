use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{info, instrument};

use crate::{error::RouteError, types::model::route::Route};

pub const ROUTE_FILE_NAME: &str = "routeinfo.json";

/// Single-slot store for the current route, kept at `<data_dir>/routeinfo.json`.
#[derive(Debug, Clone)]
pub struct RouteStore {
    path: PathBuf,
}

impl RouteStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        RouteStore {
            path: data_dir.as_ref().join(ROUTE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> RouteError {
        RouteError::PersistenceWrite {
            path: self.path.clone(),
            source,
        }
    }

    fn read_error(&self, message: impl ToString) -> RouteError {
        RouteError::PersistenceRead {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }

    /// Replaces whatever was stored before.
    #[instrument(skip_all, fields(path = %self.path.display(), route = %route.name))]
    pub async fn save(&self, route: &Route) -> Result<(), RouteError> {
        let json = serde_json::to_string_pretty(route)
            .map_err(|err| self.write_error(std::io::Error::new(ErrorKind::InvalidData, err)))?;
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|err| self.write_error(err))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|err| self.write_error(err))?;
        if let Err(err) = tokio::fs::rename(&tmp, &self.path).await {
            tokio::fs::remove_file(&tmp).await.ok();
            return Err(self.write_error(err));
        }
        info!("route saved");
        Ok(())
    }

    /// `None` when nothing has been saved yet.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Option<Route>, RouteError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.read_error(err)),
        };
        let route: Route = serde_json::from_str(&json).map_err(|err| self.read_error(err))?;
        if route.waypoints.len() == 1 {
            return Err(self.read_error("a route needs at least two waypoints"));
        }
        info!("loaded route {}", route.name);
        Ok(Some(route))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::{
        theme::{MovementMode, Theme},
        types::model::route::LonLat,
    };

    fn route(name: &str) -> Route {
        Route::new(
            name,
            "Novodvinsk",
            vec![LonLat(40.52, 64.54), LonLat(40.6, 64.56), LonLat(40.82, 64.41)],
            Theme::Nature,
            MovementMode::Foot,
        )
    }

    #[tokio::test]
    async fn load_without_file_is_none() {
        let dir = tempdir().unwrap();
        let store = RouteStore::new(dir.path());
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_load_gives_the_same_route() {
        let dir = tempdir().unwrap();
        let store = RouteStore::new(dir.path().join("nested"));
        let saved = route("Arkhangelsk");
        store.save(&saved).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(saved));
        assert!(store.path().ends_with(ROUTE_FILE_NAME));
    }

    #[tokio::test]
    async fn save_replaces_previous_route() {
        let dir = tempdir().unwrap();
        let store = RouteStore::new(dir.path());
        store.save(&route("First")).await.unwrap();
        store.save(&route("Second")).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.name, "Second - Novodvinsk");
    }

    #[tokio::test]
    async fn malformed_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let store = RouteStore::new(dir.path());
        tokio::fs::write(store.path(), "{not json").await.unwrap();
        assert!(matches!(
            store.load().await,
            Err(RouteError::PersistenceRead { .. })
        ));
    }

    #[tokio::test]
    async fn single_waypoint_is_a_read_error() {
        let dir = tempdir().unwrap();
        let store = RouteStore::new(dir.path());
        let json = r#"{"name":"A - B","waypoints":[[1.0,2.0]],"theme":"food",
            "movementMode":"foot","description":""}"#;
        tokio::fs::write(store.path(), json).await.unwrap();
        assert!(matches!(
            store.load().await,
            Err(RouteError::PersistenceRead { .. })
        ));
    }

    #[tokio::test]
    async fn failed_rename_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = RouteStore::new(dir.path());
        // A non-empty directory where the route file should be cannot be replaced
        tokio::fs::create_dir_all(store.path().join("occupied"))
            .await
            .unwrap();
        assert!(matches!(
            store.save(&route("A")).await,
            Err(RouteError::PersistenceWrite { .. })
        ));
        let tmp = store.path().with_extension("json.tmp");
        assert!(!tmp.exists());
    }

    #[tokio::test]
    async fn unwritable_location_is_a_write_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        tokio::fs::write(&blocker, "").await.unwrap();
        // The data dir sits below a regular file
        let store = RouteStore::new(blocker.join("data"));
        assert!(matches!(
            store.save(&route("A")).await,
            Err(RouteError::PersistenceWrite { .. })
        ));
    }
}
