//! Browsing the remote tree: list a node's children and classify them.

mod entity;

pub use entity::FileEntity;

use serde::Serialize;

use crate::config::Endpoint;
use crate::error::{ConnectorError, Result};
use crate::fetch::fetch;
use crate::http::Transport;
use crate::url_model::{child_path, join, normalize, PATH_SEPARATOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseEntry {
    pub name: String,
    pub full_path: String,
    pub kind: EntryKind,
    pub can_browse: bool,
    pub can_sample: bool,
}

impl BrowseEntry {
    /// Directories can be browsed, files can be sampled.
    pub fn from_entity(parent: &str, entity: FileEntity) -> Self {
        let full_path = child_path(parent, &entity.name);
        let kind = if entity.is_dir {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        Self {
            name: entity.name,
            full_path,
            kind,
            can_browse: entity.is_dir,
            can_sample: !entity.is_dir,
        }
    }
}

/// Children of one node in listing order. No paging: `total_count` is always
/// `entries.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResult {
    pub entries: Vec<BrowseEntry>,
    pub total_count: usize,
}

impl BrowseResult {
    pub fn from_entities(parent: &str, entities: Vec<FileEntity>) -> Self {
        let entries: Vec<BrowseEntry> = entities
            .into_iter()
            .map(|e| BrowseEntry::from_entity(parent, e))
            .collect();
        let total_count = entries.len();
        Self {
            entries,
            total_count,
        }
    }
}

/// Path actually listed for `path`: the root is redirected to the endpoint path.
pub fn resolve_browse_path(path: &str, endpoint: &Endpoint) -> String {
    if path == PATH_SEPARATOR {
        normalize(&format!("{}{}", PATH_SEPARATOR, endpoint.end_point))
    } else {
        path.to_string()
    }
}

/// Lists `path` on the endpoint's tree server.
pub fn browse(transport: &dyn Transport, endpoint: &Endpoint, path: &str) -> Result<BrowseResult> {
    let path = resolve_browse_path(path, endpoint);
    let url = join(&endpoint.base_url, &path);
    let response = fetch(transport, endpoint, &url)?;
    let entities = entity::decode_listing(&response.body)
        .map_err(|source| ConnectorError::Decode { url, source })?;
    tracing::debug!(path = %path, entries = entities.len(), "browsed");
    Ok(BrowseResult::from_entities(&path, entities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubTransport;

    fn entity(name: &str, is_dir: bool) -> FileEntity {
        FileEntity {
            name: name.to_string(),
            is_dir,
        }
    }

    #[test]
    fn classifies_directories_and_files() {
        let r = BrowseResult::from_entities(
            "/x/",
            vec![entity("dir1", true), entity("f.csv", false)],
        );
        assert_eq!(r.total_count, 2);
        assert_eq!(
            r.entries[0],
            BrowseEntry {
                name: "dir1".into(),
                full_path: "/x/dir1".into(),
                kind: EntryKind::Directory,
                can_browse: true,
                can_sample: false,
            }
        );
        assert_eq!(
            r.entries[1],
            BrowseEntry {
                name: "f.csv".into(),
                full_path: "/x/f.csv".into(),
                kind: EntryKind::File,
                can_browse: false,
                can_sample: true,
            }
        );
    }

    #[test]
    fn keeps_listing_order() {
        let r = BrowseResult::from_entities("/", vec![entity("z", false), entity("a", true)]);
        let names: Vec<_> = r.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["z", "a"]);
    }

    #[test]
    fn root_redirects_to_end_point() {
        let mut endpoint = Endpoint::new("http://h");
        assert_eq!(resolve_browse_path("/", &endpoint), "/");
        endpoint.end_point = "users".into();
        assert_eq!(resolve_browse_path("/", &endpoint), "/users");
        assert_eq!(resolve_browse_path("/data", &endpoint), "/data");
    }

    #[test]
    fn browse_fetches_normalized_url() {
        let stub = StubTransport::new().route(
            "http://h/x/",
            200,
            r#"[{"name":"dir1","isDir":true},{"name":"f.csv","isDir":false}]"#,
        );
        let r = browse(&stub, &Endpoint::new("http://h/"), "/x/").unwrap();
        assert_eq!(r.total_count, 2);
        assert_eq!(r.entries[1].full_path, "/x/f.csv");
        assert_eq!(stub.requested_urls(), ["http://h/x/"]);
    }

    #[test]
    fn browse_reports_decode_error() {
        let stub = StubTransport::new().route("http://h/x", 200, "not json");
        let err = browse(&stub, &Endpoint::new("http://h"), "x").unwrap_err();
        assert!(matches!(err, ConnectorError::Decode { .. }));
    }

    #[test]
    fn browse_reports_failure_status() {
        let stub = StubTransport::new().route("http://h/missing", 500, "Internal Server Error");
        let err = browse(&stub, &Endpoint::new("http://h"), "/missing").unwrap_err();
        assert!(matches!(
            err,
            ConnectorError::RemoteFailureStatus { status: 500, .. }
        ));
    }

    #[test]
    fn browse_reports_connectivity_error() {
        let stub = StubTransport::new();
        let err = browse(&stub, &Endpoint::new("http://h"), "/x").unwrap_err();
        assert!(matches!(err, ConnectorError::Connectivity { .. }));
    }
}
