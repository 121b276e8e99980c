//! Listing payload: a JSON array of `{name, isDir}` objects.

use serde::Deserialize;

/// One child as reported by the tree server.
///
/// The reference file server sends `dir` instead of `isDir` and adds a `ref`
/// key; both spellings are accepted and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileEntity {
    pub name: String,
    #[serde(rename = "isDir", alias = "dir")]
    pub is_dir: bool,
}

pub(crate) fn decode_listing(payload: &[u8]) -> Result<Vec<FileEntity>, serde_json::Error> {
    serde_json::from_slice(payload)
}
