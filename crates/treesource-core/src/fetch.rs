//! Single GET against the tree server with failure statuses surfaced as errors.

use crate::config::Endpoint;
use crate::error::{ConnectorError, Result};
use crate::http::{build_request, Response, Transport};

/// Fetches `url` once. Transport failures become `Connectivity`, non-2xx
/// statuses become `RemoteFailureStatus`.
pub(crate) fn fetch(transport: &dyn Transport, endpoint: &Endpoint, url: &str) -> Result<Response> {
    let request = build_request(url, endpoint);
    let response = transport
        .execute(&request)
        .map_err(|source| ConnectorError::Connectivity {
            url: url.to_string(),
            source,
        })?;
    if !response.is_success() {
        return Err(ConnectorError::RemoteFailureStatus {
            url: url.to_string(),
            status: response.status,
        });
    }
    Ok(response)
}
