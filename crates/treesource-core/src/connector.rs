//! The connector: test, browse, sample and generate specs against one endpoint.

use serde::Serialize;
use std::sync::Arc;

use crate::browse::{self, BrowseResult};
use crate::config::{Endpoint, SamplingConfig};
use crate::error::Result;
use crate::failure::{FailureCollector, ValidationFailure};
use crate::fetch::fetch;
use crate::http::{build_request, Transport};
use crate::sample::{sample_content, Sample, SAMPLE_DELIMITER};
use crate::schema::{from_delimited_header, is_delimited_file, Schema};
use crate::spec_gen::{build_spec, IngestSpec};
use crate::url_model::{join, with_trailing_separator};

/// Outcome of a connectivity test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectivityReport {
    pub success: bool,
    pub failures: Vec<ValidationFailure>,
}

impl ConnectivityReport {
    /// Human-readable failure text; `None` on success.
    pub fn message(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        Some(
            self.failures
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// One configured endpoint plus the shared transport.
///
/// All operations are independent of each other and safe to call
/// concurrently; each issues at most one request.
pub struct Connector {
    endpoint: Endpoint,
    transport: Arc<dyn Transport>,
    sampling: SamplingConfig,
}

impl Connector {
    pub fn new(mut endpoint: Endpoint, transport: Arc<dyn Transport>) -> Self {
        endpoint.base_url = with_trailing_separator(&endpoint.base_url);
        Self {
            endpoint,
            transport,
            sampling: SamplingConfig::default(),
        }
    }

    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn url_for(&self, path: &str) -> String {
        join(&self.endpoint.base_url, path)
    }

    fn is_delimited(&self, path: &str) -> bool {
        is_delimited_file(path, &self.sampling.delimited_suffix)
    }

    /// Validates the endpoint, then requests the endpoint path once.
    /// Never fails: problems are returned in the report.
    pub fn test(&self) -> ConnectivityReport {
        let mut collector = FailureCollector::new();
        self.endpoint.validate(&mut collector);

        if collector.is_empty() {
            let url = self.url_for(&self.endpoint.end_point);
            match self.transport.execute(&build_request(&url, &self.endpoint)) {
                Ok(response) if response.is_success() => {}
                Ok(response) => {
                    tracing::info!(
                        url = %url,
                        status = response.status,
                        "connectivity test failed"
                    );
                    let action = if self.endpoint.auth_enabled {
                        "Check BaseUrl, Endpoint and Auth"
                    } else {
                        "Check BaseUrl, Endpoint"
                    };
                    collector.add_failure("Request Failed", Some(action));
                }
                Err(e) => {
                    tracing::info!(url = %url, "connectivity test failed: {}", e);
                    collector.add_failure(e.to_string(), None);
                }
            }
        }

        let failures = collector.failures().to_vec();
        ConnectivityReport {
            success: failures.is_empty(),
            failures,
        }
    }

    pub fn browse(&self, path: &str) -> Result<BrowseResult> {
        browse::browse(self.transport.as_ref(), &self.endpoint, path)
    }

    /// Fetches `path` and returns at most the configured number of records.
    pub fn sample(&self, path: &str) -> Result<Sample> {
        let url = self.url_for(path);
        let response = fetch(self.transport.as_ref(), &self.endpoint, &url)?;
        let sample = sample_content(
            &response.text(),
            self.is_delimited(path),
            SAMPLE_DELIMITER,
            self.sampling.max_sample_records,
        );
        tracing::debug!(path, records = sample.records.len(), "sampled");
        Ok(sample)
    }

    /// Builds the ingest spec for `target_path`.
    ///
    /// `schema_hint` is used as is when given. Otherwise a delimited path is
    /// fetched once to infer its header schema; if that fetch fails the
    /// failure is recorded in `collector` and the returned spec has no schema.
    pub fn generate_spec(
        &self,
        target_path: &str,
        schema_hint: Option<Schema>,
        collector: &mut FailureCollector,
    ) -> IngestSpec {
        let schema = schema_hint.or_else(|| self.sniff_schema(target_path, collector));
        build_spec(target_path, schema)
    }

    fn sniff_schema(&self, path: &str, collector: &mut FailureCollector) -> Option<Schema> {
        if !self.is_delimited(path) {
            return None;
        }
        let url = self.url_for(path);
        match fetch(self.transport.as_ref(), &self.endpoint, &url) {
            Ok(response) => Some(from_delimited_header(&response.text(), SAMPLE_DELIMITER)),
            Err(e) => {
                tracing::warn!(path, "schema inference skipped: {}", e);
                collector.add_failure(e.to_string(), None);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConnectorError;
    use crate::http::AUTH_HEADER;
    use crate::record::Value;
    use crate::schema::{default_schema, Field};
    use crate::testing::StubTransport;

    fn connector(stub: StubTransport, endpoint: Endpoint) -> (Connector, Arc<StubTransport>) {
        let stub = Arc::new(stub);
        let transport: Arc<dyn Transport> = stub.clone();
        (Connector::new(endpoint, transport), stub)
    }

    #[test]
    fn base_url_gets_trailing_separator() {
        let (c, _) = connector(StubTransport::new(), Endpoint::new("http://h:3000"));
        assert_eq!(c.endpoint().base_url, "http://h:3000/");
    }

    #[test]
    fn test_succeeds_on_200() {
        let (c, stub) = connector(
            StubTransport::new().route("http://h/", 200, "[]"),
            Endpoint::new("http://h"),
        );
        let report = c.test();
        assert!(report.success);
        assert!(report.message().is_none());
        assert_eq!(stub.requested_urls(), ["http://h/"]);
    }

    #[test]
    fn test_requests_end_point() {
        let mut endpoint = Endpoint::new("http://h");
        endpoint.end_point = "users".into();
        let (c, stub) = connector(
            StubTransport::new().route("http://h/users", 200, "[]"),
            endpoint,
        );
        assert!(c.test().success);
        assert_eq!(stub.requested_urls(), ["http://h/users"]);
    }

    #[test]
    fn test_failure_status_without_auth() {
        let (c, _) = connector(
            StubTransport::new().route("http://h/", 500, ""),
            Endpoint::new("http://h"),
        );
        let report = c.test();
        assert!(!report.success);
        let message = report.message().unwrap();
        assert!(message.contains("BaseUrl, Endpoint"));
        assert!(!message.contains("Auth"));
    }

    #[test]
    fn test_failure_status_with_auth() {
        let (c, stub) = connector(
            StubTransport::new().route("http://h/", 401, ""),
            Endpoint::new("http://h").with_auth("Bearer", "k"),
        );
        let report = c.test();
        assert!(!report.success);
        assert!(report.message().unwrap().contains("BaseUrl, Endpoint and Auth"));
        assert_eq!(stub.requests()[0].header(AUTH_HEADER), Some("Bearer k"));
    }

    #[test]
    fn test_transport_error_is_reported() {
        let (c, _) = connector(StubTransport::new(), Endpoint::new("http://h"));
        let report = c.test();
        assert!(!report.success);
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_invalid_config_skips_request() {
        let (c, stub) = connector(StubTransport::new(), Endpoint::new("not a url"));
        let report = c.test();
        assert!(!report.success);
        assert!(stub.requests().is_empty());
    }

    #[test]
    fn sample_csv() {
        let (c, _) = connector(
            StubTransport::new().route("http://h/data/users.csv", 200, "id,name\n1,ann\n2,bob\n"),
            Endpoint::new("http://h"),
        );
        let s = c.sample("/data/users.csv").unwrap();
        assert_eq!(s.schema.len(), 2);
        assert_eq!(s.records.len(), 2);
        assert_eq!(s.records[0].get("name"), Some(&Value::Text("ann".into())));
    }

    #[test]
    fn sample_plain_file_uses_default_schema() {
        let (c, _) = connector(
            StubTransport::new().route("http://h/notes.txt", 200, "ab\ncd"),
            Endpoint::new("http://h"),
        );
        let s = c.sample("/notes.txt").unwrap();
        assert_eq!(*s.schema, default_schema());
        assert_eq!(s.records[1].get("offset"), Some(&Value::Integer(2)));
    }

    #[test]
    fn sample_respects_configured_cap() {
        let body: String = (0..50).map(|i| format!("{i}\n")).collect();
        let stub = StubTransport::new().route("http://h/n.txt", 200, &body);
        let (c, _) = connector(stub, Endpoint::new("http://h"));
        let c = c.with_sampling(SamplingConfig {
            max_sample_records: 5,
            ..SamplingConfig::default()
        });
        assert_eq!(c.sample("/n.txt").unwrap().records.len(), 5);
    }

    #[test]
    fn sample_failure_status_is_an_error_value() {
        let (c, _) = connector(
            StubTransport::new().route("http://h/gone.csv", 404, ""),
            Endpoint::new("http://h"),
        );
        assert!(matches!(
            c.sample("/gone.csv"),
            Err(ConnectorError::RemoteFailureStatus { status: 404, .. })
        ));
    }

    #[test]
    fn spec_for_csv_has_inferred_schema() {
        let (c, _) = connector(
            StubTransport::new().route("http://h/data/users.csv", 200, "id, name\n1,ann\n"),
            Endpoint::new("http://h"),
        );
        let mut collector = FailureCollector::new();
        let spec = c.generate_spec("/data/users.csv", None, &mut collector);
        assert!(collector.is_empty());
        assert_eq!(spec.properties["referenceName"], "users.csv");
        assert_eq!(spec.properties["filePath"], "/data/users.csv");
        assert_eq!(
            spec.schema,
            Some(Schema::new(vec![Field::text("id"), Field::text("name")]))
        );
    }

    #[test]
    fn spec_for_plain_file_makes_no_request() {
        let (c, stub) = connector(StubTransport::new(), Endpoint::new("http://h"));
        let mut collector = FailureCollector::new();
        let spec = c.generate_spec("/logs/app.log", None, &mut collector);
        assert!(spec.schema.is_none());
        assert!(stub.requests().is_empty());
    }

    #[test]
    fn spec_tolerates_sniff_failure() {
        let (c, _) = connector(StubTransport::new(), Endpoint::new("http://h"));
        let mut collector = FailureCollector::new();
        let spec = c.generate_spec("/data/users.csv", None, &mut collector);
        assert!(spec.schema.is_none());
        assert_eq!(spec.properties["referenceName"], "users.csv");
        assert_eq!(collector.failures().len(), 1);
    }

    #[test]
    fn spec_uses_schema_hint_without_fetching() {
        let (c, stub) = connector(StubTransport::new(), Endpoint::new("http://h"));
        let hint = Schema::new(vec![Field::text("only")]);
        let mut collector = FailureCollector::new();
        let spec = c.generate_spec("/data/users.csv", Some(hint.clone()), &mut collector);
        assert_eq!(spec.schema, Some(hint));
        assert!(stub.requests().is_empty());
    }
}
