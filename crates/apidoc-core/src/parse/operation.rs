use serde_json::{Map, Value};

use super::parameter::{Parameter, parameter_list};
use super::request_body::RequestBody;
use super::response::Response;
use super::{non_empty_text, scalar_text};

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Match a path item key against the method set, ignoring case.
    pub fn parse(key: &str) -> Option<Self> {
        match key.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            "PATCH" => Some(HttpMethod::Patch),
            "OPTIONS" => Some(HttpMethod::Options),
            "HEAD" => Some(HttpMethod::Head),
            "TRACE" => Some(HttpMethod::Trace),
            _ => None,
        }
    }
}

/// A path item, containing operations keyed by HTTP method.
#[derive(Debug, Clone, Copy)]
pub struct PathItem<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> PathItem<'a> {
    pub(crate) fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// Parameters shared by every operation on this path.
    pub fn parameters(&self) -> Vec<Parameter<'a>> {
        parameter_list(self.map.get("parameters"))
    }

    /// Operations in document order. Keys outside the method set (`summary`,
    /// `parameters`, extensions) and non-mapping values are skipped.
    pub fn operations(&self) -> Vec<(HttpMethod, Operation<'a>)> {
        self.map
            .iter()
            .filter_map(|(key, value)| {
                let method = HttpMethod::parse(key)?;
                let map = value.as_object()?;
                Some((method, Operation { map }))
            })
            .collect()
    }
}

/// An API operation.
#[derive(Debug, Clone, Copy)]
pub struct Operation<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Operation<'a> {
    pub fn operation_id(&self) -> Option<String> {
        self.map.get("operationId").map(scalar_text)
    }

    pub fn summary(&self) -> Option<String> {
        non_empty_text(self.map, "summary")
    }

    pub fn description(&self) -> Option<String> {
        non_empty_text(self.map, "description")
    }

    /// Tags in declared order; a non-list `tags` value reads as no tags.
    pub fn tags(&self) -> Vec<String> {
        self.map
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().map(scalar_text).collect())
            .unwrap_or_default()
    }

    pub fn parameters(&self) -> Vec<Parameter<'a>> {
        parameter_list(self.map.get("parameters"))
    }

    pub fn request_body(&self) -> Option<RequestBody<'a>> {
        self.map.get("requestBody").and_then(RequestBody::from_value)
    }

    /// Responses keyed by status code. `None` when `responses` is missing or
    /// not a mapping; entries that are not mappings are dropped.
    pub fn responses(&self) -> Option<Vec<(&'a str, Response<'a>)>> {
        let responses = self.map.get("responses")?.as_object()?;
        Some(
            responses
                .iter()
                .filter_map(|(status, value)| {
                    Response::from_value(value).map(|r| (status.as_str(), r))
                })
                .collect(),
        )
    }
}
