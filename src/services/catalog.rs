//! Endpoint catalog served at `GET /api`, built from the OpenAPI document.

use serde_json::{json, Map, Value};
use utoipa::openapi::{
    path::{Operation, ParameterIn},
    Content, OpenApi, RefOr,
};

const CATALOG_ROOT: &str = "/api";
const JSON_MIME: &str = "application/json";

pub fn endpoint_catalog(doc: &OpenApi) -> Map<String, Value> {
    let mut endpoints = Map::new();

    for (path, item) in doc.paths.paths.iter() {
        if !path.starts_with(CATALOG_ROOT) {
            continue;
        }
        let display = colon_params(path);
        let operations = [
            ("GET", &item.get),
            ("POST", &item.post),
            ("PUT", &item.put),
            ("PATCH", &item.patch),
            ("DELETE", &item.delete),
        ];
        for (verb, op) in operations {
            let Some(op) = op else { continue };
            let key = format!("{} {}", verb, display);
            let entry = if path == CATALOG_ROOT {
                json!({ "description": description(op) })
            } else {
                describe(op)
            };
            endpoints.insert(key, entry);
        }
    }

    endpoints
}

fn describe(op: &Operation) -> Value {
    let queries: Vec<&str> = op
        .parameters
        .iter()
        .flatten()
        .filter(|p| matches!(p.parameter_in, ParameterIn::Query))
        .map(|p| p.name.as_str())
        .collect();

    let request = op
        .request_body
        .as_ref()
        .and_then(|body| json_example(body.content.get(JSON_MIME)));

    let response = op
        .responses
        .responses
        .iter()
        .filter(|(status, _)| status.starts_with('2'))
        .find_map(|(_, resp)| match resp {
            RefOr::T(resp) => json_example(resp.content.get(JSON_MIME)),
            RefOr::Ref(_) => None,
        });

    json!({
        "description": description(op),
        "allowedQueries": queries,
        "exampleRequest": request.unwrap_or_else(|| json!({})),
        "exampleResponse": response.unwrap_or_else(|| json!({})),
    })
}

fn description(op: &Operation) -> String {
    op.summary
        .clone()
        .or_else(|| op.description.clone())
        .unwrap_or_default()
}

fn json_example(content: Option<&Content>) -> Option<Value> {
    content.and_then(|c| c.example.clone())
}

/// `/api/articles/{article_id}` -> `/api/articles/:article_id`
pub fn colon_params(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            match segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            {
                Some(name) => format!(":{}", name),
                None => segment.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
