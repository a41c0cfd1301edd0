use crate::document::{Column, DocumentBuilder, Table};
use crate::parse::media_type::{MediaExamples, MediaType};
use crate::parse::operation::{HttpMethod, Operation, PathItem};
use crate::parse::parameter::{Parameter, merge_parameters};
use crate::parse::request_body::RequestBody;
use crate::parse::response::{Response, ResponseBody};
use crate::render::{format_schema, json_block};

use super::writer::Writer;

/// Render every operation of one path item.
pub(super) fn write_path<D: DocumentBuilder>(w: &mut Writer<'_, D>, path: &str, item: &PathItem) {
    let shared = item.parameters();
    for (method, op) in item.operations() {
        log::debug!("rendering {} {path}", method.as_str());
        write_operation(w, method, path, &op, &shared);
    }
}

fn write_operation<D: DocumentBuilder>(
    w: &mut Writer<'_, D>,
    method: HttpMethod,
    path: &str,
    op: &Operation,
    shared: &[Parameter],
) {
    let endpoint = format!("{} {path}", method.as_str());
    w.heading(&endpoint, 2);

    let operation_id = op.operation_id();
    w.italic(&format!(
        "Operation ID: {}",
        operation_id.as_deref().unwrap_or("N/A")
    ));
    let tags = op.tags();
    if !tags.is_empty() {
        w.italic(&format!("Tags: {}", tags.join(", ")));
    }
    if let Some(summary) = op.summary() {
        w.bold(&summary);
    }
    if let Some(description) = op.description() {
        w.plain(&description);
    }

    let parameters = merge_parameters(shared, &op.parameters());
    if !parameters.is_empty() {
        w.heading("Parameters", 3);
        w.table(&parameters_table(&parameters), "parameters", &endpoint);
    }

    if let Some(body) = op.request_body() {
        write_request_body(w, &body);
    }

    if let Some(responses) = op.responses() {
        w.heading("Responses", 3);
        w.table(&responses_table(&responses), "responses", &endpoint);
    }
}

fn parameters_table(parameters: &[Parameter]) -> Table {
    let mut table = Table::new(vec![
        Column::new("Name", 1.2),
        Column::new("In", 0.6),
        Column::new("Required", 0.8),
        Column::new("Description", 2.5),
        Column::new("Schema / Type", 3.0),
    ]);
    for param in parameters {
        let schema_text = match param.schema() {
            Some(schema) => format_schema(schema, 0).join("\n"),
            None => param.legacy_type().unwrap_or_else(|| "N/A".to_string()),
        };
        table.push_row(vec![
            param.name(),
            param.location(),
            param.required(),
            param.description().unwrap_or_default(),
            schema_text,
        ]);
    }
    table
}

fn write_request_body<D: DocumentBuilder>(w: &mut Writer<'_, D>, body: &RequestBody) {
    w.heading("Request Body", 3);
    w.plain(&format!("Required: {}", body.required()));
    if let Some(description) = body.description() {
        w.plain(&format!("Description: {description}"));
    }
    for (media, spec) in body.content() {
        write_media_type(w, media, &spec);
    }
}

fn write_media_type<D: DocumentBuilder>(w: &mut Writer<'_, D>, media: &str, spec: &MediaType) {
    w.bold(&format!("Content-Type: {media}"));
    if let Some(schema) = spec.schema() {
        w.code_block(&format_schema(schema, 0).join("\n"));
    }
    match spec.examples() {
        Some(MediaExamples::Named(examples)) => {
            w.bold("Examples:");
            for (name, value) in examples {
                w.plain(&format!("- {name}:"));
                w.code_block(&json_block(value));
            }
        }
        Some(MediaExamples::Single(value)) => {
            w.bold("Example:");
            w.code_block(&json_block(value));
        }
        None => {}
    }
}

fn responses_table(responses: &[(&str, Response)]) -> Table {
    let mut table = Table::new(vec![
        Column::new("Status Code", 1.0),
        Column::new("Description", 2.5),
        Column::new("Content / Schema", 4.0),
    ]);
    for (status, response) in responses {
        let mut content: Vec<String> = Vec::new();
        match response.body() {
            ResponseBody::Content(media_types) => {
                for (media, spec) in media_types {
                    content.push(format!("Content-Type: {media}"));
                    if let Some(schema) = spec.schema() {
                        content.extend(
                            format_schema(schema, 0)
                                .into_iter()
                                .map(|line| format!("  {line}")),
                        );
                    }
                }
            }
            ResponseBody::LegacySchema(schema) => content.extend(format_schema(schema, 0)),
            ResponseBody::None => {}
        }
        table.push_row(vec![
            status.to_string(),
            response.description().unwrap_or_default(),
            content.join("\n"),
        ]);
    }
    table
}
