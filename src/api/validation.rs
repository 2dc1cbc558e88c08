use actix_web::HttpResponse;

use crate::error::ErrorResponse;

/// Translate a validator/deserialization failure into the standard 400
/// response body used across the project.
fn validation_error_response(err: &actix_web_validator::Error) -> actix_web::Error {
    let mut fields = serde_json::Map::new();

    match err {
        actix_web_validator::Error::Validate(validation_errors) => {
            for (field, errors) in validation_errors.field_errors() {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Validation error in field: {}", field))
                    })
                    .collect();
                fields.insert(
                    field.to_string(),
                    serde_json::json!({"errors": messages}),
                );
            }
        }
        actix_web_validator::Error::Deserialize(de_err) => {
            let err_string = de_err.to_string();

            let message = if err_string.contains("EOF while parsing") {
                "Request body is empty. Expected JSON payload".to_string()
            } else if err_string.contains("unknown field") {
                // Unknown keys are rejected rather than silently ignored:
                // a filter or patch field we do not recognize is a caller error.
                format!("Unknown field: {}", err_string)
            } else {
                format!("Malformed request: {}", err_string)
            };
            fields.insert("message".to_string(), serde_json::json!(message));
        }
        _ => {
            fields.insert(
                "message".to_string(),
                serde_json::json!("Request validation failed"),
            );
        }
    }

    let error_response = ErrorResponse {
        error: "Validation failed".to_string(),
        fields: serde_json::Value::Object(fields),
    };
    actix_web::error::InternalError::from_response(
        "",
        HttpResponse::BadRequest().json(error_response),
    )
    .into()
}

/// JsonConfig with standardized 400 error handling for all JSON bodies.
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default()
        .error_handler(|err, _req| validation_error_response(&err))
}

/// QueryConfig with the same error handling for query strings, so an
/// unknown filter key or an out-of-range value also yields a 400.
pub fn query_config() -> actix_web_validator::QueryConfig {
    actix_web_validator::QueryConfig::default()
        .error_handler(|err, _req| validation_error_response(&err))
}
