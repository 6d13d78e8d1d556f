use crate::domain::{assemble_payload, resolve_cascade, FormInput, PropertyType, SelectionState};
use crate::errors::ServerError;
use crate::responses::{html_response, text_response, ResultResp};
use crate::state::AppState;
use crate::templates::pages::{home_page, prediction_result, FormVm};
use crate::templates::{geo_chain, subtype_field};
use astra::Request;
use std::collections::HashMap;
use std::io::Read;
use tracing::{info, warn};

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => form_page(state, &parse_query(&req)),
        ("GET", "/subtypes") => subtypes(&parse_query(&req)),
        ("GET", "/geo") => geo(state, &parse_query(&req)),
        ("POST", "/predict") => {
            let from_htmx = req.headers().contains_key("HX-Request");
            let params = parse_form_body(req)?;
            predict(state, &params, from_htmx)
        }
        ("GET", "/health") => text_response("ok"),
        _ => Err(ServerError::NotFound),
    }
}

fn form_page(state: &AppState, params: &HashMap<String, String>) -> ResultResp {
    let input = FormInput::from_params(params)?;
    let cascade = resolve_cascade(&state.reference, &input.geo)?;

    html_response(home_page(&FormVm {
        input: &input,
        options: &state.options,
        cascade: &cascade,
        result: None,
    }))
}

fn subtypes(params: &HashMap<String, String>) -> ResultResp {
    let raw = params.get("type").map(String::as_str).unwrap_or_default();
    let property_type = PropertyType::parse(raw)
        .ok_or_else(|| ServerError::BadRequest(format!("unknown property type `{raw}`")))?;

    html_response(subtype_field(property_type, property_type.default_subtype()))
}

fn geo(state: &AppState, params: &HashMap<String, String>) -> ResultResp {
    let requested = SelectionState::from_params(params);
    let cascade = resolve_cascade(&state.reference, &requested)?;
    html_response(geo_chain(&cascade))
}

fn predict(state: &AppState, params: &HashMap<String, String>, from_htmx: bool) -> ResultResp {
    let input = FormInput::from_params(params)?;
    let cascade = resolve_cascade(&state.reference, &input.geo)?;
    let record = assemble_payload(&input, &cascade.selection, state.payload);

    let outcome = state.predictor.predict(&record);
    match &outcome {
        Ok(prediction) => info!(
            strategy = state.predictor.name(),
            post_code = cascade.post_code().unwrap_or(""),
            %prediction,
            "prediction served"
        ),
        Err(err) => warn!(strategy = state.predictor.name(), error = %err, "prediction failed"),
    }

    let fragment = prediction_result(&outcome);
    if from_htmx {
        return html_response(fragment);
    }

    html_response(home_page(&FormVm {
        input: &input,
        options: &state.options,
        cascade: &cascade,
        result: Some(fragment),
    }))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn parse_form_body(req: Request) -> Result<HashMap<String, String>, ServerError> {
    let mut bytes = Vec::new();
    req.into_body()
        .reader()
        .read_to_end(&mut bytes)
        .map_err(|e| ServerError::BadRequest(format!("unreadable form body: {e}")))?;

    Ok(url::form_urlencoded::parse(&bytes).into_owned().collect())
}
