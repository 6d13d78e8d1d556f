use crate::domain::{FormOptions, PayloadOptions, PropertyRecord};
use crate::errors::{PredictError, ServerError};
use crate::predict::{Prediction, Predictor};
use crate::state::AppState;
use astra::{Body, Response};
use http::{Method, Request};
use polars::prelude::*;
use std::io::Read;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BRUSSELS: &str = "Région de Bruxelles-Capitale";
pub const WALLONIA: &str = "Région wallonne";
pub const FLANDERS: &str = "Région flamande";

/// Canonical reference table. Brussels has no province; Liège 4000 spans two
/// sub-municipalities.
pub fn reference_df() -> DataFrame {
    df!(
        "region" => &[
            Some(BRUSSELS), Some(BRUSSELS), Some(BRUSSELS),
            Some(WALLONIA), Some(WALLONIA), Some(WALLONIA), Some(WALLONIA), Some(WALLONIA),
            Some(FLANDERS),
        ],
        "province" => &[
            None, None, None,
            Some("Province de Namur"), Some("Province de Namur"), Some("Province de Namur"),
            Some("Province de Liège"), Some("Province de Liège"),
            Some("Province d'Anvers"),
        ],
        "arrondissement" => &[
            Some("Arrondissement de Bruxelles-Capitale"),
            Some("Arrondissement de Bruxelles-Capitale"),
            Some("Arrondissement de Bruxelles-Capitale"),
            Some("Arrondissement de Namur"), Some("Arrondissement de Namur"),
            Some("Arrondissement de Dinant"),
            Some("Arrondissement de Liège"), Some("Arrondissement de Liège"),
            Some("Arrondissement d'Anvers"),
        ],
        "municipality" => &[
            Some("Bruxelles"), Some("Bruxelles"), Some("Ixelles"),
            Some("Namur"), Some("Namur"), Some("Dinant"),
            Some("Liège"), Some("Liège"),
            Some("Anvers"),
        ],
        "subMunicipality" => &[
            Some("Bruxelles"), Some("Laeken"), Some("Ixelles"),
            Some("Namur"), Some("Jambes"), Some("Dinant"),
            Some("Liège"), Some("Glain"),
            Some("Anvers"),
        ],
        "postCode" => &[
            Some("1000"), Some("1020"), Some("1050"),
            Some("5000"), Some("5100"), Some("5500"),
            Some("4000"), Some("4000"),
            Some("2000"),
        ],
    )
    .expect("reference fixture")
}

/// A few cleaned listings, enough to populate every dropdown.
pub fn dataset_df() -> DataFrame {
    df!(
        "price" => &[Some(250_000.0), Some(410_000.0), None, Some(180_000.0)],
        "habitableSurface" => &[80.0, 160.0, 95.0, 60.0],
        "bedroomCount" => &[2i64, 4, 3, 1],
        "type" => &["APARTMENT", "HOUSE", "HOUSE", "APARTMENT"],
        "subtype" => &["APARTMENT", "VILLA", "HOUSE", "FLAT_STUDIO"],
        "province" => &[Some("Brussels"), Some("Namur"), None, Some("Brussels")],
        "postCode" => &[1000i64, 5000, 5100, 1000],
        "hasBasement" => &[0i64, 1, 1, 0],
        "buildingCondition" => &[Some("GOOD"), Some("AS_NEW"), None, Some("GOOD")],
        "heatingType" => &[Some("GAS"), Some("FUELOIL"), Some("GAS"), None],
        "epcScore" => &[Some("C"), Some("B"), Some("D"), Some("C")],
        "terraceOrientation" => &[Some("SOUTH"), None, Some("WEST"), None],
        "gardenOrientation" => &[None, Some("SOUTH"), Some("NORTH"), None],
        "floodZoneType" => &[
            Some("CIRCUMSCRIBED_FLOOD_ZONE"),
            Some("NON_FLOOD_ZONE"),
            Some("CIRCUMSCRIBED_WATERSIDE_ZONE"),
            None,
        ],
        "kitchenType" => &[Some("INSTALLED"), Some("HYPER_EQUIPPED"), None, Some("INSTALLED")],
    )
    .expect("dataset fixture")
}

/// Answers every request with a fixed prediction and keeps what it was sent.
#[derive(Clone)]
pub struct FakePredictor {
    pub answer: Prediction,
    pub options: PayloadOptions,
    pub seen: Arc<Mutex<Vec<PropertyRecord>>>,
}

impl FakePredictor {
    pub fn answering(answer: Prediction, options: PayloadOptions) -> Self {
        Self {
            answer,
            options,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn last_record(&self) -> PropertyRecord {
        self.seen
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("predictor was never called")
    }
}

impl Predictor for FakePredictor {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn payload_options(&self) -> PayloadOptions {
        self.options
    }

    fn predict(&self, record: &PropertyRecord) -> Result<Prediction, PredictError> {
        self.seen.lock().unwrap().push(record.clone());
        Ok(self.answer.clone())
    }
}

pub fn test_state(predictor: Box<dyn Predictor>) -> AppState {
    let options = FormOptions::from_dataset(&dataset_df()).expect("form options");
    let payload = predictor.payload_options();
    AppState::new(reference_df(), options, predictor, payload)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, form: &[(&str, &str)], htmx: bool) -> Request<Body> {
    let body: String = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form)
        .finish();

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if htmx {
        builder = builder.header("HX-Request", "true");
    }
    builder.body(Body::from(body)).unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

/// A mock prediction API on localhost. The runtime only drives the mock
/// server; blocking clients call `url` from the test thread.
pub struct MockEndpoint {
    pub runtime: Runtime,
    pub server: MockServer,
    pub url: String,
}

impl MockEndpoint {
    /// Answer every `POST /predict` with `template`.
    pub fn answering(template: ResponseTemplate) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/predict"))
                .respond_with(template)
                .mount(&server)
                .await;
            server
        });
        let url = format!("{}/predict", server.uri());
        Self { runtime, server, url }
    }

    /// JSON bodies of every request received so far.
    pub fn received_json(&self) -> Vec<serde_json::Value> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .iter()
            .map(|req| serde_json::from_slice(&req.body).unwrap())
            .collect()
    }
}

/// The error a request was rejected with. `Response` has no `Debug`, so
/// `unwrap_err` is not available on handler results.
pub fn rejection(result: Result<Response, ServerError>) -> ServerError {
    match result {
        Ok(resp) => panic!("expected an error, got status {}", resp.status()),
        Err(err) => err,
    }
}
