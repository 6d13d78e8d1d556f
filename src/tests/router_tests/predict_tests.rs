// src/tests/router_tests/predict_tests.rs

use crate::domain::{FeatureValue, PayloadOptions};
use crate::errors::ServerError;
use crate::predict::{LocalModelPredictor, Prediction};
use crate::router::handle;
use crate::tests::utils::{
    body_string, post_form, rejection, test_state, FakePredictor, BRUSSELS, WALLONIA,
};
use scraper::{Html, Selector};

const STUDIO: [(&str, &str); 10] = [
    ("type", "APARTMENT"),
    ("subtype", "FLAT_STUDIO"),
    ("region", BRUSSELS),
    ("municipality", "Bruxelles"),
    ("subMunicipality", "Bruxelles"),
    ("bedroomCount", "2"),
    ("habitableSurface", "50"),
    ("buildingConstructionYear", "2024"),
    ("floodZoneType", "NON_FLOOD_ZONE"),
    ("heatingType", ""),
];

#[test]
fn htmx_submission_returns_the_result_fragment() {
    let fake = FakePredictor::answering(Prediction::Price(250_000.5), PayloadOptions::remote());
    let state = test_state(Box::new(fake.clone()));

    let resp = handle(post_form("/predict", &STUDIO, true), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Predicted price is 250000.50€"));
    assert!(body.contains("alert-success"));
    assert!(!body.contains("<form"));

    let record = fake.last_record();
    assert_eq!(record.get("postCode"), Some(&FeatureValue::Integer(1000)));
    assert_eq!(record.get("subtype"), Some(&FeatureValue::Text("FLAT_STUDIO".into())));
    assert_eq!(record.get("hasBasement"), Some(&FeatureValue::Integer(0)));
    assert_eq!(record.get("heatingType"), Some(&FeatureValue::Text(String::new())));
    assert_eq!(
        record.get("floodZoneType"),
        Some(&FeatureValue::Text("NON_FLOOD_ZONE".into()))
    );
}

#[test]
fn plain_submission_re_renders_the_page_with_the_result() {
    let fake = FakePredictor::answering(Prediction::Message("no data".into()), PayloadOptions::local());
    let state = test_state(Box::new(fake));

    let body = body_string(handle(post_form("/predict", &STUDIO, false), &state).unwrap());
    let doc = Html::parse_document(&body);

    let result = Selector::parse("#prediction .alert").unwrap();
    let alert = doc.select(&result).next().unwrap();
    assert_eq!(alert.text().collect::<String>(), "no data");

    // The user's picks survive the round trip.
    let sub = Selector::parse("select[name=\"subMunicipality\"] option[selected]").unwrap();
    assert_eq!(
        doc.select(&sub).next().and_then(|o| o.value().attr("value")),
        Some("Bruxelles")
    );
}

#[test]
fn checked_boxes_become_ones() {
    let fake = FakePredictor::answering(Prediction::Price(1.0), PayloadOptions::local());
    let state = test_state(Box::new(fake.clone()));

    let mut form = STUDIO.to_vec();
    form.push(("hasTerrace", "on"));
    form.push(("hasSwimmingPool", "on"));
    handle(post_form("/predict", &form, true), &state).unwrap();

    let record = fake.last_record();
    assert_eq!(record.get("hasTerrace"), Some(&FeatureValue::Integer(1)));
    assert_eq!(record.get("hasSwimmingPool"), Some(&FeatureValue::Integer(1)));
    assert_eq!(record.get("hasBasement"), Some(&FeatureValue::Integer(0)));
}

#[test]
fn unresolved_location_sends_no_post_code() {
    let fake = FakePredictor::answering(Prediction::Price(1.0), PayloadOptions::local());
    let state = test_state(Box::new(fake.clone()));

    handle(post_form("/predict", &[("region", WALLONIA)], true), &state).unwrap();

    let record = fake.last_record();
    assert_eq!(record.get("postCode"), Some(&FeatureValue::Missing));
    assert_eq!(record.get("province"), Some(&FeatureValue::Missing));
}

#[test]
fn missing_model_is_reported_inline() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(Box::new(LocalModelPredictor::new(dir.path().join("model.json"))));

    let resp = handle(post_form("/predict", &STUDIO, true), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("alert-error"));
    assert!(body.contains("Model file not found. Please train the model first."));
}

#[test]
fn out_of_range_input_is_rejected_before_predicting() {
    let fake = FakePredictor::answering(Prediction::Price(1.0), PayloadOptions::local());
    let state = test_state(Box::new(fake.clone()));

    let mut form = STUDIO.to_vec();
    form.push(("habitableSurface", "501"));

    let err = rejection(handle(post_form("/predict", &form, true), &state));
    assert!(matches!(err, ServerError::BadRequest(_)));
    assert!(fake.seen.lock().unwrap().is_empty());
}

#[test]
fn subtype_from_the_previous_type_falls_back_to_the_default() {
    let fake = FakePredictor::answering(Prediction::Price(1.0), PayloadOptions::remote());
    let state = test_state(Box::new(fake.clone()));

    let mut form = STUDIO.to_vec();
    form[0] = ("type", "HOUSE");

    let resp = handle(post_form("/predict", &form, false), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let record = fake.last_record();
    assert_eq!(record.get("type"), Some(&FeatureValue::Text("HOUSE".into())));
    assert_eq!(record.get("subtype"), Some(&FeatureValue::Text("HOUSE".into())));
}
