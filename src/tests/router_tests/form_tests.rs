// src/tests/router_tests/form_tests.rs

use crate::domain::PayloadOptions;
use crate::predict::Prediction;
use crate::errors::ServerError;
use crate::router::handle;
use crate::state::AppState;
use crate::tests::utils::{
    body_string, get, rejection, test_state, FakePredictor, BRUSSELS, FLANDERS, WALLONIA,
};
use scraper::{Html, Selector};

fn state() -> AppState {
    test_state(Box::new(FakePredictor::answering(
        Prediction::Price(1.0),
        PayloadOptions::local(),
    )))
}

fn option_values(doc: &Html, select_name: &str) -> Vec<String> {
    let selector = Selector::parse(&format!("select[name=\"{select_name}\"] option")).unwrap();
    doc.select(&selector)
        .filter_map(|o| o.value().attr("value"))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn selected_value(doc: &Html, select_name: &str) -> Option<String> {
    let selector =
        Selector::parse(&format!("select[name=\"{select_name}\"] option[selected]")).unwrap();
    doc.select(&selector)
        .next()
        .and_then(|o| o.value().attr("value"))
        .map(str::to_string)
}

#[test]
fn home_renders_the_full_form() {
    let state = state();
    let resp = handle(get("/"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let doc = Html::parse_document(&body_string(resp));

    assert_eq!(option_values(&doc, "region"), vec![BRUSSELS, FLANDERS, WALLONIA]);
    assert_eq!(option_values(&doc, "heatingType"), vec!["FUELOIL", "GAS"]);
    assert_eq!(selected_value(&doc, "subtype").as_deref(), Some("APARTMENT"));
    assert_eq!(
        selected_value(&doc, "floodZoneType").as_deref(),
        Some("NON_FLOOD_ZONE")
    );

    // No region picked yet, so every province is offered.
    assert!(option_values(&doc, "province").len() > 1);

    let form = Selector::parse("form[hx-post=\"/predict\"]").unwrap();
    assert!(doc.select(&form).next().is_some());

    let numbers = Selector::parse("input[type=\"number\"]").unwrap();
    assert_eq!(doc.select(&numbers).count(), 11);

    let bedrooms = Selector::parse("input[name=\"bedroomCount\"]").unwrap();
    let bedrooms = doc.select(&bedrooms).next().unwrap();
    assert_eq!(bedrooms.value().attr("min"), Some("0"));
    assert_eq!(bedrooms.value().attr("max"), Some("10"));
    assert_eq!(bedrooms.value().attr("value"), Some("2"));

    let flags = Selector::parse("input[type=\"checkbox\"]").unwrap();
    assert_eq!(doc.select(&flags).count(), 3);
}

#[test]
fn flood_zone_labels_are_humanized() {
    let state = state();
    let body = body_string(handle(get("/"), &state).unwrap());
    assert!(body.contains("NON FLOOD ZONE"));
    assert!(body.contains("value=\"NON_FLOOD_ZONE\""));
}

#[test]
fn subtypes_follow_the_type() {
    let state = state();
    let resp = handle(get("/subtypes?type=HOUSE"), &state).unwrap();
    let doc = Html::parse_fragment(&body_string(resp));

    let values = option_values(&doc, "subtype");
    assert_eq!(values.len(), 14);
    assert!(values.contains(&"VILLA".to_string()));
    assert!(!values.contains(&"FLAT_STUDIO".to_string()));
    assert_eq!(selected_value(&doc, "subtype").as_deref(), Some("HOUSE"));

    let wrapper = Selector::parse("div#subtype-field").unwrap();
    assert!(doc.select(&wrapper).next().is_some());
}

#[test]
fn unknown_type_is_a_bad_request() {
    let state = state();
    let err = rejection(handle(get("/subtypes?type=BOAT"), &state));
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn geo_fragment_narrows_and_skips_levels() {
    let state = state();
    let uri = format!(
        "/geo?region={}&municipality=Bruxelles",
        url::form_urlencoded::byte_serialize(BRUSSELS.as_bytes()).collect::<String>()
    );
    let resp = handle(get(&uri), &state).unwrap();
    let body = body_string(resp);
    let doc = Html::parse_fragment(&body);

    // No province in Brussels.
    let province = Selector::parse("select[name=\"province\"]").unwrap();
    assert!(doc.select(&province).next().is_none());

    // Single arrondissement, shown fixed.
    assert_eq!(
        option_values(&doc, "arrondissement"),
        vec!["Arrondissement de Bruxelles-Capitale"]
    );
    assert!(body.contains("Only option"));

    assert_eq!(option_values(&doc, "subMunicipality"), vec!["Bruxelles", "Laeken"]);
    assert_eq!(option_values(&doc, "postCode"), vec!["1000", "1020"]);

    let chain = Selector::parse("div#geo-chain[hx-get=\"/geo\"]").unwrap();
    assert!(doc.select(&chain).next().is_some());
}

#[test]
fn geo_fragment_drops_stale_selection() {
    let state = state();
    let uri = format!(
        "/geo?region={}&municipality=Ixelles",
        url::form_urlencoded::byte_serialize(WALLONIA.as_bytes()).collect::<String>()
    );
    let doc = Html::parse_fragment(&body_string(handle(get(&uri), &state).unwrap()));

    assert_eq!(selected_value(&doc, "region").as_deref(), Some(WALLONIA));
    assert!(!option_values(&doc, "municipality").contains(&"Ixelles".to_string()));
    assert_eq!(selected_value(&doc, "municipality").as_deref(), Some(""));
}

#[test]
fn health_and_unknown_routes() {
    let state = state();
    let resp = handle(get("/health"), &state).unwrap();
    assert_eq!(body_string(resp), "ok");

    let err = rejection(handle(get("/admin"), &state));
    assert!(matches!(err, ServerError::NotFound));
}
