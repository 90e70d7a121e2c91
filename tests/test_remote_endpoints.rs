use std::time::Duration;

use recipe_extract::taggers::{EntityTagger, UrgencyClassifier};
use recipe_extract::{
    ExtractError, QuantityValue, RemoteClassifier, RemoteTagger, RequestParser,
};

const TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn test_remote_tagger_parses_response() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/tag")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"tags": [
                {"start": 0, "end": 1, "tag": "B-QTY"},
                {"start": 2, "end": 6, "tag": "B-INGREDIENT"}
            ]}"#,
        )
        .create();

    let tagger = RemoteTagger::new(&server.url(), TIMEOUT).unwrap();
    let tags = tagger.tag("2 eggs").unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].tag, "B-QTY");
    assert_eq!((tags[1].start, tags[1].end), (2, 6));
}

#[test]
fn test_remote_tagger_propagates_server_errors() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/tag")
        .with_status(500)
        .with_body("model unavailable")
        .create();

    let tagger = RemoteTagger::new(&server.url(), TIMEOUT).unwrap();
    let result = tagger.tag("2 eggs");
    assert!(matches!(result, Err(ExtractError::Tagger(_))));
}

#[test]
fn test_remote_classifier_parses_response() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/classify")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"label": "tonight"}"#)
        .create();

    let classifier = RemoteClassifier::new(&server.url(), TIMEOUT).unwrap();
    assert_eq!(classifier.classify("pasta tonight").unwrap(), "tonight");
}

#[test]
fn test_remote_classifier_propagates_server_errors() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/classify")
        .with_status(503)
        .create();

    let classifier = RemoteClassifier::new(&server.url(), TIMEOUT).unwrap();
    assert!(matches!(
        classifier.classify("pasta"),
        Err(ExtractError::Classifier(_))
    ));
}

#[test]
fn test_full_parse_against_mock_endpoints() {
    let mut server = mockito::Server::new();
    let _tag_mock = server
        .mock("POST", "/tag")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"tags": [
                {"start": 5, "end": 8, "tag": "B-QTY"},
                {"start": 9, "end": 10, "tag": "B-UNIT"},
                {"start": 11, "end": 16, "tag": "B-INGREDIENT"}
            ]}"#,
        )
        .create();
    let _classify_mock = server
        .mock("POST", "/classify")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"label": "this_week"}"#)
        .create();

    let parser = RequestParser::builder()
        .tagger(RemoteTagger::new(&server.url(), TIMEOUT).unwrap())
        .classifier(RemoteClassifier::new(&server.url(), TIMEOUT).unwrap())
        .timezone("America/New_York")
        .build()
        .unwrap();

    let result = parser.parse("need 200 g penne").unwrap();
    assert_eq!(result.ingredients.len(), 1);
    assert_eq!(result.ingredients[0].name, "penne");
    assert_eq!(
        result.ingredients[0].quantity,
        Some(QuantityValue::Number(200.0))
    );
    assert_eq!(result.urgency, "this_week");
    // the weekly bucket resolves to a plain date
    assert_eq!(result.meal_time.map(|t| t.len()), Some(10));
}
