use chrono::TimeZone;
use recipe_extract::{
    parse_tagged, run_pipeline_at, EntityTagger, ExtractError, QuantityValue, RequestParser,
    TokenTag, UrgencyClassifier,
};

struct StubTagger(Vec<TokenTag>);

impl EntityTagger for StubTagger {
    fn tag(&self, _text: &str) -> Result<Vec<TokenTag>, ExtractError> {
        Ok(self.0.clone())
    }
}

struct StubClassifier(&'static str);

impl UrgencyClassifier for StubClassifier {
    fn classify(&self, _text: &str) -> Result<String, ExtractError> {
        Ok(self.0.to_string())
    }
}

const SHOPPING_LIST: &str = "\u{2022} 200 g penne\n\u{2022} 2 tbsp olive oil";

/// Correct tags for [`SHOPPING_LIST`]; offsets are byte offsets, the bullet
/// glyph is three bytes wide.
fn shopping_list_tags() -> Vec<TokenTag> {
    vec![
        TokenTag::new(4, 7, "B-QTY"),
        TokenTag::new(8, 9, "B-UNIT"),
        TokenTag::new(10, 15, "B-INGREDIENT"),
        TokenTag::new(20, 21, "B-QTY"),
        TokenTag::new(22, 26, "B-UNIT"),
        TokenTag::new(27, 32, "B-INGREDIENT"),
        TokenTag::new(33, 36, "I-INGREDIENT"),
    ]
}

#[test]
fn test_shopping_list_scenario() {
    let result = parse_tagged(SHOPPING_LIST, &shopping_list_tags(), "flexible", "America/New_York")
        .unwrap();

    assert_eq!(result.ingredients.len(), 2);

    let penne = &result.ingredients[0];
    assert_eq!(penne.name, "penne");
    assert_eq!(penne.quantity, Some(QuantityValue::Number(200.0)));
    // the canonicalization table leaves `g` untouched
    assert_eq!(penne.unit.as_deref(), Some("g"));

    let oil = &result.ingredients[1];
    assert_eq!(oil.name, "olive oil");
    assert_eq!(oil.quantity, Some(QuantityValue::Number(2.0)));
    assert_eq!(oil.unit.as_deref(), Some("tbsp"));

    assert_eq!(result.urgency, "flexible");
    assert_eq!(result.meal_time, None);
}

#[test]
fn test_parser_with_stub_boundaries() {
    let parser = RequestParser::builder()
        .tagger(StubTagger(shopping_list_tags()))
        .classifier(StubClassifier("tonight"))
        .timezone("America/New_York")
        .build()
        .unwrap();

    let result = parser.parse(SHOPPING_LIST).unwrap();
    assert_eq!(result.ingredients.len(), 2);
    assert_eq!(result.urgency, "tonight");
    // the tonight bucket always yields a full instant with an offset
    let meal_time = result.meal_time.expect("tonight bucket resolves");
    assert!(chrono::DateTime::parse_from_rfc3339(&meal_time).is_ok());
}

#[test]
fn test_empty_input_is_refused() {
    let parser = RequestParser::builder()
        .tagger(StubTagger(vec![]))
        .classifier(StubClassifier("flexible"))
        .build()
        .unwrap();
    assert!(matches!(parser.parse("  \n "), Err(ExtractError::EmptyInput)));
    assert!(matches!(
        parse_tagged("", &[], "flexible", "America/New_York"),
        Err(ExtractError::EmptyInput)
    ));
}

#[test]
fn test_unknown_timezone_is_rejected() {
    assert!(matches!(
        parse_tagged("pasta", &[], "flexible", "Pasta/Land"),
        Err(ExtractError::InvalidTimezone(_))
    ));
}

#[test]
fn test_partial_tags_recovered_from_text() {
    // the tagger missed both quantities; recovery pulls them from the text
    let tags = vec![
        TokenTag::new(10, 15, "B-INGREDIENT"),
        TokenTag::new(27, 32, "B-INGREDIENT"),
        TokenTag::new(33, 36, "I-INGREDIENT"),
    ];
    let result = parse_tagged(SHOPPING_LIST, &tags, "flexible", "America/New_York").unwrap();
    assert_eq!(result.ingredients.len(), 2);
    assert_eq!(
        result.ingredients[0].quantity,
        Some(QuantityValue::Number(200.0))
    );
    assert_eq!(result.ingredients[0].unit.as_deref(), Some("g"));
    assert_eq!(
        result.ingredients[1].quantity,
        Some(QuantityValue::Number(2.0))
    );
    assert_eq!(result.ingredients[1].unit.as_deref(), Some("tbsp"));
}

#[test]
fn test_deterministic_meal_time_resolution() {
    let now = chrono_tz::America::New_York
        .with_ymd_and_hms(2026, 8, 25, 20, 0, 0)
        .unwrap();
    let result = run_pipeline_at(now, "pasta night", &[], "tonight").unwrap();
    // 20:00 is past the default dinner slot, so the bucket rolls a day
    assert_eq!(
        result.meal_time.as_deref(),
        Some(
            chrono_tz::America::New_York
                .with_ymd_and_hms(2026, 8, 26, 18, 0, 0)
                .unwrap()
                .to_rfc3339()
                .as_str()
        )
    );
}
