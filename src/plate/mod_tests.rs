use super::*;

fn standard(letter1: &str, digits: &str, letters: &str, region: &str) -> PlateRecord {
    PlateRecord::Standard(StandardPlate {
        letter1: letter1.to_string(),
        digits: digits.to_string(),
        letters: letters.to_string(),
        region: region.to_string(),
    })
}

fn trailer(letters: &str, digits: &str, region: &str) -> PlateRecord {
    PlateRecord::Trailer(TrailerPlate {
        trailer_letters: letters.to_string(),
        trailer_digits: digits.to_string(),
        region: region.to_string(),
    })
}

fn two_line(category: PlateCategory, digits: &str, letters: &str, region: &str) -> PlateRecord {
    let plate = TwoLinePlate {
        top_digits: digits.to_string(),
        bottom_letters: letters.to_string(),
        bottom_region: region.to_string(),
    };
    match category {
        PlateCategory::Tractor => PlateRecord::Tractor(plate),
        _ => PlateRecord::Motorcycle(plate),
    }
}

fn valid_samples() -> Vec<PlateRecord> {
    vec![
        standard("А", "123", "ВС", "77"),
        standard("Х", "001", "УТ", "777"),
        trailer("ММ", "9768", "77"),
        trailer("АВ", "0001", "199"),
        two_line(PlateCategory::Tractor, "1234", "АВ", "77"),
        two_line(PlateCategory::Motorcycle, "5678", "ВС", "150"),
    ]
}

#[test]
fn test_valid_records_have_no_errors() {
    for record in valid_samples() {
        let errors = validate(&record);
        assert!(errors.is_valid(), "{:?}: {}", record, errors.joined());
        assert_eq!(errors.len(), 0);
    }
}

#[test]
fn test_missing_field_is_reported_alone() {
    let cases = [
        (standard("", "123", "ВС", "77"), "letter1"),
        (standard("А", "", "ВС", "77"), "digits"),
        (standard("А", "123", "", "77"), "letters"),
        (standard("А", "123", "ВС", ""), "region"),
        (trailer("", "9768", "77"), "trailerLetters"),
        (trailer("ММ", "", "77"), "trailerDigits"),
        (trailer("ММ", "9768", ""), "region"),
        (two_line(PlateCategory::Tractor, "", "АВ", "77"), "topDigits"),
        (two_line(PlateCategory::Motorcycle, "1234", "", "77"), "bottomLetters"),
        (two_line(PlateCategory::Motorcycle, "1234", "АВ", ""), "bottomRegion"),
    ];

    for (record, field) in cases {
        let errors = validate(&record);
        assert_eq!(errors.len(), 1, "{:?}", record);
        assert!(errors.has_field(field), "expected error on {}", field);
    }
}

#[test]
fn test_errors_accumulate_without_short_circuit() {
    let record = standard("Б", "12", "ВСС", "0");
    let errors = validate(&record);
    assert_eq!(errors.len(), 4);
    for field in ["letter1", "digits", "letters", "region"] {
        assert!(errors.has_field(field));
    }
}

#[test]
fn test_zero_regions_rejected_for_every_category() {
    for region in ["00", "000"] {
        let records = [
            standard("А", "123", "ВС", region),
            trailer("ММ", "9768", region),
            two_line(PlateCategory::Tractor, "1234", "АВ", region),
            two_line(PlateCategory::Motorcycle, "1234", "АВ", region),
        ];
        for record in records {
            let errors = validate(&record);
            assert_eq!(errors.len(), 1);
            assert!(errors.joined().contains("нулей"));
        }
    }
}

#[test]
fn test_region_length_and_charset() {
    assert!(!validate(&standard("А", "123", "ВС", "7")).is_valid());
    assert!(!validate(&standard("А", "123", "ВС", "7777")).is_valid());
    let errors = validate(&standard("А", "123", "ВС", "7а"));
    assert!(errors.joined().contains("только цифры"));
}

#[test]
fn test_letters_outside_plate_alphabet() {
    // Latin A looks the same but is not allowed
    let errors = validate(&standard("A", "123", "ВС", "77"));
    assert!(errors.has_field("letter1"));

    let errors = validate(&trailer("МЯ", "9768", "77"));
    assert!(errors.joined().contains("Я"));
}

#[test]
fn test_lowercase_letters_rejected_by_validate() {
    let errors = validate(&standard("а", "123", "вс", "77"));
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_non_ascii_digits_rejected() {
    // Arabic-Indic digits
    let errors = validate(&standard("А", "١٢٣", "ВС", "77"));
    assert!(errors.has_field("digits"));
}

#[test]
fn test_canonicalize() {
    assert_eq!(canonicalize(&standard("А", "123", "ВС", "77")), "А123ВС77");
    assert_eq!(canonicalize(&trailer("ММ", "9768", "77")), "ММ976877");
    assert_eq!(
        canonicalize(&two_line(PlateCategory::Tractor, "1234", "АВ", "77")),
        "1234АВ77"
    );
}

#[test]
fn test_canonicalize_incomplete_is_empty() {
    assert_eq!(canonicalize(&standard("А", "123", "", "77")), "");
    assert_eq!(canonicalize(&PlateRecord::Trailer(TrailerPlate::default())), "");
}

#[test]
fn test_round_trip_all_categories() {
    for record in valid_samples() {
        let text = canonicalize(&record);
        let parsed = parse(&text, record.category());
        assert_eq!(parsed.as_ref(), Some(&record), "round trip of {}", text);
    }
}

#[test]
fn test_parse_strips_whitespace_and_uppercases() {
    let parsed = parse(" а 123 вс 77 ", PlateCategory::Standard);
    assert_eq!(parsed, Some(standard("А", "123", "ВС", "77")));
}

#[test]
fn test_parse_wrong_category_is_none() {
    assert_eq!(parse("А123ВС77", PlateCategory::Trailer), None);
    assert_eq!(parse("ММ976877", PlateCategory::Standard), None);
    assert_eq!(parse("", PlateCategory::Motorcycle), None);
    assert_eq!(parse("А123ВС", PlateCategory::Standard), None);
}

#[test]
fn test_parse_keeps_category_for_two_line_plates() {
    let tractor = parse("1234АВ77", PlateCategory::Tractor);
    let moto = parse("1234АВ77", PlateCategory::Motorcycle);
    assert_eq!(tractor.map(|r| r.category()), Some(PlateCategory::Tractor));
    assert_eq!(moto.map(|r| r.category()), Some(PlateCategory::Motorcycle));
}

#[test]
fn test_split_region_is_positional() {
    let text = split_region("A123BC77");
    assert_eq!(text.main, "A123BC");
    assert_eq!(text.region, "77");
    assert_eq!(text.to_string(), "A123BC77");

    let three = split_region("A123BC177");
    assert_eq!(three.main, "A123BC1");
    assert_eq!(three.region, "77");

    let short = split_region("7");
    assert_eq!(short.main, "");
    assert_eq!(short.region, "7");
}

#[test]
fn test_filters() {
    assert_eq!(filter_letters("аб1в"), "АВ");
    assert_eq!(filter_digits("a1-2 3"), "123");
}

#[test]
fn test_is_valid_region() {
    assert!(is_valid_region("77"));
    assert!(is_valid_region("799"));
    assert!(!is_valid_region("00"));
    assert!(!is_valid_region("1"));
    assert!(!is_valid_region("7a"));
}

#[test]
fn test_examples_parse_as_their_category() {
    for category in PlateCategory::ALL {
        let record = parse(example_for(category), category);
        assert!(record.is_some(), "{} example should parse", category);
        assert!(validate(&record.unwrap()).is_valid());
        assert!(!format_description(category).is_empty());
    }
}

#[test]
fn test_record_deserializes_from_form_json() {
    let json = r#"{"category":"trailer","trailerLetters":"ММ","trailerDigits":"9768","region":"77"}"#;
    let record: PlateRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record, trailer("ММ", "9768", "77"));

    let json = r#"{"category":"motorcycle","topDigits":"5678"}"#;
    let record: PlateRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.category(), PlateCategory::Motorcycle);
    assert_eq!(validate(&record).len(), 2);
}

#[test]
fn test_from_json_reports_missing_category() {
    let err = PlateRecord::from_json(&serde_json::json!({ "letter1": "А" })).unwrap_err();
    assert_eq!(err.field, "category");
    assert_eq!(err.message, "Не указана категория");

    let err = PlateRecord::from_json(&serde_json::json!({ "category": "" })).unwrap_err();
    assert_eq!(err.message, "Не указана категория");
}

#[test]
fn test_from_json_reports_unknown_category() {
    let err = PlateRecord::from_json(&serde_json::json!({ "category": "bus" })).unwrap_err();
    assert_eq!(err.field, "category");
    assert!(err.message.contains("Неизвестная категория"));
}

#[test]
fn test_from_json_reads_known_category() {
    let value = serde_json::json!({
        "category": "trailer",
        "trailerLetters": "ММ",
        "trailerDigits": "9768",
        "region": "77"
    });
    assert_eq!(PlateRecord::from_json(&value).unwrap(), trailer("ММ", "9768", "77"));
}
