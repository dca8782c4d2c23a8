mod common;

use std::sync::Arc;

use policy_pdf_server::document::{
    BytesTemplateSource, DocumentError, DocumentField, FileTemplateSource, Generator,
    PolicyDocumentGenerator,
};

use common::{blank_template, drawn_bytes, drawn_texts, sample_submission};

fn generator_for(template: Vec<u8>) -> PolicyDocumentGenerator {
    PolicyDocumentGenerator::new(Arc::new(BytesTemplateSource::new(template)))
}

#[test]
fn test_fills_first_page_of_template() {
    let request = sample_submission().into_request().unwrap();
    let document = generator_for(blank_template()).generate(&request).unwrap();

    assert!(document.pdf.starts_with(b"%PDF"));
    assert!(document.filename.starts_with("policy_"));
    assert!(document.filename.ends_with(".pdf"));
    assert_eq!(document.filename.len(), "policy_".len() + 15 + ".pdf".len());

    let texts = drawn_texts(&document.pdf);
    let find = |text: &str| {
        texts
            .iter()
            .find(|(t, _, _)| t == text)
            .unwrap_or_else(|| panic!("{text} not drawn, got {texts:?}"))
            .clone()
    };

    assert_eq!(find("IVANOV IVAN"), ("IVANOV IVAN".to_string(), 45.0, 340.0));
    assert_eq!(find("G. MOSKVA"), ("G. MOSKVA".to_string(), 45.0, 332.0));
    assert_eq!(find("A123BC77"), ("A123BC77".to_string(), 150.0, 535.0));
    assert_eq!(find("2025").2, 615.0);

    let (_, brand_x, brand_y) = find("TOYOTA CAMRY");
    assert_eq!(brand_y, 535.0);
    assert!(brand_x > 430.0 && brand_x < 485.0, "brand x {brand_x}");

    // day, month, year for both dates
    let date_row: Vec<_> = texts.iter().filter(|(_, _, y)| *y == 615.0).collect();
    assert_eq!(date_row.len(), 6);
    assert_eq!(document.text_of(DocumentField::StartMonth), Some("01"));
    assert_eq!(document.text_of(DocumentField::EndMonth), Some("02"));
}

#[test]
fn test_brand_with_caron_keeps_its_glyph() {
    let mut submission = sample_submission();
    submission.brand_model = "Škoda Octavia".to_string();
    let request = submission.into_request().unwrap();
    let document = generator_for(blank_template()).generate(&request).unwrap();

    assert_eq!(document.text_of(DocumentField::BrandModel), Some("ŠKODA OCTAVIA"));
    let brand: Vec<_> = drawn_bytes(&document.pdf)
        .into_iter()
        .filter(|(_, _, y)| *y == 535.0)
        .map(|(bytes, _, _)| bytes)
        .filter(|bytes| bytes.ends_with(b"OCTAVIA"))
        .collect();
    assert_eq!(brand, vec![b"\x8aKODA OCTAVIA".to_vec()]);
}

#[test]
fn test_overlay_font_is_registered() {
    let request = sample_submission().into_request().unwrap();
    let document = generator_for(blank_template()).generate(&request).unwrap();

    let raw = String::from_utf8_lossy(&document.pdf);
    assert!(raw.contains("/Times-Roman"));
    assert!(raw.contains("/FPolicyTR"));
    assert!(raw.contains("/WinAnsiEncoding"));
}

#[test]
fn test_each_call_uses_a_fresh_template() {
    let request = sample_submission().into_request().unwrap();
    let generator = generator_for(blank_template());

    let first = generator.generate(&request).unwrap();
    let second = generator.generate(&request).unwrap();
    assert_eq!(drawn_texts(&first.pdf).len(), drawn_texts(&second.pdf).len());
}

#[test]
fn test_bundled_template_is_fillable() {
    let request = sample_submission().into_request().unwrap();
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/static/policy_template.pdf");
    let generator = PolicyDocumentGenerator::new(Arc::new(FileTemplateSource::new(path)));

    let document = generator.generate(&request).unwrap();
    assert!(drawn_texts(&document.pdf)
        .iter()
        .any(|(t, _, _)| t == "IVANOV IVAN"));
}

#[test]
fn test_missing_template_file() {
    let request = sample_submission().into_request().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let source = FileTemplateSource::new(dir.path().join("absent.pdf"));
    let generator = PolicyDocumentGenerator::new(Arc::new(source));

    assert!(matches!(
        generator.generate(&request),
        Err(DocumentError::TemplateNotFound(_))
    ));
}

#[test]
fn test_unparseable_template() {
    let request = sample_submission().into_request().unwrap();
    let generator = generator_for(b"definitely not a pdf".to_vec());

    assert!(matches!(
        generator.generate(&request),
        Err(DocumentError::TemplateLoad(_))
    ));
}
