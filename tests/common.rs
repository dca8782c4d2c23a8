#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use policy_pdf_server::plate::{PlateRecord, StandardPlate};
use policy_pdf_server::policy::PolicySubmission;

/// One blank A4 page whose resources carry no fonts yet.
pub fn blank_template() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let content = Content {
        operations: vec![
            Operation::new("w", vec![Object::Real(0.5)]),
            Operation::new("m", vec![Object::Integer(40), Object::Integer(330)]),
            Operation::new("l", vec![Object::Integer(300), Object::Integer(330)]),
            Operation::new("S", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode template content"),
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {},
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(595),
            Object::Integer(842),
        ],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("save template");
    out
}

/// First page id of a PDF produced by the service.
pub fn first_page(doc: &Document) -> ObjectId {
    *doc.get_pages().get(&1).expect("document has a first page")
}

/// Every `Tj` string drawn on the first page with the `Td` position before it.
pub fn drawn_texts(pdf: &[u8]) -> Vec<(String, f32, f32)> {
    drawn_bytes(pdf)
        .into_iter()
        .map(|(bytes, x, y)| (String::from_utf8_lossy(&bytes).into_owned(), x, y))
        .collect()
}

/// Like [`drawn_texts`], but with the raw encoded `Tj` bytes.
pub fn drawn_bytes(pdf: &[u8]) -> Vec<(Vec<u8>, f32, f32)> {
    let doc = Document::load_mem(pdf).expect("output is a valid PDF");
    let page = first_page(&doc);
    let raw = doc.get_page_content(page).expect("page content");
    let content = Content::decode(&raw).expect("decodable content");

    let mut position = (0.0, 0.0);
    let mut texts = Vec::new();
    for op in content.operations {
        match op.operator.as_str() {
            "Td" => {
                position = (
                    op.operands[0].as_float().unwrap(),
                    op.operands[1].as_float().unwrap(),
                );
            }
            "Tj" => {
                if let Object::String(bytes, _) = &op.operands[0] {
                    texts.push((bytes.clone(), position.0, position.1));
                }
            }
            _ => {}
        }
    }
    texts
}

pub fn sample_submission() -> PolicySubmission {
    PolicySubmission {
        fio: "Иванов Иван".to_string(),
        address: "г. Москва".to_string(),
        date_start: "01.01.2025".to_string(),
        date_end: "01.02.2025".to_string(),
        license_plate: Some(PlateRecord::Standard(StandardPlate {
            letter1: "А".to_string(),
            digits: "123".to_string(),
            letters: "ВС".to_string(),
            region: "77".to_string(),
        })),
        vehicle_type: "A".to_string(),
        brand_model: "Toyota Camry".to_string(),
        ..PolicySubmission::default()
    }
}
