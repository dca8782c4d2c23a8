//! Policy document assembly.
//!
//! Order of work for one request: transliterate and uppercase the free-text
//! fields, transliterate the plate letters and split the compact plate,
//! slice both dates, then draw everything on the first page of a fresh copy
//! of the template and serialize it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use super::engine::{DocumentCanvas, PdfEngine, RenderEngine};
use super::layout::{placement_for, slice_date, DocumentField};
use super::template::TemplateSource;
use super::traits::Generator;
use super::{DocumentError, GeneratedDocument};
use crate::plate::{canonicalize, split_region};
use crate::policy::models::PolicyRequest;
use crate::transliteration::{transliterate, transliterate_upper, PLATE_GLYPHS};

/// All text is drawn on the first page of the template.
const TARGET_PAGE: usize = 0;

/// A text drawn on the page and where it went.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    pub field: DocumentField,
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Output filename for a document assembled at `at`: `policy_` followed by
/// the first 15 digits of the UTC timestamp (date, time, tenths of a second).
pub fn policy_filename(at: DateTime<Utc>) -> String {
    let digits: String = at
        .format("%Y%m%d%H%M%S%3f")
        .to_string()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(15)
        .collect();
    format!("policy_{}.pdf", digits)
}

/// Texts for every document field, before placement.
pub fn compose_fields(request: &PolicyRequest) -> Vec<(DocumentField, String)> {
    let plate_letters = request
        .plate
        .map_letters(|letters| transliterate(letters, &PLATE_GLYPHS));
    let plate = split_region(&canonicalize(&plate_letters));

    let start = slice_date(&request.date_start);
    let end = slice_date(&request.date_end);

    vec![
        (DocumentField::Name, transliterate_upper(&request.fio)),
        (DocumentField::Address, transliterate_upper(&request.address)),
        (DocumentField::StartDay, start.day),
        (DocumentField::StartMonth, start.month),
        (DocumentField::StartYear, start.year),
        (DocumentField::EndDay, end.day),
        (DocumentField::EndMonth, end.month),
        (DocumentField::EndYear, end.year),
        (DocumentField::Plate, plate.to_string()),
        (
            DocumentField::VehicleType,
            request.vehicle_type.code().to_string(),
        ),
        (
            DocumentField::BrandModel,
            transliterate_upper(&request.brand_model),
        ),
    ]
}

/// Fills the policy template for validated requests.
pub struct PolicyDocumentGenerator<E: RenderEngine = PdfEngine> {
    engine: E,
    source: Arc<dyn TemplateSource>,
}

impl PolicyDocumentGenerator<PdfEngine> {
    pub fn new(source: Arc<dyn TemplateSource>) -> Self {
        Self::with_engine(PdfEngine, source)
    }
}

impl<E: RenderEngine> PolicyDocumentGenerator<E> {
    pub fn with_engine(engine: E, source: Arc<dyn TemplateSource>) -> Self {
        Self { engine, source }
    }

    /// Draw `request` onto `template` and serialize the result.
    pub fn assemble(
        &self,
        request: &PolicyRequest,
        template: &[u8],
        at: DateTime<Utc>,
    ) -> Result<GeneratedDocument, DocumentError> {
        let mut canvas = self.engine.load(template)?;
        let font_size = request.font_size;

        let mut fields = Vec::with_capacity(DocumentField::ALL.len());
        for (field, text) in compose_fields(request) {
            let placement = placement_for(field);
            let x = placement.x_for(canvas.text_width(&text, font_size));
            let y = placement.y();
            canvas.draw_text(TARGET_PAGE, x, y, &text, font_size)?;
            fields.push(RenderedField { field, text, x, y });
        }

        let pdf = canvas.save()?;
        Ok(GeneratedDocument {
            filename: policy_filename(at),
            pdf,
            fields,
        })
    }
}

impl<E: RenderEngine> Generator<PolicyRequest> for PolicyDocumentGenerator<E> {
    /// Load a fresh copy of the template and assemble the document.
    fn generate(&self, request: &PolicyRequest) -> Result<GeneratedDocument, DocumentError> {
        let template = self.source.load()?;
        let document = self.assemble(request, &template, Utc::now())?;
        log::info!(
            "Assembled policy document {} ({} bytes)",
            document.filename,
            document.pdf.len()
        );
        Ok(document)
    }
}
