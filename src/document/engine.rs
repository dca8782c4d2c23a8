//! Rendering capability used by the assembler, and its lopdf implementation.
//!
//! The assembler only needs four things from a PDF library: load a template,
//! draw a single line of text, measure text and serialize. Keeping that
//! behind [`RenderEngine`] lets tests record placements without touching PDF.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::collections::BTreeMap;

use super::metrics;
use super::DocumentError;

/// Resource name the overlay font is registered under on each page.
const FONT_RESOURCE: &str = "FPolicyTR";

/// Loads templates into drawable documents.
pub trait RenderEngine: Send + Sync {
    type Canvas: DocumentCanvas;

    fn load(&self, template: &[u8]) -> Result<Self::Canvas, DocumentError>;
}

/// An in-memory document being filled.
pub trait DocumentCanvas {
    /// Draw one line of text with its baseline starting at `(x, y)` on the
    /// zero-based `page`.
    fn draw_text(
        &mut self,
        page: usize,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
    ) -> Result<(), DocumentError>;

    /// Rendered width of `text` at `font_size`.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    fn save(self) -> Result<Vec<u8>, DocumentError>;
}

/// lopdf-backed engine drawing in Times-Roman.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfEngine;

impl RenderEngine for PdfEngine {
    type Canvas = PdfCanvas;

    fn load(&self, template: &[u8]) -> Result<PdfCanvas, DocumentError> {
        let document =
            Document::load_mem(template).map_err(|e| DocumentError::TemplateLoad(e.to_string()))?;
        let pages: Vec<ObjectId> = document.get_pages().into_values().collect();
        if pages.is_empty() {
            return Err(DocumentError::TemplateLoad(
                "document has no pages".to_string(),
            ));
        }
        Ok(PdfCanvas {
            document,
            pages,
            pending: BTreeMap::new(),
        })
    }
}

/// Template loaded with lopdf plus the text operations queued per page.
pub struct PdfCanvas {
    document: Document,
    pages: Vec<ObjectId>,
    pending: BTreeMap<usize, Vec<Operation>>,
}

impl PdfCanvas {
    fn overlay_page(&mut self, page_id: ObjectId, operations: Vec<Operation>) -> Result<(), DocumentError> {
        let font_id = self.document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Times-Roman",
            "Encoding" => "WinAnsiEncoding",
        });
        register_font(&mut self.document, page_id, font_id)?;

        // Isolate the template's graphics state from the overlay.
        let save_state = Content {
            operations: vec![Operation::new("q", vec![])],
        };
        let mut overlay = vec![Operation::new("Q", vec![])];
        overlay.extend(operations);

        let head = self.add_content_stream(save_state)?;
        let tail = self.add_content_stream(Content { operations: overlay })?;

        let page = self
            .document
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(render_error)?;
        let existing = match page.get(b"Contents") {
            Ok(Object::Reference(id)) => vec![Object::Reference(*id)],
            Ok(Object::Array(items)) => items.clone(),
            _ => Vec::new(),
        };

        let mut contents = Vec::with_capacity(existing.len() + 2);
        contents.push(Object::Reference(head));
        contents.extend(existing);
        contents.push(Object::Reference(tail));
        page.set("Contents", Object::Array(contents));
        Ok(())
    }

    fn add_content_stream(&mut self, content: Content) -> Result<ObjectId, DocumentError> {
        let bytes = content.encode().map_err(render_error)?;
        Ok(self
            .document
            .add_object(Stream::new(dictionary! {}, bytes)))
    }
}

impl DocumentCanvas for PdfCanvas {
    fn draw_text(
        &mut self,
        page: usize,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
    ) -> Result<(), DocumentError> {
        if page >= self.pages.len() {
            return Err(DocumentError::MissingPage(page + 1));
        }
        if text.is_empty() {
            return Ok(());
        }

        let operations = self.pending.entry(page).or_default();
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("rg", vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)]),
            Operation::new(
                "Tf",
                vec![Object::Name(FONT_RESOURCE.as_bytes().to_vec()), font_size.into()],
            ),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new(
                "Tj",
                vec![Object::string_literal(metrics::encode_win_ansi(text))],
            ),
            Operation::new("ET", vec![]),
        ]);
        Ok(())
    }

    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        metrics::text_width(text, font_size)
    }

    fn save(mut self) -> Result<Vec<u8>, DocumentError> {
        let pending = std::mem::take(&mut self.pending);
        for (page, operations) in pending {
            let page_id = self.pages[page];
            self.overlay_page(page_id, operations)?;
        }

        let mut buffer = Vec::new();
        self.document
            .save_to(&mut buffer)
            .map_err(|e| DocumentError::Save(e.to_string()))?;
        Ok(buffer)
    }
}

/// Add `font_id` to the page's font resources, whether the resources (or the
/// font dictionary inside them) are inline or indirect.
fn register_font(
    document: &mut Document,
    page_id: ObjectId,
    font_id: ObjectId,
) -> Result<(), DocumentError> {
    let resources = document
        .get_or_create_resources(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(render_error)?;

    let indirect_fonts = resources
        .get(b"Font")
        .and_then(Object::as_reference)
        .ok();
    if let Some(fonts_id) = indirect_fonts {
        document
            .get_object_mut(fonts_id)
            .and_then(Object::as_dict_mut)
            .map_err(render_error)?
            .set(FONT_RESOURCE, Object::Reference(font_id));
        return Ok(());
    }

    let has_inline_fonts = resources.get(b"Font").and_then(Object::as_dict).is_ok();
    if has_inline_fonts {
        resources
            .get_mut(b"Font")
            .and_then(Object::as_dict_mut)
            .map_err(render_error)?
            .set(FONT_RESOURCE, Object::Reference(font_id));
    } else {
        resources.set(
            "Font",
            dictionary! { FONT_RESOURCE => Object::Reference(font_id) },
        );
    }
    Ok(())
}

fn render_error(err: lopdf::Error) -> DocumentError {
    DocumentError::Render(err.to_string())
}
