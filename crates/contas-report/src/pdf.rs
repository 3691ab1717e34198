//! PDF rendering with printpdf

use printpdf::image_crate::{DynamicImage, RgbImage};
use printpdf::{BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::error::{ReportError, ReportResult};
use crate::layout::{FontWeight, ImageBlock, ReportDocument, PAGE_HEIGHT, PAGE_WIDTH};

const MM_PER_INCH: f32 = 25.4;

/// Writes a laid-out report as PDF bytes, using the built-in Helvetica faces
#[derive(Debug, Default)]
pub struct PdfWriter;

impl PdfWriter {
    pub fn render(&self, document: &ReportDocument) -> ReportResult<Vec<u8>> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(document.title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;

        for (index, page) in document.pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_ref, layer_ref) =
                    doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Layer {}", index + 1));
                doc.get_page(page_ref).get_layer(layer_ref)
            };

            for line in &page.lines {
                let font = match line.weight {
                    FontWeight::Regular => &regular,
                    FontWeight::Bold => &bold,
                };
                push_line(&layer, font, &line.text, line.size, line.x, line.y);
            }

            if let Some(block) = &page.image {
                place_image(&layer, block)?;
            }
        }

        let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
        doc.save(&mut writer).map_err(pdf_error)?;
        writer.into_inner().map_err(|e| ReportError::Pdf {
            message: e.to_string(),
        })
    }
}

fn pdf_error(e: printpdf::Error) -> ReportError {
    ReportError::Pdf {
        message: e.to_string(),
    }
}

/// Layout `y` counts down from the top; PDF space counts up from the bottom
fn push_line(layer: &PdfLayerReference, font: &IndirectFontRef, text: &str, size: f32, x: f32, y: f32) {
    layer.use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - y), font);
}

fn place_image(layer: &PdfLayerReference, block: &ImageBlock) -> ReportResult<()> {
    let snapshot = &block.snapshot;
    if snapshot.width == 0 || block.width <= 0.0 {
        return Ok(());
    }

    let raster = RgbImage::from_raw(snapshot.width, snapshot.height, snapshot.pixels.clone())
        .ok_or_else(|| ReportError::Pdf {
            message: format!(
                "snapshot buffer does not match {}x{}",
                snapshot.width, snapshot.height
            ),
        })?;
    let image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(raster));

    // pick the dpi that makes the raster exactly `block.width` wide
    let dpi = snapshot.width as f32 * MM_PER_INCH / block.width;
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(block.x)),
            translate_y: Some(Mm(PAGE_HEIGHT - block.y - block.height)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ReportPage, TextLine};
    use crate::snapshot::Snapshot;

    fn line(text: &str, y: f32) -> TextLine {
        TextLine {
            text: text.to_string(),
            x: 20.0,
            y,
            size: 12.0,
            weight: FontWeight::Regular,
        }
    }

    #[test]
    fn test_render_produces_pdf() {
        let document = ReportDocument {
            title: "Teste".to_string(),
            pages: vec![
                ReportPage {
                    lines: vec![line("Saldo Inicial: R$ 10.00", 20.0)],
                    image: None,
                },
                ReportPage {
                    lines: vec![line("GRAFICO", 20.0)],
                    image: Some(ImageBlock {
                        x: 20.0,
                        y: 40.0,
                        width: 170.0,
                        height: 85.0,
                        snapshot: Snapshot {
                            width: 4,
                            height: 2,
                            pixels: vec![255; 4 * 2 * 3],
                        },
                    }),
                },
            ],
        };

        let bytes = PdfWriter.render(&document).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_mismatched_snapshot_rejected() {
        let document = ReportDocument {
            title: "Teste".to_string(),
            pages: vec![ReportPage {
                lines: vec![],
                image: Some(ImageBlock {
                    x: 20.0,
                    y: 40.0,
                    width: 170.0,
                    height: 85.0,
                    snapshot: Snapshot {
                        width: 4,
                        height: 2,
                        pixels: vec![0; 5],
                    },
                }),
            }],
        };
        assert!(matches!(PdfWriter.render(&document), Err(ReportError::Pdf { .. })));
    }
}
