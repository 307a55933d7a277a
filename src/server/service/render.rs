//! Ticket PDF rendering.
//!
//! Produces one A4 page per ticket with the holder's biodata and a QR code
//! pointing at the check-in endpoint. The document is written to the storage
//! directory and its bytes are returned for mail attachment.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use entity::registration::Model;
use printpdf::image_crate::{DynamicImage, GrayImage};
use printpdf::{BuiltinFont, Image, ImageTransform, Mm, PdfDocument};
use qrcode::{Color, QrCode};

use crate::server::error::render::RenderError;
use crate::server::tier::tier_config;

const QR_SCALE: u32 = 8;
const QR_QUIET_ZONE: u32 = 4;

/// A finished ticket document.
pub struct RenderedTicket {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct TicketRenderer {
    storage_dir: PathBuf,
    qr_url_template: String,
    event_name: String,
    event_date: String,
}

impl TicketRenderer {
    pub fn new(
        storage_dir: PathBuf,
        qr_url_template: String,
        event_name: String,
        event_date: String,
    ) -> Self {
        Self {
            storage_dir,
            qr_url_template,
            event_name,
            event_date,
        }
    }

    /// Renders the registration's tickets into a single PDF, one page per
    /// ticket number.
    pub fn render(&self, registration: &Model) -> Result<RenderedTicket, RenderError> {
        if registration.ticket_numbers.is_empty() {
            return Err(RenderError::Pdf(
                "registration has no ticket numbers".to_string(),
            ));
        }

        let (doc, first_page, first_layer) = PdfDocument::new(
            format!("{} Tickets", self.event_name),
            Mm(210.0),
            Mm(297.0),
            "Layer 1",
        );

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|err| RenderError::Pdf(err.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|err| RenderError::Pdf(err.to_string()))?;

        for (index, number) in registration.ticket_numbers.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, page_layer) = doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
                doc.get_page(page).get_layer(page_layer)
            };

            layer.use_text(self.event_name.clone(), 20.0, Mm(20.0), Mm(270.0), &bold);
            layer.use_text(self.event_date.clone(), 12.0, Mm(20.0), Mm(261.0), &regular);
            layer.use_text(number.clone(), 16.0, Mm(20.0), Mm(242.0), &bold);

            let mut line_y = 228.0;
            for line in [
                format!("Name: {}", registration.name),
                format!("Identity number: {}", registration.identity_number),
                format!("Institution: {}", registration.institution),
                format!("Email: {}", registration.email),
            ] {
                layer.use_text(line, 12.0, Mm(20.0), Mm(line_y), &regular);
                line_y -= 8.0;
            }

            let url = self
                .qr_url_template
                .replace("{id}", &registration.id.to_string())
                .replace("{ticket_number}", number);
            let qr = qr_image(&url)?;

            qr.add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(Mm(145.0)),
                    translate_y: Some(Mm(225.0)),
                    dpi: Some(300.0),
                    ..Default::default()
                },
            );
        }

        std::fs::create_dir_all(&self.storage_dir)?;

        let config = tier_config(registration.tier);
        let filename = format!(
            "{}-{}-{}.pdf",
            config.ticket_code,
            sanitize(&registration.name),
            registration.id
        );
        let path = self.storage_dir.join(filename);

        let file = File::create(&path)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|err| RenderError::Pdf(err.to_string()))?;

        let bytes = std::fs::read(&path)?;

        Ok(RenderedTicket { path, bytes })
    }
}

/// Encodes `url` as a grayscale QR image with a quiet zone.
fn qr_image(url: &str) -> Result<Image, RenderError> {
    let code = QrCode::new(url).map_err(|err| RenderError::Qr(err.to_string()))?;
    let colors = code.to_colors();
    let modules = code.width() as u32;
    let size = (modules + 2 * QR_QUIET_ZONE) * QR_SCALE;

    let mut pixels = vec![255u8; (size * size) as usize];
    for y in 0..modules {
        for x in 0..modules {
            if colors[(y * modules + x) as usize] == Color::Dark {
                for dy in 0..QR_SCALE {
                    for dx in 0..QR_SCALE {
                        let px = (x + QR_QUIET_ZONE) * QR_SCALE + dx;
                        let py = (y + QR_QUIET_ZONE) * QR_SCALE + dy;
                        pixels[(py * size + px) as usize] = 0;
                    }
                }
            }
        }
    }

    let buffer = GrayImage::from_raw(size, size, pixels)
        .ok_or_else(|| RenderError::Qr("qr pixel buffer size mismatch".to_string()))?;

    Ok(Image::from_dynamic_image(&DynamicImage::ImageLuma8(
        buffer,
    )))
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}
