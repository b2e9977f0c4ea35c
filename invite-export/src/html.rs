//! Block sequence to standalone HTML document.
//!
//! Renders the ordered canvas into a complete, self-contained page
//! for download and offline distribution. The output depends on no
//! editor runtime and no script; its only external reference is one
//! CSS utility stylesheet.

use std::fmt::Write;
use std::path::Path;

use crate::error::ExportResult;
use invite_core::block::{
    AspectRatio, Block, BlockKind, CoupleInfo, GalleryCols, GallerySlot, ImageSize, ObjectPosition,
};
use invite_core::catalog;

/// Fixed localized filename for the downloaded document.
pub const EXPORT_FILENAME: &str = "모두의-청첩장.html";

/// Minimum number of gallery slots rendered, regardless of how few
/// images the block holds.
const GALLERY_MIN_SLOTS: usize = 4;

/// Configuration for the export document shell.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Document title.
    pub title: String,
    /// The single external stylesheet reference.
    pub stylesheet_href: String,
    /// Document language tag.
    pub lang: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "모두의 청첩장".to_string(),
            stylesheet_href: "https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css"
                .to_string(),
            lang: "ko".to_string(),
        }
    }
}

/// Renders a block sequence into a standalone HTML document string.
pub struct HtmlExporter {
    config: ExportConfig,
}

impl HtmlExporter {
    /// Create an exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Render the sequence into a complete document.
    ///
    /// Pure function of the input: no external state, no network
    /// access. Unset block payloads fall back to the catalog defaults.
    #[must_use]
    pub fn render(&self, blocks: &[Block]) -> String {
        let mut html = String::with_capacity(8192);
        let _ = write!(
            html,
            "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\"/>\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\n\
             <title>{}</title>\n<link rel=\"stylesheet\" href=\"{}\"/>\n</head>\n",
            escape_html(&self.config.lang),
            escape_html(&self.config.title),
            escape_html(&self.config.stylesheet_href),
        );
        html.push_str("<body class=\"bg-gradient-to-b from-orange-50 to-white min-h-screen\">\n");
        html.push_str("<div class=\"w-full max-w-md mx-auto py-8 px-4 space-y-4\">\n");

        if blocks.is_empty() {
            html.push_str(
                "<div class=\"text-center text-gray-500 py-24\">\
                 <p class=\"text-lg\">아직 구성 요소가 없습니다</p></div>\n",
            );
        } else {
            for block in blocks {
                render_block(&mut html, block);
            }
        }

        html.push_str("</div>\n</body>\n</html>\n");
        tracing::debug!(blocks = blocks.len(), bytes = html.len(), "rendered export document");
        html
    }

    /// Render the sequence and write the document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`](crate::ExportError::Io) if the file
    /// cannot be written.
    pub fn export_to(&self, blocks: &[Block], path: &Path) -> ExportResult<()> {
        let html = self.render(blocks);
        std::fs::write(path, &html)?;
        tracing::info!(path = %path.display(), bytes = html.len(), "wrote export document");
        Ok(())
    }
}

/// Render one block into its export markup.
fn render_block(html: &mut String, block: &Block) {
    html.push_str("<div class=\"w-full bg-white border border-gray-200 rounded-xl shadow-sm\">\n");
    match &block.kind {
        BlockKind::Text { content } => render_text(html, content.as_deref()),
        BlockKind::Image {
            image_url,
            image_size,
        } => render_image(html, image_url.as_deref(), *image_size),
        BlockKind::Date { content } => render_date(html, content.as_deref()),
        BlockKind::Location { content } => render_location(html, content.as_deref()),
        BlockKind::Couple { props } => render_couple(html, props),
        BlockKind::Gallery {
            gallery_images,
            gallery_cols,
            gallery_object_position,
            gallery_aspect_ratio,
            ..
        } => render_gallery(
            html,
            gallery_images,
            *gallery_cols,
            *gallery_object_position,
            *gallery_aspect_ratio,
        ),
        BlockKind::Video {} => render_video(html),
        BlockKind::Countdown { content } => render_countdown(html, content.as_deref()),
        BlockKind::Guestbook {} => render_guestbook(html),
        BlockKind::Timeline {} => render_timeline(html),
        BlockKind::Account {} => render_account(html),
        BlockKind::Background {} => render_background(html),
        BlockKind::Divider {} => render_divider(html),
    }
    html.push_str("</div>\n");
}

fn render_text(html: &mut String, content: Option<&str>) {
    let heading = content.unwrap_or(catalog::default_content(invite_core::BlockType::Text));
    let _ = write!(
        html,
        "<div class=\"text-center p-6\">\
         <h3 class=\"text-xl font-semibold text-gray-800 mb-3\">{}</h3>\
         <p class=\"text-base text-gray-600 leading-relaxed\">여기에 텍스트 내용을 입력하세요</p>\
         </div>\n",
        escape_html(heading),
    );
}

/// Tailwind size classes for a single image block.
fn image_size_class(size: ImageSize) -> &'static str {
    match size {
        ImageSize::Large => "w-full h-72",
        ImageSize::Medium => "w-24 h-24",
        ImageSize::Small => "w-12 h-12",
    }
}

fn render_image(html: &mut String, image_url: Option<&str>, size: ImageSize) {
    let size_class = image_size_class(size);
    html.push_str("<div class=\"text-center p-6\">");
    if let Some(url) = image_url {
        let _ = write!(
            html,
            "<img src=\"{}\" alt=\"업로드 이미지\" \
             class=\"{size_class} object-cover rounded-xl mx-auto border\"/>",
            escape_html(url),
        );
    } else {
        let _ = write!(
            html,
            "<div class=\"{size_class} bg-gray-200 rounded-xl mx-auto mb-4 flex items-center justify-center\">\
             <span class=\"text-gray-400 text-sm\">이미지</span></div>\
             <p class=\"text-sm text-gray-600\">{}</p>",
            catalog::default_content(invite_core::BlockType::Image),
        );
    }
    html.push_str("</div>\n");
}

fn render_date(html: &mut String, content: Option<&str>) {
    let date = content.unwrap_or(catalog::default_content(invite_core::BlockType::Date));
    let _ = write!(
        html,
        "<div class=\"text-center p-6 bg-gradient-to-r from-blue-50 to-purple-50 rounded-xl\">\
         <div class=\"text-3xl font-bold text-blue-800 mb-2\">{}</div>\
         <p class=\"text-lg text-blue-600\">{}</p></div>\n",
        escape_html(date),
        catalog::DATE_SUBTITLE,
    );
}

fn render_location(html: &mut String, content: Option<&str>) {
    let venue = content.unwrap_or(catalog::default_content(invite_core::BlockType::Location));
    let _ = write!(
        html,
        "<div class=\"text-center p-6 bg-gradient-to-r from-green-50 to-blue-50 rounded-xl\">\
         <div class=\"text-xl font-semibold text-green-800 mb-2\">{}</div>\
         <p class=\"text-base text-green-600\">{}</p></div>\n",
        escape_html(venue),
        catalog::LOCATION_SUBTITLE,
    );
}

/// One profile card of the couple section. Every field defaults
/// independently when unset.
fn render_profile_card(
    html: &mut String,
    heading: &str,
    accent: &str,
    name: &str,
    parents: &str,
    phone: &str,
) {
    let _ = write!(
        html,
        "<div class=\"bg-white rounded-lg p-4 shadow-sm\">\
         <h4 class=\"text-lg font-semibold {accent} mb-3 text-center\">{heading}</h4>\
         <div class=\"space-y-2 text-sm\">\
         <div class=\"flex justify-between\"><span class=\"text-gray-600\">이름:</span>\
         <span class=\"font-medium\">{}</span></div>\
         <div class=\"flex justify-between\"><span class=\"text-gray-600\">혼주:</span>\
         <span class=\"font-medium\">{}</span></div>\
         <div class=\"flex justify-between\"><span class=\"text-gray-600\">연락처:</span>\
         <span class=\"font-medium\">{}</span></div>\
         </div></div>",
        escape_html(name),
        escape_html(parents),
        escape_html(phone),
    );
}

fn render_couple(html: &mut String, props: &CoupleInfo) {
    use catalog::couple_defaults as defaults;

    html.push_str(
        "<div class=\"p-6 bg-gradient-to-r from-pink-50 to-purple-50 rounded-xl\">\
         <div class=\"text-center mb-6\">\
         <h3 class=\"text-xl font-semibold text-pink-800 mb-4\">신랑 &amp; 신부</h3></div>\
         <div class=\"grid grid-cols-1 md:grid-cols-2 gap-6\">",
    );
    render_profile_card(
        html,
        "신랑",
        "text-blue-800",
        props.groom_name.as_deref().unwrap_or(defaults::GROOM_NAME),
        props
            .groom_parents
            .as_deref()
            .unwrap_or(defaults::GROOM_PARENTS),
        props.groom_phone.as_deref().unwrap_or(defaults::GROOM_PHONE),
    );
    render_profile_card(
        html,
        "신부",
        "text-pink-800",
        props.bride_name.as_deref().unwrap_or(defaults::BRIDE_NAME),
        props
            .bride_parents
            .as_deref()
            .unwrap_or(defaults::BRIDE_PARENTS),
        props.bride_phone.as_deref().unwrap_or(defaults::BRIDE_PHONE),
    );
    html.push_str("</div></div>\n");
}

/// Cell geometry in the fixed-width export grid is fully determined by
/// the column count and aspect ratio; the thumb size is an editor zoom
/// hint and does not affect the exported markup.
fn render_gallery(
    html: &mut String,
    slots: &[GallerySlot],
    cols: GalleryCols,
    position: ObjectPosition,
    aspect_ratio: AspectRatio,
) {
    let slot_count = slots.len().max(GALLERY_MIN_SLOTS);
    let cols_class = match cols {
        GalleryCols::Two => "grid-cols-2",
        GalleryCols::Three => "grid-cols-3",
    };

    let _ = write!(html, "<div class=\"p-6\"><div class=\"grid {cols_class} gap-2\">");
    for i in 0..slot_count {
        let slot = slots.get(i);
        let slot_aspect = slot
            .and_then(|s| s.aspect_ratio)
            .unwrap_or(aspect_ratio)
            .css();
        let _ = write!(
            html,
            "<div class=\"w-full bg-gray-200 rounded-lg flex items-center justify-center overflow-hidden\" \
             style=\"aspect-ratio: {slot_aspect};\">",
        );
        match slot {
            Some(slot) if slot.is_filled() => {
                let alt = slot.caption.as_deref().unwrap_or("갤러리");
                let _ = write!(
                    html,
                    "<img src=\"{}\" alt=\"{}\" class=\"w-full h-full object-cover bg-white\" \
                     style=\"object-position: {};\"/>",
                    escape_html(&slot.url),
                    escape_html(alt),
                    position.css(),
                );
            }
            _ => {
                // Numbered placeholder for the missing slot.
                let _ = write!(
                    html,
                    "<span class=\"text-gray-400 text-sm\">사진 {}</span>",
                    i + 1,
                );
            }
        }
        html.push_str("</div>");
    }
    html.push_str("</div></div>\n");
}

fn render_video(html: &mut String) {
    let _ = write!(
        html,
        "<div class=\"text-center p-6\">\
         <div class=\"w-full h-32 bg-gray-200 rounded-xl mx-auto mb-4 flex items-center justify-center\">\
         <span class=\"text-gray-400 text-sm\">동영상</span></div>\
         <p class=\"text-sm text-gray-600\">{}</p></div>\n",
        catalog::default_content(invite_core::BlockType::Video),
    );
}

fn render_countdown(html: &mut String, content: Option<&str>) {
    let target = content.unwrap_or(catalog::default_content(invite_core::BlockType::Countdown));
    let _ = write!(
        html,
        "<div class=\"text-center p-6 bg-gradient-to-r from-purple-50 to-pink-50 rounded-xl\">\
         <div class=\"text-4xl font-bold text-purple-800 mb-2\">D-DAY</div>\
         <div class=\"text-lg text-purple-700 mb-2\">{}</div>\
         <p class=\"text-lg text-purple-600 mt-3\">결혼식까지</p></div>\n",
        escape_html(target),
    );
}

fn render_guestbook(html: &mut String) {
    let _ = write!(
        html,
        "<div class=\"text-center p-6 bg-gradient-to-r from-yellow-50 to-orange-50 rounded-xl\">\
         <div class=\"text-2xl font-semibold text-yellow-800 mb-2\">방명록</div>\
         <p class=\"text-base text-yellow-600\">{}</p></div>\n",
        catalog::default_content(invite_core::BlockType::Guestbook),
    );
}

fn render_timeline(html: &mut String) {
    html.push_str("<div class=\"p-6\"><div class=\"space-y-4\">");
    for event in catalog::TIMELINE_EVENTS {
        let _ = write!(
            html,
            "<div class=\"flex items-center gap-3\">\
             <div class=\"w-3 h-3 bg-blue-500 rounded-full\"></div>\
             <span class=\"text-base text-gray-700\">{event}</span></div>",
        );
    }
    html.push_str("</div></div>\n");
}

fn render_account(html: &mut String) {
    let _ = write!(
        html,
        "<div class=\"text-center p-6 bg-gradient-to-r from-gray-50 to-blue-50 rounded-xl\">\
         <div class=\"text-xl font-semibold text-gray-800 mb-2\">계좌정보</div>\
         <p class=\"text-base text-gray-600\">{}</p></div>\n",
        catalog::default_content(invite_core::BlockType::Account),
    );
}

fn render_background(html: &mut String) {
    let _ = write!(
        html,
        "<div class=\"text-center p-6 bg-gradient-to-r from-pink-100 to-purple-100 rounded-xl\">\
         <p class=\"text-base text-purple-600\">{}</p></div>\n",
        catalog::default_content(invite_core::BlockType::Background),
    );
}

fn render_divider(html: &mut String) {
    html.push_str("<div class=\"p-6\"><hr class=\"border-t-2 border-gray-300\"/></div>\n");
}

/// Escape special HTML characters in interpolated content.
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
