//! Rendering of the redacted skeleton into a PDF.
//!
//! The renderer only needs the final redacted string. Layout is a monospace
//! grid, fixed font size, wrapped by character count and paginated when a
//! page is full.
//!
//! The default typeface is an embedded DejaVu Sans Mono, which has glyphs for
//! the arrows, shapes, box drawing and music symbols of the extended
//! catalogue. Characters the chosen font cannot show are left out of the
//! document, logged, and listed in [`RenderResult::missing_glyphs`].

use crate::error::{PuncError, PuncResult};
use crate::options::{self, Options};
use crate::pipeline::Pipeline;
use owned_ttf_parser::Face;
use printpdf::{IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use printpdf::BuiltinFont;

/// Suffix appended to the source path to name the rendered document.
pub const VISUAL_SUFFIX: &str = "-visual.pdf";

/// Font size of the rendered text, in points.
pub const FONT_SIZE: f32 = 25.0;

const PT_TO_MM: f32 = 0.352_778;

static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono.ttf");

// Monospace advance width, as a fraction of the font size.
const MONOSPACE_ADVANCE: f32 = 0.6;

const LINE_SPACING: f32 = 1.2;

/// Outcome of [`render_redacted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    pub success: bool,
    pub path_to_file: PathBuf,
    pub pages: usize,
    /// Characters of the text the font has no glyph for, in code point order
    pub missing_glyphs: Vec<char>,
}

/// An in-memory document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub missing_glyphs: Vec<char>,
}

/// Page geometry and text grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: Mm,
    pub height: Mm,
    pub margin: Mm,
    pub font_size: f32,
}

impl PageLayout {
    /// A4 with 20 mm margins.
    pub fn a4() -> Self {
        Self {
            width: Mm(210.0),
            height: Mm(297.0),
            margin: Mm(20.0),
            font_size: FONT_SIZE,
        }
    }

    fn line_height(&self) -> f32 {
        self.font_size * LINE_SPACING * PT_TO_MM
    }

    /// Characters per line.
    pub fn columns(&self) -> usize {
        let usable = self.width.0 - 2.0 * self.margin.0;
        let advance = self.font_size * MONOSPACE_ADVANCE * PT_TO_MM;
        ((usable / advance).floor() as usize).max(1)
    }

    /// Lines per page.
    pub fn rows(&self) -> usize {
        let usable = self.height.0 - 2.0 * self.margin.0;
        ((usable / self.line_height()).floor() as usize).max(1)
    }

    /// Splits `text` into pages of wrapped lines.
    ///
    /// Source line breaks are kept, long lines wrap at [`columns`], and an
    /// empty text still yields one empty page.
    ///
    /// [`columns`]: PageLayout::columns
    pub fn paginate(&self, text: &str) -> Vec<Vec<String>> {
        let columns = self.columns();
        let mut lines = Vec::new();

        for line in text.split('\n') {
            let chars: Vec<char> = line.chars().filter(|c| *c != '\r').collect();
            if chars.is_empty() {
                lines.push(String::new());
                continue;
            }
            for piece in chars.chunks(columns) {
                lines.push(piece.iter().collect());
            }
        }

        let mut pages: Vec<Vec<String>> = lines
            .chunks(self.rows())
            .map(|page| page.to_vec())
            .collect();
        if pages.is_empty() {
            pages.push(Vec::new());
        }
        pages
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::a4()
    }
}

#[derive(Debug, Clone)]
enum Typeface {
    Bundled,
    Builtin(BuiltinFont),
    File(PathBuf),
}

/// Renders redacted text into a PDF document.
#[derive(Debug, Clone)]
pub struct RedactionRenderer {
    layout: PageLayout,
    typeface: Typeface,
    title: String,
}

impl RedactionRenderer {
    /// Embedded DejaVu Sans Mono on A4.
    pub fn new() -> Self {
        Self {
            layout: PageLayout::a4(),
            typeface: Typeface::Bundled,
            title: "Punctuation skeleton".to_string(),
        }
    }

    /// Uses a TrueType/OpenType font file instead of the embedded font.
    pub fn with_font_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.typeface = Typeface::File(path.into());
        self
    }

    /// Uses one of the 14 standard PDF fonts. These only cover
    /// windows-1252, so most symbols are dropped.
    pub fn with_builtin_font(mut self, font: BuiltinFont) -> Self {
        self.typeface = Typeface::Builtin(font);
        self
    }

    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Adds the font to `doc` and lists the characters of `text` it lacks.
    fn load_font(
        &self,
        doc: &PdfDocumentReference,
        text: &str,
    ) -> PuncResult<(IndirectFontRef, Vec<char>)> {
        match &self.typeface {
            Typeface::Bundled => load_external_font(doc, BUNDLED_FONT, text),
            Typeface::File(path) => {
                let bytes =
                    std::fs::read(path).map_err(|e| PuncError::source_unavailable(path, e))?;
                load_external_font(doc, &bytes, text)
            }
            Typeface::Builtin(font) => {
                let font = doc
                    .add_builtin_font(font.clone())
                    .map_err(|e| PuncError::render("Failed to load builtin font", e))?;
                Ok((font, missing_glyphs(text, encodes_in_win_ansi)))
            }
        }
    }

    /// Produces the document in memory.
    pub fn render_to_bytes(&self, text: &str) -> PuncResult<RenderedDocument> {
        let layout = &self.layout;
        let pages = layout.paginate(text);
        let (doc, first_page, first_layer) =
            PdfDocument::new(self.title.as_str(), layout.width, layout.height, "Layer 1");
        let (font, missing) = self.load_font(&doc, text)?;
        if !missing.is_empty() {
            warn!(
                missing = %missing.iter().collect::<String>(),
                "font has no glyph for some characters, they are left out"
            );
        }

        let top = layout.height.0 - layout.margin.0 - layout.font_size * PT_TO_MM;
        for (i, lines) in pages.iter().enumerate() {
            let (page, layer) = if i == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(layout.width, layout.height, "Layer 1")
            };
            let current = doc.get_page(page).get_layer(layer);

            for (row, line) in lines.iter().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let y = top - row as f32 * layout.line_height();
                current.use_text(line.as_str(), layout.font_size, layout.margin, Mm(y), &font);
            }
        }

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| PuncError::render("Failed to serialize document", e))?;
        Ok(RenderedDocument {
            bytes,
            pages: pages.len(),
            missing_glyphs: missing,
        })
    }

    /// Renders `text` and writes it to `dest`.
    pub fn render_to_file(&self, text: &str, dest: &Path) -> PuncResult<RenderResult> {
        let rendered = self.render_to_bytes(text)?;
        std::fs::write(dest, &rendered.bytes)
            .map_err(|e| PuncError::destination_unwritable(dest, e))?;
        debug!(dest = %dest.display(), pages = rendered.pages, "wrote rendered document");

        Ok(RenderResult {
            success: true,
            path_to_file: dest.to_path_buf(),
            pages: rendered.pages,
            missing_glyphs: rendered.missing_glyphs,
        })
    }
}

fn load_external_font(
    doc: &PdfDocumentReference,
    bytes: &[u8],
    text: &str,
) -> PuncResult<(IndirectFontRef, Vec<char>)> {
    let face = Face::parse(bytes, 0).map_err(|e| PuncError::render("Failed to parse font", e))?;
    let missing = missing_glyphs(text, |c| face.glyph_index(c).is_some());

    let font = doc
        .add_external_font(bytes)
        .map_err(|e| PuncError::render("Failed to load font file", e))?;
    Ok((font, missing))
}

/// Visible characters of `text` without a glyph, deduplicated and sorted.
fn missing_glyphs(text: &str, has_glyph: impl Fn(char) -> bool) -> Vec<char> {
    text.chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .filter(|c| !has_glyph(*c))
        .collect::<BTreeSet<char>>()
        .into_iter()
        .collect()
}

// The standard fonts are written with WinAnsiEncoding.
fn encodes_in_win_ansi(c: char) -> bool {
    let mut buf = [0u8; 4];
    let (_, _, had_errors) = encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut buf));
    !had_errors
}

impl Default for RedactionRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// `<path>-visual.pdf`, with the suffix appended to the full path.
pub fn visual_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(VISUAL_SUFFIX);
    PathBuf::from(name)
}

/// Redacts the file at `path` and renders it to `<path>-visual.pdf`.
pub fn render_redacted(
    path: impl AsRef<Path>,
    options: impl Into<Options>,
) -> PuncResult<RenderResult> {
    render_redacted_with(path, options, &RedactionRenderer::new())
}

/// [`render_redacted`] with a configured renderer.
pub fn render_redacted_with(
    path: impl AsRef<Path>,
    options: impl Into<Options>,
    renderer: &RedactionRenderer,
) -> PuncResult<RenderResult> {
    let path = path.as_ref();
    let config = options::resolve(path, options)?;
    let redacted = Pipeline::redaction().run_path(path, config)?;

    let dest = visual_path(path);
    let result = renderer.render_to_file(&redacted.spaced, &dest)?;
    info!(
        source = %path.display(),
        dest = %dest.display(),
        pages = result.pages,
        missing = result.missing_glyphs.len(),
        "rendered redacted text"
    );

    Ok(result)
}
