//! Document layout: word wrapping and scrollable extent.
//!
//! Layout is computed in logical (unmirrored) coordinates. The text block
//! starts at `(margin, margin)`; the scrollable extent includes roughly one
//! viewport of trailing space so the last line can travel up to the focus
//! band instead of stopping at the bottom edge.

use prompter_types::backend::{FontSpec, TextMetrics};

/// Narrowest wrap width ever used, however large the margins.
pub const MIN_WRAP_WIDTH: u32 = 100;

/// Inputs to a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub font: FontSpec,
    pub line_spacing: f32,
    pub margin_px: u32,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl LayoutParams {
    /// Width available to text after margins, never below [`MIN_WRAP_WIDTH`].
    pub fn wrap_width(&self) -> u32 {
        self.viewport_width
            .saturating_sub(self.margin_px.saturating_mul(2))
            .max(MIN_WRAP_WIDTH)
    }
}

/// One wrapped line and its top edge in document coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaidLine {
    pub text: String,
    pub y: u32,
}

/// A wrapped document and its scroll extent.
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    lines: Vec<LaidLine>,
    line_height: u32,
    wrap_width: u32,
    content_height: u32,
    maximum: u32,
    margin: u32,
}

impl DocumentLayout {
    /// Wrap `text` and compute the scroll extent.
    pub fn compute(text: &str, params: &LayoutParams, metrics: &dyn TextMetrics) -> Self {
        let wrap_width = params.wrap_width();
        let spacing = if params.line_spacing.is_finite() {
            params.line_spacing.max(1.0)
        } else {
            1.0
        };
        let natural = metrics.line_height(&params.font);
        let line_height = ((natural as f32 * spacing).round() as u32).max(1);
        let margin = params.margin_px;

        let mut wrapped = Vec::new();
        for paragraph in text.split('\n') {
            wrap_paragraph(paragraph, wrap_width, &params.font, metrics, &mut wrapped);
        }

        // Offsets are summed in u64 and saturate at u32::MAX, so huge
        // documents pin to the end instead of wrapping around.
        let lh = u64::from(line_height);
        let lines: Vec<LaidLine> = wrapped
            .into_iter()
            .enumerate()
            .map(|(i, text)| LaidLine {
                text,
                y: saturate(u64::from(margin).saturating_add((i as u64).saturating_mul(lh))),
            })
            .collect();

        let text_height = (lines.len() as u64).saturating_mul(lh);
        let content = (2 * u64::from(margin)).saturating_add(text_height);
        let trailing = u64::from(params.viewport_height.saturating_sub(margin));
        let content_height = saturate(content);
        let maximum = saturate(
            content
                .saturating_add(trailing)
                .saturating_sub(u64::from(params.viewport_height)),
        );

        log::debug!(
            "Layout: {} lines, line height {line_height}, wrap {wrap_width}px, maximum {maximum}",
            lines.len()
        );

        Self {
            lines,
            line_height,
            wrap_width,
            content_height,
            maximum,
            margin,
        }
    }

    pub fn lines(&self) -> &[LaidLine] {
        &self.lines
    }

    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    pub fn wrap_width(&self) -> u32 {
        self.wrap_width
    }

    /// Height of the text block including top and bottom margins.
    pub fn content_height(&self) -> u32 {
        self.content_height
    }

    /// Largest valid scroll position.
    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Document y of the first line.
    pub fn first_line_y(&self) -> u32 {
        self.margin
    }

    /// Lines that intersect a viewport of `height` scrolled to `position`.
    pub fn visible_lines(&self, position: u32, height: u32) -> &[LaidLine] {
        let top = position;
        let bottom = position.saturating_add(height);
        let lh = self.line_height;
        let start = self.lines.partition_point(|l| l.y.saturating_add(lh) <= top);
        let end = self.lines.partition_point(|l| l.y < bottom);
        if start >= end {
            return &[];
        }
        &self.lines[start..end]
    }
}

/// Compute only the scroll extent for a document.
#[allow(clippy::too_many_arguments)]
pub fn recompute_extent(
    text: &str,
    font_family: &str,
    font_size: u16,
    line_spacing: f32,
    margin_px: u32,
    viewport_width: u32,
    viewport_height: u32,
    metrics: &dyn TextMetrics,
) -> u32 {
    let params = LayoutParams {
        font: FontSpec::new(font_family, font_size),
        line_spacing,
        margin_px,
        viewport_width,
        viewport_height,
    };
    DocumentLayout::compute(text, &params, metrics).maximum()
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Greedily pack the words of one paragraph into lines no wider than
/// `max_width`. Empty paragraphs produce one blank line.
fn wrap_paragraph(
    paragraph: &str,
    max_width: u32,
    font: &FontSpec,
    metrics: &dyn TextMetrics,
    out: &mut Vec<String>,
) {
    let words: Vec<&str> = paragraph.split_whitespace().collect();
    if words.is_empty() {
        out.push(String::new());
        return;
    }

    let mut current = String::new();
    for word in words {
        let test = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if metrics.measure_text(&test, font) <= max_width {
            current = test;
            continue;
        }
        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        if metrics.measure_text(word, font) <= max_width {
            current = word.to_string();
        } else {
            current = split_long_word(word, max_width, font, metrics, out);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
}

/// Break a word wider than the line at character boundaries. Full pieces go
/// to `out`; the trailing remainder is returned to continue the line.
fn split_long_word(
    word: &str,
    max_width: u32,
    font: &FontSpec,
    metrics: &dyn TextMetrics,
    out: &mut Vec<String>,
) -> String {
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        if metrics.measure_text(&piece, font) > max_width && piece.chars().count() > 1 {
            piece.pop();
            out.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    piece
}
