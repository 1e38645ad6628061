//! Page geometry and typography for the resume layout.
//!
//! All distances are PDF points (1/72 in) with the origin at the bottom-left
//! corner, so the vertical cursor counts *down* from the top of the page.

use serde::{Deserialize, Serialize};

/// The two standard PDF fonts the resume uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
}

impl FontFace {
    /// Font resource key in page content streams. The PDF writer registers
    /// each standard font under its base name with the hyphen removed.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "HelveticaBold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub face: FontFace,
    pub size_pt: f32,
}

/// Layout parameters for every page of a generated resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
    /// Distance from the top edge to the first baseline of a page.
    pub top_margin_pt: f32,
    /// A line is never drawn with the cursor below this height.
    pub bottom_margin_pt: f32,
    /// x of the header and section titles.
    pub left_x_pt: f32,
    /// x of wrapped section body lines.
    pub body_x_pt: f32,
    pub name_font: FontSpec,
    pub email_font: FontSpec,
    pub title_font: FontSpec,
    pub body_font: FontSpec,
    pub name_advance_pt: f32,
    pub email_advance_pt: f32,
    pub title_advance_pt: f32,
    pub body_advance_pt: f32,
    /// Extra gap after each section.
    pub section_gap_pt: f32,
    /// Hard-wrap width in characters.
    pub wrap_width_chars: usize,
}

impl PageGeometry {
    /// Cursor position of the first line on a fresh page.
    pub fn top_y(&self) -> f32 {
        self.height_pt - self.top_margin_pt
    }

    /// Number of body lines that fit on a fresh page with nothing else on it.
    pub fn body_lines_per_page(&self) -> usize {
        let usable = self.top_y() - self.bottom_margin_pt;
        (usable / self.body_advance_pt).floor() as usize + 1
    }
}

/// US letter (612 × 792 pt) with Helvetica: name 20pt bold, email 11pt,
/// section titles 12pt bold, body 10pt, 90-character hard wrap.
pub fn default_page_geometry() -> PageGeometry {
    PageGeometry {
        width_pt: 612.0,
        height_pt: 792.0,
        top_margin_pt: 60.0,
        bottom_margin_pt: 60.0,
        left_x_pt: 50.0,
        body_x_pt: 60.0,
        name_font: FontSpec {
            face: FontFace::HelveticaBold,
            size_pt: 20.0,
        },
        email_font: FontSpec {
            face: FontFace::Helvetica,
            size_pt: 11.0,
        },
        title_font: FontSpec {
            face: FontFace::HelveticaBold,
            size_pt: 12.0,
        },
        body_font: FontSpec {
            face: FontFace::Helvetica,
            size_pt: 10.0,
        },
        name_advance_pt: 28.0,
        email_advance_pt: 24.0,
        title_advance_pt: 18.0,
        body_advance_pt: 14.0,
        section_gap_pt: 8.0,
        wrap_width_chars: 90,
    }
}
