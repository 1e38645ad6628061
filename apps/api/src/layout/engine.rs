//! Resume Layout Engine: places lines on pages with a single vertical cursor.
//!
//! # State machine
//! - `WritingSection`: lines are placed at the cursor, which moves down.
//! - `PageBreakPending`: the cursor fell below the bottom margin; the next
//!   line flushes the current page and starts a fresh one at the top.
//! - `Done`: `finish` flushed the last page; further writes are rejected.
//!
//! The header and section titles are placed without a margin check; a title
//! can land below the bottom margin and the break happens before the first
//! body line that follows it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::layout::geometry::{FontSpec, PageGeometry};
use crate::layout::wrap::hard_wrap;
use crate::models::resume::ResumeDocument;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Header,
    SectionTitle,
    Body,
}

/// One line of text at an absolute position on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePlacement {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font: FontSpec,
    pub kind: LineKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub lines: Vec<LinePlacement>,
}

impl Page {
    pub fn count(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|l| l.kind == kind).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutState {
    WritingSection,
    PageBreakPending,
    Done,
}

/// Finished layout: every page in print order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaidOutDocument {
    pub pages: Vec<Page>,
    pub page_breaks: usize,
}

impl LaidOutDocument {
    pub fn count(&self, kind: LineKind) -> usize {
        self.pages.iter().map(|p| p.count(kind)).sum()
    }

    pub fn total_lines(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

pub struct LayoutEngine {
    geometry: PageGeometry,
    y: f32,
    current: Page,
    pages: Vec<Page>,
    state: LayoutState,
    page_breaks: usize,
}

impl LayoutEngine {
    pub fn new(geometry: PageGeometry) -> Self {
        let y = geometry.top_y();
        Self {
            geometry,
            y,
            current: Page::default(),
            pages: Vec::new(),
            state: LayoutState::WritingSection,
            page_breaks: 0,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn cursor_y(&self) -> f32 {
        self.y
    }

    /// Name and email at the top of the current page.
    pub fn draw_header(&mut self, name: &str, email: &str) -> Result<(), AppError> {
        self.ensure_writable()?;
        let g = &self.geometry;
        let (x, name_font, name_adv, email_font, email_adv) = (
            g.left_x_pt,
            g.name_font,
            g.name_advance_pt,
            g.email_font,
            g.email_advance_pt,
        );
        self.place(name, x, name_font, name_adv, LineKind::Header);
        self.place(email, x, email_font, email_adv, LineKind::Header);
        Ok(())
    }

    /// Writes a bold title and the hard-wrapped `content`, then the section gap.
    pub fn write_section(&mut self, title: &str, content: &str) -> Result<(), AppError> {
        self.ensure_writable()?;
        let g = &self.geometry;
        let (left_x, body_x) = (g.left_x_pt, g.body_x_pt);
        let (title_font, title_adv) = (g.title_font, g.title_advance_pt);
        let (body_font, body_adv) = (g.body_font, g.body_advance_pt);
        let lines = hard_wrap(content, g.wrap_width_chars);

        // Titles are drawn at the cursor unconditionally; only body lines
        // flush a pending page break.
        self.place(title, left_x, title_font, title_adv, LineKind::SectionTitle);

        for line in &lines {
            self.break_if_exhausted();
            self.place(line, body_x, body_font, body_adv, LineKind::Body);
        }

        self.advance(self.geometry.section_gap_pt);
        debug!(
            section = title,
            lines = lines.len(),
            y = self.cursor_y(),
            "Section laid out"
        );
        Ok(())
    }

    /// Flushes the final page. The engine accepts no writes afterwards.
    pub fn finish(&mut self) -> Result<LaidOutDocument, AppError> {
        self.ensure_writable()?;
        self.flush_page();
        self.state = LayoutState::Done;
        Ok(LaidOutDocument {
            pages: std::mem::take(&mut self.pages),
            page_breaks: self.page_breaks,
        })
    }

    fn ensure_writable(&self) -> Result<(), AppError> {
        if self.state == LayoutState::Done {
            return Err(AppError::Rendering(
                "layout already finished; no further writes accepted".to_string(),
            ));
        }
        Ok(())
    }

    fn break_if_exhausted(&mut self) {
        if self.state == LayoutState::PageBreakPending {
            self.flush_page();
            self.page_breaks += 1;
            self.y = self.geometry.top_y();
            self.state = LayoutState::WritingSection;
        }
    }

    fn flush_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
    }

    fn place(&mut self, text: &str, x: f32, font: FontSpec, advance: f32, kind: LineKind) {
        self.current.lines.push(LinePlacement {
            text: text.to_string(),
            x,
            y: self.y,
            font,
            kind,
        });
        self.advance(advance);
    }

    fn advance(&mut self, distance: f32) {
        self.y -= distance;
        if self.y < self.geometry.bottom_margin_pt {
            self.state = LayoutState::PageBreakPending;
        }
    }
}

/// Lays out a full resume: header, then Summary, Skills, Education, Experience.
pub fn layout_resume(
    doc: &ResumeDocument,
    geometry: &PageGeometry,
) -> Result<LaidOutDocument, AppError> {
    let mut engine = LayoutEngine::new(geometry.clone());
    engine.draw_header(&doc.name, &doc.email)?;
    for (title, content) in doc.sections() {
        engine.write_section(title, content)?;
    }
    engine.finish()
}
