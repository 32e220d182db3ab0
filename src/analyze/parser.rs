// src/analyze/parser.rs
//! Heading-based segmentation of free-form model output into the three sections.
//!
//! Single forward scan with a cursor over {none, summary, key points, relevance}:
//! - any line containing a heading phrase (`## X`, `1. **X**`, `X:`, any case) moves the
//!   cursor and is dropped; phrases are checked in section order
//! - other non-empty lines are appended to the current section
//! - text before the first heading is ignored

use crate::analysis::Sections;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    ExecutiveSummary,
    KeyPoints,
    Relevance,
}

impl Section {
    pub const ALL: [Section; 3] = [
        Section::ExecutiveSummary,
        Section::KeyPoints,
        Section::Relevance,
    ];

    /// Uppercase marker phrases, accented and unaccented spellings.
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            Section::ExecutiveSummary => &["RESUMO EXECUTIVO"],
            Section::KeyPoints => &["PONTOS-CHAVE", "PONTOS CHAVE"],
            Section::Relevance => &["NÍVEL DE RELEVÂNCIA", "NIVEL DE RELEVANCIA"],
        }
    }

    fn index(self) -> usize {
        match self {
            Section::ExecutiveSummary => 0,
            Section::KeyPoints => 1,
            Section::Relevance => 2,
        }
    }

    /// First section (in section order) whose marker occurs in this uppercased line.
    fn heading_of(upper: &str) -> Option<Section> {
        Section::ALL
            .into_iter()
            .find(|s| s.markers().iter().any(|m| upper.contains(m)))
    }
}

#[derive(Debug, Default)]
pub struct ResponseParser {
    cursor: Option<Section>,
    acc: [String; 3],
}

impl ResponseParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Option<Section> {
        self.cursor
    }

    pub fn feed_line(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }
        let upper = line.to_uppercase();
        if let Some(section) = Section::heading_of(&upper) {
            self.cursor = Some(section);
            return;
        }
        let Some(section) = self.cursor else {
            return;
        };
        let slot = &mut self.acc[section.index()];
        slot.push_str(line);
        slot.push('\n');
    }

    pub fn finish(self) -> Sections {
        let [summary, key_points, relevance] = self.acc;
        Sections {
            executive_summary: summary.trim().to_string(),
            key_points: key_points.trim().to_string(),
            relevance_level: relevance.trim().to_string(),
        }
    }
}

/// Never fails; sections whose heading is missing come back empty.
pub fn parse_response(text: &str) -> Sections {
    let mut parser = ResponseParser::new();
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}
