// src/domain/section.rs
use crate::domain::messages;
use std::collections::BTreeMap;
use std::fmt;

/// Collapsible sections of the center detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum Section {
    Courses,
    Schedule,
    Facilities,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Courses, Section::Schedule, Section::Facilities];

    pub fn key(self) -> &'static str {
        match self {
            Section::Courses => "courses",
            Section::Schedule => "schedule",
            Section::Facilities => "facilities",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Courses => messages::COURSES,
            Section::Schedule => messages::SCHEDULE,
            Section::Facilities => messages::FACILITIES,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Section name → expanded flag. Every section toggles independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionToggles {
    expanded: BTreeMap<Section, bool>,
}

impl SectionToggles {
    pub fn new() -> Self {
        Self {
            expanded: Section::ALL.into_iter().map(|s| (s, false)).collect(),
        }
    }

    /// Flip one section and return its new state.
    pub fn toggle(&mut self, section: Section) -> bool {
        let flag = self.expanded.entry(section).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_expanded(&self, section: Section) -> bool {
        self.expanded.get(&section).copied().unwrap_or(false)
    }

    pub fn expanded(&self) -> impl Iterator<Item = Section> + '_ {
        self.expanded
            .iter()
            .filter(|(_, open)| **open)
            .map(|(section, _)| *section)
    }
}

impl Default for SectionToggles {
    fn default() -> Self {
        Self::new()
    }
}
