//! Resume section detection

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Experience,
    Education,
    Skills,
    Contact,
    Summary,
    Projects,
    Certifications,
    Achievements,
    Languages,
}

impl SectionType {
    /// Sections every resume is expected to have.
    pub const REQUIRED: [SectionType; 4] = [
        SectionType::Experience,
        SectionType::Education,
        SectionType::Skills,
        SectionType::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Experience => "experience",
            SectionType::Education => "education",
            SectionType::Skills => "skills",
            SectionType::Contact => "contact",
            SectionType::Summary => "summary",
            SectionType::Projects => "projects",
            SectionType::Certifications => "certifications",
            SectionType::Achievements => "achievements",
            SectionType::Languages => "languages",
        }
    }

    /// Words that count as evidence of the section when no header is found.
    pub fn evidence_terms(&self) -> &'static [&'static str] {
        match self {
            SectionType::Experience => &["experience", "work history", "employment"],
            SectionType::Education => &["education", "academic", "qualification"],
            SectionType::Skills => &["skills", "technical skills", "competencies"],
            SectionType::Contact => &["contact", "email", "phone", "address"],
            SectionType::Summary => &["summary", "objective", "profile"],
            SectionType::Projects => &["projects", "portfolio"],
            SectionType::Certifications => &["certifications", "certificates"],
            SectionType::Achievements => &["achievements", "accomplishments"],
            SectionType::Languages => &["languages"],
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Header synonyms per section. Order matters: when a line matches more than
/// one entry the first section listed wins.
pub const SECTION_HEADERS: &[(SectionType, &[&str])] = &[
    (SectionType::Experience, &[
        "experience", "work experience", "professional experience", "work history",
        "employment", "employment history", "career history",
    ]),
    (SectionType::Education, &[
        "education", "academic background", "academic qualifications", "qualifications",
        "education and training",
    ]),
    (SectionType::Skills, &[
        "skills", "technical skills", "core competencies", "competencies", "key skills",
        "skills and abilities",
    ]),
    (SectionType::Contact, &[
        "contact", "contact information", "contact details", "personal details",
    ]),
    (SectionType::Summary, &[
        "summary", "professional summary", "objective", "career objective", "profile",
        "about me",
    ]),
    (SectionType::Projects, &["projects", "personal projects", "key projects", "portfolio"]),
    (SectionType::Certifications, &["certifications", "certificates", "licenses"]),
    (SectionType::Achievements, &["achievements", "accomplishments", "awards"]),
    (SectionType::Languages, &["languages", "language proficiency"]),
];

/// Section name to body text, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    entries: Vec<(SectionType, String)>,
}

impl SectionMap {
    pub fn get(&self, section: SectionType) -> Option<&str> {
        self.entries
            .iter()
            .find(|(kind, _)| *kind == section)
            .map(|(_, body)| body.as_str())
    }

    pub fn contains(&self, section: SectionType) -> bool {
        self.entries.iter().any(|(kind, _)| *kind == section)
    }

    pub fn sections(&self) -> impl Iterator<Item = SectionType> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionType, &str)> + '_ {
        self.entries.iter().map(|(kind, body)| (*kind, body.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Repeated headers append to the section already open in the map.
    fn insert(&mut self, section: SectionType, lines: &[&str]) {
        let body = lines.join("\n");
        match self.entries.iter_mut().find(|(kind, _)| *kind == section) {
            Some((_, existing)) if existing.is_empty() => *existing = body,
            Some((_, existing)) => {
                if !body.is_empty() {
                    existing.push('\n');
                    existing.push_str(&body);
                }
            }
            None => self.entries.push((section, body)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SectionDetector {
    headers: &'static [(SectionType, &'static [&'static str])],
}

impl Default for SectionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionDetector {
    pub fn new() -> Self {
        Self { headers: SECTION_HEADERS }
    }

    /// Split resume text into labeled sections.
    ///
    /// Lines before the first recognized header are not attributed to any
    /// section. A header written inline (`Education: BS Computer Science`)
    /// keeps the remainder of the line as the section's first line.
    pub fn detect_sections(&self, text: &str) -> SectionMap {
        let mut map = SectionMap::default();
        let mut current: Option<SectionType> = None;
        let mut body: Vec<&str> = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();

            if let Some((section, remainder)) = self.match_header(trimmed) {
                if let Some(open) = current.take() {
                    map.insert(open, &body);
                }
                body.clear();
                if let Some(rest) = remainder {
                    body.push(rest);
                }
                current = Some(section);
            } else if current.is_some() && !trimmed.is_empty() {
                body.push(line);
            }
        }

        if let Some(open) = current {
            map.insert(open, &body);
        }

        map
    }

    fn match_header<'a>(&self, line: &'a str) -> Option<(SectionType, Option<&'a str>)> {
        if line.is_empty() {
            return None;
        }

        if let Some(section) = self.lookup(line) {
            return Some((section, None));
        }

        // Inline form: "Skills: Python, Django"
        let (head, rest) = line.split_once(':')?;
        let section = self.lookup(head)?;
        let rest = rest.trim();
        Some((section, (!rest.is_empty()).then_some(rest)))
    }

    fn lookup(&self, candidate: &str) -> Option<SectionType> {
        let cleaned = candidate
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if cleaned.is_empty() {
            return None;
        }

        self.headers
            .iter()
            .find(|(_, synonyms)| synonyms.iter().any(|s| *s == cleaned))
            .map(|(section, _)| *section)
    }
}
