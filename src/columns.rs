use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::fmt;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[ \-/\\().,]").unwrap();
    static ref UNDERSCORE_RUN: Regex = Regex::new(r"_+").unwrap();
}

/// Semantic roles a spreadsheet column can play
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Area,
    Activity,
    Hazard,
    Probability,
    Severity,
    RiskLevel,
    Classification,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Area,
        Role::Activity,
        Role::Hazard,
        Role::Probability,
        Role::Severity,
        Role::RiskLevel,
        Role::Classification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Area => "Area",
            Role::Activity => "Activity",
            Role::Hazard => "Hazard",
            Role::Probability => "Probability",
            Role::Severity => "Severity",
            Role::RiskLevel => "RiskLevel",
            Role::Classification => "Classification",
        }
    }

    /// Matching rules for this role, taken from `ROLE_RULES`
    pub fn rules(&self) -> &'static [&'static [&'static str]] {
        ROLE_RULES
            .iter()
            .find(|(role, _)| role == self)
            .map(|(_, rules)| *rules)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role → keyword rules, tried in order.
///
/// Each rule is a conjunction: every keyword must occur as a substring of the
/// normalized column name. The first rule that matches any column decides.
/// These keywords must stay as they are for existing spreadsheets to keep
/// loading.
pub const ROLE_RULES: &[(Role, &[&[&str]])] = &[
    (Role::Area, &[&["area"]]),
    (Role::Activity, &[&["actividad"]]),
    (Role::Hazard, &[&["peligro"]]),
    (Role::Probability, &[&["probabil"], &["prob"]]),
    (Role::Severity, &[&["sever"], &["gravedad"]]),
    (Role::RiskLevel, &[&["nivel", "riesgo"], &["nivel"]]),
    (Role::Classification, &[&["clasif"]]),
];

/// Normalizes a column name for keyword matching
///
/// Strips surrounding whitespace, folds accented letters to their base letter,
/// lower-cases, turns separators (space, `-`, `/`, `\`, `(`, `)`, `.`, `,`)
/// into underscores, collapses underscore runs and trims underscores from both
/// ends.
///
/// # Examples
/// ```
/// use riskboard::columns::normalize_name;
///
/// assert_eq!(normalize_name("Área  de Trabajo"), "area_de_trabajo");
/// assert_eq!(normalize_name("Prob (1-5)"), "prob_1_5");
/// ```
pub fn normalize_name(raw: &str) -> String {
    let folded: String = raw
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        // some lower-case mappings reintroduce a combining mark (e.g. 'İ')
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let separated = SEPARATORS.replace_all(&folded, "_");
    let collapsed = UNDERSCORE_RUN.replace_all(&separated, "_");

    collapsed
        .trim_matches(|c: char| c == '_' || c.is_whitespace())
        .to_string()
}

/// Lookup from normalized column name to original column name
///
/// Iterates in first-insertion order. When two original names normalize to the
/// same key the later one replaces the earlier value in place.
#[derive(Clone, Debug, Default)]
pub struct ColumnIndex {
    entries: Vec<(String, String)>,
}

impl ColumnIndex {
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = ColumnIndex::default();
        for header in headers {
            index.insert(header.as_ref());
        }
        index
    }

    pub fn insert(&mut self, original: &str) {
        let key = normalize_name(original);
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = original.to_string(),
            None => self.entries.push((key, original.to_string())),
        }
    }

    pub fn get(&self, normalized: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == normalized)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns the original name of the first column whose normalized name
/// contains any of `keywords`, trying keywords in order and, for each keyword,
/// columns in index order.
pub fn find_column<'a>(index: &'a ColumnIndex, keywords: &[&str]) -> Option<&'a str> {
    keywords
        .iter()
        .find_map(|keyword| first_match(index, std::slice::from_ref(keyword)))
}

/// Like `find_column`, but each rule is a set of keywords that must all be
/// present in the same normalized name.
pub fn find_column_matching<'a>(index: &'a ColumnIndex, rules: &[&[&str]]) -> Option<&'a str> {
    rules.iter().find_map(|rule| first_match(index, rule))
}

fn first_match<'a>(index: &'a ColumnIndex, rule: &[&str]) -> Option<&'a str> {
    index
        .iter()
        .find(|(normalized, _)| rule.iter().all(|kw| normalized.contains(kw)))
        .map(|(_, original)| original)
}

/// Resolved role → original column name mapping for one input table
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnMap {
    pub area: Option<String>,
    pub activity: Option<String>,
    pub hazard: Option<String>,
    pub probability: Option<String>,
    pub severity: Option<String>,
    pub risk_level: Option<String>,
    pub classification: Option<String>,
}

impl ColumnMap {
    /// Resolves every role against the given headers
    pub fn resolve<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let index = ColumnIndex::from_headers(headers);
        let mut map = ColumnMap::default();
        for role in Role::ALL {
            let found = find_column_matching(&index, role.rules()).map(str::to_string);
            match &found {
                Some(column) => debug!("role {} -> column {:?}", role, column),
                None => debug!("role {} not found", role),
            }
            *map.slot_mut(role) = found;
        }
        map
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        let slot = match role {
            Role::Area => &self.area,
            Role::Activity => &self.activity,
            Role::Hazard => &self.hazard,
            Role::Probability => &self.probability,
            Role::Severity => &self.severity,
            Role::RiskLevel => &self.risk_level,
            Role::Classification => &self.classification,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<String> {
        match role {
            Role::Area => &mut self.area,
            Role::Activity => &mut self.activity,
            Role::Hazard => &mut self.hazard,
            Role::Probability => &mut self.probability,
            Role::Severity => &mut self.severity,
            Role::RiskLevel => &mut self.risk_level,
            Role::Classification => &mut self.classification,
        }
    }
}
