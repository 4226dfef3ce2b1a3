//! Keyword signal registry and extraction.
//!
//! # Design
//!
//! Domain and technology detection is a deterministic substring heuristic,
//! not language understanding. Each signal is described exactly once in a
//! static registry; extraction is a linear scan over those tables.
//!
//! Matching is plain substring containment on lower-cased text: a marker
//! inside a longer word still counts (`"nextjs-like"` contains `"next"`).
//!
//! # Adding a Signal
//!
//! 1. Add a [`DomainDef`] to [`DOMAIN_REGISTRY`] or a [`StackDef`] to
//!    [`STACK_REGISTRY`]
//! 2. Extraction and rendering pick it up from the tables

use std::fmt;

use serde::Serialize;

use crate::domain::entities::document::{Corpus, DocCategory};

// ── Domains ──────────────────────────────────────────────────────────────────

/// Business domain inferred from requirements documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectDomain {
    Fintech,
    Ecommerce,
    Saas,
    Healthcare,
    Education,
    Iot,
    Social,
    General,
}

impl ProjectDomain {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fintech => "fintech",
            Self::Ecommerce => "ecommerce",
            Self::Saas => "saas",
            Self::Healthcare => "healthcare",
            Self::Education => "education",
            Self::Iot => "iot",
            Self::Social => "social",
            Self::General => "general",
        }
    }

    /// Capitalized form used as a report heading value.
    pub fn display_name(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl fmt::Display for ProjectDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keywords that vote for one domain.
#[derive(Debug, Clone, Copy)]
pub struct DomainDef {
    pub domain: ProjectDomain,
    pub keywords: &'static [&'static str],
}

/// Distinct keyword hits needed before a domain is selected.
pub const DOMAIN_THRESHOLD: usize = 2;

/// Domain keyword table.
///
/// Ordering IS semantic: when several domains reach the threshold, the
/// earliest entry wins.
pub static DOMAIN_REGISTRY: &[DomainDef] = &[
    DomainDef {
        domain: ProjectDomain::Fintech,
        keywords: &["payment", "banking", "finance", "transaction", "wallet"],
    },
    DomainDef {
        domain: ProjectDomain::Ecommerce,
        keywords: &["product", "cart", "checkout", "order", "shipping"],
    },
    DomainDef {
        domain: ProjectDomain::Saas,
        keywords: &["subscription", "tenant", "workspace", "dashboard"],
    },
    DomainDef {
        domain: ProjectDomain::Healthcare,
        keywords: &["patient", "doctor", "medical", "health", "clinic"],
    },
    DomainDef {
        domain: ProjectDomain::Education,
        keywords: &["student", "course", "learning", "teacher", "class"],
    },
    DomainDef {
        domain: ProjectDomain::Iot,
        keywords: &["device", "sensor", "telemetry", "gateway", "mqtt"],
    },
    DomainDef {
        domain: ProjectDomain::Social,
        keywords: &["user", "post", "comment", "follow", "feed"],
    },
];

/// Pick the domain for already lower-cased requirements text.
pub fn detect_domain(text: &str) -> ProjectDomain {
    DOMAIN_REGISTRY
        .iter()
        .find(|def| {
            def.keywords.iter().filter(|kw| text.contains(*kw)).count() >= DOMAIN_THRESHOLD
        })
        .map(|def| def.domain)
        .unwrap_or(ProjectDomain::General)
}

// ── Technology stack ─────────────────────────────────────────────────────────

/// One axis of the technology stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StackDimension {
    Backend,
    Frontend,
    Mobile,
    Database,
}

impl StackDimension {
    pub const ALL: [StackDimension; 4] =
        [Self::Backend, Self::Frontend, Self::Mobile, Self::Database];

    pub const fn title(&self) -> &'static str {
        match self {
            Self::Backend => "Backend",
            Self::Frontend => "Frontend",
            Self::Mobile => "Mobile",
            Self::Database => "Database",
        }
    }
}

/// Substring markers that map to one canonical technology label.
#[derive(Debug, Clone, Copy)]
pub struct StackDef {
    pub dimension: StackDimension,
    pub label: &'static str,
    /// Any one marker present records the label.
    pub markers: &'static [&'static str],
}

/// Technology marker table. Order determines report order within a dimension.
pub static STACK_REGISTRY: &[StackDef] = &[
    // ── Backend ──────────────────────────────────────────────────────────────
    StackDef {
        dimension: StackDimension::Backend,
        label: "Node.js",
        markers: &["node", "express"],
    },
    StackDef {
        dimension: StackDimension::Backend,
        label: "Python",
        markers: &["python", "flask"],
    },
    StackDef {
        dimension: StackDimension::Backend,
        label: "Go",
        markers: &["go", "golang"],
    },
    // ── Frontend ─────────────────────────────────────────────────────────────
    StackDef {
        dimension: StackDimension::Frontend,
        label: "React",
        markers: &["react"],
    },
    StackDef {
        dimension: StackDimension::Frontend,
        label: "Next.js",
        markers: &["next"],
    },
    StackDef {
        dimension: StackDimension::Frontend,
        label: "Vue",
        markers: &["vue"],
    },
    // ── Mobile ───────────────────────────────────────────────────────────────
    StackDef {
        dimension: StackDimension::Mobile,
        label: "React Native",
        markers: &["react native"],
    },
    StackDef {
        dimension: StackDimension::Mobile,
        label: "Expo",
        markers: &["expo"],
    },
    StackDef {
        dimension: StackDimension::Mobile,
        label: "Flutter",
        markers: &["flutter"],
    },
    // ── Database ─────────────────────────────────────────────────────────────
    StackDef {
        dimension: StackDimension::Database,
        label: "PostgreSQL",
        markers: &["postgres"],
    },
    StackDef {
        dimension: StackDimension::Database,
        label: "MongoDB",
        markers: &["mongodb", "mongo"],
    },
    StackDef {
        dimension: StackDimension::Database,
        label: "Firebase/Firestore",
        markers: &["firebase", "firestore"],
    },
];

/// Detected technologies, one ordered label set per dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TechStack {
    pub backend: Vec<&'static str>,
    pub frontend: Vec<&'static str>,
    pub mobile: Vec<&'static str>,
    pub database: Vec<&'static str>,
}

impl TechStack {
    pub fn get(&self, dimension: StackDimension) -> &[&'static str] {
        match dimension {
            StackDimension::Backend => &self.backend,
            StackDimension::Frontend => &self.frontend,
            StackDimension::Mobile => &self.mobile,
            StackDimension::Database => &self.database,
        }
    }

    fn get_mut(&mut self, dimension: StackDimension) -> &mut Vec<&'static str> {
        match dimension {
            StackDimension::Backend => &mut self.backend,
            StackDimension::Frontend => &mut self.frontend,
            StackDimension::Mobile => &mut self.mobile,
            StackDimension::Database => &mut self.database,
        }
    }

    pub fn is_empty(&self) -> bool {
        StackDimension::ALL.iter().all(|d| self.get(*d).is_empty())
    }
}

/// Detect technologies in already lower-cased architecture text.
pub fn detect_tech_stack(text: &str) -> TechStack {
    let mut stack = TechStack::default();
    for def in STACK_REGISTRY {
        if def.markers.iter().any(|m| text.contains(m)) {
            let labels = stack.get_mut(def.dimension);
            if !labels.contains(&def.label) {
                labels.push(def.label);
            }
        }
    }
    stack
}

// ── Analysis ─────────────────────────────────────────────────────────────────

/// Number of content documents per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub requirements: usize,
    pub architecture: usize,
    pub design: usize,
    pub infrastructure: usize,
    pub unclassified: usize,
}

impl CategoryCounts {
    pub fn from_corpus(corpus: &Corpus) -> Self {
        Self {
            requirements: corpus.count(DocCategory::Requirements),
            architecture: corpus.count(DocCategory::Architecture),
            design: corpus.count(DocCategory::Design),
            infrastructure: corpus.count(DocCategory::Infrastructure),
            unclassified: corpus.count(DocCategory::Unclassified),
        }
    }

    pub fn get(&self, category: DocCategory) -> usize {
        match category {
            DocCategory::Requirements => self.requirements,
            DocCategory::Architecture => self.architecture,
            DocCategory::Design => self.design,
            DocCategory::Infrastructure => self.infrastructure,
            DocCategory::Unclassified => self.unclassified,
        }
    }
}

/// Derived domain and technology signals for one corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub domain: ProjectDomain,
    pub tech_stack: TechStack,
    pub counts: CategoryCounts,
}

/// Lower-case and join every document of one category.
fn category_text(corpus: &Corpus, category: DocCategory) -> String {
    corpus
        .by_category(category)
        .map(|d| d.raw_content.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run both extractors over a classified corpus.
pub fn analyze(corpus: &Corpus) -> AnalysisResult {
    AnalysisResult {
        domain: detect_domain(&category_text(corpus, DocCategory::Requirements)),
        tech_stack: detect_tech_stack(&category_text(corpus, DocCategory::Architecture)),
        counts: CategoryCounts::from_corpus(corpus),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::document::DocumentRecord;
    use std::path::Path;

    fn corpus(docs: &[(&str, &str)]) -> Corpus {
        Corpus {
            all: docs.iter().map(|(p, _)| p.into()).collect(),
            content: docs
                .iter()
                .map(|(p, c)| DocumentRecord::new(*p, Path::new(p), (*c).to_string()))
                .collect(),
        }
    }

    #[test]
    fn two_fintech_keywords_select_fintech() {
        assert_eq!(
            detect_domain("users pay via payment links and a wallet"),
            ProjectDomain::Fintech
        );
    }

    #[test]
    fn single_keyword_is_general() {
        assert_eq!(detect_domain("we accept payment"), ProjectDomain::General);
        assert_eq!(detect_domain(""), ProjectDomain::General);
    }

    #[test]
    fn repeated_keyword_counts_once() {
        assert_eq!(
            detect_domain("payment payment payment"),
            ProjectDomain::General
        );
    }

    #[test]
    fn earlier_registry_entry_wins_ties() {
        // fintech (payment, wallet) and ecommerce (cart, checkout) both qualify.
        let text = "cart checkout payment wallet";
        assert_eq!(detect_domain(text), ProjectDomain::Fintech);
    }

    #[test]
    fn domain_keywords_match_inside_words() {
        // "classroom" contains "class", "courses" contains "course".
        assert_eq!(
            detect_domain("online classroom with many courses"),
            ProjectDomain::Education
        );
    }

    #[test]
    fn stack_markers_are_substrings_not_words() {
        let stack = detect_tech_stack("a nextjs-like frontend");
        assert_eq!(stack.frontend, ["Next.js"]);
    }

    #[test]
    fn stack_records_multiple_labels_per_dimension() {
        let stack = detect_tech_stack("express api, flask workers, postgres and firestore");
        assert_eq!(stack.backend, ["Node.js", "Python"]);
        assert_eq!(stack.database, ["PostgreSQL", "Firebase/Firestore"]);
        assert!(stack.mobile.is_empty());
    }

    #[test]
    fn short_markers_overmatch_by_policy() {
        // "go" occurs inside "mongodb"; substring policy records Go.
        let stack = detect_tech_stack("mongodb");
        assert_eq!(stack.backend, ["Go"]);
        assert_eq!(stack.database, ["MongoDB"]);
    }

    #[test]
    fn react_native_records_react_and_react_native() {
        let stack = detect_tech_stack("react native with expo");
        assert_eq!(stack.frontend, ["React"]);
        assert_eq!(stack.mobile, ["React Native", "Expo"]);
    }

    #[test]
    fn analyze_uses_only_matching_categories() {
        let c = corpus(&[
            ("requirements/prd.md", "Subscription billing per TENANT"),
            ("architecture/stack.md", "We run Postgres"),
            // Stack words in requirements and domain words in design are ignored.
            ("requirements/notes.md", "react frontend"),
            ("design/ui.md", "payment wallet"),
            ("notes/misc.md", "flutter"),
        ]);
        let result = analyze(&c);
        assert_eq!(result.domain, ProjectDomain::Saas);
        assert_eq!(result.tech_stack.database, ["PostgreSQL"]);
        assert!(result.tech_stack.frontend.is_empty());
        assert!(result.tech_stack.mobile.is_empty());
        assert_eq!(result.counts.requirements, 2);
        assert_eq!(result.counts.unclassified, 1);
    }

    #[test]
    fn analysis_is_order_independent() {
        let a = corpus(&[
            ("requirements/a.md", "patient"),
            ("requirements/b.md", "doctor"),
        ]);
        let b = corpus(&[
            ("requirements/b.md", "doctor"),
            ("requirements/a.md", "patient"),
        ]);
        assert_eq!(analyze(&a).domain, analyze(&b).domain);
        assert_eq!(analyze(&a).domain, ProjectDomain::Healthcare);
    }

    #[test]
    fn display_name_capitalizes() {
        assert_eq!(ProjectDomain::Saas.display_name(), "Saas");
        assert_eq!(ProjectDomain::Iot.display_name(), "Iot");
    }
}
