//! Company size/industry heuristics and interview round mapping

use crate::schema::SkillCategories;
use aho_corasick::AhoCorasick;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ENTERPRISE_COMPANIES: &[&str] = &[
    "amazon", "microsoft", "google", "apple", "meta", "facebook", "netflix",
    "infosys", "tcs", "wipro", "cognizant", "accenture", "ibm", "oracle",
    "sap", "salesforce", "adobe", "intel", "amd", "nvidia", "cisco",
    "dell", "hp", "hpe", "vmware", "broadcom", "qualcomm", "texas instruments",
    "capgemini", "hcl", "tech mahindra", "lti", "mindtree", "mphasis",
    "deloitte", "ey", "kpmg", "pwc", "jpmorgan", "goldman sachs", "morgan stanley",
    "bank of america", "wells fargo", "citigroup", "barclays", "deutsche bank",
    "walmart", "target", "costco", "home depot", "lowes", "best buy",
    "at&t", "verizon", "comcast", "charter", "t-mobile", "sprint",
    "exxon", "chevron", "shell", "bp", "total",
    "pfizer", "johnson", "merck", "abbott", "eli lilly",
    "general electric", "boeing", "lockheed", "raytheon", "northrop",
    "ford", "gm", "toyota", "honda", "bmw", "mercedes", "volkswagen",
];

/// Checked in order; the first industry with any keyword present wins.
const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Technology Services", &["software", "it services", "consulting", "solutions", "digital", "tech"]),
    ("E-commerce", &["e-commerce", "retail", "shopping", "marketplace", "online store"]),
    ("Finance", &["bank", "finance", "fintech", "investment", "trading", "insurance"]),
    ("Healthcare", &["health", "medical", "pharma", "biotech", "clinical"]),
    ("Automotive", &["automotive", "car", "vehicle", "transportation", "mobility"]),
    ("Energy", &["energy", "oil", "gas", "renewable", "solar", "power"]),
    ("Telecommunications", &["telecom", "wireless", "network", "broadband", "5g"]),
    ("Manufacturing", &["manufacturing", "industrial", "automation", "production"]),
];

pub const DEFAULT_INDUSTRY: &str = "Technology Services";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanySize {
    Startup,
    #[serde(rename = "Mid-size")]
    MidSize,
    Enterprise,
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CompanySize::Startup => "Startup",
            CompanySize::MidSize => "Mid-size",
            CompanySize::Enterprise => "Enterprise",
        };
        f.write_str(label)
    }
}

impl FromStr for CompanySize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "startup" => Ok(CompanySize::Startup),
            "mid-size" | "midsize" | "mid" => Ok(CompanySize::MidSize),
            "enterprise" => Ok(CompanySize::Enterprise),
            _ => Err(format!("Invalid company size: {}. Supported: startup, mid-size, enterprise", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiringFocus {
    pub title: String,
    pub description: String,
    pub key_areas: Vec<String>,
}

/// One interview round as generated, before schema normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRound {
    pub round: u8,
    pub name: String,
    pub focus: String,
    pub description: String,
    pub why_it_matters: String,
    pub skills_tested: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyIntel {
    pub name: String,
    pub size: CompanySize,
    pub industry: String,
    pub hiring_focus: HiringFocus,
    pub round_mapping: Vec<InterviewRound>,
}

/// Classifies company names against the known enterprise list.
pub struct CompanyClassifier {
    enterprise_matcher: Option<AhoCorasick>,
}

impl Default for CompanyClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyClassifier {
    pub fn new() -> Self {
        let enterprise_matcher = match AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(ENTERPRISE_COMPANIES)
        {
            Ok(matcher) => Some(matcher),
            Err(e) => {
                warn!("Failed to build enterprise matcher, using linear scan: {}", e);
                None
            }
        };

        Self { enterprise_matcher }
    }

    /// `Enterprise` when the name contains, or is contained in, a known
    /// enterprise name; `Startup` otherwise. Never yields `MidSize`.
    pub fn classify(&self, company_name: &str) -> CompanySize {
        let normalized = company_name.trim().to_lowercase();
        if normalized.is_empty() {
            return CompanySize::Startup;
        }

        let contains_known = match &self.enterprise_matcher {
            Some(matcher) => matcher.is_match(&normalized),
            None => ENTERPRISE_COMPANIES.iter().any(|c| normalized.contains(c)),
        };
        let is_enterprise = contains_known || ENTERPRISE_COMPANIES.iter().any(|c| c.contains(normalized.as_str()));

        if is_enterprise {
            CompanySize::Enterprise
        } else {
            CompanySize::Startup
        }
    }
}

pub fn detect_company_size(company_name: &str) -> CompanySize {
    CompanyClassifier::new().classify(company_name)
}

pub fn infer_industry(company_name: &str, jd_text: &str) -> String {
    let text = format!("{} {}", company_name, jd_text).to_lowercase();

    INDUSTRY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(industry, _)| industry.to_string())
        .unwrap_or_else(|| DEFAULT_INDUSTRY.to_string())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn hiring_focus(size: CompanySize) -> HiringFocus {
    let (title, description, key_areas): (&str, &str, &[&str]) = match size {
        CompanySize::Enterprise => (
            "Structured & Fundamentals-Focused",
            "Emphasis on DSA, core CS fundamentals, and standardized interview processes.",
            &[
                "Data Structures & Algorithms",
                "System Design (for senior roles)",
                "Core CS: OS, DBMS, Networks",
                "Standardized coding assessments",
                "Behavioral & cultural fit",
            ],
        ),
        CompanySize::MidSize => (
            "Balanced Technical & Practical",
            "Mix of DSA fundamentals and practical problem-solving.",
            &[
                "DSA with practical applications",
                "Framework/stack expertise",
                "Project-based discussions",
                "Problem-solving approach",
                "Team collaboration skills",
            ],
        ),
        CompanySize::Startup => (
            "Practical & Impact-Focused",
            "Focus on immediate contribution, stack depth, and adaptability.",
            &[
                "Practical coding & debugging",
                "Deep stack knowledge",
                "End-to-end ownership mindset",
                "Rapid learning ability",
                "Cultural fit & adaptability",
            ],
        ),
    };

    HiringFocus {
        title: title.to_string(),
        description: description.to_string(),
        key_areas: strings(key_areas),
    }
}

fn round(number: u8, name: &str, focus: &str, description: &str, why: &str, tested: &[&str]) -> InterviewRound {
    InterviewRound {
        round: number,
        name: name.to_string(),
        focus: focus.to_string(),
        description: description.to_string(),
        why_it_matters: why.to_string(),
        skills_tested: strings(tested),
    }
}

/// Round templates per size tier: Enterprise 4 rounds, Startup 3, Mid-size 3.
pub fn generate_round_mapping(size: CompanySize, skills: &SkillCategories) -> Vec<InterviewRound> {
    let has_dsa = ["DSA", "Data Structures", "Algorithms"].iter().any(|s| skills.mentions_skill(s));
    let has_web = ["React", "Node.js", "Angular"].iter().any(|s| skills.mentions_skill(s));
    let has_system_design = ["System Design", "AWS", "Docker"].iter().any(|s| skills.mentions_skill(s));

    match size {
        CompanySize::Enterprise => vec![
            round(
                1,
                "Online Assessment",
                "DSA + Aptitude",
                "Timed coding problems and logical reasoning",
                "Filters candidates based on fundamental problem-solving speed and accuracy.",
                &["DSA", "Aptitude", "Time Management"],
            ),
            if has_dsa {
                round(
                    2,
                    "Technical Interview I",
                    "DSA Deep Dive",
                    "Complex algorithmic problems",
                    "Evaluates depth of technical knowledge and problem-solving approach.",
                    &["DSA", "Problem Solving"],
                )
            } else {
                round(
                    2,
                    "Technical Interview I",
                    "Core Fundamentals",
                    "Core CS concepts and basic coding",
                    "Evaluates depth of technical knowledge and problem-solving approach.",
                    &["Core CS", "Coding"],
                )
            },
            round(
                3,
                "Technical Interview II",
                if has_system_design { "System Design + Projects" } else { "Projects + Core CS" },
                "Discussion of past projects and system design scenarios",
                "Assesses practical experience and ability to design scalable solutions.",
                if has_system_design { &["System Design", "Architecture"] } else { &["Projects", "Core CS"] },
            ),
            round(
                4,
                "Managerial/HR Round",
                "Behavioral + Culture Fit",
                "Leadership principles, behavioral questions, and compensation discussion",
                "Determines cultural alignment and long-term potential within the organization.",
                &["Communication", "Leadership", "Culture Fit"],
            ),
        ],
        CompanySize::Startup => vec![
            if has_web {
                round(
                    1,
                    "Practical Coding",
                    "Stack-specific Tasks",
                    "Build a small feature or debug existing code",
                    "Tests immediate contribution ability and hands-on coding skills.",
                    &["React/Node.js", "Debugging"],
                )
            } else {
                round(
                    1,
                    "Practical Coding",
                    "Problem Solving",
                    "Solve practical problems",
                    "Tests immediate contribution ability and hands-on coding skills.",
                    &["Problem Solving", "Coding"],
                )
            },
            round(
                2,
                "System/Architecture Discussion",
                if has_system_design { "System Design" } else { "Technical Deep Dive" },
                "Discuss architecture decisions or deep dive into your stack",
                "Evaluates understanding of trade-offs and technical decision-making.",
                &["Architecture", "Trade-off Analysis"],
            ),
            round(
                3,
                "Culture & Fit",
                "Values Alignment + Growth Mindset",
                "Discussion with founders/team about values and vision",
                "Startups need people who align with mission and can wear multiple hats.",
                &["Adaptability", "Ownership", "Culture Fit"],
            ),
        ],
        CompanySize::MidSize => vec![
            round(
                1,
                "Technical Screening",
                "DSA + Basic Coding",
                "Online or live coding assessment",
                "Basic filter for technical competence.",
                &["DSA", "Coding"],
            ),
            round(
                2,
                "Technical Interview",
                "Projects + Problem Solving",
                "Deep dive into projects and technical challenges",
                "Balances theoretical knowledge with practical experience.",
                &["Projects", "Problem Solving"],
            ),
            round(
                3,
                "Final Round",
                "System Design + HR",
                "Architecture discussion and behavioral questions",
                "Final assessment of technical and cultural fit.",
                &["System Design", "Communication"],
            ),
        ],
    }
}

/// Full intel for a company, optionally forcing a size tier.
pub fn generate_company_intel(
    company_name: &str,
    jd_text: &str,
    skills: &SkillCategories,
    size_override: Option<CompanySize>,
) -> CompanyIntel {
    let size = size_override.unwrap_or_else(|| detect_company_size(company_name));
    let name = if company_name.trim().is_empty() {
        "Unknown Company".to_string()
    } else {
        company_name.trim().to_string()
    };

    CompanyIntel {
        name,
        size,
        industry: infer_industry(company_name, jd_text),
        hiring_focus: hiring_focus(size),
        round_mapping: generate_round_mapping(size, skills),
    }
}
