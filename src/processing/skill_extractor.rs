//! Keyword-based skill extraction from job description text

use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Skills reported when nothing in the text matches a known keyword.
pub const DEFAULT_SKILLS: [&str; 4] = ["Communication", "Problem solving", "Basic coding", "Projects"];

/// Category key that holds [`DEFAULT_SKILLS`]. It never counts as a matched category.
pub const FALLBACK_CATEGORY: &str = "other";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillCategory {
    pub key: &'static str,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

pub const SKILL_CATEGORIES: &[SkillCategory] = &[
    SkillCategory {
        key: "coreCS",
        name: "Core CS",
        keywords: &[
            "DSA", "OOP", "DBMS", "OS", "Networks", "Data Structures", "Algorithms",
            "Operating Systems", "Database Management",
        ],
    },
    SkillCategory {
        key: "languages",
        name: "Languages",
        keywords: &[
            "Java", "Python", "JavaScript", "TypeScript", "C", "C++", "C#", "Go", "Golang",
            "Rust", "Ruby", "PHP", "Swift", "Kotlin",
        ],
    },
    SkillCategory {
        key: "web",
        name: "Web Development",
        keywords: &[
            "React", "Next.js", "Node.js", "Express", "REST", "GraphQL", "Angular", "Vue",
            "HTML", "CSS", "Bootstrap", "Tailwind", "Webpack", "Vite",
        ],
    },
    SkillCategory {
        key: "data",
        name: "Data & Databases",
        keywords: &[
            "SQL", "MongoDB", "PostgreSQL", "MySQL", "Redis", "Elasticsearch", "DynamoDB",
            "Cassandra", "Firebase", "Prisma", "Sequelize",
        ],
    },
    SkillCategory {
        key: "cloud",
        name: "Cloud & DevOps",
        keywords: &[
            "AWS", "Azure", "GCP", "Google Cloud", "Docker", "Kubernetes", "CI/CD", "Jenkins",
            "GitHub Actions", "Terraform", "Ansible", "Linux", "Ubuntu", "CentOS",
        ],
    },
    SkillCategory {
        key: "testing",
        name: "Testing",
        keywords: &[
            "Selenium", "Cypress", "Playwright", "JUnit", "PyTest", "Jest", "Mocha", "Chai",
            "Testing Library", "Postman", "JMeter",
        ],
    },
];

/// Matched keywords for one category, in keyword-list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMatch {
    pub key: String,
    pub name: String,
    pub skills: Vec<String>,
}

/// Extraction result. Always holds at least one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSkills {
    pub categories: Vec<CategoryMatch>,
}

impl ExtractedSkills {
    pub fn fallback() -> Self {
        Self {
            categories: vec![CategoryMatch {
                key: FALLBACK_CATEGORY.to_string(),
                name: "Other".to_string(),
                skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            }],
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.categories.iter().all(|c| c.key == FALLBACK_CATEGORY)
    }

    /// Number of matched categories, excluding the fallback.
    pub fn category_count(&self) -> usize {
        self.categories
            .iter()
            .filter(|c| c.key != FALLBACK_CATEGORY && !c.skills.is_empty())
            .count()
    }

    pub fn all_skills(&self) -> Vec<String> {
        self.categories.iter().flat_map(|c| c.skills.iter().cloned()).collect()
    }

    /// Grouped `{ key: { name, skills } }` object as consumed by the schema normalizer.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for category in &self.categories {
            map.insert(
                category.key.clone(),
                serde_json::json!({ "name": category.name, "skills": category.skills }),
            );
        }
        Value::Object(map)
    }
}

enum KeywordMatcher {
    Pattern(Regex),
    /// Lowercased keyword, used when the pattern could not be built
    Substring(String),
}

struct KeywordPattern {
    keyword: &'static str,
    matcher: KeywordMatcher,
}

impl KeywordPattern {
    fn compile(keyword: &'static str) -> Self {
        // Token delimiters are consumed instead of using \b so that keywords
        // ending in symbols (C++, C#) still match. A trailing + or # belongs
        // to a longer token, so C does not match inside C++.
        let pattern = format!(r"(?i)(?:^|\W){}(?:[^\w+#]|$)", regex::escape(keyword));
        Self::from_pattern(keyword, &pattern)
    }

    fn from_pattern(keyword: &'static str, pattern: &str) -> Self {
        let matcher = match Regex::new(pattern) {
            Ok(re) => KeywordMatcher::Pattern(re),
            Err(e) => {
                warn!("Pattern for keyword '{}' failed to build, using substring match: {}", keyword, e);
                KeywordMatcher::Substring(keyword.to_lowercase())
            }
        };
        Self { keyword, matcher }
    }

    fn is_match(&self, text: &str, lowered: &str) -> bool {
        match &self.matcher {
            KeywordMatcher::Pattern(re) => re.is_match(text),
            KeywordMatcher::Substring(needle) => lowered.contains(needle.as_str()),
        }
    }
}

/// Scans text for the fixed keyword lists in [`SKILL_CATEGORIES`].
pub struct SkillExtractor {
    categories: Vec<(&'static SkillCategory, Vec<KeywordPattern>)>,
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillExtractor {
    pub fn new() -> Self {
        let categories = SKILL_CATEGORIES
            .iter()
            .map(|category| {
                let patterns = category.keywords.iter().map(|k| KeywordPattern::compile(*k)).collect();
                (category, patterns)
            })
            .collect();

        Self { categories }
    }

    pub fn extract(&self, text: &str) -> ExtractedSkills {
        if text.trim().is_empty() {
            return ExtractedSkills::fallback();
        }

        let lowered = text.to_lowercase();
        let mut categories = Vec::new();

        for (category, patterns) in &self.categories {
            let mut skills: Vec<String> = Vec::new();
            for pattern in patterns {
                if pattern.is_match(text, &lowered) && !skills.iter().any(|s| s == pattern.keyword) {
                    skills.push(pattern.keyword.to_string());
                }
            }

            if !skills.is_empty() {
                debug!("Matched {} skills in category {}", skills.len(), category.key);
                categories.push(CategoryMatch {
                    key: category.key.to_string(),
                    name: category.name.to_string(),
                    skills,
                });
            }
        }

        if categories.is_empty() {
            return ExtractedSkills::fallback();
        }

        ExtractedSkills { categories }
    }

    pub fn keyword_count(&self) -> usize {
        self.categories.iter().map(|(_, patterns)| patterns.len()).sum()
    }
}

/// Convenience wrapper that builds a fresh extractor.
pub fn extract_skills(text: &str) -> ExtractedSkills {
    SkillExtractor::new().extract(text)
}
