use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AiModels,
    Research,
    Tools,
    Security,
    Performance,
    Ethics,
    Frameworks,
}

/// Keyword sets in priority order. The first set with any substring hit wins.
///
/// `framework` appears in both the tools and frameworks sets; tools is tested
/// first, so only `architecture` and `design pattern` ever reach frameworks.
const RULES: &[(Category, &[&str])] = &[
    (
        Category::AiModels,
        &["ai", "machine learning", "llm", "gpt", "model", "neural"],
    ),
    (Category::Research, &["research", "study", "analysis", "paper"]),
    (Category::Tools, &["tool", "library", "framework", "sdk"]),
    (
        Category::Security,
        &["security", "vulnerability", "breach", "hack"],
    ),
    (
        Category::Performance,
        &["performance", "optimization", "speed", "benchmark"],
    ),
    (Category::Ethics, &["ethics", "privacy", "bias", "fairness"]),
    (
        Category::Frameworks,
        &["framework", "architecture", "design pattern"],
    ),
];

impl Category {
    pub const ALL: [Category; 7] = [
        Category::AiModels,
        Category::Research,
        Category::Tools,
        Category::Security,
        Category::Performance,
        Category::Ethics,
        Category::Frameworks,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::AiModels => "ai_models",
            Category::Research => "research",
            Category::Tools => "tools",
            Category::Security => "security",
            Category::Performance => "performance",
            Category::Ethics => "ethics",
            Category::Frameworks => "frameworks",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::AiModels => "AI Models",
            Category::Research => "Research",
            Category::Tools => "Tools",
            Category::Security => "Security",
            Category::Performance => "Performance",
            Category::Ethics => "Ethics",
            Category::Frameworks => "Frameworks",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Map a search hit to a category by keyword matching over title and snippet.
pub fn categorize(title: &str, snippet: &str) -> Category {
    let combined = format!("{} {}", title.to_lowercase(), snippet.to_lowercase());

    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| combined.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Tools)
}
