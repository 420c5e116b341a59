//! README prompt templates
//!
//! Three variants with different structural contracts:
//!
//! - **manual**: facts typed by the user, outline includes a Usage section
//! - **repository**: metadata from GitHub; features and stack are inferred
//!   from language, topics and description; no Usage section, no badges
//! - **refine**: current document + one free-form instruction, whole document
//!   returned, history-free

use super::PromptBuilder;
use crate::constants::placeholder;
use crate::types::{ManualProjectFacts, RepositoryDescription};

/// `##` sections of a manually described project, in required order
pub const MANUAL_SECTIONS: [&str; 8] = [
    "Description",
    "Features",
    "Tech Stack",
    "Installation",
    "Usage",
    "Contributing",
    "License",
    "Author",
];

/// `##` sections of a repository-derived README, in required order
pub const REPOSITORY_SECTIONS: [&str; 8] = [
    "Overview",
    "Features",
    "Tech Stack",
    "Installation",
    "Project Structure",
    "Contributing",
    "License",
    "Author",
];

/// Example instruction → edit pairs shown to the model. Guidance only;
/// instructions are never parsed.
pub const REFINE_EXAMPLES: [(&str, &str); 5] = [
    (
        "add bullets to features",
        "Find the Features section and format each feature as \"- Feature name\"",
    ),
    (
        "add badges",
        "Add badge images at the top like ![Badge](url)",
    ),
    (
        "add docker",
        "Add a new ## Docker section with setup instructions",
    ),
    (
        "improve description",
        "Rewrite the description to be more detailed",
    ),
    (
        "make it professional",
        "Enhance the language and add more sections",
    ),
];

const MARKDOWN_RULES: &[&str] = &[
    "Use # for the main title (exactly one)",
    "Use ## for section headings",
    "Use ### for subsections if needed",
    "Use - for bullet points (with a space after)",
    "Use triple backticks (```) for code blocks, always with a language tag",
    "Add blank lines between sections",
    "Use **bold** for emphasis where appropriate",
];

const OUTPUT_RULES: &[&str] = &[
    "Output ONLY the markdown content",
    "Do NOT wrap the output in code blocks",
    "Do NOT add any explanatory text before or after",
    "Start directly with the # title",
];

/// Render repository topics, substituting a placeholder for an empty list
pub fn topics_line(topics: &[String]) -> String {
    if topics.is_empty() {
        placeholder::NO_TOPICS.to_string()
    } else {
        topics.join(", ")
    }
}

/// Preset prompt templates
pub struct PromptTemplates;

impl PromptTemplates {
    /// README from manually entered facts
    pub fn manual(facts: &ManualProjectFacts) -> String {
        let sections: [(&str, &str); 8] = [
            (
                MANUAL_SECTIONS[0],
                "[Write a clear, concise description based on the provided description]",
            ),
            (
                MANUAL_SECTIONS[1],
                "[List each feature as a bullet point using \"-\"]",
            ),
            (
                MANUAL_SECTIONS[2],
                "[List each technology as a bullet point using \"-\"]",
            ),
            (
                MANUAL_SECTIONS[3],
                "Provide step-by-step installation instructions in ```bash code blocks.",
            ),
            (
                MANUAL_SECTIONS[4],
                "Provide clear usage instructions with ```bash code examples.",
            ),
            (MANUAL_SECTIONS[5], "Add a brief contributing section."),
            (MANUAL_SECTIONS[6], "Add a license section (MIT or similar)."),
            (MANUAL_SECTIONS[7], "Add author/contact information."),
        ];

        PromptBuilder::new()
            .role("technical writer", "GitHub README files")
            .objectives(vec![
                "Generate a professional, well-formatted GitHub README.md",
                "Base every section on the project information below",
                "Follow the required section outline exactly, in order",
            ])
            .context_item("PROJECT INFORMATION", "Project Name", facts.name())
            .context_item("PROJECT INFORMATION", "Description", facts.description())
            .context_item("PROJECT INFORMATION", "Features", facts.features())
            .context_item("PROJECT INFORMATION", "Tech Stack", facts.tech_stack())
            .rules("FORMATTING RULES", MARKDOWN_RULES)
            .outline(facts.name(), &sections)
            .rules("OUTPUT REQUIREMENTS", OUTPUT_RULES)
            .build()
    }

    /// README inferred from repository metadata
    pub fn repository(desc: &RepositoryDescription) -> String {
        let stars = desc.star_count.to_string();
        let forks = desc.fork_count.to_string();
        let topics = topics_line(&desc.topics);
        let license = desc.license.as_deref().unwrap_or(placeholder::NO_LICENSE);

        let sections: [(&str, &str); 8] = [
            (
                REPOSITORY_SECTIONS[0],
                "[Explain what the project is and the problem it solves]",
            ),
            (
                REPOSITORY_SECTIONS[1],
                "[Infer the key features from the description and topics; one \"-\" bullet each]",
            ),
            (
                REPOSITORY_SECTIONS[2],
                "[Infer the technologies from the primary language and topics; one \"-\" bullet each]",
            ),
            (
                REPOSITORY_SECTIONS[3],
                "Provide clone and setup commands typical for the primary language in ```bash code blocks.",
            ),
            (
                REPOSITORY_SECTIONS[4],
                "Show a plausible directory layout for this kind of project in a ```text code block.",
            ),
            (REPOSITORY_SECTIONS[5], "Add a brief contributing section."),
            (
                REPOSITORY_SECTIONS[6],
                "State the license given above, or say it is not specified.",
            ),
            (
                REPOSITORY_SECTIONS[7],
                "Credit the repository owner and link the repository URL.",
            ),
        ];

        let title = format!(
            "{}\n\n[One-line tagline summarizing the project]",
            desc.name
        );

        PromptBuilder::new()
            .role("technical writer", "GitHub README files")
            .objectives(vec![
                "Generate a professional GitHub README.md for the repository below",
                "Infer features, tech stack and project structure from the language, topics and description",
                "Do not claim anything the metadata cannot support",
                "Follow the required section outline exactly, in order",
            ])
            .context_item("REPOSITORY INFORMATION", "Name", &desc.name)
            .context_item("REPOSITORY INFORMATION", "Description", &desc.description)
            .context_item(
                "REPOSITORY INFORMATION",
                "Primary Language",
                &desc.primary_language,
            )
            .context_item("REPOSITORY INFORMATION", "Topics", &topics)
            .context_item("REPOSITORY INFORMATION", "Stars", &stars)
            .context_item("REPOSITORY INFORMATION", "Forks", &forks)
            .context_item("REPOSITORY INFORMATION", "License", license)
            .context_item("REPOSITORY INFORMATION", "Owner", &desc.owner_login)
            .context_item("REPOSITORY INFORMATION", "URL", &desc.canonical_url)
            .section(
                "NOTE",
                "No source code is available. Everything beyond the metadata above is an inference.",
            )
            .rules("FORMATTING RULES", MARKDOWN_RULES)
            .outline(&title, &sections)
            .rules(
                "OMISSIONS",
                &[
                    "Do NOT include a usage section",
                    "Do NOT add badges or shield images",
                ],
            )
            .rules("OUTPUT REQUIREMENTS", OUTPUT_RULES)
            .build()
    }

    /// Whole-document rewrite driven by one instruction
    pub fn refine(current_document: &str, instruction: &str) -> String {
        let example_lines: Vec<String> = REFINE_EXAMPLES
            .iter()
            .map(|(ask, edit)| format!("\"{}\" → {}", ask, edit))
            .collect();
        let examples: Vec<&str> = example_lines.iter().map(String::as_str).collect();

        PromptBuilder::new()
            .role("GitHub README editor", "applying requested changes")
            .custom("You MUST make changes based on the user's request.")
            .quoted("USER_REQUEST", instruction)
            .quoted("CURRENT_README", current_document)
            .objectives(vec![
                "Analyze the user's request",
                "Make the EXACT changes they asked for",
                "Return the COMPLETE modified README, not a diff or an excerpt",
            ])
            .rules("EXAMPLES OF WHAT TO DO", &examples)
            .rules(
                "FORMATTING RULES",
                &[
                    "Use # for the main title",
                    "Use ## for section headings",
                    "Use - for bullet points",
                    "Use ``` for code blocks",
                ],
            )
            .rules("OUTPUT REQUIREMENTS", OUTPUT_RULES)
            .custom(
                "YOU MUST MAKE CHANGES. Do not return the same content. Actually implement what the user asked for.\n\nOutput the complete updated README now:",
            )
            .build()
    }
}
