//! Prompt Builder System
//!
//! Standardized prompt construction for README generation. The model is an
//! untrusted text transformer, so every structural guarantee (section order,
//! heading levels, no surrounding prose) is stated in the prompt itself.
//!
//! ## Design Principles
//!
//! 1. **Role Definition**: Clear AI role for each task
//! 2. **Structured Objectives**: Numbered goals
//! 3. **Ordered Context**: Input facts rendered in insertion order
//! 4. **Fixed Outline**: Exact section list the document must follow
//! 5. **Rules**: Formatting and output constraints as bullet lists
//!
//! Rendering is deterministic: the same builder calls always produce the
//! same string.

mod templates;

pub use templates::{
    MANUAL_SECTIONS, PromptTemplates, REFINE_EXAMPLES, REPOSITORY_SECTIONS, topics_line,
};

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Role definition with expertise area
    Role { expertise: String, task: String },
    /// Numbered objectives
    Objectives(Vec<String>),
    /// Ordered key-value pairs under a header
    Context {
        header: String,
        items: Vec<(String, String)>,
    },
    /// Free text under a header
    Text {
        header: String,
        content: String,
    },
    /// Bulleted rules under a header
    Rules { header: String, rules: Vec<String> },
    /// Required document outline: title line then `##` sections in order
    Outline {
        title: String,
        sections: Vec<(String, String)>,
    },
    /// Verbatim payload fenced by XML-style tags
    Quoted { tag: String, content: String },
    /// Custom section
    Custom(String),
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role definition section
    pub fn role(mut self, expertise: &str, task: &str) -> Self {
        self.sections.push(PromptSection::Role {
            expertise: expertise.to_string(),
            task: task.to_string(),
        });
        self
    }

    /// Add objectives section
    pub fn objectives(mut self, objectives: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Objectives(
            objectives.into_iter().map(String::from).collect(),
        ));
        self
    }

    /// Add a context item, appending to the most recent context block
    /// or starting a new one under `header`
    pub fn context_item(mut self, header: &str, key: &str, value: &str) -> Self {
        if let Some(PromptSection::Context { header: h, items }) = self.sections.last_mut()
            && h.as_str() == header
        {
            items.push((key.to_string(), value.to_string()));
            return self;
        }
        self.sections.push(PromptSection::Context {
            header: header.to_string(),
            items: vec![(key.to_string(), value.to_string())],
        });
        self
    }

    /// Add text section with header
    pub fn section(mut self, header: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: header.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Add a bulleted rule list
    pub fn rules(mut self, header: &str, rules: &[&str]) -> Self {
        self.sections.push(PromptSection::Rules {
            header: header.to_string(),
            rules: rules.iter().map(|r| r.to_string()).collect(),
        });
        self
    }

    /// Add the required outline. `sections` pairs a heading with guidance.
    pub fn outline(mut self, title: &str, sections: &[(&str, &str)]) -> Self {
        self.sections.push(PromptSection::Outline {
            title: title.to_string(),
            sections: sections
                .iter()
                .map(|(h, g)| (h.to_string(), g.to_string()))
                .collect(),
        });
        self
    }

    /// Embed `content` unmodified between `<tag>` and `</tag>`
    pub fn quoted(mut self, tag: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Quoted {
            tag: tag.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Add custom section
    pub fn custom(mut self, content: &str) -> Self {
        self.sections
            .push(PromptSection::Custom(content.to_string()));
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Role { expertise, task } => {
                    prompt.push_str("<ROLE>\n");
                    prompt.push_str(&format!(
                        "You are an expert {} specializing in {}.\n",
                        expertise, task
                    ));
                    prompt.push_str("</ROLE>\n\n");
                }
                PromptSection::Objectives(objectives) => {
                    prompt.push_str("<OBJECTIVES>\n");
                    for (i, obj) in objectives.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, obj));
                    }
                    prompt.push_str("</OBJECTIVES>\n\n");
                }
                PromptSection::Context { header, items } => {
                    prompt.push_str(&format!("{}:\n", header));
                    for (key, value) in items {
                        prompt.push_str(&format!("- {}: {}\n", key, value));
                    }
                    prompt.push('\n');
                }
                PromptSection::Text { header, content } => {
                    prompt.push_str(&format!("{}:\n", header));
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
                PromptSection::Rules { header, rules } => {
                    prompt.push_str(&format!("{}:\n", header));
                    for rule in rules {
                        prompt.push_str(&format!("- {}\n", rule));
                    }
                    prompt.push('\n');
                }
                PromptSection::Outline { title, sections } => {
                    prompt.push_str("REQUIRED SECTIONS (in this order):\n\n");
                    prompt.push_str(&format!("# {}\n\n", title));
                    for (heading, guidance) in sections {
                        prompt.push_str(&format!("## {}\n", heading));
                        if !guidance.is_empty() {
                            prompt.push_str(&guidance);
                            prompt.push('\n');
                        }
                        prompt.push('\n');
                    }
                }
                PromptSection::Quoted { tag, content } => {
                    prompt.push_str(&format!("<{}>\n", tag));
                    prompt.push_str(&content);
                    prompt.push_str(&format!("\n</{}>\n\n", tag));
                }
                PromptSection::Custom(content) => {
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}
