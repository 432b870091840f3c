#![allow(dead_code)]

//! The canonical resume document.
//!
//! This is the single aggregate every other module reads or replaces
//! wholesale. Field names serialize as camelCase so the persisted JSON is
//! byte-compatible with documents written by the browser client.
//!
//! Entry ids are opaque strings: freshly created entries get a UUID, but a
//! loaded document may carry arbitrary id strings. Uniqueness within a
//! sequence is the load-bearing property, not the id format.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed proficiency scale for skills, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    pub summary: String,
    /// Self-contained data URL (base64). No size/type validation here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: String,
    pub company: String,
    pub role: String,
    /// Free-text, display-only. Never parsed.
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    /// Free text; bullet lines by convention, not enforced.
    pub description: String,
}

impl WorkExperience {
    /// End date for display. `current == true` wins over whatever is stored,
    /// even a stale non-empty value.
    pub fn display_end_date(&self) -> &str {
        if self.current {
            "Present"
        } else {
            &self.end_date
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
}

impl Education {
    pub fn display_end_date(&self) -> &str {
        if self.current {
            "Present"
        } else {
            &self.end_date
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub level: SkillLevel,
}

/// Root aggregate. Always fully present: defaults are empty strings and
/// empty sequences, never absent fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
}

pub fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

macro_rules! entry_ops {
    ($push:ident, $update:ident, $remove:ident, $field:ident, $ty:ty) => {
        /// Appends an entry, assigning a fresh id when the incoming one is
        /// empty or would collide with an existing entry. Returns the id.
        pub fn $push(&mut self, mut entry: $ty) -> String {
            if entry.id.trim().is_empty() || self.$field.iter().any(|e| e.id == entry.id) {
                entry.id = new_entry_id();
            }
            let id = entry.id.clone();
            self.$field.push(entry);
            id
        }

        /// Replaces the entry with the given id wholesale. The id in the
        /// payload is ignored; the addressed id is authoritative.
        pub fn $update(&mut self, id: &str, mut entry: $ty) -> bool {
            match self.$field.iter_mut().find(|e| e.id == id) {
                Some(slot) => {
                    entry.id = id.to_string();
                    *slot = entry;
                    true
                }
                None => false,
            }
        }

        /// Removes the entry with the given id. Unknown id is a no-op.
        pub fn $remove(&mut self, id: &str) -> bool {
            let before = self.$field.len();
            self.$field.retain(|e| e.id != id);
            self.$field.len() != before
        }
    };
}

impl ResumeDocument {
    entry_ops!(
        push_experience,
        update_experience,
        remove_experience,
        experience,
        WorkExperience
    );
    entry_ops!(
        push_education,
        update_education,
        remove_education,
        education,
        Education
    );
    entry_ops!(push_project, update_project, remove_project, projects, Project);
    entry_ops!(push_skill, update_skill, remove_skill, skills, Skill);
}

/// The built-in sample document used for fresh sessions and as the fallback
/// when the persisted value cannot be parsed.
pub fn default_document() -> ResumeDocument {
    ResumeDocument {
        personal_info: PersonalInfo {
            full_name: "Alex Rivera".to_string(),
            email: "alex.rivera@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            location: "San Francisco, CA".to_string(),
            website: Some("alexrivera.dev".to_string()),
            linkedin: Some("linkedin.com/in/alexrivera".to_string()),
            summary: "Dedicated software engineer with 5+ years of experience in building \
                      scalable web applications. Proven track record of improving system \
                      performance and leading cross-functional teams."
                .to_string(),
            profile_picture: None,
        },
        experience: vec![
            WorkExperience {
                id: "1".to_string(),
                company: "Tech Solutions Inc.".to_string(),
                role: "Senior Frontend Developer".to_string(),
                start_date: "01/2021".to_string(),
                end_date: "Present".to_string(),
                current: true,
                description: "• Led the migration of legacy codebase to React 18, improving load times by 40%.\n\
                              • Mentored junior developers and conducted code reviews to ensure high code quality.\n\
                              • Collaborated with UX designers to implement responsive and accessible interfaces."
                    .to_string(),
            },
            WorkExperience {
                id: "2".to_string(),
                company: "WebCorp".to_string(),
                role: "Web Developer".to_string(),
                start_date: "06/2018".to_string(),
                end_date: "12/2020".to_string(),
                current: false,
                description: "• Developed and maintained multiple e-commerce client websites using HTML, CSS, and JavaScript.\n\
                              • Integrated third-party APIs for payment processing and inventory management."
                    .to_string(),
            },
        ],
        education: vec![Education {
            id: "1".to_string(),
            institution: "University of Technology".to_string(),
            degree: "Bachelor of Science".to_string(),
            field: "Computer Science".to_string(),
            start_date: "2014".to_string(),
            end_date: "2018".to_string(),
            current: false,
        }],
        skills: vec![
            Skill {
                id: "1".to_string(),
                name: "React".to_string(),
                level: SkillLevel::Expert,
            },
            Skill {
                id: "2".to_string(),
                name: "TypeScript".to_string(),
                level: SkillLevel::Advanced,
            },
            Skill {
                id: "3".to_string(),
                name: "Node.js".to_string(),
                level: SkillLevel::Intermediate,
            },
            Skill {
                id: "4".to_string(),
                name: "Tailwind CSS".to_string(),
                level: SkillLevel::Advanced,
            },
        ],
        projects: vec![Project {
            id: "1".to_string(),
            name: "E-commerce Dashboard".to_string(),
            description: "A comprehensive dashboard for tracking sales and inventory in real-time."
                .to_string(),
            link: Some("github.com/alex/dashboard".to_string()),
        }],
    }
}
