use std::fmt;

use serde::{Deserialize, Serialize};

pub const TEMPLATE_SUFFIX: &str = ".html";

/// Page rendered for the site root.
pub const INDEX_PAGE: &str = "index";

/// Pages that highlight their own entry in the dashboard navigation.
pub const DASHBOARD_PAGES: [&str; 6] = [
    "dashboard",
    "project-list",
    "new-project",
    "your-plan",
    "ambassador-affiliate",
    "settings",
];

/// A requested page, as taken from the URL. May or may not carry `.html`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageName(pub String);

impl PageName {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn index() -> Self {
        Self::new(INDEX_PAGE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Template to look up first: the name with `.html` appended once.
    pub fn template_name(&self) -> String {
        if self.0.ends_with(TEMPLATE_SUFFIX) {
            self.0.clone()
        } else {
            format!("{}{TEMPLATE_SUFFIX}", self.0)
        }
    }

    /// Name with a trailing `.html` stripped.
    pub fn key(&self) -> &str {
        self.0.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(&self.0)
    }

    /// Fallback template for hyphenated names, e.g. `privacy-policy` ->
    /// `privacy_policy.html`. `None` when the name has no hyphen.
    pub fn underscore_variant(&self) -> Option<String> {
        if !self.0.contains('-') {
            return None;
        }
        Some(self.template_name().replace('-', "_"))
    }

    /// Empty names and names with path separators never map to a page.
    pub fn is_resolvable(&self) -> bool {
        !self.key().is_empty() && !self.0.contains('/') && !self.0.contains('\\')
    }

    pub fn active_page(&self) -> &'static str {
        active_page_for(self.key())
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn active_page_for(key: &str) -> &'static str {
    DASHBOARD_PAGES
        .iter()
        .copied()
        .find(|page| *page == key)
        .unwrap_or("")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub number: u32,
    pub template: &'static str,
    pub label: &'static str,
}

pub const WIZARD_STEPS: [StepDefinition; 6] = [
    StepDefinition {
        number: 1,
        template: "new_projects/step_1.html",
        label: "Project Type",
    },
    StepDefinition {
        number: 2,
        template: "new_projects/step_2.html",
        label: "Project Details",
    },
    StepDefinition {
        number: 3,
        template: "new_projects/step_3.html",
        label: "Requirements",
    },
    StepDefinition {
        number: 4,
        template: "new_projects/step_4.html",
        label: "Deadline",
    },
    StepDefinition {
        number: 5,
        template: "new_projects/step_5.html",
        label: "Budget",
    },
    StepDefinition {
        number: 6,
        template: "new_projects/step_6.html",
        label: "Review & Submit",
    },
];

pub const TOTAL_STEPS: u32 = WIZARD_STEPS.len() as u32;

/// Dashboard entry highlighted while the wizard is open.
pub const WIZARD_ACTIVE_PAGE: &str = "new-project";

pub fn step_definition(step: u32) -> Option<&'static StepDefinition> {
    WIZARD_STEPS.iter().find(|definition| definition.number == step)
}

/// Human-readable range of accepted step numbers, e.g. `1-6`.
pub fn valid_step_range() -> String {
    let first = WIZARD_STEPS.first().map_or(0, |step| step.number);
    let last = WIZARD_STEPS.last().map_or(0, |step| step.number);
    format!("{first}-{last}")
}
