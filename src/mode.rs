//! Mode registry: the static table describing the three generation modes.
//!
//! Each row carries the endpoint, the response key and the ordered field
//! schema for one mode. Dispatch never looks past this table, so adding a
//! mode is adding a row.

use serde_json::{json, Map, Value};

use crate::form::FormState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Post,
    Ideas,
    Plan,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Post, Mode::Ideas, Mode::Plan];

    pub fn spec(self) -> &'static ModeSpec {
        match self {
            Mode::Post => &POST,
            Mode::Ideas => &IDEAS,
            Mode::Plan => &PLAN,
        }
    }

    pub fn next(self) -> Mode {
        match self {
            Mode::Post => Mode::Ideas,
            Mode::Ideas => Mode::Plan,
            Mode::Plan => Mode::Post,
        }
    }

    pub fn prev(self) -> Mode {
        match self {
            Mode::Post => Mode::Plan,
            Mode::Ideas => Mode::Post,
            Mode::Plan => Mode::Ideas,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer { min: u64, max: u64 },
    Select { options: &'static [&'static str] },
    CommaList,
}

pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: &'static str,
    pub hint: &'static str,
}

impl FieldDescriptor {
    /// For select fields, the option `step` positions away from `current`
    /// (wrapping). Returns None for non-select kinds.
    pub fn cycle_option(&self, current: &str, step: i64) -> Option<&'static str> {
        let FieldKind::Select { options } = self.kind else {
            return None;
        };
        let len = options.len() as i64;
        let idx = options.iter().position(|o| *o == current).unwrap_or(0) as i64;
        Some(options[(idx + step).rem_euclid(len) as usize])
    }
}

pub struct ModeSpec {
    pub label: &'static str,
    pub panel_title: &'static str,
    pub submit_label: &'static str,
    pub busy_label: &'static str,
    pub tip: &'static str,
    pub endpoint: &'static str,
    pub response_key: &'static str,
    pub fields: &'static [FieldDescriptor],
}

pub const PLATFORM_OPTIONS: &[&str] = &["LinkedIn", "Twitter / X", "Instagram", "Medium"];
pub const TONE_OPTIONS: &[&str] = &[
    "Professional & Witty",
    "Controversial",
    "Educational",
    "Casual",
];
pub const DURATION_OPTIONS: &[&str] = &["1 Week", "2 Weeks", "1 Month"];

static POST: ModeSpec = ModeSpec {
    label: "Viral Post",
    panel_title: "Post Details",
    submit_label: "Generate Viral Post",
    busy_label: "Researching & Writing...",
    tip: "Uses real-time search to verify facts.",
    endpoint: "/generate-post",
    response_key: "final_content",
    fields: &[
        FieldDescriptor {
            name: "topic",
            label: "Topic / News Hook",
            kind: FieldKind::Text,
            required: true,
            default: "",
            hint: "e.g., The future of AI Agents",
        },
        FieldDescriptor {
            name: "platform",
            label: "Platform",
            kind: FieldKind::Select {
                options: PLATFORM_OPTIONS,
            },
            required: false,
            default: "LinkedIn",
            hint: "",
        },
        FieldDescriptor {
            name: "tone",
            label: "Tone",
            kind: FieldKind::Select {
                options: TONE_OPTIONS,
            },
            required: false,
            default: "Professional & Witty",
            hint: "",
        },
    ],
};

static IDEAS: ModeSpec = ModeSpec {
    label: "Brainstorm",
    panel_title: "Niche Settings",
    submit_label: "Find Content Gaps",
    busy_label: "Thinking...",
    tip: "Analyzes psychological hooks.",
    endpoint: "/generate-ideas",
    response_key: "ideas",
    fields: &[
        FieldDescriptor {
            name: "niche",
            label: "Target Niche",
            kind: FieldKind::Text,
            required: true,
            default: "",
            hint: "e.g., Sustainable Fashion, SaaS Marketing",
        },
        FieldDescriptor {
            name: "count",
            label: "Number of Ideas",
            kind: FieldKind::Integer { min: 1, max: 10 },
            required: false,
            default: "5",
            hint: "1-10",
        },
    ],
};

static PLAN: ModeSpec = ModeSpec {
    label: "Strategy Plan",
    panel_title: "Campaign Settings",
    submit_label: "Build Strategy",
    busy_label: "Thinking...",
    tip: "Aligns content with current trends.",
    endpoint: "/generate-plan",
    response_key: "strategy_and_plan",
    fields: &[
        FieldDescriptor {
            name: "niche",
            label: "Target Niche",
            kind: FieldKind::Text,
            required: true,
            default: "",
            hint: "e.g., Sustainable Fashion, SaaS Marketing",
        },
        FieldDescriptor {
            name: "platforms",
            label: "Platforms (comma separated)",
            kind: FieldKind::CommaList,
            required: false,
            default: "LinkedIn, Twitter",
            hint: "LinkedIn, Twitter, Instagram",
        },
        FieldDescriptor {
            name: "duration",
            label: "Duration",
            kind: FieldKind::Select {
                options: DURATION_OPTIONS,
            },
            required: false,
            default: "1 Week",
            hint: "",
        },
    ],
};

/// Split a comma-list field value: trim each token, drop empties, keep order,
/// no de-duplication.
pub fn split_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the request payload for `mode` from the shared form state, applying
/// each field's transform. Pure: the form is only read. Returns None when a
/// declared integer field does not hold a number (callers validate first, so
/// hitting that is a bug, not a user error).
pub fn build_payload(mode: Mode, form: &FormState) -> Option<Value> {
    let mut body = Map::new();
    for field in mode.spec().fields {
        let raw = form.value(field.name);
        let value = match field.kind {
            FieldKind::Text | FieldKind::Select { .. } => json!(raw),
            FieldKind::Integer { .. } => {
                let n: u64 = raw.trim().parse().ok()?;
                json!(n)
            }
            FieldKind::CommaList => json!(split_comma_list(raw)),
        };
        body.insert(field.name.to_string(), value);
    }
    Some(Value::Object(body))
}
