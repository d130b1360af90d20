//! Function catalogue exposed to the host.
//!
//! The host discovers the plugin's functions and their parameters by
//! introspection. This table is that description: it is what `functions`
//! prints and where the CLI takes its defaults from.

use serde::Serialize;

/// Module description shown by the host.
pub const MODULE_SUMMARY: &str = "Fetch and work with secrets from Infisical.";

/// Type of a function parameter as the host sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    String,
    Boolean,
    StringList,
    /// A host-wrapped secret value.
    Secret,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParameterDoc {
    pub name: &'static str,
    pub kind: ParameterKind,
    /// Default as the host would print it; `None` means required.
    pub default: Option<&'static str>,
    pub doc: &'static str,
}

impl ParameterDoc {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionDoc {
    pub name: &'static str,
    pub summary: &'static str,
    pub parameters: &'static [ParameterDoc],
    pub returns: &'static str,
}

impl FunctionDoc {
    pub fn parameter(&self, name: &str) -> Option<&'static ParameterDoc> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

const PROJECT_ID: ParameterDoc = ParameterDoc {
    name: "project_id",
    kind: ParameterKind::String,
    default: None,
    doc: "The ID of the project to get the secret from.",
};

const ENVIRONMENT_SLUG: ParameterDoc = ParameterDoc {
    name: "environment_slug",
    kind: ParameterKind::String,
    default: None,
    doc: "The slug of the environment to get the secret from.",
};

const SECRET_PATH: ParameterDoc = ParameterDoc {
    name: "secret_path",
    kind: ParameterKind::String,
    default: None,
    doc: "The path of the secret to get.",
};

const EXPAND_SECRET_REFERENCES: ParameterDoc = ParameterDoc {
    name: "expand_secret_references",
    kind: ParameterKind::Boolean,
    default: Some("true"),
    doc: "Whether or not to expand secret references.",
};

const INCLUDE_IMPORTS: ParameterDoc = ParameterDoc {
    name: "include_imports",
    kind: ParameterKind::Boolean,
    default: Some("true"),
    doc: "Whether to include imported secrets or not.",
};

const RECURSIVE: ParameterDoc = ParameterDoc {
    name: "recursive",
    kind: ParameterKind::Boolean,
    default: Some("false"),
    doc: "Whether or not to fetch all secrets from the specified base path, and all of its \
          subdirectories. Note, the max depth is 20 deep.",
};

const TAG_FILTERS: ParameterDoc = ParameterDoc {
    name: "tag_filters",
    kind: ParameterKind::StringList,
    default: Some("[]"),
    doc: "The tag slugs to filter secrets by.",
};

/// Constructor argument of the module object.
pub const API_URL: ParameterDoc = ParameterDoc {
    name: "api_url",
    kind: ParameterKind::String,
    default: Some(crate::secrets::DEFAULT_API_URL),
    doc: "Your self-hosted Infisical site URL.",
};

/// Every function the module exposes: the authenticator, then the session's
/// wrapped and raw read functions.
pub const FUNCTIONS: &[FunctionDoc] = &[
    FunctionDoc {
        name: "with_universal_auth",
        summary: "Authenticate with Universal Auth",
        parameters: &[
            ParameterDoc {
                name: "client_id",
                kind: ParameterKind::Secret,
                default: None,
                doc: "Your Machine Identity Client ID.",
            },
            ParameterDoc {
                name: "client_secret",
                kind: ParameterKind::Secret,
                default: None,
                doc: "Your Machine Identity Client Secret.",
            },
        ],
        returns: "authenticated session",
    },
    FunctionDoc {
        name: "get_secret_by_name",
        summary: "Get a secret by name",
        parameters: &[
            ParameterDoc {
                name: "secret_name",
                kind: ParameterKind::String,
                default: None,
                doc: "The name of the secret to get.",
            },
            PROJECT_ID,
            ENVIRONMENT_SLUG,
            SECRET_PATH,
            EXPAND_SECRET_REFERENCES,
            INCLUDE_IMPORTS,
        ],
        returns: "secret",
    },
    FunctionDoc {
        name: "get_secrets",
        summary: "List secrets, resolving imports",
        parameters: &[
            PROJECT_ID,
            ENVIRONMENT_SLUG,
            SECRET_PATH,
            EXPAND_SECRET_REFERENCES,
            RECURSIVE,
            INCLUDE_IMPORTS,
            TAG_FILTERS,
        ],
        returns: "list of (key, secret)",
    },
    FunctionDoc {
        name: "get_secret_record",
        summary: "Get a secret by name as the raw API record",
        parameters: &[
            ParameterDoc {
                name: "secret_name",
                kind: ParameterKind::String,
                default: None,
                doc: "The name of the secret to get.",
            },
            PROJECT_ID,
            ENVIRONMENT_SLUG,
            SECRET_PATH,
            EXPAND_SECRET_REFERENCES,
            INCLUDE_IMPORTS,
        ],
        returns: "secret record",
    },
    FunctionDoc {
        name: "list_secrets",
        summary: "List secrets as the raw API response, imports unresolved",
        parameters: &[
            PROJECT_ID,
            ENVIRONMENT_SLUG,
            SECRET_PATH,
            EXPAND_SECRET_REFERENCES,
            RECURSIVE,
            INCLUDE_IMPORTS,
            TAG_FILTERS,
        ],
        returns: "secrets and imports",
    },
];

/// Looks up a function by name.
pub fn find_function(name: &str) -> Option<&'static FunctionDoc> {
    FUNCTIONS.iter().find(|f| f.name == name)
}
