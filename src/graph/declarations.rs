// src/graph/declarations.rs
//! Import and export records recovered from a single file.

use serde::{Deserialize, Serialize};

use super::specifier::SpecifierClass;

/// One import statement (or `require` / dynamic `import()` call).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDecl {
    pub source: String,
    pub imported_names: Vec<String>,
    pub is_relative: bool,
    pub is_package: bool,
    pub is_builtin: bool,
    pub has_default: bool,
    pub has_namespace: bool,
    pub is_type_only: bool,
    pub is_dynamic: bool,
    pub line: usize,
}

impl ImportDecl {
    /// Creates a record with the classification flags derived from `class`.
    #[must_use]
    pub fn new(source: &str, class: SpecifierClass, line: usize) -> Self {
        Self {
            source: source.to_string(),
            imported_names: Vec::new(),
            is_relative: class == SpecifierClass::Relative,
            is_package: class == SpecifierClass::Package,
            is_builtin: class == SpecifierClass::Builtin,
            has_default: false,
            has_namespace: false,
            is_type_only: false,
            is_dynamic: false,
            line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Function,
    Class,
    Variable,
    Type,
    Interface,
    Enum,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDecl {
    pub name: String,
    pub is_default: bool,
    pub is_type: bool,
    pub is_re_export: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub re_export_source: Option<String>,
    pub kind: ExportKind,
    pub line: usize,
}

impl ExportDecl {
    #[must_use]
    pub fn named(name: &str, kind: ExportKind, line: usize) -> Self {
        Self {
            name: name.to_string(),
            is_default: name == "default",
            is_type: matches!(kind, ExportKind::Type | ExportKind::Interface),
            is_re_export: false,
            re_export_source: None,
            kind,
            line,
        }
    }

    #[must_use]
    pub fn default_export(kind: ExportKind, line: usize) -> Self {
        Self::named("default", kind, line)
    }

    #[must_use]
    pub fn re_export(name: &str, source: &str, line: usize) -> Self {
        Self {
            is_re_export: true,
            re_export_source: Some(source.to_string()),
            ..Self::named(name, ExportKind::Unknown, line)
        }
    }
}

/// Everything the extractor learned about one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDeclarations {
    pub imports: Vec<ImportDecl>,
    pub exports: Vec<ExportDecl>,
    pub errors: Vec<String>,
}

impl FileDeclarations {
    /// A result carrying a single parse error and nothing else.
    #[must_use]
    pub fn failed(message: &str) -> Self {
        Self {
            errors: vec![message.to_string()],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.errors.is_empty()
    }
}
