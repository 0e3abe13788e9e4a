// src/graph/extract/indent.rs
//! Python-style imports and implicit module-level exports.
//!
//! Works on logical lines: bracketed continuations and trailing
//! backslashes are joined so a parenthesised `from x import (...)` is one
//! statement. Top-level `def`/`class`/assignments become exports unless the
//! name starts with `_`; names listed in `__all__` are always exported.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::graph::comments;
use crate::graph::declarations::{ExportDecl, ExportKind, FileDeclarations, ImportDecl};
use crate::graph::specifier;
use crate::lang::SyntaxFamily;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("Invalid declaration pattern: {e}"))
}

static FROM_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| re(r"^from\s+(?P<src>\.+[\w.]*|[\w.]+)\s+import\s+(?P<names>.+)$"));
static PLAIN_IMPORT: LazyLock<Regex> = LazyLock::new(|| re(r"^import\s+(?P<mods>.+)$"));
static DYNAMIC: LazyLock<Regex> = LazyLock::new(|| {
    re(r#"(?:\bimportlib\.import_module|\b__import__)\s*\(\s*['"](?P<src>[\w.]+)['"]"#)
});
static TYPE_CHECKING: LazyLock<Regex> =
    LazyLock::new(|| re(r"^if\s+(?:typing\.)?TYPE_CHECKING\s*:"));
static DEF: LazyLock<Regex> =
    LazyLock::new(|| re(r"^(?:async\s+)?def\s+(?P<name>[A-Za-z_]\w*)"));
static CLASS: LazyLock<Regex> = LazyLock::new(|| re(r"^class\s+(?P<name>[A-Za-z_]\w*)"));
static ALL: LazyLock<Regex> =
    LazyLock::new(|| re(r"^__all__\s*(?::[^=]*)?(?:\+=|=)\s*[\[(](?P<body>[^\])]*)"));
static QUOTED: LazyLock<Regex> = LazyLock::new(|| re(r#"['"](?P<name>[A-Za-z_]\w*)['"]"#));
static ANNOTATED: LazyLock<Regex> =
    LazyLock::new(|| re(r"^(?P<name>[A-Za-z_]\w*)\s*:[^=]*=(?:[^=]|$)"));
/// Heads of one-line compound statements such as `try: x = 1`.
const KEYWORDS: &[&str] = &[
    "else", "elif", "except", "finally", "for", "if", "try", "while", "with", "lambda", "match",
    "case",
];

static ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    re(r"^(?P<names>[A-Za-z_]\w*(?:\s*,\s*[A-Za-z_]\w*)*)\s*=(?:[^=]|$)")
});

struct LogicalLine {
    line: usize,
    indent: usize,
    text: String,
}

/// A top-level binding seen while scanning, before the underscore rule.
struct Candidate {
    name: String,
    kind: ExportKind,
    line: usize,
}

pub(super) fn extract(content: &str) -> FileDeclarations {
    let text = comments::strip_hash(content);
    let mut imports = Vec::new();
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut all_names: Vec<String> = Vec::new();
    let mut all_line = 0;
    let mut type_block: Option<usize> = None;

    for ll in logical_lines(&text) {
        if type_block.is_some_and(|indent| ll.indent <= indent) {
            type_block = None;
        }
        let stmt = ll.text.trim();

        if TYPE_CHECKING.is_match(stmt) {
            type_block = Some(ll.indent);
            continue;
        }

        let type_only = type_block.is_some();
        for part in split_statements(stmt) {
            parse_import(part, ll.line, type_only, &mut imports);
        }
        for caps in DYNAMIC.captures_iter(stmt) {
            let mut decl = new_import(&caps["src"], ll.line);
            decl.is_dynamic = true;
            decl.has_namespace = true;
            decl.imported_names = vec!["*".to_string()];
            imports.push(decl);
        }

        if ll.indent > 0 {
            continue;
        }
        if let Some(caps) = ALL.captures(stmt) {
            all_line = ll.line;
            all_names.extend(QUOTED.captures_iter(&caps["body"]).map(|c| c["name"].to_string()));
            continue;
        }
        collect_binding(stmt, ll.line, &mut candidates);
    }

    FileDeclarations {
        imports,
        exports: finalize_exports(candidates, &all_names, all_line),
        errors: Vec::new(),
    }
}

fn new_import(source: &str, line: usize) -> ImportDecl {
    let class = specifier::classify(source, SyntaxFamily::Indentation);
    ImportDecl::new(source, class, line)
}

fn parse_import(stmt: &str, line: usize, type_only: bool, out: &mut Vec<ImportDecl>) {
    if let Some(caps) = FROM_IMPORT.captures(stmt) {
        let mut decl = new_import(&caps["src"], line);
        let names = caps["names"].trim().trim_start_matches('(').trim_end_matches(')');
        for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let name = name.split_whitespace().next().unwrap_or(name);
            if name == "*" {
                decl.has_namespace = true;
            }
            decl.imported_names.push(name.to_string());
        }
        decl.is_type_only = type_only;
        out.push(decl);
        return;
    }

    if let Some(caps) = PLAIN_IMPORT.captures(stmt) {
        for module in caps["mods"].split(',').map(str::trim) {
            let module = module.split_whitespace().next().unwrap_or(module);
            if module.is_empty() || !module.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.') {
                continue;
            }
            let mut decl = new_import(module, line);
            decl.has_namespace = true;
            decl.imported_names = vec!["*".to_string()];
            decl.is_type_only = type_only;
            out.push(decl);
        }
    }
}

fn collect_binding(stmt: &str, line: usize, out: &mut Vec<Candidate>) {
    let mut push = |name: &str, kind: ExportKind| {
        out.push(Candidate { name: name.to_string(), kind, line });
    };

    if let Some(caps) = DEF.captures(stmt) {
        push(&caps["name"], ExportKind::Function);
    } else if let Some(caps) = CLASS.captures(stmt) {
        push(&caps["name"], ExportKind::Class);
    } else if let Some(caps) = ANNOTATED.captures(stmt) {
        if !KEYWORDS.contains(&&caps["name"]) {
            push(&caps["name"], ExportKind::Variable);
        }
    } else if let Some(caps) = ASSIGN.captures(stmt) {
        for name in caps["names"].split(',').map(str::trim) {
            push(name, ExportKind::Variable);
        }
    }
}

fn finalize_exports(candidates: Vec<Candidate>, all_names: &[String], all_line: usize) -> Vec<ExportDecl> {
    let listed: HashSet<&str> = all_names.iter().map(String::as_str).collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut exports = Vec::new();

    for c in candidates {
        let visible = !c.name.starts_with('_') || listed.contains(c.name.as_str());
        if visible && seen.insert(c.name.clone()) {
            exports.push(ExportDecl::named(&c.name, c.kind, c.line));
        }
    }

    for name in all_names {
        if seen.insert(name.clone()) {
            exports.push(ExportDecl::named(name, ExportKind::Unknown, all_line));
        }
    }

    exports.sort_by_key(|e| e.line);
    exports
}

/// `import a; import b` on one line. Lines holding string literals are left
/// whole since a `;` may sit inside the literal.
fn split_statements(stmt: &str) -> Vec<&str> {
    if stmt.contains(['\'', '"']) {
        return vec![stmt];
    }
    stmt.split(';').map(str::trim).filter(|s| !s.is_empty()).collect()
}

fn logical_lines(text: &str) -> Vec<LogicalLine> {
    let mut out = Vec::new();
    let mut pending: Option<LogicalLine> = None;
    let mut depth: i32 = 0;

    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim_end();
        let continued = trimmed.ends_with('\\');
        let body = trimmed.trim_end_matches('\\');

        let current = match pending.take() {
            Some(mut ll) => {
                ll.text.push(' ');
                ll.text.push_str(body.trim());
                ll
            }
            None => {
                if body.trim().is_empty() {
                    continue;
                }
                LogicalLine {
                    line: idx + 1,
                    indent: body.len() - body.trim_start().len(),
                    text: body.trim().to_string(),
                }
            }
        };

        depth += bracket_delta(body);
        if depth > 0 || continued {
            pending = Some(current);
        } else {
            depth = 0;
            out.push(current);
        }
    }

    out.extend(pending);
    out
}

/// Net bracket depth change of a line, ignoring brackets inside quotes.
fn bracket_delta(line: &str) -> i32 {
    let mut delta = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in line.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' => delta += 1,
            ')' | ']' | '}' => delta -= 1,
            _ => {}
        }
    }

    delta
}
