// src/graph/extract/curly.rs
//! ES module, CommonJS and dynamic-import declarations.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::LineIndex;
use crate::graph::comments;
use crate::graph::declarations::{ExportDecl, ExportKind, FileDeclarations, ImportDecl};
use crate::graph::specifier;
use crate::lang::SyntaxFamily;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("Invalid declaration pattern: {e}"))
}

static STATIC_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    re(r#"(?m)(?:^|;)[ \t]*(?P<kw>import)\s+(?P<ty>type\s+)?(?P<clause>[\w$\s{},*]+?)\s*from\s*['"](?P<src>[^'"\n]+)['"]"#)
});
static SIDE_EFFECT_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    re(r#"(?m)(?:^|;)[ \t]*(?P<kw>import)\s*['"](?P<src>[^'"\n]+)['"]"#)
});
static REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    re(r#"(?:(?:const|let|var)\s+(?P<bind>\{[^}]*\}|[\w$]+)\s*=\s*)?\brequire\s*\(\s*['"](?P<src>[^'"\n]+)['"]\s*\)"#)
});
static DYNAMIC_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    re(r#"\bimport\s*\(\s*['"](?P<src>[^'"\n]+)['"]\s*\)"#)
});

const EXPORT_HEAD: &str = r"(?m)(?:^|;)[ \t]*(?P<kw>export)\s+";

static EXPORT_DEFAULT: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(r"{EXPORT_HEAD}default\s+(?P<what>async\s+function\b|function\b|abstract\s+class\b|class\b)?"))
});
static EXPORT_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(r"{EXPORT_HEAD}(?:declare\s+)?(?:async\s+)?function\s*\*?\s*(?P<name>[\w$]+)"))
});
static EXPORT_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(r"{EXPORT_HEAD}(?:declare\s+)?(?:abstract\s+)?class\s+(?P<name>[\w$]+)"))
});
static EXPORT_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(r"{EXPORT_HEAD}(?:declare\s+)?(?:const|let|var)\s+(?P<name>[\w$]+)"))
});
static EXPORT_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(r"{EXPORT_HEAD}(?:declare\s+)?type\s+(?P<name>[\w$]+)"))
});
static EXPORT_INTERFACE: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(r"{EXPORT_HEAD}(?:declare\s+)?interface\s+(?P<name>[\w$]+)"))
});
static EXPORT_ENUM: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(r"{EXPORT_HEAD}(?:declare\s+)?(?:const\s+)?enum\s+(?P<name>[\w$]+)"))
});
static EXPORT_LIST: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(r#"{EXPORT_HEAD}(?P<ty>type\s+)?\{{(?P<names>[^}}]*)\}}(?:\s*from\s*['"](?P<src>[^'"\n]+)['"])?"#))
});
static EXPORT_STAR: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(r#"{EXPORT_HEAD}\*(?:\s+as\s+(?P<ns>[\w$]+))?\s*from\s*['"](?P<src>[^'"\n]+)['"]"#))
});
static MODULE_EXPORTS: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?m)(?:^|;)[ \t]*(?P<kw>module\.exports)\s*=\s*(?P<rhs>\{[^}]*\}|async\s+function\b|function\b|class\b)?")
});
static EXPORTS_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?m)(?:^|;)[ \t]*(?P<kw>(?:module\.)?exports)\.(?P<name>[\w$]+)\s*=\s*(?P<rhs>[^=\s][^\n]*)")
});

/// Accumulates declarations tagged with their byte offset so the final
/// lists come out in source order regardless of which pattern found them.
struct Collector {
    lines: LineIndex,
    imports: Vec<(usize, ImportDecl)>,
    exports: Vec<(usize, ExportDecl)>,
}

impl Collector {
    fn new(text: &str) -> Self {
        Self {
            lines: LineIndex::new(text),
            imports: Vec::new(),
            exports: Vec::new(),
        }
    }

    fn new_import(&self, offset: usize, source: &str) -> ImportDecl {
        let class = specifier::classify(source, SyntaxFamily::CurlyBrace);
        ImportDecl::new(source, class, self.lines.line_of(offset))
    }

    fn push_import(&mut self, offset: usize, decl: ImportDecl) {
        self.imports.push((offset, decl));
    }

    fn export(&mut self, offset: usize, decl: impl FnOnce(usize) -> ExportDecl) {
        let line = self.lines.line_of(offset);
        self.exports.push((offset, decl(line)));
    }

    fn finish(mut self) -> FileDeclarations {
        self.imports.sort_by_key(|(offset, _)| *offset);
        self.exports.sort_by_key(|(offset, _)| *offset);
        FileDeclarations {
            imports: self.imports.into_iter().map(|(_, d)| d).collect(),
            exports: self.exports.into_iter().map(|(_, d)| d).collect(),
            errors: Vec::new(),
        }
    }
}

pub(super) fn extract(content: &str) -> FileDeclarations {
    let text = comments::strip_curly(content);
    let mut out = Collector::new(&text);

    collect_imports(&text, &mut out);
    collect_exports(&text, &mut out);
    collect_commonjs_exports(&text, &mut out);

    out.finish()
}

fn start_of(caps: &Captures<'_>, group: &str) -> usize {
    caps.name(group)
        .or_else(|| caps.get(0))
        .map_or(0, |m| m.start())
}

fn collect_imports(text: &str, out: &mut Collector) {
    for caps in STATIC_IMPORT.captures_iter(text) {
        let clause = parse_clause(caps.name("clause").map_or("", |m| m.as_str()));
        let offset = start_of(&caps, "kw");
        let mut decl = out.new_import(offset, &caps["src"]);
        decl.has_default = clause.has_default;
        decl.has_namespace = clause.has_namespace;
        decl.is_type_only = caps.name("ty").is_some() || clause.all_inline_type;
        decl.imported_names = clause.names;
        out.push_import(offset, decl);
    }

    for caps in SIDE_EFFECT_IMPORT.captures_iter(text) {
        let offset = start_of(&caps, "kw");
        let decl = out.new_import(offset, &caps["src"]);
        out.push_import(offset, decl);
    }

    for caps in REQUIRE.captures_iter(text) {
        let names = match caps.name("bind").map(|m| m.as_str()) {
            Some(bind) if bind.starts_with('{') => Some(destructured_names(bind)),
            Some(_) => None,
            None => Some(Vec::new()),
        };
        let offset = start_of(&caps, "bind");
        let mut decl = out.new_import(offset, &caps["src"]);
        match names {
            Some(names) => decl.imported_names = names,
            None => {
                decl.has_default = true;
                decl.imported_names = vec!["default".to_string()];
            }
        }
        out.push_import(offset, decl);
    }

    for caps in DYNAMIC_IMPORT.captures_iter(text) {
        let offset = start_of(&caps, "src");
        let mut decl = out.new_import(offset, &caps["src"]);
        decl.is_dynamic = true;
        decl.has_namespace = true;
        decl.imported_names = vec!["*".to_string()];
        out.push_import(offset, decl);
    }
}

#[derive(Default)]
struct ImportClause {
    names: Vec<String>,
    has_default: bool,
    has_namespace: bool,
    all_inline_type: bool,
}

/// Parses `Default, { a, type B, c as d }` / `* as ns` clause text.
fn parse_clause(clause: &str) -> ImportClause {
    let mut parsed = ImportClause::default();
    let mut rest = clause.trim();

    if !rest.starts_with('{') && !rest.starts_with('*') {
        let (head, tail) = rest.split_once(',').unwrap_or((rest, ""));
        if !head.trim().is_empty() {
            parsed.has_default = true;
            parsed.names.push("default".to_string());
        }
        rest = tail.trim();
    }

    if rest.starts_with('*') {
        parsed.has_namespace = true;
        parsed.names.push("*".to_string());
        return parsed;
    }

    if let Some(inner) = rest.strip_prefix('{') {
        let inner = inner.split('}').next().unwrap_or(inner);
        let mut named = 0;
        let mut inline_types = 0;
        for spec in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (spec, is_type) = strip_inline_type(spec);
            named += 1;
            if is_type {
                inline_types += 1;
            }
            parsed.names.push(source_name(spec).to_string());
        }
        parsed.all_inline_type =
            named > 0 && inline_types == named && !parsed.has_default && !parsed.has_namespace;
    }

    parsed
}

fn strip_inline_type(spec: &str) -> (&str, bool) {
    match spec.strip_prefix("type") {
        Some(rest) if rest.starts_with(char::is_whitespace) => (rest.trim_start(), true),
        _ => (spec, false),
    }
}

/// `a as b` -> `a`.
fn source_name(spec: &str) -> &str {
    spec.split_whitespace().next().unwrap_or(spec)
}

/// `a as b` -> `b`; plain `a` -> `a`.
fn exported_name(spec: &str) -> &str {
    let mut parts = spec.split_whitespace();
    let first = parts.next().unwrap_or(spec);
    match (parts.next(), parts.next()) {
        (Some("as"), Some(alias)) => alias,
        _ => first,
    }
}

/// `{ a, b: c, ...rest }` -> `[a, b]`.
fn destructured_names(binding: &str) -> Vec<String> {
    binding
        .trim_matches(|c| c == '{' || c == '}')
        .split(',')
        .map(|part| part.split(':').next().unwrap_or(part).trim())
        .filter(|name| !name.is_empty() && !name.starts_with("..."))
        .map(str::to_string)
        .collect()
}

fn collect_exports(text: &str, out: &mut Collector) {
    for caps in EXPORT_DEFAULT.captures_iter(text) {
        let kind = match caps.name("what").map(|m| m.as_str()) {
            Some(w) if w.ends_with("function") => ExportKind::Function,
            Some(_) => ExportKind::Class,
            None => ExportKind::Unknown,
        };
        out.export(start_of(&caps, "kw"), |line| ExportDecl::default_export(kind, line));
    }

    let simple: [(&Regex, ExportKind); 6] = [
        (&EXPORT_FUNCTION, ExportKind::Function),
        (&EXPORT_CLASS, ExportKind::Class),
        (&EXPORT_VARIABLE, ExportKind::Variable),
        (&EXPORT_TYPE, ExportKind::Type),
        (&EXPORT_INTERFACE, ExportKind::Interface),
        (&EXPORT_ENUM, ExportKind::Enum),
    ];
    for (pattern, kind) in simple {
        for caps in pattern.captures_iter(text) {
            let name = &caps["name"];
            // `export const enum X` is picked up by the enum pattern
            if kind == ExportKind::Variable && name == "enum" {
                continue;
            }
            out.export(start_of(&caps, "kw"), |line| ExportDecl::named(name, kind, line));
        }
    }

    for caps in EXPORT_LIST.captures_iter(text) {
        collect_export_list(&caps, out);
    }

    for caps in EXPORT_STAR.captures_iter(text) {
        let src = &caps["src"];
        let name = caps.name("ns").map_or("*", |m| m.as_str());
        let offset = start_of(&caps, "kw");
        out.export(offset, |line| ExportDecl::re_export(name, src, line));
        let mut decl = out.new_import(offset, src);
        decl.has_namespace = true;
        decl.imported_names = vec!["*".to_string()];
        out.push_import(offset, decl);
    }
}

fn collect_export_list(caps: &Captures<'_>, out: &mut Collector) {
    let offset = start_of(caps, "kw");
    let stmt_type = caps.name("ty").is_some();
    let src = caps.name("src").map(|m| m.as_str());
    let mut source_names = Vec::new();
    let mut all_type = true;

    for spec in caps["names"].split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (spec, inline_type) = strip_inline_type(spec);
        let is_type = stmt_type || inline_type;
        all_type &= is_type;
        let name = exported_name(spec);
        source_names.push(source_name(spec).to_string());

        out.export(offset, |line| {
            let mut decl = match src {
                Some(s) => ExportDecl::re_export(name, s, line),
                None => ExportDecl::named(name, ExportKind::Unknown, line),
            };
            decl.is_type = is_type;
            decl
        });
    }

    if let Some(src) = src {
        let mut decl = out.new_import(offset, src);
        decl.is_type_only = !source_names.is_empty() && all_type;
        decl.has_default = source_names.iter().any(|n| n == "default");
        decl.imported_names = source_names;
        out.push_import(offset, decl);
    }
}

fn collect_commonjs_exports(text: &str, out: &mut Collector) {
    for caps in MODULE_EXPORTS.captures_iter(text) {
        let offset = start_of(&caps, "kw");
        match caps.name("rhs").map(|m| m.as_str()) {
            Some(obj) if obj.starts_with('{') => {
                for key in object_keys(obj) {
                    out.export(offset, |line| ExportDecl::named(&key, ExportKind::Unknown, line));
                }
            }
            Some(rhs) => {
                let kind = if rhs.ends_with("function") {
                    ExportKind::Function
                } else {
                    ExportKind::Class
                };
                out.export(offset, |line| ExportDecl::default_export(kind, line));
            }
            None => {
                out.export(offset, |line| ExportDecl::default_export(ExportKind::Unknown, line));
            }
        }
    }

    for caps in EXPORTS_PROPERTY.captures_iter(text) {
        let rhs = caps["rhs"].trim_start();
        let kind = if rhs.starts_with("function") || rhs.starts_with("async function") {
            ExportKind::Function
        } else if rhs.starts_with("class") {
            ExportKind::Class
        } else {
            ExportKind::Unknown
        };
        let name = &caps["name"];
        out.export(start_of(&caps, "kw"), |line| ExportDecl::named(name, kind, line));
    }
}

/// `{ a, b: impl, c() {} }` -> keys; values containing braces are cut short.
fn object_keys(obj: &str) -> Vec<String> {
    obj.trim_matches(|c| c == '{' || c == '}')
        .split(',')
        .filter_map(|entry| {
            let key = entry.split(|c| c == ':' || c == '(').next()?.trim();
            let valid = !key.is_empty()
                && key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$');
            valid.then(|| key.to_string())
        })
        .collect()
}
