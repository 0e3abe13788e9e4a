// src/graph/specifier.rs
//! Classifies module specifiers as builtin, relative or package.
//!
//! Precedence is builtin > relative > package.

use crate::lang::SyntaxFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecifierClass {
    Builtin,
    Relative,
    Package,
}

/// Modules Node also serves without the `node:` scheme. Scheme-only modules
/// such as `node:test` are left out so same-named packages stay packages.
const NODE_BUILTINS: &[&str] = &[
    "assert", "async_hooks", "buffer", "child_process", "cluster", "console", "constants",
    "crypto", "dgram", "diagnostics_channel", "dns", "domain", "events", "fs", "http", "http2",
    "https", "inspector", "module", "net", "os", "path", "perf_hooks", "process", "punycode",
    "querystring", "readline", "repl", "stream", "string_decoder", "sys", "timers",
    "tls", "trace_events", "tty", "url", "util", "v8", "vm", "wasi", "worker_threads", "zlib",
];

const PYTHON_BUILTINS: &[&str] = &[
    "__future__", "abc", "argparse", "array", "ast", "asyncio", "base64", "binascii", "bisect",
    "builtins", "bz2", "calendar", "cmath", "codecs", "collections", "concurrent",
    "configparser", "contextlib", "contextvars", "copy", "csv", "ctypes", "dataclasses",
    "datetime", "decimal", "difflib", "dis", "email", "enum", "errno", "faulthandler",
    "fnmatch", "fractions", "functools", "gc", "getpass", "gettext", "glob", "gzip",
    "hashlib", "heapq", "hmac", "html", "http", "importlib", "inspect", "io", "ipaddress",
    "itertools", "json", "keyword", "linecache", "locale", "logging", "lzma", "math",
    "mimetypes", "multiprocessing", "numbers", "operator", "os", "pathlib", "pickle",
    "pkgutil", "platform", "pprint", "queue", "random", "re", "secrets", "select", "shlex",
    "shutil", "signal", "socket", "sqlite3", "ssl", "stat", "statistics", "string",
    "struct", "subprocess", "sys", "sysconfig", "tarfile", "tempfile", "textwrap",
    "threading", "time", "timeit", "tokenize", "traceback", "types", "typing", "unicodedata",
    "unittest", "urllib", "uuid", "warnings", "weakref", "xml", "zipfile", "zlib", "zoneinfo",
];

/// Classifies `spec` under the rules of `family`.
#[must_use]
pub fn classify(spec: &str, family: SyntaxFamily) -> SpecifierClass {
    if is_builtin(spec, family) {
        return SpecifierClass::Builtin;
    }
    if is_relative(spec, family) {
        return SpecifierClass::Relative;
    }
    SpecifierClass::Package
}

#[must_use]
pub fn is_builtin(spec: &str, family: SyntaxFamily) -> bool {
    match family {
        SyntaxFamily::CurlyBrace => {
            if spec.starts_with("node:") || spec.starts_with("bun:") {
                return true;
            }
            let head = spec.split('/').next().unwrap_or(spec);
            NODE_BUILTINS.contains(&head)
        }
        SyntaxFamily::Indentation => {
            let head = spec.split('.').next().unwrap_or(spec);
            PYTHON_BUILTINS.contains(&head)
        }
    }
}

#[must_use]
pub fn is_relative(spec: &str, family: SyntaxFamily) -> bool {
    match family {
        SyntaxFamily::CurlyBrace => {
            spec == "."
                || spec == ".."
                || spec.starts_with("./")
                || spec.starts_with("../")
                || spec.starts_with('/')
        }
        SyntaxFamily::Indentation => spec.starts_with('.'),
    }
}
