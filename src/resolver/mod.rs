//! Root file resolution
//!
//! The file open in the editor is not necessarily the file the
//! toolchain should be invoked against. Resolution order:
//!
//! 1. Unsupported extensions resolve to nothing.
//! 2. A `% !TEX root = <path>` magic comment is followed, transitively,
//!    with a hop bound guarding against cycles.
//! 3. A file containing `\documentclass` is its own root.
//! 4. Otherwise the surrounding directory is scanned for a candidate
//!    master that `\input`s or `\include`s the starting file.
//! 5. Fallback: the file itself.

use regex_lite::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// File extensions the toolchain accepts as a root document
pub const TEX_EXTENSIONS: &[&str] = &["tex", "ltx", "latex"];

/// Maximum magic-comment hops before resolution gives up on the chain
const MAX_MAGIC_HOPS: usize = 8;

/// Directory depth for the master-file scan
const SCAN_DEPTH: usize = 2;

/// Whether the path has a supported root-document extension
pub fn is_tex_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| TEX_EXTENSIONS.iter().any(|t| e.eq_ignore_ascii_case(t)))
        .unwrap_or(false)
}

/// Resolve the root document for `file_path`
///
/// Returns `None` when the file type is unsupported; otherwise always
/// yields some path (falling back to the input itself).
pub fn resolve_root_file_path(file_path: &Path) -> Option<PathBuf> {
    if !is_tex_file(file_path) {
        return None;
    }

    let current = follow_magic_comments(file_path);
    if current != file_path {
        return Some(current);
    }

    if contains_documentclass(&current) {
        return Some(current);
    }

    if let Some(master) = scan_for_master(file_path) {
        return Some(master);
    }

    Some(current)
}

/// Follow `% !TEX root = ...` comments from `start`, bounded
fn follow_magic_comments(start: &Path) -> PathBuf {
    let mut visited = HashSet::new();
    let mut current = start.to_path_buf();
    visited.insert(current.clone());

    for _ in 0..MAX_MAGIC_HOPS {
        let Some(next) = magic_root(&current) else {
            break;
        };
        if !visited.insert(next.clone()) {
            // Cycle in the root comments; stop at the last sane hop.
            break;
        }
        current = next;
    }

    current
}

/// Extract the magic root target of `path`, if one exists on disk
fn magic_root(path: &Path) -> Option<PathBuf> {
    let content = read_lossy(path)?;
    let re = Regex::new(r"(?m)^%\s*!\s*T[Ee]X\s+root\s*=\s*(.+?)\s*$").unwrap();
    let captures = re.captures(&content)?;
    let target = captures.get(1)?.as_str();

    let resolved = normalize(&path.parent()?.join(target));
    if resolved.is_file() && is_tex_file(&resolved) {
        Some(resolved)
    } else {
        None
    }
}

/// Whether the file declares a document class
fn contains_documentclass(path: &Path) -> bool {
    let Some(content) = read_lossy(path) else {
        return false;
    };
    let re = Regex::new(r"(?m)^\s*\\documentclass(\[[^\]]*\])?\{").unwrap();
    re.is_match(&content)
}

/// Scan the surrounding directory for a master file referencing `file_path`
///
/// A candidate must declare a document class and `\input`/`\include`
/// the starting file by stem. Candidates are visited in sorted order
/// so resolution is deterministic.
fn scan_for_master(file_path: &Path) -> Option<PathBuf> {
    let dir = file_path.parent()?;
    let stem = file_path.file_stem()?.to_str()?;
    let reference = Regex::new(&format!(
        r"\\(?:input|include)\{{\.?/?(?:[^}}]*/)?{}(?:\.tex)?\}}",
        escape_regex(stem)
    ))
    .ok()?;

    let mut candidates: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(SCAN_DEPTH)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_tex_file(path) && path != file_path)
        .collect();
    candidates.sort();

    candidates.into_iter().find(|candidate| {
        contains_documentclass(candidate)
            && read_lossy(candidate)
                .map(|content| reference.is_match(&content))
                .unwrap_or(false)
    })
}

/// Read a file tolerating non-UTF-8 bytes (TeX sources often are)
fn read_lossy(path: &Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Collapse `.` and `..` components without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Escape regex metacharacters in a file stem
fn escape_regex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if "\\.+*?()|[]{}^$#".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
