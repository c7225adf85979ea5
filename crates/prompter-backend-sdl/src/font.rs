//! TrueType font lookup and caching on top of SDL2_ttf.
//!
//! A requested family is resolved to a font file once: an explicit
//! `font_path` wins, then a file in the system font directories whose stem
//! matches the family, then the first available fallback face.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use sdl2::ttf::{Font, Sdl2TtfContext};

use prompter_types::backend::FontSpec;
use prompter_types::error::{PrompterError, Result};

/// Faces tried, in order, when the requested family is not installed.
pub const FALLBACK_FAMILIES: &[&str] = &[
    "DejaVuSans",
    "LiberationSans-Regular",
    "Arial",
    "Helvetica",
    "FreeSans",
];

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// Directories searched for installed fonts.
pub fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/Library/Fonts"),
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("C:\\Windows\\Fonts"),
    ];
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join(".fonts"));
        dirs.push(home.join("Library/Fonts"));
    }
    dirs
}

/// Find a font file whose stem matches `family` (case-insensitive, ignoring
/// spaces) anywhere under `dirs`.
pub fn find_font_file(family: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let wanted = normalize_family(family);
    if wanted.is_empty() {
        return None;
    }
    dirs.iter().find_map(|dir| search_dir(dir, &wanted, 0))
}

/// Resolve the font file for `family`, honoring an explicit override.
pub fn resolve_font_file(
    family: &str,
    explicit: Option<&Path>,
    dirs: &[PathBuf],
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        log::warn!("Font file {} not found -- searching by family", path.display());
    }
    if let Some(path) = find_font_file(family, dirs) {
        return Some(path);
    }
    let fallback = FALLBACK_FAMILIES
        .iter()
        .find_map(|f| find_font_file(f, dirs));
    if let Some(path) = &fallback {
        log::warn!("Font '{family}' not found -- using {}", path.display());
    }
    fallback
}

fn normalize_family(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn search_dir(dir: &Path, wanted: &str, depth: u32) -> Option<PathBuf> {
    if depth > 4 {
        return None;
    }
    let entries = std::fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
            continue;
        }
        let is_font = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| FONT_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)));
        let stem_matches = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| normalize_family(s) == wanted);
        if is_font && stem_matches {
            return Some(path);
        }
    }
    subdirs.sort();
    subdirs
        .iter()
        .find_map(|sub| search_dir(sub, wanted, depth + 1))
}

/// Loaded fonts keyed by family and size.
pub struct FontCache {
    ttf: &'static Sdl2TtfContext,
    explicit: Option<PathBuf>,
    dirs: Vec<PathBuf>,
    files: RefCell<HashMap<String, PathBuf>>,
    fonts: RefCell<HashMap<FontSpec, Font<'static, 'static>>>,
}

impl FontCache {
    pub fn new(ttf: &'static Sdl2TtfContext, explicit: Option<PathBuf>) -> Self {
        Self {
            ttf,
            explicit,
            dirs: system_font_dirs(),
            files: RefCell::new(HashMap::new()),
            fonts: RefCell::new(HashMap::new()),
        }
    }

    /// Run `f` with the loaded font for `spec`, loading it on first use.
    pub fn with_font<R>(&self, spec: &FontSpec, f: impl FnOnce(&Font<'static, 'static>) -> R) -> Result<R> {
        if let Some(font) = self.fonts.borrow().get(spec) {
            return Ok(f(font));
        }
        let path = self.file_for(&spec.family)?;
        let font = self
            .ttf
            .load_font(&path, spec.size.max(1))
            .map_err(|e| PrompterError::Font(format!("{}: {e}", path.display())))?;
        log::debug!("Loaded font {} at {}pt", path.display(), spec.size);
        let result = f(&font);
        self.fonts.borrow_mut().insert(spec.clone(), font);
        Ok(result)
    }

    fn file_for(&self, family: &str) -> Result<PathBuf> {
        if let Some(path) = self.files.borrow().get(family) {
            return Ok(path.clone());
        }
        let path = resolve_font_file(family, self.explicit.as_deref(), &self.dirs).ok_or_else(
            || PrompterError::Font(format!("no usable font found for '{family}'")),
        )?;
        log::info!("Font '{family}' resolved to {}", path.display());
        self.files
            .borrow_mut()
            .insert(family.to_string(), path.clone());
        Ok(path)
    }
}
