//! Folder keys and episode filenames.
//!
//! A feed's folder name is its normalized title: lowercase, every maximal run
//! of non-word characters collapsed to one `_`, truncated to 30 characters.
//! Normalization is lossy; two differently-titled feeds can truncate to the
//! same folder key (documented limitation). Episode filenames come from the
//! last URL path segment, sanitized for Linux filesystems.

/// Maximum length of a normalized feed title, in characters.
pub const TITLE_MAX_LEN: usize = 30;

/// Fallback filename when the URL path yields nothing usable.
const DEFAULT_FILENAME: &str = "episode.bin";

/// Normalize a raw feed title into its folder key. Deterministic and pure:
/// the same title always maps to the same key.
pub fn normalize_title(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_sep = false;
    for c in raw.chars() {
        if c.is_alphanumeric() || c == '_' {
            out.extend(c.to_lowercase());
            prev_sep = false;
        } else if !prev_sep {
            out.push('_');
            prev_sep = true;
        }
    }
    out.chars().take(TITLE_MAX_LEN).collect()
}

/// Derive the local filename for an enclosure URL: last path segment with
/// the query stripped, sanitized; `episode.bin` when nothing usable remains.
pub fn episode_filename(url: &str) -> String {
    let raw = match last_path_segment(url) {
        Some(seg) => seg,
        None => return DEFAULT_FILENAME.to_string(),
    };
    let sanitized = sanitize_filename(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Extract the last path segment from a URL; `None` if the URL cannot be
/// parsed or the path is empty/root.
fn last_path_segment(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Sanitize a candidate filename for Linux: replace `/`, `\`, NUL, control
/// chars, and whitespace with `_`; collapse runs; trim leading/trailing dot
/// and underscore noise; cap at 255 bytes (NAME_MAX) on a char boundary.
fn sanitize_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;
    for c in name.chars() {
        let keep = !(c == '\0' || c == '/' || c == '\\' || c.is_control() || c.is_whitespace());
        if keep {
            out.push(c);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}
