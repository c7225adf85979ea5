//! Script loading: best-effort decoding and newline normalization.

use std::path::Path;

use prompter_types::error::Result;

/// Shown when no script was given or the given path does not exist.
pub const PLACEHOLDER_SCRIPT: &str = "\
TELEPROMPTER

Open a file (O) or pass a script path on the command line.

Quick tips:
- Press Space to play/pause.
- Use Up/Down to adjust speed.
- Press + / - for font size.
- Press M to mirror for a beam-splitter.
- Press F11 for fullscreen.
- Press R to fit the scroll speed to the target duration.

Have a great read!
";

/// A decoded script ready for layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub text: String,
    /// Whether invalid UTF-8 had to be dropped.
    pub lossy: bool,
}

impl Script {
    pub fn placeholder() -> Self {
        Self {
            text: PLACEHOLDER_SCRIPT.to_string(),
            lossy: false,
        }
    }

    /// Decode raw bytes. Invalid UTF-8 sequences are dropped rather than
    /// failing the load.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let (text, lossy) = match std::str::from_utf8(bytes) {
            Ok(s) => (s.to_string(), false),
            Err(_) => (decode_dropping_invalid(bytes), true),
        };
        Self {
            text: normalize_newlines(&text),
            lossy,
        }
    }

    /// Read a script from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let script = Self::from_bytes(&bytes);
        if script.lossy {
            log::warn!(
                "{} is not valid UTF-8 -- invalid bytes were dropped",
                path.display()
            );
        }
        log::info!("Loaded script {} ({} bytes)", path.display(), bytes.len());
        Ok(script)
    }

    /// Load the startup script: a missing or absent path yields the
    /// placeholder instead of an error.
    pub fn load_or_placeholder(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            Some(p) => {
                log::warn!("Script {} not found -- using placeholder", p.display());
                Ok(Self::placeholder())
            },
            None => Ok(Self::placeholder()),
        }
    }
}

/// Convert `\r\n` and lone `\r` to `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn decode_dropping_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn valid_utf8_is_not_lossy() {
        let s = Script::from_bytes("héllo".as_bytes());
        assert_eq!(s.text, "héllo");
        assert!(!s.lossy);
    }

    #[test]
    fn invalid_bytes_are_dropped() {
        let s = Script::from_bytes(b"ab\xFFcd\xC3");
        assert_eq!(s.text, "abcd");
        assert!(s.lossy);
    }

    #[test]
    fn crlf_is_normalized() {
        let s = Script::from_bytes(b"one\r\ntwo\rthree\n");
        assert_eq!(s.text, "one\ntwo\nthree\n");
    }

    #[test]
    fn no_path_gives_placeholder() {
        let s = Script::load_or_placeholder(None).unwrap();
        assert_eq!(s.text, PLACEHOLDER_SCRIPT);
    }

    #[test]
    fn missing_path_gives_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let s = Script::load_or_placeholder(Some(&dir.path().join("absent.txt"))).unwrap();
        assert_eq!(s, Script::placeholder());
    }

    #[test]
    fn load_reads_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"Good evening.\r\nTonight's top story").unwrap();
        let s = Script::load(f.path()).unwrap();
        assert_eq!(s.text, "Good evening.\nTonight's top story");
    }

    #[test]
    fn explicit_load_of_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Script::load(&dir.path().join("absent.txt")).is_err());
    }
}
