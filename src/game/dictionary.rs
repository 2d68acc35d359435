//! Dictionary module for word validation
//!
//! The rule engine only needs a [`Lexicon`]: something that answers whether a
//! string is a word. [`WordList`] is the in-memory implementation the game
//! ships with, loaded from a plain or Hunspell-style `.dic` file.
//! Lookup is case-insensitive and treats composed and decomposed letters
//! alike: entries and queries are lowercased and NFC-normalized.

use derive_more::{Display, Error};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

/// Oracle deciding whether a string is a playable word.
pub trait Lexicon {
    fn is_valid_word(&self, word: &str) -> bool;
}

impl<L: Lexicon + ?Sized> Lexicon for &L {
    fn is_valid_word(&self, word: &str) -> bool {
        (**self).is_valid_word(word)
    }
}

impl<L: Lexicon + ?Sized> Lexicon for Box<L> {
    fn is_valid_word(&self, word: &str) -> bool {
        (**self).is_valid_word(word)
    }
}

/// Fallback list of common Estonian words, used when no word file is found
static BUILTIN_WORDS: &str = "\
aed arvuti auto eile ema emas eks ems homme kes kodu kool laud linn maa maja \
pere puu raamat raamatukogu sees ses sõber tere telefon tool täna tänav töö \
õpetaja õpik õpilane päike öö ülikool šokolaad žetoon";

static BUILTIN: Lazy<WordList> =
    Lazy::new(|| WordList::from_words(BUILTIN_WORDS.split_whitespace()));

/// Errors that can occur while loading a word list.
#[derive(Debug, Display, Error)]
pub enum DictionaryError {
    #[display("failed to read word list {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("could not determine data directory")]
    NoDataDirectory,
}

/// Set of known words, stored lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Build a list from raw entries. Entries are trimmed and lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| normalize(w.as_ref()))
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Parse a word file: one entry per line.
    ///
    /// Blank lines, `#` comments and a leading entry-count line are skipped.
    /// Hunspell affix flags (`word/FLAGS`) are stripped. Single letters and
    /// entries with non-alphabetic characters are dropped. Lines that are not
    /// valid UTF-8 are skipped with a warning.
    pub fn from_reader<R: BufRead>(mut reader: R) -> io::Result<Self> {
        let mut words = HashSet::new();
        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            let Ok(line) = std::str::from_utf8(&buf) else {
                warn!(line = line_no, "skipping word list line that is not UTF-8");
                continue;
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line_no == 1 && line.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }

            let entry = line.split('/').next().unwrap_or_default();
            let word = normalize(entry);
            if word.chars().count() > 1 && word.chars().all(char::is_alphabetic) {
                words.insert(word);
            }
        }
        Ok(Self { words })
    }

    /// Load a word file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let io_err = |source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        Self::from_reader(BufReader::new(file)).map_err(io_err)
    }

    /// Where the game looks for `words.txt` when no path is given
    pub fn default_path() -> Result<PathBuf, DictionaryError> {
        ProjectDirs::from("", "", "sonamang")
            .map(|dirs| dirs.data_dir().join("words.txt"))
            .ok_or(DictionaryError::NoDataDirectory)
    }

    /// Small embedded list of everyday words
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Returns the total number of words in the list
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Every known word that can be spelled from `letters`, each letter used
    /// at most as often as it appears. Longest words first.
    pub fn words_from_letters(&self, letters: &[char]) -> Vec<&str> {
        let rack: Vec<char> = letters
            .iter()
            .flat_map(|&c| c.to_lowercase())
            .nfc()
            .collect();
        let mut found: Vec<&str> = self
            .words
            .iter()
            .map(String::as_str)
            .filter(|word| can_spell(word, &rack))
            .collect();
        found.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        found
    }
}

impl Lexicon for WordList {
    fn is_valid_word(&self, word: &str) -> bool {
        self.words.contains(&normalize(word))
    }
}

/// Trim, lowercase and compose, so `o` + U+0303 and `õ` are the same letter
fn normalize(word: &str) -> String {
    word.trim().to_lowercase().nfc().collect()
}

/// Check if all letters in word are available in rack (respecting multiplicity)
fn can_spell(word: &str, rack: &[char]) -> bool {
    let mut available = rack.to_vec();
    word.chars().all(|c| match available.iter().position(|&r| r == c) {
        Some(pos) => {
            available.swap_remove(pos);
            true
        }
        None => false,
    })
}
