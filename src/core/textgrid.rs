//! Praat TextGrid model and parser.
//!
//! Reads both the long ("full") and short text formats that Praat and the
//! Montreal Forced Aligner emit. Point tiers are parsed and skipped; only
//! interval tiers carry alignment data.
//!
//! Tier resolution lives here too: an annotation file is expected to contain
//! one word-level and one phone-level interval tier, located by
//! case-insensitive substring match on the tier name. Multiple candidates for
//! the same kind are a named error rather than a silent pick.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// A single labelled time interval inside a tier. `start < end` is assumed
/// from the source annotation; the timing-continuity check is what audits it.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub label: String,
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Blank or whitespace-only labels mark silence/padding in MFA output.
    pub fn is_blank(&self) -> bool {
        self.label.trim().is_empty()
    }
}

/// A named interval tier.
#[derive(Debug, Clone)]
pub struct Tier {
    pub name: String,
    pub xmin: f64,
    pub xmax: f64,
    pub intervals: Vec<Interval>,
}

impl Tier {
    /// Intervals with non-blank labels, in tier order.
    pub fn labelled_intervals(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter().filter(|iv| !iv.is_blank())
    }
}

/// A parsed TextGrid: the interval tiers of one annotation file.
#[derive(Debug, Clone)]
pub struct TextGrid {
    pub xmin: f64,
    pub xmax: f64,
    pub tiers: Vec<Tier>,
}

#[derive(Debug, Error)]
pub enum TextGridError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("not a TextGrid file: {0}")]
    NotATextGrid(String),
    #[error("malformed TextGrid: {0}")]
    Malformed(String),
}

/// Which alignment tier a caller is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierKind {
    Word,
    Phone,
}

impl TierKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TierKind::Word => "word",
            TierKind::Phone => "phone",
        }
    }
}

impl std::fmt::Display for TierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Error)]
pub enum TierError {
    #[error("multiple {kind} tiers match by name: {names:?}")]
    Ambiguous { kind: TierKind, names: Vec<String> },
}

/// The word and phone tiers of a TextGrid, if present.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTiers<'a> {
    pub word: Option<&'a Tier>,
    pub phone: Option<&'a Tier>,
}

/// Locate the word and phone tiers by case-insensitive substring match.
///
/// A tier whose name contains "word" is a word tier and is not considered as
/// a phone candidate, so a name matching both substrings resolves as word.
/// More than one candidate for a kind is an ambiguity error; zero candidates
/// leaves that side `None` and the caller skips that extraction.
pub fn resolve_tiers(grid: &TextGrid) -> Result<ResolvedTiers<'_>, TierError> {
    let mut words: Vec<&Tier> = Vec::new();
    let mut phones: Vec<&Tier> = Vec::new();

    for tier in &grid.tiers {
        let name = tier.name.to_lowercase();
        if name.contains("word") {
            words.push(tier);
        } else if name.contains("phone") {
            phones.push(tier);
        }
    }

    if words.len() > 1 {
        return Err(TierError::Ambiguous {
            kind: TierKind::Word,
            names: words.iter().map(|t| t.name.clone()).collect(),
        });
    }
    if phones.len() > 1 {
        return Err(TierError::Ambiguous {
            kind: TierKind::Phone,
            names: phones.iter().map(|t| t.name.clone()).collect(),
        });
    }

    Ok(ResolvedTiers {
        word: words.first().copied(),
        phone: phones.first().copied(),
    })
}

impl TextGrid {
    pub fn from_file(path: &Path) -> Result<Self, TextGridError> {
        let content = fs::read_to_string(path).map_err(|source| TextGridError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse either TextGrid text format. Both reduce to the same value
    /// sequence once `key = value` prefixes and structural lines are
    /// stripped, so a single token stream serves both.
    pub fn parse(content: &str) -> Result<Self, TextGridError> {
        let tokens = tokenize(content);
        let mut stream = TokenStream::new(&tokens);

        let file_type = stream.expect_string("File type")?;
        if file_type != "ooTextFile" {
            return Err(TextGridError::NotATextGrid(format!(
                "unexpected file type {file_type:?}"
            )));
        }
        let object_class = stream.expect_string("Object class")?;
        if object_class != "TextGrid" {
            return Err(TextGridError::NotATextGrid(format!(
                "unexpected object class {object_class:?}"
            )));
        }

        let xmin = stream.expect_number("xmin")?;
        let xmax = stream.expect_number("xmax")?;
        stream.expect_exists_flag()?;
        let n_tiers = stream.expect_number("tier count")? as usize;

        let mut tiers = Vec::new();
        for _ in 0..n_tiers {
            let class = stream.expect_string("tier class")?;
            let name = stream.expect_string("tier name")?;
            let tier_xmin = stream.expect_number("tier xmin")?;
            let tier_xmax = stream.expect_number("tier xmax")?;
            let count = stream.expect_number("interval count")? as usize;

            match class.as_str() {
                "IntervalTier" => {
                    let mut intervals = Vec::with_capacity(count);
                    for _ in 0..count {
                        let start = stream.expect_number("interval xmin")?;
                        let end = stream.expect_number("interval xmax")?;
                        let label = stream.expect_string("interval text")?;
                        intervals.push(Interval { label, start, end });
                    }
                    tiers.push(Tier {
                        name,
                        xmin: tier_xmin,
                        xmax: tier_xmax,
                        intervals,
                    });
                }
                "TextTier" => {
                    // Point tier: consume number/mark pairs and move on.
                    for _ in 0..count {
                        stream.expect_number("point time")?;
                        stream.expect_string("point mark")?;
                    }
                }
                other => {
                    return Err(TextGridError::Malformed(format!(
                        "unknown tier class {other:?}"
                    )));
                }
            }
        }

        Ok(TextGrid { xmin, xmax, tiers })
    }
}

/// Reduce a TextGrid file to its value tokens.
///
/// Long-format lines carry `key = value`; short-format lines are bare values.
/// Structural lines (`item []:`, `intervals [3]:`) carry no value.
fn tokenize(content: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('"') {
            // Bare quoted value (short format); may itself contain '='.
            tokens.push(line.to_string());
        } else if let Some(eq) = line.find('=') {
            tokens.push(line[eq + 1..].trim().to_string());
        } else if line.starts_with("item") || line.starts_with("intervals") || line.starts_with("points") {
            continue;
        } else {
            tokens.push(line.to_string());
        }
    }
    tokens
}

struct TokenStream<'a> {
    tokens: &'a [String],
    pos: usize,
}

impl<'a> TokenStream<'a> {
    fn new(tokens: &'a [String]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn next(&mut self, what: &str) -> Result<&'a str, TextGridError> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| TextGridError::Malformed(format!("unexpected end of file, expected {what}")))?;
        self.pos += 1;
        Ok(token)
    }

    /// A quoted string value; Praat doubles embedded quotes.
    fn expect_string(&mut self, what: &str) -> Result<String, TextGridError> {
        let token = self.next(what)?;
        let inner = token
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .ok_or_else(|| TextGridError::Malformed(format!("expected quoted {what}, got {token:?}")))?;
        Ok(inner.replace("\"\"", "\""))
    }

    fn expect_number(&mut self, what: &str) -> Result<f64, TextGridError> {
        let token = self.next(what)?;
        token
            .parse::<f64>()
            .map_err(|_| TextGridError::Malformed(format!("expected numeric {what}, got {token:?}")))
    }

    fn expect_exists_flag(&mut self) -> Result<(), TextGridError> {
        let token = self.next("tiers flag")?;
        if token.contains("<exists>") {
            Ok(())
        } else {
            Err(TextGridError::Malformed(format!(
                "expected <exists> tiers flag, got {token:?}"
            )))
        }
    }
}
