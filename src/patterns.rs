/*!
 * Ignore pattern collection and matching
 *
 * Patterns come from every `.gitignore` in the tree plus the root-level
 * `.export_code_ignore`. Each line is joined onto the project root, so a
 * pattern found in `sub/.gitignore` is still anchored at the root and not at
 * `sub/`.
 */

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use regex::{Regex, RegexBuilder};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::utils::{EXTRA_IGNORE_FILE, GITIGNORE_FILE};

/// A single compiled ignore pattern
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pattern: String,
    /// The pattern as a full-path glob
    full: Regex,
    /// The pattern prefixed with `*/`, so it also matches below any ancestor
    suffix: Regex,
}

impl IgnoreRule {
    /// Compile a rule. Returns `None` when the pattern can be compiled
    /// neither as a glob nor as a literal.
    pub fn new(pattern: &str, ignore_case: bool) -> Option<Self> {
        let full = compile_pattern(pattern, ignore_case)?;
        let suffix = compile_pattern(&format!("*/{}", pattern), ignore_case)?;

        Some(Self {
            pattern: pattern.to_string(),
            full,
            suffix,
        })
    }

    /// The pattern text this rule was compiled from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Check a candidate path string against both variants of the pattern
    pub fn matches(&self, candidate: &str) -> bool {
        self.full.is_match(candidate) || self.suffix.is_match(candidate)
    }
}

fn compile_pattern(pattern: &str, ignore_case: bool) -> Option<Regex> {
    let build = |source: &str| {
        RegexBuilder::new(source)
            .case_insensitive(ignore_case)
            .build()
    };

    let literal = format!(r"\A{}\z", regex::escape(pattern));
    match build(&translate(pattern)).or_else(|_| build(&literal)) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("Skipping unusable ignore pattern {:?}: {}", pattern, e);
            None
        }
    }
}

/// Translate a shell glob into an anchored regex.
///
/// `*` matches any run of characters including `/` (consecutive stars are
/// one star), `?` matches one character, `[seq]` and `[!seq]` are classes.
/// A `[` without a closing `]` is literal, and so is everything else,
/// braces and a leading `^` inside a class included.
pub fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from(r"\A(?s:");
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => {
                let mut j = i;
                if j < chars.len() && chars[j] == '!' {
                    j += 1;
                }
                if j < chars.len() && chars[j] == ']' {
                    j += 1;
                }
                while j < chars.len() && chars[j] != ']' {
                    j += 1;
                }

                if j >= chars.len() {
                    out.push_str(r"\[");
                } else {
                    out.push_str(&translate_class(&chars[i..j]));
                    i = j + 1;
                }
            }
            c => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }

    out.push_str(r")\z");
    out
}

/// Body of a `[...]` class. `!` first negates; `-` between two members is a
/// range; every other punctuation character is escaped.
fn translate_class(body: &[char]) -> String {
    let (negated, body) = match body.split_first() {
        Some(('!', rest)) => (true, rest),
        _ => (false, body),
    };

    let mut class = String::from(if negated { "[^" } else { "[" });
    for (k, &ch) in body.iter().enumerate() {
        let is_range = ch == '-' && k > 0 && k + 1 < body.len();
        // `<` and `>` are word boundaries when escaped
        if !is_range && ch.is_ascii_punctuation() && ch != '<' && ch != '>' {
            class.push('\\');
        }
        class.push(ch);
    }
    class.push(']');
    class
}

/// The ordered set of ignore rules for one run
#[derive(Debug, Clone, Default)]
pub struct IgnorePatterns {
    rules: Vec<IgnoreRule>,
}

impl IgnorePatterns {
    /// Build rules from already root-anchored pattern strings
    pub fn from_patterns<I, S>(patterns: I, ignore_case: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .filter_map(|p| IgnoreRule::new(p.as_ref(), ignore_case))
            .collect();

        Self { rules }
    }

    /// Collect patterns from every `.gitignore` below the root, then from
    /// the root's `.export_code_ignore`.
    pub fn collect(config: &Config) -> Result<Self> {
        let patterns = collect_patterns(&config.root)?;
        info!("Collected {} ignore patterns", patterns.len());

        let collected = Self::from_patterns(&patterns, config.ignore_case);
        for rule in collected.rules() {
            debug!("Ignore pattern: {}", rule.pattern());
        }

        Ok(collected)
    }

    /// Compiled rules in collection order
    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check whether `path` is ignored by any rule
    pub fn is_ignored(&self, path: &Path) -> bool {
        let candidate = path.to_string_lossy();
        self.rules.iter().any(|rule| rule.matches(&candidate))
    }
}

/// Walk the whole tree (nothing is pruned here) and gather root-anchored
/// pattern strings in discovery order.
pub fn collect_patterns(root: &Path) -> Result<Vec<String>> {
    let mut patterns = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() || entry.file_name() != GITIGNORE_FILE {
            continue;
        }
        patterns.extend(read_ignore_file(entry.path(), root)?);
    }

    let extra = root.join(EXTRA_IGNORE_FILE);
    if extra.is_file() {
        patterns.extend(read_ignore_file(&extra, root)?);
    }

    Ok(patterns)
}

/// Read one ignore file, anchoring every pattern at `root`
pub fn read_ignore_file(path: &Path, root: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| ExportError::IgnoreFile {
        path: path.to_path_buf(),
        source,
    })?;

    let patterns = parse_ignore_lines(&content, root);
    debug!("Read {} patterns from {}", patterns.len(), path.display());
    Ok(patterns)
}

/// Turn ignore-file text into root-anchored patterns. Blank lines and `#`
/// comments are skipped.
pub fn parse_ignore_lines(content: &str, root: &Path) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| anchor_pattern(root, line))
        .collect()
}

/// Join `line` onto `root` component by component. Empty and `.`
/// components are dropped, so `./build/` and `build` name the same path; an
/// absolute line replaces the root.
fn anchor_pattern(root: &Path, line: &str) -> String {
    let mut path = if line.starts_with('/') {
        PathBuf::from("/")
    } else {
        root.to_path_buf()
    };

    for component in line.split('/').filter(|c| !c.is_empty() && *c != ".") {
        path.push(component);
    }

    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let root = Path::new("/project");
        let content = "# build output\n\ntarget\n   \n  *.log  \n#node_modules\n";

        let patterns = parse_ignore_lines(content, root);
        assert_eq!(patterns, vec!["/project/target", "/project/*.log"]);
    }

    #[test]
    fn test_parse_drops_trailing_slash() {
        let patterns = parse_ignore_lines("node_modules/\n", Path::new("/project"));
        assert_eq!(patterns, vec!["/project/node_modules"]);
    }

    #[test]
    fn test_parse_normalizes_dot_and_double_slash() {
        let patterns = parse_ignore_lines("./build\nsrc//gen/./out\n.\n", Path::new("/project"));
        assert_eq!(
            patterns,
            vec!["/project/build", "/project/src/gen/out", "/project"]
        );

        let rules = IgnorePatterns::from_patterns(&patterns, false);
        assert!(rules.is_ignored(Path::new("/project/build")));
    }

    #[test]
    fn test_parse_absolute_line_replaces_root() {
        let patterns = parse_ignore_lines("/tmp/cache\n", Path::new("/project"));
        assert_eq!(patterns, vec!["/tmp/cache"]);
    }

    #[test]
    fn test_star_crosses_directories() {
        let patterns = IgnorePatterns::from_patterns(["/project/*.log"], false);

        assert!(patterns.is_ignored(Path::new("/project/app.log")));
        assert!(patterns.is_ignored(Path::new("/project/deep/nested/app.log")));
        assert!(!patterns.is_ignored(Path::new("/project/app.txt")));
    }

    #[test]
    fn test_double_star_is_a_single_star() {
        let patterns = IgnorePatterns::from_patterns(["/project/**/node_modules"], false);

        assert!(!patterns.is_ignored(Path::new("/project/node_modules")));
        assert!(patterns.is_ignored(Path::new("/project/web/node_modules")));
    }

    #[test]
    fn test_braces_are_literal() {
        let patterns = IgnorePatterns::from_patterns(["/project/{a,b}.txt"], false);

        assert!(patterns.is_ignored(Path::new("/project/{a,b}.txt")));
        assert!(!patterns.is_ignored(Path::new("/project/a.txt")));
    }

    #[test]
    fn test_caret_in_class_is_literal() {
        let patterns = IgnorePatterns::from_patterns(["/project/[^a]b"], false);

        assert!(patterns.is_ignored(Path::new("/project/ab")));
        assert!(patterns.is_ignored(Path::new("/project/^b")));
        assert!(!patterns.is_ignored(Path::new("/project/cb")));
    }

    #[test]
    fn test_classes_ranges_and_negation() {
        let patterns = IgnorePatterns::from_patterns(["/project/v[0-9].[!t]xt"], false);

        assert!(patterns.is_ignored(Path::new("/project/v3.bxt")));
        assert!(!patterns.is_ignored(Path::new("/project/v3.txt")));
        assert!(!patterns.is_ignored(Path::new("/project/vx.bxt")));
    }

    #[test]
    fn test_question_mark_matches_one_character() {
        let patterns = IgnorePatterns::from_patterns(["/project/file?.rs"], false);

        assert!(patterns.is_ignored(Path::new("/project/file1.rs")));
        assert!(!patterns.is_ignored(Path::new("/project/file12.rs")));
    }

    #[test]
    fn test_suffix_variant_matches_below_any_ancestor() {
        let rule = IgnoreRule::new("build/out", false).unwrap();

        assert!(rule.matches("build/out"));
        assert!(rule.matches("/somewhere/else/build/out"));
        assert!(!rule.matches("/somewhere/build/output"));
    }

    #[test]
    fn test_case_sensitivity_policy() {
        let sensitive = IgnorePatterns::from_patterns(["/project/README.md"], false);
        assert!(!sensitive.is_ignored(Path::new("/project/readme.md")));

        let insensitive = IgnorePatterns::from_patterns(["/project/README.md"], true);
        assert!(insensitive.is_ignored(Path::new("/project/readme.md")));
    }

    #[test]
    fn test_negation_is_literal() {
        let patterns = IgnorePatterns::from_patterns(["/project/!keep.txt"], false);

        assert!(patterns.is_ignored(Path::new("/project/!keep.txt")));
        assert!(!patterns.is_ignored(Path::new("/project/keep.txt")));
    }

    #[test]
    fn test_unclosed_class_matches_literally() {
        let patterns = IgnorePatterns::from_patterns(["/project/[broken"], false);

        assert_eq!(patterns.len(), 1);
        assert!(patterns.is_ignored(Path::new("/project/[broken")));
        assert!(!patterns.is_ignored(Path::new("/project/b")));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let patterns = IgnorePatterns::from_patterns(["/project/a+b(1).txt"], false);

        assert!(patterns.is_ignored(Path::new("/project/a+b(1).txt")));
        assert!(!patterns.is_ignored(Path::new("/project/aab1.txt")));
    }
}
