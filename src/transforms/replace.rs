//! Regex replacement with the flag string and replacement syntax used by
//! persisted templates.
//!
//! Flags: `g` replaces every match instead of the first one, `i` ignores case,
//! `m` makes `^`/`$` match at line boundaries, `s` lets `.` match newlines and
//! `y` requires each match to start where the previous one ended (the first at
//! offset 0). `u` and `d` are accepted and have no effect since the engine is
//! always Unicode aware. Unknown or repeated flags invalidate the pattern.
//!
//! Replacement strings understand `$$`, `$&`, `` $` ``, `$'`, `$1`..`$99` and
//! `$<name>`. References that do not resolve are copied literally.

use regex::{Captures, Regex, RegexBuilder};

use crate::error::{Error, Result};
use crate::log;

/// A compiled pattern together with the flags that change how it is applied
#[derive(Debug, Clone)]
pub struct FlaggedRegex {
    pub regex: Regex,
    pub global: bool,
    pub sticky: bool,
}

/// Compiles the pattern with the given flag string.
///
/// # Errors
/// Returns `Error::InvalidRegex` naming the pattern when the pattern does not
/// compile or the flags are invalid.
pub fn compile(pattern: &str, flags: &str) -> Result<FlaggedRegex> {
    let invalid = |cause: String| Error::InvalidRegex {
        pattern: pattern.to_string(),
        cause,
    };

    let mut builder = RegexBuilder::new(pattern);
    let (mut global, mut sticky) = (false, false);
    let mut seen = String::new();

    for flag in flags.chars() {
        if seen.contains(flag) {
            return Err(invalid(format!("duplicate flag '{}'", flag)));
        }
        seen.push(flag);
        match flag {
            'g' => global = true,
            'y' => sticky = true,
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'u' | 'd' => {}
            other => return Err(invalid(format!("invalid flag '{}'", other))),
        }
    }

    let regex = builder.build().map_err(|e| invalid(e.to_string()))?;
    Ok(FlaggedRegex {
        regex,
        global,
        sticky,
    })
}

/// Checks whether the pattern and flags would compile
pub fn validate_regex(pattern: &str, flags: &str) -> bool {
    compile(pattern, flags).is_ok()
}

/// Compiles the pattern and replaces its matches in the text.
///
/// # Examples
/// ```
/// use clipform::transforms::replace::regex_replace;
///
/// let result = regex_replace("snake_case_name", "_", " ", "g").unwrap();
/// assert_eq!(result, "snake case name");
///
/// let swapped = regex_replace("John Smith", r"(\w+)\s(\w+)", "$2, $1", "").unwrap();
/// assert_eq!(swapped, "Smith, John");
/// ```
pub fn regex_replace(text: &str, pattern: &str, replacement: &str, flags: &str) -> Result<String> {
    let compiled = compile(pattern, flags).map_err(|e| {
        if let Error::InvalidRegex { cause, .. } = &e {
            crate::debug!(log::debug_message(
                format!("Rejected pattern \"{}\"", pattern),
                format!(" -> {}", cause)
            ));
        }
        e
    })?;
    Ok(replace_matches(text, &compiled, replacement))
}

/// Replaces the matches of an already compiled pattern.
///
/// The search resumes where the last match ended. An empty match moves the
/// next search one character forward, so empty matches next to a previous
/// match are still replaced.
pub fn replace_matches(text: &str, compiled: &FlaggedRegex, replacement: &str) -> String {
    let has_names = compiled.regex.capture_names().flatten().next().is_some();
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    let mut start = 0;

    while let Some(caps) = compiled.regex.captures_at(text, start) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        if compiled.sticky && whole.start() != start {
            break;
        }
        result.push_str(&text[last..whole.start()]);
        expand_replacement(&caps, text, replacement, has_names, &mut result);
        last = whole.end();
        if !compiled.global {
            break;
        }

        start = if whole.is_empty() {
            match text[last..].chars().next() {
                Some(c) => last + c.len_utf8(),
                None => break,
            }
        } else {
            last
        };
    }

    result.push_str(&text[last..]);
    result
}

/// Appends the replacement for one match, resolving `$` references
fn expand_replacement(
    caps: &Captures,
    haystack: &str,
    replacement: &str,
    has_names: bool,
    dst: &mut String,
) {
    let group = |index: usize| caps.get(index).map_or("", |m| m.as_str());
    let Some(whole) = caps.get(0) else {
        return;
    };
    let bytes = replacement.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            // Copy up to the next '$' (or the rest) in one go
            let next = replacement[i..]
                .find('$')
                .map_or(bytes.len(), |offset| i + offset);
            dst.push_str(&replacement[i..next]);
            i = next;
            continue;
        }
        if i + 1 >= bytes.len() {
            dst.push('$');
            break;
        }

        match bytes[i + 1] {
            b'$' => {
                dst.push('$');
                i += 2;
            }
            b'&' => {
                dst.push_str(whole.as_str());
                i += 2;
            }
            b'`' => {
                dst.push_str(&haystack[..whole.start()]);
                i += 2;
            }
            b'\'' => {
                dst.push_str(&haystack[whole.end()..]);
                i += 2;
            }
            b'<' if has_names => match replacement[i + 2..].find('>') {
                Some(close) => {
                    let name = &replacement[i + 2..i + 2 + close];
                    dst.push_str(caps.name(name).map_or("", |m| m.as_str()));
                    i += close + 3;
                }
                None => {
                    dst.push('$');
                    i += 1;
                }
            },
            d if d.is_ascii_digit() => {
                let groups = caps.len() - 1;
                let first = (d - b'0') as usize;
                let two_digits = bytes
                    .get(i + 2)
                    .filter(|b| b.is_ascii_digit())
                    .map(|b| first * 10 + (b - b'0') as usize);

                match two_digits {
                    Some(n) if n >= 1 && n <= groups => {
                        dst.push_str(group(n));
                        i += 3;
                    }
                    _ if first >= 1 && first <= groups => {
                        dst.push_str(group(first));
                        i += 2;
                    }
                    _ => {
                        dst.push('$');
                        i += 1;
                    }
                }
            }
            _ => {
                dst.push('$');
                i += 1;
            }
        }
    }
}
