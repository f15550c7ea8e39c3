//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Log-safe truncation for large strings, cut on a char boundary.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

/// First/last few characters of a secret, only when it is long enough that
/// the visible parts stay a small fraction of it.
pub fn mask_secret(secret: &str) -> (String, String) {
  const PREFIX: usize = 3;
  const SUFFIX: usize = 4;
  const MIN_LEN: usize = 12;

  let chars: Vec<char> = secret.chars().collect();
  if chars.len() < MIN_LEN {
    return (String::new(), String::new());
  }
  let prefix = chars[..PREFIX].iter().collect();
  let suffix = chars[chars.len() - SUFFIX..].iter().collect();
  (prefix, suffix)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fills_every_occurrence() {
    let out = fill_template("{a} and {b} and {a}", &[("a", "x"), ("b", "y")]);
    assert_eq!(out, "x and y and x");
  }

  #[test]
  fn truncation_respects_char_boundaries() {
    let s = "ééééé";
    let t = trunc_for_log(s, 3);
    assert!(t.starts_with('é'));
    assert!(t.ends_with("(10 bytes total)"));
    assert_eq!(trunc_for_log("short", 10), "short");
  }

  #[test]
  fn short_secrets_are_fully_hidden() {
    assert_eq!(mask_secret("sk-short"), (String::new(), String::new()));
    let (p, s) = mask_secret("sk-abcdefghijklmnop1234");
    assert_eq!(p, "sk-");
    assert_eq!(s, "1234");
  }
}
