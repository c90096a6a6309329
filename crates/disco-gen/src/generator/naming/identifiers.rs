use std::sync::LazyLock;

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Base sanitization: transliterates to ASCII, replaces invalid characters
/// with underscores, collapses consecutive underscores, and trims any
/// leading or trailing underscores.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// PascalCase model-name segment from one raw identifier segment.
pub(crate) fn to_model_segment(segment: &str) -> String {
  sanitize(segment).to_pascal_case()
}

/// Synthesized model name for an inline method body.
///
/// Joins the PascalCased identity segments (the dotted method id, or the
/// resource/method key chain when the method has no id) and appends the
/// body slot, e.g. `storage.objects.insert` + `Request` ->
/// `StorageObjectsInsertRequest`. Stable across runs on the same document.
pub(crate) fn synthesized_model_name<'a>(
  segments: impl IntoIterator<Item = &'a str>,
  slot: &str,
) -> String {
  let mut name: String = segments.into_iter().map(|segment| to_model_segment(segment)).collect();
  name.push_str(slot);
  name
}
