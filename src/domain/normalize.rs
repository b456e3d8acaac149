// Lexical path helpers. Nothing here touches the filesystem.

const DIR_SEP: char = '/';

/// Lexically normalize a generated path.
///
/// Repeated separators collapse, `.` segments and a trailing separator are
/// dropped, and `..` segments are left in place. An empty result becomes `.`.
pub fn normalize(path: &str) -> String {
    let is_absolute = path.starts_with(DIR_SEP);
    let segments: Vec<&str> = path
        .split(DIR_SEP)
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    let joined = segments.join("/");
    match (is_absolute, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Directory portion of a template: everything before the final path segment.
///
/// Trailing separators of the directory part are stripped unless it consists
/// only of separators, matching POSIX `dirname` on the raw string.
pub fn dirname(template: &str) -> String {
    let Some(idx) = template.rfind(DIR_SEP) else {
        return String::new();
    };
    let head = &template[..=idx];
    if head.chars().all(|c| c == DIR_SEP) {
        return head.to_string();
    }
    head.trim_end_matches(DIR_SEP).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_separators() {
        assert_eq!(normalize("/parent_folder//sub_folder/my_data_.csv"), "/parent_folder/sub_folder/my_data_.csv");
        assert_eq!(normalize("a///b"), "a/b");
    }

    #[test]
    fn test_normalize_drops_single_dots_and_trailing_separator() {
        assert_eq!(normalize("./a/./b/"), "a/b");
        assert_eq!(normalize("/aaa/"), "/aaa");
    }

    #[test]
    fn test_normalize_keeps_parent_segments() {
        assert_eq!(normalize("a/../b"), "a/../b");
        assert_eq!(normalize("../x"), "../x");
    }

    #[test]
    fn test_normalize_empty_results() {
        assert_eq!(normalize(""), ".");
        assert_eq!(normalize("./"), ".");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("//"), "/");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for path in ["", "/", "a//b/./c/", "./../x//", "/a/b/../c", "x"] {
            let once = normalize(path);
            assert_eq!(normalize(&once), once, "{}", path);
        }
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("/{a}/{b}/{c}/{d}/{name}"), "/{a}/{b}/{c}/{d}");
        assert_eq!(dirname("{base}/{name}.{ext}"), "{base}");
        assert_eq!(dirname("{name}.{ext}"), "");
        assert_eq!(dirname("/{name}"), "/");
        assert_eq!(dirname("{a}//{name}"), "{a}");
    }
}
