use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Reads a delimited list of counts such as `10/3/7/9`. Empty input is an empty list.
pub fn parse_counts(s: &str, delimiter: &str) -> Option<Vec<u32>> {
    let s = s.trim();
    if s.is_empty() {
        return Some(vec![]);
    }
    s.split(delimiter)
        .map(|c| c.trim().parse::<u32>().ok())
        .collect()
}

/// Reads a yes/no cell. An empty cell is false.
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "0" => Some(false),
        "true" | "yes" | "1" | "x" => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        assert_eq!(parse_counts("10/3/7/9", "/"), Some(vec![10, 3, 7, 9]));
        assert_eq!(parse_counts(" 1 | 2 ", "|"), Some(vec![1, 2]));
        assert_eq!(parse_counts("", "/"), Some(vec![]));
        assert_eq!(parse_counts("1/two", "/"), None);
        assert_eq!(parse_counts("1/-2", "/"), None);
    }

    #[test]
    fn flags() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("x"), Some(true));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/data/april/weapons.csv"), "weapons.csv");
        assert_eq!(simplify_file_name("weapons.csv"), "weapons.csv");
    }
}
