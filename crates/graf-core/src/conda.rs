//! Parsing of `conda env list` output.

use regex::Regex;

/// Find the `conda env list` line describing environment `name`.
///
/// `conda env list` prints something like:
///
/// ```text
/// # conda environments:
/// base                  /opt/miniconda
/// graf               *  /opt/miniconda/envs/graf
/// ```
///
/// A line matches only when it starts with `name` followed by whitespace,
/// so `graf` does not match `grafold`.
pub fn find_env_line<'a, S: AsRef<str>>(lines: &'a [S], name: &str) -> Option<&'a str> {
    let pattern = Regex::new(&format!(r"^{}\s", regex::escape(name))).ok()?;
    lines
        .iter()
        .map(AsRef::<str>::as_ref)
        .find(|line| pattern.is_match(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &[&str] = &[
        "# conda environments:",
        "#",
        "base                  /opt/miniconda",
        "grafold               /opt/miniconda/envs/grafold",
        "graf               *  /opt/miniconda/envs/graf",
    ];

    #[test]
    fn test_matches_exact_name() {
        assert_eq!(
            find_env_line(LISTING, "graf"),
            Some("graf               *  /opt/miniconda/envs/graf")
        );
    }

    #[test]
    fn test_prefix_does_not_match() {
        let lines = ["grafold               /opt/miniconda/envs/grafold"];
        assert_eq!(find_env_line(&lines, "graf"), None);
    }

    #[test]
    fn test_name_must_start_the_line() {
        let lines = ["  graf   /opt/miniconda/envs/graf", "mygraf /x"];
        assert_eq!(find_env_line(&lines, "graf"), None);
    }

    #[test]
    fn test_name_without_trailing_whitespace_is_no_match() {
        let lines = ["graf"];
        assert_eq!(find_env_line(&lines, "graf"), None);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let lines = ["g.af  /x", "graf  /y"];
        assert_eq!(find_env_line(&lines, "g.af"), Some("g.af  /x"));
        assert_eq!(find_env_line(&["gxaf  /x"], "g.af"), None);
    }

    #[test]
    fn test_owned_lines() {
        let lines = vec!["base /opt".to_string(), "graf /opt/envs/graf".to_string()];
        assert!(find_env_line(&lines, "graf").is_some());
    }
}
