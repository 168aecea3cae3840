use crate::options::Replacements;
use std::path::Path;

/// Placeholder in a replacement value that stands for the destination's solution folder
pub const SOLUTION_NAME_PLACEHOLDER: &str = "#SolutionName#";

/// Used for the placeholder when the destination path is too shallow to name a solution
pub const SOLUTION_NAME_FALLBACK: &str = "SolutionName";

/// Build the content written to one destination
///
/// Rules are applied in order to the accumulating text, so a later rule can match
/// text that an earlier rule inserted.
///
/// # Arguments
/// * `content` - Source file content
/// * `replacements` - Ordered literal replacement rules
/// * `destination` - Path of the destination file
///
/// # Returns
/// * `String` - Content for this destination
pub fn transform(content: &str, replacements: &Replacements, destination: &Path) -> String {
    let mut result = content.to_string();

    for rule in replacements.iter() {
        if rule.to.contains(SOLUTION_NAME_PLACEHOLDER) {
            let to = rule.to.replace(SOLUTION_NAME_PLACEHOLDER, &solution_name(destination));
            result = result.replace(&rule.from, &to);
        } else {
            result = result.replace(&rule.from, &rule.to);
        }
    }

    result
}

/// Name of the directory two levels above the destination file, i.e. the parent
/// of the folder the file is written into
pub fn solution_name(destination: &Path) -> String {
    destination
        .parent()
        .and_then(Path::parent)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| SOLUTION_NAME_FALLBACK.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(values: &[&str]) -> Replacements {
        Replacements::from_pairs(values)
    }

    #[test]
    fn test_no_rules_returns_content_unchanged() {
        let content = "line one\r\nline two\n\tünïcødé";
        let result = transform(content, &Replacements::default(), Path::new("/a/b/c.txt"));
        assert_eq!(result, content);
    }

    #[test]
    fn test_literal_global_replacement() {
        let replacements = rules(&["foo.bar", "x", "(.*)", "y"]);
        let result = transform("foo.bar foo.bar (.*)", &replacements, Path::new("c.txt"));
        assert_eq!(result, "x x y");
    }

    #[test]
    fn test_later_rule_sees_earlier_replacement() {
        let content = "X marks the spot";
        let result = transform(content, &rules(&["X", "Y", "Y", "X"]), Path::new("c.txt"));
        assert_eq!(result, "X marks the spot");

        let result = transform("X and Y", &rules(&["X", "Y", "Y", "Z"]), Path::new("c.txt"));
        assert_eq!(result, "Z and Z");
    }

    #[test]
    fn test_solution_name_from_grandparent() {
        let destination = Path::new("/root/Workspace/MySolution/SubA/target.txt");
        assert_eq!(solution_name(destination), "MySolution");

        let result = transform(
            "name=NAME",
            &rules(&["NAME", "#SolutionName#-suffix"]),
            destination,
        );
        assert_eq!(result, "name=MySolution-suffix");
    }

    #[test]
    fn test_solution_name_falls_back_for_shallow_paths() {
        assert_eq!(solution_name(Path::new("target.txt")), SOLUTION_NAME_FALLBACK);
        assert_eq!(solution_name(Path::new("SubA/target.txt")), SOLUTION_NAME_FALLBACK);
        assert_eq!(solution_name(Path::new("/target.txt")), SOLUTION_NAME_FALLBACK);

        let replacements = rules(&["NAME", "#SolutionName#-suffix"]);
        let result = transform("NAME", &replacements, Path::new("SubA/target.txt"));
        assert_eq!(result, "SolutionName-suffix");
    }

    #[test]
    fn test_placeholder_resolved_per_destination() {
        let replacements = rules(&["$ns$", "#SolutionName#.#SolutionName#"]);
        let a = transform("namespace $ns$;", &replacements, Path::new("/w/Alpha/src/f.cs"));
        let b = transform("namespace $ns$;", &replacements, Path::new("/w/Beta/src/f.cs"));
        assert_eq!(a, "namespace Alpha.Alpha;");
        assert_eq!(b, "namespace Beta.Beta;");
    }

    #[test]
    fn test_placeholder_resolved_in_values_only() {
        // The value carries the placeholder; the same token in the content stays literal
        let replacements = rules(&["KEY", "#SolutionName#"]);
        let result = transform(
            "#SolutionName# uses KEY",
            &replacements,
            Path::new("/w/Alpha/src/f.cs"),
        );
        assert_eq!(result, "#SolutionName# uses Alpha");
    }
}
