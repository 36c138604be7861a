//! Configuration merge logic
//!
//! Implements the layered merge over TOML values:
//! - Tables: deep-merge by key
//! - Arrays: REPLACE (last wins)
//! - Scalars: override (last wins)

use toml::Value;

/// Deep merge two TOML values.
///
/// Merge semantics:
/// - Tables: deep-merge by key (recursive)
/// - Arrays: REPLACE (second wins entirely)
/// - Scalars: override (second wins)
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Table(mut base_map), Value::Table(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged);
            }
            Value::Table(base_map)
        }

        // Arrays and scalars: overlay wins
        (_, overlay) => overlay,
    }
}

/// Merge config layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers
        .into_iter()
        .reduce(deep_merge)
        .unwrap_or_else(|| Value::Table(toml::map::Map::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Value {
        s.parse::<Value>().unwrap()
    }

    #[test]
    fn test_scalar_override() {
        let result = deep_merge(parse("engine = 'pdflatex'"), parse("engine = 'lualatex'"));
        assert_eq!(result["engine"].as_str(), Some("lualatex"));
    }

    #[test]
    fn test_table_deep_merge() {
        let base = parse("[latexmk]\nengine = 'pdflatex'\nforce = true");
        let overlay = parse("[latexmk]\nengine = 'xelatex'");
        let result = deep_merge(base, overlay);

        assert_eq!(result["latexmk"]["engine"].as_str(), Some("xelatex"));
        assert_eq!(result["latexmk"]["force"].as_bool(), Some(true));
    }

    #[test]
    fn test_array_replace() {
        let base = parse("clean_extensions = ['.aux', '.log', '.toc']");
        let overlay = parse("clean_extensions = ['.bbl']");
        let result = deep_merge(base, overlay);

        let exts = result["clean_extensions"].as_array().unwrap();
        assert_eq!(exts.len(), 1);
        assert_eq!(exts[0].as_str(), Some(".bbl"));
    }

    #[test]
    fn test_add_new_key() {
        let result = deep_merge(parse("a = 1"), parse("b = 2"));
        assert_eq!(result["a"].as_integer(), Some(1));
        assert_eq!(result["b"].as_integer(), Some(2));
    }

    #[test]
    fn test_merge_layers_precedence() {
        let builtin = parse("builder = 'latexmk'\noutput_directory = ''");
        let user = parse("output_directory = 'out'");
        let repo = parse("builder = 'pdflatex'");
        let cli = parse("output_directory = 'build'");

        let result = merge_layers(vec![builtin, user, repo, cli]);

        assert_eq!(result["builder"].as_str(), Some("pdflatex"));
        assert_eq!(result["output_directory"].as_str(), Some("build"));
    }

    #[test]
    fn test_merge_layers_empty() {
        let result = merge_layers(vec![]);
        assert!(result.as_table().map(|t| t.is_empty()).unwrap_or(false));
    }
}
