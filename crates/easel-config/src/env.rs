use std::sync::LazyLock;

use regex::Regex;

// `{{ scoped.key }}` with an optional `| default("...")` filter
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
        .expect("placeholder pattern is valid")
});

/// Expand `{{ env.VAR }}` placeholders in raw config text
///
/// An unset variable is an error unless the placeholder carries a
/// `| default("fallback")` filter. TOML comment lines pass through
/// untouched.
pub(crate) fn expand_env(input: &str) -> Result<String, String> {
    let mut output = String::with_capacity(input.len());

    for (index, line) in input.lines().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        if line.trim_start().starts_with('#') {
            output.push_str(line);
        } else {
            expand_line(line, &mut output)?;
        }
    }
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn expand_line(line: &str, output: &mut String) -> Result<(), String> {
    let mut cursor = 0;

    for captures in PLACEHOLDER.captures_iter(line) {
        let placeholder = captures.get(0).unwrap();
        let key = &captures[1];
        let fallback = captures.get(2).map(|m| m.as_str());

        let var = match key.strip_prefix("env.") {
            Some(var) if !var.is_empty() && !var.contains('.') => var,
            _ => {
                return Err(format!(
                    "only `env.` placeholders are supported, got `{key}`"
                ));
            }
        };

        output.push_str(&line[cursor..placeholder.start()]);
        match std::env::var(var) {
            Ok(value) => output.push_str(&value),
            Err(_) => match fallback {
                Some(value) => output.push_str(value),
                None => return Err(format!("environment variable `{var}` is not set")),
            },
        }
        cursor = placeholder.end();
    }

    output.push_str(&line[cursor..]);
    Ok(())
}
