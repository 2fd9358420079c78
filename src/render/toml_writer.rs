//! TOML rendering for configuration trees.
//!
//! The reserved header-splitting key is written as a multi-line array of
//! inline arrays, one tuple per row.

use crate::model::{ConfigTree, Value};

use super::TomlOptions;

/// Convert a configuration tree to TOML.
pub fn to_toml(tree: &ConfigTree, options: &TomlOptions) -> String {
    TomlRenderer::new(options.clone()).render(tree)
}

/// TOML renderer.
pub struct TomlRenderer {
    options: TomlOptions,
}

impl TomlRenderer {
    /// Create a new TOML renderer.
    pub fn new(options: TomlOptions) -> Self {
        Self { options }
    }

    /// Render every section, each followed by a blank line.
    pub fn render(&self, tree: &ConfigTree) -> String {
        let mut output = String::new();

        for (name, section) in tree.sections() {
            output.push_str(&format!("[{}]\n", name));
            for (key, value) in section {
                self.render_entry(&mut output, key, value);
            }
            output.push('\n');
        }

        output
    }

    fn render_entry(&self, output: &mut String, key: &str, value: &Value) {
        match value {
            Value::List(rows) if self.is_split_header_rows(key, rows) => {
                output.push_str(&format!("{} = [\n", key));
                for row in rows {
                    output.push_str(&format!(
                        "{}{},\n",
                        self.options.row_indent,
                        inline_value(row)
                    ));
                }
                output.push_str("]\n");
            }
            Value::String(s) => output.push_str(&format!("{} = \"{}\"\n", key, s)),
            Value::List(_) | Value::Tuple(_) => {
                output.push_str(&format!("{} = {}\n", key, inline_value(value)));
            }
            Value::Null => {
                log::warn!("skipping `{}`: None has no TOML representation", key);
            }
            scalar => output.push_str(&format!("{} = {}\n", key, inline_value(scalar))),
        }
    }

    fn is_split_header_rows(&self, key: &str, rows: &[Value]) -> bool {
        key == self.options.split_header_key && rows.iter().all(Value::is_scalar_tuple)
    }
}

/// Inline form of a value: strings quoted, containers bracketed and
/// comma-joined, everything else bare.
fn inline_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(n) => format_float(*n),
        Value::String(s) => format!("\"{}\"", s),
        Value::List(items) | Value::Tuple(items) => {
            let parts: Vec<String> = items.iter().map(inline_value).collect();
            format!("[{}]", parts.join(", "))
        }
    }
}

fn format_float(n: f64) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "inf" } else { "-inf" }.to_string()
    } else if n.abs() >= 1e16 {
        format!("{:e}", n)
    } else if n.fract() == 0.0 {
        format!("{:.1}", n)
    } else {
        n.to_string()
    }
}
