use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Objects render as key/value rows, except that an array field holding
/// objects (a transaction history) becomes its own table below them.
fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_rows(&items)),
        Value::Object(map) => {
            let mut scalars = Vec::new();
            let mut nested = Vec::new();
            for (key, value) in map {
                match value {
                    Value::Array(items) if items.iter().any(Value::is_object) => {
                        nested.push((key, items));
                    }
                    other => scalars.push(vec![key, value_to_cell(&other)]),
                }
            }
            scalars.sort();
            let mut sections = vec![table::render_table(&["key", "value"], &scalars, options())];
            for (key, items) in nested {
                sections.push(format!("\n{key}:\n{}", render_rows(&items)));
            }
            Ok(sections.join("\n"))
        }
        scalar => Ok(table::render_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            options(),
        )),
    }
}

fn render_rows(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, options());
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| {
                    item.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::render_table(&header_refs, &rows, options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => items.iter().map(value_to_cell).collect::<Vec<_>>().join("; "),
        Value::Object(_) => {
            serde_json::to_string(value).unwrap_or_else(|_| String::from("<invalid-json>"))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        recipient: &'static str,
        amount: f64,
    }

    #[derive(Serialize)]
    struct Screen {
        email: &'static str,
        loading: bool,
        history: Vec<Row>,
    }

    fn screen() -> Screen {
        Screen {
            email: "alice@x.com",
            loading: false,
            history: vec![Row {
                recipient: "bob@x.com",
                amount: 50.0,
            }],
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&screen(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["email"], "alice@x.com");
        assert_eq!(parsed["history"][0]["recipient"], "bob@x.com");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&screen(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_splits_nested_rows() {
        let out = render(&screen(), OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("alice@x.com"));
        assert!(out.contains("history:"));
        assert!(out.contains("recipient"));
        assert!(out.contains("bob@x.com"));
    }

    #[test]
    fn table_render_joins_string_lists() {
        #[derive(Serialize)]
        struct Findings {
            reasons: Vec<&'static str>,
        }
        let out = render(
            &Findings {
                reasons: vec!["Rapid transfers", "New recipient"],
            },
            OutputFormat::Table,
        )
        .expect("table render should work");
        assert!(out.contains("Rapid transfers; New recipient"));
    }
}
