use camino::{Utf8Path, Utf8PathBuf};
use forestplot::{Error, PlotInput};
use miette::{GraphicalReportHandler, GraphicalTheme, IntoDiagnostic, WrapErr};
use rayon::prelude::*;
use std::fs;

const DEFAULT_OUTPUT: &str = "forestplot.svg";

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "render" => {
            let Some(input) = args.get(2) else {
                usage();
                std::process::exit(1);
            };
            let output = args.get(3).map(String::as_str).unwrap_or(DEFAULT_OUTPUT);
            render(Utf8Path::new(input), Utf8Path::new(output))
        }
        "gallery" => {
            let output = match args.get(2) {
                Some(path) => Utf8PathBuf::from(path),
                None => workspace_root().join("gallery.html"),
            };
            gallery(&output)
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

fn usage() {
    eprintln!("Usage: cargo xtask <command>");
    eprintln!("Commands:");
    eprintln!("  render <input.json> [output.svg]   Render one plot (default output: {DEFAULT_OUTPUT})");
    eprintln!("  gallery [output.html]              Render every test fixture into one HTML page");
}

fn workspace_root() -> Utf8PathBuf {
    let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

fn render(input: &Utf8Path, output: &Utf8Path) -> miette::Result<()> {
    let source = fs::read_to_string(input)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {input}"))?;
    let svg = render_source(input, &source)?;
    fs::write(output, svg)
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {output}"))?;
    println!("Wrote {output}");
    Ok(())
}

fn render_source(name: &Utf8Path, source: &str) -> Result<String, Error> {
    let input = PlotInput::from_named_json(name.as_str(), source)?;
    let scene = forestplot::render(&input)?;
    Ok(scene.to_svg())
}

/// One fixture on the gallery page.
struct Entry {
    name: String,
    source: String,
    /// The SVG, or the rendered diagnostic
    outcome: Result<String, String>,
}

fn gallery(output: &Utf8Path) -> miette::Result<()> {
    let root = workspace_root();
    let mut paths = Vec::new();
    for dir in ["tests/fixtures", "tests/invalid"] {
        let dir = root.join(dir);
        let listing = dir
            .read_dir_utf8()
            .into_diagnostic()
            .wrap_err_with(|| format!("listing {dir}"))?;
        for entry in listing {
            let path = entry.into_diagnostic()?.into_path();
            if path.extension() == Some("json") {
                paths.push(path);
            }
        }
    }
    paths.sort();

    let entries: Vec<Entry> = paths
        .par_iter()
        .map(|path| {
            tracing::info!(fixture = %path, "rendering");
            let name = path
                .strip_prefix(&root)
                .unwrap_or(path.as_path())
                .to_string();
            let source = fs::read_to_string(path).unwrap_or_default();
            let outcome = render_source(path, &source).map_err(|e| render_report(&e));
            Entry {
                name,
                source,
                outcome,
            }
        })
        .collect();

    let rendered = entries.iter().filter(|e| e.outcome.is_ok()).count();
    fs::write(output, gallery_html(&entries, rendered))
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {output}"))?;
    println!(
        "Generated gallery at: {output} ({rendered} / {} rendered)",
        entries.len()
    );
    Ok(())
}

fn render_report(error: &Error) -> String {
    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    if handler.render_report(&mut out, error).is_err() {
        return error.to_string();
    }
    out
}

fn gallery_html(entries: &[Entry], rendered: usize) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Forest plot gallery</title>
    <style>
        * {{
            box-sizing: border-box;
        }}
        body {{
            font-family: system-ui, sans-serif;
            margin: 0;
            padding: 0;
            background: #eee;
            color: #333;
        }}
        .page {{
            max-width: 1000px;
            margin: 0 auto;
            padding: 24px;
        }}
        h1 {{
            font-weight: 600;
            font-size: 20px;
            color: #1a1a1a;
            margin: 0 0 24px 0;
        }}
        .card {{
            background: white;
            border-radius: 8px;
            box-shadow: 0 1px 3px rgba(0,0,0,0.08);
            margin-bottom: 16px;
            overflow: hidden;
        }}
        .card-header {{
            display: flex;
            align-items: center;
            justify-content: space-between;
            padding: 12px 16px;
            border-bottom: 1px solid #eee;
            background: #fafafa;
            font-size: 13px;
            font-weight: 600;
        }}
        .status {{
            font-size: 11px;
            padding: 3px 8px;
            border-radius: 4px;
        }}
        .status.ok {{
            background: #dcfce7;
            color: #166534;
        }}
        .status.error {{
            background: #fee2e2;
            color: #991b1b;
        }}
        .card-body {{
            padding: 12px 16px;
        }}
        .svg-container {{
            overflow-x: auto;
        }}
        .diagnostic, .source {{
            font-family: 'SF Mono', Monaco, monospace;
            font-size: 11px;
            white-space: pre-wrap;
            padding: 8px 10px;
            border-radius: 4px;
        }}
        .diagnostic {{
            color: #991b1b;
            background: #fef2f2;
        }}
        .source {{
            background: #f8f8f8;
            border: 1px solid #e0e0e0;
            max-height: 200px;
            overflow: auto;
            margin-top: 6px;
        }}
        summary {{
            cursor: pointer;
            font-size: 11px;
            color: #666;
            margin-top: 8px;
        }}
    </style>
</head>
<body>
<div class="page">
<h1>Forest plot gallery ({} / {} rendered)</h1>
"#,
        rendered,
        entries.len()
    ));

    for entry in entries {
        let (status_class, status_text, content) = match &entry.outcome {
            Ok(svg) => ("ok", "RENDERED", format!(r#"<div class="svg-container">{svg}</div>"#)),
            Err(report) => (
                "error",
                "REJECTED",
                format!(r#"<div class="diagnostic">{}</div>"#, html_escape(report)),
            ),
        };
        html.push_str(&format!(
            r#"<div class="card" id="{name}">
    <div class="card-header">
        <span>{name}</span>
        <span class="status {status_class}">{status_text}</span>
    </div>
    <div class="card-body">
        {content}
        <details>
            <summary>Source</summary>
            <div class="source">{source}</div>
        </details>
    </div>
</div>
"#,
            name = html_escape(&entry.name),
            source = html_escape(&entry.source),
        ));
    }

    html.push_str("</div>\n</body></html>");
    html
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
