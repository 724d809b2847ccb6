//! Interactive HTML rendering of an article graph, drawn by plotly.js.

use crate::graph::ArticleGraph;
use crate::layout::Position;
use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
pub const DEFAULT_TITLE: &str = "<br>Network graph";
const COLOR: &str = "cornflowerblue";

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textfont: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub color: String,
    pub size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub width: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
    pub showlegend: bool,
    pub hovermode: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub showgrid: bool,
    pub zeroline: bool,
    pub showticklabels: bool,
}

impl Axis {
    fn hidden() -> Self {
        Self {
            showgrid: false,
            zeroline: false,
            showticklabels: false,
        }
    }
}

/// One labelled marker per article plus one line trace per link. The node
/// trace comes first.
pub fn build_figure(
    graph: &ArticleGraph,
    positions: &HashMap<NodeIndex, Position>,
    title: &str,
) -> Figure {
    let mut node_trace = Trace {
        kind: "scatter".to_string(),
        x: Vec::new(),
        y: Vec::new(),
        mode: "markers+text".to_string(),
        text: Some(Vec::new()),
        textposition: Some("top center".to_string()),
        textfont: Some(Font { size: 10 }),
        hoverinfo: Some("text".to_string()),
        marker: Some(Marker {
            color: COLOR.to_string(),
            size: 25,
        }),
        line: None,
    };

    let mut labels = Vec::new();
    for idx in graph.node_indices() {
        let (x, y) = positions.get(&idx).copied().unwrap_or((0.0, 0.0));
        node_trace.x.push(Some(x));
        node_trace.y.push(Some(y));
        labels.push(format!("<b>{}</b>", escape_markup(graph.title(idx))));
    }
    node_trace.text = Some(labels);

    let mut data = vec![node_trace];
    for (a, b) in graph.edge_endpoints() {
        let (x0, y0) = positions.get(&a).copied().unwrap_or((0.0, 0.0));
        let (x1, y1) = positions.get(&b).copied().unwrap_or((0.0, 0.0));
        data.push(edge_trace([x0, x1], [y0, y1], 1.0));
    }

    Figure {
        data,
        layout: Layout {
            title: Title {
                text: title.to_string(),
                font: Font { size: 16 },
            },
            showlegend: false,
            hovermode: "closest".to_string(),
            xaxis: Axis::hidden(),
            yaxis: Axis::hidden(),
        },
    }
}

fn edge_trace(x: [f64; 2], y: [f64; 2], width: f64) -> Trace {
    Trace {
        kind: "scatter".to_string(),
        // The trailing gap stops plotly joining consecutive segments.
        x: vec![Some(x[0]), Some(x[1]), None],
        y: vec![Some(y[0]), Some(y[1]), None],
        mode: "lines".to_string(),
        text: None,
        textposition: None,
        textfont: None,
        hoverinfo: Some("none".to_string()),
        marker: None,
        line: Some(Line {
            width,
            color: COLOR.to_string(),
        }),
    }
}

/// Plotly treats label text as a small HTML subset.
fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn render_html(figure: &Figure) -> serde_json::Result<String> {
    let figure_json = serde_json::to_string(figure)?.replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>Network graph</title>
<script src="{cdn}"></script>
<style>html, body {{ height: 100%; margin: 0; }} #graph {{ height: 100%; width: 100%; }}</style>
</head>
<body>
<div id="graph"></div>
<script>
var figure = {figure_json};
Plotly.newPlot("graph", figure.data, figure.layout, {{responsive: true}});
</script>
</body>
</html>
"#,
        cdn = PLOTLY_CDN,
        figure_json = figure_json,
    ))
}

/// Write the page, creating parent directories as needed.
pub fn save_html(content: &str, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

/// Node "0" joined to "1".."n"; a quick check that plotting works.
pub fn star_graph(n: usize) -> ArticleGraph {
    let mut graph = ArticleGraph::new();
    graph.add_article("0");
    for i in 1..=n {
        graph.add_link("0", &i.to_string());
    }
    graph
}
