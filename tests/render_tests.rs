//! End-to-end tests: sheet file → layout → drawing on disk

use relgraph::config::Config;
use relgraph::core::graph::RelationGraph;
use relgraph::core::loader::load_sheet;
use relgraph::core::render::{build_scene, render_to_file, RenderFormat};
use std::fmt::Write;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const HEADER: &str = "#,color,id,text,peer,relation,peer,relation,peer,relation,peer,relation\n";

fn write_sheet(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("sheet.csv");
    fs::write(&path, format!("{HEADER}{body}")).expect("Failed to write sheet");
    path
}

/// Every node linked to every later node
fn complete_sheet(n: i64) -> String {
    let mut body = String::new();
    for id in 1..=n {
        let _ = write!(body, "{id},red,{id},N{id}");
        for peer in id + 1..=n {
            let _ = write!(body, ",{peer},link");
        }
        body.push('\n');
    }
    body
}

#[test]
fn test_two_node_example_svg() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_sheet(&dir, "1,red,1,A,2,link\n2,blue,2,B\n");
    let config = Config::from_defaults();

    let graph = RelationGraph::build(&load_sheet(&input).expect("Failed to load"));
    let scene = build_scene(&graph, &config.render).expect("Layout failed");
    assert_eq!(scene.arrows.len(), 1);
    assert!(scene.dotted.is_empty());

    let output = dir.path().join("out").join("graph.svg");
    render_to_file(&scene, RenderFormat::Svg, &config.render, &output).expect("Render failed");

    let svg = fs::read_to_string(&output).expect("Missing output");
    assert_eq!(svg.matches("<circle").count(), 2);
    assert!(svg.contains(">A</text>"));
    assert!(svg.contains(">B</text>"));
    assert_eq!(svg.matches("marker-end").count(), 1);
}

#[test]
fn test_synonyms_and_colors_in_html() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_sheet(
        &dir,
        "1,red,1,Apple,2,synonym\n\
         2,blue,2,Pomme,1,alias,3,link\n\
         3,yellow,3,Fruit\n\
         4,purple,4,Unused\n",
    );
    let config = Config::from_defaults();

    let graph = RelationGraph::build(&load_sheet(&input).expect("Failed to load"));
    let scene = build_scene(&graph, &config.render).expect("Layout failed");
    assert_eq!(scene.markers.len(), 2);
    assert_eq!(scene.dotted.len(), 1);
    assert_eq!(scene.arrows.len(), 1);
    assert!(scene.labels.iter().any(|l| l.text == "Fruit"));
    assert!(!scene.labels.iter().any(|l| l.text == "Unused"));

    let output = dir.path().join("sheet_graph.html");
    render_to_file(&scene, RenderFormat::Html, &config.render, &output).expect("Render failed");
    let html = fs::read_to_string(&output).expect("Missing output");
    assert!(html.contains("<title>sheet_graph</title>"));
    assert!(html.contains("stroke-dasharray"));
}

#[test]
fn test_png_output() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_sheet(&dir, &complete_sheet(4));
    let mut config = Config::from_defaults();
    config.render.width = 320;
    config.render.height = 200;

    let graph = RelationGraph::build(&load_sheet(&input).expect("Failed to load"));
    let scene = build_scene(&graph, &config.render).expect("K4 is planar");

    let output = dir.path().join("k4.png");
    render_to_file(&scene, RenderFormat::Png, &config.render, &output).expect("Render failed");
    let bytes = fs::read(&output).expect("Missing output");
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn test_non_planar_sheet_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_sheet(&dir, &complete_sheet(5));
    let config = Config::from_defaults();

    let graph = RelationGraph::build(&load_sheet(&input).expect("Failed to load"));
    assert_eq!(graph.links.len(), 10);
    let err = build_scene(&graph, &config.render).unwrap_err();
    assert!(err.contains("not planar"));
}

#[test]
fn test_k33_sheet_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_sheet(
        &dir,
        "1,red,1,a,4,link,5,link,6,link\n\
         2,red,2,b,4,link,5,link,6,link\n\
         3,red,3,c,4,link,5,link,6,link\n\
         4,blue,4,x\n\
         5,blue,5,y\n\
         6,blue,6,z\n",
    );
    let config = Config::from_defaults();

    let graph = RelationGraph::build(&load_sheet(&input).expect("Failed to load"));
    assert!(build_scene(&graph, &config.render).is_err());
}
