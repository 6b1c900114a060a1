//! CLI Integration Tests
//!
//! These tests run the `rdf-edgelist` binary as a subprocess and check its
//! output files and summary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rdf-edgelist"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run CLI")
}

fn create_links_file(path: &Path) {
    let content = "\
# started 2016-06-16T13:58:33Z
<http://dbpedia.org/resource/A> <http://dbpedia.org/ontology/linksTo> <http://dbpedia.org/resource/B> .
<http://dbpedia.org/resource/B> <http://dbpedia.org/ontology/linksTo> <http://dbpedia.org/resource/A> .
<http://dbpedia.org/resource/A> <http://xmlns.com/foaf/0.1/name> \"Alan\"@en .
<http://dbpedia.org/resource/A> <http://dbpedia.org/ontology/linksTo> <http://dbpedia.org/resource/A> .
";
    fs::write(path, content).unwrap();
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_cli_help_flag() {
    let output = run_cli(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Convert DBPedia RDF triple dumps"));
    assert!(stdout.contains("convert"));
    assert!(stdout.contains("vertex-set"));
    assert!(stdout.contains("instance-types"));
}

#[test]
fn test_cli_convert() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("links.ttl");
    let vertices = dir.path().join("graph_v.edgelist");
    let edges = dir.path().join("graph_e.edgelist");
    let descriptor = dir.path().join("graph.json");
    create_links_file(&input);

    let output = run_cli(&[
        "convert",
        "-i",
        path_str(&input),
        "-v",
        path_str(&vertices),
        "-e",
        path_str(&edges),
        "-j",
        path_str(&descriptor),
        "-r",
    ]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Conversion Complete!"));
    assert!(stdout.contains("Self loops skipped: 1"));
    assert!(stdout.contains("Edge rate:"));

    assert_eq!(
        fs::read_to_string(&vertices).unwrap(),
        "\"A\" * \"owl#Thing\"\n\"B\" * \"owl#Thing\"\n"
    );
    assert_eq!(
        fs::read_to_string(&edges).unwrap(),
        "\"A\" \"B\" \"linksTo\"\n\"B\" \"A\" \"linksTo\"\n"
    );
    assert!(descriptor.exists());
}

#[test]
fn test_cli_line_limit() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("links.ttl");
    let edges = dir.path().join("e.edgelist");
    create_links_file(&input);

    let output = run_cli(&[
        "convert",
        "-i",
        path_str(&input),
        "-v",
        path_str(&dir.path().join("v.edgelist")),
        "-e",
        path_str(&edges),
        "-j",
        path_str(&dir.path().join("g.json")),
        "-n",
        "1",
    ]);

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&edges).unwrap(), "\"A\" \"B\" \"linksTo\"\n");
}

#[test]
fn test_cli_missing_input() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&[
        "convert",
        "-i",
        path_str(&dir.path().join("missing.ttl.bz2")),
        "-v",
        path_str(&dir.path().join("v.edgelist")),
        "-e",
        path_str(&dir.path().join("e.edgelist")),
        "-j",
        path_str(&dir.path().join("g.json")),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.ttl.bz2"));
}

#[test]
fn test_cli_builds_lookup_tables() {
    let dir = TempDir::new().unwrap();
    let labels = dir.path().join("labels_en.ttl");
    let types_dump = dir.path().join("instance_types_en.ttl");
    let vertex_set = dir.path().join("vertex_set.bin");
    let types = dir.path().join("instance_types.bin");

    fs::write(
        &labels,
        "# header\n\
         <http://dbpedia.org/resource/A> <http://www.w3.org/2000/01/rdf-schema#label> \"A\"@en .\n\
         <http://dbpedia.org/resource/B> <http://www.w3.org/2000/01/rdf-schema#label> \"B\"@en .\n",
    )
    .unwrap();
    fs::write(
        &types_dump,
        "# header\n\
         <http://dbpedia.org/resource/A> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://dbpedia.org/ontology/Person> .\n\
         <http://dbpedia.org/resource/C> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://dbpedia.org/ontology/Place> .\n",
    )
    .unwrap();

    let output = run_cli(&["vertex-set", "-i", path_str(&labels), "-o", path_str(&vertex_set)]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Number of vertices: 2"));

    let output = run_cli(&[
        "instance-types",
        "-i",
        path_str(&types_dump),
        "-o",
        path_str(&types),
        "-s",
        path_str(&vertex_set),
    ]);
    assert!(output.status.success());
    // A keeps its type, B is filled in, C is outside the vertex set.
    assert!(String::from_utf8_lossy(&output.stdout).contains("Number of entries: 2"));
}
