use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rdf_edgelist::config::ConversionConfig;
use rdf_edgelist::graph::{FilePolicy, GraphState, GraphWriter};
use rdf_edgelist::sources::TripleSource;
use rdf_edgelist::storage::EdgeListSink;

/// Ring of `vertices` resources, each linked to its successor.
fn ring_dump(vertices: usize) -> String {
    let mut dump = String::from("# started 2016-06-16T13:58:33Z\n");
    for i in 0..vertices {
        dump.push_str(&format!(
            "<http://dbpedia.org/resource/Node_{}> <http://dbpedia.org/ontology/wikiPageWikiLink> <http://dbpedia.org/resource/Node_{}> .\n",
            i,
            (i + 1) % vertices
        ));
    }
    dump
}

fn bench_write_graph(c: &mut Criterion) {
    let dump = ring_dump(10_000);
    let config = ConversionConfig { progress_interval: u64::MAX, ..ConversionConfig::default() };
    let policy = FilePolicy { skip_duplicate_pairs: true, track_edges: true };

    c.bench_function("write_graph_10000_lines", |b| {
        b.iter(|| {
            let source = TripleSource::from_reader("ring.ttl", Cursor::new(dump.clone().into_bytes()));
            let mut sink = EdgeListSink::new(Vec::new(), Vec::new());
            let outcome = GraphWriter::new(&config, None)
                .write_graph(source.lines(), &mut sink, GraphState::new(), policy)
                .unwrap();
            black_box(outcome.edges_written)
        })
    });
}

criterion_group!(benches, bench_write_graph);
criterion_main!(benches);
