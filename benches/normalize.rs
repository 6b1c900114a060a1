use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rdf_edgelist::config::{LiteralPolicy, ResourceExtraction};
use rdf_edgelist::parsing::{clean_line, clean_text};

fn bench_clean_line(c: &mut Criterion) {
    let uri_line = "<http://dbpedia.org/resource/Alan_Turing> <http://dbpedia.org/ontology/birthPlace> <http://dbpedia.org/resource/Maida_Vale> .\n";
    let literal_line = "<http://dbpedia.org/resource/Alan_Turing> <http://xmlns.com/foaf/0.1/name> \"Alan Mathison Turing\"@en .\n";

    c.bench_function("clean_line_uris", |b| {
        b.iter(|| {
            clean_line(
                black_box(uri_line),
                LiteralPolicy::Keep,
                ResourceExtraction::StripDbpediaPrefix,
            )
        })
    });
    c.bench_function("clean_line_literal", |b| {
        b.iter(|| {
            clean_line(
                black_box(literal_line),
                LiteralPolicy::Keep,
                ResourceExtraction::StripDbpediaPrefix,
            )
        })
    });
}

fn bench_clean_text(c: &mut Criterion) {
    c.bench_function("clean_text_escaped", |b| {
        b.iter(|| clean_text(black_box("Caf%C3%A9 &amp; Bar (disambiguation)")))
    });
}

criterion_group!(benches, bench_clean_line, bench_clean_text);
criterion_main!(benches);
