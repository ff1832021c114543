//! Benchmarks for ENML conversion.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use everblog_enml::{NoteRenderer, Resource, transform};

/// Generate a note with paragraphs, todos and one media element per section.
fn generate_note(sections: usize) -> (String, Vec<Resource>) {
    let mut markup = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><!DOCTYPE en-note SYSTEM "http://xml.evernote.com/pub/enml2.dtd"><en-note>"#,
    );
    let mut resources = Vec::with_capacity(sections);

    for i in 0..sections {
        let hash = format!("{i:032x}");
        markup.push_str(&format!(
            "<div><b>Section {i}</b>&nbsp;with some text &amp; an entity.</div>\
             <div><en-todo checked=\"true\"/>task {i}</div>\
             <div><en-media type=\"image/png\" hash=\"{hash}\" height=\"40\"/></div>\
             <en-crypt hint=\"x\">c2VjcmV0</en-crypt><!-- c -->"
        ));
        resources.push(Resource::new(
            format!("guid-{i}"),
            "image/png",
            format!("image-{i}.png"),
            hash,
        ));
    }

    markup.push_str("</en-note>");
    (markup, resources)
}

fn bench_transform_simple(c: &mut Criterion) {
    let markup = "<en-note><div>Hello</div><en-todo/>buy milk</en-note>";

    c.bench_function("transform_simple_note", |b| {
        b.iter(|| transform(markup, &[], "s1", 800));
    });
}

fn bench_transform_varying_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_by_sections");

    for sections in [10, 100, 1000] {
        let (markup, resources) = generate_note(sections);
        let renderer = NoteRenderer::new(&resources, "s1");
        group.throughput(Throughput::Bytes(markup.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &markup, |b, markup| {
            b.iter(|| renderer.to_html(markup, 800));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transform_simple, bench_transform_varying_sizes);
criterion_main!(benches);
