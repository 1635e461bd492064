//! Performance benchmarks for tagmark
//!
//! Run with: cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Sample content of various sizes
mod samples {
    pub const TINY: &str = "GG, well played!";

    pub const SMALL: &str = "Patch 1.2 is out.\n\n[image]https://cdn.example.com/patch.png[/image]\n\nThoughts?";

    pub const MEDIUM: &str = r#"Finally finished the campaign. Some notes:

[quote]The final boss has a second phase nobody talks about.[/quote]

Here is my build:

[code=json]{ "class": "ranger", "level": 42, "perks": ["eagle-eye", "quickdraw"] }[/code]

Boss fight recording:

[video]https://www.youtube.com/watch?v=dQw4w9WgXcQ[/video]

[image]https://cdn.example.com/screens/1.png[/image]
[image]https://cdn.example.com/screens/2.png[/image]

Anyone else stuck on chapter 7? The puzzle with the [three] levers makes no sense.
"#;

    /// A long forum thread's worth of posts
    pub fn large() -> String {
        MEDIUM.repeat(100)
    }

    /// Thousands of openers that never close
    pub fn unterminated() -> String {
        "[image]x [quote]y [code=rust]z ".repeat(2000)
    }

    /// Brackets everywhere, none of them tags
    pub fn bracket_soup() -> String {
        "[a] [b=c] [/d] [[e]] ".repeat(2000)
    }
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for (name, input) in [
        ("tiny", samples::TINY.to_owned()),
        ("small", samples::SMALL.to_owned()),
        ("medium", samples::MEDIUM.to_owned()),
        ("large", samples::large()),
    ] {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_function(format!("segments_{name}"), |b| {
            b.iter(|| tagmark::parse(black_box(&input)).count())
        });
        group.bench_function(format!("html_{name}"), |b| {
            b.iter(|| tagmark::to_html(black_box(&input)))
        });
    }

    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");
    group.sample_size(20);

    let unterminated = samples::unterminated();
    group.throughput(Throughput::Bytes(unterminated.len() as u64));
    group.bench_function("unterminated_openers", |b| {
        b.iter(|| tagmark::to_html(black_box(&unterminated)))
    });

    let soup = samples::bracket_soup();
    group.throughput(Throughput::Bytes(soup.len() as u64));
    group.bench_function("bracket_soup", |b| {
        b.iter(|| tagmark::to_html(black_box(&soup)))
    });

    group.finish();
}

fn bench_editor(c: &mut Criterion) {
    let mut group = c.benchmark_group("editor");

    let input = samples::large();
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("deserialize_serialize", |b| {
        b.iter(|| tagmark::BlockEditor::deserialize(black_box(&input)).serialize())
    });

    group.finish();
}

fn bench_buffer_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_reuse");

    let input = samples::MEDIUM;
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("without_reuse", |b| {
        b.iter(|| tagmark::to_html(black_box(input)))
    });

    group.bench_function("with_reuse", |b| {
        let mut buffer = Vec::with_capacity(input.len() * 2);
        b.iter(|| {
            tagmark::to_html_into(black_box(input), &mut buffer);
            black_box(&buffer);
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parsing,
    bench_pathological,
    bench_editor,
    bench_buffer_reuse
);
criterion_main!(benches);
