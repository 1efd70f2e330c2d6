/*!
 * Benchmarks for timeline operations.
 *
 * Measures performance of:
 * - Subtitle synthesis in simple and karaoke modes
 * - SRT serialization and parsing
 * - Timeline validation
 */

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use baobao::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use baobao::transcription::{Segment, SubtitleSynthesizer, SynthesisMode, Token};
use baobao::validation::TimelineValidator;

/// Generate word-timed segments of a looping song.
fn generate_segments(count: usize) -> Vec<Segment> {
    let lines = [
        ["你", "是", "我的", "陽光"],
        ["我", "唯一", "的", "陽光"],
        ["天空", "灰暗", "時", "你"],
        ["讓", "我", "快樂", "起來"],
    ];

    (0..count)
        .map(|i| {
            let words = lines[i % lines.len()];
            let start = i as f64 * 4.0;
            let tokens = words
                .iter()
                .enumerate()
                .map(|(w, word)| Token::new(start + w as f64 * 0.8, start + (w + 1) as f64 * 0.8, *word))
                .collect();
            Segment::with_tokens(start, start + 3.2, words.concat(), tokens)
        })
        .collect()
}

fn generate_entries(count: usize) -> Vec<SubtitleEntry> {
    SubtitleSynthesizer::new(SynthesisMode::Simple).synthesize(&generate_segments(count))
}

fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesis");

    for size in [50, 500, 5000] {
        let segments = generate_segments(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("simple", size), &segments, |b, segments| {
            let synthesizer = SubtitleSynthesizer::new(SynthesisMode::Simple);
            b.iter(|| synthesizer.synthesize(black_box(segments)))
        });

        group.bench_with_input(BenchmarkId::new("word_highlight", size), &segments, |b, segments| {
            let synthesizer = SubtitleSynthesizer::new(SynthesisMode::WordHighlight);
            b.iter(|| synthesizer.synthesize(black_box(segments)))
        });
    }

    group.finish();
}

fn bench_srt(c: &mut Criterion) {
    let mut group = c.benchmark_group("srt");

    for size in [50, 500, 5000] {
        let collection = SubtitleCollection::from_entries("bench.srt".into(), generate_entries(size));
        let content = collection.to_srt_string();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("serialize", size), &collection, |b, collection| {
            b.iter(|| black_box(collection).to_srt_string())
        });

        group.bench_with_input(BenchmarkId::new("parse", size), &content, |b, content| {
            b.iter(|| SubtitleCollection::parse_srt_string(black_box(content)))
        });
    }

    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");
    let validator = TimelineValidator::new();
    let expected: Vec<String> = ["你是我的陽光", "讓我快樂起來"].iter().map(|w| w.to_string()).collect();

    for size in [50, 500, 2000] {
        let entries = generate_entries(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("timeline", size), &entries, |b, entries| {
            b.iter(|| validator.validate(black_box(entries), None))
        });

        group.bench_with_input(BenchmarkId::new("with_coverage", size), &entries, |b, entries| {
            b.iter(|| validator.validate(black_box(entries), Some(&expected)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_synthesis, bench_srt, bench_validation);
criterion_main!(benches);
