//! Benchmarks for relayout reconstruction performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the layout engine over synthetic fragment pages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use relayout::{LayoutEngine, LayoutOptions, PageInput, TextFragment};

/// Creates a synthetic page: a centered bold title followed by body lines
/// split into word fragments with slight baseline jitter.
fn create_test_page(page_number: usize, line_count: usize) -> PageInput {
    let mut page = PageInput::letter();
    page.push(TextFragment::new(
        format!("Chapter {}", page_number),
        250.0,
        740.0,
        110.0,
        22.0,
        "ABCDEF+Helvetica-Bold",
    ));

    let words = ["Benchmark", "content", "for", "relayout", "performance", "runs."];
    for line in 0..line_count {
        let y = 700.0 - line as f32 * 14.0;
        let mut x = 72.0;
        for (i, word) in words.iter().enumerate() {
            let width = word.len() as f32 * 5.5;
            let jitter = if i % 2 == 0 { 0.2 } else { -0.2 };
            let font = if i == 3 { "Times-Italic" } else { "Times-Roman" };
            page.push(TextFragment::new(*word, x, y + jitter, width, 11.0, font));
            x += width + 3.0;
        }
    }

    // Reverse so the engine cannot rely on extraction order
    page.fragments.reverse();
    page
}

fn create_test_document(page_count: usize) -> Vec<PageInput> {
    (1..=page_count).map(|i| create_test_page(i, 40)).collect()
}

/// Benchmark a single page at various densities.
fn bench_page_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_reconstruction");
    let engine = LayoutEngine::new(LayoutOptions::default()).unwrap();

    for line_count in [10, 40, 100].iter() {
        let page = create_test_page(1, *line_count);

        group.bench_function(format!("{}_lines", line_count), |b| {
            b.iter(|| engine.reconstruct_page(1, black_box(&page)));
        });
    }

    group.finish();
}

/// Benchmark parallel against sequential page processing.
fn bench_document_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_reconstruction");
    let pages = create_test_document(32);

    let parallel = LayoutEngine::new(LayoutOptions::default()).unwrap();
    let sequential = LayoutEngine::new(LayoutOptions::new().sequential()).unwrap();

    group.bench_function("parallel_32_pages", |b| {
        b.iter(|| parallel.reconstruct(black_box(&pages)));
    });
    group.bench_function("sequential_32_pages", |b| {
        b.iter(|| sequential.reconstruct(black_box(&pages)));
    });

    group.finish();
}

/// Benchmark font name normalization.
fn bench_font_normalization(c: &mut Criterion) {
    let names = [
        "ABCDEF+Helvetica-Bold",
        "TimesNewRomanPS-ItalicMT",
        "CourierNewPSMT",
        "ZapfDingbats",
        "Ｆｕｌｌｗｉｄｔｈ",
        "",
    ];

    c.bench_function("normalize_font", |b| {
        b.iter(|| {
            for name in names.iter() {
                black_box(relayout::normalize_font(black_box(name)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_page_reconstruction,
    bench_document_reconstruction,
    bench_font_normalization,
);
criterion_main!(benches);
