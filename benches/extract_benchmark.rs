//! Benchmarks for rawpdf extraction performance.
//!
//! Run with: cargo bench
//!
//! Synthetic PDFs carry one uncompressed content stream per page.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rawpdf::parser::{decode_literal, ContentScanner, LooseLiterals, StreamLocator};
use rawpdf::{ExtractOptions, Extractor};

/// Creates a minimal synthetic PDF with the given number of pages.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut content = String::new();

    content.push_str("%PDF-1.4\n");
    content.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", 2 * i + 3)).collect();
    content.push_str(&format!(
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
        kids.join(" "),
        page_count
    ));

    let mut next_obj = 3;
    for i in 0..page_count {
        let page_obj = next_obj;
        let content_obj = next_obj + 1;
        next_obj += 2;

        content.push_str(&format!(
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R >>\nendobj\n",
            page_obj, content_obj
        ));

        // A header repeated on every page, a kerned title and body lines
        let text = format!(
            "BT /F1 9 Tf 72 760 Td (Residential lease agreement) Tj ET\n\
             BT /F1 14 Tf 72 720 Td [(Ar) -20 (ticle {}) 15 (\\051 Obligations)] TJ ET\n\
             BT /F1 11 Tf 72 690 Td 14 TL \
             (The tenant pays the rent on the first day of each month.) Tj T* \
             (The landlord delivers the premises in good repair \\050see annex\\051.) Tj T* \
             (Page {} of {}) Tj ET",
            i + 1,
            i + 1,
            page_count
        );
        content.push_str(&format!(
            "{} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
            content_obj,
            text.len(),
            text
        ));
    }

    content.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\n%%EOF\n",
        next_obj
    ));

    content.into_bytes()
}

/// Benchmark PDF format detection.
fn bench_format_detection(c: &mut Criterion) {
    let pdf_data = create_test_pdf(1);
    let non_pdf_data = b"Not a PDF file at all, just random text content";

    c.bench_function("detect_valid_pdf", |b| {
        b.iter(|| rawpdf::detect_format_from_bytes(black_box(&pdf_data)).is_ok());
    });

    c.bench_function("detect_non_pdf", |b| {
        b.iter(|| rawpdf::detect_format_from_bytes(black_box(non_pdf_data)).is_err());
    });
}

/// Benchmark the individual pipeline stages.
fn bench_stages(c: &mut Criterion) {
    let data = create_test_pdf(10);
    let stream = b"BT [(Le pr) 20 (\\351sent bail a pour objet la location \\050meubl\\351e\\051.)] TJ ET";

    c.bench_function("decode_literal", |b| {
        b.iter(|| decode_literal(black_box(b"The landlord \\050see annex\\051 \\351t\\351")));
    });

    c.bench_function("scan_content_stream", |b| {
        b.iter(|| ContentScanner::new(black_box(stream)).fragments().count());
    });

    c.bench_function("locate_streams_10_pages", |b| {
        b.iter(|| StreamLocator::new(black_box(&data)).count());
    });

    c.bench_function("loose_sweep_10_pages", |b| {
        b.iter(|| LooseLiterals::new(black_box(&data)).count());
    });
}

/// Benchmark end-to-end extraction at various sizes.
fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    let extractor = Extractor::new();

    for page_count in [1, 10, 100].iter() {
        let data = create_test_pdf(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| extractor.extract(black_box(&data), "bench.pdf"));
        });
    }

    group.finish();
}

/// Benchmark batch extraction, parallel against sequential.
fn bench_batch(c: &mut Criterion) {
    let inputs: Vec<(String, Vec<u8>)> = (0..32)
        .map(|i| (format!("lease-{}.pdf", i), create_test_pdf(10)))
        .collect();

    let parallel = Extractor::new();
    let sequential = Extractor::with_options(ExtractOptions::new().sequential());

    c.bench_function("batch_32_parallel", |b| {
        b.iter(|| parallel.extract_batch(black_box(&inputs)));
    });

    c.bench_function("batch_32_sequential", |b| {
        b.iter(|| sequential.extract_batch(black_box(&inputs)));
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_stages,
    bench_extraction,
    bench_batch,
);
criterion_main!(benches);
