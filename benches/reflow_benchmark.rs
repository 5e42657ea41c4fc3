//! Benchmarks for zonetext reflow performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks test the pipeline with synthetic report text.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zonetext::ReflowEngine;

/// Creates synthetic zone text with the given number of report sections.
fn create_report_text(section_count: usize) -> String {
    let mut text = String::new();

    for i in 0..section_count {
        text.push_str(&format!("SEZIONE CLINICA {}\n", i + 1));
        text.push_str("Paziente in condizioni generali discrete,\n");
        text.push_str("parametri vitali nella norma,\n");
        text.push_str("si conferma il quadro noto.\n");
        text.push_str("- controllo programmato\n");
        text.push_str("TERAPIA\n");
        text.push_str("ASA 100 MG 1 CPR DIE\n");
        text.push_str("ATORVASTATINA 20 MG 1 CPR SERA\n");
        text.push_str("PANTOPRAZOLO 20 MG 1 CPR MATTINO\n");
    }

    text
}

fn bench_reflow(c: &mut Criterion) {
    let engine = ReflowEngine::new();
    let small = create_report_text(5);
    let large = create_report_text(100);

    c.bench_function("reflow_small_report", |b| {
        b.iter(|| engine.reflow(black_box(&small)))
    });

    c.bench_function("reflow_large_report", |b| {
        b.iter(|| engine.reflow(black_box(&large)))
    });
}

fn bench_engine_construction(c: &mut Criterion) {
    c.bench_function("engine_new", |b| b.iter(ReflowEngine::new));
}

criterion_group!(benches, bench_reflow, bench_engine_construction);
criterion_main!(benches);
