//! Criterion benchmarks for uiforge critical paths
//!
//! Benchmarks the operations a host runs on every interaction:
//! - Workspace: placing elements and routing edits
//! - Form: rebuilding the property form
//! - Export: generating the construction script
//! - Document: parsing a workspace document

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use uiforge::document::{Document, DocumentFormat};
use uiforge::export::{export_workspace, to_line_array, ExportOptions};
use uiforge::property::Edit;
use uiforge::registry::ElementRegistry;
use uiforge::workspace::{Form, Workspace};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Build a workspace with `n` labels, every fourth followed by a row break.
fn make_workspace(registry: &Arc<ElementRegistry>, n: usize) -> Workspace {
    let mut ws = Workspace::new(Arc::clone(registry));
    for i in 0..n {
        let id = ws.add_element("Label").expect("Label is built in");
        ws.edit_property(id, "text", format!("Label \"{}\"", i)).expect("text is active");
        ws.add_property(id, "width").expect("width exists");
        ws.edit_property(id, "width", (40 + i % 60).to_string()).expect("width is active");
        ws.add_property(id, "wrap").expect("wrap exists");
        ws.edit_property(id, "wrap", Edit::Toggle).expect("wrap is active");
        if i % 4 == 3 {
            ws.add_element("Row").expect("Row is built in");
        }
    }
    ws
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_workspace(c: &mut Criterion) {
    let registry = Arc::new(ElementRegistry::builtin());
    let mut group = c.benchmark_group("workspace");

    for size in [10usize, 100] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("build", size), &size, |b, &size| {
            b.iter(|| make_workspace(&registry, black_box(size)))
        });
    }

    let mut ws = make_workspace(&registry, 1);
    let id = ws.elements()[0].id();
    group.bench_function("edit_number", |b| {
        b.iter(|| ws.edit_property(id, "width", black_box("120")))
    });
    group.bench_function("edit_rejected", |b| {
        b.iter(|| ws.edit_property(id, "width", black_box("wide")))
    });
    group.finish();
}

fn bench_form(c: &mut Criterion) {
    let registry = Arc::new(ElementRegistry::builtin());
    let ws = make_workspace(&registry, 1);
    let instance = &ws.elements()[0];

    c.bench_function("form_build", |b| b.iter(|| Form::build(black_box(instance))));
}

fn bench_export(c: &mut Criterion) {
    let registry = Arc::new(ElementRegistry::builtin());
    let options = ExportOptions::default();
    let mut group = c.benchmark_group("export");

    for size in [10usize, 100, 1000] {
        let ws = make_workspace(&registry, size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("script", size), &ws, |b, ws| {
            b.iter(|| export_workspace(black_box(ws), &options))
        });
    }

    let script = export_workspace(&make_workspace(&registry, 100), &options);
    group.throughput(Throughput::Bytes(script.len() as u64));
    group.bench_function("line_array_100", |b| b.iter(|| to_line_array(black_box(&script))));
    group.finish();
}

fn bench_document(c: &mut Criterion) {
    let registry = Arc::new(ElementRegistry::builtin());
    let ws = make_workspace(&registry, 100);
    let doc = Document::from_workspace(&ws);
    let toml = doc.render(DocumentFormat::Toml).expect("document renders");
    let json = doc.render(DocumentFormat::Json).expect("document renders");

    let mut group = c.benchmark_group("document");
    group.throughput(Throughput::Bytes(toml.len() as u64));
    group.bench_function("parse_toml_100", |b| {
        b.iter(|| Document::parse(black_box(&toml), DocumentFormat::Toml))
    });
    group.throughput(Throughput::Bytes(json.len() as u64));
    group.bench_function("parse_json_100", |b| {
        b.iter(|| Document::parse(black_box(&json), DocumentFormat::Json))
    });
    group.bench_function("load_100", |b| {
        b.iter(|| doc.into_workspace(Arc::clone(&registry)))
    });
    group.finish();
}

criterion_group!(benches, bench_workspace, bench_form, bench_export, bench_document);
criterion_main!(benches);
