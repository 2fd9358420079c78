//! Benchmarks for notebook extraction and rendering.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic notebooks with a fixed number of sections.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nbconf::{Cell, Notebook, SectionWalker, TomlOptions};

/// Creates a notebook with `sections` headed sections of mixed assignments.
fn create_test_notebook(sections: usize) -> Notebook {
    let mut notebook = Notebook::new().with_cell(Cell::code("import numpy as np"));

    for i in 0..sections {
        notebook.add_cell(Cell::markdown(&format!(
            "## Section{}\nNarrative text for section {}.",
            i, i
        )));
        notebook.add_cell(Cell::code(&format!(
            "name = 'stage-{}'\nsize = {}\nratio = 0.{}5\nenabled = True\n\
             headers_to_split_on = [(\"#\", \"H1\"), (\"##\", \"H2\")]\n\
             sizes = [1, 2, 3]  # trailing comment\n\
             model = build_model(size=size)\nprint(name)\n",
            i, i, i
        )));
    }

    notebook
}

/// Creates nbformat JSON for the same synthetic notebook.
fn create_test_json(sections: usize) -> String {
    let cells: Vec<serde_json::Value> = create_test_notebook(sections)
        .cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let source: Vec<String> = cell.lines().map(|l| format!("{}\n", l)).collect();
            match cell.kind {
                nbconf::CellKind::Code => serde_json::json!({
                    "id": format!("c{}", i),
                    "cell_type": "code",
                    "metadata": {},
                    "execution_count": null,
                    "outputs": [],
                    "source": source,
                }),
                _ => serde_json::json!({
                    "id": format!("c{}", i),
                    "cell_type": "markdown",
                    "metadata": {},
                    "source": source,
                }),
            }
        })
        .collect();

    serde_json::json!({
        "nbformat": 4,
        "nbformat_minor": 5,
        "metadata": {},
        "cells": cells,
    })
    .to_string()
}

/// Benchmark notebook JSON reading.
fn bench_notebook_reading(c: &mut Criterion) {
    let json = create_test_json(20);

    c.bench_function("read_20_sections", |b| {
        b.iter(|| nbconf::parse_str(black_box(&json)).unwrap());
    });
}

/// Benchmark the section walk at various sizes.
fn bench_walking(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");
    let walker = SectionWalker::default();

    for sections in [1, 10, 100].iter() {
        let notebook = create_test_notebook(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| walker.walk(black_box(&notebook)));
        });
    }

    group.finish();
}

/// Benchmark YAML and TOML rendering.
fn bench_rendering(c: &mut Criterion) {
    let tree = nbconf::extract_config(&create_test_notebook(50));
    let options = TomlOptions::default();

    c.bench_function("render_yaml", |b| {
        b.iter(|| nbconf::render::to_yaml(black_box(&tree)).unwrap());
    });

    c.bench_function("render_toml", |b| {
        b.iter(|| nbconf::render::to_toml(black_box(&tree), &options));
    });
}

criterion_group!(benches, bench_notebook_reading, bench_walking, bench_rendering);
criterion_main!(benches);
