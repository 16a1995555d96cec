use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dtogen_core::*;

#[inline(always)]
fn row(layer: u32, name: &str, data_type: &str) -> Record {
    Record::from_iter([
        ("Layer", layer.to_string()),
        ("Variable Name", name.to_owned()),
        ("Data Type", data_type.to_owned()),
    ])
}

// Many top-level classes with a flat list of fields.
fn flat_records(classes: usize, fields: usize) -> Vec<Record> {
    let mut records = Vec::with_capacity(classes * (fields + 1));
    for class in 0..classes {
        records.push(row(0, &format!("Class{class}"), ""));
        for field in 0..fields {
            records.push(row(1, &format!("field{field}"), "int"));
        }
    }
    records
}

// A single chain of classes, each owning the next through its only field.
fn deep_records(depth: u32) -> Vec<Record> {
    (0..depth)
        .flat_map(|level| {
            [
                row(2 * level, &format!("Class{level}"), ""),
                row(2 * level + 1, "child", &format!("Class{}", level + 1)),
            ]
        })
        .collect()
}

fn reconstruct_flat(c: &mut Criterion) {
    let items = ItemNames::default();
    let mut group = c.benchmark_group("reconstruct_flat");
    for classes in [10, 100, 1000] {
        let records = flat_records(classes, 20);
        group.bench_with_input(BenchmarkId::from_parameter(classes), &records, |b, records| {
            b.iter(|| reconstruct(black_box(records), &items))
        });
    }
    group.finish();
}

fn reconstruct_deep(c: &mut Criterion) {
    let items = ItemNames::default();
    let mut group = c.benchmark_group("reconstruct_deep");
    for depth in [8, 32, 64] {
        let records = deep_records(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &records, |b, records| {
            b.iter(|| {
                Reconstructor::new(&items)
                    .with_max_depth(depth as usize)
                    .reconstruct(black_box(records))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, reconstruct_flat, reconstruct_deep);
criterion_main!(benches);
