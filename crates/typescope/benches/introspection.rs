use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use typescope::{
    ancestors_of, find_member, is_assignable_from, members_of, set, value_at_path,
    FieldDefinition, TypeRegistry,
};
use typescope_types::{builtin, ObjectRef, TypeId};

/// Linear chain `Level0 <- Level1 <- ... <- Level{depth-1}`, one field per level
fn chain(depth: usize) -> (TypeRegistry, TypeId) {
    let mut registry = TypeRegistry::new();
    let mut current = builtin::OBJECT;
    for level in 0..depth {
        current = registry
            .define_class("bench", &format!("Level{level}"))
            .extends(current)
            .field(FieldDefinition::new(format!("field{level}"), builtin::INT))
            .build()
            .unwrap();
    }
    (registry, current)
}

/// Node type linking to itself, instantiated `depth` deep
fn linked(depth: usize) -> (TypeRegistry, ObjectRef, String) {
    let mut registry = TypeRegistry::new();
    let node = registry
        .define_class("bench", "Node")
        .field(FieldDefinition::new("next", TypeId::new(builtin::COUNT)))
        .field(FieldDefinition::new("label", builtin::STRING))
        .build()
        .unwrap();

    let tail = registry.instantiate(node).unwrap();
    set(&registry, &tail, "label", "tail");
    let mut head = tail;
    for _ in 0..depth {
        let parent = registry.instantiate(node).unwrap();
        set(&registry, &parent, "next", head);
        head = parent;
    }
    let path = format!("{}label", "next.".repeat(depth));
    (registry, head, path)
}

fn bench_hierarchy(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy");

    for depth in [4usize, 16, 64] {
        let (registry, leaf) = chain(depth);
        group.bench_with_input(BenchmarkId::new("ancestors_of", depth), &leaf, |b, leaf| {
            b.iter(|| ancestors_of(&registry, black_box(*leaf)));
        });
        group.bench_with_input(BenchmarkId::new("members_of", depth), &leaf, |b, leaf| {
            b.iter(|| members_of(&registry, black_box(*leaf)));
        });
        group.bench_with_input(
            BenchmarkId::new("is_assignable_from", depth),
            &leaf,
            |b, leaf| {
                b.iter(|| is_assignable_from(&registry, builtin::ITERABLE, black_box(*leaf)));
            },
        );
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let (registry, leaf) = chain(32);

    c.bench_function("find_member_deepest", |b| {
        b.iter(|| find_member(&registry, black_box("FIELD0"), leaf));
    });
}

fn bench_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("paths");

    for depth in [1usize, 8, 32] {
        let (registry, head, path) = linked(depth);
        group.bench_with_input(BenchmarkId::new("value_at_path", depth), &path, |b, path| {
            b.iter(|| value_at_path(&registry, &head, black_box(path.as_str())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hierarchy, bench_lookup, bench_paths);
criterion_main!(benches);
