use std::{cell::RefCell, rc::Rc};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use crossheap::replicate::replicate_top;
use crossheap::runtime::{
    closure::Closure,
    compiled_function::{CompiledFunction, Constant},
    context::Context,
    table::Table,
    table_key::TableKey,
    value::Value,
};

struct Scenario {
    name: &'static str,
    source: Context,
    key_ops: u64,
}

fn build_wide_table(entries: usize) -> Value {
    let table = Rc::new(RefCell::new(Table::with_capacity(entries)));
    for i in 0..entries {
        table.borrow_mut().insert(
            TableKey::Text(format!("k{}", i)),
            Value::Number(i as f64),
        );
    }
    Value::Table(table)
}

fn build_deep_table(depth: usize) -> Value {
    let mut value = Value::Number(0.0);
    for _ in 0..depth {
        let table = Rc::new(RefCell::new(Table::with_capacity(1)));
        table
            .borrow_mut()
            .insert(TableKey::Text("inner".to_string()), value);
        value = Value::Table(table);
    }
    value
}

fn build_closure_forest(count: usize) -> Vec<Value> {
    let function = Rc::new(CompiledFunction::new(
        vec![0x01; 64],
        vec![Constant::Number(1.0), Constant::Text("payload".to_string())],
        2,
        1,
        1,
    ));
    (0..count)
        .map(|i| {
            let closure = Rc::new(RefCell::new(Closure::new(function.clone())));
            closure
                .borrow_mut()
                .bind_upvalue(0, Value::Number(i as f64))
                .unwrap();
            Value::Closure(closure)
        })
        .collect()
}

fn build_scenarios() -> Vec<Scenario> {
    let mut scenarios = Vec::new();

    let mut wide = Context::new();
    wide.push(build_wide_table(1_000));
    scenarios.push(Scenario {
        name: "wide_table_1k",
        source: wide,
        key_ops: 1_000,
    });

    let mut deep = Context::new();
    deep.push(build_deep_table(256));
    scenarios.push(Scenario {
        name: "deep_table_256",
        source: deep,
        key_ops: 256,
    });

    let mut closures = Context::new();
    for value in build_closure_forest(256) {
        closures.push(value);
    }
    scenarios.push(Scenario {
        name: "closures_256",
        source: closures,
        key_ops: 256,
    });

    scenarios
}

fn bench_replicate(c: &mut Criterion) {
    let scenarios = build_scenarios();
    let mut group = c.benchmark_group("replicate/top");

    for scenario in &scenarios {
        let n = scenario.source.depth();
        group.throughput(Throughput::Elements(scenario.key_ops));
        group.bench_with_input(
            BenchmarkId::from_parameter(scenario.name),
            &scenario.source,
            |b, source| {
                b.iter(|| {
                    let mut dst = Context::new();
                    let report = replicate_top(black_box(source), &mut dst, n).unwrap();
                    black_box(report.pushed);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_replicate);
criterion_main!(benches);
