//! FILENAME: core/report-engine/benches/class_report.rs
//! Benchmarks for full class report generation.

use averaging::{Class, EvaluationItem, FormulaSpec, Score, Student, Unit};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use report_engine::{build_class_report, ReportSettings};

fn build_class(units: u64, items: u64, personalized: bool) -> Class {
    let mut class = Class::new(1, "Benchmark");
    for u in 1..=units {
        let mut unit = Unit::new(u, format!("Unit {}", u), u as u32);
        for i in 1..=items {
            let item = EvaluationItem::new(u * 100 + i, format!("Item {}", i), i as u32);
            unit = unit.with_item(item);
        }
        if personalized {
            let terms: Vec<String> = (1..=items).map(|i| format!("N{} * {}", i, i)).collect();
            let weight: u64 = (1..=items).sum();
            let expression = format!("({}) / {}", terms.join(" + "), weight);
            unit.formula = FormulaSpec::Personalized(expression);
        }
        class.units.push(unit);
    }
    class
}

fn build_students(count: u64, units: u64, items: u64) -> (Vec<Student>, Vec<Score>) {
    let mut students = Vec::with_capacity(count as usize);
    let mut scores = Vec::with_capacity((count * units * items) as usize);
    for s in 1..=count {
        students.push(Student::new(s, format!("Student {}", s)));
        for u in 1..=units {
            for i in 1..=items {
                let value = ((s * 7 + u * 3 + i) % 101) as f64 / 10.0;
                scores.push(Score::new(s, u * 100 + i, value));
            }
        }
    }
    (students, scores)
}

fn bench_class_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("class_report");
    let settings = ReportSettings::default();

    for &students in &[30u64, 300, 3000] {
        let (roster, scores) = build_students(students, 4, 5);

        let simple = build_class(4, 5, false);
        group.bench_with_input(BenchmarkId::new("simple", students), &students, |b, _| {
            b.iter(|| build_class_report(black_box(&simple), &roster, &scores, &settings))
        });

        let personalized = build_class(4, 5, true);
        group.bench_with_input(
            BenchmarkId::new("personalized", students),
            &students,
            |b, _| {
                b.iter(|| {
                    build_class_report(black_box(&personalized), &roster, &scores, &settings)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_class_report);
criterion_main!(benches);
