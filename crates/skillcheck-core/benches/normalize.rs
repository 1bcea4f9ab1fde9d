use criterion::{black_box, criterion_group, criterion_main, Criterion};

use skillcheck_core::normalize::{clean, normalize};
use skillcheck_core::VariantHint;

fn bench_clean(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean");

    let plain = "8, -4";
    let latex = r"$\left( \frac{3}{2}, -\sqrt{16} \right)$";
    let fullwidth = "ｘ＝３，ｙ＝－２。";

    let long_list = {
        let items: Vec<String> = (0..100).map(|i| format!("\\frac{{{i}}}{{7}}")).collect();
        format!("${}$", items.join(" 或 "))
    };

    group.bench_function("plain", |b| b.iter(|| clean(black_box(plain))));
    group.bench_function("latex", |b| b.iter(|| clean(black_box(latex))));
    group.bench_function("fullwidth", |b| b.iter(|| clean(black_box(fullwidth))));
    group.bench_function("100_fractions", |b| {
        b.iter(|| clean(black_box(&long_list)))
    });

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let cases = [
        ("number", "2 1/2", None),
        ("set", "-4 或 8", Some(VariantHint::UnorderedSet)),
        ("tuple", "x = 3, y = -2", None),
        ("nested", "(1, 2), (3, 4), {5, 6}", Some(VariantHint::OrderedList)),
        ("token", "一樣大", Some(VariantHint::Token)),
        ("symbolic", "2x^2 + 3x - 1", None),
    ];

    for (name, raw, hint) in cases {
        group.bench_function(name, |b| b.iter(|| normalize(black_box(raw), hint)));
    }

    group.finish();
}

criterion_group!(benches, bench_clean, bench_normalize);
criterion_main!(benches);
