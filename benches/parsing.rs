use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use level_json::parse;
use std::fmt::Write;

const CODES: [&str; 6] = ["n", "d", "c", "s", "g", "x"];

fn level(bricks: usize) -> String {
    let mut json = String::from("{\n    \"name\": \"bench\",\n    \"destroy\": 3,\n    // generated\n    \"bricks\": [\n");

    for i in 0..bricks {
        let separator = if i + 1 == bricks { "" } else { "," };
        writeln!(
            json,
            "        [\"{}\", {}.5, {}, 1.25, 0.5]{} /* brick {} */",
            CODES[i % CODES.len()],
            i,
            i * 2,
            separator,
            i
        )
        .unwrap();
    }

    json.push_str("    ],\n    \"idols\": [[[0, 5], [-0.5, 0], [0.5, 0], [0, 1e0]]]\n}\n");
    json
}

fn parse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parser");

    group.sample_size(10);

    for bricks in [10, 1_000, 100_000] {
        let json = level(bricks);

        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(bricks), &json, |b, data| {
            b.iter(|| {
                let _ = parse(black_box(data)).unwrap();
            })
        });
    }
}

criterion_group!(benches, parse_benchmark);
criterion_main!(benches);
