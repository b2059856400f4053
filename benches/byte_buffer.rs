use brc_stats::byte_buffer::{ByteBuffer, Lines, split_regions};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_byte_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("byte_position");

    let test_cases: Vec<(&str, Vec<u8>)> = vec![
        ("len_6_pos_2", b"Xi;3.4".to_vec()),
        ("len_8_pos_4", b"Lima;5.6".to_vec()),
        ("len_11_pos_6", b"Berlin;12.3".to_vec()),
        ("len_18_pos_13", b"San Francisco;-5.2".to_vec()),
        ("len_23_pos_18", b"Thiruvananthapuram;31.2".to_vec()),
        (
            "len_53_pos_48",
            b"Some Very Long Station Name That Goes On Forever;99.9".to_vec(),
        ),
    ];

    for (name, line) in &test_cases {
        group.throughput(Throughput::Bytes(line.len() as u64));
        group.bench_with_input(BenchmarkId::new("swar", name), line, |b, line| {
            b.iter(|| black_box(line.as_slice()).byte_position(b';'))
        });
        group.bench_with_input(BenchmarkId::new("iter", name), line, |b, line| {
            b.iter(|| black_box(line.as_slice()).iter().position(|&b| b == b';'))
        });
    }

    group.finish();
}

fn bench_byte_position_worst_case(c: &mut Criterion) {
    let mut group = c.benchmark_group("byte_position_worst");

    let late: Vec<u8> = "A".repeat(63).into_bytes().into_iter().chain([b';']).collect();
    let missing: Vec<u8> = "A".repeat(64).into_bytes();

    group.throughput(Throughput::Bytes(64));

    group.bench_function("needle_at_end_64", |b| {
        b.iter(|| black_box(late.as_slice()).byte_position(b';'))
    });

    group.bench_function("needle_missing_64", |b| {
        b.iter(|| black_box(missing.as_slice()).byte_position(b';'))
    });

    group.finish();
}

fn bench_lines(c: &mut Criterion) {
    let buf: Vec<u8> = ["Bāgepalli;17.8", "San Fernando;-1.9", "Kika;4.3", "Bo;6.8"]
        .iter()
        .cycle()
        .take(10_000)
        .map(|line| format!("{line}\n"))
        .collect::<String>()
        .into_bytes();

    let mut group = c.benchmark_group("lines");
    group.throughput(Throughput::Bytes(buf.len() as u64));

    group.bench_function("split_records", |b| {
        b.iter(|| {
            Lines::new(black_box(&buf))
                .filter_map(|line| line.split_record(b';'))
                .count()
        })
    });

    group.bench_function("split_regions_8", |b| {
        b.iter(|| split_regions(black_box(&buf), 8).len())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_byte_position,
    bench_byte_position_worst_case,
    bench_lines
);
criterion_main!(benches);
