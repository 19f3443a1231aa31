//! Performance benchmarks for the MSB-first bitstream
//!
//! This benchmark suite evaluates:
//! - Single-bit writes and reads (the Huffman tree-walk pattern)
//! - Variable-width writes of 1-32 bits (the payload pattern)
//! - Wide writes of up to 128 bits (long codes)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxihuff_core::bitstream::{BitReader, BitWriter};
use std::hint::black_box;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Random data - varied byte values
    pub fn random(size: usize) -> Vec<u8> {
        // Simple PRNG for reproducible random data
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            // Linear congruential generator
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// (value, width) pairs with widths between 1 and 16 bits
    pub fn codes(count: usize) -> Vec<(u32, u8)> {
        random(count * 2)
            .chunks_exact(2)
            .map(|pair| {
                let width = (pair[0] % 16) + 1;
                let value = (pair[1] as u32) & ((1u32 << width) - 1);
                (value, width)
            })
            .collect()
    }
}

/// Data sizes for benchmarking
const SIZES: [(&str, usize); 3] = [("1KB", 1024), ("64KB", 64 * 1024), ("1MB", 1024 * 1024)];

/// Benchmark bit-at-a-time writes
fn bench_write_bit(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_bit");

    for (name, size) in SIZES {
        let data = test_data::random(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &data, |b, data| {
            b.iter(|| {
                let mut output = Vec::with_capacity(data.len());
                let mut writer = BitWriter::new(&mut output);
                for &byte in data {
                    for i in (0..8).rev() {
                        writer.write_bit((byte >> i) & 1 == 1).unwrap();
                    }
                }
                black_box(writer.finish().unwrap());
            });
        });
    }

    group.finish();
}

/// Benchmark bit-at-a-time reads
fn bench_read_bit(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_bit");

    for (name, size) in SIZES {
        let data = test_data::random(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &data, |b, data| {
            b.iter(|| {
                let mut reader = BitReader::new(black_box(data.as_slice()));
                let mut ones = 0u64;
                while let Some(bit) = reader.read_bit().unwrap() {
                    ones += bit as u64;
                }
                black_box(ones);
            });
        });
    }

    group.finish();
}

/// Benchmark variable-width writes
fn bench_write_bits(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_bits");

    for count in [1_000usize, 100_000] {
        let codes = test_data::codes(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &codes, |b, codes| {
            b.iter(|| {
                let mut output = Vec::new();
                let mut writer = BitWriter::new(&mut output);
                for &(value, width) in codes {
                    writer.write_bits(black_box(value), width).unwrap();
                }
                black_box(writer.finish().unwrap());
            });
        });
    }

    group.finish();
}

/// Benchmark wide writes used for long codes and the count field
fn bench_write_bits_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_bits_wide");

    for width in [40u8, 64, 128] {
        group.throughput(Throughput::Elements(10_000));
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            b.iter(|| {
                let mut output = Vec::new();
                let mut writer = BitWriter::new(&mut output);
                for i in 0..10_000u128 {
                    writer.write_bits_wide(black_box(i), width).unwrap();
                }
                black_box(writer.finish().unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_write_bit,
    bench_read_bit,
    bench_write_bits,
    bench_write_bits_wide,
);
criterion_main!(benches);
