//! Performance benchmarks for the serial frame decoder and host codec.
//!
//! The decoder runs once per received byte inside the receive context, so
//! its per-byte cost bounds interrupt latency.
//!
//! Run benchmarks with:
//! ```sh
//! cargo bench --bench decoder_bench
//! ```

use bytes::BytesMut;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use doorlock_protocol::{LockLinkCodec, SerialFrameDecoder};
use std::hint::black_box;
use tokio_util::codec::Decoder;

/// Benchmark decoding a stream of back-to-back valid frames.
fn bench_decode_valid_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_valid_frames");
    let stream: Vec<u8> = b"P1234#".repeat(100);
    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("feed_byte", |b| {
        b.iter(|| {
            let mut decoder = SerialFrameDecoder::new();
            let mut decoded = 0usize;
            for &byte in black_box(&stream) {
                if let Ok(Some(_)) = decoder.feed_byte(byte) {
                    decoded += 1;
                }
            }
            black_box(decoded)
        });
    });

    group.finish();
}

/// Benchmark decoding line noise with occasional frames.
fn bench_decode_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_noise");
    let mut stream = Vec::new();
    for i in 0..100u8 {
        stream.extend_from_slice(b"PX12#P123456#");
        stream.push(i);
    }
    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("feed_byte", |b| {
        b.iter(|| {
            let mut decoder = SerialFrameDecoder::new();
            for &byte in black_box(&stream) {
                let _ = black_box(decoder.feed_byte(byte));
            }
        });
    });

    group.finish();
}

/// Benchmark the host codec over a status-heavy reply stream.
fn bench_host_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("host_codec");
    let stream: Vec<u8> = b"SS_U_0#FS_L_1#".repeat(50);
    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("decode_replies", |b| {
        b.iter(|| {
            let mut codec = LockLinkCodec::new();
            let mut buffer = BytesMut::from(black_box(&stream[..]));
            let mut replies = 0usize;
            while let Ok(Some(_)) = codec.decode(&mut buffer) {
                replies += 1;
            }
            black_box(replies)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_decode_valid_frames,
    bench_decode_noise,
    bench_host_codec
);
criterion_main!(benches);
