use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use georef_matrix::{matrices, Matrix, MatrixOps};

// diagonally dominant so that every size is invertible
fn create_matrix(size: usize) -> Matrix {
    let elements = (0..size * size)
        .map(|k| {
            let (row, col) = (k / size, k % size);
            if row == col {
                size as f64 + 1.0
            } else {
                ((row * 7 + col * 3) % 5) as f64 * 0.1
            }
        })
        .collect::<Vec<_>>();
    matrices::create(size, size, &elements).unwrap()
}

fn bench_invert(c: &mut Criterion) {
    let mut group = c.benchmark_group("invert");
    for size in [2, 3, 4, 5, 8] {
        let m = create_matrix(size);
        group.bench_with_input(BenchmarkId::new("square", size), &m, |b, m| {
            b.iter(|| std::hint::black_box(matrices::invert(m).unwrap()))
        });
    }

    let affine = matrices::create(3, 3, &[2.0, 0.5, 10.0, -0.5, 2.0, 20.0, 0.0, 0.0, 1.0]).unwrap();
    group.bench_function("affine_2d", |b| {
        b.iter(|| std::hint::black_box(matrices::invert(&affine).unwrap()))
    });

    let filter = matrices::create_dimension_filter(4, &[0, 1]).unwrap();
    group.bench_function("dimension_reduction", |b| {
        b.iter(|| std::hint::black_box(matrices::invert(&filter).unwrap()))
    });
    group.finish();
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    for size in [2, 3, 4, 5, 8] {
        let a = create_matrix(size);
        let b = create_matrix(size);
        group.bench_with_input(BenchmarkId::new("square", size), &(a, b), |bench, (a, b)| {
            bench.iter(|| {
                let mut m = a.clone();
                m.multiply(b).unwrap();
                std::hint::black_box(m)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_invert, bench_multiply);
criterion_main!(benches);
