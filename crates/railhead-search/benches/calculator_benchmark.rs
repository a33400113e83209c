// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use railhead_model::{
    index::{TrainIndex, VertexIndex},
    network::{RevenueNetwork, RevenueNetworkBuilder},
    train::TrainDescriptor,
    vertex::Vertex,
};
use railhead_search::{calculator::RevenueCalculator, options::CalculatorOptions};
use std::hint::black_box;

/// Builds a `rows x cols` grid with right, down and alternating diagonal
/// links. Every vertex is a major, minor or a plain side track; the four
/// corners that are majors become start vertices.
fn grid_network(rows: usize, cols: usize, seed: u64) -> RevenueNetwork<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = RevenueNetworkBuilder::<i32>::new();

    let mut ids: Vec<VertexIndex> = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let corner = (r == 0 || r == rows - 1) && (c == 0 || c == cols - 1);
            let roll = rng.random_range(0..10);
            let vertex = if corner || roll < 3 {
                Vertex::major(rng.random_range(20..=60))
            } else if roll < 6 {
                Vertex::minor(rng.random_range(10..=30))
            } else {
                Vertex::side()
            };
            let id = builder.add_vertex(vertex);
            if corner {
                builder.add_start_vertex(id);
            }
            ids.push(id);
        }
    }

    let at = |r: usize, c: usize| ids[r * cols + c];
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                builder.connect(at(r, c), at(r, c + 1));
            }
            if r + 1 < rows {
                builder.connect(at(r, c), at(r + 1, c));
                if (r + c) % 2 == 0 && c + 1 < cols {
                    builder.connect(at(r, c), at(r + 1, c + 1));
                }
            }
        }
    }

    builder.add_train(TrainDescriptor::standard("3", 3, 0));
    builder.add_train(TrainDescriptor::standard("2+2", 2, 2));

    builder
        .build()
        .unwrap_or_else(|e| panic!("Benchmark grid {}x{} is malformed: {}", rows, cols, e))
}

fn bench_grid_networks(c: &mut Criterion) {
    let sizes = [(3, 3), (3, 4), (4, 4)];
    let mut group = c.benchmark_group("calculator_benchmark");

    for (rows, cols) in sizes {
        let network = grid_network(rows, cols, 42);
        let final_train = TrainIndex::new(network.num_trains() - 1);
        let size_label = format!("{}x{}", rows, cols);

        group.throughput(Throughput::Elements(network.num_edges() as u64));

        for use_prediction in [true, false] {
            let options = CalculatorOptions::default().with_prediction(use_prediction);
            let mut calculator = RevenueCalculator::with_options(network.clone(), options);
            let mode = if use_prediction { "prediction" } else { "plain" };

            group.bench_with_input(
                BenchmarkId::new(&size_label, mode),
                &final_train,
                |b, &final_train| {
                    b.iter(|| {
                        let outcome = calculator
                            .calculate_revenue(black_box(TrainIndex::new(0)), black_box(final_train))
                            .unwrap_or_else(|e| panic!("Benchmark configuration error: {}", e));
                        black_box(outcome.total())
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_grid_networks);
criterion_main!(benches);
