/*
  Minuet, a chess rules engine.
  Copyright (C) 2025 The Minuet Authors.

  Minuet is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Minuet is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use minuet::perft::perft;
use minuet::Board;

/// Expected node counts from the starting position, indexed by depth.
/// Only depths where special moves cannot occur are listed, so the
/// restricted rule set agrees with the canonical values.
const EXPECTED_NODES: [u64; 5] = [1, 20, 400, 8_902, 197_281];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_startpos");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for depth in 2..=4u8 {
        let expected = EXPECTED_NODES[depth as usize];

        // Correctness guard before benchmarking.
        let warmup = perft(&mut Board::new(), depth);
        assert_eq!(
            warmup, expected,
            "node mismatch in warmup at depth {depth}"
        );

        group.throughput(Throughput::Elements(expected));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("d{depth}")),
            &expected,
            |b, &expected| {
                let mut board = Board::new();
                b.iter(|| {
                    let nodes = perft(black_box(&mut board), black_box(depth));
                    assert_eq!(nodes, expected);
                    black_box(nodes)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
