//! Row-granularity parallel dispatch.
//!
//! Each decode phase distributes work over the row range `[0, height)`; rows
//! are independent, every row is processed exactly once, and the dispatch
//! call returns only after all rows have completed. Phases therefore never
//! observe buffers still being written by a prior phase.

use rayon::prelude::*;

/// Opaque scheduling hint threaded through to the worker pool.
///
/// Higher values mean "schedule sooner"; the exact semantics belong to the
/// pool. The rayon backend executes work-stealing FIFO and has no priority
/// lanes, so the hint is carried for the collaborator interfaces that do
/// honor it (gain-map application) and is otherwise inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Priority(pub i32);

/// Applies `op` to every row of a flat row-major buffer, in parallel.
///
/// `op` receives the row index and the mutable row slice. Rows are disjoint
/// destination ranges, so no locking is required; completion of all rows is
/// awaited before this function returns.
pub fn for_each_row<F>(data: &mut [f32], row_len: usize, priority: Priority, op: F)
where
    F: Fn(usize, &mut [f32]) + Sync + Send,
{
    let _ = priority;
    data.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| op(y, row));
}

/// Extracts one component of an interleaved buffer into a planar buffer.
///
/// Reads `src[i * stride + offset]` for every pixel `i`, preserving order.
pub fn gather_component(src: &[f32], stride: usize, offset: usize) -> Vec<f32> {
    src.par_chunks(stride).map(|px| px[offset]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_row_processed_once() {
        let mut data = vec![0.0f32; 8 * 4];
        for_each_row(&mut data, 8, Priority(0), |y, row| {
            for v in row.iter_mut() {
                *v += (y + 1) as f32;
            }
        });

        for y in 0..4 {
            for x in 0..8 {
                assert_eq!(data[y * 8 + x], (y + 1) as f32);
            }
        }
    }

    #[test]
    fn test_matches_sequential_for_any_pool_size() {
        let src: Vec<f32> = (0..64 * 16).map(|i| (i % 251) as f32 / 251.0).collect();
        let transform = |v: f32| (v * 3.0 + 0.25).sin();

        let mut sequential = src.clone();
        for v in sequential.iter_mut() {
            *v = transform(*v);
        }

        for threads in [1, 2, 7] {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap();
            let mut parallel = src.clone();
            pool.install(|| {
                for_each_row(&mut parallel, 64, Priority(10), |_, row| {
                    for v in row.iter_mut() {
                        *v = transform(*v);
                    }
                });
            });
            assert_eq!(parallel, sequential, "{threads} threads");
        }
    }

    #[test]
    fn test_gather_component() {
        let interleaved = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert_eq!(gather_component(&interleaved, 4, 0), vec![1.0, 5.0]);
        assert_eq!(gather_component(&interleaved, 4, 3), vec![4.0, 8.0]);
    }
}
