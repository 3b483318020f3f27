use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Number of worker threads for a requested count; `0` means one per CPU.
pub fn resolve_workers(requested: usize) -> usize {
    if requested == 0 {
        num_cpus::get().max(1)
    } else {
        requested
    }
}

/// Applies `f` to every item on up to `workers` scoped threads.
///
/// Results keep the input order. Workers pull the next unclaimed index, so
/// uneven items do not stall the pool; each result lands in its own slot.
pub(crate) fn parallel_map<T, R, F>(items: &[T], workers: usize, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> R + Sync,
{
    let workers = resolve_workers(workers).min(items.len());
    if workers <= 1 {
        return items.iter().enumerate().map(|(i, t)| f(i, t)).collect();
    }

    let next = AtomicUsize::new(0);
    let f = &f;
    let next = &next;

    let parts: Vec<Vec<(usize, R)>> = thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                s.spawn(move || {
                    let mut local = Vec::new();
                    loop {
                        let i = next.fetch_add(1, Ordering::Relaxed);
                        let Some(item) = items.get(i) else {
                            break;
                        };
                        local.push((i, f(i, item)));
                    }
                    local
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(part) => part,
                Err(payload) => panic::resume_unwind(payload),
            })
            .collect()
    });

    let mut slots: Vec<Option<R>> = Vec::with_capacity(items.len());
    slots.resize_with(items.len(), || None);
    for (i, r) in parts.into_iter().flatten() {
        slots[i] = Some(r);
    }
    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::{parallel_map, resolve_workers};

    #[test]
    fn zero_means_all_cpus() {
        assert!(resolve_workers(0) >= 1);
        assert_eq!(resolve_workers(3), 3);
    }

    #[test]
    fn order_is_kept_for_any_worker_count() {
        let items: Vec<u64> = (0..257).collect();
        let expected: Vec<u64> = items.iter().map(|v| v * v + 1).collect();

        for workers in [0, 1, 2, 7, 64, 1000] {
            let got = parallel_map(&items, workers, |i, v| {
                assert_eq!(i as u64, *v);
                v * v + 1
            });
            assert_eq!(got, expected, "workers = {workers}");
        }
    }

    #[test]
    fn empty_input() {
        let items: Vec<u8> = Vec::new();
        assert!(parallel_map(&items, 4, |_, v| *v).is_empty());
    }
}
