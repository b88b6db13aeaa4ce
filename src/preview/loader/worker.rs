//! Background worker pool for preview loading
//!
//! Processes load requests across multiple worker threads and sends results
//! back via channels. Workers never touch the cache; the owning loader
//! drains results on its own thread.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::trace;

/// Default number of worker threads in the pool
pub const DEFAULT_POOL_SIZE: usize = 4;

/// A thread-safe, shared job run once per request.
pub type SharedJob<K, V> = Arc<dyn Fn(&K) -> V + Send + Sync>;

/// Spawn a pool of worker threads that process requests in parallel.
///
/// Each worker pulls keys from the shared `request_rx` channel, runs `job`
/// for each key, and sends the output back via its clone of `result_tx`.
/// Workers exit when the request channel is closed (all senders dropped).
pub fn spawn_worker_pool<K, V>(
    num_threads: usize,
    request_rx: Receiver<K>,
    result_tx: Sender<V>,
    job: SharedJob<K, V>,
) where
    K: Send + 'static,
    V: Send + 'static,
{
    let request_rx = Arc::new(Mutex::new(request_rx));

    for worker in 0..num_threads.max(1) {
        let rx = Arc::clone(&request_rx);
        let tx = result_tx.clone();
        let job = Arc::clone(&job);

        thread::spawn(move || loop {
            let key = {
                let Ok(rx) = rx.lock() else {
                    return; // another worker panicked while holding the lock
                };
                match rx.recv() {
                    Ok(key) => key,
                    Err(_) => return, // channel closed
                }
            };
            trace!(worker, "picked up preview load");
            let value = job(&key);
            // Ignore send errors (loader may have been dropped)
            let _ = tx.send(value);
        });
    }
    // Drop the original result_tx so the channel closes only when all workers exit
    drop(result_tx);
}
