//! Integration Tests for the Cache Engines
//!
//! Exercises the public API of both cache scopes end to end.

use std::sync::{Arc, Barrier};
use std::thread;

use local_cache::cache::{DEFAULT_SIZE, DEFAULT_TIMEOUT_SECS};
use local_cache::{CacheEngine, CachedFn, Config, ContextCache, ContextId, MemoryCache};

// == Helper Functions ==

/// Runs the same scenario against any engine.
fn fifo_scenario<C: CacheEngine<i32> + ?Sized>(cache: &mut C) {
    cache.set("a", 1, None, Some(2));
    cache.set("b", 2, None, Some(2));
    cache.set("c", 3, None, Some(2));

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.get("b"), Some(2));
    assert_eq!(cache.get("c"), Some(3));
}

fn expiry_scenario<C: CacheEngine<i32> + ?Sized>(cache: &mut C) {
    cache.set("a", 1, Some(-1.0), None);

    assert!(!cache.exists("a"));
    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.len(), 0, "stale entry is dropped once read");
}

// == Global Scope ==

#[test]
fn test_memory_defaults() {
    assert_eq!(DEFAULT_TIMEOUT_SECS, 300.0);
    assert_eq!(DEFAULT_SIZE, 300);

    let mut cache = MemoryCache::new();
    cache.set("a", 1, None, None);

    assert_eq!(cache.get("a"), Some(1));
}

#[test]
fn test_memory_fifo_eviction() {
    fifo_scenario(&mut MemoryCache::<i32>::new());
}

#[test]
fn test_memory_expired_timeout() {
    expiry_scenario(&mut MemoryCache::<i32>::new());
}

#[test]
fn test_memory_overwrite_resets_value_and_expiry() {
    let mut cache = MemoryCache::new();

    cache.set("a", 1, Some(-1.0), None);
    cache.set("a", 2, Some(60.0), None);

    assert_eq!(cache.get("a"), Some(2));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_memory_shared_behind_lock() {
    let cache = Arc::new(std::sync::Mutex::new(MemoryCache::new()));

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                cache.lock().unwrap().set(&format!("k{i}"), i, None, Some(10));
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    let mut guard = cache.lock().unwrap();
    assert_eq!(guard.len(), 4);
    for i in 0..4 {
        assert!(guard.exists(&format!("k{i}")));
    }
}

// == Context Scope ==

#[test]
fn test_context_fifo_eviction() {
    let cache = ContextCache::<i32>::new();
    fifo_scenario(&mut cache.handle());
}

#[test]
fn test_context_expired_timeout() {
    let cache = ContextCache::<i32>::new();
    expiry_scenario(&mut cache.handle_for(ContextId::Worker(3)));
}

#[test]
fn test_context_threads_never_share() {
    let cache = Arc::new(ContextCache::new());
    let barrier = Arc::new(Barrier::new(3));

    let workers: Vec<_> = (0..3)
        .map(|i| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut handle = cache.handle();
                handle.set("shared-name", i, None, None);
                // Everyone has written before anyone reads
                barrier.wait();
                handle.get("shared-name")
            })
        })
        .collect();

    let seen: Vec<_> = workers.into_iter().map(|w| w.join().unwrap()).collect();

    assert_eq!(seen, vec![Some(0), Some(1), Some(2)]);
    assert_eq!(cache.contexts(), 3);
    assert!(!cache.handle().exists("shared-name"));
}

#[test]
fn test_context_clear_is_local() {
    let cache = ContextCache::new();
    let mut a = cache.handle_for(ContextId::Worker(1));
    let mut b = cache.handle_for(ContextId::Worker(2));
    a.set("k", 1, None, None);
    b.set("k", 2, None, None);

    b.clear();

    assert_eq!(a.get("k"), Some(1));
    assert!(!b.exists("k"));
}

// == Configuration & Wrapping ==

#[test]
fn test_configured_caches() {
    let config = Config::from_lookup(|name| match name {
        "CACHE_DEFAULT_SIZE" => Some("2".to_string()),
        _ => None,
    })
    .unwrap();

    let mut memory = MemoryCache::from_config(&config);
    let contexts = ContextCache::from_config(&config);
    let mut handle = contexts.handle();

    for key in ["x", "y", "z"] {
        memory.set(key, 0, None, None);
        handle.set(key, 0, None, None);
    }

    assert_eq!(memory.keys(), vec!["y", "z"]);
    assert_eq!(handle.keys(), vec!["y", "z"]);
}

#[test]
fn test_cached_fn_across_scopes() {
    let length = CachedFn::with_key_fn(|s: &String| format!("len:{s}"), |s: &String| s.len());

    let mut memory = MemoryCache::new();
    let contexts = ContextCache::new();
    let mut worker = contexts.handle_for(ContextId::Worker(9));

    assert_eq!(length.call(&mut memory, &"abc".to_string()), 3);
    assert_eq!(length.call(&mut worker, &"hello".to_string()), 5);

    assert_eq!(memory.get("len:abc"), Some(3));
    assert_eq!(memory.get("len:hello"), None);
    assert_eq!(worker.get("len:hello"), Some(5));
}
