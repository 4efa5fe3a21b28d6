use lru::LruCache;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::borrow::Borrow;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Literal tag every hash token starts with
pub const TOKEN_PREFIX: &str = "hash_";

/// Default capacity of the memoization cache
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

static DEFAULT_HASHER: Lazy<CachedHasher<Joaat>> =
    Lazy::new(|| CachedHasher::new(Joaat, DEFAULT_CACHE_CAPACITY));

/// A `hash_` tagged, zero-padded, uppercase hex rendering of a 32-bit hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashToken(String);

impl HashToken {
    pub fn from_value(value: u32) -> Self {
        Self(format!("{}{:08X}", TOKEN_PREFIX, value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HashToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HashToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for HashToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Jenkins one-at-a-time over the lower-cased code points of `text`.
pub fn joaat(text: &str) -> u32 {
    let mut hash: u32 = 0;

    for ch in text.to_lowercase().chars() {
        hash = hash.wrapping_add(ch as u32);
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }

    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash = hash.wrapping_add(hash << 15);

    hash
}

/// Hash a name into its token through the process-wide memoized hasher.
pub fn hash(text: &str) -> HashToken {
    DEFAULT_HASHER.token(text)
}

/// The shared hasher behind [`hash`], with the default cache capacity.
pub fn default_hasher() -> &'static CachedHasher<Joaat> {
    &DEFAULT_HASHER
}

/// Anything able to turn a name into a hash token
pub trait TokenHasher: Send + Sync {
    fn token(&self, text: &str) -> HashToken;
}

/// The bare, uncached one-at-a-time hasher
#[derive(Debug, Clone, Copy, Default)]
pub struct Joaat;

impl TokenHasher for Joaat {
    fn token(&self, text: &str) -> HashToken {
        HashToken::from_value(joaat(text))
    }
}

impl<T: TokenHasher + ?Sized> TokenHasher for &T {
    fn token(&self, text: &str) -> HashToken {
        (**self).token(text)
    }
}

/// LRU memoization in front of another hasher.
///
/// Keys are the raw input strings, so the wrapped hasher is free to
/// normalize however it likes.
pub struct CachedHasher<H> {
    inner: H,
    cache: Mutex<LruCache<String, HashToken>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<H: TokenHasher> CachedHasher<H> {
    /// A capacity of zero is clamped to one entry.
    pub fn new(inner: H, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.lock().cap().get()
    }
}

impl<H: TokenHasher> TokenHasher for CachedHasher<H> {
    fn token(&self, text: &str) -> HashToken {
        if let Some(token) = self.cache.lock().get(text) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return token.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let token = self.inner.token(text);
        self.cache.lock().put(text.to_string(), token.clone());
        token
    }
}
