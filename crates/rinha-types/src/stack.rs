//! Stack guard for walking term trees.
//!
//! A program of `n` sequential `let`s is a chain of `n` nested `next`
//! terms, so decoding and evaluating it both recurse `n` deep.
//! Every per-term step of those walks goes through
//! [`ensure_sufficient_stack`], which moves onto a fresh heap-allocated
//! stack segment when the current one runs low.

/// Run `f`, first switching to a new stack segment if less than 128KB remain.
///
/// Segments are 1MB each; on wasm32 `f` is called directly.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    const RED_ZONE: usize = 128 * 1024;
    const SEGMENT: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
