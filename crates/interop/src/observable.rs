//! Observable cells and the effects that subscribe to them.
//!
//! # Design
//!
//! [`Observable<T>`] holds a value in shared, reference-counted storage and
//! remembers which [`Effect`]s read it. Reading through [`Observable::get`]
//! with an effect subscribes that effect; writing a *different* value with
//! [`Observable::set`] re-runs every subscriber synchronously.
//!
//! An effect drops all of its subscriptions right before each run and picks
//! up new ones from the reads it performs, so its dependency set always
//! matches the last evaluation (a rule that short-circuited on `:hover` does
//! not stay subscribed to the viewport).
//!
//! # Invariants
//!
//! 1. Setting a value equal to the current one is a no-op.
//! 2. An effect is run at most once per write, and at most once per
//!    [`Batch`] no matter how many of its sources changed.
//! 3. A running effect is never re-entered; a notification that arrives
//!    while it runs is dropped.
//! 4. A disposed effect is never run again and holds no subscriptions.
//!
//! Observers are stored as `Weak` references and pruned lazily, so dropping
//! every handle to an effect is enough to stop notifications.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Something an effect can unsubscribe from.
trait Source {
    fn unsubscribe(&self, effect: *const EffectInner);
}

struct ObservableInner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Weak<EffectInner>>>,
}

impl<T> Source for ObservableInner<T> {
    fn unsubscribe(&self, effect: *const EffectInner) {
        self.subscribers
            .borrow_mut()
            .retain(|s| s.strong_count() > 0 && s.as_ptr() != effect);
    }
}

/// A reactive cell.
///
/// Cloning an `Observable` creates a new handle to the **same** cell.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use interop::observable::{Effect, observable};
///
/// let width = observable(320.0);
/// let seen = Rc::new(Cell::new(0.0));
///
/// let effect = {
///     let width = width.clone();
///     let seen = seen.clone();
///     Effect::new(move |effect| seen.set(width.get(Some(effect))))
/// };
/// effect.run();
/// assert_eq!(seen.get(), 320.0);
///
/// width.set(480.0);
/// assert_eq!(seen.get(), 480.0);
/// ```
pub struct Observable<T> {
    inner: Rc<ObservableInner<T>>,
}

/// Creates a new observable cell.
pub fn observable<T>(initial: T) -> Observable<T> {
    Observable::new(initial)
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.inner.value.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(ObservableInner {
                value: RefCell::new(initial),
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Number of live subscribed effects.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .borrow()
            .iter()
            .filter(|s| s.strong_count() > 0)
            .count()
    }

    /// Both handles point at the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Live subscribers, pruning dropped ones.
    fn live_subscribers(&self) -> Vec<Effect> {
        let mut subscribers = self.inner.subscribers.borrow_mut();
        subscribers.retain(|s| s.strong_count() > 0);
        subscribers
            .iter()
            .filter_map(Weak::upgrade)
            .map(|inner| Effect { inner })
            .collect()
    }
}

impl<T: 'static> Observable<T> {
    /// Reads the value through a closure, subscribing `effect` if given.
    pub fn with<R>(&self, effect: Option<&Effect>, f: impl FnOnce(&T) -> R) -> R {
        if let Some(effect) = effect {
            self.subscribe(effect);
        }
        f(&self.inner.value.borrow())
    }

    fn subscribe(&self, effect: &Effect) {
        if effect.is_disposed() {
            return;
        }
        let target = Rc::as_ptr(&effect.inner);
        {
            let mut subscribers = self.inner.subscribers.borrow_mut();
            if subscribers.iter().any(|s| s.as_ptr() == target) {
                return;
            }
            subscribers.push(Rc::downgrade(&effect.inner));
        }
        let source: Weak<dyn Source> = Rc::downgrade(&self.inner) as Weak<dyn Source>;
        effect.inner.sources.borrow_mut().push(source);
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Current value. Passing an effect subscribes it to future changes.
    pub fn get(&self, effect: Option<&Effect>) -> T {
        self.with(effect, T::clone)
    }
}

impl<T: PartialEq + 'static> Observable<T> {
    /// Replaces the value and synchronously re-runs subscribers.
    ///
    /// Does nothing if `next` equals the current value.
    pub fn set(&self, next: T) {
        if self.replace(next) {
            for effect in self.live_subscribers() {
                effect.run();
            }
        }
    }

    /// Replaces the value and defers subscribers to `batch`.
    pub fn set_in(&self, next: T, batch: &mut Batch) {
        if self.replace(next) {
            for effect in self.live_subscribers() {
                batch.schedule(effect);
            }
        }
    }

    fn replace(&self, next: T) -> bool {
        let mut value = self.inner.value.borrow_mut();
        if *value == next {
            return false;
        }
        *value = next;
        true
    }
}

struct EffectInner {
    callback: Box<dyn Fn(&Effect)>,
    sources: RefCell<Vec<Weak<dyn Source>>>,
    running: Cell<bool>,
    disposed: Cell<bool>,
    runs: Cell<u64>,
}

/// The subscription identity of one evaluation.
///
/// Cloning an `Effect` creates a new handle to the same effect.
#[derive(Clone)]
pub struct Effect {
    inner: Rc<EffectInner>,
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect")
            .field("runs", &self.inner.runs.get())
            .field("sources", &self.inner.sources.borrow().len())
            .field("disposed", &self.inner.disposed.get())
            .finish()
    }
}

/// Resets the running flag even if the callback panics.
struct RunningGuard<'a>(&'a Cell<bool>);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Effect {
    pub fn new(callback: impl Fn(&Effect) + 'static) -> Self {
        Self {
            inner: Rc::new(EffectInner {
                callback: Box::new(callback),
                sources: RefCell::new(Vec::new()),
                running: Cell::new(false),
                disposed: Cell::new(false),
                runs: Cell::new(0),
            }),
        }
    }

    /// An effect whose re-runs do nothing but count.
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    /// Drops current subscriptions and runs the callback.
    pub fn run(&self) {
        if self.inner.disposed.get() {
            log::debug!("effect: skipping run of disposed effect");
            return;
        }
        if self.inner.running.get() {
            log::debug!("effect: skipping re-entrant run");
            return;
        }

        self.inner.running.set(true);
        let _guard = RunningGuard(&self.inner.running);
        self.clear_sources();
        self.inner.runs.set(self.inner.runs.get() + 1);
        (self.inner.callback)(self);
    }

    /// Releases every subscription; the effect never runs again.
    pub fn dispose(&self) {
        self.inner.disposed.set(true);
        self.clear_sources();
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    /// How many times the callback has been invoked.
    pub fn run_count(&self) -> u64 {
        self.inner.runs.get()
    }

    /// Number of cells this effect is currently subscribed to.
    pub fn source_count(&self) -> usize {
        self.inner
            .sources
            .borrow()
            .iter()
            .filter(|s| s.strong_count() > 0)
            .count()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn clear_sources(&self) {
        let sources = std::mem::take(&mut *self.inner.sources.borrow_mut());
        let me = Rc::as_ptr(&self.inner);
        for source in sources {
            if let Some(source) = source.upgrade() {
                source.unsubscribe(me);
            }
        }
    }
}

/// Collects effects from several writes and runs each of them once.
///
/// ```
/// use interop::observable::{Batch, Effect, observable};
///
/// let width = observable(0.0);
/// let height = observable(0.0);
/// let effect = {
///     let (w, h) = (width.clone(), height.clone());
///     Effect::new(move |e| {
///         w.get(Some(e));
///         h.get(Some(e));
///     })
/// };
/// effect.run();
///
/// let mut batch = Batch::new();
/// width.set_in(100.0, &mut batch);
/// height.set_in(50.0, &mut batch);
/// batch.flush();
///
/// assert_eq!(effect.run_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Batch {
    pending: Vec<Effect>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    fn schedule(&mut self, effect: Effect) {
        if !self.pending.iter().any(|e| e.ptr_eq(&effect)) {
            self.pending.push(effect);
        }
    }

    /// Number of distinct effects waiting to run.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Runs every scheduled effect once, in scheduling order.
    pub fn flush(self) {
        for effect in self.pending {
            effect.run();
        }
    }
}

/// Runs `writes` against a fresh batch, then flushes it.
pub fn batch<R>(writes: impl FnOnce(&mut Batch) -> R) -> R {
    let mut batch = Batch::new();
    let result = writes(&mut batch);
    batch.flush();
    result
}
