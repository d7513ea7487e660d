//! Loop driver
//!
//! A [`Session`] owns one game, the surface it draws on and the handles of
//! the repeating tasks it scheduled. Starting registers the tasks, stopping
//! cancels exactly those handles. Input events reach the game through
//! [`Session::dispatch`]; the host never touches game state directly.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use glam::Vec2;

use crate::render::Surface;

pub use crate::sim::Key;

/// Input delivered by the host, in field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    KeyDown(Key),
    KeyUp(Key),
    /// The surface (or window) lost input focus
    FocusLost,
}

/// A game the loop driver can run
pub trait Game {
    /// Interval between update+render ticks (ms)
    fn tick_interval_ms(&self) -> u32;

    /// Interval of the slow session clock, for games that keep one
    fn clock_interval_ms(&self) -> Option<u32> {
        None
    }

    /// Advance the simulation by one tick
    fn tick(&mut self);

    /// Advance the session clock
    fn clock(&mut self) {}

    fn render(&self, surface: &mut dyn Surface);

    /// Apply an input event; returns whether the game consumed it
    fn handle_input(&mut self, event: InputEvent) -> bool;

    /// The container changed width
    fn resize(&mut self, field_width: f32);
}

/// Handle of a scheduled repeating task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

/// Runs tasks repeatedly at a fixed interval
pub trait Scheduler {
    /// Schedule `task`; `None` if the host refused to schedule it
    fn every(&mut self, interval_ms: u32, task: Box<dyn FnMut()>) -> Option<TimerId>;
    fn cancel(&mut self, id: TimerId);
}

struct ManualTimer {
    id: TimerId,
    interval_ms: u64,
    next_due_ms: u64,
    task: Box<dyn FnMut()>,
}

/// Scheduler driven by explicit calls to [`ManualScheduler::advance`]
///
/// Used for the native headless demo and for tests. Tasks due at the same
/// instant run in registration order.
#[derive(Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: u32,
    timers: Vec<ManualTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds advanced so far
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of scheduled tasks
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Move time forward by `ms`, running every task that falls due
    pub fn advance(&mut self, ms: u64) {
        let target = self.now_ms + ms;
        loop {
            let next = self
                .timers
                .iter_mut()
                .filter(|t| t.next_due_ms <= target)
                .min_by_key(|t| (t.next_due_ms, t.id.0));
            let Some(timer) = next else {
                break;
            };
            self.now_ms = timer.next_due_ms;
            timer.next_due_ms += timer.interval_ms;
            (timer.task)();
        }
        self.now_ms = target;
    }
}

impl Scheduler for ManualScheduler {
    fn every(&mut self, interval_ms: u32, task: Box<dyn FnMut()>) -> Option<TimerId> {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let interval_ms = u64::from(interval_ms.max(1));
        self.timers.push(ManualTimer {
            id,
            interval_ms,
            next_due_ms: self.now_ms + interval_ms,
            task,
        });
        Some(id)
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }
}

/// One running (or stopped) game
pub struct Session<G: Game + 'static, R: Surface + 'static, S: Scheduler> {
    game: Rc<RefCell<G>>,
    surface: Rc<RefCell<R>>,
    scheduler: S,
    timers: Vec<TimerId>,
}

impl<G: Game + 'static, R: Surface + 'static, S: Scheduler> Session<G, R, S> {
    pub fn new(game: G, surface: R, scheduler: S) -> Self {
        Self {
            game: Rc::new(RefCell::new(game)),
            surface: Rc::new(RefCell::new(surface)),
            scheduler,
            timers: Vec::new(),
        }
    }

    /// Draw the first frame and schedule the tick (and clock) tasks
    ///
    /// Starting a session that is already running does nothing. If the
    /// scheduler refuses the tick task the session stays stopped.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        self.game.borrow().render(&mut *self.surface.borrow_mut());

        let (tick_ms, clock_ms) = {
            let game = self.game.borrow();
            (game.tick_interval_ms(), game.clock_interval_ms())
        };

        let game = Rc::clone(&self.game);
        let surface = Rc::clone(&self.surface);
        let tick = self.scheduler.every(
            tick_ms,
            Box::new(move || {
                let mut game = game.borrow_mut();
                game.tick();
                game.render(&mut *surface.borrow_mut());
            }),
        );
        let Some(tick) = tick else {
            log::error!("Could not schedule the {}ms tick, session not started", tick_ms);
            return;
        };
        self.timers.push(tick);

        if let Some(clock_ms) = clock_ms {
            let game = Rc::clone(&self.game);
            match self
                .scheduler
                .every(clock_ms, Box::new(move || game.borrow_mut().clock()))
            {
                Some(clock) => self.timers.push(clock),
                None => log::warn!("Could not schedule the {}ms clock", clock_ms),
            }
        }

        log::debug!("Session started (tick {}ms, clock {:?}ms)", tick_ms, clock_ms);
    }

    /// Cancel every task this session scheduled
    pub fn stop(&mut self) {
        if self.timers.is_empty() {
            return;
        }
        for id in self.timers.drain(..) {
            self.scheduler.cancel(id);
        }
        log::debug!("Session stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Stop, let the game adopt the new width, and start again
    pub fn resize(&mut self, field_width: f32) {
        let was_running = self.is_running();
        self.stop();
        self.game.borrow_mut().resize(field_width);
        if was_running {
            self.start();
        }
    }

    /// Forward an input event to the game
    pub fn dispatch(&self, event: InputEvent) -> bool {
        self.game.borrow_mut().handle_input(event)
    }

    pub fn game(&self) -> Ref<'_, G> {
        self.game.borrow()
    }

    pub fn game_mut(&self) -> RefMut<'_, G> {
        self.game.borrow_mut()
    }

    pub fn surface(&self) -> Ref<'_, R> {
        self.surface.borrow()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<G: Game + 'static, R: Surface + 'static, S: Scheduler> Drop for Session<G, R, S> {
    fn drop(&mut self) {
        self.stop();
    }
}
