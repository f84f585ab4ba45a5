//! 测试用的脚本化进程与空世界。

use crate::resource::{Grant, Priority, ResourceHandle};
use crate::sim::{Process, SimError, SimTime, Simulator, Step, Wake, World};
use std::any::Any;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub(super) type Log = Arc<Mutex<Vec<(String, f64)>>>;

#[derive(Default)]
pub(super) struct DummyWorld;

impl World for DummyWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) enum Action {
    Delay(f64),
    Acquire(Priority),
    Release,
    Mark(&'static str),
    /// 记录资源当前状态
    Snapshot,
    /// 记录以给定优先级持有的单元数
    HeldBy(Priority),
}

pub(super) struct Scripted {
    label: &'static str,
    actions: VecDeque<Action>,
    lanes: ResourceHandle,
    grants: Vec<Grant>,
    log: Log,
}

impl Scripted {
    pub(super) fn new(
        label: &'static str,
        actions: &[Action],
        lanes: &ResourceHandle,
        log: &Log,
    ) -> Self {
        Self {
            label,
            actions: actions.iter().copied().collect(),
            lanes: lanes.clone(),
            grants: Vec::new(),
            log: Arc::clone(log),
        }
    }

    fn note(&self, what: String, now: SimTime) {
        self.log
            .lock()
            .expect("log lock")
            .push((format!("{}:{what}", self.label), now.as_f64()));
    }
}

impl Process for Scripted {
    fn name(&self) -> &'static str {
        self.label
    }

    fn resume(
        &mut self,
        wake: Wake,
        sim: &mut Simulator,
        _world: &mut dyn World,
    ) -> Result<Step, SimError> {
        if let Wake::Granted(grant) = wake {
            self.note("granted".to_string(), sim.now());
            self.grants.push(grant);
        }
        while let Some(action) = self.actions.pop_front() {
            match action {
                Action::Delay(d) => return Ok(Step::delay(SimTime(d))),
                Action::Acquire(p) => return Ok(Step::acquire(&self.lanes, p)),
                Action::Release => {
                    let grant = self.grants.pop().expect("release without grant");
                    self.lanes.release(&grant, sim)?;
                    self.note("released".to_string(), sim.now());
                }
                Action::Mark(m) => self.note(m.to_string(), sim.now()),
                Action::HeldBy(p) => {
                    let n = self
                        .lanes
                        .held_priorities()
                        .into_iter()
                        .filter(|&h| h == p)
                        .count();
                    self.note(format!("held[{p}]={n}"), sim.now());
                }
                Action::Snapshot => self.note(
                    format!(
                        "in_use={} queue={:?}",
                        self.lanes.in_use(),
                        self.lanes.waiting_priorities()
                    ),
                    sim.now(),
                ),
            }
        }
        Ok(Step::Completed)
    }
}

pub(super) fn entries(log: &Log) -> Vec<(String, f64)> {
    log.lock().expect("log lock").clone()
}

pub(super) fn entries_with(log: &Log, suffix: &str) -> Vec<(String, f64)> {
    entries(log)
        .into_iter()
        .filter(|(what, _)| what.ends_with(suffix))
        .collect()
}

pub(super) fn e(what: &str, at: f64) -> (String, f64) {
    (what.to_string(), at)
}
