//! Test modules for the executor crate.

pub mod facade;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::bridge::Engine;
use crate::{Result, Status, Target, Value};

/// What the scripted engine saw.
#[derive(Debug, Default)]
pub struct Journal {
    pub sent: Vec<String>,
    pub closes: usize,
}

/// Engine double that answers from a script and records every command.
pub struct ScriptedEngine {
    script: VecDeque<std::result::Result<Value, (Status, String)>>,
    result: Option<Value>,
    error: String,
    close_status: Status,
    journal: Rc<RefCell<Journal>>,
}

impl ScriptedEngine {
    pub fn new() -> (Self, Rc<RefCell<Journal>>) {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let engine = ScriptedEngine {
            script: VecDeque::new(),
            result: None,
            error: String::new(),
            close_status: Status::Ok,
            journal: Rc::clone(&journal),
        };
        (engine, journal)
    }

    pub fn answer(mut self, value: Value) -> Self {
        self.script.push_back(Ok(value));
        self
    }

    pub fn fail(mut self, status: Status, message: &str) -> Self {
        self.script.push_back(Err((status, message.to_string())));
        self
    }

    pub fn failing_close(mut self, status: Status) -> Self {
        self.close_status = status;
        self
    }
}

impl Engine for ScriptedEngine {
    fn open(_target: &Target) -> Result<Self> {
        Ok(ScriptedEngine::new().0)
    }

    fn exec(&mut self, command: &str) -> Status {
        self.journal.borrow_mut().sent.push(command.to_string());
        self.result = None;
        self.error.clear();
        match self.script.pop_front() {
            Some(Ok(value)) => {
                self.result = Some(value);
                Status::Ok
            }
            Some(Err((status, message))) => {
                self.error = message;
                status
            }
            None => {
                self.error = "script exhausted".to_string();
                Status::Abort
            }
        }
    }

    fn exec_result(&self) -> std::result::Result<&Value, Status> {
        self.result.as_ref().ok_or(Status::NotFound)
    }

    fn last_error(&self) -> String {
        self.error.clone()
    }

    fn close(&mut self) -> Status {
        self.journal.borrow_mut().closes += 1;
        if !self.close_status.is_ok() {
            self.error = "close failed".to_string();
        }
        self.close_status
    }
}
